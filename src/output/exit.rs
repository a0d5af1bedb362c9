use std::process::exit;

const PROVEN: i32 = 0;
const UNPROVEN: i32 = 1;
const BAD_SCRIPT: i32 = 2;

/// Exit successfully only if every theorem was proven.
pub(crate) fn proven(all: bool) -> ! {
    exit(if all { PROVEN } else { UNPROVEN })
}

/// The script could not be read, parsed or run at all.
pub(crate) fn bad_script() -> ! {
    exit(BAD_SCRIPT)
}
