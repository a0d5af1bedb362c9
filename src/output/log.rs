use log::{set_logger, set_max_level, LevelFilter, Log, Metadata, Record};

/// Writes to stderr, leaving stdout to the JSON or TSTP report.
struct Logger;
static GLOBAL_LOG: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "% [{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

pub(crate) fn start_logging(level: LevelFilter) {
    // a second call keeps the first logger
    let _ = set_logger(&GLOBAL_LOG);
    set_max_level(level);
}
