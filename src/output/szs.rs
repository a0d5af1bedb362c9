pub(crate) fn os_error() {
    println!("% SZS status OSError");
}

pub(crate) fn input_error() {
    println!("% SZS status InputError");
}

pub(crate) fn theorem(name: &str) {
    println!("% SZS status Theorem for {}", name);
}

pub(crate) fn unknown(name: &str) {
    println!("% SZS status Unknown for {}", name);
}
