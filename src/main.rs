mod options;
mod output;
mod script;

use crate::options::Options;
use crate::output::{exit, szs};
use crate::script::ScriptError;
use logicore::Logic;

fn main() {
    let options = Options::parse();
    output::log::start_logging(options.log_level);
    let script = script::load(&options.path).unwrap_or_else(|error| {
        println!("% {}", error);
        match error {
            ScriptError::Read { .. } => szs::os_error(),
            ScriptError::Parse(_) => szs::input_error(),
        }
        exit::bad_script()
    });

    let logic = Logic::new(options.config());
    logic.init();
    let outcomes = script::run(&logic, &script);
    options.output.result(&options, &logic, &outcomes)
}
