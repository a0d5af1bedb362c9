pub(crate) mod exit;
pub(crate) mod log;
pub(crate) mod szs;

use crate::options::{Options, Output};
use crate::script::Outcome;
use logicore::io::tstp::TSTP;
use logicore::registry::Registry;
use logicore::{Logic, LogicResult};

fn json(outcomes: &[Outcome]) {
    for outcome in outcomes {
        if let Ok(line) = serde_json::to_string(outcome) {
            println!("{}", line);
        }
    }
}

fn tstp(registry: &Registry) {
    let mut tstp = TSTP::default();
    for theorem in registry.theorems() {
        if let Some(proof) = theorem.proof() {
            proof.record(&mut tstp);
        }
    }
    registry.statistics().record(&mut tstp);
    print!("{}", tstp.finish());
}

/// Print an SZS status per theorem, returning whether all were proven.
fn statuses(registry: &Registry) -> bool {
    let mut all = true;
    for theorem in registry.theorems() {
        if theorem.is_proven() {
            szs::theorem(&theorem.name);
        } else {
            szs::unknown(&theorem.name);
            all = false;
        }
    }
    all
}

impl Output {
    fn report(&self, logic: &Logic) -> LogicResult<bool> {
        logic.with_registry(|registry| {
            if let Self::TSTP = self {
                tstp(registry);
            }
            Ok(statuses(registry))
        })
    }

    pub(crate) fn result(
        &self,
        options: &Options,
        logic: &Logic,
        outcomes: &[Outcome],
    ) -> ! {
        if let Self::Json = self {
            json(outcomes);
        }
        match self.report(logic) {
            Ok(all) => exit::proven(all),
            Err(error) => {
                println!("% {}: {}", options.script_name(), error);
                exit::bad_script()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicore::LogicError;
    use serde_json::json;

    #[test]
    fn report_needs_a_registry() {
        let logic = Logic::default();
        assert_eq!(
            Output::TSTP.report(&logic),
            Err(LogicError::NotInitialized)
        );
        assert_eq!(
            Output::Silent.report(&logic),
            Err(LogicError::NotInitialized)
        );
    }

    #[test]
    fn report_tells_whether_all_are_proven() {
        let logic = Logic::default();
        logic.init();
        assert_eq!(Output::Silent.report(&logic), Ok(true));
        let statement = json!({"type": "proposition", "name": "P"});
        logic.call("theorem_define", &[json!("t"), statement]);
        assert_eq!(Output::Silent.report(&logic), Ok(false));
    }
}
