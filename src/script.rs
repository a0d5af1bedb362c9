use logicore::Logic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub(crate) struct Invocation {
    pub(crate) call: String,
    #[serde(default)]
    pub(crate) args: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Outcome {
    pub(crate) call: String,
    pub(crate) result: Value,
}

#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn load(path: &Path) -> Result<Vec<Invocation>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text)
}

pub(crate) fn parse(text: &str) -> Result<Vec<Invocation>, ScriptError> {
    Ok(serde_json::from_str(text)?)
}

/// Run every invocation in order. Failures are reported as boxed errors
/// and do not stop the script.
pub(crate) fn run(logic: &Logic, script: &[Invocation]) -> Vec<Outcome> {
    script
        .iter()
        .map(|invocation| Outcome {
            call: invocation.call.clone(),
            result: logic.call(&invocation.call, &invocation.args),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_empty() {
        let script = parse(r#"[{"call": "axiom_list"}]"#).unwrap();
        assert_eq!(script[0].call, "axiom_list");
        assert!(script[0].args.is_empty());
    }

    #[test]
    fn failures_do_not_stop_the_script() {
        let script = parse(
            r#"[
                {"call": "theorem_get", "args": [1]},
                {"call": "axiom_list"}
            ]"#,
        )
        .unwrap();
        let logic = Logic::default();
        logic.init();
        let outcomes = run(&logic, &script);
        assert_eq!(outcomes[0].result["code"], -1007);
        assert_eq!(outcomes[1].result.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn rejects_non_array_scripts() {
        assert!(matches!(
            parse(r#"{"call": "axiom_list"}"#),
            Err(ScriptError::Parse(_))
        ));
    }
}
