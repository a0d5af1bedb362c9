use crate::value::ConversionError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Stable numeric codes carried by boxed errors. `Inconsistent` and
/// `MemoryAllocation` are reserved: contradictions are reported as results
/// and allocation failure aborts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    InvalidTheorem = -1001,
    InvalidProof = -1002,
    InvalidAxiom = -1003,
    ProofIncomplete = -1004,
    Inconsistent = -1005,
    Timeout = -1006,
    ParseFailed = -1007,
    NotFound = -1008,
    SystemNotInitialized = -1009,
    MemoryAllocation = -1010,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LogicError {
    #[error("logic system is not initialized")]
    NotInitialized,
    #[error("theorem '{0}' already exists")]
    DuplicateTheorem(String),
    #[error("axiom '{0}' already exists")]
    DuplicateAxiom(String),
    #[error("theorem '{0}' is not a well-formed logical statement")]
    InvalidTheorem(String),
    #[error("axiom '{0}' is not a well-formed logical statement")]
    InvalidAxiom(String),
    #[error("theorem '{0}' not found")]
    TheoremNotFound(String),
    #[error("axiom '{0}' not found")]
    AxiomNotFound(String),
    #[error("no proof recorded for theorem '{0}'")]
    ProofNotFound(String),
    #[error("proof of '{0}' must have at least one step")]
    EmptyProof(String),
    #[error("proof of '{0}' is not complete")]
    ProofIncomplete(String),
    #[error("verification of '{name}' exceeded {limit:?}")]
    Timeout { name: String, limit: Duration },
    #[error("reset requires confirmation (pass true to confirm)")]
    NotConfirmed,
    #[error("{0}")]
    Conversion(#[from] ConversionError),
    #[error("{call}() expects {expected} arguments, got {got}")]
    Arity {
        call: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("{call}(): {message}")]
    Argument { call: &'static str, message: String },
    #[error("formula is not propositional: {0}")]
    NotPropositional(String),
    #[error("truth table over {atoms} propositions exceeds limit {limit}")]
    TruthTableTooLarge { atoms: usize, limit: usize },
    #[error("unknown proof export format '{0}'")]
    UnknownFormat(String),
    #[error("unknown logic function '{0}'")]
    UnknownCall(String),
}

impl LogicError {
    pub fn code(&self) -> ErrorCode {
        use LogicError::*;
        match self {
            NotInitialized => ErrorCode::SystemNotInitialized,
            DuplicateTheorem(_) | InvalidTheorem(_) => {
                ErrorCode::InvalidTheorem
            }
            DuplicateAxiom(_) | InvalidAxiom(_) => ErrorCode::InvalidAxiom,
            TheoremNotFound(_) | AxiomNotFound(_) | ProofNotFound(_) => {
                ErrorCode::NotFound
            }
            EmptyProof(_) => ErrorCode::InvalidProof,
            ProofIncomplete(_) => ErrorCode::ProofIncomplete,
            Timeout { .. } => ErrorCode::Timeout,
            NotConfirmed
            | Conversion(_)
            | Arity { .. }
            | Argument { .. }
            | NotPropositional(_)
            | TruthTableTooLarge { .. }
            | UnknownFormat(_)
            | UnknownCall(_) => ErrorCode::ParseFailed,
        }
    }
}

pub type LogicResult<T> = Result<T, LogicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::InvalidTheorem.as_i32(), -1001);
        assert_eq!(ErrorCode::Timeout.as_i32(), -1006);
        assert_eq!(ErrorCode::MemoryAllocation.as_i32(), -1010);
    }

    #[test]
    fn duplicates_report_the_kind_they_collide_in() {
        let theorem = LogicError::DuplicateTheorem("t".into());
        let axiom = LogicError::DuplicateAxiom("a".into());
        assert_eq!(theorem.code(), ErrorCode::InvalidTheorem);
        assert_eq!(axiom.code(), ErrorCode::InvalidAxiom);
        assert_eq!(theorem.to_string(), "theorem 't' already exists");
    }

    #[test]
    fn lookups_map_to_not_found() {
        assert_eq!(
            LogicError::ProofNotFound("t".into()).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            LogicError::NotInitialized.code(),
            ErrorCode::SystemNotInitialized
        );
    }
}
