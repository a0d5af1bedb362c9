//! Formal logic for an embedded scripting runtime: formula trees, sound
//! inference rules, a theorem/axiom/proof registry and proof verification.

mod builtins;
pub mod config;
pub mod consistency;
pub mod equivalence;
pub mod error;
pub mod formula;
pub mod infer;
pub mod io;
pub mod proof;
pub mod record;
pub mod registry;
pub mod rule;
pub mod session;
pub mod statistics;
pub mod theorem;
pub mod undecidable;
mod util;
pub mod value;
pub mod verify;

pub use crate::config::Config;
pub use crate::error::{ErrorCode, LogicError, LogicResult};
pub use crate::formula::FormulaNode;
pub use crate::session::Logic;
