//! Proof exporters.

pub mod markdown;
pub mod tstp;
