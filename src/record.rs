use crate::formula::FormulaNode;
use crate::rule::Rule;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Observer for proofs and statistics. Every method defaults to a no-op.
pub trait Record {
    fn statistic<T: Serialize + fmt::Display>(
        &mut self,
        _key: &'static str,
        _value: T,
    ) {
    }

    fn begin(&mut self, _theorem: &str) {}

    fn premise(&mut self, _index: usize, _justification: &FormulaNode) {}

    fn step(
        &mut self,
        _index: usize,
        _step: &FormulaNode,
        _justification: &FormulaNode,
    ) {
    }

    fn inference(
        &mut self,
        _index: usize,
        _rule: Rule,
        _premises: &[FormulaNode],
        _derived: Option<&FormulaNode>,
    ) {
    }

    fn conclusion(&mut self, _index: usize, _justification: &FormulaNode) {}

    fn end(&mut self, _theorem: &str) {}
}

/// Collects statistics into a boxed object.
#[derive(Default)]
pub struct Collect(pub Map<String, Value>);

impl Record for Collect {
    fn statistic<T: Serialize + fmt::Display>(
        &mut self,
        key: &'static str,
        value: T,
    ) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(key.replace(' ', "_"), value);
    }
}
