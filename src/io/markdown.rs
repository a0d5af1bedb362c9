use crate::formula::FormulaNode;
use crate::record::Record;
use crate::rule::Rule;
use serde::Serialize;
use std::fmt;

/// Numbered-list rendering of proofs, formulas in logical notation.
#[derive(Default)]
pub struct Markdown {
    out: String,
}

impl Markdown {
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, index: usize, text: String) {
        self.out.push_str(&format!("{}. {}\n", index + 1, text));
    }
}

impl Record for Markdown {
    fn statistic<T: Serialize + fmt::Display>(
        &mut self,
        key: &'static str,
        value: T,
    ) {
        self.out.push_str(&format!("- {}: {}\n", key, value));
    }

    fn begin(&mut self, theorem: &str) {
        self.out.push_str(&format!("### Proof of `{}`\n\n", theorem));
    }

    fn premise(&mut self, index: usize, justification: &FormulaNode) {
        self.line(index, format!("**Premise** {}", justification));
    }

    fn step(
        &mut self,
        index: usize,
        step: &FormulaNode,
        justification: &FormulaNode,
    ) {
        self.line(index, format!("{} *by* {}", step, justification));
    }

    fn inference(
        &mut self,
        index: usize,
        rule: Rule,
        premises: &[FormulaNode],
        derived: Option<&FormulaNode>,
    ) {
        let premises: Vec<String> =
            premises.iter().map(|premise| premise.to_string()).collect();
        let derived = derived.map_or("no conclusion".to_owned(), |node| {
            node.to_string()
        });
        self.line(
            index,
            format!("**{}** ({}) ⊢ {}", rule, premises.join(", "), derived),
        );
    }

    fn conclusion(&mut self, index: usize, justification: &FormulaNode) {
        self.line(index, format!("**Conclusion** {}", justification));
    }

    fn end(&mut self, _theorem: &str) {
        self.out.push('\n');
    }
}
