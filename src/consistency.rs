//! Shallow entailment and consistency checks.
//!
//! Both are direct-containment tests: entailment looks for the conclusion
//! among the premises, and the consistency scan only catches a pair of
//! connectives where one is the negation of the other.

use crate::equivalence::{contradicts, nodes_equivalent};
use crate::formula::FormulaNode;
use crate::theorem::Axiom;

pub fn entails(premises: &[FormulaNode], conclusion: &FormulaNode) -> bool {
    premises
        .iter()
        .any(|premise| nodes_equivalent(premise, conclusion))
}

/// Every contradicting pair of axioms, as index pairs `(i, j)` with `i < j`.
pub fn contradictions(axioms: &[Axiom]) -> Vec<(usize, usize)> {
    let mut pairs = vec![];
    for (i, first) in axioms.iter().enumerate() {
        for (j, second) in axioms.iter().enumerate().skip(i + 1) {
            if contradicts(&first.statement, &second.statement) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> FormulaNode {
        FormulaNode::proposition(name)
    }

    #[test]
    fn entailment_is_direct_containment() {
        let p = prop("P");
        let q = prop("Q");
        let p_implies_q = FormulaNode::implies(p.clone(), q.clone());
        assert!(entails(&[p.clone(), q.clone()], &q));
        assert!(!entails(&[p, p_implies_q], &q));
        assert!(!entails(&[], &q));
    }

    #[test]
    fn seeded_axioms_are_consistent() {
        assert!(contradictions(&Axiom::seeded()).is_empty());
    }

    #[test]
    fn finds_negated_pair() {
        let p_or_q = FormulaNode::or(prop("P"), prop("Q"));
        let mut axioms = Axiom::seeded();
        axioms.push(Axiom::new("a", p_or_q.clone()));
        axioms.push(Axiom::new("b", prop("R")));
        axioms.push(Axiom::new("c", FormulaNode::not(p_or_q)));
        assert_eq!(contradictions(&axioms), vec![(2, 4)]);
    }
}
