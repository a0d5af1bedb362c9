use crate::equivalence::nodes_equivalent;
use crate::formula::{ConnectiveKind, FormulaNode, QuantifierKind};
use crate::rule::Rule;

/// `(A → B, A') ⊢ B` when `A` and `A'` are equivalent.
pub fn modus_ponens(premises: &[FormulaNode]) -> Option<FormulaNode> {
    match premises {
        [FormulaNode::Connective {
            kind: ConnectiveKind::Implies,
            left: Some(antecedent),
            right: consequent,
        }, fact] if nodes_equivalent(antecedent, fact) => {
            Some((**consequent).clone())
        }
        _ => None,
    }
}

/// `(A → B, ¬B') ⊢ ¬A` when `B` and `B'` are equivalent.
pub fn modus_tollens(premises: &[FormulaNode]) -> Option<FormulaNode> {
    match premises {
        [FormulaNode::Connective {
            kind: ConnectiveKind::Implies,
            left: Some(antecedent),
            right: consequent,
        }, FormulaNode::Connective {
            kind: ConnectiveKind::Not,
            right: denied,
            ..
        }] if nodes_equivalent(consequent, denied) => {
            Some(FormulaNode::not((**antecedent).clone()))
        }
        _ => None,
    }
}

/// `(∀x. body, t) ⊢ body`.
///
/// The body is returned as-is: `t` is not substituted for `x`.
pub fn universal_instantiation(
    premises: &[FormulaNode],
) -> Option<FormulaNode> {
    match premises {
        [FormulaNode::Quantifier {
            kind: QuantifierKind::Universal,
            body,
            ..
        }, _term] => Some((**body).clone()),
        _ => None,
    }
}

pub fn axiom(premises: &[FormulaNode]) -> Option<FormulaNode> {
    match premises {
        [statement] => Some(statement.clone()),
        _ => None,
    }
}

pub fn apply(rule: Rule, premises: &[FormulaNode]) -> Option<FormulaNode> {
    match rule {
        Rule::ModusPonens => modus_ponens(premises),
        Rule::ModusTollens => modus_tollens(premises),
        Rule::UniversalInstantiation => universal_instantiation(premises),
        Rule::Axiom => axiom(premises),
        Rule::ExistentialGeneralization | Rule::Assumption => None,
    }
}
