use crate::formula::{ConnectiveKind, FormulaNode};

/// Structural equivalence over optional nodes.
///
/// Two absent nodes are equivalent; an absent node is equivalent to nothing
/// else. Quantifiers, inequalities and proof markers never compare equal,
/// not even to themselves. There is no alpha-renaming.
pub fn equivalent(a: Option<&FormulaNode>, b: Option<&FormulaNode>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => nodes_equivalent(a, b),
        _ => false,
    }
}

pub fn nodes_equivalent(a: &FormulaNode, b: &FormulaNode) -> bool {
    use FormulaNode::*;
    match (a, b) {
        (Proposition { name: a, .. }, Proposition { name: b, .. }) => a == b,
        (
            Variable {
                name: a_name,
                bound: a_bound,
            },
            Variable {
                name: b_name,
                bound: b_bound,
            },
        ) => a_name == b_name && a_bound == b_bound,
        (
            Predicate {
                name: a_name,
                args: a_args,
            },
            Predicate {
                name: b_name,
                args: b_args,
            },
        )
        | (
            MathFunction {
                name: a_name,
                args: a_args,
            },
            MathFunction {
                name: b_name,
                args: b_args,
            },
        ) => a_name == b_name && all_equivalent(a_args, b_args),
        (
            Connective {
                kind: a_kind,
                left: a_left,
                right: a_right,
            },
            Connective {
                kind: b_kind,
                left: b_left,
                right: b_right,
            },
        ) => {
            a_kind == b_kind
                && equivalent(a_left.as_deref(), b_left.as_deref())
                && nodes_equivalent(a_right, b_right)
        }
        (
            Equation {
                left: a_left,
                right: a_right,
            },
            Equation {
                left: b_left,
                right: b_right,
            },
        ) => {
            nodes_equivalent(a_left, b_left)
                && nodes_equivalent(a_right, b_right)
        }
        (Number(a), Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Text(a), Text(b)) => a == b,
        _ => false,
    }
}

fn all_equivalent(a: &[FormulaNode], b: &[FormulaNode]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(a, b)| nodes_equivalent(a, b))
}

/// Whether `node` is a well-formed logical statement.
pub fn validate(node: &FormulaNode) -> bool {
    match node {
        FormulaNode::Quantifier { variable, .. } => !variable.is_empty(),
        FormulaNode::Predicate { name, .. }
        | FormulaNode::MathFunction { name, .. } => !name.is_empty(),
        FormulaNode::Connective {
            kind: ConnectiveKind::Not,
            ..
        } => true,
        FormulaNode::Connective { left, .. } => left.is_some(),
        FormulaNode::Variable { .. }
        | FormulaNode::Proposition { .. }
        | FormulaNode::Equation { .. }
        | FormulaNode::Inequality { .. } => true,
        FormulaNode::ProofMarker(_)
        | FormulaNode::Number(_)
        | FormulaNode::Text(_) => false,
    }
}

/// Whether `a` and `b` are a directly contradicting pair: both connectives,
/// one the negation of something equivalent to the other.
pub fn contradicts(a: &FormulaNode, b: &FormulaNode) -> bool {
    fn negates(negation: &FormulaNode, other: &FormulaNode) -> bool {
        match negation {
            FormulaNode::Connective {
                kind: ConnectiveKind::Not,
                right,
                ..
            } => nodes_equivalent(right, other),
            _ => false,
        }
    }
    let both_connectives = matches!(a, FormulaNode::Connective { .. })
        && matches!(b, FormulaNode::Connective { .. });
    both_connectives && (negates(a, b) || negates(b, a))
}
