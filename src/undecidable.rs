//! Recognition of self-referential statement shapes, and three-valued
//! evaluation that reports them as undecidable rather than true or false.

use crate::error::{LogicError, LogicResult};
use crate::formula::{ConnectiveKind, FormulaNode, QuantifierKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Marker for a statement recognized as Gödel-like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undecidable;

/// Pattern heuristic, not a decidability oracle: flags `¬Provable…(…)` and
/// `∀x. (A → B)`.
pub fn detect_undecidable(node: &FormulaNode) -> Option<Undecidable> {
    match node {
        FormulaNode::Connective {
            kind: ConnectiveKind::Not,
            right,
            ..
        } => match &**right {
            FormulaNode::Predicate { name, .. }
                if name.contains("Provable") =>
            {
                Some(Undecidable)
            }
            _ => None,
        },
        FormulaNode::Quantifier {
            kind: QuantifierKind::Universal,
            body,
            ..
        } => match &**body {
            FormulaNode::Connective {
                kind: ConnectiveKind::Implies,
                ..
            } => Some(Undecidable),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Truth {
    True,
    False,
    Undecidable,
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl Truth {
    fn not(self) -> Self {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Undecidable => Truth::Undecidable,
        }
    }

    fn and(self, other: Self) -> Self {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Undecidable,
        }
    }

    fn or(self, other: Self) -> Self {
        self.not().and(other.not()).not()
    }

    fn iff(self, other: Self) -> Self {
        match (self, other) {
            (Truth::Undecidable, _) | (_, Truth::Undecidable) => {
                Truth::Undecidable
            }
            (a, b) => Truth::from(a == b),
        }
    }
}

/// Propositional value of `node` under `assignment`.
///
/// Recognized self-referential shapes evaluate to `Undecidable` wherever
/// they occur, as do propositions with neither an assignment nor a fixed
/// truth value. Anything beyond connectives and propositions is an error.
pub fn evaluate(
    node: &FormulaNode,
    assignment: &BTreeMap<String, bool>,
) -> LogicResult<Truth> {
    if detect_undecidable(node).is_some() {
        return Ok(Truth::Undecidable);
    }
    match node {
        FormulaNode::Proposition { name, truth } => Ok(assignment
            .get(name)
            .copied()
            .or(*truth)
            .map_or(Truth::Undecidable, Truth::from)),
        FormulaNode::Connective {
            kind: ConnectiveKind::Not,
            right,
            ..
        } => Ok(evaluate(right, assignment)?.not()),
        FormulaNode::Connective {
            kind,
            left: Some(left),
            right,
        } => {
            let left = evaluate(left, assignment)?;
            let right = evaluate(right, assignment)?;
            Ok(match kind {
                ConnectiveKind::And => left.and(right),
                ConnectiveKind::Or => left.or(right),
                ConnectiveKind::Implies => left.not().or(right),
                ConnectiveKind::Iff | ConnectiveKind::Not => left.iff(right),
            })
        }
        other => Err(LogicError::NotPropositional(other.to_string())),
    }
}

fn propositions<'a>(node: &'a FormulaNode, names: &mut BTreeSet<&'a str>) {
    if let FormulaNode::Proposition { name, .. } = node {
        names.insert(name);
    }
    for child in node.children() {
        propositions(child, names);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub assignment: Vec<bool>,
    pub value: Truth,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TruthTable {
    pub propositions: Vec<String>,
    pub rows: Vec<Row>,
}

/// Evaluate `node` under every assignment of its propositions, named in
/// sorted order. The first proposition varies slowest, false before true.
pub fn truth_table(
    node: &FormulaNode,
    limit: usize,
) -> LogicResult<TruthTable> {
    let mut names = BTreeSet::new();
    propositions(node, &mut names);
    let names: Vec<String> = names.into_iter().map(str::to_owned).collect();
    let atoms = names.len();
    if atoms > limit || atoms >= usize::BITS as usize {
        return Err(LogicError::TruthTableTooLarge { atoms, limit });
    }

    let mut rows = Vec::with_capacity(1 << atoms);
    for bits in 0..(1usize << atoms) {
        let values: Vec<bool> = (0..atoms)
            .map(|index| bits & (1 << (atoms - 1 - index)) != 0)
            .collect();
        let assignment =
            names.iter().cloned().zip(values.iter().copied()).collect();
        let value = evaluate(node, &assignment)?;
        rows.push(Row {
            assignment: values,
            value,
        });
    }
    Ok(TruthTable {
        propositions: names,
        rows,
    })
}
