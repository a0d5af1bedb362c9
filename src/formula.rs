//! The logical formula tree.
//!
//! Every node owns its children outright: there is no sharing and no cycles,
//! so `Clone` is a deep copy and dropping a node releases the whole subtree.

use crate::rule::Rule;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuantifierKind {
    Universal,
    Existential,
}

impl QuantifierKind {
    pub fn name(self) -> &'static str {
        match self {
            QuantifierKind::Universal => "universal",
            QuantifierKind::Existential => "existential",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "universal" => Some(QuantifierKind::Universal),
            "existential" => Some(QuantifierKind::Existential),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            QuantifierKind::Universal => "∀",
            QuantifierKind::Existential => "∃",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectiveKind {
    And,
    Or,
    Implies,
    Iff,
    Not,
}

impl ConnectiveKind {
    pub fn name(self) -> &'static str {
        match self {
            ConnectiveKind::And => "and",
            ConnectiveKind::Or => "or",
            ConnectiveKind::Implies => "implies",
            ConnectiveKind::Iff => "iff",
            ConnectiveKind::Not => "not",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "and" => Some(ConnectiveKind::And),
            "or" => Some(ConnectiveKind::Or),
            "implies" => Some(ConnectiveKind::Implies),
            "iff" => Some(ConnectiveKind::Iff),
            "not" => Some(ConnectiveKind::Not),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            ConnectiveKind::And => "∧",
            ConnectiveKind::Or => "∨",
            ConnectiveKind::Implies => "→",
            ConnectiveKind::Iff => "↔",
            ConnectiveKind::Not => "¬",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InequalityKind {
    Lt,
    Le,
    Gt,
    Ge,
}

impl InequalityKind {
    pub fn name(self) -> &'static str {
        match self {
            InequalityKind::Lt => "lt",
            InequalityKind::Le => "le",
            InequalityKind::Gt => "gt",
            InequalityKind::Ge => "ge",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lt" => Some(InequalityKind::Lt),
            "le" => Some(InequalityKind::Le),
            "gt" => Some(InequalityKind::Gt),
            "ge" => Some(InequalityKind::Ge),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            InequalityKind::Lt => "<",
            InequalityKind::Le => "≤",
            InequalityKind::Gt => ">",
            InequalityKind::Ge => "≥",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    Premise,
    Conclusion,
    InferenceStep { rule: Rule, premises: Vec<FormulaNode> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormulaNode {
    Quantifier {
        kind: QuantifierKind,
        variable: String,
        domain: Option<Box<FormulaNode>>,
        body: Box<FormulaNode>,
    },
    /// `left` is `None` exactly for `Not`.
    Connective {
        kind: ConnectiveKind,
        left: Option<Box<FormulaNode>>,
        right: Box<FormulaNode>,
    },
    Predicate {
        name: String,
        args: Vec<FormulaNode>,
    },
    Variable {
        name: String,
        bound: bool,
    },
    Proposition {
        name: String,
        truth: Option<bool>,
    },
    Equation {
        left: Box<FormulaNode>,
        right: Box<FormulaNode>,
    },
    Inequality {
        kind: InequalityKind,
        left: Box<FormulaNode>,
        right: Box<FormulaNode>,
    },
    MathFunction {
        name: String,
        args: Vec<FormulaNode>,
    },
    ProofMarker(Marker),
    Number(f64),
    Text(String),
}

/// Variant tag, used wherever a node is described without its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Quantifier,
    Connective,
    Predicate,
    Variable,
    Proposition,
    Equation,
    Inequality,
    MathFunction,
    Premise,
    Conclusion,
    Inference,
    Number,
    Text,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Quantifier => "quantifier",
            NodeKind::Connective => "connective",
            NodeKind::Predicate => "predicate",
            NodeKind::Variable => "variable",
            NodeKind::Proposition => "proposition",
            NodeKind::Equation => "equation",
            NodeKind::Inequality => "inequality",
            NodeKind::MathFunction => "math_function",
            NodeKind::Premise => "premise",
            NodeKind::Conclusion => "conclusion",
            NodeKind::Inference => "inference",
            NodeKind::Number => "number",
            NodeKind::Text => "string",
        }
    }
}

impl FormulaNode {
    pub fn quantifier<S: Into<String>>(
        kind: QuantifierKind,
        variable: S,
        domain: Option<FormulaNode>,
        body: FormulaNode,
    ) -> Self {
        FormulaNode::Quantifier {
            kind,
            variable: variable.into(),
            domain: domain.map(Box::new),
            body: Box::new(body),
        }
    }

    pub fn universal<S: Into<String>>(variable: S, body: FormulaNode) -> Self {
        Self::quantifier(QuantifierKind::Universal, variable, None, body)
    }

    pub fn existential<S: Into<String>>(
        variable: S,
        body: FormulaNode,
    ) -> Self {
        Self::quantifier(QuantifierKind::Existential, variable, None, body)
    }

    pub fn connective(
        kind: ConnectiveKind,
        left: Option<FormulaNode>,
        right: FormulaNode,
    ) -> Self {
        FormulaNode::Connective {
            kind,
            left: left.map(Box::new),
            right: Box::new(right),
        }
    }

    pub fn and(left: FormulaNode, right: FormulaNode) -> Self {
        Self::connective(ConnectiveKind::And, Some(left), right)
    }

    pub fn or(left: FormulaNode, right: FormulaNode) -> Self {
        Self::connective(ConnectiveKind::Or, Some(left), right)
    }

    pub fn implies(left: FormulaNode, right: FormulaNode) -> Self {
        Self::connective(ConnectiveKind::Implies, Some(left), right)
    }

    pub fn iff(left: FormulaNode, right: FormulaNode) -> Self {
        Self::connective(ConnectiveKind::Iff, Some(left), right)
    }

    pub fn not(operand: FormulaNode) -> Self {
        Self::connective(ConnectiveKind::Not, None, operand)
    }

    pub fn predicate<S: Into<String>>(name: S, args: Vec<FormulaNode>) -> Self {
        FormulaNode::Predicate {
            name: name.into(),
            args,
        }
    }

    pub fn variable<S: Into<String>>(name: S, bound: bool) -> Self {
        FormulaNode::Variable {
            name: name.into(),
            bound,
        }
    }

    pub fn proposition<S: Into<String>>(name: S) -> Self {
        FormulaNode::Proposition {
            name: name.into(),
            truth: None,
        }
    }

    pub fn equation(left: FormulaNode, right: FormulaNode) -> Self {
        FormulaNode::Equation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn inequality(
        kind: InequalityKind,
        left: FormulaNode,
        right: FormulaNode,
    ) -> Self {
        FormulaNode::Inequality {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn math_function<S: Into<String>>(
        name: S,
        args: Vec<FormulaNode>,
    ) -> Self {
        FormulaNode::MathFunction {
            name: name.into(),
            args,
        }
    }

    pub fn premise() -> Self {
        FormulaNode::ProofMarker(Marker::Premise)
    }

    pub fn conclusion() -> Self {
        FormulaNode::ProofMarker(Marker::Conclusion)
    }

    pub fn inference(rule: Rule, premises: Vec<FormulaNode>) -> Self {
        FormulaNode::ProofMarker(Marker::InferenceStep { rule, premises })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FormulaNode::Quantifier { .. } => NodeKind::Quantifier,
            FormulaNode::Connective { .. } => NodeKind::Connective,
            FormulaNode::Predicate { .. } => NodeKind::Predicate,
            FormulaNode::Variable { .. } => NodeKind::Variable,
            FormulaNode::Proposition { .. } => NodeKind::Proposition,
            FormulaNode::Equation { .. } => NodeKind::Equation,
            FormulaNode::Inequality { .. } => NodeKind::Inequality,
            FormulaNode::MathFunction { .. } => NodeKind::MathFunction,
            FormulaNode::ProofMarker(Marker::Premise) => NodeKind::Premise,
            FormulaNode::ProofMarker(Marker::Conclusion) => {
                NodeKind::Conclusion
            }
            FormulaNode::ProofMarker(Marker::InferenceStep { .. }) => {
                NodeKind::Inference
            }
            FormulaNode::Number(_) => NodeKind::Number,
            FormulaNode::Text(_) => NodeKind::Text,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, FormulaNode::ProofMarker(_))
    }

    pub fn children(&self) -> Vec<&FormulaNode> {
        match self {
            FormulaNode::Quantifier { domain, body, .. } => domain
                .iter()
                .map(|domain| &**domain)
                .chain(std::iter::once(&**body))
                .collect(),
            FormulaNode::Connective { left, right, .. } => left
                .iter()
                .map(|left| &**left)
                .chain(std::iter::once(&**right))
                .collect(),
            FormulaNode::Predicate { args, .. }
            | FormulaNode::MathFunction { args, .. } => args.iter().collect(),
            FormulaNode::Equation { left, right }
            | FormulaNode::Inequality { left, right, .. } => {
                vec![&**left, &**right]
            }
            FormulaNode::ProofMarker(Marker::InferenceStep {
                premises, ..
            }) => premises.iter().collect(),
            FormulaNode::Variable { .. }
            | FormulaNode::Proposition { .. }
            | FormulaNode::ProofMarker(_)
            | FormulaNode::Number(_)
            | FormulaNode::Text(_) => vec![],
        }
    }

    /// Replace free occurrences of `variable` with a copy of `replacement`.
    ///
    /// A quantifier rebinding the same name shadows it: its body is left
    /// alone, though its domain (outside the binder) is still rewritten.
    pub fn substitute(
        &self,
        variable: &str,
        replacement: &FormulaNode,
    ) -> FormulaNode {
        let recurse =
            |node: &FormulaNode| node.substitute(variable, replacement);
        let recurse_box = |node: &FormulaNode| Box::new(recurse(node));
        match self {
            FormulaNode::Variable { name, .. } if name == variable => {
                replacement.clone()
            }
            FormulaNode::Quantifier {
                kind,
                variable: bound,
                domain,
                body,
            } => FormulaNode::Quantifier {
                kind: *kind,
                variable: bound.clone(),
                domain: domain.as_deref().map(recurse_box),
                body: if bound == variable {
                    body.clone()
                } else {
                    recurse_box(body)
                },
            },
            FormulaNode::Connective { kind, left, right } => {
                FormulaNode::Connective {
                    kind: *kind,
                    left: left.as_deref().map(recurse_box),
                    right: recurse_box(right),
                }
            }
            FormulaNode::Predicate { name, args } => FormulaNode::Predicate {
                name: name.clone(),
                args: args.iter().map(recurse).collect(),
            },
            FormulaNode::MathFunction { name, args } => {
                FormulaNode::MathFunction {
                    name: name.clone(),
                    args: args.iter().map(recurse).collect(),
                }
            }
            FormulaNode::Equation { left, right } => FormulaNode::Equation {
                left: recurse_box(left),
                right: recurse_box(right),
            },
            FormulaNode::Inequality { kind, left, right } => {
                FormulaNode::Inequality {
                    kind: *kind,
                    left: recurse_box(left),
                    right: recurse_box(right),
                }
            }
            FormulaNode::ProofMarker(Marker::InferenceStep {
                rule,
                premises,
            }) => FormulaNode::inference(
                *rule,
                premises.iter().map(recurse).collect(),
            ),
            FormulaNode::Variable { .. }
            | FormulaNode::Proposition { .. }
            | FormulaNode::ProofMarker(_)
            | FormulaNode::Number(_)
            | FormulaNode::Text(_) => self.clone(),
        }
    }
}

fn write_args(f: &mut fmt::Formatter, args: &[FormulaNode]) -> fmt::Result {
    write!(f, "(")?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for FormulaNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormulaNode::Quantifier {
                kind,
                variable,
                domain,
                body,
            } => {
                write!(f, "{}{}", kind.symbol(), variable)?;
                if let Some(domain) = domain {
                    write!(f, " ∈ {}", domain)?;
                }
                write!(f, ". {}", body)
            }
            FormulaNode::Connective {
                kind: ConnectiveKind::Not,
                right,
                ..
            } => write!(f, "¬{}", right),
            FormulaNode::Connective { kind, left, right } => match left {
                Some(left) => {
                    write!(f, "({} {} {})", left, kind.symbol(), right)
                }
                None => write!(f, "({} ? {})", kind.symbol(), right),
            },
            FormulaNode::Predicate { name, args } if args.is_empty() => {
                write!(f, "{}", name)
            }
            FormulaNode::Predicate { name, args }
            | FormulaNode::MathFunction { name, args } => {
                write!(f, "{}", name)?;
                write_args(f, args)
            }
            FormulaNode::Variable { name, .. }
            | FormulaNode::Proposition { name, .. } => write!(f, "{}", name),
            FormulaNode::Equation { left, right } => {
                write!(f, "({} = {})", left, right)
            }
            FormulaNode::Inequality { kind, left, right } => {
                write!(f, "({} {} {})", left, kind.symbol(), right)
            }
            FormulaNode::ProofMarker(Marker::Premise) => write!(f, "[premise]"),
            FormulaNode::ProofMarker(Marker::Conclusion) => {
                write!(f, "[conclusion]")
            }
            FormulaNode::ProofMarker(Marker::InferenceStep {
                rule,
                premises,
            }) => {
                write!(f, "[{}", rule)?;
                if !premises.is_empty() {
                    write_args(f, premises)?;
                }
                write!(f, "]")
            }
            FormulaNode::Number(number) => write!(f, "{}", number),
            FormulaNode::Text(text) => write!(f, "{:?}", text),
        }
    }
}
