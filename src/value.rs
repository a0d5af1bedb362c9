//! Conversion between boxed script values and formula trees.
//!
//! Boxed values are JSON-shaped. A formula is an object with a `"type"`
//! discriminator, for example
//! `{"type": "connective", "connective_type": "not", "right": {...}}`.
//! Raw numbers and strings are accepted as literal leaves.

use crate::formula::{
    ConnectiveKind, FormulaNode, InequalityKind, Marker, QuantifierKind,
};
use crate::rule::Rule;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("expected a formula object, found {0}")]
    NotAFormula(&'static str),
    #[error("formula object has no \"type\" field")]
    MissingType,
    #[error("unknown formula type '{0}'")]
    UnknownType(String),
    #[error("{kind} is missing field \"{field}\"")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("{kind} field \"{field}\" must be {expected}")]
    WrongField {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown {field} '{value}'")]
    UnknownName { field: &'static str, value: String },
    #[error("negation takes a single operand, found a left operand")]
    NegationWithLeft,
}

/// Name of a JSON value's shape, for error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct Fields<'a> {
    kind: &'static str,
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.object.get(field).filter(|value| !value.is_null())
    }

    fn required(
        &self,
        field: &'static str,
    ) -> Result<&'a Value, ConversionError> {
        self.present(field).ok_or(ConversionError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn wrong(
        &self,
        field: &'static str,
        expected: &'static str,
    ) -> ConversionError {
        ConversionError::WrongField {
            kind: self.kind,
            field,
            expected,
        }
    }

    fn string(&self, field: &'static str) -> Result<String, ConversionError> {
        self.required(field)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.wrong(field, "a string"))
    }

    fn flag(
        &self,
        field: &'static str,
    ) -> Result<Option<bool>, ConversionError> {
        self.present(field)
            .map(|value| {
                value.as_bool().ok_or_else(|| self.wrong(field, "a boolean"))
            })
            .transpose()
    }

    fn node(
        &self,
        field: &'static str,
    ) -> Result<FormulaNode, ConversionError> {
        formula_from_value(self.required(field)?)
    }

    fn optional_node(
        &self,
        field: &'static str,
    ) -> Result<Option<FormulaNode>, ConversionError> {
        self.present(field).map(formula_from_value).transpose()
    }

    fn nodes(
        &self,
        field: &'static str,
    ) -> Result<Vec<FormulaNode>, ConversionError> {
        match self.present(field) {
            None => Ok(vec![]),
            Some(Value::Array(items)) => {
                items.iter().map(formula_from_value).collect()
            }
            Some(_) => Err(self.wrong(field, "an array")),
        }
    }

    fn named<T>(
        &self,
        field: &'static str,
        lookup: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ConversionError> {
        let name = self.string(field)?;
        lookup(&name).ok_or(ConversionError::UnknownName { field, value: name })
    }
}

pub fn formula_from_value(
    value: &Value,
) -> Result<FormulaNode, ConversionError> {
    let object = match value {
        Value::Object(object) => object,
        Value::Number(number) => {
            return number
                .as_f64()
                .map(FormulaNode::Number)
                .ok_or(ConversionError::NotAFormula("a non-finite number"))
        }
        Value::String(text) => return Ok(FormulaNode::Text(text.clone())),
        other => return Err(ConversionError::NotAFormula(describe(other))),
    };
    let tag = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ConversionError::MissingType)?;

    let node = match tag {
        "quantifier" => {
            let fields = Fields {
                kind: "quantifier",
                object,
            };
            FormulaNode::Quantifier {
                kind: fields
                    .named("quantifier_type", QuantifierKind::from_name)?,
                variable: fields.string("variable")?,
                domain: fields.optional_node("domain")?.map(Box::new),
                body: Box::new(fields.node("body")?),
            }
        }
        "connective" => {
            let fields = Fields {
                kind: "connective",
                object,
            };
            let kind =
                fields.named("connective_type", ConnectiveKind::from_name)?;
            let left = fields.optional_node("left")?;
            if kind == ConnectiveKind::Not && left.is_some() {
                return Err(ConversionError::NegationWithLeft);
            }
            FormulaNode::connective(kind, left, fields.node("right")?)
        }
        "predicate" => {
            let fields = Fields {
                kind: "predicate",
                object,
            };
            FormulaNode::predicate(
                fields.string("name")?,
                fields.nodes("args")?,
            )
        }
        "math_function" => {
            let fields = Fields {
                kind: "math_function",
                object,
            };
            FormulaNode::math_function(
                fields.string("name")?,
                fields.nodes("args")?,
            )
        }
        "proposition" => {
            let fields = Fields {
                kind: "proposition",
                object,
            };
            FormulaNode::Proposition {
                name: fields.string("name")?,
                truth: fields.flag("truth")?,
            }
        }
        "variable" => {
            let fields = Fields {
                kind: "variable",
                object,
            };
            FormulaNode::variable(
                fields.string("name")?,
                fields.flag("is_bound")?.unwrap_or(false),
            )
        }
        "equation" => {
            let fields = Fields {
                kind: "equation",
                object,
            };
            FormulaNode::equation(fields.node("left")?, fields.node("right")?)
        }
        "inequality" => {
            let fields = Fields {
                kind: "inequality",
                object,
            };
            FormulaNode::inequality(
                fields.named("inequality_type", InequalityKind::from_name)?,
                fields.node("left")?,
                fields.node("right")?,
            )
        }
        "premise" => FormulaNode::premise(),
        "conclusion" => FormulaNode::conclusion(),
        "inference" => {
            let fields = Fields {
                kind: "inference",
                object,
            };
            FormulaNode::inference(
                fields.named("rule", Rule::from_name)?,
                fields.nodes("premises")?,
            )
        }
        "number" => {
            let fields = Fields {
                kind: "number",
                object,
            };
            let number = fields
                .required("value")?
                .as_f64()
                .ok_or_else(|| fields.wrong("value", "a number"))?;
            FormulaNode::Number(number)
        }
        "string" => {
            let fields = Fields {
                kind: "string",
                object,
            };
            FormulaNode::Text(fields.string("value")?)
        }
        other => return Err(ConversionError::UnknownType(other.to_owned())),
    };
    Ok(node)
}

fn values(nodes: &[FormulaNode]) -> Vec<Value> {
    nodes.iter().map(formula_to_value).collect()
}

/// The boxed form of a formula, tagged with its `NodeKind` name.
/// Non-finite numbers become `null`.
pub fn formula_to_value(node: &FormulaNode) -> Value {
    let mut value = fields_value(node);
    value["type"] = Value::from(node.kind().name());
    value
}

fn fields_value(node: &FormulaNode) -> Value {
    match node {
        FormulaNode::Quantifier {
            kind,
            variable,
            domain,
            body,
        } => {
            let mut value = json!({
                "quantifier_type": kind.name(),
                "variable": variable,
                "body": formula_to_value(body),
            });
            if let Some(domain) = domain {
                value["domain"] = formula_to_value(domain);
            }
            value
        }
        FormulaNode::Connective { kind, left, right } => {
            let mut value = json!({
                "connective_type": kind.name(),
                "right": formula_to_value(right),
            });
            if let Some(left) = left {
                value["left"] = formula_to_value(left);
            }
            value
        }
        FormulaNode::Predicate { name, args }
        | FormulaNode::MathFunction { name, args } => json!({
            "name": name,
            "args": values(args),
        }),
        FormulaNode::Variable { name, bound } => json!({
            "name": name,
            "is_bound": bound,
        }),
        FormulaNode::Proposition { name, truth } => {
            let mut value = json!({"name": name});
            if let Some(truth) = truth {
                value["truth"] = Value::Bool(*truth);
            }
            value
        }
        FormulaNode::Equation { left, right } => json!({
            "left": formula_to_value(left),
            "right": formula_to_value(right),
        }),
        FormulaNode::Inequality { kind, left, right } => json!({
            "inequality_type": kind.name(),
            "left": formula_to_value(left),
            "right": formula_to_value(right),
        }),
        FormulaNode::ProofMarker(Marker::Premise)
        | FormulaNode::ProofMarker(Marker::Conclusion) => json!({}),
        FormulaNode::ProofMarker(Marker::InferenceStep { rule, premises }) => {
            json!({
                "rule": rule.name(),
                "premises": values(premises),
            })
        }
        FormulaNode::Number(number) => json!({"value": number}),
        FormulaNode::Text(text) => json!({"value": text}),
    }
}
