//! Script-callable logic functions over boxed values.
//!
//! Every builtin checks its argument count and shapes before touching the
//! registry, so a failed call leaves the registry as it was.

use crate::config::Config;
use crate::consistency::entails;
use crate::equivalence::equivalent;
use crate::error::{LogicError, LogicResult};
use crate::formula::FormulaNode;
use crate::infer;
use crate::io::markdown::Markdown;
use crate::io::tstp::TSTP;
use crate::proof::Proof;
use crate::record::Collect;
use crate::registry::Registry;
use crate::rule::Rule;
use crate::theorem::{Axiom, Theorem};
use crate::undecidable::{detect_undecidable, truth_table};
use crate::value::{describe, formula_from_value, formula_to_value};
use crate::verify::verify_proof;
use serde_json::{json, Value};

pub(crate) type Builtin =
    fn(&mut Registry, &Config, &[Value]) -> LogicResult<Value>;

pub(crate) const BUILTINS: [(&str, Builtin); 22] = [
    ("theorem_define", theorem_define),
    ("theorem_get", theorem_get),
    ("theorem_list", theorem_list),
    ("theorem_verify", theorem_verify),
    ("axiom_add", axiom_add),
    ("axiom_list", axiom_list),
    ("axiom_validate", axiom_validate),
    ("proof_step", proof_step),
    ("proof_verify", proof_verify),
    ("proof_stats", proof_stats),
    ("proof_export", proof_export),
    ("entails", entails_builtin),
    ("equivalent", equivalent_builtin),
    ("modus_ponens", modus_ponens),
    ("modus_tollens", modus_tollens),
    ("universal_instantiation", universal_instantiation),
    ("substitute", substitute),
    ("truth_table", truth_table_builtin),
    ("check_undecidable", check_undecidable),
    ("system_stats", system_stats),
    ("system_consistency", system_consistency),
    ("system_reset", system_reset),
];

pub(crate) fn lookup(call: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(name, _)| *name == call)
        .map(|(_, builtin)| *builtin)
}

fn arity(
    call: &'static str,
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> LogicResult<()> {
    if args.len() < min || args.len() > max {
        return Err(LogicError::Arity {
            call,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn string<'a>(
    call: &'static str,
    args: &'a [Value],
    index: usize,
) -> LogicResult<&'a str> {
    args[index].as_str().ok_or_else(|| LogicError::Argument {
        call,
        message: format!(
            "argument {} must be a string, found {}",
            index + 1,
            describe(&args[index])
        ),
    })
}

fn formula(args: &[Value], index: usize) -> LogicResult<FormulaNode> {
    Ok(formula_from_value(&args[index])?)
}

fn optional_formula(
    args: &[Value],
    index: usize,
) -> LogicResult<Option<FormulaNode>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(formula_from_value(value)?)),
    }
}

/// An array of formulas, or a single formula standing alone.
fn formulas(args: &[Value], index: usize) -> LogicResult<Vec<FormulaNode>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| formula_from_value(item).map_err(LogicError::from))
            .collect(),
        Some(value) => Ok(vec![formula_from_value(value)?]),
    }
}

fn optional_value(node: Option<&FormulaNode>) -> Value {
    node.map_or(Value::Null, formula_to_value)
}

fn proof_value(proof: &Proof) -> Value {
    let values = |nodes: &[FormulaNode]| -> Vec<Value> {
        nodes.iter().map(formula_to_value).collect()
    };
    json!({
        "theorem": proof.theorem(),
        "steps": values(proof.steps()),
        "justifications": values(proof.justifications()),
        "state": proof.state(),
        "is_complete": proof.is_complete(),
        "is_valid": proof.is_valid(),
        "verification_time": proof.verification_time().as_secs_f64(),
    })
}

fn theorem_value(theorem: &Theorem) -> Value {
    let hypotheses: Vec<Value> =
        theorem.hypotheses.iter().map(formula_to_value).collect();
    json!({
        "name": theorem.name,
        "statement": formula_to_value(&theorem.statement),
        "hypotheses": hypotheses,
        "conclusion": optional_value(theorem.conclusion.as_ref()),
        "proven": theorem.is_proven(),
        "proof": theorem.proof().map_or(Value::Null, proof_value),
    })
}

fn axiom_value(axiom: &Axiom) -> Value {
    json!({
        "name": axiom.name,
        "statement": formula_to_value(&axiom.statement),
        "consistent": axiom.consistent,
    })
}

fn theorem_define(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("theorem_define", args, 2, 4, "2 to 4")?;
    let name = string("theorem_define", args, 0)?;
    let theorem = Theorem::new(name, formula(args, 1)?)
        .with_hypotheses(formulas(args, 2)?, optional_formula(args, 3)?);
    registry.define_theorem(theorem)?;
    Ok(theorem_value(registry.theorem(name)?))
}

fn theorem_get(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("theorem_get", args, 1, 1, "1")?;
    let name = string("theorem_get", args, 0)?;
    Ok(registry
        .theorem(name)
        .map_or(Value::Null, theorem_value))
}

fn theorem_list(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("theorem_list", args, 0, 0, "no")?;
    Ok(registry.theorems().iter().map(theorem_value).collect())
}

fn theorem_verify(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("theorem_verify", args, 1, 1, "1")?;
    let name = string("theorem_verify", args, 0)?;
    Ok(Value::Bool(registry.verify_theorem(name)?))
}

fn axiom_add(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("axiom_add", args, 2, 2, "2")?;
    let name = string("axiom_add", args, 0)?;
    registry.add_axiom(Axiom::new(name, formula(args, 1)?))?;
    Ok(axiom_value(registry.axiom(name)?))
}

fn axiom_list(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("axiom_list", args, 0, 0, "no")?;
    Ok(registry.axioms().iter().map(axiom_value).collect())
}

fn axiom_validate(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("axiom_validate", args, 1, 1, "1")?;
    let name = string("axiom_validate", args, 0)?;
    Ok(Value::Bool(registry.validate_axiom(name)?))
}

fn assumed() -> FormulaNode {
    FormulaNode::proposition("assumed")
}

fn proof_step(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("proof_step", args, 2, 3, "2 or 3")?;
    let theorem = string("proof_step", args, 0)?;
    let step = formula(args, 1)?;
    let justification = optional_formula(args, 2)?.unwrap_or_else(assumed);
    Ok(Value::Bool(registry.add_step(theorem, step, justification)?))
}

fn proof_verify(
    registry: &mut Registry,
    config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("proof_verify", args, 2, 2, "2")?;
    let theorem = string("proof_verify", args, 0)?;
    let items = args[1].as_array().ok_or_else(|| LogicError::Argument {
        call: "proof_verify",
        message: format!(
            "steps must be an array, found {}",
            describe(&args[1])
        ),
    })?;
    let mut steps = Vec::with_capacity(items.len());
    let mut justifications = Vec::with_capacity(items.len());
    for item in items {
        steps.push(formula_from_value(item)?);
        let justification = match item.get("justification") {
            None | Some(Value::Null) => assumed(),
            Some(justification) => formula_from_value(justification)?,
        };
        justifications.push(justification);
    }
    let valid = verify_proof(registry, config, theorem, steps, justifications)?;
    Ok(Value::Bool(valid))
}

fn proof_stats(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("proof_stats", args, 1, 1, "1")?;
    let proof = registry.proof(string("proof_stats", args, 0)?)?;
    Ok(json!({
        "theorem": proof.theorem(),
        "step_count": proof.len(),
        "state": proof.state(),
        "is_complete": proof.is_complete(),
        "is_valid": proof.is_valid(),
        "verification_time": proof.verification_time().as_secs_f64(),
    }))
}

fn proof_export(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("proof_export", args, 1, 2, "1 or 2")?;
    let theorem = string("proof_export", args, 0)?;
    let format = match args.get(1) {
        None => "tstp",
        Some(_) => string("proof_export", args, 1)?,
    };
    let proof = registry.proof(theorem)?;
    if !proof.is_complete() {
        return Err(LogicError::ProofIncomplete(theorem.to_owned()));
    }
    let text = match format {
        "tstp" => {
            let mut tstp = TSTP::default();
            proof.record(&mut tstp);
            tstp.finish()
        }
        "markdown" => {
            let mut markdown = Markdown::default();
            proof.record(&mut markdown);
            markdown.finish()
        }
        other => return Err(LogicError::UnknownFormat(other.to_owned())),
    };
    Ok(Value::String(text))
}

fn entails_builtin(
    _registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("entails", args, 2, 2, "2")?;
    let premises = formulas(args, 0)?;
    let conclusion = formula(args, 1)?;
    Ok(Value::Bool(entails(&premises, &conclusion)))
}

fn equivalent_builtin(
    _registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("equivalent", args, 2, 2, "2")?;
    let a = optional_formula(args, 0)?;
    let b = optional_formula(args, 1)?;
    Ok(Value::Bool(equivalent(a.as_ref(), b.as_ref())))
}

fn apply_rule(
    call: &'static str,
    rule: Rule,
    registry: &mut Registry,
    args: &[Value],
) -> LogicResult<Value> {
    arity(call, args, 2, 2, "2")?;
    let premises = [formula(args, 0)?, formula(args, 1)?];
    let derived = infer::apply(rule, &premises);
    if derived.is_some() {
        registry.statistics().increment_rule_applications();
    }
    Ok(optional_value(derived.as_ref()))
}

fn modus_ponens(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    apply_rule("modus_ponens", Rule::ModusPonens, registry, args)
}

fn modus_tollens(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    apply_rule("modus_tollens", Rule::ModusTollens, registry, args)
}

fn universal_instantiation(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    apply_rule(
        "universal_instantiation",
        Rule::UniversalInstantiation,
        registry,
        args,
    )
}

fn substitute(
    _registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("substitute", args, 3, 3, "3")?;
    let node = formula(args, 0)?;
    let variable = string("substitute", args, 1)?;
    let replacement = formula(args, 2)?;
    Ok(formula_to_value(&node.substitute(variable, &replacement)))
}

fn truth_table_builtin(
    _registry: &mut Registry,
    config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("truth_table", args, 1, 1, "1")?;
    let table = truth_table(&formula(args, 0)?, config.truth_table_limit)?;
    Ok(json!(table))
}

fn check_undecidable(
    _registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("check_undecidable", args, 1, 1, "1")?;
    Ok(match detect_undecidable(&formula(args, 0)?) {
        Some(_) => json!({"type": "undecidable"}),
        None => Value::Null,
    })
}

fn system_stats(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("system_stats", args, 0, 0, "no")?;
    let mut collect = Collect::default();
    registry.statistics().record(&mut collect);
    let mut stats = json!(registry.stats());
    stats["statistics"] = Value::Object(collect.0);
    Ok(stats)
}

fn system_consistency(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("system_consistency", args, 0, 0, "no")?;
    let conflicts = registry.check_consistency();
    Ok(json!({
        "consistent": conflicts.is_empty(),
        "conflicts": conflicts,
    }))
}

/// With no argument the reset goes ahead; an argument must be `true`.
fn system_reset(
    registry: &mut Registry,
    _config: &Config,
    args: &[Value],
) -> LogicResult<Value> {
    arity("system_reset", args, 0, 1, "0 or 1")?;
    let confirmed = args
        .first()
        .map_or(true, |confirm| *confirm == Value::Bool(true));
    registry.reset(confirmed)?;
    Ok(Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(registry: &mut Registry, name: &str, args: Vec<Value>) -> LogicResult<Value> {
        let builtin = lookup(name).unwrap();
        builtin(registry, &Config::default(), &args)
    }

    fn prop(name: &str) -> Value {
        json!({"type": "proposition", "name": name})
    }

    #[test]
    fn names_are_unique() {
        for (index, (name, _)) in BUILTINS.iter().enumerate() {
            assert!(BUILTINS[index + 1..].iter().all(|(other, _)| other != name));
        }
        assert!(lookup("theorem_store").is_none());
    }

    #[test]
    fn define_returns_snapshot() {
        let mut registry = Registry::default();
        let theorem = call(&mut registry, "theorem_define", vec![json!("t"), prop("P")]).unwrap();
        assert_eq!(theorem["name"], "t");
        assert_eq!(theorem["proven"], false);
        assert_eq!(theorem["statement"], prop("P"));
        assert_eq!(theorem["proof"], Value::Null);
    }

    #[test]
    fn wrong_shapes_are_rejected_before_mutation() {
        let mut registry = Registry::default();
        let error = call(&mut registry, "theorem_define", vec![json!(1), prop("P")]).unwrap_err();
        assert!(matches!(error, LogicError::Argument { call: "theorem_define", .. }));
        let error = call(&mut registry, "axiom_add", vec![json!("a")]).unwrap_err();
        assert_eq!(
            error,
            LogicError::Arity {
                call: "axiom_add",
                expected: "2",
                got: 1
            }
        );
        assert!(registry.theorems().is_empty());
    }

    #[test]
    fn rule_builtins_return_null_on_mismatch() {
        let mut registry = Registry::default();
        let conditional = json!({
            "type": "connective",
            "connective_type": "implies",
            "left": prop("P"),
            "right": prop("Q"),
        });
        let derived = call(&mut registry, "modus_ponens", vec![conditional.clone(), prop("P")]);
        assert_eq!(derived, Ok(prop("Q")));
        let derived = call(&mut registry, "modus_ponens", vec![conditional, prop("R")]);
        assert_eq!(derived, Ok(Value::Null));
        let stats = call(&mut registry, "system_stats", vec![]).unwrap();
        assert_eq!(stats["statistics"]["rule_applications"], 1);
    }

    #[test]
    fn proof_verify_reads_justifications() {
        let mut registry = Registry::default();
        call(&mut registry, "theorem_define", vec![json!("t"), prop("P")]).unwrap();
        let steps = json!([
            {"type": "premise", "justification": prop("P")},
            {"type": "inference", "rule": "axiom", "premises": [prop("P")]},
            {"type": "conclusion"},
        ]);
        assert_eq!(
            call(&mut registry, "proof_verify", vec![json!("t"), steps]),
            Ok(Value::Bool(true))
        );
        let proof = registry.proof("t").unwrap();
        assert_eq!(proof.justifications()[0], FormulaNode::proposition("P"));
        assert_eq!(proof.justifications()[2], assumed());
    }

    #[test]
    fn export_requires_complete_proof() {
        let mut registry = Registry::default();
        call(&mut registry, "theorem_define", vec![json!("t"), prop("P")]).unwrap();
        call(&mut registry, "proof_step", vec![json!("t"), json!({"type": "premise"})]).unwrap();
        let error = call(&mut registry, "proof_export", vec![json!("t")]).unwrap_err();
        assert_eq!(error, LogicError::ProofIncomplete("t".into()));
    }

    #[test]
    fn reset_without_argument_is_confirmed() {
        let mut registry = Registry::default();
        call(&mut registry, "axiom_add", vec![json!("a"), prop("A")]).unwrap();
        assert_eq!(
            call(&mut registry, "system_reset", vec![json!(false)]),
            Err(LogicError::NotConfirmed)
        );
        assert_eq!(call(&mut registry, "system_reset", vec![]), Ok(Value::Bool(true)));
        assert_eq!(registry.axioms().len(), 2);
    }
}
