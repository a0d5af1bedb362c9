use logicore::equivalence::{equivalent, nodes_equivalent, validate};
use logicore::formula::FormulaNode;
use logicore::infer::{modus_ponens, modus_tollens};
use logicore::value::{formula_from_value, formula_to_value};
use proptest::collection::vec;
use proptest::prelude::*;

/// Quantifier-free formulas over a small vocabulary.
fn formula() -> impl Strategy<Value = FormulaNode> {
    let leaf = prop_oneof![
        "[P-S]".prop_map(|name| FormulaNode::proposition(name)),
        ("[x-z]", any::<bool>())
            .prop_map(|(name, bound)| FormulaNode::variable(name, bound)),
        (-100i32..100).prop_map(|number| FormulaNode::Number(number.into())),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(FormulaNode::not),
            (inner.clone(), inner.clone())
                .prop_map(|(left, right)| FormulaNode::and(left, right)),
            (inner.clone(), inner.clone())
                .prop_map(|(left, right)| FormulaNode::implies(left, right)),
            ("[fgh]", vec(inner.clone(), 0..3))
                .prop_map(|(name, args)| FormulaNode::predicate(name, args)),
            (inner.clone(), inner)
                .prop_map(|(left, right)| FormulaNode::equation(left, right)),
        ]
    })
}

proptest! {
    #[test]
    fn equivalence_is_reflexive(a in formula()) {
        prop_assert!(nodes_equivalent(&a, &a.clone()));
    }

    #[test]
    fn equivalence_is_symmetric(a in formula(), b in formula()) {
        prop_assert_eq!(
            equivalent(Some(&a), Some(&b)),
            equivalent(Some(&b), Some(&a))
        );
    }

    #[test]
    fn modus_ponens_is_sound(a in formula(), b in formula()) {
        let premises = [FormulaNode::implies(a.clone(), b.clone()), a];
        let derived = modus_ponens(&premises);
        prop_assert!(derived.map_or(false, |derived| nodes_equivalent(&derived, &b)));
    }

    #[test]
    fn modus_tollens_is_sound(a in formula(), b in formula()) {
        let premises = [FormulaNode::implies(a.clone(), b.clone()), FormulaNode::not(b)];
        prop_assert_eq!(modus_tollens(&premises), Some(FormulaNode::not(a)));
    }

    #[test]
    fn boxed_form_converts_back(a in formula()) {
        prop_assert_eq!(formula_from_value(&formula_to_value(&a)), Ok(a));
    }

    #[test]
    fn substituting_an_absent_variable_changes_nothing(a in formula()) {
        let replacement = FormulaNode::proposition("T");
        prop_assert_eq!(a.substitute("w", &replacement), a);
    }

    #[test]
    fn generated_formulas_are_well_formed(a in formula()) {
        prop_assume!(!matches!(a, FormulaNode::Number(_)));
        prop_assert!(validate(&a));
    }
}
