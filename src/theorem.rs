use crate::formula::FormulaNode;
use crate::proof::Proof;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Theorem {
    pub name: String,
    pub statement: FormulaNode,
    pub hypotheses: Vec<FormulaNode>,
    pub conclusion: Option<FormulaNode>,
    proof: Option<Arc<Proof>>,
    proven: bool,
}

impl Theorem {
    pub fn new<S: Into<String>>(name: S, statement: FormulaNode) -> Self {
        Self {
            name: name.into(),
            statement,
            hypotheses: vec![],
            conclusion: None,
            proof: None,
            proven: false,
        }
    }

    pub fn with_hypotheses(
        mut self,
        hypotheses: Vec<FormulaNode>,
        conclusion: Option<FormulaNode>,
    ) -> Self {
        self.hypotheses = hypotheses;
        self.conclusion = conclusion;
        self
    }

    pub fn is_proven(&self) -> bool {
        self.proven
    }

    /// The proof this theorem was last proven with, if any.
    pub fn proof(&self) -> Option<&Proof> {
        self.proof.as_deref()
    }

    pub(crate) fn prove(&mut self, proof: Arc<Proof>) {
        self.proof = Some(proof);
        self.proven = true;
    }

    pub(crate) fn mark_proven(&mut self) {
        self.proven = true;
    }
}

#[derive(Clone, Debug)]
pub struct Axiom {
    pub name: String,
    pub statement: FormulaNode,
    pub consistent: bool,
}

impl Axiom {
    pub fn new<S: Into<String>>(name: S, statement: FormulaNode) -> Self {
        Self {
            name: name.into(),
            statement,
            consistent: true,
        }
    }

    /// `∀P. (P ∨ ¬P)` and `∀P. ¬(P ∧ ¬P)`, kept by every reset.
    pub fn seeded() -> Vec<Axiom> {
        let p = || FormulaNode::proposition("P");
        vec![
            Axiom::new(
                "law_of_excluded_middle",
                FormulaNode::universal(
                    "P",
                    FormulaNode::or(p(), FormulaNode::not(p())),
                ),
            ),
            Axiom::new(
                "law_of_non_contradiction",
                FormulaNode::universal(
                    "P",
                    FormulaNode::not(FormulaNode::and(
                        p(),
                        FormulaNode::not(p()),
                    )),
                ),
            ),
        ]
    }
}
