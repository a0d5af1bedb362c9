use crate::formula::{FormulaNode, Marker};
use crate::infer;
use crate::record::Record;
use serde::Serialize;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofState {
    Empty,
    Accumulating,
    VerifiedValid,
    VerifiedInvalid,
}

/// A sequence of steps, each paired with the formula justifying it.
#[derive(Clone, Debug, PartialEq)]
pub struct Proof {
    theorem: String,
    steps: Vec<FormulaNode>,
    justifications: Vec<FormulaNode>,
    state: ProofState,
    verification_time: Duration,
}

impl Proof {
    pub fn new<S: Into<String>>(theorem: S) -> Self {
        Self {
            theorem: theorem.into(),
            steps: vec![],
            justifications: vec![],
            state: ProofState::Empty,
            verification_time: Duration::default(),
        }
    }

    pub fn theorem(&self) -> &str {
        &self.theorem
    }

    pub fn steps(&self) -> &[FormulaNode] {
        &self.steps
    }

    pub fn justifications(&self) -> &[FormulaNode] {
        &self.justifications
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> ProofState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state == ProofState::VerifiedValid
    }

    /// Only a successful verification completes a proof.
    pub fn is_complete(&self) -> bool {
        self.is_valid()
    }

    pub fn verification_time(&self) -> Duration {
        self.verification_time
    }

    pub(crate) fn push(
        &mut self,
        step: FormulaNode,
        justification: FormulaNode,
    ) {
        self.steps.push(step);
        self.justifications.push(justification);
        self.state = ProofState::Accumulating;
    }

    pub(crate) fn conclude(
        &mut self,
        steps: Vec<FormulaNode>,
        justifications: Vec<FormulaNode>,
        valid: bool,
        elapsed: Duration,
    ) {
        debug_assert_eq!(steps.len(), justifications.len());
        self.steps = steps;
        self.justifications = justifications;
        self.verification_time = elapsed;
        self.state = if valid {
            ProofState::VerifiedValid
        } else {
            ProofState::VerifiedInvalid
        };
    }

    pub fn record<R: Record>(&self, record: &mut R) {
        record.begin(&self.theorem);
        for (index, (step, justification)) in
            self.steps.iter().zip(self.justifications.iter()).enumerate()
        {
            match step {
                FormulaNode::ProofMarker(Marker::Premise) => {
                    record.premise(index, justification)
                }
                FormulaNode::ProofMarker(Marker::Conclusion) => {
                    record.conclusion(index, justification)
                }
                FormulaNode::ProofMarker(Marker::InferenceStep {
                    rule,
                    premises,
                }) => {
                    let derived = infer::apply(*rule, premises);
                    record.inference(index, *rule, premises, derived.as_ref())
                }
                _ => record.step(index, step, justification),
            }
        }
        record.end(&self.theorem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Record for Trace {
        fn premise(&mut self, index: usize, _justification: &FormulaNode) {
            self.0.push(format!("{} premise", index));
        }

        fn inference(
            &mut self,
            index: usize,
            rule: Rule,
            _premises: &[FormulaNode],
            derived: Option<&FormulaNode>,
        ) {
            let derived = derived.map(|node| node.to_string());
            self.0.push(format!("{} {} {:?}", index, rule, derived));
        }

        fn conclusion(&mut self, index: usize, _justification: &FormulaNode) {
            self.0.push(format!("{} conclusion", index));
        }
    }

    fn assumed() -> FormulaNode {
        FormulaNode::proposition("assumed")
    }

    #[test]
    fn appending_reopens_a_verified_proof() {
        let mut proof = Proof::new("t");
        assert_eq!(proof.state(), ProofState::Empty);
        proof.push(FormulaNode::premise(), assumed());
        assert_eq!(proof.state(), ProofState::Accumulating);

        let steps = proof.steps().to_vec();
        let justifications = proof.justifications().to_vec();
        proof.conclude(steps, justifications, true, Duration::from_millis(3));
        assert!(proof.is_valid() && proof.is_complete());

        proof.push(FormulaNode::conclusion(), assumed());
        assert_eq!(proof.state(), ProofState::Accumulating);
        assert!(!proof.is_valid() && !proof.is_complete());
        assert_eq!(proof.verification_time(), Duration::from_millis(3));
    }

    #[test]
    fn records_steps_in_order() {
        let p = FormulaNode::proposition("P");
        let mut proof = Proof::new("t");
        proof.push(FormulaNode::premise(), p.clone());
        proof.push(FormulaNode::inference(Rule::Axiom, vec![p]), assumed());
        proof.push(FormulaNode::conclusion(), assumed());

        let mut trace = Trace::default();
        proof.record(&mut trace);
        assert_eq!(
            trace.0,
            vec!["0 premise", "1 axiom Some(\"P\")", "2 conclusion"]
        );
    }
}
