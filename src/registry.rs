use crate::consistency::{contradictions, entails};
use crate::equivalence::validate;
use crate::error::{LogicError, LogicResult};
use crate::formula::FormulaNode;
use crate::proof::Proof;
use crate::statistics::Statistics;
use crate::theorem::{Axiom, Theorem};
use fnv::FnvHashMap;
use log::debug;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Insertion-ordered storage with lookup by name.
struct Store<T> {
    items: Vec<T>,
    index: FnvHashMap<String, usize>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            index: FnvHashMap::default(),
        }
    }
}

impl<T> Store<T> {
    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn insert(&mut self, name: String, item: T) {
        self.index.insert(name, self.items.len());
        self.items.push(item);
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|index| &self.items[*index])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = *self.index.get(name)?;
        Some(&mut self.items[index])
    }

    fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemStats {
    pub theorem_count: usize,
    pub axiom_count: usize,
    pub proof_count: usize,
    pub is_consistent: bool,
    pub total_verifications: u32,
    /// Seconds.
    pub average_verification_time: f64,
}

/// Theorems, axioms and proofs of one session.
pub struct Registry {
    theorems: Store<Theorem>,
    axioms: Store<Axiom>,
    proofs: Store<Arc<Proof>>,
    consistent: bool,
    statistics: Statistics,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self {
            theorems: Store::default(),
            axioms: Store::default(),
            proofs: Store::default(),
            consistent: true,
            statistics: Statistics::default(),
        };
        registry.seed();
        registry
    }
}

impl Registry {
    fn seed(&mut self) {
        for axiom in Axiom::seeded() {
            self.axioms.insert(axiom.name.clone(), axiom);
        }
    }

    pub fn theorem(&self, name: &str) -> LogicResult<&Theorem> {
        self.theorems
            .get(name)
            .ok_or_else(|| LogicError::TheoremNotFound(name.to_owned()))
    }

    pub fn theorems(&self) -> &[Theorem] {
        &self.theorems.items
    }

    pub fn axiom(&self, name: &str) -> LogicResult<&Axiom> {
        self.axioms
            .get(name)
            .ok_or_else(|| LogicError::AxiomNotFound(name.to_owned()))
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms.items
    }

    /// The working proof of a theorem.
    pub fn proof(&self, theorem: &str) -> LogicResult<&Proof> {
        self.proofs
            .get(theorem)
            .map(|proof| &**proof)
            .ok_or_else(|| LogicError::ProofNotFound(theorem.to_owned()))
    }

    pub fn proof_count(&self) -> usize {
        self.proofs.items.len()
    }

    pub fn is_consistent(&self) -> bool {
        self.consistent
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn define_theorem(&mut self, theorem: Theorem) -> LogicResult<()> {
        if self.theorems.contains(&theorem.name) {
            return Err(LogicError::DuplicateTheorem(theorem.name));
        }
        let well_formed = validate(&theorem.statement)
            && theorem.hypotheses.iter().all(validate)
            && theorem.conclusion.as_ref().map_or(true, validate);
        if !well_formed {
            return Err(LogicError::InvalidTheorem(theorem.name));
        }
        debug!("defined theorem {}: {}", theorem.name, theorem.statement);
        self.theorems.insert(theorem.name.clone(), theorem);
        Ok(())
    }

    pub fn add_axiom(&mut self, axiom: Axiom) -> LogicResult<()> {
        if self.axioms.contains(&axiom.name) {
            return Err(LogicError::DuplicateAxiom(axiom.name));
        }
        if !validate(&axiom.statement) {
            return Err(LogicError::InvalidAxiom(axiom.name));
        }
        debug!("added axiom {}: {}", axiom.name, axiom.statement);
        let axiom = Axiom {
            consistent: true,
            ..axiom
        };
        self.axioms.insert(axiom.name.clone(), axiom);
        Ok(())
    }

    /// Recompute an axiom's consistency flag against every other axiom.
    pub fn validate_axiom(&mut self, name: &str) -> LogicResult<bool> {
        let index = *self
            .axioms
            .index
            .get(name)
            .ok_or_else(|| LogicError::AxiomNotFound(name.to_owned()))?;
        let consistent = !contradictions(&self.axioms.items)
            .iter()
            .any(|(i, j)| *i == index || *j == index);
        self.axioms.items[index].consistent = consistent;
        Ok(consistent)
    }

    /// Append a step to a theorem's working proof, returning whether the
    /// step is admissible. The first step always is; later ones must be
    /// proof markers or well-formed statements.
    pub fn add_step(
        &mut self,
        theorem: &str,
        step: FormulaNode,
        justification: FormulaNode,
    ) -> LogicResult<bool> {
        self.theorem(theorem)?;
        if !self.proofs.contains(theorem) {
            self.proofs
                .insert(theorem.to_owned(), Arc::new(Proof::new(theorem)));
        }
        let proof = self
            .proofs
            .get_mut(theorem)
            .ok_or_else(|| LogicError::ProofNotFound(theorem.to_owned()))?;
        let admissible =
            proof.is_empty() || step.is_marker() || validate(&step);
        debug!("step {} of {}: {}", proof.len(), theorem, step);
        Arc::make_mut(proof).push(step, justification);
        Ok(admissible)
    }

    /// Check a theorem's statement and hypotheses are well-formed, marking
    /// it proven when its proof is valid or its hypotheses contain its
    /// conclusion.
    pub fn verify_theorem(&mut self, name: &str) -> LogicResult<bool> {
        let theorem = self
            .theorems
            .get_mut(name)
            .ok_or_else(|| LogicError::TheoremNotFound(name.to_owned()))?;
        let well_formed = validate(&theorem.statement)
            && theorem.hypotheses.iter().all(validate);
        if !well_formed {
            return Ok(false);
        }
        let proof_valid = theorem.proof().map_or(false, Proof::is_valid);
        let entailed = theorem
            .conclusion
            .as_ref()
            .map_or(false, |conclusion| {
                entails(&theorem.hypotheses, conclusion)
            });
        if proof_valid || entailed {
            theorem.mark_proven();
        }
        Ok(true)
    }

    /// Store the outcome of a verification: the checked steps replace the
    /// working proof, and a valid proof is attached to its theorem.
    pub(crate) fn commit_verification(
        &mut self,
        theorem: &str,
        steps: Vec<FormulaNode>,
        justifications: Vec<FormulaNode>,
        valid: bool,
        elapsed: Duration,
    ) -> LogicResult<()> {
        let target = self
            .theorems
            .get_mut(theorem)
            .ok_or_else(|| LogicError::TheoremNotFound(theorem.to_owned()))?;
        if !self.proofs.contains(theorem) {
            self.proofs
                .insert(theorem.to_owned(), Arc::new(Proof::new(theorem)));
        }
        let proof = self
            .proofs
            .get_mut(theorem)
            .ok_or_else(|| LogicError::ProofNotFound(theorem.to_owned()))?;
        let count = steps.len();
        Arc::make_mut(proof).conclude(steps, justifications, valid, elapsed);
        if valid {
            target.prove(Arc::clone(proof));
        }
        self.statistics.record_verification(count, valid, elapsed);
        Ok(())
    }

    /// Scan every pair of axioms for direct contradictions, updating each
    /// axiom's flag and the registry's. Returns the contradicting pairs by
    /// name, in axiom order.
    pub fn check_consistency(&mut self) -> Vec<(String, String)> {
        let pairs = contradictions(&self.axioms.items);
        for axiom in self.axioms.items.iter_mut() {
            axiom.consistent = true;
        }
        for (i, j) in pairs.iter() {
            self.axioms.items[*i].consistent = false;
            self.axioms.items[*j].consistent = false;
        }
        self.consistent = pairs.is_empty();
        let axioms = &self.axioms.items;
        pairs
            .into_iter()
            .map(|(i, j)| (axioms[i].name.clone(), axioms[j].name.clone()))
            .collect()
    }

    /// Forget theorems, proofs and user axioms, keeping the seeded axioms.
    pub fn reset(&mut self, confirmed: bool) -> LogicResult<()> {
        if !confirmed {
            return Err(LogicError::NotConfirmed);
        }
        self.theorems.clear();
        self.proofs.clear();
        self.axioms.clear();
        self.seed();
        self.consistent = true;
        self.statistics.clear();
        debug!("registry reset");
        Ok(())
    }

    pub fn stats(&self) -> SystemStats {
        SystemStats {
            theorem_count: self.theorems.items.len(),
            axiom_count: self.axioms.items.len(),
            proof_count: self.proofs.items.len(),
            is_consistent: self.consistent,
            total_verifications: self.statistics.verifications(),
            average_verification_time: self
                .statistics
                .average_verification_time()
                .as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ConnectiveKind;
    use crate::proof::ProofState;

    fn prop(name: &str) -> FormulaNode {
        FormulaNode::proposition(name)
    }

    fn assumed() -> FormulaNode {
        prop("assumed")
    }

    #[test]
    fn starts_with_seeded_axioms() {
        let registry = Registry::default();
        let names: Vec<_> =
            registry.axioms().iter().map(|axiom| axiom.name.as_str()).collect();
        assert_eq!(names, ["law_of_excluded_middle", "law_of_non_contradiction"]);
        assert!(registry.is_consistent());
    }

    #[test]
    fn rejects_duplicates_without_mutation() {
        let mut registry = Registry::default();
        registry.define_theorem(Theorem::new("t", prop("P"))).unwrap();
        let again = registry.define_theorem(Theorem::new("t", prop("Q")));
        assert_eq!(again, Err(LogicError::DuplicateTheorem("t".into())));
        assert_eq!(registry.theorem("t").unwrap().statement, prop("P"));

        let seeded = Axiom::new("law_of_excluded_middle", prop("P"));
        assert_eq!(
            registry.add_axiom(seeded),
            Err(LogicError::DuplicateAxiom("law_of_excluded_middle".into()))
        );
        assert_eq!(registry.axioms().len(), 2);
    }

    #[test]
    fn rejects_ill_formed_hypotheses() {
        let mut registry = Registry::default();
        let dangling = FormulaNode::connective(ConnectiveKind::Or, None, prop("P"));
        let theorem = Theorem::new("t", prop("P")).with_hypotheses(vec![dangling], None);
        assert_eq!(
            registry.define_theorem(theorem),
            Err(LogicError::InvalidTheorem("t".into()))
        );
        assert!(registry.theorems().is_empty());
    }

    #[test]
    fn step_admissibility() {
        let mut registry = Registry::default();
        registry.define_theorem(Theorem::new("t", prop("P"))).unwrap();
        assert_eq!(registry.add_step("t", FormulaNode::Number(1.0), assumed()), Ok(true));
        assert_eq!(registry.add_step("t", FormulaNode::Number(2.0), assumed()), Ok(false));
        assert_eq!(registry.add_step("t", FormulaNode::premise(), assumed()), Ok(true));
        assert_eq!(registry.add_step("t", prop("Q"), assumed()), Ok(true));
        assert_eq!(registry.proof("t").unwrap().len(), 4);
        assert_eq!(
            registry.add_step("missing", prop("Q"), assumed()),
            Err(LogicError::TheoremNotFound("missing".into()))
        );
    }

    #[test]
    fn verified_proof_is_copied_on_write() {
        let mut registry = Registry::default();
        registry.define_theorem(Theorem::new("t", prop("P"))).unwrap();
        let steps = vec![FormulaNode::premise(), FormulaNode::conclusion()];
        let justifications = vec![assumed(), assumed()];
        registry
            .commit_verification("t", steps, justifications, true, Duration::default())
            .unwrap();
        assert!(registry.theorem("t").unwrap().is_proven());

        registry.add_step("t", prop("Q"), assumed()).unwrap();
        assert_eq!(registry.proof("t").unwrap().state(), ProofState::Accumulating);
        let snapshot = registry.theorem("t").unwrap().proof().unwrap();
        assert_eq!(snapshot.state(), ProofState::VerifiedValid);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn each_verification_updates_recorded_time() {
        let mut registry = Registry::default();
        registry.define_theorem(Theorem::new("t", prop("P"))).unwrap();
        let steps = || vec![FormulaNode::premise(), FormulaNode::conclusion()];
        let justifications = || vec![assumed(), assumed()];

        let first = Duration::from_millis(3);
        registry
            .commit_verification("t", steps(), justifications(), true, first)
            .unwrap();
        assert_eq!(registry.proof("t").unwrap().verification_time(), first);
        assert_eq!(registry.statistics().verification_time(), first);

        let second = Duration::from_millis(5);
        registry
            .commit_verification("t", steps(), justifications(), true, second)
            .unwrap();
        assert_eq!(registry.proof("t").unwrap().verification_time(), second);
        assert_eq!(
            registry.statistics().verification_time(),
            Duration::from_millis(8)
        );
        assert_eq!(registry.stats().total_verifications, 2);
        let average = registry.stats().average_verification_time;
        assert!((average - 0.004).abs() < 1e-9);
        assert!(registry.theorem("t").unwrap().is_proven());
    }

    #[test]
    fn verify_theorem_uses_hypotheses() {
        let mut registry = Registry::default();
        let theorem = Theorem::new("t", FormulaNode::implies(prop("P"), prop("P")))
            .with_hypotheses(vec![prop("P")], Some(prop("P")));
        registry.define_theorem(theorem).unwrap();
        registry.define_theorem(Theorem::new("u", prop("Q"))).unwrap();
        assert_eq!(registry.verify_theorem("t"), Ok(true));
        assert!(registry.theorem("t").unwrap().is_proven());
        assert_eq!(registry.verify_theorem("u"), Ok(true));
        assert!(!registry.theorem("u").unwrap().is_proven());
    }

    #[test]
    fn consistency_names_contradicting_pairs() {
        let mut registry = Registry::default();
        let p_and_q = FormulaNode::and(prop("P"), prop("Q"));
        registry.add_axiom(Axiom::new("a", p_and_q.clone())).unwrap();
        assert!(registry.check_consistency().is_empty());
        registry.add_axiom(Axiom::new("b", FormulaNode::not(p_and_q))).unwrap();
        assert_eq!(
            registry.check_consistency(),
            [("a".to_owned(), "b".to_owned())]
        );
        assert!(!registry.is_consistent());
        assert!(!registry.axiom("b").unwrap().consistent);
        assert!(registry.axiom("law_of_excluded_middle").unwrap().consistent);
    }

    #[test]
    fn validate_axiom_rescans() {
        let mut registry = Registry::default();
        let p_or_q = FormulaNode::or(prop("P"), prop("Q"));
        registry.add_axiom(Axiom::new("a", p_or_q.clone())).unwrap();
        assert_eq!(registry.validate_axiom("a"), Ok(true));
        registry.add_axiom(Axiom::new("b", FormulaNode::not(p_or_q))).unwrap();
        assert!(registry.axiom("a").unwrap().consistent);
        assert_eq!(registry.validate_axiom("a"), Ok(false));
        assert!(!registry.axiom("a").unwrap().consistent);
        assert_eq!(registry.validate_axiom("law_of_excluded_middle"), Ok(true));
        assert_eq!(
            registry.validate_axiom("c"),
            Err(LogicError::AxiomNotFound("c".into()))
        );
    }

    #[test]
    fn reset_keeps_seeded_axioms() {
        let mut registry = Registry::default();
        registry.add_axiom(Axiom::new("a", prop("A"))).unwrap();
        registry.define_theorem(Theorem::new("t", prop("P"))).unwrap();
        registry.add_step("t", FormulaNode::premise(), assumed()).unwrap();

        assert_eq!(registry.reset(false), Err(LogicError::NotConfirmed));
        assert_eq!(registry.theorems().len(), 1);

        registry.reset(true).unwrap();
        let stats = registry.stats();
        assert_eq!(stats.theorem_count, 0);
        assert_eq!(stats.axiom_count, 2);
        assert_eq!(stats.proof_count, 0);
        assert_eq!(stats.total_verifications, 0);
    }
}
