use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    ModusPonens,
    ModusTollens,
    UniversalInstantiation,
    ExistentialGeneralization,
    Assumption,
    Axiom,
}

impl Rule {
    pub const ALL: [Rule; 6] = [
        Rule::ModusPonens,
        Rule::ModusTollens,
        Rule::UniversalInstantiation,
        Rule::ExistentialGeneralization,
        Rule::Assumption,
        Rule::Axiom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::ModusPonens => "modus_ponens",
            Rule::ModusTollens => "modus_tollens",
            Rule::UniversalInstantiation => "universal_instantiation",
            Rule::ExistentialGeneralization => "existential_generalization",
            Rule::Assumption => "assumption",
            Rule::Axiom => "axiom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rule| rule.name() == name)
    }

    /// Rules a proof may cite as its justifying inference.
    pub fn is_sound(self) -> bool {
        match self {
            Rule::ModusPonens
            | Rule::ModusTollens
            | Rule::UniversalInstantiation
            | Rule::Axiom => true,
            Rule::ExistentialGeneralization | Rule::Assumption => false,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for rule in Rule::ALL.iter().copied() {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(Rule::from_name("resolution"), None);
    }

    #[test]
    fn only_four_rules_are_sound() {
        let sound = Rule::ALL.iter().filter(|rule| rule.is_sound()).count();
        assert_eq!(sound, 4);
        assert!(!Rule::Assumption.is_sound());
    }
}
