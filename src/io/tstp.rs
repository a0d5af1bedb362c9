use crate::formula::{
    ConnectiveKind, FormulaNode, InequalityKind, QuantifierKind,
};
use crate::record::Record;
use crate::rule::Rule;
use crate::util::fresh::Fresh;
use serde::Serialize;
use std::fmt;

/// TSTP rendering of proofs, variables renamed `X0`, `X1`, ...
#[derive(Default)]
pub struct TSTP {
    variable_map: Fresh,
    out: String,
}

fn is_lower_word(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().map_or(false, |first| first.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TSTP {
    pub fn finish(self) -> String {
        self.out
    }

    fn print_name(&mut self, name: &str) {
        if is_lower_word(name) {
            self.out.push_str(name);
        } else {
            self.out.push('\'');
            for c in name.chars() {
                if c == '\'' || c == '\\' {
                    self.out.push('\\');
                }
                self.out.push(c);
            }
            self.out.push('\'');
        }
    }

    fn print_variable(&mut self, name: &str) {
        let number = self.variable_map.get(name);
        self.out.push_str(&format!("X{}", number));
    }

    fn print_args(&mut self, args: &[FormulaNode], bound: &mut Vec<String>) {
        if args.is_empty() {
            return;
        }
        self.out.push('(');
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.print_formula(arg, bound);
        }
        self.out.push(')');
    }

    fn print_formula(&mut self, node: &FormulaNode, bound: &mut Vec<String>) {
        match node {
            FormulaNode::Quantifier {
                kind,
                variable,
                domain,
                body,
            } => {
                let (symbol, guard) = match kind {
                    QuantifierKind::Universal => ("!", " => "),
                    QuantifierKind::Existential => ("?", " & "),
                };
                self.out.push_str(symbol);
                self.out.push('[');
                self.print_variable(variable);
                self.out.push_str("]: ");
                bound.push(variable.clone());
                if let Some(domain) = domain {
                    self.out.push('(');
                    self.print_formula(domain, bound);
                    self.out.push_str(guard);
                    self.print_formula(body, bound);
                    self.out.push(')');
                } else {
                    self.print_formula(body, bound);
                }
                bound.pop();
            }
            FormulaNode::Connective {
                kind: ConnectiveKind::Not,
                right,
                ..
            } => {
                self.out.push('~');
                self.print_formula(right, bound);
            }
            FormulaNode::Connective { kind, left, right } => {
                let symbol = match kind {
                    ConnectiveKind::And => " & ",
                    ConnectiveKind::Or => " | ",
                    ConnectiveKind::Implies => " => ",
                    ConnectiveKind::Iff | ConnectiveKind::Not => " <=> ",
                };
                self.out.push('(');
                match left {
                    Some(left) => self.print_formula(left, bound),
                    None => self.out.push_str("$true"),
                }
                self.out.push_str(symbol);
                self.print_formula(right, bound);
                self.out.push(')');
            }
            FormulaNode::Predicate { name, args }
            | FormulaNode::MathFunction { name, args } => {
                self.print_name(name);
                self.print_args(args, bound);
            }
            FormulaNode::Variable { name, .. } => self.print_variable(name),
            FormulaNode::Proposition { name, .. } => {
                if bound.iter().any(|variable| variable == name) {
                    self.print_variable(name);
                } else {
                    self.print_name(name);
                }
            }
            FormulaNode::Equation { left, right } => {
                self.print_formula(left, bound);
                self.out.push_str(" = ");
                self.print_formula(right, bound);
            }
            FormulaNode::Inequality { kind, left, right } => {
                self.out.push_str(match kind {
                    InequalityKind::Lt => "$less(",
                    InequalityKind::Le => "$lesseq(",
                    InequalityKind::Gt => "$greater(",
                    InequalityKind::Ge => "$greatereq(",
                });
                self.print_formula(left, bound);
                self.out.push(',');
                self.print_formula(right, bound);
                self.out.push(')');
            }
            FormulaNode::Number(number) => {
                self.out.push_str(&number.to_string())
            }
            FormulaNode::Text(text) => {
                self.out.push_str(&format!("{:?}", text))
            }
            FormulaNode::ProofMarker(_) => self.out.push_str("$true"),
        }
    }

    fn print_fof(&mut self, index: usize, role: &str, formula: &FormulaNode) {
        self.out.push_str(&format!("fof(s{}, {}, ", index, role));
        self.print_formula(formula, &mut vec![]);
    }
}

impl Record for TSTP {
    fn statistic<T: Serialize + fmt::Display>(
        &mut self,
        key: &'static str,
        value: T,
    ) {
        self.out.push_str(&format!("% {}\t: {}\n", key, value));
    }

    fn begin(&mut self, theorem: &str) {
        self.out
            .push_str(&format!("% SZS output begin Proof for {}\n", theorem));
    }

    fn premise(&mut self, index: usize, justification: &FormulaNode) {
        self.print_fof(index, "axiom", justification);
        self.out.push_str(").\n");
    }

    fn step(
        &mut self,
        index: usize,
        step: &FormulaNode,
        _justification: &FormulaNode,
    ) {
        self.print_fof(index, "plain", step);
        self.out.push_str(").\n");
    }

    fn inference(
        &mut self,
        index: usize,
        rule: Rule,
        _premises: &[FormulaNode],
        derived: Option<&FormulaNode>,
    ) {
        match derived {
            Some(derived) => {
                self.print_fof(index, "plain", derived);
                self.out.push_str(&format!(
                    ", inference({}, [status(thm)], [])).\n",
                    rule
                ));
            }
            None => self.out.push_str(&format!(
                "fof(s{}, plain, $true, inference({}, [status(unk)], [])).\n",
                index, rule
            )),
        }
    }

    fn conclusion(&mut self, index: usize, justification: &FormulaNode) {
        self.print_fof(index, "theorem", justification);
        self.out.push_str(").\n");
    }

    fn end(&mut self, theorem: &str) {
        self.out
            .push_str(&format!("% SZS output end Proof for {}\n", theorem));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &FormulaNode) -> String {
        let mut tstp = TSTP::default();
        tstp.print_formula(node, &mut vec![]);
        tstp.finish()
    }

    #[test]
    fn bound_propositions_become_variables() {
        let p = || FormulaNode::proposition("P");
        let excluded_middle =
            FormulaNode::universal("P", FormulaNode::or(p(), FormulaNode::not(p())));
        assert_eq!(render(&excluded_middle), "![X0]: (X0 | ~X0)");
        assert_eq!(render(&p()), "'P'");
    }

    #[test]
    fn relations_use_arithmetic_builtins() {
        let x = FormulaNode::variable("x", true);
        let relation = FormulaNode::inequality(
            InequalityKind::Lt,
            FormulaNode::math_function("f", vec![x]),
            FormulaNode::Number(3.0),
        );
        assert_eq!(render(&relation), "$less(f(X0),3)");
    }

    #[test]
    fn records_a_proof() {
        let mut tstp = TSTP::default();
        let q = FormulaNode::proposition("q");
        tstp.begin("t");
        tstp.premise(0, &q);
        tstp.inference(1, Rule::Axiom, &[q.clone()], Some(&q));
        tstp.conclusion(2, &q);
        tstp.end("t");
        assert_eq!(
            tstp.finish(),
            "% SZS output begin Proof for t\n\
             fof(s0, axiom, q).\n\
             fof(s1, plain, q, inference(axiom, [status(thm)], [])).\n\
             fof(s2, theorem, q).\n\
             % SZS output end Proof for t\n"
        );
    }
}
