use crate::config::Config;
use crate::equivalence::validate;
use crate::error::{LogicError, LogicResult};
use crate::formula::{FormulaNode, Marker};
use crate::registry::Registry;
use log::{info, warn};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Whether a sequence of steps forms a valid proof: at least one premise,
/// one inference by a sound rule and one conclusion, with every step that
/// is not a marker a well-formed statement. Inferences by unsound rules
/// count for nothing but do not invalidate the proof.
pub fn check_steps(steps: &[FormulaNode]) -> bool {
    let mut premise = false;
    let mut inference = false;
    let mut conclusion = false;
    for step in steps {
        match step {
            FormulaNode::ProofMarker(Marker::Premise) => premise = true,
            FormulaNode::ProofMarker(Marker::Conclusion) => conclusion = true,
            FormulaNode::ProofMarker(Marker::InferenceStep { rule, .. }) => {
                if rule.is_sound() {
                    inference = true;
                }
            }
            other => {
                if !validate(other) {
                    return false;
                }
            }
        }
    }
    premise && inference && conclusion
}

fn check_within(
    theorem: &str,
    steps: &[FormulaNode],
    limit: Duration,
) -> LogicResult<bool> {
    let (sender, receiver) = mpsc::channel();
    let owned = steps.to_vec();
    thread::spawn(move || {
        // the receiver is gone after a timeout
        let _ = sender.send(check_steps(&owned));
    });
    receiver
        .recv_timeout(limit)
        .map_err(|_| LogicError::Timeout {
            name: theorem.to_owned(),
            limit,
        })
}

/// Verify `steps` as a proof of `theorem`.
///
/// Nothing is changed on error. Otherwise the steps replace the theorem's
/// working proof, the elapsed time is recorded, and a valid proof marks the
/// theorem proven. An invalid attempt never un-proves a theorem.
pub fn verify_proof(
    registry: &mut Registry,
    config: &Config,
    theorem: &str,
    steps: Vec<FormulaNode>,
    justifications: Vec<FormulaNode>,
) -> LogicResult<bool> {
    registry.theorem(theorem)?;
    if steps.is_empty() {
        return Err(LogicError::EmptyProof(theorem.to_owned()));
    }

    let start = Instant::now();
    let valid = match config.time_limit {
        Some(limit) => check_within(theorem, &steps, limit)?,
        None => check_steps(&steps),
    };
    let elapsed = start.elapsed();

    if elapsed > config.verification_target {
        warn!(
            "verifying {} took {:?}, over the {:?} target",
            theorem, elapsed, config.verification_target
        );
    }
    info!(
        "proof of {} is {} ({} steps, {:?})",
        theorem,
        if valid { "valid" } else { "invalid" },
        steps.len(),
        elapsed
    );
    registry.commit_verification(
        theorem,
        steps,
        justifications,
        valid,
        elapsed,
    )?;
    Ok(valid)
}
