use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Verifications slower than this are logged, never interrupted.
    pub verification_target: Duration,
    /// Hard bound on proof checking. `None` checks on the calling thread.
    pub time_limit: Option<Duration>,
    /// Most distinct propositions a truth table may range over.
    pub truth_table_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verification_target: Duration::from_secs(1),
            time_limit: None,
            truth_table_limit: 12,
        }
    }
}
