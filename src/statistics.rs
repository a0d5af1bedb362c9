use crate::record::Record;
use crossbeam_utils::atomic::AtomicCell;
use std::convert::TryFrom;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct Statistics {
    verifications: AtomicU32,
    valid_proofs: AtomicU32,
    steps_checked: AtomicU64,
    rule_applications: AtomicU32,
    verification_time: AtomicCell<Duration>,
}

impl Statistics {
    pub fn record<R: Record>(&self, record: &mut R) {
        record.statistic("verifications", self.verifications());
        record.statistic(
            "valid proofs",
            self.valid_proofs.load(Ordering::Relaxed),
        );
        record.statistic(
            "steps checked",
            self.steps_checked.load(Ordering::Relaxed),
        );
        record.statistic(
            "rule applications",
            self.rule_applications.load(Ordering::Relaxed),
        );
        record.statistic(
            "verification time ms",
            self.verification_time().as_secs_f64() * 1000.0,
        );
    }

    pub fn verifications(&self) -> u32 {
        self.verifications.load(Ordering::Relaxed)
    }

    pub fn verification_time(&self) -> Duration {
        self.verification_time.load()
    }

    /// Mean time per verification, zero before the first one.
    pub fn average_verification_time(&self) -> Duration {
        match self.verifications() {
            0 => Duration::default(),
            count => self.verification_time() / count,
        }
    }

    pub(crate) fn record_verification(
        &self,
        steps: usize,
        valid: bool,
        elapsed: Duration,
    ) {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        if valid {
            self.valid_proofs.fetch_add(1, Ordering::Relaxed);
        }
        let steps = u64::try_from(steps).unwrap_or(u64::MAX);
        self.steps_checked.fetch_add(steps, Ordering::Relaxed);
        self.verification_time
            .store(self.verification_time.load() + elapsed);
    }

    pub(crate) fn increment_rule_applications(&self) {
        self.rule_applications.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn clear(&self) {
        self.verifications.store(0, Ordering::Relaxed);
        self.valid_proofs.store(0, Ordering::Relaxed);
        self.steps_checked.store(0, Ordering::Relaxed);
        self.rule_applications.store(0, Ordering::Relaxed);
        self.verification_time.store(Duration::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Collect;

    #[test]
    fn average_is_zero_before_verifying() {
        let statistics = Statistics::default();
        assert_eq!(statistics.average_verification_time(), Duration::default());
    }

    #[test]
    fn accumulates_and_clears() {
        let statistics = Statistics::default();
        statistics.record_verification(3, true, Duration::from_millis(10));
        statistics.record_verification(1, false, Duration::from_millis(30));
        assert_eq!(statistics.verifications(), 2);
        assert_eq!(
            statistics.average_verification_time(),
            Duration::from_millis(20)
        );

        let mut collect = Collect::default();
        statistics.record(&mut collect);
        assert_eq!(collect.0["valid_proofs"], 1);
        assert_eq!(collect.0["steps_checked"], 4);

        statistics.clear();
        assert_eq!(statistics.verifications(), 0);
        assert_eq!(statistics.verification_time(), Duration::default());
    }

    #[test]
    fn step_counts_do_not_wrap_at_u32() {
        let statistics = Statistics::default();
        let steps = u32::MAX as usize;
        statistics.record_verification(steps, true, Duration::default());
        statistics.record_verification(2, true, Duration::default());
        let mut collect = Collect::default();
        statistics.record(&mut collect);
        assert_eq!(collect.0["steps_checked"], u64::from(u32::MAX) + 2);
    }
}
