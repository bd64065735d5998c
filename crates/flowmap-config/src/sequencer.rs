//! Step sequencing over the criteria schedule.

use crate::criteria::CriteriaSchedule;
use crate::options::Criterion;

/// Mutable cursor over the optimization steps of a run.
///
/// The cursor starts at step 0 and only ever moves forward, one step at a
/// time. It is driven by the single thread that sequences optimization steps;
/// concurrent `advance` calls require external serialization.
///
/// Advancing past the last step, or querying a step outside the schedule, is
/// a usage error on the driver's side and fails fast instead of saturating.
#[derive(Debug, Default)]
pub struct StepSequencer {
    step: usize,
}

impl StepSequencer {
    /// Creates a sequencer positioned at step 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active optimization step.
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Advances the cursor by exactly one step.
    ///
    /// # Panics
    ///
    /// When already at the last step of `schedule`.
    pub fn advance(&mut self, schedule: &CriteriaSchedule) {
        assert!(
            self.step + 1 < schedule.len(),
            "cannot advance past optimization step {} ({} criteria configured)",
            self.step,
            schedule.len()
        );
        self.step += 1;
        tracing::debug!(step = self.step, "advanced to next optimization step");
    }

    /// True iff `schedule[step]` equals `kind`.
    ///
    /// # Panics
    ///
    /// When `step` lies outside the schedule.
    pub fn optimizes_at(&self, schedule: &CriteriaSchedule, kind: Criterion, step: usize) -> bool {
        assert!(
            step < schedule.len(),
            "optimization step {} queried, but only {} criteria configured",
            step,
            schedule.len()
        );
        schedule.as_slice()[step] == kind
    }

    /// True iff the criterion of the current step equals `kind`.
    pub fn optimizes(&self, schedule: &CriteriaSchedule, kind: Criterion) -> bool {
        self.optimizes_at(schedule, kind, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> CriteriaSchedule {
        CriteriaSchedule::new(vec![
            Criterion::Throughput,
            Criterion::Power,
            Criterion::Latency,
        ])
    }

    #[test]
    fn advance_moves_one_step_at_a_time() {
        let schedule = schedule();
        let mut seq = StepSequencer::new();
        assert_eq!(seq.current_step(), 0);

        // len - 1 advances reach the last step exactly.
        seq.advance(&schedule);
        assert_eq!(seq.current_step(), 1);
        seq.advance(&schedule);
        assert_eq!(seq.current_step(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot advance past optimization step 2")]
    fn advance_past_last_step_is_fatal() {
        let schedule = schedule();
        let mut seq = StepSequencer::new();
        seq.advance(&schedule);
        seq.advance(&schedule);
        seq.advance(&schedule);
    }

    #[test]
    fn step_queries_follow_the_schedule() {
        let schedule = schedule();
        let mut seq = StepSequencer::new();
        assert!(seq.optimizes(&schedule, Criterion::Throughput));
        assert!(!seq.optimizes(&schedule, Criterion::Power));

        seq.advance(&schedule);
        assert!(seq.optimizes(&schedule, Criterion::Power));

        assert!(seq.optimizes_at(&schedule, Criterion::Latency, 2));
        assert!(!seq.optimizes_at(&schedule, Criterion::Throughput, 2));
    }

    #[test]
    #[should_panic(expected = "only 3 criteria configured")]
    fn out_of_range_query_is_fatal() {
        let seq = StepSequencer::new();
        seq.optimizes_at(&schedule(), Criterion::Power, 3);
    }
}
