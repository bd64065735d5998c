//! Optimization criteria schedule.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::options::Criterion;

/// The ordered sequence of optimization criteria, one entry per step.
///
/// A run with more than one entry is a multi-step run: each step optimizes
/// its own criterion, seeded by the previous step's solution.
///
/// # Example
///
/// ```
/// use flowmap_config::{CriteriaSchedule, Criterion};
///
/// let schedule = CriteriaSchedule::new(vec![Criterion::Throughput, Criterion::Power]);
/// assert!(schedule.is_multi_step());
/// assert_eq!(schedule.criterion_at(1).unwrap(), Criterion::Power);
/// assert!(schedule.criterion_at(2).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaSchedule(Vec<Criterion>);

impl CriteriaSchedule {
    /// Creates a schedule from an ordered criteria list.
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self(criteria)
    }

    /// Number of optimization steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no optimization is requested at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `kind` appears anywhere in the schedule.
    pub fn contains(&self, kind: Criterion) -> bool {
        self.0.contains(&kind)
    }

    /// True iff the schedule has more than one step.
    pub fn is_multi_step(&self) -> bool {
        self.0.len() > 1
    }

    /// The criterion governing `step`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StepOutOfRange`] when `step >= len()`.
    pub fn criterion_at(&self, step: usize) -> Result<Criterion> {
        self.0.get(step).copied().ok_or(ConfigError::StepOutOfRange {
            step,
            len: self.0.len(),
        })
    }

    /// Iterates over the scheduled criteria in step order.
    pub fn iter(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.0
    }
}

impl From<Vec<Criterion>> for CriteriaSchedule {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self::new(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_step_iff_more_than_one_entry() {
        assert!(!CriteriaSchedule::default().is_multi_step());
        assert!(!CriteriaSchedule::new(vec![Criterion::Power]).is_multi_step());
        assert!(CriteriaSchedule::new(vec![Criterion::Power, Criterion::Throughput]).is_multi_step());
    }

    #[test]
    fn criterion_lookup_checks_bounds() {
        let schedule = CriteriaSchedule::new(vec![Criterion::Throughput, Criterion::Power]);
        assert_eq!(schedule.criterion_at(0).unwrap(), Criterion::Throughput);
        assert_eq!(schedule.criterion_at(1).unwrap(), Criterion::Power);
        match schedule.criterion_at(2) {
            Err(ConfigError::StepOutOfRange { step: 2, len: 2 }) => {}
            other => panic!("expected StepOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn contains_scans_the_whole_schedule() {
        let schedule = CriteriaSchedule::new(vec![Criterion::Latency, Criterion::Power]);
        assert!(schedule.contains(Criterion::Power));
        assert!(!schedule.contains(Criterion::Throughput));
    }
}
