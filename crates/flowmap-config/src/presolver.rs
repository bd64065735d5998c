//! Presolver results and their hand-off to the main search.
//!
//! A presolver pass produces candidate processor-mapping combinations. The
//! main search consumes them through a single index plus the candidate list:
//! either one combination is trusted and enforced, or every candidate is
//! forbidden to prune known-bad regions. [`PresolverResults::directive`]
//! encodes that decision rule.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// One result snapshot: elapsed time plus the solution values at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionValues {
    pub time: Duration,
    pub values: Vec<i64>,
}

/// A single (task, processor) assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMapping {
    pub task: u32,
    pub processor: u32,
}

/// One candidate mapping combination: an ordered set of task-to-processor
/// assignments produced by the presolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingCombination {
    pub assignments: Vec<TaskMapping>,
}

impl MappingCombination {
    pub fn new(assignments: Vec<TaskMapping>) -> Self {
        Self { assignments }
    }
}

/// Everything a presolver pass hands to the main search.
#[derive(Debug, Clone, Default)]
pub struct PresolverResults {
    /// Selects the hand-off mode: `< one_proc_mappings.len()` enforces that
    /// combination, `>=` forbids all of them.
    pub it_mapping: usize,
    /// Candidate mapping combinations.
    pub one_proc_mappings: Vec<MappingCombination>,
    /// Full optimization trace produced while presolving.
    pub opt_results: Vec<SolutionValues>,
    /// Snapshots selected for reporting.
    pub print_results: Vec<SolutionValues>,
    /// Elapsed presolving time.
    pub presolver_delay: Duration,
}

/// How the main search model must consume the presolver candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingDirective<'a> {
    /// Add an equality constraint binding each (task, processor) pair of
    /// this combination.
    Enforce(&'a MappingCombination),
    /// Add, for every combination, a constraint forbidding that exact
    /// assignment set.
    ForbidAll(&'a [MappingCombination]),
}

impl PresolverResults {
    /// Resolves the hand-off mode from `it_mapping`.
    ///
    /// `it_mapping == one_proc_mappings.len()` falls into the forbid-all
    /// branch; the comparison is deliberately `<` / `>=`, not a bounds check.
    pub fn directive(&self) -> MappingDirective<'_> {
        if self.it_mapping < self.one_proc_mappings.len() {
            MappingDirective::Enforce(&self.one_proc_mappings[self.it_mapping])
        } else {
            MappingDirective::ForbidAll(&self.one_proc_mappings)
        }
    }
}

/// Single-writer, multi-reader cell carrying the presolver results.
///
/// Written at most once, before the main search phase starts, then read by
/// any number of search workers without further synchronization.
#[derive(Debug, Default)]
pub struct PresolverHandoff {
    cell: OnceLock<Arc<PresolverResults>>,
}

impl PresolverHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the presolver results.
    ///
    /// # Errors
    ///
    /// [`ConfigError::State`] if results were already stored.
    pub fn set(&self, results: Arc<PresolverResults>) -> Result<()> {
        tracing::debug!(
            candidates = results.one_proc_mappings.len(),
            it_mapping = results.it_mapping,
            "storing presolver results"
        );
        self.cell
            .set(results)
            .map_err(|_| ConfigError::State("presolver results already set".to_string()))
    }

    /// The stored results, if any.
    pub fn get(&self) -> Option<Arc<PresolverResults>> {
        self.cell.get().cloned()
    }

    /// True iff results have been stored.
    pub fn is_presolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combination(processor: u32) -> MappingCombination {
        MappingCombination::new(vec![
            TaskMapping { task: 0, processor },
            TaskMapping { task: 1, processor },
        ])
    }

    fn results(it_mapping: usize, candidates: usize) -> PresolverResults {
        PresolverResults {
            it_mapping,
            one_proc_mappings: (0..candidates as u32).map(combination).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn index_below_length_enforces_that_combination() {
        let results = results(3, 5);
        match results.directive() {
            MappingDirective::Enforce(combo) => {
                assert_eq!(combo, &results.one_proc_mappings[3]);
            }
            MappingDirective::ForbidAll(_) => panic!("expected an enforced mapping"),
        }
    }

    #[test]
    fn index_equal_to_length_forbids_all() {
        // Boundary case: == length folds into forbid-all, not out-of-range.
        let results = results(5, 5);
        match results.directive() {
            MappingDirective::ForbidAll(all) => assert_eq!(all.len(), 5),
            MappingDirective::Enforce(_) => panic!("expected forbid-all"),
        }
    }

    #[test]
    fn index_beyond_length_forbids_all() {
        let results = results(9, 5);
        match results.directive() {
            MappingDirective::ForbidAll(all) => assert_eq!(all.len(), 5),
            MappingDirective::Enforce(_) => panic!("expected forbid-all"),
        }
    }

    #[test]
    fn handoff_is_set_once() {
        let handoff = PresolverHandoff::new();
        assert!(!handoff.is_presolved());
        assert!(handoff.get().is_none());

        handoff.set(Arc::new(results(0, 1))).unwrap();
        assert!(handoff.is_presolved());
        assert_eq!(handoff.get().unwrap().one_proc_mappings.len(), 1);

        let err = handoff.set(Arc::new(results(0, 2))).unwrap_err();
        assert!(matches!(err, ConfigError::State(_)));
        // First write wins.
        assert_eq!(handoff.get().unwrap().one_proc_mappings.len(), 1);
    }

    #[test]
    fn presolved_is_independent_of_content() {
        let handoff = PresolverHandoff::new();
        handoff.set(Arc::new(PresolverResults::default())).unwrap();
        assert!(handoff.is_presolved());
    }
}
