//! The run configuration object.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::criteria::CriteriaSchedule;
use crate::error::Result;
use crate::options::{Criterion, PresolverModel};
use crate::presolver::{PresolverHandoff, PresolverResults};
use crate::sequencer::StepSequencer;
use crate::settings::Settings;

/// Owns the resolved [`Settings`] for the whole run, the optimization-step
/// cursor and the presolver hand-off cell.
///
/// Settings are exposed by read-only reference and never change after
/// construction; the only mutable state is the step cursor, which advances
/// monotonically through [`Config::inc_optimization_step`] and requires
/// `&mut self`. The presolver cell is written at most once through a shared
/// reference and may be read concurrently by any number of search workers.
///
/// # Example
///
/// ```
/// use flowmap_config::{Config, Settings};
///
/// let mut settings = Settings::default();
/// settings.set_criteria(&["throughput".into(), "power".into()]).unwrap();
///
/// let mut config = Config::new(settings);
/// assert!(config.do_optimize_thput());
/// config.inc_optimization_step();
/// assert!(config.do_optimize_power());
/// ```
#[derive(Debug)]
pub struct Config {
    settings: Settings,
    sequencer: StepSequencer,
    presolver: PresolverHandoff,
}

impl Config {
    /// Wraps fully resolved settings into the run configuration.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sequencer: StepSequencer::new(),
            presolver: PresolverHandoff::new(),
        }
    }

    /// The resolved settings, read-only.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The criteria schedule driving the optimization steps.
    pub fn criteria(&self) -> &CriteriaSchedule {
        &self.settings.criteria
    }

    /// The currently active optimization step.
    pub fn current_step(&self) -> usize {
        self.sequencer.current_step()
    }

    /// Advances to the next optimization step.
    ///
    /// # Panics
    ///
    /// When already at the last scheduled step.
    pub fn inc_optimization_step(&mut self) {
        self.sequencer.advance(&self.settings.criteria);
    }

    /// True iff any optimization is requested.
    pub fn do_optimize(&self) -> bool {
        !self.settings.criteria.is_empty()
    }

    /// True iff the current step optimizes throughput.
    pub fn do_optimize_thput(&self) -> bool {
        self.sequencer
            .optimizes(&self.settings.criteria, Criterion::Throughput)
    }

    /// True iff `step` optimizes throughput.
    ///
    /// # Panics
    ///
    /// When `step` lies outside the criteria schedule.
    pub fn do_optimize_thput_at(&self, step: usize) -> bool {
        self.sequencer
            .optimizes_at(&self.settings.criteria, Criterion::Throughput, step)
    }

    /// True iff the current step optimizes power.
    pub fn do_optimize_power(&self) -> bool {
        self.sequencer
            .optimizes(&self.settings.criteria, Criterion::Power)
    }

    /// True iff `step` optimizes power.
    ///
    /// # Panics
    ///
    /// When `step` lies outside the criteria schedule.
    pub fn do_optimize_power_at(&self, step: usize) -> bool {
        self.sequencer
            .optimizes_at(&self.settings.criteria, Criterion::Power, step)
    }

    /// True iff the run has more than one optimization step.
    pub fn do_multi_step(&self) -> bool {
        self.settings.criteria.is_multi_step()
    }

    /// True iff a presolver pass is configured: the presolver-model sequence
    /// is non-empty and does not consist solely of `no-presolve`.
    pub fn do_presolve(&self) -> bool {
        !self.settings.pre_models.is_empty()
            && self
                .settings
                .pre_models
                .iter()
                .any(|m| *m != PresolverModel::NoPresolve)
    }

    /// Stores the presolver results; at most once per run.
    ///
    /// # Errors
    ///
    /// [`crate::ConfigError::State`] on a second call.
    pub fn set_presolver_results(&self, results: Arc<PresolverResults>) -> Result<()> {
        self.presolver.set(results)
    }

    /// The presolver results, if a presolver pass has delivered them.
    pub fn presolver_results(&self) -> Option<Arc<PresolverResults>> {
        self.presolver.get()
    }

    /// True iff presolver results have been delivered.
    pub fn is_presolved(&self) -> bool {
        self.presolver.is_presolved()
    }

    /// Canonical token of the main search type.
    pub fn search_type(&self) -> &'static str {
        self.settings.search.as_token()
    }

    /// Canonical token of the output print frequency.
    pub fn out_freq(&self) -> &'static str {
        self.settings.out_print_freq.as_token()
    }

    /// Writes the settings dump to `path` as a reproducibility record.
    pub fn dump_settings(&self, path: &Path) -> Result<()> {
        let rendered = self.settings.render()?;
        fs::write(path, rendered)?;
        tracing::info!(path = %path.display(), "wrote settings dump");
        Ok(())
    }
}
