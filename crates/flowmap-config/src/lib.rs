//! Configuration core for flowmap.
//!
//! flowmap explores mappings of streaming dataflow applications onto
//! multiprocessor platforms with a constraint-programming search. This crate
//! holds everything the search driver needs to know about a run before any
//! search work starts:
//!
//! - [`Settings`]: the immutable-after-construction record of all resolved
//!   run parameters, with a lossless TOML dump for reproducibility records.
//! - [`CriteriaSchedule`] and [`StepSequencer`]: which objective governs
//!   which optimization step, and the cursor that walks the steps.
//! - [`PresolverResults`] and its hand-off cell: how candidate processor
//!   mappings from a presolver pass become enforced or forbidden constraints
//!   for the main search.
//! - [`Config`]: the run-scoped object tying the three together.
//!
//! # Example
//!
//! ```
//! use flowmap_config::{Config, Settings};
//!
//! let mut settings = Settings::default();
//! settings.set_search("optimize").unwrap();
//! settings.set_criteria(&["throughput".into()]).unwrap();
//!
//! let config = Config::new(settings);
//! assert!(config.do_optimize());
//! assert!(!config.do_multi_step());
//! assert!(!config.is_presolved());
//! ```

pub mod config;
pub mod criteria;
pub mod error;
pub mod options;
pub mod presolver;
pub mod sequencer;
pub mod settings;


pub use config::Config;
pub use criteria::CriteriaSchedule;
pub use error::{ConfigError, Result};
pub use options::{
    CpModel, Criterion, LogLevel, OutputFileType, OutputPrintFrequency, PresolverHeuristic,
    PresolverModel, SearchType, ThroughputPropagator,
};
pub use presolver::{
    MappingCombination, MappingDirective, PresolverHandoff, PresolverResults, SolutionValues,
    TaskMapping,
};
pub use sequencer::StepSequencer;
pub use settings::{LogSettings, Settings, TimeoutSettings};
