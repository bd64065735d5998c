//! The resolved run settings.
//!
//! [`Settings`] is filled during the single-threaded construction phase and
//! never mutated afterwards; [`crate::Config`] only hands out shared
//! references. Every token-valued setter validates its input and fails with
//! the specific error kind of that operation instead of a blanket channel.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::criteria::CriteriaSchedule;
use crate::error::{ConfigError, Result};
use crate::options::{
    CpModel, Criterion, LogLevel, OutputFileType, OutputPrintFrequency, PresolverHeuristic,
    PresolverModel, SearchType, ThroughputPropagator,
};

/// First-solution / all-solutions time budgets, in milliseconds.
///
/// Zero means unlimited; the [`Duration`] accessors render that as `None`.
/// Enforcement belongs to the search engine, these are configuration data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub first_ms: u64,
    pub all_ms: u64,
}

impl TimeoutSettings {
    /// Time budget until the first solution, if bounded.
    pub fn first_limit(&self) -> Option<Duration> {
        (self.first_ms > 0).then(|| Duration::from_millis(self.first_ms))
    }

    /// Time budget for the whole phase, if bounded.
    pub fn all_limit(&self) -> Option<Duration> {
        (self.all_ms > 0).then(|| Duration::from_millis(self.all_ms))
    }
}

/// Log destinations and verbosity.
///
/// The level may only be chosen once the log path is known; setting it
/// earlier is a state error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub console_level: LogLevel,
    pub file_level: LogLevel,
}

/// Immutable-after-construction record of all resolved run parameters.
///
/// # Example
///
/// ```
/// use flowmap_config::Settings;
///
/// let mut settings = Settings::default();
/// settings.set_model("single-rate").unwrap();
/// settings.set_criteria(&["throughput".into(), "power".into()]).unwrap();
///
/// let dump = settings.render().unwrap();
/// assert_eq!(Settings::from_toml_str(&dump).unwrap(), settings);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Input application/platform model files.
    pub input_paths: Vec<PathBuf>,
    /// Directory receiving result reports.
    pub output_path: PathBuf,

    /// Constraint-programming model flavor.
    pub model: CpModel,
    /// Main search type.
    pub search: SearchType,
    /// Presolver search type.
    pub pre_search: SearchType,
    /// Search type of the multi-step presolver.
    pub pre_multi_step_search: SearchType,

    /// One criterion per optimization step.
    pub criteria: CriteriaSchedule,
    /// Ordered presolver model selectors.
    pub pre_models: Vec<PresolverModel>,
    /// Ordered presolver heuristic selectors.
    pub pre_heuristics: Vec<PresolverHeuristic>,

    /// Scaling factor for the Luby restart strategy (0 disables restarts).
    pub luby_scale: u64,
    /// Worker-thread count for the downstream search engine.
    pub threads: u32,
    /// Search-tree depth bound for no-good recording (0 disables it).
    pub no_good_depth: u64,

    pub th_prop: ThroughputPropagator,
    pub out_file_type: OutputFileType,
    pub out_print_freq: OutputPrintFrequency,
    /// Metrics included in printed reports.
    pub print_metrics: Vec<Criterion>,

    /// Timing-driven-network configuration file, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdn_config: Option<PathBuf>,

    /// Main-search time budgets.
    pub timeouts: TimeoutSettings,
    /// Presolver time budgets.
    pub pre_timeouts: TimeoutSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Sets the input model files, verifying each is a readable file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Path`] for the first path that cannot be read.
    pub fn set_input_paths(&mut self, paths: Vec<PathBuf>) -> Result<()> {
        for path in &paths {
            let meta = fs::metadata(path).map_err(|source| ConfigError::Path {
                path: path.clone(),
                source,
            })?;
            if !meta.is_file() {
                return Err(ConfigError::Path {
                    path: path.clone(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "not a file"),
                });
            }
        }
        self.input_paths = paths;
        Ok(())
    }

    /// Sets the output directory, which must already exist.
    pub fn set_output_path(&mut self, path: PathBuf) -> Result<()> {
        let meta = fs::metadata(&path).map_err(|source| ConfigError::Path {
            path: path.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ConfigError::Path {
                path,
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        self.output_path = path;
        Ok(())
    }

    /// Sets the log file path. The containing directory must exist.
    pub fn set_log_path(&mut self, path: PathBuf) -> Result<()> {
        if let Some(parent) = non_empty_parent(&path) {
            fs::metadata(parent).map_err(|source| ConfigError::Path {
                path: path.clone(),
                source,
            })?;
        }
        self.log.path = Some(path);
        Ok(())
    }

    /// Sets console and file log levels from tokens.
    ///
    /// One token sets both levels, a second token overrides the file level.
    ///
    /// # Errors
    ///
    /// [`ConfigError::State`] when no log path has been established yet,
    /// [`ConfigError::Format`] for unknown level tokens or surplus entries.
    pub fn set_log_levels(&mut self, tokens: &[String]) -> Result<()> {
        if tokens.is_empty() {
            return Ok(());
        }
        if self.log.path.is_none() {
            return Err(ConfigError::State(
                "log level requires log paths to be set first".to_string(),
            ));
        }
        if tokens.len() > 2 {
            return Err(ConfigError::Format {
                option: "log level",
                token: tokens[2].clone(),
            });
        }
        let console: LogLevel = tokens[0].parse()?;
        let file = match tokens.get(1) {
            Some(token) => token.parse()?,
            None => console,
        };
        self.log.console_level = console;
        self.log.file_level = file;
        Ok(())
    }

    pub fn set_model(&mut self, token: &str) -> Result<()> {
        self.model = token.parse()?;
        Ok(())
    }

    pub fn set_search(&mut self, token: &str) -> Result<()> {
        self.search = token.parse()?;
        Ok(())
    }

    pub fn set_pre_search(&mut self, token: &str) -> Result<()> {
        self.pre_search = token.parse()?;
        Ok(())
    }

    pub fn set_multi_step_search(&mut self, token: &str) -> Result<()> {
        self.pre_multi_step_search = token.parse()?;
        Ok(())
    }

    /// Sets the per-step optimization criteria from tokens, in step order.
    pub fn set_criteria(&mut self, tokens: &[String]) -> Result<()> {
        let criteria = tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<Criterion>>>()?;
        self.criteria = CriteriaSchedule::new(criteria);
        Ok(())
    }

    pub fn set_pre_models(&mut self, tokens: &[String]) -> Result<()> {
        self.pre_models = tokens.iter().map(|t| t.parse()).collect::<Result<_>>()?;
        Ok(())
    }

    pub fn set_pre_heuristics(&mut self, tokens: &[String]) -> Result<()> {
        self.pre_heuristics = tokens.iter().map(|t| t.parse()).collect::<Result<_>>()?;
        Ok(())
    }

    pub fn set_print_metrics(&mut self, tokens: &[String]) -> Result<()> {
        self.print_metrics = tokens.iter().map(|t| t.parse()).collect::<Result<_>>()?;
        Ok(())
    }

    pub fn set_th_prop(&mut self, token: &str) -> Result<()> {
        self.th_prop = token.parse()?;
        Ok(())
    }

    pub fn set_out_file_type(&mut self, token: &str) -> Result<()> {
        self.out_file_type = token.parse()?;
        Ok(())
    }

    pub fn set_out_print_freq(&mut self, token: &str) -> Result<()> {
        self.out_print_freq = token.parse()?;
        Ok(())
    }

    /// Sets main-search timeouts from a `[first]` or `[first, all]` list of
    /// millisecond values.
    pub fn set_timeouts(&mut self, values: &[u64]) -> Result<()> {
        self.timeouts = parse_timeouts("timeout", values)?;
        Ok(())
    }

    /// Presolver counterpart of [`Settings::set_timeouts`].
    pub fn set_pre_timeouts(&mut self, values: &[u64]) -> Result<()> {
        self.pre_timeouts = parse_timeouts("presolver timeout", values)?;
        Ok(())
    }

    pub fn set_threads(&mut self, threads: u32) {
        self.threads = threads;
    }

    pub fn set_no_good_depth(&mut self, depth: u64) {
        self.no_good_depth = depth;
    }

    pub fn set_luby_scale(&mut self, scale: u64) {
        self.luby_scale = scale;
    }

    /// Records the timing-driven-network configuration file, which must be
    /// readable.
    pub fn set_tdn_config(&mut self, path: PathBuf) -> Result<()> {
        fs::metadata(&path).map_err(|source| ConfigError::Path {
            path: path.clone(),
            source,
        })?;
        self.tdn_config = Some(path);
        Ok(())
    }

    /// True iff a timing-driven-network configuration was supplied.
    pub fn has_tdn_config(&self) -> bool {
        self.tdn_config.is_some()
    }

    /// Renders the settings as TOML.
    ///
    /// The rendering is the reproducibility record written next to a run's
    /// results; it is lossless for every machine-relevant field and re-parses
    /// via [`Settings::from_toml_str`].
    pub fn render(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses settings from a previous [`Settings::render`] output.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

fn parse_timeouts(option: &'static str, values: &[u64]) -> Result<TimeoutSettings> {
    match values {
        [] => Ok(TimeoutSettings::default()),
        [first] => Ok(TimeoutSettings {
            first_ms: *first,
            all_ms: 0,
        }),
        [first, all] => Ok(TimeoutSettings {
            first_ms: *first,
            all_ms: *all,
        }),
        [_, _, surplus, ..] => Err(ConfigError::Format {
            option,
            token: surplus.to_string(),
        }),
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
