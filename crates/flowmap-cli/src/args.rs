//! Command-line argument parsing.
//!
//! clap only turns the raw arguments into primitive values here; every
//! token-to-enum conversion and path check happens while resolving the
//! [`flowmap_config::Settings`], so unrecognized tokens surface as
//! configuration errors rather than usage errors.

use std::path::PathBuf;

use clap::Parser;

/// Design-space exploration for streaming dataflow applications on
/// multiprocessor platforms
#[derive(Parser, Debug, Clone)]
#[command(name = "flowmap")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Input / output =====
    /// Input application/platform model file (repeatable)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for result reports
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    // ===== Logging =====
    /// Log file path
    #[arg(long = "log")]
    pub log_path: Option<PathBuf>,

    /// Console and file log levels (one or two tokens; requires --log)
    #[arg(long = "log-level", num_args = 1..=2)]
    pub log_level: Vec<String>,

    // ===== Model and search =====
    /// Constraint-programming model
    #[arg(short = 'm', long = "model", default_value = "single-rate")]
    pub model: String,

    /// Main search type
    #[arg(long = "search", default_value = "optimize")]
    pub search: String,

    /// Presolver search type
    #[arg(long = "pre-search", default_value = "first")]
    pub pre_search: String,

    /// Search type used between multi-step presolver rounds
    #[arg(long = "multi-step-search", default_value = "optimize")]
    pub multi_step_search: String,

    // ===== Optimization steps =====
    /// Optimization criterion per step, in step order
    #[arg(short = 'c', long = "criteria", value_delimiter = ',')]
    pub criteria: Vec<String>,

    /// Presolver models, in order
    #[arg(long = "pre-model", value_delimiter = ',')]
    pub pre_models: Vec<String>,

    /// Presolver heuristics, in order
    #[arg(long = "pre-heuristic", value_delimiter = ',')]
    pub pre_heuristics: Vec<String>,

    // ===== Search engine tuning =====
    /// Throughput propagation algorithm
    #[arg(long = "th-prop", default_value = "single-step-estimate")]
    pub th_prop: String,

    /// Main-search timeouts in ms: first-solution [all-solutions]
    #[arg(long = "timeout", num_args = 1..=2)]
    pub timeouts: Vec<u64>,

    /// Presolver timeouts in ms: first-solution [all-solutions]
    #[arg(long = "pre-timeout", num_args = 1..=2)]
    pub pre_timeouts: Vec<u64>,

    /// Luby restart scale (0 disables restarts)
    #[arg(long = "luby-scale", default_value_t = 0)]
    pub luby_scale: u64,

    /// Worker threads for the search engine
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: u32,

    /// No-good recording depth bound (0 disables it)
    #[arg(long = "no-good-depth", default_value_t = 0)]
    pub no_good_depth: u64,

    // ===== Output control =====
    /// Report file type
    #[arg(long = "out-file-type", default_value = "all")]
    pub out_file_type: String,

    /// How often intermediate solutions are printed
    #[arg(long = "out-print-freq", default_value = "all-solutions")]
    pub out_print_freq: String,

    /// Metrics to include in printed reports
    #[arg(long = "print-metrics", value_delimiter = ',')]
    pub print_metrics: Vec<String>,

    /// Timing-driven-network configuration file
    #[arg(long = "tdn-config")]
    pub tdn_config: Option<PathBuf>,

    /// Write the resolved settings dump to this file
    #[arg(long = "dump-cfg")]
    pub dump_cfg: Option<PathBuf>,

    // ===== Diagnostics =====
    /// Verbose diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}
