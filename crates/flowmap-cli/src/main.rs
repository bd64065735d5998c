//! flowmap - design-space exploration for streaming dataflow applications
//! on multiprocessor platforms.
//!
//! This binary resolves the run configuration, records it for
//! reproducibility, and reports the optimization plan. The search engine
//! consumes the resolved [`flowmap_config::Config`] from here on.

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod args;
mod resolve;

use args::CliArgs;
use flowmap_config::{Config, ConfigError};

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

fn print_banner(config: &Config) {
    let settings = config.settings();
    info!("flowmap v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "inputs: {:?}, output: {}",
        settings.input_paths,
        settings.output_path.display()
    );
    info!(
        "model: {}, search: {}, threads: {}",
        settings.model, settings.search, settings.threads
    );
    info!(
        "throughput propagator: {}, luby scale: {}, no-good depth: {}",
        settings.th_prop, settings.luby_scale, settings.no_good_depth
    );
    if let Some(limit) = settings.timeouts.all_limit() {
        info!("search time budget: {:?}", limit);
    }
}

fn print_plan(config: &Config) {
    if !config.do_optimize() {
        info!("no optimization criteria configured; running satisfaction search only");
        return;
    }
    if config.do_multi_step() {
        info!(
            "multi-step run: {} sequential optimization steps",
            config.criteria().len()
        );
    }
    for (step, criterion) in config.criteria().iter().enumerate() {
        info!("step {step}: optimize {criterion}");
    }
    if config.do_presolve() {
        let models: Vec<&str> = config
            .settings()
            .pre_models
            .iter()
            .map(|m| m.as_token())
            .collect();
        info!("presolver pass configured: {}", models.join(", "));
    }
}

fn run(args: &CliArgs) -> Result<(), ConfigError> {
    let config = resolve::resolve_config(args)?;

    print_banner(&config);
    if let Some(path) = &args.dump_cfg {
        config.dump_settings(path)?;
    }
    print_plan(&config);

    info!(
        "configuration resolved ({} search, {} steps)",
        config.search_type(),
        config.criteria().len()
    );
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    setup_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        error!("configuration failed: {e}");
        std::process::exit(1);
    }
}
