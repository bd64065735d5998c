//! Builds the run configuration from parsed command-line arguments.

use flowmap_config::{Config, Result, Settings};

use crate::args::CliArgs;

/// Resolves [`CliArgs`] into a validated [`Config`].
///
/// Setters are applied in dependency order (log paths before log levels);
/// the first failing option aborts resolution, so no partially validated
/// configuration ever escapes.
pub fn resolve_config(args: &CliArgs) -> Result<Config> {
    let mut settings = Settings::default();

    settings.set_input_paths(args.inputs.clone())?;
    settings.set_output_path(args.output.clone())?;

    if let Some(path) = &args.log_path {
        settings.set_log_path(path.clone())?;
    }
    settings.set_log_levels(&args.log_level)?;

    settings.set_model(&args.model)?;
    settings.set_search(&args.search)?;
    settings.set_pre_search(&args.pre_search)?;
    settings.set_multi_step_search(&args.multi_step_search)?;

    settings.set_criteria(&args.criteria)?;
    settings.set_pre_models(&args.pre_models)?;
    settings.set_pre_heuristics(&args.pre_heuristics)?;

    settings.set_th_prop(&args.th_prop)?;
    settings.set_timeouts(&args.timeouts)?;
    settings.set_pre_timeouts(&args.pre_timeouts)?;
    settings.set_luby_scale(args.luby_scale);
    settings.set_threads(args.threads);
    settings.set_no_good_depth(args.no_good_depth);

    settings.set_out_file_type(&args.out_file_type)?;
    settings.set_out_print_freq(&args.out_print_freq)?;
    settings.set_print_metrics(&args.print_metrics)?;

    if let Some(path) = &args.tdn_config {
        settings.set_tdn_config(path.clone())?;
    }

    Ok(Config::new(settings))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use clap::Parser;
    use flowmap_config::{ConfigError, CpModel, SearchType, Settings};
    use tempfile::TempDir;

    use super::*;

    struct Fixture {
        dir: TempDir,
        input: String,
        output: String,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("app.xml");
            fs::write(&input, "<application/>").unwrap();
            let output = dir.path().join("out");
            fs::create_dir(&output).unwrap();
            Fixture {
                input: input.to_str().unwrap().to_string(),
                output: output.to_str().unwrap().to_string(),
                dir,
            }
        }

        fn args(&self, extra: &[&str]) -> CliArgs {
            let mut argv = vec!["flowmap", "-i", &self.input, "-o", &self.output];
            argv.extend_from_slice(extra);
            CliArgs::try_parse_from(argv).unwrap()
        }
    }

    #[test]
    fn resolves_with_defaults() {
        let fixture = Fixture::new();
        let config = resolve_config(&fixture.args(&[])).unwrap();

        let settings = config.settings();
        assert_eq!(settings.model, CpModel::SingleRate);
        assert_eq!(settings.search, SearchType::Optimize);
        assert_eq!(settings.threads, 1);
        assert!(!config.do_optimize());
        assert!(!config.do_presolve());
    }

    #[test]
    fn unknown_search_token_is_a_format_error() {
        let fixture = Fixture::new();
        let err = resolve_config(&fixture.args(&["--search", "bogus"])).unwrap_err();
        match err {
            ConfigError::Format { option, token } => {
                assert_eq!(option, "search type");
                assert_eq!(token, "bogus");
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn missing_input_file_is_a_path_error() {
        let fixture = Fixture::new();
        let missing = fixture.dir.path().join("nope.xml");
        let argv = [
            "flowmap",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            &fixture.output,
        ];
        let args = CliArgs::try_parse_from(argv).unwrap();
        assert!(matches!(
            resolve_config(&args),
            Err(ConfigError::Path { .. })
        ));
    }

    #[test]
    fn log_level_without_log_path_is_a_state_error() {
        let fixture = Fixture::new();
        let err = resolve_config(&fixture.args(&["--log-level", "debug"])).unwrap_err();
        assert!(matches!(err, ConfigError::State(_)));
    }

    #[test]
    fn log_level_after_log_path_resolves() {
        let fixture = Fixture::new();
        let log = fixture.dir.path().join("run.log");
        let config = resolve_config(&fixture.args(&[
            "--log",
            log.to_str().unwrap(),
            "--log-level",
            "debug",
            "trace",
        ]))
        .unwrap();
        let log_settings = &config.settings().log;
        assert_eq!(log_settings.console_level.as_token(), "debug");
        assert_eq!(log_settings.file_level.as_token(), "trace");
    }

    #[test]
    fn tdn_config_flag_tracks_the_supplied_path() {
        let fixture = Fixture::new();
        let tdn = fixture.dir.path().join("tdn.toml");
        fs::write(&tdn, "links = 4\n").unwrap();

        let config =
            resolve_config(&fixture.args(&["--tdn-config", tdn.to_str().unwrap()])).unwrap();
        assert!(config.settings().has_tdn_config());

        let config = resolve_config(&fixture.args(&[])).unwrap();
        assert!(!config.settings().has_tdn_config());
    }

    #[test]
    fn resolved_settings_round_trip_through_the_dump() {
        let fixture = Fixture::new();
        let config = resolve_config(&fixture.args(&[
            "-m",
            "single-rate-with-online-presolve",
            "--search",
            "optimize-iterative",
            "--criteria",
            "throughput,power",
            "--pre-model",
            "one-processor-mappings",
            "--pre-heuristic",
            "staged-heuristic",
            "--th-prop",
            "max-cycle-ratio",
            "--timeout",
            "10000",
            "600000",
            "--pre-timeout",
            "1000",
            "--luby-scale",
            "100",
            "--threads",
            "8",
            "--no-good-depth",
            "25",
            "--out-file-type",
            "csv-most",
            "--out-print-freq",
            "first-and-last",
            "--print-metrics",
            "power,latency",
        ]))
        .unwrap();

        let dump_path = fixture.dir.path().join("settings.toml");
        config.dump_settings(Path::new(&dump_path)).unwrap();

        let reparsed =
            Settings::from_toml_str(&fs::read_to_string(&dump_path).unwrap()).unwrap();
        assert_eq!(&reparsed, config.settings());
        assert_eq!(reparsed.criteria.len(), 2);
    }
}
