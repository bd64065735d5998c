//! Enumerated option domains.
//!
//! Every command-line option with a closed set of values is represented as an
//! exhaustive enum. Token parsing rejects anything outside the domain with
//! [`ConfigError::Format`], and `as_token` renders the canonical token back,
//! so a settings dump re-parses to the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

macro_rules! option_domain {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            /// The canonical command-line token for this value.
            pub fn as_token(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }

            /// All recognized tokens of this option domain.
            pub fn tokens() -> &'static [&'static str] {
                &[$($token),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_token())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(ConfigError::Format {
                        option: $label,
                        token: s.to_string(),
                    }),
                }
            }
        }
    };
}

option_domain! {
    /// Constraint-programming model flavor for the main search.
    CpModel("model") {
        /// No model selected.
        #[default]
        None => "none",
        /// Single-rate dataflow model.
        SingleRate => "single-rate",
        /// Single-rate dataflow model with online presolving.
        SingleRateWithOnlinePresolve => "single-rate-with-online-presolve",
    }
}

option_domain! {
    /// Search engine mode.
    SearchType("search type") {
        #[default]
        None => "none",
        /// Stop at the first solution.
        First => "first",
        /// Enumerate all solutions.
        All => "all",
        /// Branch-and-bound optimization.
        Optimize => "optimize",
        /// Iterative optimization with restarts between improvements.
        OptimizeIterative => "optimize-iterative",
        /// Interactive tree visualization over all solutions.
        GistAll => "gist-all",
        /// Interactive tree visualization of the optimization run.
        GistOptimal => "gist-optimal",
    }
}

option_domain! {
    /// Optimization criterion governing one step of the run.
    Criterion("criterion") {
        #[default]
        None => "none",
        Power => "power",
        Throughput => "throughput",
        Latency => "latency",
    }
}

option_domain! {
    /// Model used by the presolver pass.
    PresolverModel("presolver model") {
        /// Skip presolving entirely.
        #[default]
        NoPresolve => "no-presolve",
        /// Enumerate candidate one-processor mapping combinations.
        OneProcessorMappings => "one-processor-mappings",
    }
}

option_domain! {
    /// Heuristic applied between multi-step presolver rounds.
    PresolverHeuristic("presolver heuristic") {
        #[default]
        NoHeuristic => "no-heuristic",
        StagedHeuristic => "staged-heuristic",
    }
}

option_domain! {
    /// Algorithm used to bound throughput during search.
    ThroughputPropagator("throughput propagator") {
        /// Cheap single-step estimate.
        #[default]
        SingleStepEstimate => "single-step-estimate",
        /// Exact maximum-cycle-ratio analysis.
        MaxCycleRatio => "max-cycle-ratio",
    }
}

option_domain! {
    /// On-disk format(s) for result reports.
    OutputFileType("output file type") {
        #[default]
        All => "all",
        Text => "text",
        Csv => "csv",
        /// CSV restricted to the most relevant columns.
        CsvMost => "csv-most",
        Xml => "xml",
    }
}

option_domain! {
    /// How often intermediate solutions are printed.
    OutputPrintFrequency("output print frequency") {
        #[default]
        AllSolutions => "all-solutions",
        Last => "last",
        EveryN => "every-n",
        FirstAndLast => "first-and-last",
    }
}

option_domain! {
    /// Verbosity of the run log.
    LogLevel("log level") {
        Error => "error",
        Warn => "warn",
        #[default]
        Info => "info",
        Debug => "debug",
        Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tokens_parse() {
        assert_eq!("single-rate".parse::<CpModel>().unwrap(), CpModel::SingleRate);
        assert_eq!(
            "optimize-iterative".parse::<SearchType>().unwrap(),
            SearchType::OptimizeIterative
        );
        assert_eq!("throughput".parse::<Criterion>().unwrap(), Criterion::Throughput);
        assert_eq!(
            "one-processor-mappings".parse::<PresolverModel>().unwrap(),
            PresolverModel::OneProcessorMappings
        );
        assert_eq!(
            "max-cycle-ratio".parse::<ThroughputPropagator>().unwrap(),
            ThroughputPropagator::MaxCycleRatio
        );
        assert_eq!("csv-most".parse::<OutputFileType>().unwrap(), OutputFileType::CsvMost);
        assert_eq!(
            "first-and-last".parse::<OutputPrintFrequency>().unwrap(),
            OutputPrintFrequency::FirstAndLast
        );
    }

    #[test]
    fn unknown_token_is_a_format_error() {
        let err = "bogus".parse::<SearchType>().unwrap_err();
        match err {
            ConfigError::Format { option, token } => {
                assert_eq!(option, "search type");
                assert_eq!(token, "bogus");
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn display_matches_parse() {
        for token in SearchType::tokens() {
            let value: SearchType = token.parse().unwrap();
            assert_eq!(value.to_string(), *token);
        }
        for token in Criterion::tokens() {
            let value: Criterion = token.parse().unwrap();
            assert_eq!(value.to_string(), *token);
        }
    }
}
