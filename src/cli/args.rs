//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::cli::session::SessionConfig;
use crate::ml::intent_classifier::{FeaturizerOptions, SdcaOptions};

/// Interactive intent classifier with low-confidence logging
#[derive(Parser, Debug, Clone)]
#[command(name = "intent-classifier")]
#[command(about = "Train an intent classifier from CSV and query it interactively")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Training data (CSV with a header row: text,intent)
    #[arg(short, long, value_name = "PATH", default_value = "intents.csv")]
    pub data: PathBuf,

    /// File that low-confidence predictions are appended to
    #[arg(short, long, value_name = "PATH", default_value = "low_confidence.log")]
    pub log_file: PathBuf,

    /// Predictions below this confidence are logged for review
    #[arg(short, long, default_value_t = 0.6, value_parser = parse_threshold)]
    pub threshold: f32,

    /// Seed for the trainer's example shuffling (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// How to show the per-class scores
    #[arg(long, value_enum, default_value = "raw")]
    pub scores: ScoreMode,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// L2 regularization strength (defaults to 0.1 / number of examples)
    #[arg(long)]
    pub l2: Option<f32>,

    /// Maximum number of training epochs
    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,

    /// Remove English stop words before building word n-grams
    #[arg(long)]
    pub stop_words: bool,
}

impl IntentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Settings for the interactive session.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_threshold(self.threshold)
            .with_log_path(self.log_file.clone())
            .with_score_mode(self.scores)
            .with_output_format(self.output_format)
    }

    /// Options for the featurization stage.
    pub fn featurizer_options(&self) -> FeaturizerOptions {
        FeaturizerOptions::default().with_stop_words(self.stop_words)
    }

    /// Options for the trainer stage.
    pub fn trainer_options(&self) -> SdcaOptions {
        let mut options = SdcaOptions::default().with_max_iterations(self.max_iterations);
        if let Some(l2) = self.l2 {
            options = options.with_l2(l2);
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}

fn parse_threshold(value: &str) -> Result<f32, String> {
    let threshold: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("threshold must be within 0..=1, got {threshold}"))
    }
}

/// How per-class scores are reported
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Only the top intent and its confidence
    #[default]
    Raw,
    /// Every class with its score, highest first
    Sorted,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// One JSON object per prediction
    Json,
}
