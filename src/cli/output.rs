//! Output formatting for the interactive session.

use std::cmp::Ordering;
use std::io::Write;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ScoreMode};
use crate::error::Result;
use crate::ml::intent_classifier::{ClassLabels, Prediction};

pub const BANNER: &str = "=== Intent Classifier (Interactive Mode) ===";
pub const USAGE_HINT: &str = "Type a query (or 'exit' to quit):";
pub const PROMPT: &str = "User: ";
pub const LOW_CONFIDENCE_NOTICE: &str = "Low confidence - logged for review.";

/// Everything reported for one scored line.
#[derive(Debug, Clone, Copy)]
pub struct PredictionReport<'a> {
    pub text: &'a str,
    pub prediction: &'a Prediction,
    pub confidence: f32,
    pub low_confidence: bool,
    pub labels: &'a ClassLabels,
}

/// A score paired with its class label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledScore<'a> {
    pub label: &'a str,
    pub score: f32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    text: &'a str,
    intent: &'a str,
    confidence: f32,
    low_confidence: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<LabeledScore<'a>>>,
}

/// Format a probability as a percentage with two decimals.
pub fn format_percent(score: f32) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Pair labels with scores, highest score first. Ties keep key order.
pub fn sorted_scores<'a>(labels: &'a [String], scores: &[f32]) -> Vec<LabeledScore<'a>> {
    let mut pairs = labeled_scores(labels, scores);
    pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    pairs
}

fn labeled_scores<'a>(labels: &'a [String], scores: &[f32]) -> Vec<LabeledScore<'a>> {
    labels
        .iter()
        .zip(scores)
        .map(|(label, &score)| LabeledScore {
            label: label.as_str(),
            score,
        })
        .collect()
}

/// Print the startup banner and usage hint.
pub fn write_banner<W: Write>(out: &mut W, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Human {
        writeln!(out, "{BANNER}")?;
        writeln!(out, "{USAGE_HINT}")?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print the input prompt without a newline.
pub fn write_prompt<W: Write>(out: &mut W, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Human {
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    Ok(())
}

/// Print one prediction report.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &PredictionReport<'_>,
    format: OutputFormat,
    mode: ScoreMode,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_report_human(out, report, mode),
        OutputFormat::Json => write_report_json(out, report, mode),
    }
}

fn write_report_human<W: Write>(
    out: &mut W,
    report: &PredictionReport<'_>,
    mode: ScoreMode,
) -> Result<()> {
    writeln!(out, "Predicted Intent: {}", report.prediction.intent)?;
    writeln!(out, "Confidence: {}", format_percent(report.confidence))?;

    if mode == ScoreMode::Sorted {
        let scores = &report.prediction.scores;
        match report.labels.names() {
            Some(labels) => {
                writeln!(out, "Confidence Scores (sorted):")?;
                for pair in sorted_scores(labels, scores) {
                    writeln!(out, "   {}: {}", pair.label, format_percent(pair.score))?;
                }
            }
            None => {
                writeln!(
                    out,
                    "Confidence scores unavailable: label count does not match score length."
                )?;
                writeln!(
                    out,
                    "labels = {}, scores = {}",
                    report.labels.label_count(),
                    scores.len()
                )?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}

fn write_report_json<W: Write>(
    out: &mut W,
    report: &PredictionReport<'_>,
    mode: ScoreMode,
) -> Result<()> {
    let scores = report.labels.names().map(|labels| match mode {
        ScoreMode::Raw => labeled_scores(labels, &report.prediction.scores),
        ScoreMode::Sorted => sorted_scores(labels, &report.prediction.scores),
    });

    let json = JsonReport {
        text: report.text,
        intent: &report.prediction.intent,
        confidence: report.confidence,
        low_confidence: report.low_confidence,
        scores,
    };
    serde_json::to_writer(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

/// Print the low-confidence warning.
pub fn write_low_confidence_notice<W: Write>(out: &mut W, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Human {
        writeln!(out, "{LOW_CONFIDENCE_NOTICE}")?;
        writeln!(out)?;
    }
    Ok(())
}
