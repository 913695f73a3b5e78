//! The interactive read, score, report, log loop.
//!
//! A [`Session`] is a two-state machine. While [`LoopState::Running`], every
//! [`Session::step`] reads one line and either stops (end of input or an exit
//! sentinel) or scores it, prints the report and, below the confidence
//! threshold, appends a review entry. A failed prediction or log write is
//! reported and the loop keeps running.

use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::args::{OutputFormat, ScoreMode};
use crate::cli::low_confidence::{LowConfidenceLog, LowConfidenceLogEntry};
use crate::cli::output::{self, PredictionReport};
use crate::error::Result;
use crate::ml::intent_classifier::{IntentClassifier, UserQuery, resolve_class_labels};

/// Default confidence threshold below which predictions are logged.
pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Word that ends the session, compared case-insensitively.
pub const EXIT_WORD: &str = "exit";

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub threshold: f32,
    pub log_path: PathBuf,
    pub score_mode: ScoreMode,
    pub output_format: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            log_path: PathBuf::from("low_confidence.log"),
            score_mode: ScoreMode::Raw,
            output_format: OutputFormat::Human,
        }
    }
}

impl SessionConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_log_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn with_score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = mode;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// State of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Counters reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines scored.
    pub predictions: usize,
    /// Entries appended to the review log.
    pub logged: usize,
    /// Lines whose prediction or log write failed.
    pub errors: usize,
}

/// Whether a line ends the session: empty, whitespace-only, or `exit` in any
/// casing with surrounding whitespace ignored.
pub fn is_exit_sentinel(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EXIT_WORD)
}

/// Strip the line terminator (`\n` or `\r\n`) and nothing else.
fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// An interactive session over any line source and sink.
pub struct Session<'a, R, W> {
    classifier: &'a dyn IntentClassifier,
    dataset: &'a [UserQuery],
    config: SessionConfig,
    review_log: LowConfidenceLog,
    input: R,
    output: W,
    state: LoopState,
    stats: SessionStats,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Create a session. `dataset` is only consulted for label names when
    /// the classifier does not report matching ones.
    pub fn new(
        classifier: &'a dyn IntentClassifier,
        dataset: &'a [UserQuery],
        config: SessionConfig,
        input: R,
        output: W,
    ) -> Self {
        let review_log = LowConfidenceLog::new(config.log_path.clone());
        Self {
            classifier,
            dataset,
            config,
            review_log,
            input,
            output,
            state: LoopState::Running,
            stats: SessionStats::default(),
        }
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Print the banner and step until stopped.
    ///
    /// Only console I/O failures end the loop with an error.
    pub fn run(&mut self) -> Result<SessionStats> {
        output::write_banner(&mut self.output, self.config.output_format)?;
        while self.step()? == LoopState::Running {}

        log::info!(
            "Session ended: {} predictions, {} logged, {} errors",
            self.stats.predictions,
            self.stats.logged,
            self.stats.errors
        );
        Ok(self.stats)
    }

    /// One read → score → report → (maybe log) transaction.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        output::write_prompt(&mut self.output, self.config.output_format)?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            log::debug!("End of input");
            self.state = LoopState::Stopped;
            return Ok(self.state);
        }

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            log::warn!("Input line is not valid UTF-8; invalid bytes were replaced");
        }
        let text = strip_line_terminator(&line);
        if is_exit_sentinel(text) {
            self.state = LoopState::Stopped;
            return Ok(self.state);
        }

        self.handle_line(text)?;
        Ok(self.state)
    }

    fn handle_line(&mut self, text: &str) -> Result<()> {
        let query = UserQuery::new(text);
        let prediction = match self.classifier.predict(&query) {
            Ok(prediction) => prediction,
            Err(e) => {
                log::error!("Prediction failed for {text:?}: {e}");
                self.stats.errors += 1;
                return Ok(());
            }
        };
        self.stats.predictions += 1;

        let confidence = prediction.max_score();
        let low_confidence = confidence < self.config.threshold;
        let labels = resolve_class_labels(
            self.classifier.class_labels(),
            self.dataset,
            prediction.scores.len(),
        );

        let report = PredictionReport {
            text,
            prediction: &prediction,
            confidence,
            low_confidence,
            labels: &labels,
        };
        output::write_report(
            &mut self.output,
            &report,
            self.config.output_format,
            self.config.score_mode,
        )?;

        if low_confidence {
            let entry = LowConfidenceLogEntry::new(text, &prediction.intent, confidence);
            match self.review_log.append(&entry) {
                Ok(()) => {
                    self.stats.logged += 1;
                    output::write_low_confidence_notice(
                        &mut self.output,
                        self.config.output_format,
                    )?;
                }
                Err(e) => {
                    log::error!(
                        "Failed to append to {}: {e}",
                        self.review_log.path().display()
                    );
                    self.stats.errors += 1;
                }
            }
        }

        Ok(())
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}
