//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// One training or inference example.
///
/// Loaded training rows carry an intent; live input from the console does
/// not. Rows whose intent is missing or empty are unlabeled and skipped by
/// the trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    /// Raw utterance.
    pub text: String,
    /// Ground-truth intent label.
    pub intent: Option<String>,
}

impl UserQuery {
    /// Create an unlabeled query, as built for every console line.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: None,
        }
    }

    /// Create a labeled training example.
    pub fn labeled(text: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: Some(intent.into()),
        }
    }

    /// The intent label, if present and non-empty.
    pub fn label(&self) -> Option<&str> {
        self.intent.as_deref().filter(|intent| !intent.is_empty())
    }
}

/// One inference result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Decoded label of the highest-scoring class.
    pub intent: String,
    /// One probability per class, in the key order of the label mapping.
    pub scores: Vec<f32>,
}

impl Prediction {
    /// The largest score, or 0.0 when there are no scores.
    pub fn max_score(&self) -> f32 {
        self.scores.iter().copied().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_ignores_empty_intent() {
        assert_eq!(UserQuery::labeled("hi", "Greet").label(), Some("Greet"));
        assert_eq!(UserQuery::labeled("hi", "").label(), None);
        assert_eq!(UserQuery::new("hi").label(), None);
    }

    #[test]
    fn test_max_score() {
        let prediction = Prediction {
            intent: "CheckBalance".to_string(),
            scores: vec![0.25, 0.7, 0.05],
        };
        assert_eq!(prediction.max_score(), 0.7);

        let empty = Prediction {
            intent: String::new(),
            scores: Vec::new(),
        };
        assert_eq!(empty.max_score(), 0.0);
    }
}
