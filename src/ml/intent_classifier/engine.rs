//! Single-query prediction over a trained model.

use crate::error::Result;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::pipeline::TrainedModel;
use crate::ml::intent_classifier::types::{Prediction, UserQuery};

/// Scores one [`UserQuery`] at a time against a borrowed [`TrainedModel`].
///
/// The engine keeps no state of its own, so identical inputs always produce
/// identical predictions.
#[derive(Debug, Clone, Copy)]
pub struct PredictionEngine<'a> {
    model: &'a TrainedModel,
}

impl<'a> PredictionEngine<'a> {
    /// Create an engine over a trained model.
    pub fn new(model: &'a TrainedModel) -> Self {
        Self { model }
    }

    /// The underlying model.
    pub fn model(&self) -> &'a TrainedModel {
        self.model
    }
}

impl IntentClassifier for PredictionEngine<'_> {
    fn predict(&self, query: &UserQuery) -> Result<Prediction> {
        self.model.score(&query.text)
    }

    fn class_labels(&self) -> Option<&[String]> {
        let labels = self.model.key_values();
        (!labels.is_empty()).then_some(labels)
    }

    fn name(&self) -> &str {
        "sdca_maximum_entropy"
    }
}
