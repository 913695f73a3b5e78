//! Training pipeline: label encode → featurize text → fit classifier, with
//! label decoding kept in the resulting [`TrainedModel`].

use crate::error::{IntentError, Result};
use crate::ml::intent_classifier::featurizer::{FeaturizerOptions, TextFeaturizer};
use crate::ml::intent_classifier::key_map::KeyMap;
use crate::ml::intent_classifier::sdca::{LinearModel, SdcaMaximumEntropy, SdcaOptions, argmax};
use crate::ml::intent_classifier::types::{Prediction, UserQuery};

/// The fixed four-stage training composition.
#[derive(Debug, Clone, Default)]
pub struct TrainingPipeline {
    featurizer_options: FeaturizerOptions,
    trainer_options: SdcaOptions,
}

impl TrainingPipeline {
    /// Create a pipeline with explicit stage options.
    pub fn new(featurizer_options: FeaturizerOptions, trainer_options: SdcaOptions) -> Self {
        Self {
            featurizer_options,
            trainer_options,
        }
    }

    /// Fit every stage on the dataset and return the immutable model.
    pub fn fit(&self, dataset: &[UserQuery]) -> Result<TrainedModel> {
        let labeled: Vec<(&str, &str)> = dataset
            .iter()
            .filter_map(|row| row.label().map(|label| (row.text.as_str(), label)))
            .collect();

        if labeled.is_empty() {
            return Err(IntentError::training("the dataset has no labeled rows"));
        }
        if labeled.len() < dataset.len() {
            log::warn!(
                "Ignoring {} rows with a missing intent",
                dataset.len() - labeled.len()
            );
        }

        // Stage A
        let key_map = KeyMap::fit(labeled.iter().map(|(_, label)| *label));
        if key_map.len() < 2 {
            return Err(IntentError::training(format!(
                "a classifier needs at least 2 distinct intents, found {} ({})",
                key_map.len(),
                key_map.key_values().join(", ")
            )));
        }

        // Stage B
        let texts: Vec<&str> = labeled.iter().map(|(text, _)| *text).collect();
        let mut featurizer = TextFeaturizer::new(self.featurizer_options.clone())?;
        featurizer.fit(&texts)?;

        let mut examples = Vec::with_capacity(labeled.len());
        for (text, label) in &labeled {
            let key = key_map.encode(label).ok_or_else(|| {
                IntentError::training(format!("intent '{label}' has no key"))
            })?;
            examples.push((featurizer.transform(text)?, key));
        }

        // Stage C
        let trainer = SdcaMaximumEntropy::new(self.trainer_options.clone());
        let model = trainer.fit(&examples, featurizer.vocabulary_size(), key_map.len())?;

        log::info!(
            "Trained on {} rows: {} intents, {} features, {} epochs",
            labeled.len(),
            key_map.len(),
            featurizer.vocabulary_size(),
            model.summary().iterations
        );

        Ok(TrainedModel {
            key_map,
            featurizer,
            model,
        })
    }
}

/// The fitted, immutable pipeline artifact.
#[derive(Debug)]
pub struct TrainedModel {
    key_map: KeyMap,
    featurizer: TextFeaturizer,
    model: LinearModel,
}

impl TrainedModel {
    /// Featurize, score and decode one text (Stage D).
    pub fn score(&self, text: &str) -> Result<Prediction> {
        let features = self.featurizer.transform(text)?;
        let scores = self.model.probabilities(&features);
        let intent = self.key_map.decode(argmax(&scores))?.to_string();

        Ok(Prediction { intent, scores })
    }

    /// Label names in key (score) order.
    pub fn key_values(&self) -> &[String] {
        self.key_map.key_values()
    }

    /// Number of classes the model scores.
    pub fn num_classes(&self) -> usize {
        self.model.num_classes()
    }

    /// The fitted featurizer.
    pub fn featurizer(&self) -> &TextFeaturizer {
        &self.featurizer
    }

    /// The fitted linear model.
    pub fn linear_model(&self) -> &LinearModel {
        &self.model
    }
}
