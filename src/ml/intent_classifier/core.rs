//! Helper functions for loading data and training intent classifiers.

use std::path::Path;

use crate::error::Result;
use crate::ml::intent_classifier::dataset::CsvDatasetLoader;
use crate::ml::intent_classifier::featurizer::FeaturizerOptions;
use crate::ml::intent_classifier::pipeline::{TrainedModel, TrainingPipeline};
use crate::ml::intent_classifier::sdca::SdcaOptions;
use crate::ml::intent_classifier::types::UserQuery;

/// Load training data from a header-bearing, comma-separated file.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<UserQuery>> {
    CsvDatasetLoader::new().load(path)
}

/// Train a model with default featurizer options.
pub fn train(dataset: &[UserQuery], trainer_options: SdcaOptions) -> Result<TrainedModel> {
    train_with(dataset, FeaturizerOptions::default(), trainer_options)
}

/// Train a model with explicit stage options.
pub fn train_with(
    dataset: &[UserQuery],
    featurizer_options: FeaturizerOptions,
    trainer_options: SdcaOptions,
) -> Result<TrainedModel> {
    TrainingPipeline::new(featurizer_options, trainer_options).fit(dataset)
}
