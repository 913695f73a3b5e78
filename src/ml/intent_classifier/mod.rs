//! Multiclass intent classification for short user utterances.
//!
//! # Architecture
//!
//! - `CsvDatasetLoader`: reads labeled utterances from CSV
//! - `KeyMap`: intent label <-> dense key
//! - `TextFeaturizer`: word n-gram and character trigram TF-IDF features
//! - `SdcaMaximumEntropy`: multinomial logistic regression trained by SDCA
//! - `TrainingPipeline` / `TrainedModel`: the fitted composition
//! - `PredictionEngine`: the `IntentClassifier` used by the interactive loop
//!
//! # Example
//!
//! ```rust
//! use intent_classifier::ml::intent_classifier::{
//!     IntentClassifier, PredictionEngine, SdcaOptions, UserQuery, train,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//!     UserQuery::labeled("book a flight to paris", "BookFlight"),
//!     UserQuery::labeled("reserve a plane seat", "BookFlight"),
//!     UserQuery::labeled("what is my balance", "CheckBalance"),
//!     UserQuery::labeled("how much money do i have", "CheckBalance"),
//! ];
//!
//! let model = train(&rows, SdcaOptions::default().with_seed(1))?;
//! let engine = PredictionEngine::new(&model);
//!
//! let prediction = engine.predict(&UserQuery::new("book a flight"))?;
//! assert_eq!(prediction.scores.len(), 2);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod dataset;
mod engine;
mod featurizer;
mod key_map;
mod labels;
mod pipeline;
mod sdca;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::{load_training_data, train, train_with};
pub use dataset::CsvDatasetLoader;
pub use engine::PredictionEngine;
pub use featurizer::{FeaturizerOptions, SparseVector, TextFeaturizer};
pub use key_map::KeyMap;
pub use labels::{ClassLabels, distinct_intents, resolve_class_labels};
pub use pipeline::{TrainedModel, TrainingPipeline};
pub use sdca::{LinearModel, SdcaMaximumEntropy, SdcaOptions, TrainingSummary, argmax};
pub use types::{Prediction, UserQuery};
