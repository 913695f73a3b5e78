//! # Intent Classifier
//!
//! Train a multiclass intent classifier from a labeled CSV of user utterances
//! and query it interactively, logging low-confidence predictions for review.
//!
//! ## Features
//!
//! - Text analysis pipeline (tokenizers and token filters)
//! - Word n-gram and character trigram TF-IDF featurization
//! - Multinomial logistic regression trained by stochastic dual coordinate ascent
//! - Interactive console session with an append-only review log

pub mod analysis;
pub mod cli;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::error::{IntentError, Result};
    pub use crate::ml::intent_classifier::{
        IntentClassifier, Prediction, PredictionEngine, TrainedModel, TrainingPipeline,
        UserQuery,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
