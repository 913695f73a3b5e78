//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::{Prediction, UserQuery};

/// Intent classifier trait.
///
/// The interactive session only talks to this trait, so anything that can
/// score a single query (the trained [`PredictionEngine`], or a stub in
/// tests) can drive it.
///
/// [`PredictionEngine`]: crate::ml::intent_classifier::PredictionEngine
pub trait IntentClassifier {
    /// Score one query. Must not mutate the underlying model.
    fn predict(&self, query: &UserQuery) -> Result<Prediction>;

    /// Label names in score order, when known.
    fn class_labels(&self) -> Option<&[String]>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
