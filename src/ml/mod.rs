//! Machine learning components: training and serving intent classifiers.

pub mod intent_classifier;
