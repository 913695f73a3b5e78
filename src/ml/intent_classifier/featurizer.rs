//! Text featurizer: turns raw utterances into sparse TF-IDF vectors.
//!
//! Every text contributes two kinds of terms:
//!
//! - word n-grams (unigrams and bigrams by default) from the word analyzer,
//! - character trigrams over the lowercased, whitespace-collapsed text,
//!   bracketed by `\u{2}` / `\u{3}` boundary markers.
//!
//! Each term is weighted by `tf * idf` with `idf = ln((N + 1) / (df + 1)) + 1`,
//! and the whole vector is L2-normalised. Terms never seen during `fit` are
//! dropped, so a text made only of unknown terms (or an empty text) maps to
//! the empty vector.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::analysis::tokenizer::{NgramTokenizer, Tokenizer};
use crate::error::{IntentError, Result};

const TEXT_START: char = '\u{2}';
const TEXT_END: char = '\u{3}';

/// Options for [`TextFeaturizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizerOptions {
    /// Longest word n-gram; 1 means unigrams only.
    pub word_ngram_length: usize,
    /// Character n-gram length; 0 disables character features.
    pub char_ngram_length: usize,
    /// Drop English stop words before building word n-grams.
    pub remove_stop_words: bool,
}

impl Default for FeaturizerOptions {
    fn default() -> Self {
        Self {
            word_ngram_length: 2,
            char_ngram_length: 3,
            remove_stop_words: false,
        }
    }
}

impl FeaturizerOptions {
    /// Set the longest word n-gram.
    pub fn with_word_ngram_length(mut self, length: usize) -> Self {
        self.word_ngram_length = length;
        self
    }

    /// Set the character n-gram length (0 disables character features).
    pub fn with_char_ngram_length(mut self, length: usize) -> Self {
        self.char_ngram_length = length;
        self
    }

    /// Enable or disable English stop word removal.
    pub fn with_stop_words(mut self, remove: bool) -> Self {
        self.remove_stop_words = remove;
        self
    }
}

/// A sparse feature vector with strictly increasing indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Whether the vector has no non-zero entry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Squared L2 norm.
    pub fn squared_norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Build from unsorted `(index, value)` pairs with unique indices.
    pub fn from_pairs(mut pairs: Vec<(usize, f32)>) -> Self {
        pairs.sort_unstable_by_key(|&(idx, _)| idx);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }
}

/// Learns a term vocabulary with IDF weights and featurizes text with it.
pub struct TextFeaturizer {
    options: FeaturizerOptions,
    /// Term -> feature index.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f32>,
    /// Number of documents seen during `fit`.
    n_documents: usize,
    word_analyzer: Arc<dyn Analyzer>,
    char_tokenizer: Option<NgramTokenizer>,
}

impl std::fmt::Debug for TextFeaturizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFeaturizer")
            .field("options", &self.options)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.word_analyzer.name())
            .finish()
    }
}

impl TextFeaturizer {
    /// Create an unfitted featurizer.
    pub fn new(options: FeaturizerOptions) -> Result<Self> {
        if options.word_ngram_length == 0 && options.char_ngram_length == 0 {
            return Err(IntentError::invalid_config(
                "featurizer needs word or character n-grams",
            ));
        }

        let word_analyzer: Arc<dyn Analyzer> = if options.remove_stop_words {
            Arc::new(StandardAnalyzer::with_stop_words()?)
        } else {
            Arc::new(StandardAnalyzer::new()?)
        };
        let char_tokenizer = match options.char_ngram_length {
            0 => None,
            n => Some(NgramTokenizer::new(n, n)?),
        };

        Ok(Self {
            options,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            word_analyzer,
            char_tokenizer,
        })
    }

    /// Learn the vocabulary and document frequencies from training texts.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut vocabulary = AHashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let unique_terms: AHashSet<String> = self.terms(doc.as_ref())?.into_iter().collect();
            // Sorted so feature indices do not depend on hash order.
            let mut unique_terms: Vec<String> = unique_terms.into_iter().collect();
            unique_terms.sort_unstable();

            for term in unique_terms {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[idx] += 1;
            }
        }

        let n = documents.len() as f32;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f32 + 1.0)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;
        self.n_documents = documents.len();

        log::debug!(
            "Featurizer fitted on {} documents, vocabulary size {}",
            self.n_documents,
            self.vocabulary.len()
        );
        Ok(())
    }

    /// Transform a text into an L2-normalised TF-IDF vector.
    pub fn transform(&self, text: &str) -> Result<SparseVector> {
        let mut tf: AHashMap<usize, f32> = AHashMap::new();
        for term in self.terms(text)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *tf.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let pairs: Vec<(usize, f32)> = tf
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        // Normalise in index order so the float sum never depends on hash order.
        let mut vector = SparseVector::from_pairs(pairs);
        let norm = vector.squared_norm().sqrt();
        if norm > 0.0 {
            for value in &mut vector.values {
                *value /= norm;
            }
        }

        Ok(vector)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Options this featurizer was built with.
    pub fn options(&self) -> &FeaturizerOptions {
        &self.options
    }

    /// All terms of a text, with repetitions.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        let mut terms = Vec::new();

        if self.options.word_ngram_length > 0 {
            let words: Vec<String> = self
                .word_analyzer
                .analyze(text)?
                .filter(|token| !token.is_empty())
                .map(|token| token.text)
                .collect();

            for n in 1..=self.options.word_ngram_length {
                for window in words.windows(n) {
                    terms.push(format!("w:{}", window.join(" ")));
                }
            }
        }

        if let Some(tokenizer) = &self.char_tokenizer {
            let normalized = normalize_for_chars(text);
            if !normalized.is_empty() {
                let bracketed = format!("{TEXT_START}{normalized}{TEXT_END}");
                terms.extend(tokenizer.tokenize(&bracketed)?.map(|t| format!("c:{}", t.text)));
            }
        }

        Ok(terms)
    }
}

/// Lowercase and collapse whitespace runs into single spaces.
fn normalize_for_chars(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(documents: &[&str]) -> TextFeaturizer {
        let mut featurizer = TextFeaturizer::new(FeaturizerOptions::default()).unwrap();
        featurizer.fit(documents).unwrap();
        featurizer
    }

    #[test]
    fn test_vocabulary_contains_words_bigrams_and_chars() {
        let featurizer = fitted(&["book flight"]);

        // w:book, w:flight, w:book flight, and trigrams of "\u{2}book flight\u{3}"
        let char_trigrams = "book flight".chars().count() + 2 - 2;
        assert_eq!(featurizer.vocabulary_size(), 3 + char_trigrams);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let featurizer = fitted(&["book a flight to paris", "what is my balance"]);

        let vector = featurizer.transform("Book a flight").unwrap();
        assert!(!vector.is_empty());
        assert!((vector.squared_norm() - 1.0).abs() < 1e-5);

        let indices: Vec<usize> = vector.iter().map(|(idx, _)| idx).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_and_unknown_text_map_to_empty_vector() {
        let featurizer = fitted(&["book a flight", "check balance"]);

        assert!(featurizer.transform("").unwrap().is_empty());
        assert!(featurizer.transform("   ").unwrap().is_empty());
        assert!(featurizer.transform("zzqx").unwrap().is_empty());
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let featurizer = fitted(&["flight paris", "flight rome", "flight oslo"]);
        let options = FeaturizerOptions::default().with_char_ngram_length(0);
        let mut words_only = TextFeaturizer::new(options).unwrap();
        words_only
            .fit(&["flight paris", "flight rome", "flight oslo"])
            .unwrap();

        let vector = words_only.transform("flight paris").unwrap();
        let flight = words_only.vocabulary.get("w:flight").copied().unwrap();
        let paris = words_only.vocabulary.get("w:paris").copied().unwrap();
        let weight = |idx| vector.iter().find(|&(i, _)| i == idx).map(|(_, v)| v).unwrap();
        assert!(weight(paris) > weight(flight));

        assert!(featurizer.vocabulary_size() > words_only.vocabulary_size());
    }

    #[test]
    fn test_invalid_options() {
        let options = FeaturizerOptions::default()
            .with_word_ngram_length(0)
            .with_char_ngram_length(0);
        assert!(TextFeaturizer::new(options).is_err());
    }

    #[test]
    fn test_from_pairs_sorts_indices() {
        let vector = SparseVector::from_pairs(vec![(2, 0.5), (0, 2.0)]);
        assert_eq!(vector.iter().collect::<Vec<_>>(), vec![(0, 2.0), (2, 0.5)]);
    }

    #[test]
    fn test_transform_is_bit_identical() {
        let featurizer = fitted(&[
            "how much money is in my checking account",
            "move money from checking to savings today",
        ]);
        let text = "how much money is in my checking account and savings today";

        let bits = |v: SparseVector| {
            v.iter()
                .map(|(idx, value)| (idx, value.to_bits()))
                .collect::<Vec<_>>()
        };

        let first = bits(featurizer.transform(text).unwrap());
        for _ in 0..200 {
            assert_eq!(bits(featurizer.transform(text).unwrap()), first);
        }
    }
}
