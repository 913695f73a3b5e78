//! Value-to-key mapping for intent labels.
//!
//! Labels are assigned dense keys `0..K-1` in order of first appearance in the
//! training data. The key order is also the score order of every
//! [`Prediction`](super::Prediction).

use ahash::AHashMap;

use crate::error::{IntentError, Result};

/// Bijective mapping between intent strings and dense integer keys.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    /// Key -> value.
    values: Vec<String>,
    /// Value -> key.
    keys: AHashMap<String, usize>,
}

impl KeyMap {
    /// Build the mapping from the labels observed in training data.
    ///
    /// Empty labels are treated as missing and never receive a key.
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = KeyMap::default();
        for label in labels {
            if label.is_empty() || map.keys.contains_key(label) {
                continue;
            }
            map.keys.insert(label.to_string(), map.values.len());
            map.values.push(label.to_string());
        }
        map
    }

    /// Map a label to its key.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.keys.get(label).copied()
    }

    /// Map a key back to its label.
    pub fn decode(&self, key: usize) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| {
                IntentError::prediction(format!(
                    "key {key} is outside the label key space (0..{})",
                    self.values.len()
                ))
            })
    }

    /// Labels in key order.
    pub fn key_values(&self) -> &[String] {
        &self.values
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no label was observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let map = KeyMap::fit(["CheckBalance", "BookFlight", "CheckBalance", "Greet"]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.key_values(), &["CheckBalance", "BookFlight", "Greet"]);
        assert_eq!(map.encode("BookFlight"), Some(1));
        assert_eq!(map.decode(2).unwrap(), "Greet");
    }

    #[test]
    fn test_unknown_label_and_key() {
        let map = KeyMap::fit(["A", "", "B"]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.encode(""), None);
        assert_eq!(map.encode("C"), None);
        assert!(map.decode(2).is_err());
    }
}
