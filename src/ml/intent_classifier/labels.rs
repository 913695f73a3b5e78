//! Resolution of the label names shown next to each class score.

use ahash::AHashSet;

use crate::ml::intent_classifier::types::UserQuery;

/// Label names for a score vector, and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassLabels {
    /// The key values recorded by the trained model.
    KeyValues(Vec<String>),
    /// Distinct intents of the training dataset, in first-appearance order.
    Distinct(Vec<String>),
    /// Neither source matched the score length. Carries the number of
    /// labels the primary source offered (the dataset's when there was none).
    Unavailable { label_count: usize },
}

impl ClassLabels {
    /// The resolved names, if any.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            ClassLabels::KeyValues(names) | ClassLabels::Distinct(names) => Some(names),
            ClassLabels::Unavailable { .. } => None,
        }
    }

    /// Number of label names offered, resolved or not.
    pub fn label_count(&self) -> usize {
        match self {
            ClassLabels::KeyValues(names) | ClassLabels::Distinct(names) => names.len(),
            ClassLabels::Unavailable { label_count } => *label_count,
        }
    }
}

/// Pick label names for `expected` scores.
///
/// The model's own key values win when their length matches; otherwise the
/// distinct non-empty intents of the dataset are used under the same length
/// check.
pub fn resolve_class_labels(
    primary: Option<&[String]>,
    dataset: &[UserQuery],
    expected: usize,
) -> ClassLabels {
    if let Some(names) = primary
        && names.len() == expected
    {
        return ClassLabels::KeyValues(names.to_vec());
    }

    let distinct = distinct_intents(dataset);
    if distinct.len() == expected {
        log::warn!(
            "Model label names unavailable; falling back to {} distinct dataset intents",
            distinct.len()
        );
        return ClassLabels::Distinct(distinct);
    }

    ClassLabels::Unavailable {
        label_count: primary.map_or(distinct.len(), <[String]>::len),
    }
}

/// Distinct non-empty intents in first-appearance order.
pub fn distinct_intents(dataset: &[UserQuery]) -> Vec<String> {
    let mut seen = AHashSet::new();
    dataset
        .iter()
        .filter_map(UserQuery::label)
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<UserQuery> {
        vec![
            UserQuery::labeled("a", "CheckBalance"),
            UserQuery::labeled("b", "BookFlight"),
            UserQuery::new("c"),
            UserQuery::labeled("d", "CheckBalance"),
        ]
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_primary_wins_when_length_matches() {
        let primary = names(&["X", "Y"]);
        assert_eq!(
            resolve_class_labels(Some(&primary), &dataset(), 2),
            ClassLabels::KeyValues(primary.clone())
        );
    }

    #[test]
    fn test_fallback_to_distinct_intents() {
        let short = names(&["X"]);
        let expected = ClassLabels::Distinct(names(&["CheckBalance", "BookFlight"]));

        assert_eq!(resolve_class_labels(Some(&short), &dataset(), 2), expected);
        assert_eq!(resolve_class_labels(None, &dataset(), 2), expected);
        assert_eq!(expected.label_count(), 2);
    }

    #[test]
    fn test_unavailable() {
        let resolved = resolve_class_labels(None, &dataset(), 3);
        assert_eq!(resolved, ClassLabels::Unavailable { label_count: 2 });
        assert!(resolved.names().is_none());

        let primary = names(&["X"]);
        let resolved = resolve_class_labels(Some(&primary), &dataset(), 3);
        assert_eq!(resolved.label_count(), 1);
    }
}
