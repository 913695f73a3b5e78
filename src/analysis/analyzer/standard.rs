//! Standard analyzer: regex word tokenizer plus lowercasing, with optional
//! English stop word removal.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// The word analyzer used by the featurizer.
#[derive(Debug)]
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
    name: &'static str,
}

impl StandardAnalyzer {
    /// Create a standard analyzer without stop word filtering.
    pub fn new() -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()));

        Ok(StandardAnalyzer {
            inner: analyzer,
            name: "standard",
        })
    }

    /// Create a standard analyzer that also drops English stop words.
    pub fn with_stop_words() -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()));

        Ok(StandardAnalyzer {
            inner: analyzer,
            name: "standard_stop",
        })
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(analyzer: &StandardAnalyzer, input: &str) -> Vec<String> {
        analyzer.analyze(input).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_standard_analyzer_keeps_stop_words() {
        let analyzer = StandardAnalyzer::new().unwrap();
        assert_eq!(
            texts(&analyzer, "Book a flight to Paris"),
            ["book", "a", "flight", "to", "paris"]
        );
        assert_eq!(analyzer.name(), "standard");
    }

    #[test]
    fn test_standard_analyzer_with_stop_words() {
        let analyzer = StandardAnalyzer::with_stop_words().unwrap();
        assert_eq!(
            texts(&analyzer, "Book a flight to Paris"),
            ["book", "flight", "paris"]
        );
        assert_eq!(analyzer.name(), "standard_stop");
    }
}
