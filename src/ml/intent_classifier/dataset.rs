//! CSV loader for labeled training utterances.
//!
//! Columns are positional: the first is the utterance text, the second the
//! intent label. Extra columns are ignored and short rows are tolerated.
//! ```csv
//! text,intent
//! book a flight to paris,BookFlight
//! "what's my balance, please",CheckBalance
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{IntentError, Result};
use crate::ml::intent_classifier::types::UserQuery;

const TEXT_COLUMN: usize = 0;
const INTENT_COLUMN: usize = 1;

/// Reads delimited text files into [`UserQuery`] rows.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    /// Field delimiter (default: ',')
    delimiter: u8,
    /// Whether the first row is a header (default: true)
    has_header: bool,
    /// Whether to trim whitespace from fields (default: false)
    trim: bool,
}

impl Default for CsvDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetLoader {
    /// Create a loader for comma-separated files with a header row.
    pub fn new() -> Self {
        CsvDatasetLoader {
            delimiter: b',',
            has_header: true,
            trim: false,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the first row is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Load every row of the file at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<UserQuery>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            IntentError::dataset(format!("cannot open {}: {e}", path.display()))
        })?;

        let rows = self.from_reader(file)?;
        log::info!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Load every row from an arbitrary reader.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<UserQuery>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let Some(text) = record.get(TEXT_COLUMN) else {
                log::debug!("Skipping empty record {}", line + 1);
                continue;
            };
            let intent = record
                .get(INTENT_COLUMN)
                .filter(|intent| !intent.is_empty())
                .map(str::to_string);

            rows.push(UserQuery {
                text: text.to_string(),
                intent,
            });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_columns() {
        let csv = "text,intent,source\nbook a flight,BookFlight,web\nmy balance,CheckBalance,app\n";
        let rows = CsvDatasetLoader::new().from_reader(csv.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![
                UserQuery::labeled("book a flight", "BookFlight"),
                UserQuery::labeled("my balance", "CheckBalance"),
            ]
        );
    }

    #[test]
    fn test_quoted_fields_and_short_rows() {
        let csv = "utterance,label\n\"hi, there\",Greet\nno label here\nempty label,\n";
        let rows = CsvDatasetLoader::new().from_reader(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], UserQuery::labeled("hi, there", "Greet"));
        assert_eq!(rows[1], UserQuery::new("no label here"));
        assert_eq!(rows[2], UserQuery::new("empty label"));
    }

    #[test]
    fn test_fields_are_kept_verbatim_unless_trimmed() {
        let csv = "text,intent\n  book a flight , BookFlight\n";

        let rows = CsvDatasetLoader::new().from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].text, "  book a flight ");
        assert_eq!(rows[0].intent.as_deref(), Some(" BookFlight"));

        let rows = CsvDatasetLoader::new()
            .with_trim(true)
            .from_reader(csv.as_bytes())
            .unwrap();
        assert_eq!(rows[0], UserQuery::labeled("book a flight", "BookFlight"));
    }

    #[test]
    fn test_custom_delimiter_without_header() {
        let csv = "book a flight;BookFlight\n";
        let rows = CsvDatasetLoader::new()
            .with_delimiter(b';')
            .with_header(false)
            .from_reader(csv.as_bytes())
            .unwrap();

        assert_eq!(rows, vec![UserQuery::labeled("book a flight", "BookFlight")]);
    }

    #[test]
    fn test_missing_file() {
        let err = CsvDatasetLoader::new()
            .load("definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, IntentError::Dataset(_)));
    }
}
