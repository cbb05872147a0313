//! Delimiter-based sentence splitter

use super::TranslationUnit;

/// Sentence boundary used when none is configured
pub const DEFAULT_SENTENCE_DELIMITER: &str = ". ";

/// Splits text into translation units and joins results back together.
///
/// Splitting is exact: fragments are neither trimmed nor dropped, so
/// `join(split(text))` reproduces `text` byte for byte.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    delimiter: String,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCE_DELIMITER)
    }
}

impl SentenceSplitter {
    /// Create a splitter for the given delimiter.
    ///
    /// An empty delimiter falls back to [`DEFAULT_SENTENCE_DELIMITER`].
    pub fn new(delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        let delimiter = if delimiter.is_empty() {
            DEFAULT_SENTENCE_DELIMITER.to_string()
        } else {
            delimiter
        };

        Self { delimiter }
    }

    /// Get the delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split text into ordered translation units
    pub fn split(&self, text: &str) -> Vec<TranslationUnit> {
        text.split(self.delimiter.as_str())
            .enumerate()
            .map(|(position, fragment)| TranslationUnit::new(fragment, position))
            .collect()
    }

    /// Join per-unit results in order using the delimiter
    pub fn join<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let mut output = String::new();

        for (idx, part) in parts.iter().enumerate() {
            if idx > 0 {
                output.push_str(&self.delimiter);
            }
            output.push_str(part.as_ref());
        }

        output
    }
}
