//! Translation unit type

/// A single sentence extracted from the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    text: String,
    position: usize,
}

impl TranslationUnit {
    /// Create a new unit at the given ordinal position
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Get the raw sentence text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the ordinal position within the request
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the unit carries no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
