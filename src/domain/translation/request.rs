//! Translation request types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Source and target language codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    source: String,
    target: String,
}

impl LanguagePair {
    /// Create a new language pair
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Get the source language code
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the target language code
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl std::fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Request to translate a block of text
///
/// Missing fields deserialize as empty strings so that absence and emptiness
/// are rejected by the same validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new translation request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Check that all required fields are present
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing: Vec<&str> = [
            ("text", self.text.as_str()),
            ("source_language", self.source_language.as_str()),
            ("target_language", self.target_language.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invalid_request(format!(
                "Missing or empty fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Get the language pair of this request
    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(&self.source_language, &self.target_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = TranslationRequest::new("Hello", "en", "fr");

        assert!(request.validate().is_ok());
        assert_eq!(request.languages(), LanguagePair::new("en", "fr"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let request = TranslationRequest::new("", "en", "fr");
        let err = request.validate().unwrap_err();

        assert!(matches!(err, DomainError::InvalidRequest { .. }));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let err = TranslationRequest::default().validate().unwrap_err();
        let message = err.to_string();

        assert!(message.contains("text"));
        assert!(message.contains("source_language"));
        assert!(message.contains("target_language"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let request: TranslationRequest =
            serde_json::from_str(r#"{"text": "Hello"}"#).unwrap();

        assert_eq!(request.source_language, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_language_pair_display() {
        assert_eq!(LanguagePair::new("en", "de").to_string(), "en->de");
    }
}
