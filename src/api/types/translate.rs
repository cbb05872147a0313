use serde::{Deserialize, Serialize};

/// Body of a successful `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

impl TranslateResponse {
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
        }
    }
}
