//! Translation domain models and traits

mod provider;
mod request;

pub use provider::TranslationProvider;
pub use request::{LanguagePair, TranslationRequest};

#[cfg(test)]
pub use provider::MockTranslationProvider;
