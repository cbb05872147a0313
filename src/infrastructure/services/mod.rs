//! Infrastructure services

mod translation_service;

pub use translation_service::{TranslationOutcome, TranslationService, TranslationServiceTrait};

#[cfg(test)]
pub use translation_service::MockTranslationServiceTrait;
