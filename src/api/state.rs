//! Application state for shared services

use std::sync::Arc;

use crate::domain::translation_cache::TranslationCache;
use crate::infrastructure::services::TranslationServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub translation_service: Arc<dyn TranslationServiceTrait>,
    /// Probed by the readiness check
    pub cache: Arc<dyn TranslationCache>,
}

impl AppState {
    pub fn new(
        translation_service: Arc<dyn TranslationServiceTrait>,
        cache: Arc<dyn TranslationCache>,
    ) -> Self {
        Self {
            translation_service,
            cache,
        }
    }
}
