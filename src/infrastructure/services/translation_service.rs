//! Semantic translation caching service
//!
//! Splits the input into sentences, serves each sentence from the similarity
//! cache when a close enough entry exists, and otherwise translates it and
//! writes the result back.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument, warn};

#[cfg(test)]
use mockall::automock;

use crate::domain::embedding::{Embedding, EmbeddingProvider};
use crate::domain::segmentation::{SentenceSplitter, TranslationUnit};
use crate::domain::translation::{LanguagePair, TranslationProvider, TranslationRequest};
use crate::domain::translation_cache::{
    CacheEntry, TranslationCache, TranslationCacheConfig, WriteFailurePolicy,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{
    record_backend_request, record_cache_lookup, record_cache_write_failure, Backend,
};

/// Result of translating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translation: String,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

/// Trait for translation service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationServiceTrait: Send + Sync {
    /// Translate a request, reusing cached sentence translations
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, DomainError>;
}

/// Cache orchestrator in front of the embedding and translation backends
pub struct TranslationService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    translation_provider: Arc<dyn TranslationProvider>,
    cache: Arc<dyn TranslationCache>,
    splitter: SentenceSplitter,
    config: TranslationCacheConfig,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("splitter", &self.splitter)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TranslationService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        translation_provider: Arc<dyn TranslationProvider>,
        cache: Arc<dyn TranslationCache>,
    ) -> Self {
        Self::with_config(
            embedding_provider,
            translation_provider,
            cache,
            TranslationCacheConfig::default(),
        )
    }

    pub fn with_config(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        translation_provider: Arc<dyn TranslationProvider>,
        cache: Arc<dyn TranslationCache>,
        config: TranslationCacheConfig,
    ) -> Self {
        Self {
            embedding_provider,
            translation_provider,
            cache,
            splitter: SentenceSplitter::new(config.delimiter.clone()),
            config,
        }
    }

    /// Translate `request` sentence by sentence.
    ///
    /// Every sentence is embedded before the cache is touched, so an
    /// embedding failure leaves the store unchanged. Sentences are then
    /// resolved in order; a repeated sentence hits what its first
    /// occurrence wrote. Any failure aborts the whole request.
    #[instrument(
        skip(self, request),
        fields(languages = %request.languages(), text_len = request.text.len())
    )]
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, DomainError> {
        request.validate()?;

        let languages = request.languages();
        let units = self.splitter.split(&request.text);
        let embeddings = self.embed_units(&units).await?;

        let mut translated = Vec::with_capacity(units.len());
        let mut cache_hits = 0;

        for (unit, embedding) in units.iter().zip(embeddings) {
            let (text, hit) = self.resolve_unit(unit, embedding, &languages).await?;

            if hit {
                cache_hits += 1;
            }
            translated.push(text);
        }

        let outcome = TranslationOutcome {
            translation: self.splitter.join(&translated),
            cache_hits,
            cache_misses: units.len() - cache_hits,
        };

        info!(
            units = units.len(),
            hits = outcome.cache_hits,
            misses = outcome.cache_misses,
            "Translation completed"
        );

        Ok(outcome)
    }

    async fn embed_units(&self, units: &[TranslationUnit]) -> Result<Vec<Embedding>, DomainError> {
        // A closure borrowing `self` inside the stream is not `Send` under async_trait
        let pending: Vec<_> = units.iter().map(|unit| self.embed_unit(unit)).collect();

        // `buffered` yields results in input order
        stream::iter(pending)
            .buffered(self.config.embedding_concurrency.max(1))
            .try_collect()
            .await
    }

    async fn embed_unit(&self, unit: &TranslationUnit) -> Result<Embedding, DomainError> {
        let start = Instant::now();
        let result = self.embedding_provider.embed(unit.text()).await;
        record_backend_request(Backend::Embedding, result.is_ok(), start.elapsed());

        result.inspect_err(|e| {
            warn!(position = unit.position(), "Failed to embed sentence: {}", e);
        })
    }

    /// Returns the translated sentence and whether it came from the cache
    async fn resolve_unit(
        &self,
        unit: &TranslationUnit,
        embedding: Embedding,
        languages: &LanguagePair,
    ) -> Result<(String, bool), DomainError> {
        let lookup = self
            .cache
            .lookup(languages, &embedding, self.config.similarity_threshold)
            .await
            .inspect_err(|e| {
                warn!(position = unit.position(), "Cache lookup failed: {}", e);
            })?;

        if let Some(hit) = lookup {
            debug!(
                position = unit.position(),
                distance = hit.distance,
                "Translation cache hit"
            );
            record_cache_lookup(true);
            return Ok((hit.target_text, true));
        }

        debug!(position = unit.position(), "Translation cache miss");
        record_cache_lookup(false);

        let start = Instant::now();
        let result = self
            .translation_provider
            .translate(unit.text(), languages)
            .await;
        record_backend_request(Backend::Translation, result.is_ok(), start.elapsed());

        let translation = result.inspect_err(|e| {
            warn!(position = unit.position(), "Failed to translate sentence: {}", e);
        })?;

        let entry = CacheEntry::new(
            languages.clone(),
            embedding,
            unit.text(),
            translation.clone(),
        );

        if let Err(e) = self.cache.insert(entry).await {
            record_cache_write_failure();

            match self.config.write_failure_policy {
                WriteFailurePolicy::FailFast => {
                    warn!(position = unit.position(), "Cache write failed: {}", e);
                    return Err(e);
                }
                WriteFailurePolicy::LogAndContinue => {
                    warn!(
                        position = unit.position(),
                        "Cache write failed, returning uncached translation: {}", e
                    );
                }
            }
        }

        Ok((translation, false))
    }
}

#[async_trait]
impl TranslationServiceTrait for TranslationService {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, DomainError> {
        TranslationService::translate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::translation::MockTranslationProvider;
    use crate::domain::translation_cache::{CacheHit, MockTranslationCache};
    use crate::infrastructure::translation_cache::InMemoryTranslationCache;

    /// Embedding backend answering from a fixed table
    #[derive(Default)]
    struct ScriptedEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        delays: HashMap<String, Duration>,
        calls: AtomicUsize,
    }

    impl ScriptedEmbedder {
        fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.to_string(), vector);
            self
        }

        fn with_delay(mut self, text: &str, delay: Duration) -> Self {
            self.delays.insert(text.to_string(), delay);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for ScriptedEmbedder {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(text) {
                tokio::time::sleep(*delay).await;
            }

            self.vectors
                .get(text)
                .map(|v| Embedding::new(v.clone()))
                .ok_or_else(|| DomainError::embedding_unavailable(format!("no vector for {text}")))
        }
    }

    /// Translation backend answering from a fixed (text, target) table
    #[derive(Default)]
    struct ScriptedTranslator {
        translations: HashMap<(String, String), String>,
        calls: AtomicUsize,
    }

    impl ScriptedTranslator {
        fn with(mut self, text: &str, target: &str, translation: &str) -> Self {
            self.translations
                .insert((text.to_string(), target.to_string()), translation.to_string());
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for ScriptedTranslator {
        async fn translate(
            &self,
            text: &str,
            languages: &LanguagePair,
        ) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            self.translations
                .get(&(text.to_string(), languages.target().to_string()))
                .cloned()
                .ok_or_else(|| {
                    DomainError::translation_unavailable(format!("no translation for {text}"))
                })
        }
    }

    fn embedder() -> ScriptedEmbedder {
        ScriptedEmbedder::default()
            .with("Hello world", vec![1.0, 0.0, 0.0])
            .with("How are you.", vec![0.0, 1.0, 0.0])
            .with("Hello world!", vec![0.99, 0.05, 0.0])
            .with("Good night", vec![0.0, 0.0, 1.0])
    }

    fn translator() -> ScriptedTranslator {
        ScriptedTranslator::default()
            .with("Hello world", "fr", "Bonjour le monde")
            .with("How are you.", "fr", "Comment allez-vous.")
            .with("Good night", "fr", "Bonne nuit")
            .with("Hello world", "de", "Hallo Welt")
            .with("How are you.", "de", "Wie geht es dir.")
    }

    struct Harness {
        embedder: Arc<ScriptedEmbedder>,
        translator: Arc<ScriptedTranslator>,
        cache: Arc<InMemoryTranslationCache>,
        service: TranslationService,
    }

    fn harness_with(embedder: ScriptedEmbedder, config: TranslationCacheConfig) -> Harness {
        let embedder = Arc::new(embedder);
        let translator = Arc::new(translator());
        let cache = Arc::new(InMemoryTranslationCache::new());
        let service = TranslationService::with_config(
            embedder.clone(),
            translator.clone(),
            cache.clone(),
            config,
        );

        Harness {
            embedder,
            translator,
            cache,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(embedder(), TranslationCacheConfig::default())
    }

    fn request(text: &str, target: &str) -> TranslationRequest {
        TranslationRequest::new(text, "en", target)
    }

    #[tokio::test]
    async fn test_first_request_misses_and_populates_cache() {
        let h = harness();

        let outcome = h
            .service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Comment allez-vous.");
        assert_eq!(outcome.cache_misses, 2);
        assert_eq!(outcome.cache_hits, 0);
        assert_eq!(h.translator.calls(), 2);
        assert_eq!(h.cache.len(), 2);

        let stored = h.cache.entries();
        assert_eq!(stored[0].source_text(), "Hello world");
        assert_eq!(stored[0].target_text(), "Bonjour le monde");
        assert_eq!(stored[1].source_text(), "How are you.");
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache() {
        let h = harness();
        let req = request("Hello world. How are you.", "fr");

        h.service.translate(&req).await.unwrap();
        let outcome = h.service.translate(&req).await.unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Comment allez-vous.");
        assert_eq!(outcome.cache_hits, 2);
        assert_eq!(outcome.cache_misses, 0);
        assert_eq!(h.translator.calls(), 2);
        assert_eq!(h.embedder.calls(), 4);
        assert_eq!(h.cache.len(), 2);
    }

    #[tokio::test]
    async fn test_similar_sentence_reuses_cached_translation() {
        let h = harness();

        h.service
            .translate(&request("Hello world", "fr"))
            .await
            .unwrap();
        let outcome = h
            .service
            .translate(&request("Hello world!", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde");
        assert_eq!(outcome.cache_hits, 1);
        assert_eq!(h.translator.calls(), 1);
    }

    #[tokio::test]
    async fn test_partial_hit_translates_only_new_sentences() {
        let h = harness();

        h.service
            .translate(&request("Hello world", "fr"))
            .await
            .unwrap();
        let outcome = h
            .service
            .translate(&request("Hello world. Good night", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Bonne nuit");
        assert_eq!(outcome.cache_hits, 1);
        assert_eq!(outcome.cache_misses, 1);
        assert_eq!(h.translator.calls(), 2);
    }

    #[tokio::test]
    async fn test_language_pairs_are_isolated() {
        let h = harness();

        h.service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap();
        let outcome = h
            .service
            .translate(&request("Hello world. How are you.", "de"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Hallo Welt. Wie geht es dir.");
        assert_eq!(outcome.cache_misses, 2);
        assert_eq!(h.translator.calls(), 4);
        assert_eq!(h.cache.len(), 4);
    }

    #[tokio::test]
    async fn test_repeated_sentence_hits_within_one_request() {
        let h = harness();

        let outcome = h
            .service
            .translate(&request("Hello world. Hello world", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Bonjour le monde");
        assert_eq!(outcome.cache_misses, 1);
        assert_eq!(outcome.cache_hits, 1);
        assert_eq!(h.translator.calls(), 1);
        assert_eq!(h.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_embedding_preserves_order() {
        let embedder = embedder()
            .with_delay("Hello world", Duration::from_millis(30))
            .with_delay("How are you.", Duration::from_millis(10));
        let config = TranslationCacheConfig::default().with_embedding_concurrency(3);
        let h = harness_with(embedder, config);

        let outcome = h
            .service
            .translate(&request("Hello world. How are you.. Good night", "fr"))
            .await
            .unwrap();

        assert_eq!(
            outcome.translation,
            "Bonjour le monde. Comment allez-vous.. Bonne nuit"
        );
        let sources: Vec<String> = h
            .cache
            .entries()
            .iter()
            .map(|e| e.source_text().to_string())
            .collect();
        assert_eq!(sources, vec!["Hello world", "How are you.", "Good night"]);
    }

    #[tokio::test]
    async fn test_invalid_request_touches_nothing() {
        let mut embedding = MockEmbeddingProvider::new();
        embedding.expect_embed().never();
        let mut translation = MockTranslationProvider::new();
        translation.expect_translate().never();
        let mut cache = MockTranslationCache::new();
        cache.expect_lookup().never();
        cache.expect_insert().never();

        let service =
            TranslationService::new(Arc::new(embedding), Arc::new(translation), Arc::new(cache));

        for req in [
            request("", "fr"),
            TranslationRequest::new("Hello", "", "fr"),
            TranslationRequest::new("Hello", "en", ""),
        ] {
            let err = service.translate(&req).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidRequest { .. }));
        }
    }

    #[tokio::test]
    async fn test_embedding_failure_aborts_before_store_access() {
        let mut embedding = MockEmbeddingProvider::new();
        embedding.expect_embed().times(2).returning(|text| {
            if text == "How are you." {
                Err(DomainError::embedding_unavailable("connection refused"))
            } else {
                Ok(Embedding::new(vec![1.0, 0.0, 0.0]))
            }
        });
        let mut translation = MockTranslationProvider::new();
        translation.expect_translate().never();
        let mut cache = MockTranslationCache::new();
        cache.expect_lookup().never();
        cache.expect_insert().never();

        let service =
            TranslationService::new(Arc::new(embedding), Arc::new(translation), Arc::new(cache));

        let err = service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmbeddingUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_store_read_failure_aborts_request() {
        let mut translation = MockTranslationProvider::new();
        translation.expect_translate().never();
        let mut cache = MockTranslationCache::new();
        cache
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Err(DomainError::store_read("relation does not exist")));
        cache.expect_insert().never();

        let service = TranslationService::new(
            Arc::new(embedder()),
            Arc::new(translation),
            Arc::new(cache),
        );

        let err = service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::StoreRead { .. }));
    }

    #[tokio::test]
    async fn test_translation_failure_writes_nothing() {
        let mut translation = MockTranslationProvider::new();
        translation
            .expect_translate()
            .times(1)
            .returning(|_, _| Err(DomainError::translation_unavailable("timed out")));
        let cache = Arc::new(InMemoryTranslationCache::new());

        let service =
            TranslationService::new(Arc::new(embedder()), Arc::new(translation), cache.clone());

        let err = service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::TranslationUnavailable { .. }));
        assert!(cache.is_empty());
    }

    fn failing_write_cache() -> MockTranslationCache {
        let mut cache = MockTranslationCache::new();
        cache.expect_lookup().returning(|_, _, _| Ok(None));
        cache
            .expect_insert()
            .returning(|_| Err(DomainError::store_write("disk full")));
        cache
    }

    #[tokio::test]
    async fn test_write_failure_fails_fast_by_default() {
        let translator = Arc::new(translator());
        let service = TranslationService::new(
            Arc::new(embedder()),
            translator.clone(),
            Arc::new(failing_write_cache()),
        );

        let err = service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::StoreWrite { .. }));
        assert_eq!(translator.calls(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_can_be_tolerated() {
        let config = TranslationCacheConfig::default()
            .with_write_failure_policy(WriteFailurePolicy::LogAndContinue);
        let service = TranslationService::with_config(
            Arc::new(embedder()),
            Arc::new(translator()),
            Arc::new(failing_write_cache()),
            config,
        );

        let outcome = service
            .translate(&request("Hello world. How are you.", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Comment allez-vous.");
        assert_eq!(outcome.cache_misses, 2);
    }

    #[tokio::test]
    async fn test_hit_uses_configured_threshold_and_skips_write() {
        let mut translation = MockTranslationProvider::new();
        translation.expect_translate().never();
        let mut cache = MockTranslationCache::new();
        cache
            .expect_lookup()
            .times(1)
            .returning(|languages, _, threshold| {
                assert_eq!(languages, &LanguagePair::new("en", "fr"));
                assert_eq!(threshold, 0.25);
                Ok(Some(CacheHit::new("Bonjour le monde", 0.2)))
            });
        cache.expect_insert().never();

        let config = TranslationCacheConfig::default().with_similarity_threshold(0.25);
        let service = TranslationService::with_config(
            Arc::new(embedder()),
            Arc::new(translation),
            Arc::new(cache),
            config,
        );

        let outcome = service
            .translate(&request("Hello world", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde");
        assert_eq!(outcome.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_service_runs_behind_shared_trait_object() {
        let config = TranslationCacheConfig::default().with_embedding_concurrency(2);
        let h = harness_with(embedder(), config);
        let service: Arc<dyn TranslationServiceTrait> = Arc::new(h.service);

        let outcome = tokio::spawn(async move {
            service
                .translate(&request("Hello world. How are you.", "fr"))
                .await
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde. Comment allez-vous.");
    }

    #[test]
    fn test_client_languages_do_not_grow_metric_series() {
        let mut translation = MockTranslationProvider::new();
        translation
            .expect_translate()
            .returning(|_, languages| Ok(format!("in {}", languages.target())));
        let service = TranslationService::new(
            Arc::new(embedder()),
            Arc::new(translation),
            Arc::new(InMemoryTranslationCache::new()),
        );

        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            futures::executor::block_on(async {
                for i in 0..50 {
                    let req = TranslationRequest::new("Hello world", format!("src-{i}"), "fr");
                    service.translate(&req).await.unwrap();
                }
            })
        });

        let miss_series = handle
            .render()
            .lines()
            .filter(|line| line.starts_with("translation_cache_misses_total"))
            .count();
        assert_eq!(miss_series, 1);
    }

    #[tokio::test]
    async fn test_custom_delimiter() {
        let embedder = ScriptedEmbedder::default()
            .with("Hello world", vec![1.0, 0.0, 0.0])
            .with("Good night", vec![0.0, 0.0, 1.0]);
        let config = TranslationCacheConfig::default().with_delimiter("\n");
        let h = harness_with(embedder, config);

        let outcome = h
            .service
            .translate(&request("Hello world\nGood night", "fr"))
            .await
            .unwrap();

        assert_eq!(outcome.translation, "Bonjour le monde\nBonne nuit");
    }
}
