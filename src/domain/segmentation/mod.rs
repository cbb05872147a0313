//! Sentence segmentation and reassembly
//!
//! Input text is cut into translation units on a fixed delimiter and the
//! per-unit results are joined back with the same delimiter.

mod splitter;
mod unit;

pub use splitter::{SentenceSplitter, DEFAULT_SENTENCE_DELIMITER};
pub use unit::TranslationUnit;
