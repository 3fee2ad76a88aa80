//! tr-lemmatizer - Turkish lemmatization service
//!
//! Every request flows through the same short pipeline:
//! Text -> Tokenizer -> MorphAnalyzer (per token) -> LemmaPolicy -> Response
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tr_lemmatizer::morphology::TurkishAnalyzer;
//! use tr_lemmatizer::pipeline::{LemmaRequest, Lemmatizer};
//! use tr_lemmatizer::selector::PosPreferring;
//!
//! let analyzer = TurkishAnalyzer::load("data", ".cache/tr-lemmatizer").unwrap();
//! let lemmatizer = Lemmatizer::new(Arc::new(analyzer), Arc::new(PosPreferring));
//! let response = lemmatizer
//!     .lemmatize(&LemmaRequest::from_text("Kitabı okudum"))
//!     .unwrap();
//! assert_eq!(response.lemmas, vec!["kitap", "okumak"]);
//! ```

// Environment configuration
pub mod config;

// HTTP error mapping
pub mod error;

// HTTP surface
pub mod handlers;
pub mod router;

// Morphological analysis provider
pub mod morphology;

// Request orchestration
pub mod pipeline;

// Lemma disambiguation policies
pub mod selector;

// Whitespace tokenizer
pub mod tokenizer;
