pub mod health;
pub mod lemmatize;

use std::sync::Arc;

use crate::pipeline::Lemmatizer;

/// Shared handler state. The lemmatizer is built once at start-up and only
/// ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub lemmatizer: Arc<Lemmatizer>,
}

impl AppState {
    pub fn new(lemmatizer: Lemmatizer) -> Self {
        Self {
            lemmatizer: Arc::new(lemmatizer),
        }
    }
}
