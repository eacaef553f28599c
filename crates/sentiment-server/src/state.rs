//! Immutable service context shared by every handler.

use std::sync::Arc;

use sentiment_ai::Classifier;

/// Built once at startup; cloning only bumps the reference count.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }
}
