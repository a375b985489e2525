//! Shared application state accessible from all handlers.

use crate::config::Options;
use crate::session::SessionStore;
use crate::summarize::Summarizer;
use std::sync::Arc;

pub struct AppState {
    pub options: Options,
    pub sessions: SessionStore,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(options: Options, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            options,
            sessions: SessionStore::new(),
            summarizer,
        }
    }
}
