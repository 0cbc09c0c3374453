//! Shared state for request handlers

use std::sync::Arc;
use std::time::Duration;

use crate::domain::knowledge_base::VectorStore;
use crate::domain::Deadline;
use crate::infrastructure::services::AnswerService;
use crate::AppContext;

/// What the handlers need from the application context
#[derive(Debug, Clone)]
pub struct AppState {
    pub answers: Arc<AnswerService>,
    pub store: Arc<dyn VectorStore>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        answers: Arc<AnswerService>,
        store: Arc<dyn VectorStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            answers,
            store,
            request_timeout,
        }
    }

    /// Fresh deadline for one request
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}

impl From<&AppContext> for AppState {
    fn from(context: &AppContext) -> Self {
        Self::new(
            context.answers.clone(),
            context.store.clone(),
            context.config.timeouts.request(),
        )
    }
}
