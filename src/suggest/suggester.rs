use crate::error::{Result, TelepromptError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Trait for suggestion generation from transcript context.
///
/// This trait allows swapping implementations (real language model vs mock).
#[async_trait]
pub trait Suggester: Send + Sync {
    /// Generates a short suggestion string from the given context.
    ///
    /// The context is the unconsumed tail of the rolling transcript; the
    /// result is one tip entry, possibly bundling 1-2 categorized
    /// suggestions.
    async fn suggest(&self, context: &str) -> Result<String>;
}

/// Implement Suggester for Arc<T> to allow sharing across tasks.
#[async_trait]
impl<T: Suggester + ?Sized> Suggester for Arc<T> {
    async fn suggest(&self, context: &str) -> Result<String> {
        (**self).suggest(context).await
    }
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Tip(String),
    Failure(String),
}

/// Mock suggester for testing.
///
/// Returns scripted outcomes in order and records every context it was
/// called with, so tests can assert exactly which slice was sent.
#[derive(Default)]
pub struct MockSuggester {
    script: Mutex<VecDeque<MockOutcome>>,
    contexts: Mutex<Vec<String>>,
}

impl MockSuggester {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful suggestion.
    pub fn then_tip(self, tip: &str) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(MockOutcome::Tip(tip.to_string()));
        self
    }

    /// Queues a suggestion failure.
    pub fn then_failure(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(MockOutcome::Failure(message.to_string()));
        self
    }

    /// Contexts received so far, in call order.
    pub fn received_contexts(&self) -> Vec<String> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of suggestion calls received so far.
    pub fn call_count(&self) -> usize {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl Suggester for MockSuggester {
    async fn suggest(&self, context: &str) -> Result<String> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(context.to_string());

        let outcome = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match outcome {
            Some(MockOutcome::Tip(tip)) => Ok(tip),
            Some(MockOutcome::Failure(message)) => Err(TelepromptError::Suggestion { message }),
            None => Ok("mock suggestion".to_string()),
        }
    }
}
