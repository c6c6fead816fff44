use crate::audio::frame::AudioClip;
use crate::error::{Result, TelepromptError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real network service vs mock).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio clip to text.
    ///
    /// An `Ok` with an empty string means the service detected no speech;
    /// an `Err` means the request itself failed. The pipeline treats both
    /// as "no new text this iteration".
    async fn transcribe(&self, clip: &AudioClip) -> Result<String>;
}

/// Implement Transcriber for Arc<T> to allow sharing across tasks.
#[async_trait]
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        (**self).transcribe(clip).await
    }
}

/// One scripted mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Text(String),
    Failure(String),
}

/// Mock transcriber for testing.
///
/// Returns scripted outcomes in order; once the script is exhausted it
/// reports no speech (empty text).
#[derive(Default)]
pub struct MockTranscriber {
    script: Mutex<VecDeque<MockOutcome>>,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful transcription result.
    pub fn then_text(self, text: &str) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(MockOutcome::Text(text.to_string()));
        self
    }

    /// Queues a transcription failure.
    pub fn then_failure(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(MockOutcome::Failure(message.to_string()));
        self
    }

    /// Number of transcription calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _clip: &AudioClip) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match outcome {
            Some(MockOutcome::Text(text)) => Ok(text),
            Some(MockOutcome::Failure(message)) => {
                Err(TelepromptError::Transcription { message })
            }
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::frame::AudioFrame;

    fn clip() -> AudioClip {
        let mut c = AudioClip::empty();
        c.append(&AudioFrame::new(vec![1i16; 160], 16000, 1));
        c
    }

    #[tokio::test]
    async fn test_mock_returns_scripted_text() {
        let mock = MockTranscriber::new().then_text("hello world");
        assert_eq!(mock.transcribe(&clip()).await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_mock_returns_scripted_failure() {
        let mock = MockTranscriber::new().then_failure("service down");
        let err = mock.transcribe(&clip()).await.unwrap_err();
        assert!(err.to_string().contains("service down"));
    }

    #[tokio::test]
    async fn test_mock_script_order() {
        let mock = MockTranscriber::new()
            .then_text("first")
            .then_failure("oops")
            .then_text("second");

        assert_eq!(mock.transcribe(&clip()).await.unwrap(), "first");
        assert!(mock.transcribe(&clip()).await.is_err());
        assert_eq!(mock.transcribe(&clip()).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_mock_exhausted_script_reports_no_speech() {
        let mock = MockTranscriber::new();
        assert_eq!(mock.transcribe(&clip()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockTranscriber::new().then_text("a").then_text("b");
        assert_eq!(mock.call_count(), 0);
        let _ = mock.transcribe(&clip()).await;
        let _ = mock.transcribe(&clip()).await;
        let _ = mock.transcribe(&clip()).await;
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_arc_blanket_impl() {
        let mock = Arc::new(MockTranscriber::new().then_text("shared"));
        assert_eq!(mock.transcribe(&clip()).await.unwrap(), "shared");
    }
}
