//! Capture ingress: how microphone audio enters the pipeline.
//!
//! The capture device itself belongs to the host (browser session, desktop
//! capture layer). The pipeline only sees the [`CaptureIngress`] trait: an
//! activity flag and a bounded wait for buffered frames.

use crate::audio::frame::AudioFrame;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Trait for the audio capture side of the pipeline.
///
/// This trait allows swapping implementations (host-fed channel vs mock).
#[async_trait]
pub trait CaptureIngress: Send + Sync {
    /// Returns true while a capture session is delivering audio.
    fn is_active(&self) -> bool;

    /// Collects all currently buffered frames, waiting up to `timeout`
    /// for the first one.
    ///
    /// An empty result is not an error; it means no audio arrived within
    /// the window and the caller should skip transcription this iteration.
    async fn next_frames(&self, timeout: Duration) -> Vec<AudioFrame>;
}

/// Implement CaptureIngress for Arc<T> so one ingress can be shared
/// between the pipeline loop and the duration tracker.
#[async_trait]
impl<T: CaptureIngress + ?Sized> CaptureIngress for Arc<T> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    async fn next_frames(&self, timeout: Duration) -> Vec<AudioFrame> {
        (**self).next_frames(timeout).await
    }
}

/// Host-facing side of a channel-backed ingress.
///
/// The host pushes frames from its capture callback and toggles the
/// activity flag when the microphone starts or stops.
#[derive(Clone)]
pub struct CaptureHandle {
    tx: mpsc::UnboundedSender<AudioFrame>,
    active: Arc<AtomicBool>,
}

impl CaptureHandle {
    /// Marks the capture session active or inactive.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Pushes one captured frame into the ingress buffer.
    ///
    /// Returns false if the pipeline side has been dropped.
    pub fn push_frame(&self, frame: AudioFrame) -> bool {
        self.tx.send(frame).is_ok()
    }
}

/// Channel-backed capture ingress for embedding in a host process.
pub struct ChannelIngress {
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<AudioFrame>>,
    active: Arc<AtomicBool>,
}

impl ChannelIngress {
    /// Creates a connected (handle, ingress) pair. The session starts
    /// inactive; the host flips the flag when capture begins.
    pub fn channel() -> (CaptureHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let active = Arc::new(AtomicBool::new(false));
        let handle = CaptureHandle {
            tx,
            active: active.clone(),
        };
        let ingress = Self {
            rx: tokio::sync::Mutex::new(rx),
            active,
        };
        (handle, ingress)
    }
}

#[async_trait]
impl CaptureIngress for ChannelIngress {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn next_frames(&self, timeout: Duration) -> Vec<AudioFrame> {
        let mut rx = self.rx.lock().await;
        let mut frames = Vec::new();

        // Bounded wait for the first frame, then drain whatever is buffered.
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(first)) => frames.push(first),
            Ok(None) | Err(_) => return frames,
        }

        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }

        frames
    }
}

/// Mock ingress for testing.
///
/// Scripted with a fixed number of positive activity checks and a queue of
/// frame batches, so tests can drive the pipeline one iteration at a time.
#[derive(Default)]
pub struct MockIngress {
    batches: std::sync::Mutex<VecDeque<Vec<AudioFrame>>>,
    remaining_active_checks: AtomicUsize,
}

impl MockIngress {
    /// Creates a mock that reports inactive from the first check.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Creates a mock that reports active for the next `checks` calls
    /// to `is_active`, then inactive.
    pub fn active_for(checks: usize) -> Self {
        Self {
            batches: std::sync::Mutex::new(VecDeque::new()),
            remaining_active_checks: AtomicUsize::new(checks),
        }
    }

    /// Queues a batch of frames to be returned by the next `next_frames` call.
    pub fn push_batch(&self, frames: Vec<AudioFrame>) {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(frames);
    }
}

#[async_trait]
impl CaptureIngress for MockIngress {
    fn is_active(&self) -> bool {
        // Each check consumes one scripted "active" slot.
        self.remaining_active_checks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    async fn next_frames(&self, _timeout: Duration) -> Vec<AudioFrame> {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_default()
    }
}
