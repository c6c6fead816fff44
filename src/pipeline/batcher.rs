//! Frame batcher: folds buffered capture frames into one clip.
//!
//! Decouples frame arrival rate from iteration rate. The bounded wait
//! means the pipeline always makes progress even when audio is sparse;
//! an empty batch is a normal no-op iteration, not an error.

use crate::audio::frame::AudioClip;
use crate::audio::ingress::CaptureIngress;
use std::time::Duration;
use tracing::warn;

/// Collects currently buffered frames into a single clip per iteration.
#[derive(Debug, Clone, Copy)]
pub struct FrameBatcher {
    timeout: Duration,
}

impl FrameBatcher {
    /// Creates a batcher with the given bounded wait per iteration.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Drains available frames into one clip, in arrival order.
    ///
    /// The clip adopts the format of the first frame; frames within one
    /// batch are expected to be homogeneous, so any frame with a
    /// different format is dropped and logged.
    pub async fn collect<I: CaptureIngress>(&self, ingress: &I) -> AudioClip {
        let frames = ingress.next_frames(self.timeout).await;

        let mut clip = AudioClip::empty();
        let mut dropped = 0usize;
        for frame in &frames {
            if !clip.append(frame) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(
                dropped,
                sample_rate = clip.sample_rate,
                channels = clip.channels,
                "dropped frames with mismatched audio format"
            );
        }

        clip
    }
}
