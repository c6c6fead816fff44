//! Frame and clip types for captured audio.
//!
//! An [`AudioFrame`] is one slice of microphone audio as delivered by the
//! capture ingress; frames are folded into an [`AudioClip`], the unit
//! submitted to the transcription service, and not retained afterwards.

use std::time::Instant;

/// One slice of captured audio with its format metadata.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Audio samples as 16-bit PCM.
    pub samples: Vec<i16>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Timestamp when the audio was captured.
    pub timestamp: Instant,
}

impl AudioFrame {
    /// Creates a new audio frame captured now.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
            timestamp: Instant::now(),
        }
    }

    /// Returns the duration of this frame in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0;
        }
        (self.samples.len() as u32 * 1000) / (self.sample_rate * self.channels as u32)
    }

    /// Returns true if this frame has the same format as the other.
    pub fn format_matches(&self, other: &AudioFrame) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }
}

/// Concatenation of zero or more audio frames into one continuous buffer.
///
/// Built fresh each pipeline iteration and discarded after the
/// transcription attempt. Format metadata comes from the first frame
/// appended; frames with a different format are rejected by the batcher.
#[derive(Debug, Clone, Default)]
pub struct AudioClip {
    /// Combined audio samples.
    pub samples: Vec<i16>,
    /// Sample rate in Hz (0 until the first frame is appended).
    pub sample_rate: u32,
    /// Number of interleaved channels (0 until the first frame is appended).
    pub channels: u16,
}

impl AudioClip {
    /// Creates an empty clip with no format yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends a frame's samples, adopting its format if the clip is empty.
    ///
    /// Returns false (leaving the clip unchanged) if the frame's format
    /// differs from the format already adopted.
    pub fn append(&mut self, frame: &AudioFrame) -> bool {
        if self.is_empty() {
            self.sample_rate = frame.sample_rate;
            self.channels = frame.channels;
        } else if self.sample_rate != frame.sample_rate || self.channels != frame.channels {
            return false;
        }
        self.samples.extend_from_slice(&frame.samples);
        true
    }

    /// Returns the duration of this clip in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0;
        }
        (self.samples.len() as u32 * 1000) / (self.sample_rate * self.channels as u32)
    }
}
