//! WAV encoding for transcription uploads.
//!
//! The transcription service accepts standard audio containers; clips are
//! encoded in-memory as 16-bit PCM WAV before submission.

use crate::audio::frame::AudioClip;
use crate::error::{Result, TelepromptError};
use std::io::Cursor;

/// Encodes a clip as a WAV file held in memory.
///
/// The clip must be non-empty; empty clips are skipped by the pipeline
/// before encoding is ever attempted.
pub fn encode_clip(clip: &AudioClip) -> Result<Vec<u8>> {
    if clip.is_empty() {
        return Err(TelepromptError::AudioEncoding {
            message: "cannot encode an empty clip".to_string(),
        });
    }

    let spec = hound::WavSpec {
        channels: clip.channels,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| TelepromptError::AudioEncoding {
                message: format!("Failed to create WAV writer: {}", e),
            })?;

        for &sample in &clip.samples {
            writer
                .write_sample(sample)
                .map_err(|e| TelepromptError::AudioEncoding {
                    message: format!("Failed to write WAV sample: {}", e),
                })?;
        }

        writer
            .finalize()
            .map_err(|e| TelepromptError::AudioEncoding {
                message: format!("Failed to finalize WAV data: {}", e),
            })?;
    }

    Ok(cursor.into_inner())
}
