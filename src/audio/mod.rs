//! Audio types and capture ingress.

pub mod frame;
pub mod ingress;
pub mod wav;

pub use frame::{AudioClip, AudioFrame};
pub use ingress::{CaptureHandle, CaptureIngress, ChannelIngress, MockIngress};
