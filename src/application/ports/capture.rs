//! Audio capture port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::AudioBuffer;

/// Device acquisition and capture errors
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Microphone access denied")]
    PermissionDenied,

    #[error("No audio input device available")]
    NoDevice,

    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
}

/// Port for acquiring the microphone
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Acquire the input device and start accumulating chunks.
    ///
    /// # Returns
    /// A live capture stream, or the reason acquisition failed
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, DeviceError>;
}

/// A live input stream.
///
/// Owned exclusively by the active recording session. It is halted and
/// released exactly once, whichever path ends the recording.
#[async_trait]
pub trait CaptureStream: Send + Sync {
    /// Stop the device and assemble the accumulated chunks into one WAV
    /// buffer. A stream halted immediately yields an empty buffer.
    async fn halt(&mut self) -> Result<AudioBuffer, DeviceError>;

    /// Release the underlying device handle.
    async fn release(&mut self);
}
