//! Transcription domain module

mod audio_buffer;
mod transcript;

pub use audio_buffer::{AudioBuffer, WAV_MIME_TYPE};
pub use transcript::Transcript;
