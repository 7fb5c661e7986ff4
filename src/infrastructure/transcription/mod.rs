//! Transcription service adapters

mod http;

pub use http::{HttpTranscriptionClient, CLIENT_VERSION};
