//! Transcription client port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{AudioBuffer, Transcript};

/// Failure outcomes of a transcription exchange
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    /// The server rejected this client's protocol version. Not retryable:
    /// the user has to update the client.
    #[error("Server requires version {server_version}, this client is {client_version}")]
    VersionMismatch {
        server_version: String,
        client_version: String,
    },

    /// A well-formed failure response from the server
    #[error("Server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The exchange itself failed: network unreachable, malformed body
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Port for shipping a finalized recording to the transcription service
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Send the buffer and classify the reply.
    ///
    /// Resolves exactly once per call and never retries. Every failure
    /// comes back as a value; nothing panics across this boundary.
    async fn send_audio(&self, audio: &AudioBuffer) -> Result<Transcript, TranscribeError>;
}
