//! HTTP transcription service adapter

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscribeError, TranscriptionClient};
use crate::domain::transcription::{AudioBuffer, Transcript, WAV_MIME_TYPE};

/// Version string the server checks against, pinned at build time
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path of the transcription endpoint, relative to the base URL
const TRANSCRIBE_PATH: &str = "/transcribe";

/// Header carrying the client version
const VERSION_HEADER: &str = "X-Frontend-Version";

/// Header carrying the opaque client identifier
const USER_ID_HEADER: &str = "X-User-ID";

/// Field name the server expects the audio under
const AUDIO_FIELD: &str = "audio";

// Response types for the transcription API

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    transcription: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionMismatchBody {
    server_version: String,
    frontend_version: String,
}

/// Transcription client posting multipart WAV to a single endpoint.
///
/// Stateless per call: one request per finalized recording, no retries.
/// Every outcome is classified into a value here; callers never see a
/// transport-layer panic or a raw status code.
pub struct HttpTranscriptionClient {
    endpoint: String,
    client_version: String,
    user_id: String,
    client: reqwest::Client,
}

impl HttpTranscriptionClient {
    /// Create a client for the given endpoint and client identifier
    pub fn new(endpoint: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::with_version(endpoint, user_id, CLIENT_VERSION)
    }

    /// Create a client with an explicit version string
    pub fn with_version(
        endpoint: impl Into<String>,
        user_id: impl Into<String>,
        client_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_version: client_version.into(),
            user_id: user_id.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the transcription URL
    fn transcribe_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), TRANSCRIBE_PATH)
    }

    /// Build the multipart form carrying the recording
    fn build_form(&self, audio: &AudioBuffer) -> Result<reqwest::multipart::Form, TranscribeError> {
        let part = reqwest::multipart::Part::bytes(audio.data().to_vec())
            .file_name("recording.wav")
            .mime_str(WAV_MIME_TYPE)
            .map_err(|e| TranscribeError::Transport(e.to_string()))?;

        Ok(reqwest::multipart::Form::new().part(AUDIO_FIELD, part))
    }
}

#[async_trait]
impl TranscriptionClient for HttpTranscriptionClient {
    async fn send_audio(&self, audio: &AudioBuffer) -> Result<Transcript, TranscribeError> {
        let form = self.build_form(audio)?;

        let response = self
            .client
            .post(self.transcribe_url())
            .header(VERSION_HEADER, &self.client_version)
            .header(USER_ID_HEADER, &self.user_id)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscribeError::Transport(e.to_string()))?;

        let status = response.status();

        // 426 Upgrade Required: the server refuses this client version
        if status == reqwest::StatusCode::UPGRADE_REQUIRED {
            let body: VersionMismatchBody = response
                .json()
                .await
                .map_err(|e| TranscribeError::Transport(e.to_string()))?;
            return Err(TranscribeError::VersionMismatch {
                server_version: body.server_version,
                client_version: body.frontend_version,
            });
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscribeError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Transport(e.to_string()))?;

        Ok(Transcript::new(body.transcription, body.category))
    }
}
