//! Transcription protocol integration tests
//!
//! A wiremock server stands in for the transcription service so every
//! classification branch of the client is exercised for real over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voicepost::application::ports::{
    AudioCapture, CaptureStream, DeviceError, TranscribeError, TranscriptionClient,
};
use voicepost::application::{AttemptCallbacks, AttemptError, RecordingController};
use voicepost::domain::recording::Duration;
use voicepost::domain::transcription::{AudioBuffer, Transcript};
use voicepost::infrastructure::HttpTranscriptionClient;

fn client_for(server: &MockServer) -> HttpTranscriptionClient {
    HttpTranscriptionClient::with_version(server.uri(), "1234567890", "1.0.0")
}

fn wav_buffer() -> AudioBuffer {
    // Keep the payload ASCII so multipart body matchers can see it
    AudioBuffer::new(b"RIFFfake-wav-payload".to_vec())
}

#[tokio::test]
async fn success_response_maps_to_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transcription": "hello world",
            "category": "greeting",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).send_audio(&wav_buffer()).await.unwrap();

    assert_eq!(result.text, "hello world");
    assert_eq!(result.category.as_deref(), Some("greeting"));
}

#[tokio::test]
async fn success_without_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transcription": "hello world",
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).send_audio(&wav_buffer()).await.unwrap();

    assert_eq!(result.text, "hello world");
    assert!(result.category.is_none());
}

#[tokio::test]
async fn request_carries_protocol_headers_and_audio_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .and(header("X-Frontend-Version", "1.0.0"))
        .and(header("X-User-ID", "1234567890"))
        .and(body_string_contains("name=\"audio\""))
        .and(body_string_contains("filename=\"recording.wav\""))
        .and(body_string_contains("audio/wav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transcription": "ok",
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).send_audio(&wav_buffer()).await.unwrap();
}

#[tokio::test]
async fn status_426_maps_to_version_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(426).set_body_json(serde_json::json!({
            "error": "stale client",
            "serverVersion": "2.0.0",
            "frontendVersion": "1.0.0",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_audio(&wav_buffer())
        .await
        .unwrap_err();

    match err {
        TranscribeError::VersionMismatch {
            server_version,
            client_version,
        } => {
            assert_eq!(server_version, "2.0.0");
            assert_eq!(client_version, "1.0.0");
        }
        other => panic!("Expected version mismatch, got: {:?}", other),
    }
}

#[tokio::test]
async fn other_failure_status_maps_to_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(500).set_body_string("transcription backend down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_audio(&wav_buffer())
        .await
        .unwrap_err();

    match err {
        TranscribeError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "transcription backend down");
        }
        other => panic!("Expected server error, got: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_endpoint_maps_to_transport_error() {
    // Start a server only to grab a port nothing is listening on anymore
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpTranscriptionClient::with_version(uri, "1234567890", "1.0.0");
    let err = client.send_audio(&wav_buffer()).await.unwrap_err();

    assert!(matches!(err, TranscribeError::Transport(_)));
}

#[tokio::test]
async fn transport_error_still_releases_the_stream_once() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let capture = FakeCapture::new();
    let releases = Arc::clone(&capture.releases);
    let client = HttpTranscriptionClient::with_version(uri, "1234567890", "1.0.0");
    let controller = RecordingController::new(capture, client, Duration::from_secs(5));

    let (_tx, rx) = stopped_receiver();
    let result = controller.run(rx, AttemptCallbacks::default()).await;

    assert!(matches!(
        result,
        Err(AttemptError::Transcribe(TranscribeError::Transport(_)))
    ));
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_success_body_maps_to_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_audio(&wav_buffer())
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribeError::Transport(_)));
}

// End-to-end controller tests against the mocked endpoint

struct FakeStream {
    releases: Arc<AtomicUsize>,
}

#[async_trait]
impl CaptureStream for FakeStream {
    async fn halt(&mut self) -> Result<AudioBuffer, DeviceError> {
        Ok(wav_buffer())
    }

    async fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

struct FakeCapture {
    releases: Arc<AtomicUsize>,
}

impl FakeCapture {
    fn new() -> Self {
        Self {
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AudioCapture for FakeCapture {
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, DeviceError> {
        Ok(Box::new(FakeStream {
            releases: Arc::clone(&self.releases),
        }))
    }
}

fn stopped_receiver() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    tx.send(true).expect("receiver alive");
    (tx, rx)
}

#[tokio::test]
async fn completion_callback_receives_text_and_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transcription": "hello world",
            "category": "greeting",
        })))
        .mount(&server)
        .await;

    let capture = FakeCapture::new();
    let releases = Arc::clone(&capture.releases);
    let controller =
        RecordingController::new(capture, client_for(&server), Duration::from_secs(5));

    let received: Arc<Mutex<Option<Transcript>>> = Arc::new(Mutex::new(None));
    let received_cb = Arc::clone(&received);
    let callbacks = AttemptCallbacks {
        on_transcription_complete: Some(Box::new(move |transcript| {
            *received_cb.lock().unwrap() = Some(transcript.clone());
        })),
        ..Default::default()
    };

    let (_tx, rx) = stopped_receiver();
    controller.run(rx, callbacks).await.unwrap();

    let transcript = received.lock().unwrap().clone().unwrap();
    assert_eq!(transcript.text, "hello world");
    assert_eq!(transcript.category.as_deref(), Some("greeting"));
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn version_mismatch_never_invokes_completion_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(426).set_body_json(serde_json::json!({
            "error": "stale client",
            "serverVersion": "2.0.0",
            "frontendVersion": "1.0.0",
        })))
        .mount(&server)
        .await;

    let capture = FakeCapture::new();
    let releases = Arc::clone(&capture.releases);
    let controller =
        RecordingController::new(capture, client_for(&server), Duration::from_secs(5));

    let invoked = Arc::new(AtomicUsize::new(0));
    let invoked_cb = Arc::clone(&invoked);
    let callbacks = AttemptCallbacks {
        on_transcription_complete: Some(Box::new(move |_| {
            invoked_cb.fetch_add(1, Ordering::SeqCst);
        })),
        ..Default::default()
    };

    let (_tx, rx) = stopped_receiver();
    let result = controller.run(rx, callbacks).await;

    assert!(matches!(
        result,
        Err(AttemptError::Transcribe(
            TranscribeError::VersionMismatch { .. }
        ))
    ));
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
    // The device stream was still released exactly once
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}
