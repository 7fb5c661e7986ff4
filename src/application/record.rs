//! Record-and-transcribe use case
//!
//! `RecordingController` drives one `RecordingSession` from idle back to
//! idle: it executes the effects the state machine returns against the
//! injected capture and transcription ports, owns the one-second timer and
//! the manual stop signal, and forwards the classified outcome upward
//! without inspecting it.

use std::time::Duration as StdDuration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::interval;

use crate::application::ports::{
    AudioCapture, CaptureStream, DeviceError, TranscribeError, TranscriptionClient,
};
use crate::domain::recording::{Duration, RecordingSession, SessionEffect, SessionEvent};
use crate::domain::transcription::{AudioBuffer, Transcript};

/// Errors from a recording attempt
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("Recording failed: {0}")]
    Device(#[from] DeviceError),

    #[error("Transcription failed: {0}")]
    Transcribe(#[from] TranscribeError),
}

/// Output of a completed attempt
#[derive(Debug, Clone)]
pub struct AttemptOutput {
    /// The transcription service's answer
    pub transcript: Transcript,
    /// Seconds of audio captured before the stop
    pub final_elapsed_secs: u64,
    /// Audio payload size in human-readable form
    pub audio_size: String,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct AttemptCallbacks {
    /// Called when the microphone is live
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called each second with (elapsed_secs, limit_secs)
    pub on_tick: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
    /// Called when the buffer is finalized, with its display size
    pub on_sending_start: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called only when the service answered with a transcript
    pub on_transcription_complete: Option<Box<dyn Fn(&Transcript) + Send + Sync>>,
}

/// One recording-and-transcription attempt
pub struct RecordingController<A, T>
where
    A: AudioCapture,
    T: TranscriptionClient,
{
    capture: A,
    client: T,
    limit: Duration,
}

impl<A, T> RecordingController<A, T>
where
    A: AudioCapture,
    T: TranscriptionClient,
{
    /// Create a new controller with the given recording bound
    pub fn new(capture: A, client: T, limit: Duration) -> Self {
        Self {
            capture,
            client,
            limit,
        }
    }

    /// Run one attempt to completion.
    ///
    /// Recording stops on the first of: `stop` flipping to true, or elapsed
    /// time reaching the bound (inclusive). The capture stream is halted
    /// and released before the network call starts, and released exactly
    /// once whichever path ends the recording. Once the send is in flight
    /// it always runs to completion.
    pub async fn run(
        &self,
        mut stop: watch::Receiver<bool>,
        callbacks: AttemptCallbacks,
    ) -> Result<AttemptOutput, AttemptError> {
        let mut session = RecordingSession::new(self.limit);

        session.apply(SessionEvent::StartRequested);
        let mut stream = match self.capture.acquire().await {
            Ok(stream) => {
                session.apply(SessionEvent::DeviceAcquired);
                stream
            }
            Err(err) => {
                session.apply(SessionEvent::DeviceDenied);
                return Err(err.into());
            }
        };

        if let Some(cb) = &callbacks.on_recording_start {
            cb();
        }

        let effects = self
            .record_until_stopped(&mut session, &mut stop, &callbacks)
            .await;

        // Finalization. The effect order guarantees the device is halted
        // and released before the buffer goes out; a halt failure must not
        // skip the release.
        let mut halted: Result<AudioBuffer, DeviceError> = Ok(AudioBuffer::empty());
        for effect in &effects {
            match effect {
                SessionEffect::HaltCapture => halted = stream.halt().await,
                SessionEffect::ReleaseStream => stream.release().await,
                // The timer stopped when record_until_stopped returned and
                // the dispatch happens below, after release.
                _ => {}
            }
        }
        let buffer = halted?;

        let audio_size = buffer.human_readable_size();
        if let Some(cb) = &callbacks.on_sending_start {
            cb(&audio_size);
        }

        let outcome = self.client.send_audio(&buffer).await;
        session.apply(SessionEvent::BufferDispatched);

        let transcript = outcome?;
        if let Some(cb) = &callbacks.on_transcription_complete {
            cb(&transcript);
        }

        Ok(AttemptOutput {
            transcript,
            final_elapsed_secs: session.final_elapsed_secs(),
            audio_size,
        })
    }

    /// Tick the session once per second until it finalizes, honoring the
    /// manual stop signal. Returns the finalization effects.
    async fn record_until_stopped(
        &self,
        session: &mut RecordingSession,
        stop: &mut watch::Receiver<bool>,
        callbacks: &AttemptCallbacks,
    ) -> Vec<SessionEffect> {
        let mut ticker = interval(StdDuration::from_secs(1));
        // interval fires immediately; swallow that tick so the first real
        // one lands a second in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let effects = session.apply(SessionEvent::TimerTick);
                    if let Some(cb) = &callbacks.on_tick {
                        cb(session.elapsed_secs(), self.limit.as_secs());
                    }
                    if !effects.is_empty() {
                        return effects;
                    }
                }
                changed = stop.changed() => {
                    // A closed channel counts as a stop: nobody can ask us
                    // to stop anymore, so don't keep recording unattended.
                    if changed.is_err() || *stop.borrow_and_update() {
                        return session.apply(SessionEvent::StopRequested);
                    }
                }
            }
        }
    }
}
