//! Recording session state machine
//!
//! The session is a pure state machine: applying an event mutates only its
//! own bookkeeping and returns the effects the driver must execute. Device
//! acquisition, the timer and the network call all live behind ports in the
//! application layer, so every transition is unit-testable here.

use std::fmt;

use crate::domain::recording::Duration;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Finalizing,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events fed to the session by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user asked for a recording
    StartRequested,
    /// The microphone stream is live
    DeviceAcquired,
    /// Microphone access failed; the attempt is over
    DeviceDenied,
    /// One second of recording elapsed
    TimerTick,
    /// The user asked to stop
    StopRequested,
    /// The finalized buffer was handed to the transcription client
    BufferDispatched,
}

/// Effects the driver must execute, in the order returned.
///
/// During finalization the device is halted and released before the buffer
/// is dispatched, so no request ever carries a partially recorded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    AcquireDevice,
    StartTimer,
    StopTimer,
    HaltCapture,
    ReleaseStream,
    DispatchBuffer,
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> RECORDING          (device acquired)
///   RECORDING -> FINALIZING    (manual stop, or elapsed reaching the bound)
///   FINALIZING -> IDLE         (buffer dispatched)
///
/// Unexpected events are no-ops: starting while recording, stopping while
/// idle and stray ticks leave the session unchanged and return no effects.
#[derive(Debug)]
pub struct RecordingSession {
    state: SessionState,
    elapsed_secs: u64,
    final_elapsed_secs: u64,
    limit_secs: u64,
}

impl RecordingSession {
    /// Create a new idle session with the given recording bound
    pub fn new(limit: Duration) -> Self {
        Self {
            state: SessionState::Idle,
            elapsed_secs: 0,
            final_elapsed_secs: 0,
            limit_secs: limit.as_secs(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Seconds recorded so far
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Elapsed seconds captured at the moment the recording stopped
    pub fn final_elapsed_secs(&self) -> u64 {
        self.final_elapsed_secs
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Apply an event and return the effects the driver must execute, in order
    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        match (self.state, event) {
            (SessionState::Idle, SessionEvent::StartRequested) => {
                vec![SessionEffect::AcquireDevice]
            }
            (SessionState::Idle, SessionEvent::DeviceAcquired) => {
                self.state = SessionState::Recording;
                self.elapsed_secs = 0;
                vec![SessionEffect::StartTimer]
            }
            // Acquisition failed: the session never left idle and there is
            // nothing to release.
            (SessionState::Idle, SessionEvent::DeviceDenied) => Vec::new(),
            (SessionState::Recording, SessionEvent::TimerTick) => {
                self.elapsed_secs += 1;
                // The bound is inclusive: stopping happens the moment
                // elapsed reaches it, never a tick later.
                if self.elapsed_secs >= self.limit_secs {
                    self.finalize()
                } else {
                    Vec::new()
                }
            }
            (SessionState::Recording, SessionEvent::StopRequested) => self.finalize(),
            (SessionState::Finalizing, SessionEvent::BufferDispatched) => {
                self.state = SessionState::Idle;
                self.elapsed_secs = 0;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn finalize(&mut self) -> Vec<SessionEffect> {
        self.final_elapsed_secs = self.elapsed_secs;
        self.state = SessionState::Finalizing;
        vec![
            SessionEffect::StopTimer,
            SessionEffect::HaltCapture,
            SessionEffect::ReleaseStream,
            SessionEffect::DispatchBuffer,
        ]
    }
}
