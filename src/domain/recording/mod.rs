//! Recording domain module

mod duration;
mod session;

pub use duration::{Duration, DEFAULT_LIMIT_SECS};
pub use session::{RecordingSession, SessionEffect, SessionEvent, SessionState};
