//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, the transcription HTTP API, etc.

pub mod capture;
pub mod config;
pub mod notification;
pub mod transcription;

// Re-export adapters
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use notification::NotifyRustNotifier;
pub use transcription::HttpTranscriptionClient;
