//! Voicepost - record a short voice note and post it for transcription
//!
//! This crate records a bounded audio clip from the default microphone,
//! ships it to a remote transcription endpoint as multipart WAV, and
//! surfaces the transcript plus an optional category.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: The recording-session state machine, value objects, and errors
//! - **Application**: The recording controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, HTTP client, notifications, config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
