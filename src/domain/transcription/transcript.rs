//! Transcription result value object

/// The transcription service's answer for one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// The transcribed text
    pub text: String,
    /// Category the service assigned to the text, when it assigned one
    pub category: Option<String>,
}

impl Transcript {
    /// Create a transcript
    pub fn new(text: impl Into<String>, category: Option<String>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}
