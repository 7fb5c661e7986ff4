//! Ctrl+C handling for the recording loop

use tokio::sync::watch;

/// Stop signal bridging Ctrl+C to the recording loop.
///
/// The first Ctrl+C stops the recording; later ones are swallowed so an
/// in-flight transcription request always runs to completion.
pub struct StopSignal {
    tx: watch::Sender<bool>,
}

impl StopSignal {
    /// Create a new stop signal
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Receiver half for the recording loop
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Request a stop
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    /// Install the Ctrl+C handler
    pub fn listen(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
