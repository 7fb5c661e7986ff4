//! Main app runner for a recording attempt

use std::env;
use std::process::ExitCode;

use crate::application::ports::{ConfigStore, NotificationIcon, Notifier, TranscribeError};
use crate::application::{AttemptCallbacks, AttemptError, RecordingController};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalCapture, HttpTranscriptionClient, NotifyRustNotifier, XdgConfigStore,
};

use super::args::RunOptions;
use super::presenter::Presenter;
use super::signals::StopSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run one record-and-transcribe attempt
pub async fn run_attempt(options: RunOptions) -> ExitCode {
    let presenter = Presenter::new();

    let stop = StopSignal::new();
    stop.listen();

    // Create adapters
    let capture = CpalCapture::new();
    let client = HttpTranscriptionClient::new(options.endpoint.clone(), options.user_id.clone());
    let notifier = NotifyRustNotifier::new();

    let controller = RecordingController::new(capture, client, options.max_duration);

    if options.notify {
        let _ = notifier
            .notify("Voicepost", "Recording...", NotificationIcon::Recording)
            .await;
    }

    let bar = presenter.recording_bar(options.max_duration.as_secs());
    let spinner = presenter.transcribing_spinner();

    let callbacks = AttemptCallbacks {
        on_recording_start: Some(Box::new({
            let bar = bar.clone();
            move || bar.set_position(0)
        })),
        on_tick: Some(Box::new({
            let bar = bar.clone();
            move |elapsed, _limit| bar.set_position(elapsed)
        })),
        on_sending_start: Some(Box::new({
            let bar = bar.clone();
            let spinner = spinner.clone();
            move |size: &str| {
                bar.finish_and_clear();
                spinner.set_message(format!("Transcribing {}...", size));
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));
            }
        })),
        on_transcription_complete: Some(Box::new({
            let spinner = spinner.clone();
            move |_transcript| spinner.finish_and_clear()
        })),
    };

    let result = controller.run(stop.subscribe(), callbacks).await;
    bar.finish_and_clear();
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            presenter.output(&output.transcript.text);
            if let Some(category) = &output.transcript.category {
                presenter.info(&format!("Category: {}", category));
            }
            presenter.success(&format!(
                "Recorded {}s of audio ({})",
                output.final_elapsed_secs, output.audio_size
            ));

            if options.notify {
                let _ = notifier
                    .notify(
                        "Voicepost",
                        "Transcription complete",
                        NotificationIcon::Success,
                    )
                    .await;
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(AttemptError::Transcribe(TranscribeError::VersionMismatch {
            server_version,
            client_version,
        })) => {
            presenter.version_mismatch(&server_version, &client_version);

            if options.notify {
                let _ = notifier
                    .notify(
                        "Voicepost",
                        "Update required: the server no longer accepts this client",
                        NotificationIcon::Error,
                    )
                    .await;
            }

            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        endpoint: env::var("VOICEPOST_ENDPOINT").ok().filter(|s| !s.is_empty()),
        user_id: env::var("VOICEPOST_USER_ID").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
