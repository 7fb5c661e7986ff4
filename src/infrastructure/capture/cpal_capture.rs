//! Microphone capture adapter using cpal
//!
//! cpal streams are not Send, so the stream lives on a dedicated thread
//! that owns it for the whole session. The handle returned to the
//! controller only flips the shared flags that thread watches.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{mpsc, Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::time::{sleep, Duration as TokioDuration};

use crate::application::ports::{AudioCapture, CaptureStream, DeviceError};
use crate::domain::transcription::AudioBuffer;

/// Microphone capture using the default cpal input device
pub struct CpalCapture;

impl CpalCapture {
    /// Create a new cpal-based capture
    pub fn new() -> Self {
        Self
    }

    /// Map a backend error message onto the device error taxonomy.
    /// cpal has no dedicated permission variant; backends surface denials
    /// in the message text.
    fn classify_error(message: &str) -> DeviceError {
        let lower = message.to_lowercase();
        if lower.contains("denied") || lower.contains("permission") {
            DeviceError::PermissionDenied
        } else {
            DeviceError::StreamFailed(message.to_string())
        }
    }

    /// Mix interleaved frames down to mono
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Wrap mono samples in a WAV container
    fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, DeviceError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = std::io::Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| DeviceError::StreamFailed(format!("WAV writer failed: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| DeviceError::StreamFailed(format!("WAV write failed: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| DeviceError::StreamFailed(format!("WAV finalize failed: {}", e)))?;

        Ok(cursor.into_inner())
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, DeviceError> {
        let buffer: Arc<StdMutex<Vec<i16>>> = Arc::new(StdMutex::new(Vec::new()));
        let live = Arc::new(AtomicBool::new(true));
        let sample_rate = Arc::new(AtomicU32::new(0));

        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), DeviceError>>();

        let thread_buffer = Arc::clone(&buffer);
        let thread_live = Arc::clone(&live);
        let thread_rate = Arc::clone(&sample_rate);

        std::thread::spawn(move || {
            let host = cpal::default_host();
            let device = match host.default_input_device() {
                Some(d) => d,
                None => {
                    let _ = ready_tx.send(Err(DeviceError::NoDevice));
                    return;
                }
            };

            let config = match device.default_input_config() {
                Ok(c) => c,
                Err(e) => {
                    let _ = ready_tx.send(Err(CpalCapture::classify_error(&e.to_string())));
                    return;
                }
            };

            let sample_format = config.sample_format();
            let stream_config = config.config();
            let channels = stream_config.channels;
            thread_rate.store(stream_config.sample_rate.0, Ordering::SeqCst);

            let data_buffer = Arc::clone(&thread_buffer);
            let data_live = Arc::clone(&thread_live);

            let stream = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if data_live.load(Ordering::SeqCst) {
                            let mono = CpalCapture::downmix(data, channels);
                            if let Ok(mut buffer) = data_buffer.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let data_buffer = Arc::clone(&thread_buffer);
                    let data_live = Arc::clone(&thread_live);

                    device.build_input_stream(
                        &stream_config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if data_live.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalCapture::downmix(&i16_data, channels);
                                if let Ok(mut buffer) = data_buffer.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                other => {
                    let _ = ready_tx.send(Err(DeviceError::StreamFailed(format!(
                        "Unsupported sample format: {:?}",
                        other
                    ))));
                    return;
                }
            };

            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    let _ = ready_tx.send(Err(CpalCapture::classify_error(&e.to_string())));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                let _ = ready_tx.send(Err(CpalCapture::classify_error(&e.to_string())));
                return;
            }

            let _ = ready_tx.send(Ok(()));

            // The stream must stay on this thread; hold it until the
            // session halts or releases the handle.
            while thread_live.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            drop(stream);
        });

        // Wait for the thread to report stream startup without blocking
        // the runtime.
        let ready = tokio::task::spawn_blocking(move || {
            ready_rx
                .recv_timeout(std::time::Duration::from_secs(5))
                .unwrap_or_else(|_| {
                    Err(DeviceError::StreamFailed(
                        "Timed out waiting for the input stream".to_string(),
                    ))
                })
        })
        .await
        .map_err(|e| DeviceError::StreamFailed(format!("Task join error: {}", e)))?;

        if let Err(err) = ready {
            // Make sure the device thread winds down before reporting
            live.store(false, Ordering::SeqCst);
            return Err(err);
        }

        Ok(Box::new(CpalStream {
            buffer,
            live,
            sample_rate,
            released: false,
        }))
    }
}

/// Live microphone stream handle
struct CpalStream {
    buffer: Arc<StdMutex<Vec<i16>>>,
    live: Arc<AtomicBool>,
    sample_rate: Arc<AtomicU32>,
    released: bool,
}

#[async_trait]
impl CaptureStream for CpalStream {
    async fn halt(&mut self) -> Result<AudioBuffer, DeviceError> {
        self.live.store(false, Ordering::SeqCst);
        // Let the device thread notice and stop appending.
        sleep(TokioDuration::from_millis(100)).await;

        let samples = {
            let mut buffer = self
                .buffer
                .lock()
                .map_err(|_| DeviceError::StreamFailed("Capture buffer poisoned".to_string()))?;
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            // Zero elapsed time still yields a sendable payload.
            return Ok(AudioBuffer::empty());
        }

        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        let data =
            tokio::task::spawn_blocking(move || CpalCapture::encode_wav(&samples, sample_rate))
                .await
                .map_err(|e| DeviceError::StreamFailed(format!("Task join error: {}", e)))??;

        Ok(AudioBuffer::new(data))
    }

    async fn release(&mut self) {
        if !self.released {
            self.live.store(false, Ordering::SeqCst);
            self.released = true;
        }
    }
}
