//! cpal output stream that mixes active tone voices

use super::oscillator::ToneVoice;
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use simon_core::types::Tone;
use std::sync::{Arc, Mutex};

/// Overall output gain; several overlapping tones stay well clear of clipping
const MASTER_GAIN: f32 = 0.25;

/// Owns the output stream and the shared list of sounding voices.
/// Triggering a tone pushes a fresh voice; the audio callback mixes and
/// retires voices whose envelopes have run out.
pub struct AudioOutput {
    /// Held for the lifetime of the output; dropping the stream stops audio
    _stream: Stream,
    voices: Arc<Mutex<Vec<ToneVoice>>>,
    sample_rate: f32,
}

impl AudioOutput {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device.default_output_config()?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();
        let sample_rate = config.sample_rate.0 as f32;

        let voices: Arc<Mutex<Vec<ToneVoice>>> = Arc::new(Mutex::new(Vec::new()));
        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, voices.clone())?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, voices.clone())?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, voices.clone())?,
            _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
        };
        stream
            .play()
            .map_err(|e| anyhow!("Failed to start output stream: {}", e))?;

        Ok(AudioOutput {
            _stream: stream,
            voices,
            sample_rate,
        })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        voices: Arc<Mutex<Vec<ToneVoice>>>,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
    {
        let channels = config.channels as usize;

        let err_fn = |err| log::warn!("output audio stream error: {:?}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let mut voices = match voices.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    voices.retain(|v| !v.is_finished());

                    for frame in data.chunks_mut(channels) {
                        let mut summed = 0.0f32;
                        for voice in voices.iter_mut() {
                            summed += voice.next_sample();
                        }
                        let mixed = (summed * MASTER_GAIN).clamp(-1.0, 1.0);
                        let value: T = cpal::Sample::from_sample(mixed);

                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

        Ok(stream)
    }

    /// Start a new voice for `tone`. Overlapping tones are mixed.
    pub fn trigger(&self, tone: Tone) -> Result<()> {
        let mut voices = self
            .voices
            .lock()
            .map_err(|e| anyhow!("Failed to lock voice list: {}", e))?;
        voices.push(ToneVoice::new(tone, self.sample_rate));
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use simon_core::types::Color;

    #[test]
    fn test_audio_output_creation() {
        // This test may fail on systems without audio devices
        match AudioOutput::new() {
            Ok(output) => {
                assert!(output.trigger(Tone::Color(Color::Red)).is_ok());
            }
            Err(_) => {
                // Expected on systems without audio devices (like CI)
                println!("AudioOutput creation failed - likely no audio device available");
            }
        }
    }
}
