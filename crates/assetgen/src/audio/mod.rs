//! Audio buffer generation.
//!
//! Turns the first channel of a WAV file into the 8 kHz `uint16_t` buffer
//! the firmware streams to the transducer timer: scale/offset transform,
//! Fourier resampling, truncation to the buffer limit and a wrapping cast
//! to `u16`. The result is written both as a WAV for listening and as a C
//! header for the firmware build.

use crate::config::AudioBufferConfig;
use hearmeout_util::profile::Measure;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

pub mod header;
pub mod plot;
pub mod quantize;
pub mod resample;
pub mod transform;
pub mod wav;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to decode WAV {0}: {1}")]
    DecodeError(PathBuf, hound::Error),
    #[error("Failed to write WAV {0}: {1}")]
    EncodeError(PathBuf, hound::Error),
    #[error("Unsupported WAV format: {0:?} with {1} bits per sample")]
    UnsupportedFormat(hound::SampleFormat, u16),
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("Failed to write header {0}: {1}")]
    HeaderWriteError(PathBuf, std::io::Error),
    #[error("Failed to render plot {0}: {1}")]
    PlotError(PathBuf, image::ImageError),
    #[error("Failed to allocate a spectrum of {0} samples: {1}")]
    ResampleAllocationError(usize, std::collections::TryReserveError),
}

/// Quantized signal at the target rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub samples: Vec<u16>,
}

impl AudioBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Resamples an already transformed signal from `source_rate` to
/// `target_rate` and quantizes at most `max_len` samples of it.
pub fn resample_and_quantize(
    transformed: &[f64],
    source_rate: u32,
    target_rate: u32,
    max_len: usize,
) -> Result<AudioBuffer, AudioError> {
    if source_rate == 0 {
        return Err(AudioError::InvalidSampleRate(source_rate));
    }

    let num = resample::target_length(transformed.len(), source_rate, target_rate);
    let resampled = {
        let _measure = Measure::new(format!(
            "Resampled {} samples into {}",
            transformed.len(),
            num
        ));
        resample::resample(transformed, num)
            .map_err(|e| AudioError::ResampleAllocationError(num, e))?
    };

    Ok(AudioBuffer {
        sample_rate: target_rate,
        samples: quantize::quantize(&resampled, max_len),
    })
}

/// Runs the whole pure part of the pipeline on raw samples.
pub fn build_buffer(
    samples: &[i32],
    source_rate: u32,
    target_rate: u32,
    max_len: usize,
) -> Result<AudioBuffer, AudioError> {
    let transformed = transform::transform_samples(samples);
    resample_and_quantize(&transformed, source_rate, target_rate, max_len)
}

/// Reads `config.input_path`, writes the resampled WAV, the C header and
/// (when configured) the signal plot. Any failure aborts the run.
///
/// The resampler holds the full target-length spectrum in memory (about 32
/// bytes per output sample, output included) before the buffer is cut to
/// `max_buffer_len`, so a long input at a high target rate needs that much
/// memory. An allocation that cannot be made fails with
/// [`AudioError::ResampleAllocationError`].
pub fn generate(config: &AudioBufferConfig) -> Result<AudioBuffer, AudioError> {
    let _measure = Measure::new(format!(
        "Generated audio buffer from {}",
        config.input_path.display()
    ));

    let source = wav::read_first_channel(&config.input_path, config.max_input_samples)?;
    info!(
        "Read {}: {} channel(s), {} frame(s) at {} Hz",
        config.input_path.display(),
        source.channels,
        source.total_frames,
        source.sample_rate
    );

    let transformed = transform::transform_samples(&source.samples);
    info!("Transformed {} sample(s) of channel 0", transformed.len());

    if let Some(plot_path) = &config.plot_path {
        plot::save_plot(plot_path, &transformed)
            .map_err(|e| AudioError::PlotError(plot_path.clone(), e))?;
        info!("Plotted signal into {}", plot_path.display());
    }

    let buffer = resample_and_quantize(
        &transformed,
        source.sample_rate,
        config.target_rate,
        config.max_buffer_len,
    )?;
    info!(
        "Resampled to {} sample(s) at {} Hz",
        buffer.len(),
        buffer.sample_rate
    );

    wav::write_buffer(&config.wav_output_path, buffer.sample_rate, &buffer.samples)?;
    info!("Wrote {}", config.wav_output_path.display());

    header::write_header(
        &config.header_output_path,
        &buffer.samples,
        &config.header_guard,
        &config.array_name,
    )
    .map_err(|e| AudioError::HeaderWriteError(config.header_output_path.clone(), e))?;
    info!("Wrote {}", config.header_output_path.display());

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_BUFFER_LEN;
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
    use std::path::Path;

    fn write_mono(path: &Path, sample_rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn config_in(dir: &Path) -> AudioBufferConfig {
        AudioBufferConfig {
            input_path: dir.join("sound.wav"),
            wav_output_path: dir.join("new_audio.wav"),
            header_output_path: dir.join("data.h"),
            plot_path: Some(dir.join("signal.png")),
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_rate_keeps_length() {
        let samples: Vec<i32> = (0..5000).map(|i| ((i * 37) % 2000) - 1000).collect();
        let buffer = build_buffer(&samples, 8000, 8000, MAX_BUFFER_LEN).unwrap();
        assert_eq!(buffer.len(), samples.len());
        assert_eq!(buffer.sample_rate, 8000);
    }

    #[test]
    fn test_empty_input() {
        let buffer = build_buffer(&[], 44100, 8000, MAX_BUFFER_LEN).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_length_capped() {
        // 20000 samples at 2 kHz would be 80000 samples at 8 kHz
        let samples = vec![0; 20_000];
        let buffer = build_buffer(&samples, 2000, 8000, MAX_BUFFER_LEN).unwrap();
        assert_eq!(buffer.len(), MAX_BUFFER_LEN);

        let buffer = build_buffer(&samples, 20_000, 8000, MAX_BUFFER_LEN).unwrap();
        assert_eq!(buffer.len(), 8000);
    }

    #[test]
    fn test_silence_maps_near_offset() {
        // Silence transforms to exactly 450.0; resampling may land a hair
        // below it, which the truncating cast turns into 449.
        let buffer = build_buffer(&vec![0; 441], 44100, 8000, MAX_BUFFER_LEN).unwrap();
        assert_eq!(buffer.len(), 80);
        assert!(buffer.samples.iter().all(|&v| v == 449 || v == 450));
    }

    #[test]
    fn test_full_scale_negative_wraps() {
        // -32768 transforms to -300.0 which wraps to 65236
        let buffer = build_buffer(&vec![-32768; 64], 8000, 8000, MAX_BUFFER_LEN).unwrap();
        assert!(buffer
            .samples
            .iter()
            .all(|&v| v == 65236 || v == 65235 || v == 65237));
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            build_buffer(&[1, 2, 3], 0, 8000, MAX_BUFFER_LEN),
            Err(AudioError::InvalidSampleRate(0))
        ));
    }

    #[test]
    fn test_generate_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let samples: Vec<i16> = (0..1600)
            .map(|i| ((i as f64 * 0.05).sin() * 8000.0) as i16)
            .collect();
        write_mono(&config.input_path, 16000, &samples);

        let buffer = generate(&config).unwrap();
        assert_eq!(buffer.len(), 800);

        let mut reader = WavReader::open(&config.wav_output_path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().channels, 1);
        let written: Vec<u16> = reader
            .samples::<i16>()
            .map(|s| s.unwrap() as u16)
            .collect();
        assert_eq!(written, buffer.samples);

        let header = std::fs::read_to_string(&config.header_output_path).unwrap();
        assert!(header.contains("#define BUFFER_SIZE 800\n"));
        assert_eq!(header.matches(',').count(), 799);

        assert!(config.plot_path.unwrap().exists());
    }

    #[test]
    fn test_generate_without_plot() {
        let dir = tempfile::tempdir().unwrap();
        let config = AudioBufferConfig {
            plot_path: None,
            ..config_in(dir.path())
        };
        write_mono(&config.input_path, 8000, &[0, 100, -100, 0]);

        let buffer = generate(&config).unwrap();
        assert_eq!(buffer.len(), 4);
        assert!(!dir.path().join("signal.png").exists());
    }

    #[test]
    fn test_generate_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(matches!(
            generate(&config),
            Err(AudioError::DecodeError(_, _))
        ));
        assert!(!config.header_output_path.exists());
        assert!(!config.wav_output_path.exists());
    }
}
