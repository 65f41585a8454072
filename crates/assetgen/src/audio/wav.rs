use crate::audio::AudioError;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::io::Read;
use std::path::Path;

/// First channel of a decoded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSignal {
    pub sample_rate: u32,
    /// Channel count of the file the signal was taken from.
    pub channels: u16,
    /// Frames in the file, before any truncation.
    pub total_frames: u32,
    pub samples: Vec<i32>,
}

pub fn read_first_channel(path: &Path, max_frames: usize) -> Result<SourceSignal, AudioError> {
    let reader =
        WavReader::open(path).map_err(|e| AudioError::DecodeError(path.to_path_buf(), e))?;
    decode_first_channel(reader, max_frames, path)
}

/// Keeps channel 0 of the interleaved frames, up to `max_frames` of them.
/// Integer PCM is returned as the values stored in the file: 8-bit PCM is
/// unsigned (0..=255), wider formats are signed.
fn decode_first_channel<R: Read>(
    mut reader: WavReader<R>,
    max_frames: usize,
    path: &Path,
) -> Result<SourceSignal, AudioError> {
    let spec = reader.spec();
    debug!(
        "WAV {}: {} channel(s), {} Hz, {:?} {} bits",
        path.display(),
        spec.channels,
        spec.sample_rate,
        spec.sample_format,
        spec.bits_per_sample
    );

    if spec.sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate(spec.sample_rate));
    }

    // hound shifts 8-bit samples into the signed range
    let bias = if spec.bits_per_sample == 8 { 128 } else { 0 };

    let samples = match spec.sample_format {
        SampleFormat::Int => reader
            .samples::<i32>()
            .step_by(spec.channels as usize)
            .take(max_frames)
            .map(|s| s.map(|s| s + bias))
            .collect::<Result<Vec<i32>, hound::Error>>()
            .map_err(|e| AudioError::DecodeError(path.to_path_buf(), e))?,
        SampleFormat::Float => {
            return Err(AudioError::UnsupportedFormat(
                spec.sample_format,
                spec.bits_per_sample,
            ));
        }
    };

    Ok(SourceSignal {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        total_frames: reader.duration(),
        samples,
    })
}

/// Writes the buffer as mono 16-bit PCM, each `u16` reinterpreted as `i16`.
pub fn write_buffer(path: &Path, sample_rate: u32, buffer: &[u16]) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let encode = || -> Result<(), hound::Error> {
        let mut writer = WavWriter::create(path, spec)?;
        for &sample in buffer {
            writer.write_sample(sample as i16)?;
        }
        writer.finalize()
    };

    encode().map_err(|e| AudioError::EncodeError(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(path: &Path, spec: WavSpec, frames: &[Vec<i32>]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    fn int_spec(channels: u16, sample_rate: u32) -> WavSpec {
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn test_reads_first_channel_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let frames: Vec<Vec<i32>> = (0..10).map(|i| vec![i * 100, -i]).collect();
        write_fixture(&path, int_spec(2, 22050), &frames);

        let signal = read_first_channel(&path, 1_000_000).unwrap();
        assert_eq!(signal.sample_rate, 22050);
        assert_eq!(signal.channels, 2);
        assert_eq!(signal.total_frames, 10);
        assert_eq!(signal.samples, (0..10).map(|i| i * 100).collect::<Vec<_>>());
    }

    #[test]
    fn test_truncates_to_max_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let frames: Vec<Vec<i32>> = (0..50).map(|i| vec![i - 25]).collect();
        write_fixture(&path, int_spec(1, 8000), &frames);

        let signal = read_first_channel(&path, 7).unwrap();
        assert_eq!(signal.total_frames, 50);
        assert_eq!(signal.samples, vec![-25, -24, -23, -22, -21, -20, -19]);
    }

    #[test]
    fn test_8bit_samples_stay_unsigned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u8.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
            sample_format: SampleFormat::Int,
        };
        // Stored bytes 128, 255, 0 and 127
        let frames = vec![vec![0], vec![127], vec![-128], vec![-1]];
        write_fixture(&path, spec, &frames);

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[raw.len() - 4..], &[128, 255, 0, 127]);

        let signal = read_first_channel(&path, 10).unwrap();
        assert_eq!(signal.samples, vec![128, 255, 0, 127]);
    }

    #[test]
    fn test_rejects_float_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        match read_first_channel(&path, 10) {
            Err(AudioError::UnsupportedFormat(SampleFormat::Float, 32)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound.wav");
        assert!(matches!(
            read_first_channel(&path, 10),
            Err(AudioError::DecodeError(p, _)) if p == path
        ));
    }

    #[test]
    fn test_write_reinterprets_as_i16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_buffer(&path, 8000, &[0, 450, 32767, 32768, 65535]).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 450, 32767, -32768, -1]);
    }
}
