use std::path::PathBuf;

/// Sample rate the firmware plays the buffer back at.
pub const TARGET_SAMPLE_RATE: u32 = 8000;
/// Only this many leading frames of the input are used.
pub const MAX_INPUT_SAMPLES: usize = 1_000_000;
/// The firmware indexes the buffer with a 16-bit counter.
pub const MAX_BUFFER_LEN: usize = (1 << 16) - 1;

pub const ALBUM_COVER_WIDTH: u32 = 152;
pub const ALBUM_COVER_HEIGHT: u32 = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioBufferConfig {
    pub input_path: PathBuf,
    pub wav_output_path: PathBuf,
    pub header_output_path: PathBuf,
    /// Where to render the transformed signal before resampling.
    /// `None` skips the plot.
    pub plot_path: Option<PathBuf>,
    pub target_rate: u32,
    pub max_input_samples: usize,
    pub max_buffer_len: usize,
    pub header_guard: String,
    pub array_name: String,
}

impl Default for AudioBufferConfig {
    fn default() -> Self {
        AudioBufferConfig {
            input_path: "sound.wav".into(),
            wav_output_path: "new_audio.wav".into(),
            header_output_path: "data.h".into(),
            plot_path: Some("signal.png".into()),
            target_rate: TARGET_SAMPLE_RATE,
            max_input_samples: MAX_INPUT_SAMPLES,
            max_buffer_len: MAX_BUFFER_LEN,
            header_guard: "DATA_H".to_string(),
            array_name: "buf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCoverConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for AlbumCoverConfig {
    fn default() -> Self {
        AlbumCoverConfig {
            input_dir: "raw_covers".into(),
            output_dir: "bmp_covers".into(),
            width: ALBUM_COVER_WIDTH,
            height: ALBUM_COVER_HEIGHT,
        }
    }
}
