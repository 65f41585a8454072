//! Asset generators for the HearMeOut player firmware.
//!
//! - [`audio`] turns a WAV file into the 8 kHz sample buffer compiled into
//!   the firmware.
//! - [`cover`] converts album art into the fixed-size BMPs read from the SD
//!   card.

pub mod audio;
pub mod config;
pub mod cover;

pub use audio::{AudioBuffer, AudioError};
pub use config::{AlbumCoverConfig, AudioBufferConfig};
pub use cover::{ConversionReport, CoverError, CoverOutcome};
