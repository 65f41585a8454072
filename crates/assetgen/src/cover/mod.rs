//! Album cover conversion.
//!
//! Every file in the input directory is decoded, resized to the cover
//! footprint the firmware draws and stored as a 24-bit BMP with the same
//! stem. A file that cannot be converted is recorded and skipped; the batch
//! keeps going.

use crate::config::AlbumCoverConfig;
use anyhow::Context;
use hearmeout_util::profile::Measure;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use log::{info, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod bmp;

use bmp::BmpInfo;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("Failed to list input directory {0}: {1}")]
    InputDirError(PathBuf, std::io::Error),
    #[error("Failed to create output directory {0}: {1}")]
    OutputDirError(PathBuf, std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    Converted { input: PathBuf, output: PathBuf },
    Skipped { input: PathBuf, reason: String },
}

impl CoverOutcome {
    pub fn input(&self) -> &Path {
        match self {
            CoverOutcome::Converted { input, .. } => input,
            CoverOutcome::Skipped { input, .. } => input,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, CoverOutcome::Converted { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub outcomes: Vec<CoverOutcome>,
}

impl ConversionReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.converted()
    }

    pub fn skipped_outcomes(&self) -> impl Iterator<Item = &CoverOutcome> {
        self.outcomes.iter().filter(|o| !o.is_converted())
    }
}

/// Regular files directly inside `dir`, sorted by path.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "unknown".into());
    let mut name = stem;
    name.push(".bmp");
    output_dir.join(name)
}

/// Resizes to exactly `width`x`height` (aspect ratio is not kept) and
/// encodes as a 24-bit BMP.
pub fn encode_cover(image: &DynamicImage, width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    let resized = image.resize_exact(width, height, FilterType::Lanczos3).to_rgb8();

    let mut bytes = Vec::with_capacity(bmp::BMP_HEADER_SIZE + (width * height * 3) as usize);
    resized
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
        .context("Failed to encode BMP")?;

    BmpInfo::parse(&bytes)?.check_compatible(width, height)?;
    Ok(bytes)
}

fn convert_cover(input: &Path, config: &AlbumCoverConfig) -> anyhow::Result<PathBuf> {
    let image = ImageReader::open(input)
        .context("Failed to open image")?
        .with_guessed_format()
        .context("Failed to read image")?
        .decode()
        .context("Failed to decode image")?;

    let bytes = encode_cover(&image, config.width, config.height)?;

    let output = output_path(input, &config.output_dir);
    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    // Pixel rows are stored bottom-up as BGR, padded to 4 bytes
    let row_size = ((config.width * 3 + 3) / 4 * 4) as usize;
    let top_left = bytes.len() - row_size;
    info!(
        "Converted {} into {} (top-left rgb: ({}, {}, {}))",
        input.display(),
        output.display(),
        bytes[top_left + 2],
        bytes[top_left + 1],
        bytes[top_left]
    );

    Ok(output)
}

/// Converts every file in `config.input_dir`. Only listing the input
/// directory or creating the output directory can fail the whole batch.
pub fn convert_covers(config: &AlbumCoverConfig) -> Result<ConversionReport, CoverError> {
    let _measure = Measure::new(format!(
        "Converted album covers from {}",
        config.input_dir.display()
    ));

    let files = collect_files(&config.input_dir)
        .map_err(|e| CoverError::InputDirError(config.input_dir.clone(), e))?;
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| CoverError::OutputDirError(config.output_dir.clone(), e))?;

    info!(
        "Found {} file(s) in {}",
        files.len(),
        config.input_dir.display()
    );

    let mut report = ConversionReport::default();
    for input in files {
        let outcome = match convert_cover(&input, config) {
            Ok(output) => CoverOutcome::Converted { input, output },
            Err(e) => {
                warn!("Failed to convert {} into BMP: {:#}", input.display(), e);
                CoverOutcome::Skipped {
                    input,
                    reason: format!("{:#}", e),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    Ok(report)
}
