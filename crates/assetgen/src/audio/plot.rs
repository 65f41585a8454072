use image::{ImageResult, Rgb, RgbImage};
use std::path::Path;

pub const PLOT_WIDTH: u32 = 1200;
pub const PLOT_HEIGHT: u32 = 400;

const MARGIN: u32 = 10;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([200, 200, 200]);
const LINE: Rgb<u8> = Rgb([31, 119, 180]);

fn bounds(signal: &[f64]) -> (f64, f64) {
    let (lo, hi) = signal
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        (-1.0, 1.0)
    } else if lo == hi {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Draws the signal as a line plot: sample index on x, value on y, both
/// axes scaled to fit. Columns covering several samples draw the full
/// min..max span of those samples.
pub fn render_plot(signal: &[f64], width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
    if signal.is_empty() || width == 0 || height <= 2 * MARGIN {
        return image;
    }

    let (lo, hi) = bounds(signal);
    let plot_height = (height - 2 * MARGIN - 1) as f64;
    let to_row = |v: f64| -> u32 {
        let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        MARGIN + ((1.0 - t) * plot_height).round() as u32
    };

    if lo < 0.0 && hi > 0.0 {
        let zero = to_row(0.0);
        for x in 0..width {
            image.put_pixel(x, zero, AXIS);
        }
    }

    let n = signal.len() as u64;
    let mut prev_row: Option<u32> = None;
    for x in 0..width {
        let start = (x as u64 * n / width as u64) as usize;
        let end = (((x as u64 + 1) * n / width as u64) as usize).max(start + 1);

        let mut top = u32::MAX;
        let mut bottom = 0;
        let mut last_row = None;
        for &v in signal[start..end].iter().filter(|v| v.is_finite()) {
            let row = to_row(v);
            top = top.min(row);
            bottom = bottom.max(row);
            last_row = Some(row);
        }

        let Some(last) = last_row else {
            prev_row = None;
            continue;
        };

        // Connect to the previous column so steep edges stay continuous
        if let Some(prev) = prev_row {
            top = top.min(prev);
            bottom = bottom.max(prev);
        }

        for y in top..=bottom {
            image.put_pixel(x, y, LINE);
        }
        prev_row = Some(last);
    }

    image
}

pub fn save_plot(path: &Path, signal: &[f64]) -> ImageResult<()> {
    render_plot(signal, PLOT_WIDTH, PLOT_HEIGHT).save(path)
}
