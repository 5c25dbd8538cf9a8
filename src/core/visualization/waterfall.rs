// src/core/visualization/waterfall.rs
//
// Row painting for the waterfall image: frequency bins are averaged into
// pixel columns, rotated so DC sits mid-image, and coloured via the palette.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use rayon::prelude::*;

use super::palette::color_for_value;
use crate::core::dsp::spectrum::finite_or_clamped;
use crate::error::{Result, WaterfallError};

/// Height of the reference-tick bar drawn over the last rows
pub const FOOTER_ROWS: u32 = 8;

const TICK_CENTER: Rgba<u8> = Rgba([0, 255, 0, 255]);
const TICK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BAR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Average `values` into `columns.len()` columns.
///
/// Column `x` covers bins `[x*N/W, (x+1)*N/W)`. When there are more columns
/// than bins the range can be empty; the column then repeats bin `x*N/W`.
pub fn bin_columns(values: &[f32], columns: &mut [f32]) {
    let n = values.len();
    let width = columns.len();
    if n == 0 {
        columns.fill(0.0);
        return;
    }

    columns.par_iter_mut().enumerate().for_each(|(x, column)| {
        let start = (x * n / width).min(n - 1);
        let end = ((x + 1) * n / width).min(n);
        let avg = if end > start {
            let bins = &values[start..end];
            bins.iter().sum::<f32>() / bins.len() as f32
        } else {
            values[start]
        };
        *column = finite_or_clamped(avg);
    });
}

/// Column of the image that shows binned column `x`.
#[inline]
pub fn centered_column(x: u32, width: u32) -> u32 {
    (x + width / 2) % width
}

/// Paint one image row from binned column values.
pub fn paint_row(image: &mut RgbaImage, y: u32, columns: &[f32]) {
    let width = image.width();
    for (x, &value) in columns.iter().enumerate().take(width as usize) {
        image.put_pixel(centered_column(x as u32, width), y, color_for_value(value));
    }
}

/// Overwrite the bottom rows with a black bar carrying frequency ticks.
///
/// Green marks DC at `W/2`; white marks `W/2 ± W/i` for `i` in 4, 8, 16.
pub fn draw_footer(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width == 0 {
        return;
    }
    let center = width / 2;

    for y in height.saturating_sub(FOOTER_ROWS)..height {
        for x in 0..width {
            image.put_pixel(x, y, BAR);
        }
        image.put_pixel(center, y, TICK_CENTER);
        for i in [4, 8, 16] {
            let offset = width / i;
            image.put_pixel(center - offset, y, TICK);
            if center + offset < width {
                image.put_pixel(center + offset, y, TICK);
            }
        }
    }
}

/// Encode `image` as PNG at `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| WaterfallError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| WaterfallError::ImageEncoding {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|e| WaterfallError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binning_averages_groups() {
        let values: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let mut columns = [0.0f32; 4];
        bin_columns(&values, &mut columns);
        assert_eq!(columns, [0.5, 2.5, 4.5, 6.5]);
    }

    #[test]
    fn test_binning_fractional_groups() {
        let values = [1.0f32, 2.0, 3.0];
        let mut columns = [0.0f32; 2];
        bin_columns(&values, &mut columns);
        // [0, 1) and [1, 3)
        assert_eq!(columns, [1.0, 2.5]);
    }

    #[test]
    fn test_binning_replicates_when_wider() {
        let values = [1.0f32, 2.0];
        let mut columns = [0.0f32; 4];
        bin_columns(&values, &mut columns);
        assert_eq!(columns, [1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_binning_replaces_non_finite() {
        let values = [f32::NAN, 1.0, f32::INFINITY, 1.0];
        let mut columns = [0.0f32; 2];
        bin_columns(&values, &mut columns);
        assert_eq!(columns, [0.0, 1.0]);
    }

    #[test]
    fn test_dc_lands_mid_image() {
        let mut image = RgbaImage::new(8, 1);
        let mut columns = [0.0f32; 8];
        columns[0] = 1.0;
        paint_row(&mut image, 0, &columns);
        assert_eq!(*image.get_pixel(4, 0), color_for_value(1.0));
        for x in (0..8).filter(|&x| x != 4) {
            assert_eq!(*image.get_pixel(x, 0), color_for_value(0.0));
        }
    }

    #[test]
    fn test_negative_frequencies_left() {
        assert_eq!(centered_column(1, 640), 321);
        assert_eq!(centered_column(639, 640), 319);
        assert_eq!(centered_column(320, 640), 0);
    }

    #[test]
    fn test_footer_ticks() {
        let mut image = RgbaImage::from_pixel(64, 12, Rgba([9, 9, 9, 255]));
        draw_footer(&mut image);
        assert_eq!(*image.get_pixel(0, 3), Rgba([9, 9, 9, 255]));
        for y in 4..12 {
            assert_eq!(*image.get_pixel(32, y), TICK_CENTER);
            for x in [16, 48, 24, 40, 28, 36] {
                assert_eq!(*image.get_pixel(x, y), TICK, "x={} y={}", x, y);
            }
            assert_eq!(*image.get_pixel(1, y), BAR);
        }
    }

    #[test]
    fn test_footer_on_short_image() {
        let mut image = RgbaImage::new(16, 3);
        draw_footer(&mut image);
        assert_eq!(*image.get_pixel(0, 0), BAR);
        assert_eq!(*image.get_pixel(8, 2), TICK_CENTER);
    }
}
