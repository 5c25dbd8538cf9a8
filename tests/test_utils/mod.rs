#![allow(dead_code)]

use std::ffi::OsStr;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::RgbaImage;
use uuid::Uuid;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fft"))
}

pub fn run_fft<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute fft binary")
}

/// Unique scratch file under the system temp dir
pub fn temp_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("waterfall-{}.{}", Uuid::new_v4(), extension))
}

/// Removes the file when dropped
pub struct TempFile(pub PathBuf);

impl TempFile {
    pub fn new(extension: &str) -> Self {
        Self(temp_path(extension))
    }

    pub fn with_bytes(extension: &str, bytes: &[u8]) -> Self {
        let file = Self::new(extension);
        fs::write(&file.0, bytes).expect("Failed to write sample file");
        file
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

pub fn read_png(path: &Path) -> RgbaImage {
    image::open(path).expect("Failed to open PNG").to_rgba8()
}

// ============================================================================
// Sample generators
// ============================================================================

/// Complex exponential at `bin` of an `n`-point transform, `rows` blocks long
pub fn complex_tone(n: usize, bin: f64, amplitude: f64, rows: usize) -> Vec<(f64, f64)> {
    (0..n * rows)
        .map(|i| {
            let phase = 2.0 * PI * bin * (i % n) as f64 / n as f64;
            (amplitude * phase.cos(), amplitude * phase.sin())
        })
        .collect()
}

/// Real cosine at `bin`, imaginary part zero
pub fn real_tone(n: usize, bin: f64, amplitude: f64, rows: usize) -> Vec<(f64, f64)> {
    complex_tone(n, bin, amplitude, rows)
        .into_iter()
        .map(|(re, _)| (re, 0.0))
        .collect()
}

pub fn encode_8uc(samples: &[(f64, f64)]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&(re, im)| {
            [
                (re + 128.0).round().clamp(0.0, 255.0) as u8,
                (im + 128.0).round().clamp(0.0, 255.0) as u8,
            ]
        })
        .collect()
}

pub fn encode_le16sc(samples: &[(f64, f64)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 4);
    for &(re, im) in samples {
        bytes.extend_from_slice(&(re.round() as i16).to_le_bytes());
        bytes.extend_from_slice(&(im.round() as i16).to_le_bytes());
    }
    bytes
}

pub fn encode_le32fc(samples: &[(f64, f64)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 8);
    for &(re, im) in samples {
        bytes.extend_from_slice(&(re as f32).to_le_bytes());
        bytes.extend_from_slice(&(im as f32).to_le_bytes());
    }
    bytes
}

pub fn encode_le64fc(samples: &[(f64, f64)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 16);
    for &(re, im) in samples {
        bytes.extend_from_slice(&re.to_le_bytes());
        bytes.extend_from_slice(&im.to_le_bytes());
    }
    bytes
}

/// Interleaved 16-bit frames: channel 0 carries `samples`, the others noise
pub fn encode_le16s(samples: &[f64], channels: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * channels * 2);
    for (i, &v) in samples.iter().enumerate() {
        bytes.extend_from_slice(&(v.round() as i16).to_le_bytes());
        for c in 1..channels {
            let junk = ((i * 7919 + c * 104729) % 20000) as i16 - 10000;
            bytes.extend_from_slice(&junk.to_le_bytes());
        }
    }
    bytes
}

/// Columns in `row` whose colour differs from `background`
pub fn lit_columns(image: &RgbaImage, row: u32, background: image::Rgba<u8>) -> Vec<u32> {
    (0..image.width())
        .filter(|&x| *image.get_pixel(x, row) != background)
        .collect()
}
