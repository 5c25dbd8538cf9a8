// src/config/settings.rs
//
// Every knob of a render, with the command-line defaults.

use crate::core::decoder::SampleFormat;
use crate::core::dsp::fft::MAX_LOG2N;
use crate::core::dsp::{ScaleMode, SpectrumScaler, WindowType};
use crate::error::{Result, WaterfallError};

pub const DEFAULT_LOG2N: u32 = 10;
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_MAX_HEIGHT: u32 = 480;

/// Settings for one waterfall render
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallConfig {
    /// FFT length is `2^log2n`
    pub log2n: u32,
    pub sample_format: SampleFormat,
    /// Informational only
    pub sample_rate: f64,
    /// Interleaved channels per `le16s` frame
    pub channel_stride: usize,
    /// Explicit post-scale; 0 derives one from each row
    pub scale: f32,
    pub scale_linear: bool,
    pub scale_ratio: f32,
    /// Upper bound for a height derived from the input length
    pub max_height: u32,
    /// 0 derives the height from the input length
    pub height: u32,
    pub width: u32,
    /// `None` skips windowing
    pub window: Option<WindowType>,
    pub progress: bool,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            log2n: DEFAULT_LOG2N,
            sample_format: SampleFormat::ComplexU8,
            sample_rate: 0.0,
            channel_stride: 2,
            scale: 0.0,
            scale_linear: false,
            scale_ratio: 0.5,
            max_height: DEFAULT_MAX_HEIGHT,
            height: 0,
            width: DEFAULT_WIDTH,
            window: Some(WindowType::Hann),
            progress: false,
        }
    }
}

impl WaterfallConfig {
    /// Number of samples per transform
    pub fn fft_len(&self) -> usize {
        1usize << self.log2n
    }

    pub fn scale_mode(&self) -> ScaleMode {
        if self.scale_linear {
            ScaleMode::Linear
        } else {
            ScaleMode::Log
        }
    }

    pub fn scaler(&self) -> SpectrumScaler {
        SpectrumScaler::new(self.scale_mode(), self.scale, self.scale_ratio)
    }

    /// Bytes consumed per row of the image
    pub fn block_bytes(&self) -> usize {
        self.fft_len() * self.sample_format.decoder(self.channel_stride).sample_size()
    }

    /// Rows produced from an input of `input_len` bytes when `height` is 0.
    ///
    /// At least one row, at most `max_height`.
    pub fn derived_height(&self, input_len: u64) -> u32 {
        let rows = input_len / self.block_bytes() as u64;
        rows.clamp(1, self.max_height.max(1) as u64) as u32
    }

    /// Parse a window name; `none` and the empty string disable windowing.
    pub fn parse_window(name: &str) -> Result<Option<WindowType>> {
        if name.is_empty() || name.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        WindowType::from_name(name)
            .map(Some)
            .ok_or_else(|| WaterfallError::config(format!("unknown window function {}", name)))
    }

    pub fn parse_sample_format(name: &str) -> Result<SampleFormat> {
        SampleFormat::from_name(name)
            .ok_or_else(|| WaterfallError::config(format!("unknown sample format {}", name)))
    }

    /// Reject settings the renderer cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.log2n < 1 {
            return Err(WaterfallError::config("log2n must be at least 1"));
        }
        if self.log2n > MAX_LOG2N {
            return Err(WaterfallError::config(format!(
                "log2n {} exceeds the maximum of {}",
                self.log2n, MAX_LOG2N
            )));
        }
        if self.width == 0 {
            return Err(WaterfallError::config("width must be positive"));
        }
        if self.height == 0 && self.max_height == 0 {
            return Err(WaterfallError::config(
                "maxHeight must be positive when height is derived",
            ));
        }
        if self.channel_stride == 0 {
            return Err(WaterfallError::config("channel.stride must be positive"));
        }
        if !self.scale.is_finite() {
            return Err(WaterfallError::config("scale must be finite"));
        }
        if !self.scale_ratio.is_finite() {
            return Err(WaterfallError::config("scale.ratio must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WaterfallConfig::default();
        assert_eq!(config.fft_len(), 1024);
        assert_eq!(config.scale_mode(), ScaleMode::Log);
        assert_eq!(config.block_bytes(), 2048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_height() {
        let config = WaterfallConfig {
            log2n: 4,
            max_height: 100,
            ..Default::default()
        };
        // 16 samples * 2 bytes per row
        assert_eq!(config.derived_height(0), 1);
        assert_eq!(config.derived_height(31), 1);
        assert_eq!(config.derived_height(96), 3);
        assert_eq!(config.derived_height(32 * 500), 100);
    }

    #[test]
    fn test_le16s_block_follows_channel_stride() {
        let mut config = WaterfallConfig {
            log2n: 3,
            sample_format: SampleFormat::RealS16,
            ..Default::default()
        };
        assert_eq!(config.block_bytes(), 32);
        config.channel_stride = 1;
        assert_eq!(config.block_bytes(), 16);
    }

    #[test]
    fn test_validate_rejects() {
        let cases = [
            WaterfallConfig { log2n: 0, ..Default::default() },
            WaterfallConfig { log2n: 25, ..Default::default() },
            WaterfallConfig { width: 0, ..Default::default() },
            WaterfallConfig { max_height: 0, ..Default::default() },
            WaterfallConfig { channel_stride: 0, ..Default::default() },
            WaterfallConfig { scale: f32::NAN, ..Default::default() },
            WaterfallConfig { scale_ratio: f32::INFINITY, ..Default::default() },
        ];
        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(err.is_config(), "{:?}", config);
        }

        let explicit = WaterfallConfig { max_height: 0, height: 5, ..Default::default() };
        assert!(explicit.validate().is_ok());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(WaterfallConfig::parse_window("none").unwrap(), None);
        assert_eq!(WaterfallConfig::parse_window("").unwrap(), None);
        assert_eq!(
            WaterfallConfig::parse_window("hamming").unwrap(),
            Some(WindowType::Hamming)
        );
        assert!(WaterfallConfig::parse_window("kaiser").unwrap_err().is_config());
        assert_eq!(
            WaterfallConfig::parse_sample_format("le64fc").unwrap(),
            SampleFormat::ComplexF64
        );
        assert!(WaterfallConfig::parse_sample_format("wav").is_err());
    }
}
