//! Command-line arguments for the `fft` tool
//!
//! Flags are spelled the traditional single-dash way (`-log2n 12`,
//! `-scale.linear=true`). They are rewritten to clap's `--long` form
//! before parsing, so both spellings are accepted.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use super::output::sample_format_help;
use crate::config::{WaterfallConfig, DEFAULT_LOG2N, DEFAULT_MAX_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;

/// Parsed command line
#[derive(Parser, Debug, Clone)]
#[command(name = "fft")]
#[command(version)]
#[command(about = "Render a raw sample file as a waterfall spectrogram PNG")]
#[command(after_help = sample_format_help())]
pub struct Args {
    /// Raw, headerless sample file
    #[arg(value_name = "INPUT.samples")]
    pub input: PathBuf,

    /// PNG image to write
    #[arg(value_name = "OUTPUT.png")]
    pub output: PathBuf,

    /// log2 of the FFT length (2^log2n samples per row)
    #[arg(long = "log2n", value_name = "N", default_value_t = DEFAULT_LOG2N)]
    pub log2n: u32,

    /// Sample format (8uc, le16s, le16sc, le32fc, le64fc)
    #[arg(long = "sample.format", value_name = "FORMAT", default_value = "8uc")]
    pub sample_format: String,

    /// Sample rate in Hz; only used for the frequency readout
    #[arg(long = "sample.rate", value_name = "HZ", default_value_t = 0.0, allow_negative_numbers = true)]
    pub sample_rate: f64,

    /// Interleaved 16-bit channels per frame for le16s; channel 0 is used
    #[arg(long = "channel.stride", value_name = "CHANNELS", default_value_t = 2)]
    pub channel_stride: usize,

    /// Scale for the magnitude (0 derives it from scale.ratio)
    #[arg(long = "scale", default_value_t = 0.0, allow_negative_numbers = true)]
    pub scale: f32,

    /// Linear magnitude scale instead of log10
    #[arg(
        long = "scale.linear",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub scale_linear: bool,

    /// Ratio of the row maximum used as scale when scale is 0
    #[arg(
        long = "scale.ratio",
        value_name = "RATIO",
        default_value_t = 0.5,
        allow_negative_numbers = true
    )]
    pub scale_ratio: f32,

    /// Max height of the image when it is derived from the input size
    #[arg(long = "maxHeight", value_name = "ROWS", default_value_t = DEFAULT_MAX_HEIGHT)]
    pub max_height: u32,

    /// Height of the output image (0 fits the input up to maxHeight)
    #[arg(long = "height", value_name = "ROWS", default_value_t = 0)]
    pub height: u32,

    /// Width of the output image
    #[arg(long = "width", value_name = "COLUMNS", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window function (hanning, hamming, blackman, triangle, none)
    #[arg(long = "window", value_name = "NAME", default_value = "hanning")]
    pub window: String,

    /// Show a progress bar on stderr
    #[arg(
        long = "progress",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub progress: bool,

    /// Log run parameters (RUST_LOG overrides)
    #[arg(
        long = "verbose",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub verbose: bool,
}

impl Args {
    /// Resolve names and collect the render settings.
    pub fn to_config(&self) -> Result<WaterfallConfig> {
        let config = WaterfallConfig {
            log2n: self.log2n,
            sample_format: WaterfallConfig::parse_sample_format(&self.sample_format)?,
            sample_rate: self.sample_rate,
            channel_stride: self.channel_stride,
            scale: self.scale,
            scale_linear: self.scale_linear,
            scale_ratio: self.scale_ratio,
            max_height: self.max_height,
            height: self.height,
            width: self.width,
            window: WaterfallConfig::parse_window(&self.window)?,
            progress: self.progress,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Rewrite `-name` to `--name` for every long flag before a bare `--`.
///
/// `-h`, negative numbers and positionals pass through untouched.
pub fn normalize_go_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut flags_done = false;
    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || flags_done {
            out.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                flags_done = true;
                None
            }
            Some(s) if is_single_dash_long(s) => Some(OsString::from(format!("-{}", s))),
            _ => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

fn is_single_dash_long(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-')
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next().is_some()
}

/// Parse a full argument vector (program name first).
pub fn parse_args<I, T>(args: I) -> std::result::Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::try_parse_from(normalize_go_flags(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decoder::SampleFormat;
    use crate::core::dsp::WindowType;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["fft"];
        argv.extend_from_slice(args);
        parse_args(argv).unwrap()
    }

    #[test]
    fn test_normalize() {
        let out = normalize_go_flags(["fft", "-log2n", "4", "-h", "-1.5", "in", "--", "-width"]);
        let out: Vec<_> = out.iter().map(|s| s.to_str().unwrap()).collect();
        assert_eq!(out, ["fft", "--log2n", "4", "-h", "-1.5", "in", "--", "-width"]);
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["in.raw", "out.png"]);
        let config = args.to_config().unwrap();
        assert_eq!(config, WaterfallConfig::default());
        assert!(!args.verbose);
    }

    #[test]
    fn test_go_style_flags() {
        let args = parse(&[
            "-sample.format", "le16sc",
            "-log2n", "4",
            "-width", "16",
            "-height=1",
            "-scale.linear",
            "-window", "none",
            "-scale", "-2.5",
            "in.raw", "out.png",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.sample_format, SampleFormat::ComplexS16);
        assert_eq!(config.log2n, 4);
        assert_eq!(config.width, 16);
        assert_eq!(config.height, 1);
        assert!(config.scale_linear);
        assert_eq!(config.window, None);
        assert_eq!(config.scale, -2.5);
    }

    #[test]
    fn test_bool_with_value() {
        let args = parse(&["-scale.linear=false", "-progress=true", "--window", "blackman", "a", "b"]);
        assert!(!args.scale_linear);
        assert!(args.progress);
        assert_eq!(args.to_config().unwrap().window, Some(WindowType::Blackman));
    }

    #[test]
    fn test_unknown_names_are_config_errors() {
        let err = parse(&["-sample.format", "wav", "a", "b"]).to_config().unwrap_err();
        assert!(err.is_config());
        let err = parse(&["-window", "kaiser", "a", "b"]).to_config().unwrap_err();
        assert!(err.is_config());
        let err = parse(&["-log2n", "0", "a", "b"]).to_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_positionals() {
        assert!(parse_args(["fft", "only-input"]).is_err());
    }
}
