//! Waterfall - render raw sample streams as spectrogram images
//!
//! Reads a headerless file of interleaved samples, transforms it one block
//! at a time and paints every spectrum as a row of an RGBA PNG. DC sits in
//! the middle column, negative frequencies to the left.
//!
//! ## Features
//!
//! - **Five sample formats**: `8uc`, `le16s`, `le16sc`, `le32fc`, `le64fc`
//! - **Windows**: Hann, Hamming, Blackman, triangle or none
//! - **Radix-2 FFT**: split-complex, f32 and f64 plans, in-place and
//!   out-of-place, plus a packed real transform
//! - **Strided vector primitives** for the conversion and scaling steps
//! - **Linear or log10 magnitude scaling** onto a fixed 13-stop palette
//!
//! ## Module Structure
//!
//! - `core` - decoders, DSP, renderer and image output
//! - `cli` - command-line interface of the `fft` binary
//! - `config` - render settings and validation
//! - `error` - the crate error type
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waterfall::{SampleFormat, WaterfallRenderer};
//!
//! let mut renderer = WaterfallRenderer::builder()
//!     .log2n(12)
//!     .sample_format(SampleFormat::ComplexS16)
//!     .width(1024)
//!     .build()?;
//! renderer.render_file("capture.raw".as_ref(), "capture.png".as_ref())?;
//! ```

// Core signal path
pub mod core;

// Command-line interface
pub mod cli;

// Render settings
pub mod config;

pub mod error;

pub use config::WaterfallConfig;
pub use self::core::{
    FftSetup, FftSetupD, RenderSummary, RendererBuilder, SampleDecoder, SampleFormat, ScaleMode,
    SpectrumScaler, SplitComplex, WaterfallRenderer, WindowType,
};
pub use error::{Result, WaterfallError};
