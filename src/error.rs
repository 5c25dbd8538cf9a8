// src/error.rs
//
// Error type shared by the library and the `fft` binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::dsp::fft::{FftError, FftSetupError};

/// Everything that can stop a waterfall render.
#[derive(Debug, Error)]
pub enum WaterfallError {
    /// Bad flag value, unknown sample format or window, missing arguments
    #[error("config error: {0}")]
    Config(String),

    /// Input or output file could not be opened, sized or created
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a sample block failed part way through the stream
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    FftSetup(#[from] FftSetupError),

    #[error(transparent)]
    Fft(#[from] FftError),

    /// The PNG encoder rejected the raster or could not write it
    #[error("failed to encode {}: {source}", path.display())]
    ImageEncoding {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl WaterfallError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, WaterfallError>;
