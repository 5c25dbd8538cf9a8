//! Core signal path: decoding, DSP, rendering and image output

pub mod decoder;
pub mod dsp;
pub mod renderer;
pub mod visualization;

pub use decoder::{read_block, SampleDecoder, SampleFormat};
pub use dsp::{FftSetup, FftSetupD, ScaleMode, SpectrumScaler, SplitComplex, WindowType};
pub use renderer::{RenderSummary, RendererBuilder, WaterfallRenderer};
