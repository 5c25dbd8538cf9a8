//! Run configuration for the waterfall renderer

mod settings;

pub use settings::{WaterfallConfig, DEFAULT_LOG2N, DEFAULT_MAX_HEIGHT, DEFAULT_WIDTH};
