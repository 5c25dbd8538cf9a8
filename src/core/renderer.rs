// src/core/renderer.rs
//
// Waterfall driver: reads the input one block per image row, runs each
// block through decode, window, FFT and scaling, and paints the row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace};

use super::decoder::{read_block, SampleDecoder, SampleFormat};
use super::dsp::{vector, FftDirection, FftRadix, FftSetup, SpectrumScaler, SplitComplex, WindowType};
use super::visualization::{bin_columns, draw_footer, paint_row, save_png};
use crate::config::WaterfallConfig;
use crate::error::{Result, WaterfallError};

/// Builder for WaterfallRenderer configuration
pub struct RendererBuilder {
    config: WaterfallConfig,
}

impl RendererBuilder {
    pub fn new() -> Self {
        Self {
            config: WaterfallConfig::default(),
        }
    }

    pub fn log2n(mut self, log2n: u32) -> Self {
        self.config.log2n = log2n;
        self
    }

    pub fn sample_format(mut self, format: SampleFormat) -> Self {
        self.config.sample_format = format;
        self
    }

    pub fn channel_stride(mut self, stride: usize) -> Self {
        self.config.channel_stride = stride;
        self
    }

    pub fn window(mut self, window: Option<WindowType>) -> Self {
        self.config.window = window;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn max_height(mut self, max_height: u32) -> Self {
        self.config.max_height = max_height;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn scale_linear(mut self, linear: bool) -> Self {
        self.config.scale_linear = linear;
        self
    }

    pub fn scale_ratio(mut self, ratio: f32) -> Self {
        self.config.scale_ratio = ratio;
        self
    }

    pub fn progress(mut self, show: bool) -> Self {
        self.config.progress = show;
        self
    }

    pub fn build(self) -> Result<WaterfallRenderer> {
        WaterfallRenderer::new(self.config)
    }
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a file render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    /// Rows filled from input; the rest stay transparent
    pub rows_painted: u32,
}

/// Per-row processing state, reused for every block.
struct RowPipeline {
    log2n: u32,
    setup: FftSetup,
    decoder: Box<dyn SampleDecoder>,
    window: Option<Vec<f32>>,
    scaler: SpectrumScaler,
    data: SplitComplex,
    magnitudes: Vec<f32>,
    columns: Vec<f32>,
}

impl RowPipeline {
    fn process(&mut self, bytes: &[u8]) -> Result<&[f32]> {
        self.decoder.decode(bytes, &mut self.data);

        if let Some(window) = &self.window {
            vector::mul_in_place(&mut self.data.real, 1, window, 1);
            vector::mul_in_place(&mut self.data.imag, 1, window, 1);
        }

        self.setup
            .zip(&mut self.data, 1, self.log2n, FftDirection::Forward)?;
        self.scaler.apply(&self.data, &mut self.magnitudes);
        bin_columns(&self.magnitudes, &mut self.columns);
        Ok(&self.columns)
    }
}

/// Streams raw samples into a waterfall image
pub struct WaterfallRenderer {
    config: WaterfallConfig,
    pipeline: RowPipeline,
    block: Vec<u8>,
}

impl WaterfallRenderer {
    /// Validate `config` and allocate the plan and buffers.
    pub fn new(config: WaterfallConfig) -> Result<Self> {
        config.validate()?;

        let n = config.fft_len();
        let decoder = config.sample_format.decoder(config.channel_stride);
        let block = vec![0u8; n * decoder.sample_size()];
        let setup = FftSetup::new(config.log2n, FftRadix::Radix2)?;

        let pipeline = RowPipeline {
            log2n: config.log2n,
            setup,
            decoder,
            window: config.window.map(|w| w.generate(n)),
            scaler: config.scaler(),
            data: SplitComplex::new(n),
            magnitudes: vec![0.0; n],
            columns: vec![0.0; config.width as usize],
        };

        Ok(Self {
            config,
            pipeline,
            block,
        })
    }

    /// Create a builder for custom configuration
    pub fn builder() -> RendererBuilder {
        RendererBuilder::new()
    }

    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    /// Bytes consumed per image row
    pub fn block_size(&self) -> usize {
        self.block.len()
    }

    /// Image height for an input of `input_len` bytes
    pub fn rows_for_len(&self, input_len: u64) -> u32 {
        if self.config.height != 0 {
            self.config.height
        } else {
            self.config.derived_height(input_len)
        }
    }

    /// Turn one block of raw bytes into binned column values.
    ///
    /// A block shorter than `block_size()` is zero-padded.
    pub fn process_block(&mut self, bytes: &[u8]) -> Result<&[f32]> {
        self.pipeline.process(bytes)
    }

    /// Render up to `height` rows from `reader`, then draw the footer.
    ///
    /// Rendering stops early when the input runs out; the remaining rows
    /// stay transparent. A read error aborts the render.
    pub fn render<R: Read>(&mut self, reader: &mut R, height: u32) -> Result<RgbaImage> {
        Ok(self.render_rows(reader, height)?.0)
    }

    fn render_rows<R: Read>(&mut self, reader: &mut R, height: u32) -> Result<(RgbaImage, u32)> {
        let mut image = RgbaImage::new(self.config.width, height);
        let progress = self.progress_bar(height);

        let mut rows = 0;
        for y in 0..height {
            let n = read_block(reader, &mut self.block).map_err(WaterfallError::Read)?;
            if n == 0 {
                debug!("input exhausted after {} of {} rows", y, height);
                break;
            }
            if n < self.block.len() {
                debug!("row {}: short block of {} bytes, zero-padded", y, n);
            }

            let columns = self.pipeline.process(&self.block[..n])?;
            paint_row(&mut image, y, columns);
            trace!("row {} painted", y);

            rows += 1;
            progress.inc(1);
        }
        progress.finish_and_clear();

        draw_footer(&mut image);
        Ok((image, rows))
    }

    /// Render `input` and write the PNG to `output`.
    pub fn render_file(&mut self, input: &Path, output: &Path) -> Result<RenderSummary> {
        let file = File::open(input).map_err(|e| WaterfallError::io(input, e))?;

        let height = if self.config.height != 0 {
            self.config.height
        } else {
            let len = file
                .metadata()
                .map_err(|e| WaterfallError::io(input, e))?
                .len();
            let height = self.config.derived_height(len);
            debug!(
                "{} bytes at {} bytes per row: height {} (max {})",
                len,
                self.block_size(),
                height,
                self.config.max_height
            );
            height
        };

        info!(
            "rendering {} with N={} format={} window={} scale={} at {}x{}",
            input.display(),
            self.config.fft_len(),
            self.config.sample_format,
            self.config.window.map_or("none", |w| w.name()),
            self.config.scale_mode().name(),
            self.config.width,
            height
        );

        let mut reader = BufReader::new(file);
        let (image, rows_painted) = self.render_rows(&mut reader, height)?;
        save_png(&image, output)?;
        info!("wrote {}", output.display());

        Ok(RenderSummary {
            width: image.width(),
            height: image.height(),
            rows_painted,
        })
    }

    fn progress_bar(&self, rows: u32) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(rows as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} Rendering [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
