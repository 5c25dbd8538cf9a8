// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{normalize_go_flags, parse_args, Args};
pub use output::{print_error, print_sample_formats, print_sample_rate, sample_rate_lines};

use anyhow::Context;

use crate::core::WaterfallRenderer;

/// Run the CLI with parsed arguments
pub fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let sample_rate = config.sample_rate;

    let mut renderer = WaterfallRenderer::new(config)?;
    let summary = renderer
        .render_file(&args.input, &args.output)
        .with_context(|| format!("rendering {}", args.input.display()))?;
    log::info!(
        "{}x{} image, {} rows from input",
        summary.width,
        summary.height,
        summary.rows_painted
    );

    print_sample_rate(sample_rate);
    Ok(())
}
