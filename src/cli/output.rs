//! Terminal output for the `fft` tool

use colorful::Colorful;

use crate::core::decoder::SampleFormat;

/// Plain listing of the sample formats, used as clap's after-help
pub fn sample_format_help() -> String {
    let mut text = String::from("Sample formats:\n");
    for format in SampleFormat::all() {
        text.push_str(&format!("  {}: {}\n", format.name(), format.description()));
    }
    text
}

/// Colored sample-format listing on stderr
pub fn print_sample_formats() {
    eprintln!();
    eprintln!("{}", "Sample formats:".bold());
    for format in SampleFormat::all() {
        eprintln!("  {}: {}", format.name().cyan(), format.description());
    }
}

/// Frequency readout lines for a sample rate: `f`, `f/2`, `f/4`, `f/8`.
pub fn sample_rate_lines(rate: f64) -> Vec<String> {
    vec![
        format!("Sample rate: {:.6} Hz", rate),
        format!("Sample rate f/2: {:.6} Hz", rate / 2.0),
        format!("Sample rate f/4: {:.6} Hz", rate / 4.0),
        format!("Sample rate f/8: {:.6} Hz", rate / 8.0),
    ]
}

/// Print the readout to stdout; a zero rate prints nothing.
pub fn print_sample_rate(rate: f64) {
    if rate == 0.0 {
        return;
    }
    for line in sample_rate_lines(rate) {
        println!("{}", line);
    }
}

/// Print an error and its causes on stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".yellow(), cause);
    }
}
