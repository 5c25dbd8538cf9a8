//! Window function implementations

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Hann,
    Hamming,
    Blackman,
    Triangle,
}

impl WindowType {
    pub fn all() -> [Self; 4] {
        [Self::Hann, Self::Hamming, Self::Blackman, Self::Triangle]
    }

    /// Parse a command-line name. `none` is handled by the caller.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hanning" | "hann" => Some(Self::Hann),
            "hamming" => Some(Self::Hamming),
            "blackman" => Some(Self::Blackman),
            "triangle" | "triangular" => Some(Self::Triangle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hann => "hanning",
            Self::Hamming => "hamming",
            Self::Blackman => "blackman",
            Self::Triangle => "triangle",
        }
    }

    /// Symmetric window of `size` points (denominator `size - 1`)
    pub fn generate(&self, size: usize) -> Vec<f32> {
        if size == 1 {
            return vec![1.0];
        }
        let span = (size - 1) as f64;
        (0..size)
            .map(|i| {
                let x = i as f64;
                let w = match self {
                    Self::Hann => 0.5 * (1.0 - (2.0 * PI * x / span).cos()),
                    Self::Hamming => 0.54 - 0.46 * (2.0 * PI * x / span).cos(),
                    Self::Blackman => {
                        0.42 - 0.5 * (2.0 * PI * x / span).cos()
                            + 0.08 * (4.0 * PI * x / span).cos()
                    }
                    Self::Triangle => {
                        1.0 - ((x - span / 2.0) / ((size + 1) as f64 / 2.0)).abs()
                    }
                };
                w as f32
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = WindowType::Hann.generate(1025);
        assert!(window[0].abs() < 1e-6);
        assert!(window[1024].abs() < 1e-6);
        assert!((window[512] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hann_small_odd() {
        let window = WindowType::Hann.generate(5);
        assert_eq!(window.len(), 5);
        assert!((window[2] - 1.0).abs() < 1e-6);
        assert!((window[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_hamming_and_blackman_edges() {
        let hamming = WindowType::Hamming.generate(64);
        assert!((hamming[0] - 0.08).abs() < 1e-6);
        assert!((hamming[63] - 0.08).abs() < 1e-6);

        let blackman = WindowType::Blackman.generate(65);
        assert!(blackman[0].abs() < 1e-6);
        assert!((blackman[32] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_is_symmetric() {
        let window = WindowType::Triangle.generate(7);
        for i in 0..7 {
            assert!((window[i] - window[6 - i]).abs() < 1e-6);
        }
        // peak 1 - 0 at the centre, edges 1 - 3/4
        assert!((window[3] - 1.0).abs() < 1e-6);
        assert!((window[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_names() {
        assert_eq!(WindowType::from_name("hanning"), Some(WindowType::Hann));
        assert_eq!(WindowType::from_name("hann"), Some(WindowType::Hann));
        assert_eq!(WindowType::from_name("Blackman"), Some(WindowType::Blackman));
        assert_eq!(WindowType::from_name("none"), None);
        for window in WindowType::all() {
            assert_eq!(WindowType::from_name(window.name()), Some(window));
        }
    }
}
