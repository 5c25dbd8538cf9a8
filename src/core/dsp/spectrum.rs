//! Magnitude and display scaling of an FFT row

use super::vector;
use super::SplitComplex;

/// How magnitudes are mapped onto the `[0, 1]` palette range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// `m * s`
    Linear,
    /// `log10(m / max) * s + 1`
    #[default]
    Log,
}

impl ScaleMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log10",
        }
    }
}

/// Turns a transformed block into per-bin display values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumScaler {
    pub mode: ScaleMode,
    /// Explicit multiplier; 0 derives it from the data
    pub scale: f32,
    /// Fraction of the row maximum used when `scale` is 0
    pub ratio: f32,
}

impl Default for SpectrumScaler {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Log,
            scale: 0.0,
            ratio: 0.5,
        }
    }
}

impl SpectrumScaler {
    pub fn new(mode: ScaleMode, scale: f32, ratio: f32) -> Self {
        Self { mode, scale, ratio }
    }

    /// Fill `out` with display values for the first `out.len()` bins.
    ///
    /// The DC bin is zeroed before the row maximum is taken. Every output
    /// is finite afterwards: NaN becomes 0 and either infinity becomes 1.
    /// In log mode an empty bin, the zeroed DC bin included, is `-inf` and
    /// so lands at the top of the scale.
    pub fn apply(&self, data: &SplitComplex, out: &mut [f32]) {
        vector::magnitude(data, 1, out, 1);
        if let Some(dc) = out.first_mut() {
            *dc = 0.0;
        }
        let peak = vector::max(out, 1);

        match self.mode {
            ScaleMode::Linear => {
                let s = if self.scale != 0.0 {
                    self.scale
                } else {
                    1.0 / (peak * self.ratio)
                };
                vector::scale_add_in_place(out, 1, s, 0.0);
            }
            ScaleMode::Log => {
                let s = if self.scale != 0.0 { self.scale } else { self.ratio };
                vector::scalar_div_in_place(out, 1, peak);
                vector::log10_in_place(out, 1);
                vector::scale_add_in_place(out, 1, s, 1.0);
            }
        }

        for v in out.iter_mut() {
            *v = finite_or_clamped(*v);
        }
    }
}

/// Replace non-finite display values.
pub fn finite_or_clamped(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else if value.is_infinite() {
        1.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(real: &[f32], imag: &[f32]) -> SplitComplex {
        SplitComplex::from_parts(real.to_vec(), imag.to_vec())
    }

    #[test]
    fn test_linear_derived_scale() {
        let data = spectrum(&[100.0, 3.0, 0.0, 1.0], &[0.0, 4.0, 2.0, 0.0]);
        let mut out = [0.0f32; 4];
        SpectrumScaler::new(ScaleMode::Linear, 0.0, 0.5).apply(&data, &mut out);
        // dc suppressed, max 5, s = 1 / 2.5
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 2.0).abs() < 1e-6);
        assert!((out[2] - 0.8).abs() < 1e-6);
        assert!((out[3] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_linear_explicit_scale() {
        let data = spectrum(&[0.0, 3.0], &[0.0, 4.0]);
        let mut out = [0.0f32; 2];
        SpectrumScaler::new(ScaleMode::Linear, 0.1, 0.5).apply(&data, &mut out);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_log_scale_anchors_peak_at_one() {
        let data = spectrum(&[7.0, 10.0, 1.0, 0.1], &[0.0; 4]);
        let mut out = [0.0f32; 4];
        SpectrumScaler::default().apply(&data, &mut out);
        // suppressed dc is log10(0)
        assert_eq!(out[0], 1.0);
        assert!((out[1] - 1.0).abs() < 1e-6);
        assert!((out[2] - 0.5).abs() < 1e-6);
        assert!(out[3].abs() < 1e-6);
    }

    #[test]
    fn test_silent_row_is_finite() {
        let data = SplitComplex::new(8);
        for mode in [ScaleMode::Linear, ScaleMode::Log] {
            let mut out = [0.5f32; 8];
            SpectrumScaler::new(mode, 0.0, 0.5).apply(&data, &mut out);
            assert!(out.iter().all(|v| *v == 0.0), "{:?} gave {:?}", mode, out);
        }
    }

    #[test]
    fn test_log_mode_empty_bins_saturate() {
        let data = spectrum(&[3.0, 0.0, 4.0, 0.0], &[0.0, 0.0, 0.0, 0.0]);
        let mut out = [0.0f32; 4];
        SpectrumScaler::new(ScaleMode::Log, 0.0, 0.5).apply(&data, &mut out);
        assert_eq!(out, [1.0, 1.0, 1.0, 1.0]);

        SpectrumScaler::new(ScaleMode::Linear, 0.0, 0.5).apply(&data, &mut out);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_non_finite_replacement() {
        assert_eq!(finite_or_clamped(f32::NAN), 0.0);
        assert_eq!(finite_or_clamped(f32::INFINITY), 1.0);
        assert_eq!(finite_or_clamped(f32::NEG_INFINITY), 1.0);
        assert_eq!(finite_or_clamped(0.25), 0.25);
    }
}
