//! Digital Signal Processing primitives
//!
//! Everything here works on split-complex buffers: the real and imaginary
//! parts live in two separate arrays so that real-only operations (window,
//! scale, log) can address either half as a plain float slice.

pub mod fft;
pub mod spectrum;
pub mod vector;
pub mod windows;

pub use fft::{FftDirection, FftError, FftFloat, FftRadix, FftSetup, FftSetupD, FftSetupError};
pub use spectrum::{ScaleMode, SpectrumScaler};
pub use windows::WindowType;

/// A complex vector stored as two parallel arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitComplex<T = f32> {
    pub real: Vec<T>,
    pub imag: Vec<T>,
}

/// Double-precision split-complex vector.
pub type DoubleSplitComplex = SplitComplex<f64>;

impl<T: Copy + Default> SplitComplex<T> {
    /// Zero-filled vector of `len` complex elements
    pub fn new(len: usize) -> Self {
        Self {
            real: vec![T::default(); len],
            imag: vec![T::default(); len],
        }
    }

    pub fn from_parts(real: Vec<T>, imag: Vec<T>) -> Self {
        debug_assert_eq!(real.len(), imag.len(), "split-complex halves differ in length");
        Self { real, imag }
    }

    /// Number of complex elements addressable in both halves
    pub fn len(&self) -> usize {
        self.real.len().min(self.imag.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> (T, T) {
        (self.real[index], self.imag[index])
    }

    pub fn set(&mut self, index: usize, value: (T, T)) {
        self.real[index] = value.0;
        self.imag[index] = value.1;
    }

    /// Reset both halves to zero
    pub fn zero(&mut self) {
        self.real.fill(T::default());
        self.imag.fill(T::default());
    }

    /// Borrow both halves mutably at once
    pub fn parts_mut(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.real, &mut self.imag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let data: SplitComplex = SplitComplex::new(8);
        assert_eq!(data.len(), 8);
        assert!(data.real.iter().chain(data.imag.iter()).all(|&v| v == 0.0));
    }

    #[test]
    fn test_set_get_and_zero() {
        let mut data = DoubleSplitComplex::new(4);
        data.set(2, (1.5, -2.5));
        assert_eq!(data.get(2), (1.5, -2.5));
        data.zero();
        assert_eq!(data.get(2), (0.0, 0.0));
    }
}
