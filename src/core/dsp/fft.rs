//! Radix-2 FFT over split-complex buffers
//!
//! An [`FftSetup`] owns the twiddle table for transforms up to
//! `2^log2n_max` points and can run any smaller power-of-two transform.
//! Transforms are unnormalized in both directions: `inverse(forward(x))`
//! equals `N * x` for the complex transforms and `2N * x` for the packed
//! real transform.

use std::fmt::Debug;

use rustfft::num_traits::Float;
use thiserror::Error;

use super::SplitComplex;

/// Largest plan that may be created.
pub const MAX_LOG2N: u32 = 24;

/// Float types the FFT engine runs on.
pub trait FftFloat: Float + Default + Send + Sync + Debug + 'static {
    fn from_f64(value: f64) -> Self;
}

impl FftFloat for f32 {
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl FftFloat for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Butterfly radix requested at plan construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftRadix {
    Radix2,
    Radix3,
    Radix5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    Forward,
    Inverse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftSetupError {
    #[error("failed to create FFT setup: radix {0:?} is not supported")]
    UnsupportedRadix(FftRadix),
    #[error("failed to create FFT setup: log2n {log2n} exceeds {max}")]
    TooLarge { log2n: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    #[error("transform of 2^{log2n} points exceeds plan capacity 2^{max}")]
    ExceedsPlan { log2n: u32, max: u32 },
    #[error("stride must be positive")]
    ZeroStride,
    #[error("buffer holds {len} elements, transform needs {needed}")]
    BufferTooShort { needed: usize, len: usize },
    #[error("real transforms need log2n >= 1")]
    RealTooSmall,
}

/// Precomputed FFT state for a size class.
///
/// Dropping the setup releases its tables.
#[derive(Debug, Clone)]
pub struct FftSetup<T: FftFloat = f32> {
    log2n_max: u32,
    // exp(-2*pi*i*k / 2^log2n_max) for k < 2^(log2n_max - 1)
    cos: Vec<T>,
    sin: Vec<T>,
}

/// Double-precision plan.
pub type FftSetupD = FftSetup<f64>;

impl<T: FftFloat> FftSetup<T> {
    pub fn new(log2n: u32, radix: FftRadix) -> Result<Self, FftSetupError> {
        if radix != FftRadix::Radix2 {
            return Err(FftSetupError::UnsupportedRadix(radix));
        }
        if log2n > MAX_LOG2N {
            return Err(FftSetupError::TooLarge {
                log2n,
                max: MAX_LOG2N,
            });
        }

        let n = 1usize << log2n;
        let half = n / 2;
        let mut cos = Vec::with_capacity(half);
        let mut sin = Vec::with_capacity(half);
        // Twiddles in f64 then narrowed, keeps large f32 transforms accurate
        for k in 0..half {
            let angle = -2.0 * std::f64::consts::PI * k as f64 / n as f64;
            cos.push(T::from_f64(angle.cos()));
            sin.push(T::from_f64(angle.sin()));
        }

        Ok(Self {
            log2n_max: log2n,
            cos,
            sin,
        })
    }

    pub fn log2n_max(&self) -> u32 {
        self.log2n_max
    }

    /// In-place complex transform of `2^log2n` elements spaced `stride` apart.
    pub fn zip(
        &self,
        io: &mut SplitComplex<T>,
        stride: usize,
        log2n: u32,
        direction: FftDirection,
    ) -> Result<(), FftError> {
        self.check(io.len(), stride, log2n, log2n)?;
        self.radix2(&mut io.real, &mut io.imag, stride, log2n, direction);
        Ok(())
    }

    /// Out-of-place complex transform. `input` is left untouched.
    pub fn zop(
        &self,
        input: &SplitComplex<T>,
        input_stride: usize,
        output: &mut SplitComplex<T>,
        output_stride: usize,
        log2n: u32,
        direction: FftDirection,
    ) -> Result<(), FftError> {
        self.check(input.len(), input_stride, log2n, log2n)?;
        self.check(output.len(), output_stride, log2n, log2n)?;

        let n = 1usize << log2n;
        for i in 0..n {
            output.real[i * output_stride] = input.real[i * input_stride];
            output.imag[i * output_stride] = input.imag[i * input_stride];
        }
        self.radix2(&mut output.real, &mut output.imag, output_stride, log2n, direction);
        Ok(())
    }

    /// In-place packed real transform of `2^log2n` real samples.
    ///
    /// The samples are packed as `N/2` complex elements: even samples in
    /// `real`, odd samples in `imag`. A forward transform leaves
    /// `2 * X[0]` in `real[0]`, `2 * X[N/2]` in `imag[0]` and `2 * X[k]` in
    /// element `k` for `0 < k < N/2`. The inverse accepts that layout and
    /// returns the packed samples scaled by `2N`.
    pub fn zrip(
        &self,
        io: &mut SplitComplex<T>,
        stride: usize,
        log2n: u32,
        direction: FftDirection,
    ) -> Result<(), FftError> {
        if log2n == 0 {
            return Err(FftError::RealTooSmall);
        }
        self.check(io.len(), stride, log2n, log2n - 1)?;

        let half = log2n - 1;
        match direction {
            FftDirection::Forward => {
                self.radix2(&mut io.real, &mut io.imag, stride, half, FftDirection::Forward);
                self.split_real_spectrum(io, stride, log2n);
            }
            FftDirection::Inverse => {
                self.merge_real_spectrum(io, stride, log2n);
                self.radix2(&mut io.real, &mut io.imag, stride, half, FftDirection::Inverse);
            }
        }
        Ok(())
    }

    /// Out-of-place packed real transform, same layout as [`Self::zrip`].
    pub fn zrop(
        &self,
        input: &SplitComplex<T>,
        input_stride: usize,
        output: &mut SplitComplex<T>,
        output_stride: usize,
        log2n: u32,
        direction: FftDirection,
    ) -> Result<(), FftError> {
        if log2n == 0 {
            return Err(FftError::RealTooSmall);
        }
        self.check(input.len(), input_stride, log2n, log2n - 1)?;
        self.check(output.len(), output_stride, log2n, log2n - 1)?;

        let m = 1usize << (log2n - 1);
        for i in 0..m {
            output.real[i * output_stride] = input.real[i * input_stride];
            output.imag[i * output_stride] = input.imag[i * input_stride];
        }
        self.zrip(output, output_stride, log2n, direction)
    }

    /// Validate a request. `plan_log2n` is checked against the plan,
    /// `elements_log2n` sizes the buffer.
    fn check(
        &self,
        len: usize,
        stride: usize,
        plan_log2n: u32,
        elements_log2n: u32,
    ) -> Result<(), FftError> {
        if plan_log2n > self.log2n_max {
            return Err(FftError::ExceedsPlan {
                log2n: plan_log2n,
                max: self.log2n_max,
            });
        }
        if stride == 0 {
            return Err(FftError::ZeroStride);
        }
        let n = 1usize << elements_log2n;
        let needed = (n - 1) * stride + 1;
        if len < needed {
            return Err(FftError::BufferTooShort { needed, len });
        }
        Ok(())
    }

    /// Twiddle `exp(-2*pi*i*k / 2^log2n)` read from the plan table.
    #[inline]
    fn twiddle(&self, k: usize, log2n: u32) -> (T, T) {
        let step = 1usize << (self.log2n_max - log2n);
        (self.cos[k * step], self.sin[k * step])
    }

    /// Iterative Cooley-Tukey over bit-reversed input.
    fn radix2(&self, re: &mut [T], im: &mut [T], stride: usize, log2n: u32, direction: FftDirection) {
        let n = 1usize << log2n;
        if n < 2 {
            return;
        }

        for i in 0..n {
            let j = reverse_bits(i, log2n);
            if j > i {
                re.swap(i * stride, j * stride);
                im.swap(i * stride, j * stride);
            }
        }

        let sign = match direction {
            FftDirection::Forward => T::one(),
            FftDirection::Inverse => -T::one(),
        };

        let mut span_log2 = 1;
        while span_log2 <= log2n {
            let span = 1usize << span_log2;
            let half = span / 2;
            for j in 0..half {
                let (wr, wi) = self.twiddle(j, span_log2);
                let wi = wi * sign;
                let mut start = 0;
                while start < n {
                    let a = (start + j) * stride;
                    let b = (start + j + half) * stride;
                    let tr = wr * re[b] - wi * im[b];
                    let ti = wr * im[b] + wi * re[b];
                    re[b] = re[a] - tr;
                    im[b] = im[a] - ti;
                    re[a] = re[a] + tr;
                    im[a] = im[a] + ti;
                    start += span;
                }
            }
            span_log2 += 1;
        }
    }

    /// Turn the half-length transform of packed real data into the packed
    /// real spectrum.
    fn split_real_spectrum(&self, io: &mut SplitComplex<T>, stride: usize, log2n: u32) {
        let m = 1usize << (log2n - 1);
        let two = T::one() + T::one();
        let half = T::one() / two;

        let (zr, zi) = (io.real[0], io.imag[0]);
        io.real[0] = two * (zr + zi);
        io.imag[0] = two * (zr - zi);

        for k in 1..=m / 2 {
            let j = m - k;
            let (ka, ja) = (k * stride, j * stride);
            let (zkr, zki) = (io.real[ka], io.imag[ka]);
            let (zjr, zji) = (io.real[ja], io.imag[ja]);

            // even and odd sample spectra at bin k
            let (er, ei) = ((zkr + zjr) * half, (zki - zji) * half);
            let (or, oi) = ((zki + zji) * half, -(zkr - zjr) * half);

            let (c, s) = self.twiddle(k, log2n);
            // X[k] = E + W^k O, X[m-k] = conj(E) + W^(m-k) conj(O), W^(m-k) = -conj(W^k)
            let xkr = er + c * or - s * oi;
            let xki = ei + c * oi + s * or;
            let xjr = er - c * or + s * oi;
            let xji = -ei + c * oi + s * or;

            io.real[ka] = two * xkr;
            io.imag[ka] = two * xki;
            io.real[ja] = two * xjr;
            io.imag[ja] = two * xji;
        }
    }

    /// Inverse of `split_real_spectrum`, up to the `2N` scale.
    fn merge_real_spectrum(&self, io: &mut SplitComplex<T>, stride: usize, log2n: u32) {
        let m = 1usize << (log2n - 1);

        let (y0, ym) = (io.real[0], io.imag[0]);
        io.real[0] = y0 + ym;
        io.imag[0] = y0 - ym;

        for k in 1..=m / 2 {
            let j = m - k;
            let (ka, ja) = (k * stride, j * stride);
            let (ykr, yki) = (io.real[ka], io.imag[ka]);
            let (yjr, yji) = (io.real[ja], io.imag[ja]);

            let (er, ei) = (ykr + yjr, yki - yji);
            let (br, bi) = (ykr - yjr, yki + yji);
            let (c, s) = self.twiddle(k, log2n);
            // O = B * conj(W^k)
            let or = br * c + bi * s;
            let oi = bi * c - br * s;

            io.real[ka] = er - oi;
            io.imag[ka] = ei + or;
            io.real[ja] = er + oi;
            io.imag[ja] = -ei + or;
        }
    }
}

fn reverse_bits(value: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    value.reverse_bits() >> (usize::BITS - bits)
}
