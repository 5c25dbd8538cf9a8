//! Strided elementwise vector primitives
//!
//! Strides are counted in elements, never bytes. A stride of `k` visits
//! indices `0, k, 2k, ...`. The number of elements processed is the
//! smallest strided length among the operands, so a short destination
//! simply truncates the operation. Strides must be positive.

use num_complex::Complex32;

use super::SplitComplex;

/// Number of elements reachable in a buffer of `len` using `stride`.
pub fn strided_len(len: usize, stride: usize) -> usize {
    assert!(stride > 0, "vector stride must be positive");
    if len == 0 {
        0
    } else {
        (len - 1) / stride + 1
    }
}

fn count2(a_len: usize, a_stride: usize, b_len: usize, b_stride: usize) -> usize {
    strided_len(a_len, a_stride).min(strided_len(b_len, b_stride))
}

fn map_into(input: &[f32], is: usize, out: &mut [f32], os: usize, f: impl Fn(f32) -> f32) {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = f(input[i * is]);
    }
}

fn map_in_place(io: &mut [f32], stride: usize, f: impl Fn(f32) -> f32) {
    let n = strided_len(io.len(), stride);
    for i in 0..n {
        io[i * stride] = f(io[i * stride]);
    }
}

fn zip_into(
    a: &[f32],
    a_stride: usize,
    b: &[f32],
    b_stride: usize,
    out: &mut [f32],
    os: usize,
    f: impl Fn(f32, f32) -> f32,
) {
    let n = count2(a.len(), a_stride, b.len(), b_stride).min(strided_len(out.len(), os));
    for i in 0..n {
        out[i * os] = f(a[i * a_stride], b[i * b_stride]);
    }
}

// ============================================================================
// Fill / clear
// ============================================================================

pub fn clear(out: &mut [f32], stride: usize) {
    fill(0.0, out, stride);
}

pub fn fill(value: f32, out: &mut [f32], stride: usize) {
    map_in_place(out, stride, |_| value);
}

// ============================================================================
// Conversions to f32
// ============================================================================

/// Unsigned bytes to float. Returns the number of elements written.
pub fn convert_u8(input: &[u8], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = input[i * is] as f32;
    }
    n
}

/// Signed bytes to float. Returns the number of elements written.
pub fn convert_i8(input: &[i8], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = input[i * is] as f32;
    }
    n
}

/// Little-endian `i16` words packed in `bytes` to float.
///
/// `is` counts 16-bit words. A trailing odd byte is ignored.
pub fn convert_i16_le(bytes: &[u8], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(bytes.len() / 2, is, out.len(), os);
    for i in 0..n {
        let at = i * is * 2;
        out[i * os] = i16::from_le_bytes([bytes[at], bytes[at + 1]]) as f32;
    }
    n
}

/// Little-endian IEEE-754 single floats packed in `bytes`.
///
/// `is` counts 4-byte words.
pub fn convert_f32_le(bytes: &[u8], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(bytes.len() / 4, is, out.len(), os);
    for i in 0..n {
        let at = i * is * 4;
        let word = [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        out[i * os] = f32::from_le_bytes(word);
    }
    n
}

/// Little-endian IEEE-754 doubles packed in `bytes`, narrowed to f32.
///
/// `is` counts 8-byte words.
pub fn convert_f64_le(bytes: &[u8], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(bytes.len() / 8, is, out.len(), os);
    for i in 0..n {
        let at = i * is * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[at..at + 8]);
        out[i * os] = f64::from_le_bytes(word) as f32;
    }
    n
}

/// Narrow doubles to single precision.
pub fn narrow_f64(input: &[f64], is: usize, out: &mut [f32], os: usize) -> usize {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = input[i * is] as f32;
    }
    n
}

// ============================================================================
// Interleaved <-> split complex
// ============================================================================

/// Interleaved complex to split complex. Strides count complex elements.
pub fn ctoz(input: &[Complex32], is: usize, out: &mut SplitComplex, os: usize) -> usize {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        let c = input[i * is];
        out.real[i * os] = c.re;
        out.imag[i * os] = c.im;
    }
    n
}

/// Split complex to interleaved complex. Strides count complex elements.
pub fn ztoc(input: &SplitComplex, is: usize, out: &mut [Complex32], os: usize) -> usize {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = Complex32::new(input.real[i * is], input.imag[i * is]);
    }
    n
}

// ============================================================================
// Elementwise arithmetic
// ============================================================================

/// Clamp every element into `[low, high]`.
pub fn clip(input: &[f32], is: usize, low: f32, high: f32, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| v.max(low).min(high));
}

/// Raise every element below `low` to `low`.
pub fn threshold(input: &[f32], is: usize, low: f32, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| if v < low { low } else { v });
}

pub fn add(a: &[f32], a_stride: usize, b: &[f32], b_stride: usize, out: &mut [f32], os: usize) {
    zip_into(a, a_stride, b, b_stride, out, os, |x, y| x + y);
}

pub fn mul(a: &[f32], a_stride: usize, b: &[f32], b_stride: usize, out: &mut [f32], os: usize) {
    zip_into(a, a_stride, b, b_stride, out, os, |x, y| x * y);
}

/// `io[i] *= b[i]`, the form used to apply a window.
pub fn mul_in_place(io: &mut [f32], io_stride: usize, b: &[f32], b_stride: usize) {
    let n = count2(io.len(), io_stride, b.len(), b_stride);
    for i in 0..n {
        io[i * io_stride] *= b[i * b_stride];
    }
}

/// `out[i] = input[i] * mult + add`
pub fn scale_add(input: &[f32], is: usize, mult: f32, add: f32, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| v * mult + add);
}

pub fn scale_add_in_place(io: &mut [f32], stride: usize, mult: f32, add: f32) {
    map_in_place(io, stride, |v| v * mult + add);
}

pub fn scalar_add(input: &[f32], is: usize, add: f32, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| v + add);
}

pub fn scalar_div(input: &[f32], is: usize, divisor: f32, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| v / divisor);
}

pub fn scalar_div_in_place(io: &mut [f32], stride: usize, divisor: f32) {
    map_in_place(io, stride, |v| v / divisor);
}

pub fn negate(input: &[f32], is: usize, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| -v);
}

pub fn abs(input: &[f32], is: usize, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, f32::abs);
}

pub fn square(input: &[f32], is: usize, out: &mut [f32], os: usize) {
    map_into(input, is, out, os, |v| v * v);
}

// ============================================================================
// Complex operations
// ============================================================================

/// `out[i] = |input[i]|`
pub fn magnitude(input: &SplitComplex, is: usize, out: &mut [f32], os: usize) {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        let (re, im) = (input.real[i * is], input.imag[i * is]);
        out[i * os] = (re * re + im * im).sqrt();
    }
}

pub fn magnitude_f64(input: &SplitComplex<f64>, is: usize, out: &mut [f64], os: usize) {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        let (re, im) = (input.real[i * is], input.imag[i * is]);
        out[i * os] = (re * re + im * im).sqrt();
    }
}

/// Phase angle in radians, `atan2(im, re)`.
pub fn phase(input: &SplitComplex, is: usize, out: &mut [f32], os: usize) {
    let n = count2(input.len(), is, out.len(), os);
    for i in 0..n {
        out[i * os] = input.imag[i * is].atan2(input.real[i * is]);
    }
}

/// `out[i] = conj(a[i]) * b[i]`
pub fn conj_mul(
    a: &SplitComplex,
    a_stride: usize,
    b: &SplitComplex,
    b_stride: usize,
    out: &mut SplitComplex,
    os: usize,
) {
    let n = count2(a.len(), a_stride, b.len(), b_stride).min(strided_len(out.len(), os));
    for i in 0..n {
        let (ar, ai) = (a.real[i * a_stride], -a.imag[i * a_stride]);
        let (br, bi) = (b.real[i * b_stride], b.imag[i * b_stride]);
        out.real[i * os] = ar * br - ai * bi;
        out.imag[i * os] = ar * bi + ai * br;
    }
}

// ============================================================================
// Reductions
// ============================================================================

/// Largest element, `-inf` for an empty input.
pub fn max(input: &[f32], stride: usize) -> f32 {
    let n = strided_len(input.len(), stride);
    (0..n).map(|i| input[i * stride]).fold(f32::NEG_INFINITY, f32::max)
}

/// Smallest element, `+inf` for an empty input.
pub fn min(input: &[f32], stride: usize) -> f32 {
    let n = strided_len(input.len(), stride);
    (0..n).map(|i| input[i * stride]).fold(f32::INFINITY, f32::min)
}

pub fn sum(input: &[f32], stride: usize) -> f32 {
    let n = strided_len(input.len(), stride);
    (0..n).map(|i| input[i * stride]).sum()
}

/// Arithmetic mean, 0 for an empty input.
pub fn mean(input: &[f32], stride: usize) -> f32 {
    let n = strided_len(input.len(), stride);
    if n == 0 {
        return 0.0;
    }
    sum(input, stride) / n as f32
}

// ============================================================================
// Logarithms
// ============================================================================

/// Dense base-10 logarithm over `min(len)` elements.
pub fn log10(input: &[f32], out: &mut [f32]) {
    for (o, &v) in out.iter_mut().zip(input) {
        *o = v.log10();
    }
}

pub fn log10_in_place(io: &mut [f32], stride: usize) {
    map_in_place(io, stride, f32::log10);
}

/// How `decibels` interprets its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// `10 * log10(x / reference)`
    Power,
    /// `20 * log10(x / reference)`
    Amplitude,
}

pub fn decibels(
    input: &[f32],
    is: usize,
    reference: f32,
    out: &mut [f32],
    os: usize,
    kind: DbKind,
) {
    let factor = match kind {
        DbKind::Power => 10.0,
        DbKind::Amplitude => 20.0,
    };
    map_into(input, is, out, os, |v| factor * (v / reference).log10());
}
