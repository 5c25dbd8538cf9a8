// src/core/decoder.rs
//
// Raw sample decoding. Each format turns one block of bytes into a
// split-complex buffer; components the block is too short to cover are
// left at zero.

use std::io::{ErrorKind, Read};

use crate::core::dsp::{vector, SplitComplex};

/// Sample encodings accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// `8uc`: unsigned 8-bit I/Q pairs, biased by 128
    ComplexU8,
    /// `le16s`: little-endian signed 16-bit real, one channel of a frame
    RealS16,
    /// `le16sc`: little-endian signed 16-bit I/Q pairs
    ComplexS16,
    /// `le32fc`: little-endian f32 I/Q pairs
    ComplexF32,
    /// `le64fc`: little-endian f64 I/Q pairs
    ComplexF64,
}

impl SampleFormat {
    pub fn all() -> [Self; 5] {
        [
            Self::ComplexU8,
            Self::RealS16,
            Self::ComplexS16,
            Self::ComplexF32,
            Self::ComplexF64,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ComplexU8 => "8uc",
            Self::RealS16 => "le16s",
            Self::ComplexS16 => "le16sc",
            Self::ComplexF32 => "le32fc",
            Self::ComplexF64 => "le64fc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ComplexU8 => "8-bit unsigned complex (interleaved)",
            Self::RealS16 => "Little-endian 16-bit signed real",
            Self::ComplexS16 => "Little-endian 16-bit signed complex (interleaved)",
            Self::ComplexF32 => "Little-endian 32-bit float complex (interleaved)",
            Self::ComplexF64 => "Little-endian 64-bit float complex (interleaved)",
        }
    }

    /// Build the decoder. `channel_stride` only affects `le16s`.
    pub fn decoder(&self, channel_stride: usize) -> Box<dyn SampleDecoder> {
        match self {
            Self::ComplexU8 => Box::new(ComplexU8),
            Self::RealS16 => Box::new(RealS16 {
                channel_stride: channel_stride.max(1),
            }),
            Self::ComplexS16 => Box::new(ComplexS16),
            Self::ComplexF32 => Box::new(ComplexF32),
            Self::ComplexF64 => Box::new(ComplexF64),
        }
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts raw bytes into complex samples.
pub trait SampleDecoder: Send + Sync {
    /// Bytes consumed per complex sample
    fn sample_size(&self) -> usize;

    fn description(&self) -> &'static str;

    /// Decode `bytes` into `dst`.
    ///
    /// `dst` is cleared first; a short `bytes` leaves the trailing
    /// components zero. Returns the number of samples whose real part was
    /// filled.
    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize;
}

fn tail(bytes: &[u8], from: usize) -> &[u8] {
    bytes.get(from..).unwrap_or(&[])
}

#[derive(Debug, Clone, Copy)]
pub struct ComplexU8;

impl SampleDecoder for ComplexU8 {
    fn sample_size(&self) -> usize {
        2
    }

    fn description(&self) -> &'static str {
        SampleFormat::ComplexU8.description()
    }

    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize {
        dst.zero();
        let (re, im) = dst.parts_mut();
        let nr = vector::convert_u8(bytes, 2, re, 1);
        let ni = vector::convert_u8(tail(bytes, 1), 2, im, 1);
        vector::scale_add_in_place(&mut re[..nr], 1, 1.0, -128.0);
        vector::scale_add_in_place(&mut im[..ni], 1, 1.0, -128.0);
        nr
    }
}

/// One channel of an interleaved 16-bit frame of `channel_stride` channels
#[derive(Debug, Clone, Copy)]
pub struct RealS16 {
    pub channel_stride: usize,
}

impl Default for RealS16 {
    fn default() -> Self {
        Self { channel_stride: 2 }
    }
}

impl SampleDecoder for RealS16 {
    fn sample_size(&self) -> usize {
        2 * self.channel_stride
    }

    fn description(&self) -> &'static str {
        SampleFormat::RealS16.description()
    }

    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize {
        dst.zero();
        vector::convert_i16_le(bytes, self.channel_stride, &mut dst.real, 1)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComplexS16;

impl SampleDecoder for ComplexS16 {
    fn sample_size(&self) -> usize {
        4
    }

    fn description(&self) -> &'static str {
        SampleFormat::ComplexS16.description()
    }

    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize {
        dst.zero();
        let (re, im) = dst.parts_mut();
        let n = vector::convert_i16_le(bytes, 2, re, 1);
        vector::convert_i16_le(tail(bytes, 2), 2, im, 1);
        n
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComplexF32;

impl SampleDecoder for ComplexF32 {
    fn sample_size(&self) -> usize {
        8
    }

    fn description(&self) -> &'static str {
        SampleFormat::ComplexF32.description()
    }

    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize {
        dst.zero();
        let (re, im) = dst.parts_mut();
        let n = vector::convert_f32_le(bytes, 2, re, 1);
        vector::convert_f32_le(tail(bytes, 4), 2, im, 1);
        n
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComplexF64;

impl SampleDecoder for ComplexF64 {
    fn sample_size(&self) -> usize {
        16
    }

    fn description(&self) -> &'static str {
        SampleFormat::ComplexF64.description()
    }

    fn decode(&self, bytes: &[u8], dst: &mut SplitComplex) -> usize {
        dst.zero();
        let (re, im) = dst.parts_mut();
        let n = vector::convert_f64_le(bytes, 2, re, 1);
        vector::convert_f64_le(tail(bytes, 8), 2, im, 1);
        n
    }
}

/// Read until `buf` is full or the reader reports end of input.
///
/// Returns the number of bytes read; 0 means the input is exhausted.
pub fn read_block<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
