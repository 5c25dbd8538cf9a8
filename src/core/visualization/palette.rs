// src/core/visualization/palette.rs
//
// Fixed 13-stop waterfall gradient: black through navy and dodger blue,
// peaking at yellow, then falling off through orange into dark red.

use image::Rgba;

pub const GRADIENT: [Rgba<u8>; 13] = [
    Rgba([0x00, 0x00, 0x00, 0xff]),
    Rgba([0x00, 0x00, 0x20, 0xff]),
    Rgba([0x00, 0x00, 0x30, 0xff]),
    Rgba([0x00, 0x00, 0x50, 0xff]),
    Rgba([0x00, 0x00, 0x91, 0xff]),
    Rgba([0x1e, 0x90, 0xff, 0xff]),
    Rgba([0xff, 0xff, 0x00, 0xff]),
    Rgba([0xfe, 0x6d, 0x16, 0xff]),
    Rgba([0xff, 0x00, 0x00, 0xff]),
    Rgba([0xc6, 0x00, 0x00, 0xff]),
    Rgba([0x9f, 0x00, 0x00, 0xff]),
    Rgba([0x75, 0x00, 0x00, 0xff]),
    Rgba([0x4a, 0x00, 0x00, 0xff]),
];

/// Map a display value to a colour.
///
/// The value is clamped to `[0, 1]` and spread over `GRADIENT.len() + 1`
/// steps, so the top of the range saturates at the last stop. NaN maps to
/// the first stop.
pub fn color_for_value(value: f32) -> Rgba<u8> {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

    let position = value * (GRADIENT.len() + 1) as f32;
    let index = position as usize;
    if index >= GRADIENT.len() {
        return GRADIENT[GRADIENT.len() - 1];
    }
    let alpha = position - position.floor();
    let lo = GRADIENT[index];
    let hi = GRADIENT[(index + 1).min(GRADIENT.len() - 1)];

    let mut out = Rgba([0, 0, 0, 0xff]);
    for c in 0..3 {
        let delta = hi.0[c] as i32 - lo.0[c] as i32;
        out.0[c] = (lo.0[c] as i32 + (delta as f32 * alpha) as i32) as u8;
    }
    out
}
