//! Waterfall image output
//!
//! Palette lookup, per-row painting with DC centring, the reference-tick
//! footer and PNG encoding.

pub mod palette;
pub mod waterfall;

pub use palette::{color_for_value, GRADIENT};
pub use waterfall::{bin_columns, centered_column, draw_footer, paint_row, save_png, FOOTER_ROWS};
