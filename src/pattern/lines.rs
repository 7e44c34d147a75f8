//! # Lines
//!
//! Horizontal and diagonal stripes, `pixel_size` pixels thick.
//!
//! Horizontal stripes tile only along Y; diagonal stripes quantize `x + y`,
//! so every anti-diagonal `x + y = c` has a single value.

use super::tile;
use crate::raster::{ARGB_BLACK, ARGB_TRANSPARENT, PixelBuffer};

/// Horizontal stripe test: opaque iff `y / size` is even.
#[inline]
pub fn horizontal_is_opaque(_x: u32, y: u32, pixel_size: u32) -> bool {
    tile(y, pixel_size) % 2 == 0
}

/// Diagonal stripe test: opaque iff `(x + y) / size` is even.
#[inline]
pub fn diagonal_is_opaque(x: u32, y: u32, pixel_size: u32) -> bool {
    tile(x + y, pixel_size) % 2 == 0
}

pub fn draw_horizontal(buffer: &mut PixelBuffer, pixel_size: u32) {
    for y in 0..buffer.height() {
        let argb = if horizontal_is_opaque(0, y, pixel_size) {
            ARGB_BLACK
        } else {
            ARGB_TRANSPARENT
        };
        buffer.row_mut(y).fill(argb);
    }
}

pub fn draw_diagonal(buffer: &mut PixelBuffer, pixel_size: u32) {
    let width = buffer.width();
    for y in 0..buffer.height() {
        let row = buffer.row_mut(y);
        for (x, px) in (0..width).zip(row.iter_mut()) {
            *px = if diagonal_is_opaque(x, y, pixel_size) {
                ARGB_BLACK
            } else {
                ARGB_TRANSPARENT
            };
        }
    }
}
