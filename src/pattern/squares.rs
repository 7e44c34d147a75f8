//! # Squares
//!
//! Checkerboard of `pixel_size × pixel_size` cells. The cell containing the
//! origin is opaque.
//!
//! ```text
//! ██  ██  ██
//!   ██  ██  ██
//! ██  ██  ██
//! ```

use super::tile;
use crate::raster::{ARGB_BLACK, ARGB_TRANSPARENT, PixelBuffer};

/// Opaque iff `(x / size + y / size)` is even.
#[inline]
pub fn is_opaque(x: u32, y: u32, pixel_size: u32) -> bool {
    (tile(x, pixel_size) + tile(y, pixel_size)) % 2 == 0
}

pub fn draw(buffer: &mut PixelBuffer, pixel_size: u32) {
    let width = buffer.width();
    for y in 0..buffer.height() {
        let row = buffer.row_mut(y);
        for (x, px) in (0..width).zip(row.iter_mut()) {
            *px = if is_opaque(x, y, pixel_size) {
                ARGB_BLACK
            } else {
                ARGB_TRANSPARENT
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cells_alternate() {
        assert!(is_opaque(0, 0, 1));
        assert!(!is_opaque(1, 0, 1));
        assert!(!is_opaque(0, 1, 1));
        assert!(is_opaque(1, 1, 1));
    }

    #[test]
    fn test_cell_is_uniform() {
        for y in 0..3 {
            for x in 0..3 {
                assert!(is_opaque(x, y, 3));
                assert!(!is_opaque(x + 3, y, 3));
            }
        }
    }

    #[test]
    fn test_draw_half_coverage() {
        let mut buf = PixelBuffer::new(40, 40);
        draw(&mut buf, 4);
        assert_eq!(buf.opaque_count(), 800);
    }
}
