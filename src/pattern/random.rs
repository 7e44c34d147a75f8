//! # Random
//!
//! Random dots on a `pixel_size` grid.
//!
//! The buffer is split into `pixel_size × pixel_size` tiles (edge tiles are
//! clipped). Each tile takes exactly one draw from the RNG and every pixel in
//! it shares the outcome, so the dots stay square at any size.

use crate::raster::{ARGB_BLACK, ARGB_TRANSPARENT, PixelBuffer};
use rand::Rng;

/// Fill `buffer` with random tiles, each opaque with probability `density`.
///
/// # Panics
///
/// Panics if `density` is outside `[0, 1]`.
pub fn draw<R: Rng + ?Sized>(buffer: &mut PixelBuffer, density: f64, pixel_size: u32, rng: &mut R) {
    assert!(
        (0.0..=1.0).contains(&density),
        "pixel density must be a fraction in [0, 1], got {}",
        density
    );

    let tiles_x = buffer.width().div_ceil(pixel_size);
    let tiles_y = buffer.height().div_ceil(pixel_size);

    for ty in 0..tiles_y {
        let y0 = ty * pixel_size;
        for tx in 0..tiles_x {
            let x0 = tx * pixel_size;
            // random() is in [0, 1): density 1 always hits, density 0 never does
            let argb = if rng.random::<f64>() < density {
                ARGB_BLACK
            } else {
                ARGB_TRANSPARENT
            };
            buffer.fill_rect(x0, y0, x0 + pixel_size, y0 + pixel_size, argb);
        }
    }
}
