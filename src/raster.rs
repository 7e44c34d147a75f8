//! # Pixel Buffer
//!
//! ARGB raster storage for generated patterns.
//!
//! Every generator writes exactly two values: [`ARGB_BLACK`] (fully opaque
//! black) and [`ARGB_TRANSPARENT`]. The buffer is row-major, one `u32` per
//! pixel, `0xAARRGGBB`.
//!
//! ```text
//! index = y * width + x
//! ```

use crate::color::Rgba;
use crate::error::MoireError;
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

/// Fully opaque black.
pub const ARGB_BLACK: u32 = 0xFF00_0000;

/// Fully transparent.
pub const ARGB_TRANSPARENT: u32 = 0x0000_0000;

/// A `width × height` buffer of ARGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "pixel buffer dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![ARGB_TRANSPARENT; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the buffer already has the given dimensions and can be redrawn in place.
    #[inline]
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// ARGB value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        let i = self.index(x, y);
        self.pixels[i] = argb;
    }

    /// True if the pixel's alpha channel is non-zero.
    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.get(x, y) >> 24 != 0
    }

    /// Raw row-major pixel slice.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable row for `y`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Fill the rectangle `[x0, x1) × [y0, y1)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, argb: u32) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let row = self.row_mut(y);
            row[x0 as usize..x1 as usize].fill(argb);
        }
    }

    /// Number of opaque pixels.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p >> 24 != 0).count()
    }

    /// Overwrite this buffer from a same-sized pixmap, thresholding alpha at 50%.
    pub fn copy_alpha_from(&mut self, pixmap: &Pixmap) -> Result<(), MoireError> {
        if !self.matches(pixmap.width(), pixmap.height()) {
            return Err(MoireError::Image(format!(
                "pixmap is {}x{}, buffer is {}x{}",
                pixmap.width(),
                pixmap.height(),
                self.width,
                self.height
            )));
        }
        for (dst, src) in self.pixels.iter_mut().zip(pixmap.pixels()) {
            *dst = if src.alpha() >= 128 {
                ARGB_BLACK
            } else {
                ARGB_TRANSPARENT
            };
        }
        Ok(())
    }

    /// Convert to a pixmap, recoloring every opaque pixel to `color`.
    ///
    /// This is the source-atop recolor applied before compositing: the
    /// pattern keeps its own coverage and the ink is `color` laid over the
    /// black pattern, so a translucent color yields a darker opaque ink
    /// rather than a see-through one.
    pub fn to_pixmap(&self, color: Rgba) -> Result<Pixmap, MoireError> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(|| {
            MoireError::Image(format!(
                "cannot allocate {}x{} pixmap",
                self.width, self.height
            ))
        })?;

        let ink = source_atop_black(color);
        let clear = PremultipliedColorU8::TRANSPARENT;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(&self.pixels) {
            *dst = if src >> 24 != 0 { ink } else { clear };
        }
        Ok(pixmap)
    }
}

/// `color` composited source-atop over opaque black.
fn source_atop_black(color: Rgba) -> PremultipliedColorU8 {
    let over_black = |c: u8| ((c as u16 * color.a as u16 + 127) / 255) as u8;
    ColorU8::from_rgba(over_black(color.r), over_black(color.g), over_black(color.b), 255).premultiply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(10, 5);
        assert_eq!(buf.pixels().len(), 50);
        assert_eq!(buf.opaque_count(), 0);
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn test_zero_width_panics() {
        PixelBuffer::new(0, 5);
    }

    #[test]
    fn test_set_get() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.set(3, 2, ARGB_BLACK);
        assert_eq!(buf.get(3, 2), ARGB_BLACK);
        assert!(buf.is_opaque(3, 2));
        assert!(!buf.is_opaque(2, 3));
        assert_eq!(buf.pixels()[2 * 4 + 3], ARGB_BLACK);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.fill_rect(3, 3, 10, 10, ARGB_BLACK);
        assert_eq!(buf.opaque_count(), 4);
        assert!(buf.is_opaque(4, 4));
        assert!(!buf.is_opaque(2, 4));
    }

    #[test]
    fn test_to_pixmap_recolors() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set(0, 0, ARGB_BLACK);
        let pixmap = buf.to_pixmap(Rgba::new(255, 0, 0, 255)).unwrap();
        let px = pixmap.pixels();
        assert_eq!((px[0].red(), px[0].alpha()), (255, 255));
        assert_eq!(px[1].alpha(), 0);
    }

    #[test]
    fn test_translucent_ink_stays_opaque() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set(0, 0, ARGB_BLACK);
        let pixmap = buf.to_pixmap(Rgba::new(255, 0, 0, 128)).unwrap();
        let px = pixmap.pixels();
        assert_eq!((px[0].red(), px[0].green(), px[0].alpha()), (128, 0, 255));
        assert_eq!(px[1].alpha(), 0);
    }

    #[test]
    fn test_copy_alpha_size_mismatch() {
        let mut buf = PixelBuffer::new(3, 3);
        let pixmap = Pixmap::new(4, 3).unwrap();
        assert!(buf.copy_alpha_from(&pixmap).is_err());
    }
}
