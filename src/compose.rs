//! # Compositing
//!
//! Builds the final moiré image from a base pattern:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ background fill          │  bottom
//! │ base layer (identity)    │
//! │ base layer (transformed) │  top
//! └──────────────────────────┘
//! ```
//!
//! Both pattern layers are recolored to the foreground color before drawing,
//! source-atop over the black pattern, so layers stay opaque where they cover.
//! The transformed layer pivots at the image centre, and the output has the
//! size of the base image. Whatever the transform moves outside is cropped.

use crate::color::Rgba;
use crate::error::MoireError;
use crate::raster::PixelBuffer;
use crate::transform::Affine;
use image::RgbaImage;
use log::debug;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

/// Composite `base` with a transformed copy of itself.
pub fn compose(
    base: &PixelBuffer,
    affine: &Affine,
    foreground: Rgba,
    background: Rgba,
) -> Result<Pixmap, MoireError> {
    let (width, height) = (base.width(), base.height());
    let mut canvas = Pixmap::new(width, height).ok_or_else(|| {
        MoireError::Image(format!("cannot allocate {}x{} canvas", width, height))
    })?;
    canvas.fill(background.to_skia());

    let layer = base.to_pixmap(foreground)?;
    canvas.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    // Sharp pattern edges survive an identity overlay unchanged
    let quality = if affine.is_identity() {
        FilterQuality::Nearest
    } else {
        FilterQuality::Bilinear
    };
    let paint = PixmapPaint {
        quality,
        ..PixmapPaint::default()
    };
    let matrix = affine.to_matrix(width as f32 / 2.0, height as f32 / 2.0);
    canvas.draw_pixmap(0, 0, layer.as_ref(), &paint, matrix, None);

    debug!("composed {}x{} with {}", width, height, affine);
    Ok(canvas)
}

/// Convert a premultiplied pixmap into a straight-alpha RGBA image.
pub fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage, MoireError> {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .ok_or_else(|| MoireError::Image("pixel data does not match image size".to_string()))
}
