//! # Triangles
//!
//! A lattice of solid upward triangles, rendered as vector paths into one
//! unit cell and pattern-filled across the buffer.
//!
//! ## Unit Cell
//!
//! With triangle height `h = 2 · pixel_size` and base `s = h · √1.25`, the
//! cell is `2s × 2h` and holds five triangles: two on the top row, three on
//! the bottom row shifted by half a base. The outer two bottom triangles
//! straddle the cell edges and are clipped, so neighbouring cells complete
//! each other's halves.
//!
//! ```text
//!  0        s        2s
//!  +----/\-----/\----+   0
//!  |   /  \   /  \   |
//!  |  /    \ /    \  |
//!  +-/------+------\-+   h
//!  |\      /\      /|
//!  | \    /  \    / |
//!  |  \  /    \  /  |
//!  +---\/------\/---+    2h
//! ```
//!
//! (Upward triangles are filled; the downward gaps stay transparent.)

use crate::error::MoireError;
use crate::raster::PixelBuffer;
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, Rect, SpreadMode, Transform,
};

/// Relative offsets of the five triangles, in units of (base, height).
const CELL_TRIANGLES: [(f32, f32); 5] = [(0.0, 0.0), (1.0, 0.0), (-0.5, 1.0), (0.5, 1.0), (1.5, 1.0)];

/// Dimensions of the repeating cell for a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    /// Height of one triangle (`2 · pixel_size`).
    pub triangle_height: f32,
    /// Base width of one triangle (`triangle_height · √1.25`).
    pub triangle_base: f32,
    /// Cell width (`2 · triangle_base`).
    pub width: f32,
    /// Cell height (`2 · triangle_height`).
    pub height: f32,
}

impl CellGeometry {
    pub fn new(pixel_size: u32) -> Self {
        let triangle_height = 2.0 * pixel_size as f32;
        let triangle_base = triangle_height * 1.25_f32.sqrt();
        Self {
            triangle_height,
            triangle_base,
            width: 2.0 * triangle_base,
            height: 2.0 * triangle_height,
        }
    }

    /// Vertices (apex, bottom-left, bottom-right) of the cell's triangles.
    pub fn triangles(&self) -> [[(f32, f32); 3]; 5] {
        CELL_TRIANGLES.map(|(rel_x, rel_y)| {
            let left = rel_x * self.triangle_base;
            let top = rel_y * self.triangle_height;
            let bottom = top + self.triangle_height;
            [
                (left + self.triangle_base / 2.0, top),
                (left, bottom),
                (left + self.triangle_base, bottom),
            ]
        })
    }
}

/// Rasterize one unit cell.
///
/// The cell is rendered into a pixmap rounded up to whole pixels, with the
/// geometry stretched horizontally to fill it exactly; [`draw`] undoes the
/// stretch when it repeats the tile.
pub fn render_cell(pixel_size: u32) -> Result<Pixmap, MoireError> {
    let geometry = CellGeometry::new(pixel_size);
    let tile_w = geometry.width.ceil() as u32;
    let tile_h = geometry.height.round() as u32;

    let mut tile = Pixmap::new(tile_w, tile_h)
        .ok_or_else(|| MoireError::Image(format!("cannot allocate {}x{} triangle cell", tile_w, tile_h)))?;
    let stretch = Transform::from_scale(tile_w as f32 / geometry.width, 1.0);
    fill_cell(&mut tile, &geometry, stretch);
    Ok(tile)
}

/// Fill the five cell triangles into `pixmap` under `transform`.
fn fill_cell(pixmap: &mut Pixmap, geometry: &CellGeometry, transform: Transform) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = false;

    for [apex, left, right] in geometry.triangles() {
        let mut pb = PathBuilder::new();
        pb.move_to(apex.0, apex.1);
        pb.line_to(left.0, left.1);
        pb.line_to(right.0, right.1);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }
}

/// Pattern-fill the whole buffer with the triangle cell.
///
/// When a single cell already covers the buffer the triangles are drawn
/// straight onto the canvas instead of allocating an oversized tile.
pub fn draw(buffer: &mut PixelBuffer, pixel_size: u32) -> Result<(), MoireError> {
    let geometry = CellGeometry::new(pixel_size);
    let (width, height) = (buffer.width(), buffer.height());
    let mut canvas = Pixmap::new(width, height)
        .ok_or_else(|| MoireError::Image(format!("cannot allocate {}x{} canvas", width, height)))?;

    if geometry.width >= width as f32 && geometry.height >= height as f32 {
        fill_cell(&mut canvas, &geometry, Transform::identity());
        return buffer.copy_alpha_from(&canvas);
    }

    let tile = render_cell(pixel_size)?;
    let mut paint = Paint::default();
    paint.anti_alias = false;
    paint.shader = Pattern::new(
        tile.as_ref(),
        SpreadMode::Repeat,
        FilterQuality::Nearest,
        1.0,
        Transform::from_scale(geometry.width / tile.width() as f32, 1.0),
    );

    let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .ok_or_else(|| MoireError::Image("empty triangle canvas".to_string()))?;
    canvas.fill_rect(rect, &paint, Transform::identity(), None);

    buffer.copy_alpha_from(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_geometry() {
        let g = CellGeometry::new(10);
        assert_eq!(g.triangle_height, 20.0);
        assert!((g.triangle_base - 22.36068).abs() < 1e-4);
        assert!((g.width - 2.0 * 10.0 * 2.0 * 1.25_f32.sqrt()).abs() < 1e-4);
        assert_eq!(g.height, 40.0);
    }

    #[test]
    fn test_bottom_row_straddles_edges() {
        let g = CellGeometry::new(5);
        let tris = g.triangles();
        // first bottom triangle's apex sits on the left edge
        assert!(tris[2][0].0.abs() < 1e-5);
        // last bottom triangle's apex sits on the right edge
        assert!((tris[4][0].0 - g.width).abs() < 1e-4);
    }

    #[test]
    fn test_render_cell_size() {
        let tile = render_cell(10).unwrap();
        assert_eq!(tile.width(), 45);
        assert_eq!(tile.height(), 40);
    }

    #[test]
    fn test_apex_filled_gap_clear() {
        let mut buf = PixelBuffer::new(90, 80);
        draw(&mut buf, 10).unwrap();
        // just below the first top apex (x ≈ 11.2)
        assert!(buf.is_opaque(11, 3));
        // between the two top triangles near their bases (x ≈ 22.4)
        assert!(!buf.is_opaque(22, 2));
        // base row of the top triangles is almost fully covered
        assert!(buf.is_opaque(5, 19));
    }

    #[test]
    fn test_single_cell_matches_tiled() {
        // one 45x40 cell covers a 40x40 buffer: direct path must agree with the tiled path
        let mut direct = PixelBuffer::new(40, 40);
        draw(&mut direct, 10).unwrap();
        let mut tiled = PixelBuffer::new(100, 100);
        draw(&mut tiled, 10).unwrap();
        let mismatches = (0..40)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .filter(|&(x, y)| direct.is_opaque(x, y) != tiled.is_opaque(x, y))
            .count();
        // edge pixels may round differently through the stretched tile
        assert!(mismatches < 40, "{} mismatches", mismatches);
    }

    #[test]
    fn test_roughly_half_covered() {
        let mut buf = PixelBuffer::new(200, 200);
        draw(&mut buf, 4).unwrap();
        let ratio = buf.opaque_count() as f64 / (200.0 * 200.0);
        assert!((ratio - 0.5).abs() < 0.06, "coverage {}", ratio);
    }
}
