//! # Pattern Generation
//!
//! Procedural base images for the moiré overlay. Each mode is a pure function
//! of `(width, height, pixel_size)`, except [`PatternMode::Random`] which also
//! consumes randomness (one draw per tile) and the density fraction.
//!
//! Tile coordinates are pixel coordinates integer-divided by `pixel_size`.
//!
//! | Mode | Opaque when |
//! |------|-------------|
//! | [`Random`](PatternMode::Random) | tile's Bernoulli(density) draw succeeds |
//! | [`Squares`](PatternMode::Squares) | `(tx + ty) mod 2 == 0` |
//! | [`Triangles`](PatternMode::Triangles) | inside an upward triangle of the lattice |
//! | [`HorizontalLines`](PatternMode::HorizontalLines) | `ty mod 2 == 0` |
//! | [`DiagonalLines`](PatternMode::DiagonalLines) | `((x + y) / size) mod 2 == 0` |
//!
//! ## Adding a New Mode
//!
//! 1. Create `src/pattern/mymode.rs` with a `draw` function
//! 2. Add a variant to [`PatternMode`] and append it to [`PatternMode::ALL`]
//!    (append only: the index is persisted)
//! 3. Dispatch it in [`PatternMode::draw`]

pub mod lines;
pub mod random;
pub mod squares;
pub mod triangles;

use crate::error::MoireError;
use crate::raster::PixelBuffer;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// The available base-image algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternMode {
    /// Random square dots.
    #[default]
    Random,
    /// Checkerboard.
    Squares,
    /// Triangle lattice.
    Triangles,
    /// Horizontal stripes.
    HorizontalLines,
    /// Diagonal stripes.
    DiagonalLines,
}

impl PatternMode {
    /// All modes, in display (and persisted index) order.
    pub const ALL: [PatternMode; 5] = [
        PatternMode::Random,
        PatternMode::Squares,
        PatternMode::Triangles,
        PatternMode::HorizontalLines,
        PatternMode::DiagonalLines,
    ];

    /// Machine name (lowercase, e.g., "horizontal_lines").
    pub fn name(self) -> &'static str {
        match self {
            PatternMode::Random => "random",
            PatternMode::Squares => "squares",
            PatternMode::Triangles => "triangles",
            PatternMode::HorizontalLines => "horizontal_lines",
            PatternMode::DiagonalLines => "diagonal_lines",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            PatternMode::Random => "Random",
            PatternMode::Squares => "Squares",
            PatternMode::Triangles => "Triangles",
            PatternMode::HorizontalLines => "Horizontal lines",
            PatternMode::DiagonalLines => "Diagonal lines",
        }
    }

    /// Look up a mode by name. Case-insensitive; `-`, `_` and spaces are interchangeable.
    pub fn by_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "random" | "dots" => Some(PatternMode::Random),
            "squares" | "checkerboard" => Some(PatternMode::Squares),
            "triangles" => Some(PatternMode::Triangles),
            "horizontal_lines" | "horizontal" => Some(PatternMode::HorizontalLines),
            "diagonal_lines" | "diagonal" => Some(PatternMode::DiagonalLines),
            _ => None,
        }
    }

    /// Position in [`ALL`](Self::ALL); this is the persisted `imageModeIndex`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode at `index` in [`ALL`](Self::ALL), if any.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Like [`from_index`](Self::from_index), falling back to [`PatternMode::Random`].
    pub fn from_index_or_default(index: i64) -> Self {
        Self::from_index(index).unwrap_or_default()
    }

    /// Whether the pixel density setting affects this mode.
    pub fn uses_density(self) -> bool {
        matches!(self, PatternMode::Random)
    }

    /// Draw this mode into `buffer`, overwriting every pixel.
    ///
    /// `density` is a fraction in `[0, 1]` and only read by `Random`.
    ///
    /// # Panics
    ///
    /// Panics if `pixel_size` is zero, or if `density` is outside `[0, 1]`
    /// in `Random` mode. Callers validate settings before generating.
    pub fn draw<R: Rng + ?Sized>(
        self,
        buffer: &mut PixelBuffer,
        pixel_size: u32,
        density: f64,
        rng: &mut R,
    ) -> Result<(), MoireError> {
        assert!(pixel_size >= 1, "pixel size must be at least 1, got {}", pixel_size);

        let started = Instant::now();
        match self {
            PatternMode::Random => random::draw(buffer, density, pixel_size, rng),
            PatternMode::Squares => squares::draw(buffer, pixel_size),
            PatternMode::Triangles => triangles::draw(buffer, pixel_size)?,
            PatternMode::HorizontalLines => lines::draw_horizontal(buffer, pixel_size),
            PatternMode::DiagonalLines => lines::draw_diagonal(buffer, pixel_size),
        }
        debug!(
            "drew {} {}x{} (size {}) in {:?}",
            self.name(),
            buffer.width(),
            buffer.height(),
            pixel_size,
            started.elapsed()
        );
        Ok(())
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate a fresh `width × height` base image.
///
/// Random mode draws from the thread RNG, so every call is a reroll.
pub fn generate(
    width: u32,
    height: u32,
    mode: PatternMode,
    pixel_size: u32,
    density: f64,
) -> Result<PixelBuffer, MoireError> {
    generate_with_rng(width, height, mode, pixel_size, density, &mut rand::rng())
}

/// [`generate`] with a caller-supplied RNG (seeded for reproducible output).
pub fn generate_with_rng<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    mode: PatternMode,
    pixel_size: u32,
    density: f64,
    rng: &mut R,
) -> Result<PixelBuffer, MoireError> {
    let mut buffer = PixelBuffer::new(width, height);
    mode.draw(&mut buffer, pixel_size, density, rng)?;
    Ok(buffer)
}

/// Tile index of a pixel coordinate.
#[inline]
pub fn tile(coord: u32, pixel_size: u32) -> u32 {
    coord / pixel_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_by_name() {
        assert_eq!(PatternMode::by_name("squares"), Some(PatternMode::Squares));
        assert_eq!(PatternMode::by_name("SQUARES"), Some(PatternMode::Squares));
        assert_eq!(PatternMode::by_name("horizontal-lines"), Some(PatternMode::HorizontalLines));
        assert_eq!(PatternMode::by_name("Diagonal lines"), Some(PatternMode::DiagonalLines));
        assert_eq!(PatternMode::by_name("hexagons"), None);
    }

    #[test]
    fn test_name_roundtrip() {
        for mode in PatternMode::ALL {
            assert_eq!(PatternMode::by_name(mode.name()), Some(mode));
            assert_eq!(PatternMode::by_name(mode.label()), Some(mode));
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, mode) in PatternMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(PatternMode::from_index(i as i64), Some(*mode));
        }
    }

    #[test]
    fn test_from_index_or_default() {
        assert_eq!(PatternMode::from_index_or_default(1), PatternMode::Squares);
        assert_eq!(PatternMode::from_index_or_default(99), PatternMode::Random);
        assert_eq!(PatternMode::from_index_or_default(-1), PatternMode::Random);
    }

    #[test]
    fn test_uses_density() {
        assert!(PatternMode::Random.uses_density());
        assert!(!PatternMode::Triangles.uses_density());
    }

    #[test]
    fn test_generate_dimensions() {
        for mode in PatternMode::ALL {
            let buf = generate_with_rng(37, 21, mode, 3, 0.5, &mut StdRng::seed_from_u64(1)).unwrap();
            assert_eq!((buf.width(), buf.height()), (37, 21), "{}", mode);
        }
    }

    #[test]
    fn test_deterministic_modes_ignore_rng() {
        for mode in [PatternMode::Squares, PatternMode::HorizontalLines, PatternMode::DiagonalLines] {
            let a = generate_with_rng(20, 20, mode, 2, 0.5, &mut StdRng::seed_from_u64(1)).unwrap();
            let b = generate_with_rng(20, 20, mode, 2, 0.5, &mut StdRng::seed_from_u64(2)).unwrap();
            assert_eq!(a, b, "{}", mode);
        }
    }

    #[test]
    #[should_panic(expected = "pixel size must be at least 1")]
    fn test_zero_pixel_size_fails_fast() {
        let _ = generate(10, 10, PatternMode::Squares, 0, 0.5);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PatternMode::HorizontalLines).unwrap();
        assert_eq!(json, "\"horizontal_lines\"");
    }
}
