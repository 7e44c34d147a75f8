//! # Colors
//!
//! Foreground (pattern ink) and background colors for compositing.
//!
//! Colors are persisted as four floating-point channels in `[0, 1]` under
//! `<prefix>_alphaChannel`, `<prefix>_redChannel`, `<prefix>_greenChannel`
//! and `<prefix>_blueChannel`.

use crate::error::MoireError;
use crate::prefs::PreferenceStore;
use crate::prefs::keys::{ALPHA_SUFFIX, BLUE_SUFFIX, GREEN_SUFFIX, RED_SUFFIX};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tiny_skia::{Color, ColorU8, PremultipliedColorU8};

/// Straight-alpha 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, MoireError> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(MoireError::InvalidSettings(format!(
                "invalid color '{}': expected #rrggbb or #rrggbbaa",
                s
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| MoireError::InvalidSettings(format!("invalid color '{}': {}", s, e)))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbbaa`, or `#rrggbb` when fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Build from `[0, 1]` channels, clamping out-of-range input.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b), to_u8(a))
    }

    /// Channels as `[r, g, b, a]` in `[0, 1]`.
    pub fn to_unit(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a].map(|c| c as f64 / 255.0)
    }

    pub fn to_skia(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn premultiplied(self) -> PremultipliedColorU8 {
        ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply()
    }

    /// Read a color persisted under `prefix`, falling back per channel to `default`.
    pub fn load(store: &dyn PreferenceStore, prefix: &str, default: Rgba) -> Self {
        let [r, g, b, a] = default.to_unit();
        Self::from_unit(
            store.get_f64(&format!("{prefix}{RED_SUFFIX}"), r),
            store.get_f64(&format!("{prefix}{GREEN_SUFFIX}"), g),
            store.get_f64(&format!("{prefix}{BLUE_SUFFIX}"), b),
            store.get_f64(&format!("{prefix}{ALPHA_SUFFIX}"), a),
        )
    }

    pub fn store(self, store: &mut dyn PreferenceStore, prefix: &str) {
        let [r, g, b, a] = self.to_unit();
        store.put_f64(&format!("{prefix}{ALPHA_SUFFIX}"), a);
        store.put_f64(&format!("{prefix}{RED_SUFFIX}"), r);
        store.put_f64(&format!("{prefix}{GREEN_SUFFIX}"), g);
        store.put_f64(&format!("{prefix}{BLUE_SUFFIX}"), b);
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = MoireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#ff8000").unwrap(), Rgba::new(255, 128, 0, 255));
        assert_eq!(Rgba::from_hex("00000080").unwrap(), Rgba::new(0, 0, 0, 128));
        assert!(Rgba::from_hex("#fff").is_err());
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgba::WHITE.to_string(), "#ffffff");
        assert_eq!(Rgba::TRANSPARENT.to_hex(), "#00000000");
    }

    #[test]
    fn test_unit_clamps() {
        assert_eq!(Rgba::from_unit(2.0, -1.0, 0.5, 1.0), Rgba::new(255, 0, 128, 255));
    }

    #[test]
    fn test_store_load_roundtrip() {
        let mut prefs = MemoryPreferences::new();
        let color = Rgba::new(12, 200, 99, 180);
        color.store(&mut prefs, "foregroundColor");
        assert_eq!(Rgba::load(&prefs, "foregroundColor", Rgba::BLACK), color);
        assert_eq!(Rgba::load(&prefs, "backgroundColor", Rgba::WHITE), Rgba::WHITE);
    }
}
