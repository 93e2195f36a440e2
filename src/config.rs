//! Engine configuration constants exposed to the host application

use serde::{Deserialize, Serialize};

use crate::domain::AnnotationKind;

/// Serializable RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl ShapeColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Opaque color from red, green and blue
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    /// Convert to image crate RGBA format
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl From<ShapeColor> for image::Rgba<u8> {
    fn from(c: ShapeColor) -> Self {
        image::Rgba(c.to_rgba_u8())
    }
}

impl From<ShapeColor> for tiny_skia::Color {
    fn from(c: ShapeColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Where exported screenshots go by default (Pictures or Documents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Compositing and annotation settings.
///
/// Not loaded from disk here; hosts that persist preferences can embed this
/// struct in their own serialized settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width in pixels of the bar placed between combined captures
    pub separator_thickness: u32,
    pub separator_color: ShapeColor,
    /// Fill for composite areas not covered by a capture
    pub background_color: ShapeColor,
    /// Outline width for rectangles and lines
    pub stroke_width: f32,
    /// Alpha forced onto highlight fills. Values outside 1..=254 are
    /// clamped so highlights stay translucent.
    pub highlight_alpha: u8,
    /// Rectangles must be strictly larger than this in both dimensions
    pub min_shape_size: f64,
    /// Color selected when a session starts
    pub default_color: ShapeColor,
    /// Tool selected when a session starts
    pub default_kind: AnnotationKind,
    pub save_location: SaveLocation,
}

impl EngineConfig {
    /// `highlight_alpha` clamped to a translucent value
    pub fn translucent_highlight_alpha(&self) -> u8 {
        self.highlight_alpha.clamp(1, 254)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            separator_thickness: 5,
            separator_color: ShapeColor::BLACK,
            background_color: ShapeColor::WHITE,
            stroke_width: 3.0,
            highlight_alpha: 200,
            min_shape_size: 1.0,
            default_color: ShapeColor::RED,
            default_kind: AnnotationKind::Rect,
            save_location: SaveLocation::Pictures,
        }
    }
}
