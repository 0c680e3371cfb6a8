//! Shared boundary types for Cityscape Shuffle.
//!
//! This module defines the data that crosses between the host and the core:
//! - Host → Pool: `SlideshowImage` entries read from a manifest
//! - Provider → Backend: the `Color` used for the emergency texture

use serde::{Deserialize, Serialize};

/// Prefix carried by every log line the mod emits.
pub const LOG_TAG: &str = "[CityscapeShuffle]";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Resolve to a concrete RGB triple.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb { r, g, b } => (r, g, b),
            Color::Named(n) => match n {
                NamedColor::Black => (0, 0, 0),
                NamedColor::Red => (255, 0, 0),
                NamedColor::Green => (0, 255, 0),
                NamedColor::Yellow => (255, 235, 4),
                NamedColor::Blue => (0, 0, 255),
                NamedColor::Magenta => (255, 0, 255),
                NamedColor::Cyan => (0, 255, 255),
                NamedColor::White => (255, 255, 255),
            },
        }
    }
}

impl Default for Color {
    /// Deliberately loud so an unpopulated pool is obvious on screen.
    fn default() -> Self {
        Color::Named(NamedColor::Red)
    }
}

// ---------------------------------------------------------------------------
// Host → Pool boundary
// ---------------------------------------------------------------------------

/// One entry of the main-menu slideshow as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideshowImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// The slideshow list as captured from the host. Entries may be `null` when
/// the host failed to load an image (e.g. a disabled DLC).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideshowManifest {
    #[serde(default)]
    pub images: Vec<Option<SlideshowImage>>,
}
