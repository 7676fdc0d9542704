//! Core document types
//!
//! Geometry and color types shared by the document-access facility and
//! the highlighting pipeline.

use serde::{Deserialize, Serialize};

/// Rectangle (glyph region) in page coordinates, origin top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Highlight color: three channels, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorTag {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorTag {
    /// Green, used for drug vocabularies
    pub const GREEN: ColorTag = ColorTag {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    /// Light blue, used for patient vocabularies
    pub const LIGHT_BLUE: ColorTag = ColorTag {
        r: 0.0,
        g: 0.9,
        b: 0.9,
    };
    /// Red, used for adverse-event vocabularies
    pub const RED: ColorTag = ColorTag {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    /// Yellow, used for symptom vocabularies
    pub const YELLOW: ColorTag = ColorTag {
        r: 1.0,
        g: 1.0,
        b: 0.0,
    };
    /// Orange marker for unknown categories and ad hoc searches
    pub const MARKER: ColorTag = ColorTag {
        r: 1.0,
        g: 0.5,
        b: 0.0,
    };

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self::MARKER
    }
}

/// Persistence options for annotated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Garbage-collect unused objects
    pub compact: bool,
    /// Compress streams
    pub compress: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compact: true,
            compress: true,
        }
    }
}
