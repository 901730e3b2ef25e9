// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Satzwerk document toolchain.

use serde::{Deserialize, Serialize};

/// Horizontal extent, in pixels, of the rotated watermark text at the
/// standard 25 pt Helvetica-bold rendering. Placement arithmetic offsets
/// each anchor by this amount so the -45° text stays on the canvas.
pub const TEXT_ANGLE_WIDTH: i32 = 177;

/// Width/height of a raster image, as reported by `identify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pixel coordinate on the watermark canvas.
///
/// Signed: on pages narrower than the watermark text the anchors can land
/// off-canvas, which ImageMagick accepts (the text is clipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Rotation applied to every page of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// 90° clockwise.
    East,
    /// 90° counter-clockwise.
    West,
    /// 180°.
    South,
}

impl Direction {
    /// pdftk rotation keyword, appended to a `cat` page range.
    pub fn pdftk_keyword(&self) -> &'static str {
        match self {
            Self::East => "east",
            Self::West => "west",
            Self::South => "south",
        }
    }

    /// Clockwise rotation in degrees, for degree-based helpers.
    pub fn degrees(&self) -> u32 {
        match self {
            Self::East => 90,
            Self::West => 270,
            Self::South => 180,
        }
    }

    /// Parse a direction name. `right` and `left` are accepted as aliases
    /// for east and west.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "east" | "right" => Some(Self::East),
            "west" | "left" => Some(Self::West),
            "south" => Some(Self::South),
            _ => None,
        }
    }
}

/// Inclusive page range for text extraction (`pdftotext -f/-l`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

/// Post-processing applied to extracted or recognised text.
///
/// Both filters are appended to the tool's pipeline verbatim:
/// `| egrep -o '<pattern>'` and `| tr '\n' ' '`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextFilter {
    /// Keep only substrings matching this extended regex.
    pub pattern: Option<String>,
    /// Collapse the output onto a single line.
    pub strip_newlines: bool,
}

impl TextFilter {
    /// A filter that passes the tool output through untouched.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Anchor points for the three diagonal watermark imprints on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkLayout {
    /// Size of the transparent canvas (the rasterised page size).
    pub canvas: ImageSize,
    pub upper_left: Point,
    pub center: Point,
    pub lower_right: Point,
}

impl WatermarkLayout {
    /// Compute the three anchors for a page of the given raster size.
    ///
    /// The text is drawn rotated -45°, so each anchor is offset by
    /// [`TEXT_ANGLE_WIDTH`] to keep the diagonal inside the page.
    pub fn for_page(size: ImageSize) -> Self {
        let w = size.width as f64;
        let h = size.height as f64;
        Self {
            canvas: size,
            upper_left: Point {
                x: 20,
                y: TEXT_ANGLE_WIDTH + 20,
            },
            center: Point {
                x: ((w - f64::from(TEXT_ANGLE_WIDTH)) / 2.0).round() as i32,
                y: (h / 2.0 + f64::from(TEXT_ANGLE_WIDTH)).round() as i32,
            },
            lower_right: Point {
                x: size.width as i32 - (TEXT_ANGLE_WIDTH + 20),
                y: size.height as i32 - 20,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_keywords_match_pdftk() {
        assert_eq!(Direction::East.pdftk_keyword(), "east");
        assert_eq!(Direction::West.pdftk_keyword(), "west");
        assert_eq!(Direction::South.pdftk_keyword(), "south");
    }

    #[test]
    fn direction_degrees_are_clockwise() {
        assert_eq!(Direction::East.degrees(), 90);
        assert_eq!(Direction::West.degrees(), 270);
        assert_eq!(Direction::South.degrees(), 180);
    }

    #[test]
    fn direction_parse_accepts_aliases() {
        assert_eq!(Direction::parse("right"), Some(Direction::East));
        assert_eq!(Direction::parse("LEFT"), Some(Direction::West));
        assert_eq!(Direction::parse("south"), Some(Direction::South));
        assert_eq!(Direction::parse("north"), None);
    }

    #[test]
    fn layout_for_letter_page() {
        // 612x792 is a US Letter page rasterised at 72 dpi.
        let layout = WatermarkLayout::for_page(ImageSize {
            width: 612,
            height: 792,
        });
        assert_eq!(layout.upper_left, Point { x: 20, y: 197 });
        // (612 - 177) / 2 = 217.5, rounds up.
        assert_eq!(layout.center, Point { x: 218, y: 573 });
        assert_eq!(layout.lower_right, Point { x: 415, y: 772 });
    }

    #[test]
    fn layout_anchors_may_leave_tiny_canvases() {
        let layout = WatermarkLayout::for_page(ImageSize {
            width: 100,
            height: 100,
        });
        assert!(layout.lower_right.x < 0);
    }
}
