//! Machine-readable reports for every command
//!
//! Each command prints human-oriented lines by default. With `--json` it
//! prints one of these structures instead, so the results can be piped into
//! other tooling.

use crate::crop::BoundingBox;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Width and height of an image in pixels
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Placement of a pasted image inside a canvas
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: u32,
    pub y: u32,
}

/// Pixel value read at a coordinate
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    /// `[red, green, blue, alpha]`
    pub rgba: [u8; 4],
}

/// How often one color occurs inside a region
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    /// `[red, green, blue, alpha]`
    pub rgba: [u8; 4],
    pub count: usize,
}

/// Rectangular region anchored at its top-left corner
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Square region of the given side starting at the origin
    pub fn top_left(side: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: side,
            height: side,
        }
    }
}

/// Result of the `inspect` command
#[derive(Serialize, Debug, Clone)]
pub struct InspectionReport {
    pub path: PathBuf,
    pub size: Size,

    /// Pixels at the four corners, clockwise from the top-left one
    pub corners: Vec<PixelSample>,

    /// Region the color table was computed over
    pub region: Region,

    /// Most frequent colors in the region, most frequent first
    pub top_colors: Vec<ColorCount>,
}

/// Result of the `crop` command
///
/// `bbox`, `cropped` and `output` are absent when the image is fully
/// transparent and nothing was written.
#[derive(Serialize, Debug, Clone)]
pub struct CropReport {
    pub path: PathBuf,
    pub original: Size,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cropped: Option<Size>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl CropReport {
    pub fn new(path: &Path, original: Size) -> Self {
        Self {
            path: path.to_path_buf(),
            original,
            bbox: None,
            cropped: None,
            output: None,
        }
    }

    /// Record where the cropped image went
    pub fn with_output(mut self, bbox: BoundingBox, cropped: Size, output: &Path) -> Self {
        self.bbox = Some(bbox);
        self.cropped = Some(cropped);
        self.output = Some(output.to_path_buf());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bbox.is_none()
    }
}

/// Result of the `square` command
#[derive(Serialize, Debug, Clone)]
pub struct SquareReport {
    pub path: PathBuf,
    pub original: Size,
    pub square: Size,
    pub offset: Offset,
    pub output: PathBuf,
}

/// Result of the `favicon` command
#[derive(Serialize, Debug, Clone)]
pub struct FaviconReport {
    pub path: PathBuf,
    pub sizes: Vec<u32>,
    pub output: PathBuf,
}

/// Pretty-print any report as JSON
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
