use crate::report::Size;
use image::{imageops, RgbaImage};
use serde::Serialize;

/// Minimal rectangle around every pixel with non-zero alpha.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive, so the box spans
/// `right - left` by `bottom - top` pixels.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// What cropping an image produced
#[derive(Debug, Clone)]
pub enum CropOutcome {
    /// Every pixel is fully transparent; there is nothing to keep.
    Empty,
    Cropped {
        bbox: BoundingBox,
        image: RgbaImage,
    },
}

/// Compute the content bounding box of an image.
///
/// Any alpha above zero counts as content, so faint anti-aliased edges are
/// kept inside the box. Returns `None` for a fully transparent image.
pub fn content_bbox(image: &RgbaImage) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }

        bbox = Some(match bbox {
            None => BoundingBox {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            },
            Some(b) => BoundingBox {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x + 1),
                bottom: b.bottom.max(y + 1),
            },
        });
    }

    bbox
}

/// Crop an image to its content bounding box.
pub fn crop_to_content(image: &RgbaImage) -> CropOutcome {
    match content_bbox(image) {
        None => CropOutcome::Empty,
        Some(bbox) => {
            let cropped =
                imageops::crop_imm(image, bbox.left, bbox.top, bbox.width(), bbox.height())
                    .to_image();
            log::debug!(
                "Cropped {}x{} to {} at {}",
                image.width(),
                image.height(),
                bbox.size(),
                bbox
            );
            CropOutcome::Cropped {
                bbox,
                image: cropped,
            }
        }
    }
}
