use crate::report::{Offset, Size};
use anyhow::Result;
use image::{imageops, ImageBuffer, Rgba, RgbaImage};
use std::str::FromStr;

/// Fully transparent canvas fill.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A source image centered on a square canvas
#[derive(Debug, Clone)]
pub struct Squared {
    pub image: RgbaImage,
    pub offset: Offset,
}

/// Side of the square canvas that fits a `width` x `height` image.
pub fn canvas_side(width: u32, height: u32) -> u32 {
    width.max(height)
}

/// Where a `width` x `height` image lands when centered on its square
/// canvas. Odd leftovers go to the right/bottom margin.
pub fn centering_offset(width: u32, height: u32) -> Offset {
    let side = canvas_side(width, height);
    Offset {
        x: (side - width) / 2,
        y: (side - height) / 2,
    }
}

/// Center `source` on a square canvas filled with `background`.
///
/// With the default transparent background the source is copied as is,
/// which is what source-over compositing yields on an empty canvas. Any
/// other background is blended under the source using its alpha.
pub fn square(source: &RgbaImage, background: Rgba<u8>) -> Squared {
    let side = canvas_side(source.width(), source.height());
    let offset = centering_offset(source.width(), source.height());

    let mut canvas = ImageBuffer::from_pixel(side, side, background);
    if background == TRANSPARENT {
        imageops::replace(&mut canvas, source, offset.x.into(), offset.y.into());
    } else {
        imageops::overlay(&mut canvas, source, offset.x.into(), offset.y.into());
    }

    log::debug!(
        "Placed {} on {} canvas at ({}, {})",
        Size::new(source.width(), source.height()),
        Size::new(side, side),
        offset.x,
        offset.y
    );

    Squared {
        image: canvas,
        offset,
    }
}

/// Parse a CSS color (`#fff`, `white`, `rgba(0, 0, 0, 0.5)`, ...) into a
/// canvas fill.
pub fn parse_background(color: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid background color: {}", color))?;

    Ok(Rgba([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
        (color.alpha * 255.).round() as u8,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO: Rgba<u8> = Rgba([200, 30, 60, 255]);

    fn pasted_region_contains(offset: Offset, source: &RgbaImage, x: u32, y: u32) -> bool {
        x >= offset.x
            && x < offset.x + source.width()
            && y >= offset.y
            && y < offset.y + source.height()
    }

    #[test]
    fn tall_image_is_centered_horizontally() {
        let source = RgbaImage::from_pixel(40, 100, LOGO);
        let squared = square(&source, TRANSPARENT);

        assert_eq!(squared.image.dimensions(), (100, 100));
        assert_eq!(squared.offset, Offset { x: 30, y: 0 });

        for (x, y, pixel) in squared.image.enumerate_pixels() {
            if pasted_region_contains(squared.offset, &source, x, y) {
                assert_eq!(*pixel, LOGO, "pixel ({x}, {y}) should be the logo");
            } else {
                assert_eq!(*pixel, TRANSPARENT, "pixel ({x}, {y}) should be empty");
            }
        }
    }

    #[test]
    fn wide_image_is_centered_vertically_with_floor_offset() {
        let source = RgbaImage::from_pixel(11, 4, LOGO);
        let squared = square(&source, TRANSPARENT);

        assert_eq!(squared.image.dimensions(), (11, 11));
        assert_eq!(squared.offset, Offset { x: 0, y: 3 });
        assert_eq!(*squared.image.get_pixel(5, 2), TRANSPARENT);
        assert_eq!(*squared.image.get_pixel(5, 3), LOGO);
        assert_eq!(*squared.image.get_pixel(5, 6), LOGO);
        assert_eq!(*squared.image.get_pixel(5, 7), TRANSPARENT);
    }

    #[test]
    fn square_input_is_unchanged() {
        let source = RgbaImage::from_fn(8, 8, |x, y| {
            Rgba([x as u8 * 30, y as u8 * 30, 7, (x * y * 4) as u8])
        });
        let squared = square(&source, TRANSPARENT);

        assert_eq!(squared.offset, Offset { x: 0, y: 0 });
        assert_eq!(squared.image, source);
    }

    #[test]
    fn partial_alpha_is_preserved_on_transparent_canvas() {
        let source = RgbaImage::from_pixel(2, 6, Rgba([200, 100, 50, 77]));
        let squared = square(&source, TRANSPARENT);

        assert_eq!(*squared.image.get_pixel(2, 0), Rgba([200, 100, 50, 77]));
        assert_eq!(*squared.image.get_pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn background_fills_margins_and_shows_through_transparency() {
        let mut source = RgbaImage::from_pixel(2, 4, LOGO);
        source.put_pixel(0, 0, TRANSPARENT);
        let white = Rgba([255, 255, 255, 255]);

        let squared = square(&source, white);
        assert_eq!(squared.offset, Offset { x: 1, y: 0 });
        assert_eq!(*squared.image.get_pixel(0, 0), white);
        assert_eq!(*squared.image.get_pixel(1, 0), white);
        assert_eq!(*squared.image.get_pixel(2, 0), LOGO);
        assert_eq!(*squared.image.get_pixel(3, 3), white);
    }

    #[test]
    fn output_is_always_square() {
        for (w, h) in [(1, 1), (1, 9), (9, 1), (17, 4), (4, 17)] {
            let squared = square(&RgbaImage::new(w, h), TRANSPARENT);
            let side = w.max(h);
            assert_eq!(squared.image.dimensions(), (side, side));
            assert_eq!(
                squared.offset,
                Offset {
                    x: (side - w) / 2,
                    y: (side - h) / 2
                }
            );
        }
    }

    #[test]
    fn background_parses_css_colors() {
        assert_eq!(parse_background("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_background("#ff0000").unwrap(), Rgba([255, 0, 0, 255]));
        assert!(parse_background("not-a-color").is_err());
    }
}
