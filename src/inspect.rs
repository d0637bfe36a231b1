//! Read-only pixel inspection: corner colors and a color frequency table.
//!
//! Used to judge whether a logo already has a transparent background or
//! still carries a flattened checkerboard / solid fill around it.

use crate::report::{ColorCount, PixelSample, Region};
use anyhow::Result;
use image::RgbaImage;
use std::collections::HashMap;

/// Side of the square region sampled at the top-left corner.
pub const DEFAULT_REGION_SIZE: u32 = 20;

/// How many entries the color table keeps.
pub const DEFAULT_TOP_COLORS: usize = 5;

/// Coordinates of the four corners: top-left, top-right, bottom-left,
/// bottom-right.
pub fn corner_coordinates(width: u32, height: u32) -> Result<[(u32, u32); 4]> {
    if width == 0 || height == 0 {
        anyhow::bail!("Image has no pixels ({}x{})", width, height);
    }

    let right = width - 1;
    let bottom = height - 1;
    Ok([(0, 0), (right, 0), (0, bottom), (right, bottom)])
}

/// Read the pixel at each coordinate.
pub fn sample_pixels(image: &RgbaImage, coordinates: &[(u32, u32)]) -> Result<Vec<PixelSample>> {
    coordinates
        .iter()
        .map(|&(x, y)| -> Result<PixelSample> {
            check_in_bounds(image, x, y)?;
            Ok(PixelSample {
                x,
                y,
                rgba: image.get_pixel(x, y).0,
            })
        })
        .collect()
}

/// Count pixel values inside `region`, most frequent first, keeping at most
/// `limit` entries. Equal counts keep the order in which the colors were
/// first seen scanning rows top to bottom.
pub fn top_colors(image: &RgbaImage, region: Region, limit: usize) -> Result<Vec<ColorCount>> {
    if region.width == 0 || region.height == 0 {
        return Ok(Vec::new());
    }

    // Both far corners must exist before anything is counted.
    check_in_bounds(image, region.x, region.y)?;
    check_in_bounds(
        image,
        region.x.saturating_add(region.width - 1),
        region.y.saturating_add(region.height - 1),
    )?;

    let mut index: HashMap<[u8; 4], usize> = HashMap::new();
    let mut counts: Vec<ColorCount> = Vec::new();

    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            let rgba = image.get_pixel(x, y).0;
            match index.get(&rgba) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(rgba, counts.len());
                    counts.push(ColorCount { rgba, count: 1 });
                }
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);

    log::debug!(
        "Counted {} distinct colors in {}x{} region at ({}, {})",
        index.len(),
        region.width,
        region.height,
        region.x,
        region.y
    );

    Ok(counts)
}

fn check_in_bounds(image: &RgbaImage, x: u32, y: u32) -> Result<()> {
    if x >= image.width() || y >= image.height() {
        anyhow::bail!(
            "Coordinate ({}, {}) is outside the {}x{} image",
            x,
            y,
            image.width(),
            image.height()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const GREY: Rgba<u8> = Rgba([204, 204, 204, 255]);

    /// Checkerboard of 2x2 cells, the way editors flatten transparency.
    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 2 + y / 2) % 2 == 0 {
                WHITE
            } else {
                GREY
            }
        })
    }

    #[test]
    fn corners_cover_all_four_edges() {
        assert_eq!(
            corner_coordinates(40, 100).unwrap(),
            [(0, 0), (39, 0), (0, 99), (39, 99)]
        );
        assert_eq!(corner_coordinates(1, 1).unwrap(), [(0, 0); 4]);
        assert!(corner_coordinates(0, 10).is_err());
    }

    #[test]
    fn samples_return_pixel_values() {
        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(3, 0, Rgba([1, 2, 3, 4]));
        image.put_pixel(0, 2, Rgba([9, 9, 9, 255]));

        let corners = corner_coordinates(4, 3).unwrap();
        let samples = sample_pixels(&image, &corners).unwrap();

        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].rgba, [0, 0, 0, 0]);
        assert_eq!((samples[1].x, samples[1].y), (3, 0));
        assert_eq!(samples[1].rgba, [1, 2, 3, 4]);
        assert_eq!(samples[2].rgba, [9, 9, 9, 255]);
    }

    #[test]
    fn out_of_bounds_sample_fails() {
        let image = RgbaImage::new(4, 3);
        let err = sample_pixels(&image, &[(0, 0), (4, 0)]).unwrap_err();
        assert!(err.to_string().contains("(4, 0)"));
    }

    #[test]
    fn checkerboard_splits_evenly() {
        let image = checkerboard(20, 20);
        let colors = top_colors(&image, Region::top_left(20), DEFAULT_TOP_COLORS).unwrap();

        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], ColorCount { rgba: WHITE.0, count: 200 });
        assert_eq!(colors[1], ColorCount { rgba: GREY.0, count: 200 });
    }

    #[test]
    fn table_is_sorted_and_truncated() {
        // Row-major: 1 red, 2 green, 3 blue, 4 black, 5 white, 6 transparent
        let palette = [
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 255, 255]),
            Rgba([0, 0, 0, 255]),
            WHITE,
            Rgba([0, 0, 0, 0]),
        ];
        let mut pixels = Vec::new();
        for (i, color) in palette.iter().enumerate() {
            pixels.extend(std::iter::repeat(*color).take(i + 1));
        }
        let mut image = RgbaImage::new(21, 1);
        for (x, color) in pixels.into_iter().enumerate() {
            image.put_pixel(x as u32, 0, color);
        }

        let region = Region {
            x: 0,
            y: 0,
            width: 21,
            height: 1,
        };
        let colors = top_colors(&image, region, 5).unwrap();

        let counts: Vec<usize> = colors.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![6, 5, 4, 3, 2]);
        assert_eq!(colors[0].rgba, [0, 0, 0, 0]);
        assert!(colors.iter().all(|c| c.rgba != [255, 0, 0, 255]));
    }

    #[test]
    fn region_beyond_image_fails() {
        let image = checkerboard(10, 10);
        let err = top_colors(&image, Region::top_left(20), 5).unwrap_err();
        assert!(err.to_string().contains("(19, 19)"));
    }

    #[test]
    fn offset_region_counts_only_its_pixels() {
        let mut image = RgbaImage::from_pixel(6, 6, WHITE);
        image.put_pixel(4, 4, GREY);
        let region = Region {
            x: 3,
            y: 3,
            width: 3,
            height: 3,
        };

        let colors = top_colors(&image, region, 5).unwrap();
        assert_eq!(colors[0], ColorCount { rgba: WHITE.0, count: 8 });
        assert_eq!(colors[1], ColorCount { rgba: GREY.0, count: 1 });
    }
}
