//! Multi-resolution `favicon.ico` from a square logo.

use crate::asset::{ensure_parent_dir, write_png};
use anyhow::{Context, Result};
use image::{
    codecs::ico::{IcoEncoder, IcoFrame},
    imageops::{self, FilterType},
    ColorType, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Sizes browsers look for in a favicon.
pub const DEFAULT_FAVICON_SIZES: [u32; 3] = [16, 32, 48];

/// ICO directory entries store each side in one byte, 0 meaning 256.
pub const MAX_ICO_SIZE: u32 = 256;

/// Resize a square source to every requested size and encode each one as a
/// PNG frame.
pub fn favicon_frames(source: &RgbaImage, sizes: &[u32]) -> Result<Vec<IcoFrame<'static>>> {
    if source.width() != source.height() {
        anyhow::bail!(
            "Favicon source must be square (width == height), got {}x{}",
            source.width(),
            source.height()
        );
    }
    if sizes.is_empty() {
        anyhow::bail!("At least one favicon size is required");
    }

    let mut frames = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if size == 0 || size > MAX_ICO_SIZE {
            anyhow::bail!(
                "Favicon size {} is out of range (1..={})",
                size,
                MAX_ICO_SIZE
            );
        }

        let resized = imageops::resize(source, size, size, FilterType::Lanczos3);
        let mut buf = Vec::new();
        write_png(&resized, &mut buf)?;
        frames.push(
            IcoFrame::with_encoded(buf, size, size, ColorType::Rgba8)
                .with_context(|| format!("Can't build {size}x{size} favicon frame"))?,
        );
        log::debug!("Encoded {size}x{size} favicon frame");
    }

    Ok(frames)
}

/// Write a `.ico` holding one frame per size.
pub fn write_favicon(source: &RgbaImage, sizes: &[u32], path: &Path) -> Result<()> {
    let frames = favicon_frames(source, sizes)?;

    ensure_parent_dir(path)?;
    let mut out_file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
    );
    let encoder = IcoEncoder::new(&mut out_file);
    encoder
        .encode_images(&frames)
        .context("Failed to encode favicon")?;
    out_file.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn logo(side: u32) -> RgbaImage {
        RgbaImage::from_fn(side, side, |x, _| {
            if x < side / 2 {
                Rgba([30, 60, 200, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn one_frame_per_size() {
        let frames = favicon_frames(&logo(64), &DEFAULT_FAVICON_SIZES).unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn rejects_rectangles_and_bad_sizes() {
        let wide = RgbaImage::new(64, 32);
        assert!(favicon_frames(&wide, &[16]).is_err());
        assert!(favicon_frames(&logo(64), &[]).is_err());
        assert!(favicon_frames(&logo(64), &[0]).is_err());
        assert!(favicon_frames(&logo(64), &[16, 512]).is_err());
    }

    #[test]
    fn written_icon_decodes_to_largest_frame() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public").join("favicon.ico");

        write_favicon(&logo(100), &[16, 32, 48], &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 48));
        let rgba = decoded.to_rgba8();
        assert!(rgba.get_pixel(47, 24)[3] < 5);
        assert!(rgba.get_pixel(4, 24)[3] > 250);
    }
}
