use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Where the cropper writes the tightly cropped logo.
pub const CROPPED_LOGO_PATH: &str = "public/gpu-logo-final.png";

/// Where the squarer writes the centered square asset.
pub const SQUARE_FAVICON_PATH: &str = "public/favicon-square.png";

/// Where the favicon emitter writes the multi-resolution icon.
pub const FAVICON_ICO_PATH: &str = "public/favicon.ico";

/// Load an image from disk and convert it to 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let source = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;

    log::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        source.width(),
        source.height(),
        source.color()
    );

    Ok(source.to_rgba8())
}

/// Load an image that has to be square, such as the source of a favicon.
pub fn load_square(path: &Path) -> Result<RgbaImage> {
    let source = load_rgba(path)?;

    if source.width() != source.height() {
        anyhow::bail!(
            "Source image must be square (width == height), got {}x{}",
            source.width(),
            source.height()
        );
    }

    Ok(source)
}

/// Save an RGBA image as PNG, creating missing parent directories and
/// overwriting any existing file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut out_file = BufWriter::new(
        File::create(path)
            .with_context(|| format!("Failed to create PNG file {}", path.display()))?,
    );
    write_png(image, &mut out_file)?;
    out_file.flush().context("Failed to write PNG")?;

    log::debug!("Wrote {}", path.display());
    Ok(())
}

// Encode image data as PNG with compression
pub fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent)
            .with_context(|| format!("Can't create output directory {}", parent.display())),
        _ => Ok(()),
    }
}
