use anyhow::Result;
use favicon_prep::{asset::load_rgba, asset::SQUARE_FAVICON_PATH, crop::content_bbox};
use std::path::PathBuf;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SQUARE_FAVICON_PATH));

    let img = load_rgba(&path)?;
    let width = img.width();
    let height = img.height();

    println!("Checking favicon: {}", path.display());
    println!("Image dimensions: {}x{}", width, height);

    if width == height {
        println!("✓ Image is square");
    } else {
        println!("⚠ Image is not square");
    }

    let Some(bbox) = content_bbox(&img) else {
        println!("⚠ Image is completely transparent");
        return Ok(());
    };

    let left = bbox.left;
    let right = width - bbox.right;
    let top = bbox.top;
    let bottom = height - bbox.bottom;

    println!("\nContent bbox: {}", bbox);
    println!("Transparent margins:");
    println!("  left={} right={} top={} bottom={}", left, right, top, bottom);

    // Floor division puts the odd pixel on the right/bottom
    if left.abs_diff(right) <= 1 && top.abs_diff(bottom) <= 1 {
        println!("✓ Content is centered");
    } else {
        println!("⚠ Content is off-center");
    }

    Ok(())
}
