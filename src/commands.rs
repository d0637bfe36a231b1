use crate::{
    asset::{load_rgba, load_square, save_png},
    crop::{crop_to_content, CropOutcome},
    favicon::write_favicon,
    inspect::{corner_coordinates, sample_pixels, top_colors},
    report::{
        to_json, CropReport, FaviconReport, InspectionReport, Region, Size, SquareReport,
    },
    square::{parse_background, square, TRANSPARENT},
};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub input: PathBuf,
    pub region_size: u32,
    pub top: usize,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct CropOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct SquareOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// CSS color for the canvas; transparent when unset
    pub background: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct FaviconOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub json: bool,
}

/// Crop, square and emit a favicon, handing files from one step to the next
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub input: PathBuf,
    pub cropped: PathBuf,
    pub square: PathBuf,
    pub ico: PathBuf,
    pub sizes: Vec<u32>,
}

pub fn run_inspect(options: &InspectOptions) -> Result<InspectionReport> {
    let image = load_rgba(&options.input)?;
    let size = Size::new(image.width(), image.height());

    let corners = sample_pixels(&image, &corner_coordinates(size.width, size.height)?)?;
    let region = Region::top_left(options.region_size);
    let top_colors = top_colors(&image, region, options.top)?;

    let report = InspectionReport {
        path: options.input.clone(),
        size,
        corners,
        region,
        top_colors,
    };

    if options.json {
        print_json(&report)?;
    } else {
        println!("Image: {} ({})", report.path.display(), report.size);
        println!("Corner colors:");
        for sample in &report.corners {
            println!("  ({}, {}): {:?}", sample.x, sample.y, sample.rgba);
        }
        println!(
            "\nMost common colors in top-left {}x{}:",
            region.width, region.height
        );
        for entry in &report.top_colors {
            println!("  {:?} x {}", entry.rgba, entry.count);
        }
    }

    Ok(report)
}

pub fn run_crop(options: &CropOptions) -> Result<CropReport> {
    let image = load_rgba(&options.input)?;
    let mut report = CropReport::new(&options.input, Size::new(image.width(), image.height()));

    if !options.json {
        println!("Original size: {}", report.original);
    }

    match crop_to_content(&image) {
        CropOutcome::Empty => {
            log::info!("{} has no visible pixels, nothing written", options.input.display());
            if !options.json {
                println!("Content bbox: none");
                println!("Image is completely transparent!");
            }
        }
        CropOutcome::Cropped { bbox, image } => {
            let cropped = Size::new(image.width(), image.height());
            if !options.json {
                println!("Content bbox: {bbox}");
                println!("Cropped size: {cropped}");
            }

            save_png(&image, &options.output)?;
            report = report.with_output(bbox, cropped, &options.output);

            if !options.json {
                println!("✓ Saved {}", options.output.display());
            }
        }
    }

    if options.json {
        print_json(&report)?;
    }

    Ok(report)
}

pub fn run_square(options: &SquareOptions) -> Result<SquareReport> {
    let background = match &options.background {
        Some(color) => parse_background(color)?,
        None => TRANSPARENT,
    };

    let image = load_rgba(&options.input)?;
    let original = Size::new(image.width(), image.height());
    if !options.json {
        println!("Original size: {original}");
    }

    let squared = square(&image, background);
    let side = squared.image.width();
    save_png(&squared.image, &options.output)?;

    let report = SquareReport {
        path: options.input.clone(),
        original,
        square: Size::new(side, side),
        offset: squared.offset,
        output: options.output.clone(),
    };

    if options.json {
        print_json(&report)?;
    } else {
        println!("New square size: {}", report.square);
        println!("✓ Saved square favicon to {}", options.output.display());
    }

    Ok(report)
}

pub fn run_favicon(options: &FaviconOptions) -> Result<FaviconReport> {
    let image = load_square(&options.input)?;

    if !options.json {
        println!("Generating {}...", options.output.display());
    }
    write_favicon(&image, &options.sizes, &options.output)?;

    let report = FaviconReport {
        path: options.input.clone(),
        sizes: options.sizes.clone(),
        output: options.output.clone(),
    };

    if options.json {
        print_json(&report)?;
    } else {
        let sizes: Vec<String> = report.sizes.iter().map(|s| format!("{s}x{s}")).collect();
        println!(
            "✓ Generated {} ({})",
            options.output.display(),
            sizes.join(", ")
        );
    }

    Ok(report)
}

/// Run the whole pipeline. Stops after the crop step when the source is
/// fully transparent.
pub fn run_prepare(options: &PrepareOptions) -> Result<()> {
    let cropped = run_crop(&CropOptions {
        input: options.input.clone(),
        output: options.cropped.clone(),
        json: false,
    })?;
    if cropped.is_empty() {
        return Ok(());
    }

    run_square(&SquareOptions {
        input: options.cropped.clone(),
        output: options.square.clone(),
        background: None,
        json: false,
    })?;

    run_favicon(&FaviconOptions {
        input: options.square.clone(),
        output: options.ico.clone(),
        sizes: options.sizes.clone(),
        json: false,
    })?;

    Ok(())
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", to_json(report)?);
    Ok(())
}
