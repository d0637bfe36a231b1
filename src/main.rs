use anyhow::Result;
use clap::{Parser, Subcommand};
use favicon_prep::{
    asset::{CROPPED_LOGO_PATH, FAVICON_ICO_PATH, SQUARE_FAVICON_PATH},
    commands::{
        run_crop, run_favicon, run_inspect, run_prepare, run_square, CropOptions,
        FaviconOptions, InspectOptions, PrepareOptions, SquareOptions,
    },
    favicon::DEFAULT_FAVICON_SIZES,
    inspect::{DEFAULT_REGION_SIZE, DEFAULT_TOP_COLORS},
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "favicon-prep",
    about = "Inspect, crop and square a PNG logo into favicon assets"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print corner pixels and the most common colors of the top-left region
    Inspect {
        /// Path to the logo to inspect.
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Side of the top-left region the color table is built from.
        #[clap(long, value_name = "PIXELS", default_value_t = DEFAULT_REGION_SIZE)]
        region: u32,

        /// Number of colors to list.
        #[clap(long, value_name = "N", default_value_t = DEFAULT_TOP_COLORS)]
        top: usize,

        /// Print a JSON report instead of text
        #[clap(long)]
        json: bool,
    },

    /// Crop the logo to the bounding box of its non-transparent pixels
    Crop {
        /// Path to the source logo (PNG with transparency).
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the cropped logo.
        #[clap(short, long, value_name = "FILE", default_value = CROPPED_LOGO_PATH)]
        output: PathBuf,

        /// Print a JSON report instead of text
        #[clap(long)]
        json: bool,
    },

    /// Center the logo on a transparent square canvas
    Square {
        /// Path to the cropped logo.
        #[clap(value_name = "INPUT", default_value = CROPPED_LOGO_PATH)]
        input: PathBuf,

        /// Where to write the square image.
        #[clap(short, long, value_name = "FILE", default_value = SQUARE_FAVICON_PATH)]
        output: PathBuf,

        /// Fill the canvas with this color instead of transparency (CSS color format)
        #[clap(long, value_name = "COLOR")]
        background: Option<String>,

        /// Print a JSON report instead of text
        #[clap(long)]
        json: bool,
    },

    /// Pack a square logo into a multi-resolution favicon.ico
    Favicon {
        /// Path to the square logo.
        #[clap(value_name = "INPUT", default_value = SQUARE_FAVICON_PATH)]
        input: PathBuf,

        /// Where to write the icon.
        #[clap(short, long, value_name = "FILE", default_value = FAVICON_ICO_PATH)]
        output: PathBuf,

        /// Icon sizes to embed.
        #[clap(
            short,
            long,
            value_delimiter = ',',
            value_name = "SIZES",
            default_values_t = DEFAULT_FAVICON_SIZES
        )]
        sizes: Vec<u32>,

        /// Print a JSON report instead of text
        #[clap(long)]
        json: bool,
    },

    /// Run crop, square and favicon one after another
    Prepare {
        /// Path to the source logo (PNG with transparency).
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        #[clap(long, value_name = "FILE", default_value = CROPPED_LOGO_PATH)]
        cropped: PathBuf,

        #[clap(long, value_name = "FILE", default_value = SQUARE_FAVICON_PATH)]
        square: PathBuf,

        #[clap(long, value_name = "FILE", default_value = FAVICON_ICO_PATH)]
        ico: PathBuf,

        /// Icon sizes to embed.
        #[clap(
            short,
            long,
            value_delimiter = ',',
            value_name = "SIZES",
            default_values_t = DEFAULT_FAVICON_SIZES
        )]
        sizes: Vec<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    match args.command {
        Command::Inspect {
            input,
            region,
            top,
            json,
        } => {
            run_inspect(&InspectOptions {
                input,
                region_size: region,
                top,
                json,
            })?;
        }
        Command::Crop {
            input,
            output,
            json,
        } => {
            run_crop(&CropOptions {
                input,
                output,
                json,
            })?;
        }
        Command::Square {
            input,
            output,
            background,
            json,
        } => {
            run_square(&SquareOptions {
                input,
                output,
                background,
                json,
            })?;
        }
        Command::Favicon {
            input,
            output,
            sizes,
            json,
        } => {
            run_favicon(&FaviconOptions {
                input,
                output,
                sizes,
                json,
            })?;
        }
        Command::Prepare {
            input,
            cropped,
            square,
            ico,
            sizes,
        } => {
            run_prepare(&PrepareOptions {
                input,
                cropped,
                square,
                ico,
                sizes,
            })?;
        }
    }

    Ok(())
}
