//! Print the dominant colors of an image found by performing weighted k-means++ clustering on its pixels.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::unreadable_literal
)]

mod cli;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use colored::Colorize;
use domcolors::{Cluster, KmeansResult, PointSet};
use image::{DynamicImage, GenericImageView, RgbImage};
use palette::Srgb;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Record the running time of a function and log the elapsed time
macro_rules! time {
    ($name: literal, $func_call: expr) => {{
        let start = Instant::now();
        let result = $func_call;
        info!("{} took {}ms", $name, start.elapsed().as_millis());
        result
    }};
}

/// Error cases for loading and decoding an image
#[derive(Debug, Error)]
enum ImageLoadError {
    /// Failed to read or decode the image file
    #[error("Failed to load the image file: {0}")]
    ImageLoad(#[from] image::ImageError),
}

/// Every error that stops the program
#[derive(Debug, Error)]
enum AppError {
    /// The image could not be loaded
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    /// k-means was given invalid arguments
    #[error("Invalid k-means arguments: {0}")]
    Kmeans(#[from] domcolors::Error),
    /// The thread pool could not be created
    #[cfg(feature = "threads")]
    #[error("Failed to create the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// The clusters could not be serialized
    #[error("Failed to serialize the colors: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let options = Options::parse();

    init_logging(options.verbose);

    let result = run_generate_and_print_palette(&options);

    // Returning Result<_> uses Debug printing instead of Display
    if let Err(e) = result {
        eprintln!("{e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Install a subscriber printing log events to stderr
///
/// `RUST_LOG` takes precedence over the level implied by `verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds a thread pool and then runs `generate_and_print_palette`
#[cfg(feature = "threads")]
fn run_generate_and_print_palette(options: &Options) -> Result<(), AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(options.threads))
        .build()?;

    pool.install(|| generate_and_print_palette(options))
}

/// Runs `generate_and_print_palette` on a single thread
#[cfg(not(feature = "threads"))]
fn run_generate_and_print_palette(options: &Options) -> Result<(), AppError> {
    generate_and_print_palette(options)
}

/// Load an image, find its dominant colors, and print the result using the given options
fn generate_and_print_palette(options: &Options) -> Result<(), AppError> {
    // Input
    let img = time!("Image loading", load_image(&options.image))?;
    let img = generate_thumbnail(img, options.max_image_size);
    let points = time!("Pixel extraction", extract_points(&img.into_rgb8()));
    debug!("Extracted {} points", points.len());

    // Processing
    let mut rng = domcolors::rng::from_seed(options.seed);
    let result = time!(
        "k-means",
        domcolors::process(&points, &options.kmeans_config(), &mut rng)
    )?;

    info!(
        "k-means ran for {} iterations and {}",
        result.iterations, result.termination
    );

    // Output
    println!("{}", format_palette(&sorted_clusters(&result, options), options)?);

    Ok(())
}

/// Load the image at the given path
fn load_image(path: &PathBuf) -> Result<DynamicImage, ImageLoadError> {
    Ok(image::open(path)?)
}

/// The dimensions of the thumbnail for an image of the given size,
/// or `None` if neither side is larger than `max_size`
///
/// The longer side is scaled to `max_size`, and the shorter side keeps the aspect ratio (rounded down).
fn thumbnail_dimensions(width: u32, height: u32, max_size: u32) -> Option<(u32, u32)> {
    if width <= max_size && height <= max_size {
        return None;
    }

    let ratio = f64::from(width) / f64::from(height);

    // multiplying or dividing max_size by a ratio < 1
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (thumb_width, thumb_height) = if ratio < 1.0 {
        ((f64::from(max_size) * ratio) as u32, max_size)
    } else {
        (max_size, (f64::from(max_size) / ratio) as u32)
    };

    Some((thumb_width.max(1), thumb_height.max(1)))
}

/// Create a thumbnail whose width and height are at most `max_size` if the image is larger
fn generate_thumbnail(image: DynamicImage, max_size: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if let Some((thumb_width, thumb_height)) = thumbnail_dimensions(width, height, max_size) {
        debug!("Creating a thumbnail with dimensions {thumb_width}x{thumb_height}");
        time!(
            "Image thumbnail",
            image.thumbnail_exact(thumb_width, thumb_height)
        )
    } else {
        debug!("Skipping image thumbnail since the image is at most {max_size}x{max_size}");
        image
    }
}

/// The pixels of an image in row-major order
fn extract_points(image: &RgbImage) -> PointSet {
    PointSet::from_rgb8(image.as_raw())
}

/// The clusters to print, ordered by the given options
fn sorted_clusters(result: &KmeansResult, options: &Options) -> Vec<Cluster> {
    let mut clusters = result.clusters.as_slice().to_vec();

    match options.sort {
        SortOutput::Index => (),
        SortOutput::Weight => clusters.sort_by_key(|cluster| std::cmp::Reverse(cluster.weight)),
    }

    if options.reverse {
        clusters.reverse();
    }

    clusters
}

/// Format the given clusters based off the provided options
fn format_palette(clusters: &[Cluster], options: &Options) -> Result<String, serde_json::Error> {
    let colors = || clusters.iter().map(Cluster::srgb).collect::<Vec<_>>();

    let text = match options.output {
        FormatOutput::Hex => color_format(&colors(), options, " ", |color| format!("{color:X}")),

        FormatOutput::Rgb => color_format(&colors(), options, " ", |color| {
            format!("({},{},{})", color.red, color.green, color.blue)
        }),

        FormatOutput::Swatch => join_colors(&colors(), "", |color| {
            "   "
                .on_truecolor(color.red, color.green, color.blue)
                .to_string()
        }),

        FormatOutput::Json => serde_json::to_string(clusters)?,
    };

    Ok(text)
}

/// Join the colors into a line using the given format
fn join_colors(colors: &[Srgb<u8>], delimiter: &str, format: impl Fn(Srgb<u8>) -> String) -> String {
    colors
        .iter()
        .map(|&color| format(color))
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Format and then colorize the text for all colors
fn color_format(
    colors: &[Srgb<u8>],
    options: &Options,
    delimiter: &str,
    format: impl Fn(Srgb<u8>) -> String,
) -> String {
    match options.colorize {
        Some(ColorizeOutput::Fg) => join_colors(colors, delimiter, |color| {
            format(color)
                .truecolor(color.red, color.green, color.blue)
                .to_string()
        }),

        Some(ColorizeOutput::Bg) => join_colors(colors, delimiter, |color| {
            format(color)
                .on_truecolor(color.red, color.green, color.blue)
                .to_string()
        }),

        None => join_colors(colors, delimiter, format),
    }
}
