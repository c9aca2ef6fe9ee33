//! Specifies the CLI and handles arg parsing

use clap::{builder::TypedValueParser, Parser, ValueEnum};
use domcolors::KmeansConfig;
use std::{
    fmt::{Debug, Display},
    num::ParseFloatError,
    ops::RangeBounds,
    path::PathBuf,
    str::FromStr,
};

/// Supported output formats for the final colors
#[derive(Copy, Clone, ValueEnum)]
pub enum FormatOutput {
    /// sRGB hexcode
    Hex,
    /// sRGB (r,g,b) triple
    Rgb,
    /// Whitespace with true color background
    Swatch,
    /// JSON array of clusters with their exact centroid, weight, and number of frozen passes
    Json,
}

/// Sort orders for the final colors
#[derive(Copy, Clone, ValueEnum)]
pub enum SortOutput {
    /// Cluster index
    Index,
    /// Descending number of pixels
    Weight,
}

/// Ways to colorize the output text
#[derive(Copy, Clone, ValueEnum)]
pub enum ColorizeOutput {
    /// Foreground
    Fg,
    /// Background
    Bg,
}

/// Find the dominant colors of an image by performing weighted k-means++ clustering on its pixels.
#[derive(Parser)]
#[command(version)]
pub struct Options {
    /// The path to the input image
    pub image: PathBuf,

    /// The format to print the colors in
    #[arg(short, long, default_value = "hex")]
    pub output: FormatOutput,

    /// Color the foreground or background for each printed color
    #[arg(short, long)]
    pub colorize: Option<ColorizeOutput>,

    /// The order to print the colors in
    #[arg(short, long, default_value = "index")]
    pub sort: SortOutput,

    /// Reverse the printed order of the colors
    #[arg(short, long)]
    pub reverse: bool,

    /// The number of colors to find
    #[arg(short, default_value_t = KmeansConfig::DEFAULT_K, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub k: usize,

    /// The threshold used to determine k-means convergence
    ///
    /// k-means stops once no color moves by this distance or more in an iteration.
    /// Black and white are about 765 apart, so the default of 1 means colors no longer change visibly.
    /// A threshold of 0 never converges and always runs for --max-iter iterations.
    #[arg(short = 'e', long, default_value_t = KmeansConfig::DEFAULT_THRESHOLD, value_parser = parse_valid_threshold)]
    pub threshold: f64,

    /// The maximum number of k-means iterations
    ///
    /// You can use the --verbose option to see how many iterations were needed.
    #[arg(short = 'i', long, default_value_t = KmeansConfig::DEFAULT_MAX_ITER, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_iter: u32,

    /// The maximum width and height of the image before a thumbnail is created
    ///
    /// The image is scaled down so that its longer side has this many pixels.
    /// Smaller values are faster but may reduce the color accuracy,
    /// as multiple pixels in the original image are interpolated to form a pixel in the thumbnail.
    #[arg(short = 'm', long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_image_size: u32,

    /// The seed value used for the random number generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// The number of threads to use
    ///
    /// A value of 0 indicates to automatically choose the number of threads.
    #[cfg(feature = "threads")]
    #[arg(short, long, default_value_t = 0)]
    pub threads: u8,

    /// Print additional information, such as the number of k-means iterations
    ///
    /// The RUST_LOG environment variable takes precedence over this option.
    #[arg(long)]
    pub verbose: bool,
}

impl Options {
    /// The k-means arguments given by these options
    pub fn kmeans_config(&self) -> KmeansConfig {
        KmeansConfig::new(self.k)
            .with_threshold(self.threshold)
            .with_max_iter(self.max_iter)
    }
}

/// Parse a float value and ensure it in the provided, valid range
fn parse_float_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
    T: FromStr<Err = ParseFloatError> + Display + PartialOrd,
{
    let value: T = s.parse().map_err(|e| format!("{e}"))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in {range:?}"))
    }
}

/// Parse the convergence threshold and ensure it is a finite number >= `0.0`
fn parse_valid_threshold(s: &str) -> Result<f64, String> {
    parse_float_in_range(s, 0.0..f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_parsing() {
        assert_eq!(parse_valid_threshold("1.5"), Ok(1.5));
        assert_eq!(parse_valid_threshold("0"), Ok(0.0));
        assert!(parse_valid_threshold("-1").is_err());
        assert!(parse_valid_threshold("inf").is_err());
        assert!(parse_valid_threshold("NaN").is_err());
        assert!(parse_valid_threshold("one").is_err());
    }

    #[test]
    fn defaults_match_library() {
        let options = Options::parse_from(["domcolors", "image.png"]);
        assert_eq!(options.kmeans_config(), KmeansConfig::default());
        assert_eq!(options.max_image_size, 100);
    }

    #[test]
    fn zero_k_is_rejected() {
        assert!(Options::try_parse_from(["domcolors", "image.png", "-k", "0"]).is_err());
    }

    #[test]
    fn k_is_parsed_into_config() {
        let options = Options::parse_from(["domcolors", "image.png", "-k", "12"]);
        assert_eq!(options.k, 12);
        assert_eq!(options.kmeans_config().k, 12);

        assert!(Options::try_parse_from(["domcolors", "image.png", "-k", "70000"]).is_err());
        assert!(Options::try_parse_from(["domcolors", "image.png", "-k", "-3"]).is_err());
    }
}
