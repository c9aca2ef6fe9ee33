//! Find the dominant colors of an image by performing weighted k-means++ clustering on its pixels.
//!
//! Colors are compared with the "redmean" distance,
//! a cheap approximation of perceptual color difference that weights each RGB channel by the average red value.
//!
//! Decoding images and picking which pixels to use are left to the caller:
//! this crate only clusters an ordered sequence of colors.
//!
//! # Examples
//!
//! ## Read an image file and get 5 dominant colors.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let pixels: Vec<u8> = Vec::new();
//! // e.g., from `image::open("some image")?.into_rgb8().into_raw()`
//! let srgb = palette::cast::from_component_slice(&pixels);
//! let config = domcolors::KmeansConfig::new(5);
//! let result = domcolors::from_srgb(srgb, &config, 0)?;
//!
//! for cluster in &result.clusters {
//! 	println!("{:X} ({} pixels)", cluster.srgb(), cluster.weight);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Run k-means multiple times on the same points.
//!
//! ```
//! use domcolors::{KmeansConfig, Point, PointSet};
//!
//! # fn main() -> Result<(), domcolors::Error> {
//! let points = [[0, 0, 0], [10, 10, 10], [250, 250, 250]]
//! 	.map(Point::from)
//! 	.into_iter()
//! 	.collect::<PointSet>();
//!
//! let mut rng = domcolors::rng::from_seed(42);
//! let two = domcolors::process(&points, &KmeansConfig::new(2), &mut rng)?;
//! let three = domcolors::process(&points, &KmeansConfig::new(3).with_threshold(0.5), &mut rng)?;
//!
//! assert_eq!(two.clusters.len(), 2);
//! assert_eq!(three.clusters.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Arguments
//!
//! Here are explanations of the arguments held in a [`KmeansConfig`].
//!
//! If `k` is 0 or an empty set of points is provided, then an [`Error`] is returned.
//!
//! ## K
//!
//! This is the number of dominant colors to find.
//!
//! The result always holds exactly `k` clusters, in index order.
//! If there are fewer distinct colors than `k`, some clusters will share a centroid,
//! and clusters that never win a point keep a weight of 0.
//!
//! ## Threshold
//!
//! k-means stops once every centroid moved less than this distance during an iteration.
//! The distance is in the same units as [`distance`], where black and white are about `765.0` apart.
//!
//! The default of `1.0` means that the centroids no longer change by a visible amount.
//! A threshold of `0.0` never lets a run converge, so it will always run for `max_iter` iterations.
//!
//! ## Max Iterations
//!
//! This is the maximum number of iterations allowed for a k-means run.
//!
//! k-means normally stops due to the threshold well before this,
//! but the redmean distance does not guarantee that every run converges.
//! The [`Termination`] in the result tells which of the two stopped the run.
//!
//! ## Weighting
//!
//! The initial centroids are chosen with k-means++,
//! but each point is weighted by its [`Weighting`] of the distance to the closest centroid chosen so far.
//! [`Weighting::Linear`], the only option, uses the distance itself instead of the usual squared distance.
//!
//! ## Seed
//!
//! This is the value used to seed the random number generator which is used to choose the initial centroids.
//! The same points, arguments, and seed always give the same result.
//!
//! Provide any arbitrary value like `0`, `42`, or `123456789`.
//! Alternatively, pass your own [`RandomSource`](rng::RandomSource) (any [`rand::Rng`] works) to [`process`].
//!
//! # Point Order
//!
//! The order of the points matters:
//! distance ties go to the lowest cluster index, and the initial centroids are chosen by scanning the points in order.
//! So, shuffling the same points may give a different result.
//!
//! # Stale Weights
//!
//! A cluster that receives no points during an iteration keeps its previous centroid and weight.
//! If this happens on the final iteration, the weights will not sum to the number of points.
//! [`Cluster::is_stale`] and [`Cluster::frozen_passes`] tell when and how often this happened.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unreadable_literal)]

use palette::Srgb;

mod cluster;
mod distance;
mod error;
pub mod kmeans;
mod point;
pub mod rng;

pub use cluster::{Cluster, ClusterSet};
pub use distance::{distance, squared_distance};
pub use error::Error;
pub use kmeans::{KmeansConfig, KmeansResult, Termination, Weighting};
pub use point::{Point, PointSet};

/// Runs k-means on the given points, drawing random numbers from `rng`.
///
/// See the crate documentation for examples and information on each argument.
///
/// # Errors
/// Returns an error if `points` is empty or an argument in `config` is out of range.
pub fn process(
	points: &PointSet,
	config: &KmeansConfig,
	rng: &mut (impl rng::RandomSource + ?Sized),
) -> Result<KmeansResult, Error> {
	kmeans::run(points, config, rng)
}

/// Runs k-means on the provided slice of Srgb colors using the default random number generator.
///
/// See the crate documentation for examples and information on each argument.
///
/// # Errors
/// Returns an error if `pixels` is empty or an argument in `config` is out of range.
pub fn from_srgb(pixels: &[Srgb<u8>], config: &KmeansConfig, seed: u64) -> Result<KmeansResult, Error> {
	process(&PointSet::from_srgb(pixels), config, &mut rng::from_seed(seed))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_srgb_matches_process() {
		let pixels = (0..=u8::MAX)
			.step_by(5)
			.map(|x| Srgb::new(x, u8::MAX - x, x / 2))
			.collect::<Vec<_>>();
		let config = KmeansConfig::new(4);

		let x = from_srgb(&pixels, &config, 9).expect("valid arguments");
		let y = process(&PointSet::from_srgb(&pixels), &config, &mut rng::from_seed(9)).expect("valid arguments");

		assert_eq!(x, y);
		assert_eq!(x.clusters.len(), 4);
	}

	#[test]
	fn from_srgb_rejects_empty_input() {
		assert_eq!(from_srgb(&[], &KmeansConfig::default(), 0), Err(Error::EmptyPointSet));
	}
}
