//! Provides the implementation for k-means: seeding, assignment, centroid updates, and the loop tying them together

use crate::{rng::RandomSource, ClusterSet, Error, PointSet};
use tracing::{debug, info, warn};

mod assign;
mod seed;
mod update;

pub use assign::{assign, Assignment};
pub use seed::{seed, Weighting};
pub use update::{update, Update};

/// The arguments for a k-means run
///
/// See the crate documentation for information on each argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmeansConfig {
	/// The number of clusters to find
	pub k: usize,
	/// k-means stops once no centroid moves by this distance or more
	pub threshold: f64,
	/// The maximum number of assignment passes
	pub max_iter: u32,
	/// How distances weight the choice of each starting centroid after the first
	pub weighting: Weighting,
}

impl KmeansConfig {
	/// The default number of clusters
	pub const DEFAULT_K: usize = 5;
	/// The default convergence threshold
	pub const DEFAULT_THRESHOLD: f64 = 1.0;
	/// The default maximum number of iterations
	pub const DEFAULT_MAX_ITER: u32 = 1024;

	/// Create a config for `k` clusters with the default threshold and maximum iterations
	#[must_use]
	pub const fn new(k: usize) -> Self {
		Self {
			k,
			threshold: Self::DEFAULT_THRESHOLD,
			max_iter: Self::DEFAULT_MAX_ITER,
			weighting: Weighting::Linear,
		}
	}

	/// Set the convergence threshold
	#[must_use]
	pub const fn with_threshold(mut self, threshold: f64) -> Self {
		self.threshold = threshold;
		self
	}

	/// Set the maximum number of iterations
	#[must_use]
	pub const fn with_max_iter(mut self, max_iter: u32) -> Self {
		self.max_iter = max_iter;
		self
	}

	/// Set the seeding weighting
	#[must_use]
	pub const fn with_weighting(mut self, weighting: Weighting) -> Self {
		self.weighting = weighting;
		self
	}

	/// Check that every argument is in range
	///
	/// # Errors
	/// Returns an error if `k` or `max_iter` is 0, or if `threshold` is negative or not finite.
	pub fn validate(&self) -> Result<(), Error> {
		if self.k == 0 {
			Err(Error::ZeroK)
		} else if !(self.threshold.is_finite() && self.threshold >= 0.0) {
			Err(Error::InvalidThreshold(self.threshold))
		} else if self.max_iter == 0 {
			Err(Error::ZeroMaxIterations)
		} else {
			Ok(())
		}
	}
}

impl Default for KmeansConfig {
	fn default() -> Self {
		Self::new(Self::DEFAULT_K)
	}
}

/// Why k-means stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Termination {
	/// No centroid moved by the threshold distance or more
	Converged,
	/// The maximum number of iterations was reached before converging
	MaxIterations,
}

impl std::fmt::Display for Termination {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Converged => f.write_str("converged"),
			Self::MaxIterations => f.write_str("reached the maximum number of iterations"),
		}
	}
}

/// Result from running k-means
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KmeansResult {
	/// The final clusters in index order
	pub clusters: ClusterSet,
	/// Number of elapsed iterations (assignment passes)
	pub iterations: u32,
	/// Why the run stopped
	pub termination: Termination,
}

impl KmeansResult {
	/// Whether the run converged before reaching the maximum number of iterations
	#[must_use]
	pub fn converged(&self) -> bool {
		self.termination == Termination::Converged
	}
}

/// Run k-means on the given points
///
/// # Errors
/// Returns an error if `points` is empty or an argument in `config` is out of range.
pub fn run(
	points: &PointSet,
	config: &KmeansConfig,
	rng: &mut (impl RandomSource + ?Sized),
) -> Result<KmeansResult, Error> {
	config.validate()?;
	if points.is_empty() {
		return Err(Error::EmptyPointSet);
	}

	let _span = tracing::debug_span!("kmeans", k = config.k, points = points.len()).entered();

	if config.k > points.len() {
		warn!(k = config.k, points = points.len(), "more clusters than points, some centroids will be duplicates");
	}

	let mut clusters = seed(points, config.k, config.weighting, rng)?;

	let mut iterations = 0;
	let termination = loop {
		if iterations == config.max_iter {
			warn!(max_iter = config.max_iter, "stopped before converging");
			break Termination::MaxIterations;
		}

		let assignment = assign(points, &clusters);
		let Update { max_shift, frozen } = update(&mut clusters, points, &assignment);
		iterations += 1;
		debug!(iteration = iterations, max_shift, frozen, "updated centroids");

		if max_shift < config.threshold {
			break Termination::Converged;
		}
	};

	info!(iterations, %termination, "finished k-means");

	Ok(KmeansResult { clusters, iterations, termination })
}
