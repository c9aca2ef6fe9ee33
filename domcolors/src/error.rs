//! Errors returned when k-means is given invalid arguments

use thiserror::Error;

/// Invalid arguments to a k-means run
///
/// Every variant is detected before seeding, so no partial result is ever produced.
/// Asking for more clusters than there are distinct points is *not* an error:
/// the run proceeds and may yield duplicate or frozen centroids.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
	/// `k` was 0
	#[error("the number of clusters must be at least 1")]
	ZeroK,
	/// The point sequence was empty
	#[error("cannot cluster an empty set of points")]
	EmptyPointSet,
	/// The convergence threshold was negative, NaN, or infinite
	#[error("the convergence threshold must be a finite number >= 0, got {0}")]
	InvalidThreshold(f64),
	/// The maximum number of iterations was 0
	#[error("the maximum number of iterations must be at least 1")]
	ZeroMaxIterations,
}

impl Error {
	/// Whether this error was caused by an invalid argument
	///
	/// This currently holds for every variant.
	#[must_use]
	pub const fn is_invalid_argument(&self) -> bool {
		match self {
			Self::ZeroK | Self::EmptyPointSet | Self::InvalidThreshold(_) | Self::ZeroMaxIterations => true,
		}
	}
}
