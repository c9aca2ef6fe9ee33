//! Chooses the starting centroids with a linear-distance variant of k-means++

use super::assign::nearest_each;
use crate::{rng::RandomSource, Cluster, ClusterSet, Error, PointSet};
use tracing::debug;

/// How the distance from a point to its closest centroid weights its chance of becoming the next centroid
///
/// Standard k-means++ weights each point by its squared distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Weighting {
	/// Weight by the distance itself
	///
	/// This spreads the centroids less aggressively than squared distance,
	/// giving dense regions of similar colors a better chance to be seeded.
	#[default]
	Linear,
}

impl Weighting {
	/// The seeding weight of a point at `distance` from its closest centroid
	#[must_use]
	pub fn weight(self, distance: f64) -> f64 {
		match self {
			Self::Linear => distance,
		}
	}
}

/// Find the first point where the running threshold drops to or below zero
///
/// Each point's weight is subtracted from `threshold` in point order.
/// If floating point residue keeps the threshold above zero, the last point is chosen.
fn scan(weights: &[f64], threshold: u64) -> usize {
	#[allow(clippy::cast_precision_loss)]
	let mut remaining = threshold as f64;
	for (i, &weight) in weights.iter().enumerate() {
		remaining -= weight;
		if remaining <= 0.0 {
			return i;
		}
	}

	weights.len() - 1
}

/// Choose `k` starting centroids from `points`
///
/// The first centroid is a uniformly random point.
/// Each next centroid is picked with a probability proportional to the [`Weighting`] of the
/// distance from each point to its closest centroid chosen so far:
/// a random integer threshold in `0..=floor(total weight)` is drawn,
/// and the points are scanned in order until their running weight reaches the threshold.
///
/// If `k` is larger than the number of distinct points, some centroids will be duplicates.
///
/// # Errors
/// Returns an error if `k` is 0 or `points` is empty.
pub fn seed(
	points: &PointSet,
	k: usize,
	weighting: Weighting,
	rng: &mut (impl RandomSource + ?Sized),
) -> Result<ClusterSet, Error> {
	if k == 0 {
		return Err(Error::ZeroK);
	}
	if points.is_empty() {
		return Err(Error::EmptyPointSet);
	}

	let first = rng.index(points.len());
	debug!(index = first, "chose the first centroid");

	let mut centroids = Vec::with_capacity(k);
	centroids.push(points[first]);

	for _ in 1..k {
		let weights = nearest_each(points.as_slice(), &centroids)
			.into_iter()
			.map(|(_, dist)| weighting.weight(dist))
			.collect::<Vec<_>>();

		let total = weights.iter().sum::<f64>();

		// the total is a finite, non-negative sum of distances
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		let threshold = rng.threshold(total as u64);

		let index = scan(&weights, threshold);
		debug!(total, threshold, index, "chose the next centroid");
		centroids.push(points[index]);
	}

	Ok(ClusterSet::new(centroids.into_iter().map(Cluster::seeded).collect()))
}
