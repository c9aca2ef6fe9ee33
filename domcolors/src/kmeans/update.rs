//! Moves each centroid to the mean of its assigned points

use super::Assignment;
use crate::{distance, ClusterSet, Point, PointSet};

/// Summary of one centroid update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update {
	/// The largest distance moved by any updated centroid
	pub max_shift: f64,
	/// The number of clusters that received no points and were left as is
	pub frozen: usize,
}

impl Update {
	/// Whether any centroid moved by at least `threshold`, meaning k-means has not converged yet
	#[must_use]
	pub fn moved(&self, threshold: f64) -> bool {
		self.max_shift >= threshold
	}
}

/// The componentwise mean of the given points
fn mean(points: &PointSet, members: &[usize]) -> Point {
	let mut sum = Point::default();
	for &i in members {
		let point = points[i];
		sum.r += point.r;
		sum.g += point.g;
		sum.b += point.b;
	}

	#[allow(clippy::cast_precision_loss)]
	let n = members.len() as f64;
	Point::new(sum.r / n, sum.g / n, sum.b / n)
}

/// Update each cluster from the given assignment
///
/// A cluster that received points gets their mean as its centroid and their count as its weight.
/// A cluster that received no points is frozen:
/// its centroid and weight are kept from the previous pass and its frozen pass counter is incremented.
pub fn update(clusters: &mut ClusterSet, points: &PointSet, assignment: &Assignment) -> Update {
	let mut max_shift = 0.0;
	let mut frozen = 0;

	for (i, cluster) in clusters.as_mut_slice().iter_mut().enumerate() {
		if let Some(members) = assignment.members(i) {
			let centroid = mean(points, members);
			max_shift = f64::max(max_shift, distance(cluster.centroid, centroid));
			cluster.centroid = centroid;
			cluster.weight = members.len();
			cluster.stale = false;
		} else {
			cluster.frozen_passes += 1;
			cluster.stale = true;
			frozen += 1;
		}
	}

	Update { max_shift, frozen }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{kmeans::assign, Cluster};
	use approx::assert_relative_eq;

	fn point_set(points: &[[u8; 3]]) -> PointSet {
		points.iter().copied().map(Point::from).collect()
	}

	fn clusters(centroids: &[[u8; 3]]) -> ClusterSet {
		ClusterSet::new(centroids.iter().map(|&c| Cluster::seeded(Point::from(c))).collect())
	}

	#[test]
	fn centroid_is_mean_of_members() {
		let points = point_set(&[[0, 0, 0], [10, 20, 31], [255, 255, 255]]);
		let mut clusters = clusters(&[[1, 1, 1], [250, 250, 250]]);

		let assignment = assign(&points, &clusters);
		update(&mut clusters, &points, &assignment);

		let first = clusters[0];
		assert_relative_eq!(first.centroid.r, 5.0);
		assert_relative_eq!(first.centroid.g, 10.0);
		assert_relative_eq!(first.centroid.b, 15.5);
		assert_eq!(first.weight, 2);

		assert_eq!(clusters[1].centroid, Point::from([255, 255, 255]));
		assert_eq!(clusters[1].weight, 1);
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn max_shift_is_largest_centroid_move() {
		let points = point_set(&[[0, 0, 0], [10, 10, 10], [255, 255, 255]]);
		let mut clusters = clusters(&[[0, 0, 0], [255, 255, 255]]);
		let old = clusters.centroids();

		let assignment = assign(&points, &clusters);
		let result = update(&mut clusters, &points, &assignment);

		let expected = old
			.iter()
			.zip(clusters.centroids())
			.map(|(&old, new)| distance(old, new))
			.fold(0.0, f64::max);

		assert_eq!(result.max_shift, expected);
		assert_eq!(result.frozen, 0);
		assert!(result.moved(1.0));
		assert!(!result.moved(expected + 1.0));
	}

	#[test]
	fn clusters_without_points_are_frozen() {
		let points = point_set(&[[0, 0, 0], [2, 2, 2]]);
		let mut clusters = clusters(&[[1, 1, 1], [100, 100, 100]]);
		clusters.as_mut_slice()[1].weight = 7;

		let assignment = assign(&points, &clusters);
		let result = update(&mut clusters, &points, &assignment);

		assert_eq!(result.frozen, 1);
		let frozen = clusters[1];
		assert_eq!(frozen.centroid, Point::from([100, 100, 100]));
		assert_eq!(frozen.weight, 7);
		assert_eq!(frozen.frozen_passes, 1);
		assert!(frozen.is_stale());
		assert!(!clusters[0].is_stale());

		// stale weight is kept, so the total no longer matches the number of points
		assert_eq!(clusters.total_weight(), points.len() + 7);
	}

	#[test]
	fn frozen_cluster_recovers_when_given_points() {
		let points = point_set(&[[0, 0, 0], [2, 2, 2]]);
		let mut clusters = clusters(&[[1, 1, 1], [100, 100, 100]]);

		let assignment = assign(&points, &clusters);
		update(&mut clusters, &points, &assignment);
		assert!(clusters[1].is_stale());

		let points = point_set(&[[0, 0, 0], [2, 2, 2], [99, 99, 99]]);
		let assignment = assign(&points, &clusters);
		update(&mut clusters, &points, &assignment);

		assert!(!clusters[1].is_stale());
		assert_eq!(clusters[1].weight, 1);
		assert_eq!(clusters[1].frozen_passes, 1);
	}
}
