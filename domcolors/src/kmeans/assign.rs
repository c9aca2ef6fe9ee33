//! Assigns every point to its closest centroid

use crate::{distance::nearest, ClusterSet, Point, PointSet};

/// The result of one assignment pass
///
/// Holds the cluster chosen for each point, and for each cluster the (ordered) indices of its points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
	/// Cluster index for each point
	labels: Vec<usize>,
	/// Point indices for each cluster
	members: Vec<Vec<usize>>,
}

impl Assignment {
	/// The cluster index assigned to each point, in point order
	#[must_use]
	pub fn labels(&self) -> &[usize] {
		&self.labels
	}

	/// The indices of the points assigned to `cluster`, in point order
	///
	/// Returns `None` if the cluster received no points in this pass.
	#[must_use]
	pub fn members(&self, cluster: usize) -> Option<&[usize]> {
		self.members
			.get(cluster)
			.filter(|members| !members.is_empty())
			.map(Vec::as_slice)
	}

	/// The number of clusters that received at least one point
	#[must_use]
	pub fn num_present(&self) -> usize {
		self.members.iter().filter(|members| !members.is_empty()).count()
	}
}

/// For each point, the closest centroid and the distance to it
#[cfg(not(feature = "threads"))]
pub(crate) fn nearest_each(points: &[Point], centroids: &[Point]) -> Vec<(usize, f64)> {
	points.iter().map(|&point| nearest(point, centroids)).collect()
}

/// For each point, the closest centroid and the distance to it
///
/// Each point is handled independently and the results are collected in point order,
/// so this gives exactly the same output as the sequential version.
#[cfg(feature = "threads")]
pub(crate) fn nearest_each(points: &[Point], centroids: &[Point]) -> Vec<(usize, f64)> {
	use rayon::prelude::*;

	points
		.par_iter()
		.with_min_len((points.len() / rayon::current_num_threads()).max(1))
		.map(|&point| nearest(point, centroids))
		.collect()
}

/// Assign each point to its closest cluster
///
/// Distance ties go to the cluster with the lowest index.
#[must_use]
pub fn assign(points: &PointSet, clusters: &ClusterSet) -> Assignment {
	let centroids = clusters.centroids();
	let labels = nearest_each(points.as_slice(), &centroids)
		.into_iter()
		.map(|(index, _)| index)
		.collect::<Vec<_>>();

	let mut members = vec![Vec::new(); centroids.len()];
	for (i, &label) in labels.iter().enumerate() {
		members[label].push(i);
	}

	Assignment { labels, members }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Cluster;

	fn clusters(centroids: &[[u8; 3]]) -> ClusterSet {
		ClusterSet::new(centroids.iter().map(|&c| Cluster::seeded(Point::from(c))).collect())
	}

	#[test]
	fn groups_points_by_closest_centroid() {
		let points = [[0, 0, 0], [250, 250, 250], [5, 5, 5], [255, 255, 255]]
			.map(Point::from)
			.into_iter()
			.collect::<PointSet>();

		let assignment = assign(&points, &clusters(&[[0, 0, 0], [255, 255, 255]]));

		assert_eq!(assignment.labels(), &[0, 1, 0, 1]);
		assert_eq!(assignment.members(0), Some(&[0, 2][..]));
		assert_eq!(assignment.members(1), Some(&[1, 3][..]));
		assert_eq!(assignment.num_present(), 2);
	}

	#[test]
	fn empty_clusters_are_absent() {
		let points = [[1, 1, 1], [2, 2, 2]].map(Point::from).into_iter().collect::<PointSet>();

		let assignment = assign(&points, &clusters(&[[0, 0, 0], [200, 200, 200], [0, 0, 0]]));

		assert_eq!(assignment.members(0), Some(&[0, 1][..]));
		assert_eq!(assignment.members(1), None);
		// duplicate of cluster 0 loses every tie
		assert_eq!(assignment.members(2), None);
		assert_eq!(assignment.members(3), None);
		assert_eq!(assignment.num_present(), 1);
	}

	#[test]
	fn ties_match_a_sequential_search() {
		// every point is equally close to centroids 0 and 2, and to 1 and 3
		let centroids = [[0, 0, 0], [255, 255, 255], [0, 0, 0], [255, 255, 255]].map(Point::from);
		let points = (0..4096u32)
			.map(|i| {
				#[allow(clippy::cast_possible_truncation)]
				let x = (i % 256) as u8;
				Point::from([x, x, x])
			})
			.collect::<Vec<_>>();

		let sequential = points.iter().map(|&point| nearest(point, &centroids)).collect::<Vec<_>>();
		let each = nearest_each(&points, &centroids);

		assert_eq!(each, sequential);
		assert!(each.iter().all(|&(index, _)| index < 2));
	}

	#[test]
	fn every_point_is_labeled() {
		let points = (0..=u8::MAX).map(|x| Point::from([x, x / 2, u8::MAX - x])).collect::<PointSet>();

		let assignment = assign(&points, &clusters(&[[0, 0, 255], [128, 64, 128], [255, 128, 0]]));

		assert_eq!(assignment.labels().len(), points.len());
		let total = (0..3).filter_map(|i| assignment.members(i)).map(<[usize]>::len).sum::<usize>();
		assert_eq!(total, points.len());
	}
}
