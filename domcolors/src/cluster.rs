//! Clusters and the fixed-size set of clusters tracked during a k-means run

use crate::Point;
use palette::Srgb;

/// A single cluster: its centroid and the number of points assigned to it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cluster {
	/// The centroid (average color) of this cluster
	#[cfg_attr(feature = "serde", serde(rename = "color"))]
	pub centroid: Point,
	/// The number of points assigned to this cluster by the last assignment pass that gave it any points
	pub weight: usize,
	/// The number of assignment passes in which this cluster received no points
	pub frozen_passes: u32,
	/// Whether the most recent assignment pass gave this cluster no points
	#[cfg_attr(feature = "serde", serde(skip))]
	pub(crate) stale: bool,
}

impl Cluster {
	/// Create a freshly seeded cluster with a weight of 0
	pub(crate) const fn seeded(centroid: Point) -> Self {
		Self { centroid, weight: 0, frozen_passes: 0, stale: false }
	}

	/// Whether this cluster's centroid and weight were carried over from an earlier pass,
	/// because the most recent assignment pass gave it no points
	#[must_use]
	pub const fn is_stale(&self) -> bool {
		self.stale
	}

	/// The centroid rounded to an 8-bit Srgb color
	#[must_use]
	pub fn srgb(&self) -> Srgb<u8> {
		self.centroid.to_srgb()
	}
}

/// The `k` clusters of one k-means run, indexed `0..k`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ClusterSet {
	/// Clusters by index
	clusters: Vec<Cluster>,
}

impl ClusterSet {
	/// Create a [`ClusterSet`] from seeded clusters
	pub(crate) fn new(clusters: Vec<Cluster>) -> Self {
		Self { clusters }
	}

	/// The number of clusters, `k`
	#[must_use]
	pub fn len(&self) -> usize {
		self.clusters.len()
	}

	/// Whether there are no clusters
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.clusters.is_empty()
	}

	/// The clusters in index order
	#[must_use]
	pub fn as_slice(&self) -> &[Cluster] {
		&self.clusters
	}

	/// Iterate over the clusters in index order
	pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
		self.clusters.iter()
	}

	/// The centroid of each cluster in index order
	#[must_use]
	pub fn centroids(&self) -> Vec<Point> {
		self.clusters.iter().map(|cluster| cluster.centroid).collect()
	}

	/// The sum of all cluster weights
	///
	/// This equals the number of points unless a cluster is [stale](Cluster::is_stale).
	#[must_use]
	pub fn total_weight(&self) -> usize {
		self.clusters.iter().map(|cluster| cluster.weight).sum()
	}

	/// Mutable access to the clusters for the centroid update step
	pub(crate) fn as_mut_slice(&mut self) -> &mut [Cluster] {
		&mut self.clusters
	}
}

impl std::ops::Index<usize> for ClusterSet {
	type Output = Cluster;

	fn index(&self, index: usize) -> &Self::Output {
		&self.clusters[index]
	}
}

impl<'a> IntoIterator for &'a ClusterSet {
	type Item = &'a Cluster;
	type IntoIter = std::slice::Iter<'a, Cluster>;

	fn into_iter(self) -> Self::IntoIter {
		self.clusters.iter()
	}
}

impl IntoIterator for ClusterSet {
	type Item = Cluster;
	type IntoIter = std::vec::IntoIter<Cluster>;

	fn into_iter(self) -> Self::IntoIter {
		self.clusters.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn total_weight_sums_every_cluster() {
		let mut set = ClusterSet::new(vec![
			Cluster::seeded(Point::from([0, 0, 0])),
			Cluster::seeded(Point::from([9, 9, 9])),
		]);
		assert_eq!(set.total_weight(), 0);

		set.as_mut_slice()[0].weight = 3;
		set.as_mut_slice()[1].weight = 4;
		assert_eq!(set.total_weight(), 7);
		assert_eq!(set.centroids(), vec![Point::from([0, 0, 0]), Point::from([9, 9, 9])]);
	}
}
