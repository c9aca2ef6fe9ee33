//! Color points and the ordered point sequence fed to k-means

use palette::Srgb;

/// A color with red, green, and blue channels in the range `0.0..=255.0`
///
/// Channels are stored as `f64` so that centroids (means of points) can be represented exactly
/// and so that the half-integer values produced by the distance formula never lose precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(into = "[f64; 3]"))]
pub struct Point {
	/// Red channel
	pub r: f64,
	/// Green channel
	pub g: f64,
	/// Blue channel
	pub b: f64,
}

impl Point {
	/// Create a new point from its channels
	#[must_use]
	pub const fn new(r: f64, g: f64, b: f64) -> Self {
		Self { r, g, b }
	}

	/// Returns the channels as an `[r, g, b]` array
	#[must_use]
	pub const fn channels(self) -> [f64; 3] {
		[self.r, self.g, self.b]
	}

	/// Round each channel to the nearest integer, giving an 8-bit Srgb color
	#[must_use]
	pub fn to_srgb(self) -> Srgb<u8> {
		/// Round and clamp a single channel
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		fn channel(x: f64) -> u8 {
			x.round().clamp(0.0, 255.0) as u8
		}

		Srgb::new(channel(self.r), channel(self.g), channel(self.b))
	}
}

impl From<[u8; 3]> for Point {
	fn from([r, g, b]: [u8; 3]) -> Self {
		Self::new(f64::from(r), f64::from(g), f64::from(b))
	}
}

impl From<Srgb<u8>> for Point {
	fn from(srgb: Srgb<u8>) -> Self {
		Self::new(f64::from(srgb.red), f64::from(srgb.green), f64::from(srgb.blue))
	}
}

impl From<[f64; 3]> for Point {
	fn from([r, g, b]: [f64; 3]) -> Self {
		debug_assert!([r, g, b].iter().all(|c| (0.0..=255.0).contains(c)));
		Self::new(r, g, b)
	}
}

impl From<Point> for [f64; 3] {
	fn from(point: Point) -> Self {
		point.channels()
	}
}

/// An ordered, read-only sequence of points
///
/// The order of the points is part of the input:
/// it decides which centroid wins a distance tie and which point the k-means++ scan lands on.
/// Shuffling the same points can therefore give a different (but equally valid) result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
	/// The points, in input order
	points: Vec<Point>,
}

impl PointSet {
	/// Create a [`PointSet`] from 8-bit Srgb pixels
	#[must_use]
	pub fn from_srgb(pixels: &[Srgb<u8>]) -> Self {
		pixels.iter().copied().map(Point::from).collect()
	}

	/// Create a [`PointSet`] from a buffer of interleaved `r, g, b` bytes
	///
	/// Trailing bytes that do not form a complete pixel are ignored.
	#[must_use]
	pub fn from_rgb8(bytes: &[u8]) -> Self {
		bytes
			.chunks_exact(3)
			.map(|rgb| Point::from([rgb[0], rgb[1], rgb[2]]))
			.collect()
	}

	/// The number of points
	#[must_use]
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Whether there are no points
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// The points as a slice, in input order
	#[must_use]
	pub fn as_slice(&self) -> &[Point] {
		&self.points
	}

	/// Iterate over the points in input order
	pub fn iter(&self) -> std::slice::Iter<'_, Point> {
		self.points.iter()
	}
}

impl From<Vec<Point>> for PointSet {
	fn from(points: Vec<Point>) -> Self {
		Self { points }
	}
}

impl FromIterator<Point> for PointSet {
	fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
		Self { points: iter.into_iter().collect() }
	}
}

impl<'a> IntoIterator for &'a PointSet {
	type Item = &'a Point;
	type IntoIter = std::slice::Iter<'a, Point>;

	fn into_iter(self) -> Self::IntoIter {
		self.points.iter()
	}
}

impl std::ops::Index<usize> for PointSet {
	type Output = Point;

	fn index(&self, index: usize) -> &Self::Output {
		&self.points[index]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_rgb8_keeps_pixel_order() {
		let points = PointSet::from_rgb8(&[1, 2, 3, 4, 5, 6, 7]);
		assert_eq!(points.len(), 2);
		assert_eq!(points[0], Point::new(1.0, 2.0, 3.0));
		assert_eq!(points[1], Point::new(4.0, 5.0, 6.0));
	}

	#[test]
	fn from_srgb_matches_from_array() {
		let pixels = [Srgb::new(255, 0, 10), Srgb::new(0, 128, 64)];
		let points = PointSet::from_srgb(&pixels);
		let expected = [[255, 0, 10], [0, 128, 64]].map(Point::from);
		assert_eq!(points.as_slice(), &expected);
	}

	#[test]
	fn to_srgb_rounds_channels() {
		let srgb = Point::new(0.4, 127.5, 254.6).to_srgb();
		assert_eq!(srgb, Srgb::new(0, 128, 255));
	}
}
