//! Redmean weighted color distance

use crate::Point;

/// The squared redmean distance between two points, before taking the square root
///
/// The red and blue terms are weighted by the mean red value of both points:
///
/// ```text
/// rmean  = (x.r + y.r) / 2
/// term_r = floor((512 + rmean) * dr² / 256)
/// term_b = floor((767 - rmean) * db² / 256)
/// result = term_r + 4 * dg² + term_b
/// ```
///
/// For channels in `0.0..=255.0`, every intermediate product is exactly representable as an `f64`,
/// and dividing by 256 only shifts the exponent, so `floor` gives the same result as integer floor division.
#[must_use]
pub fn squared_distance(x: Point, y: Point) -> f64 {
	let rmean = (x.r + y.r) / 2.0;
	let dr = x.r - y.r;
	let dg = x.g - y.g;
	let db = x.b - y.b;

	let term_r = ((512.0 + rmean) * dr * dr / 256.0).floor();
	let term_b = ((767.0 - rmean) * db * db / 256.0).floor();

	term_r + 4.0 * dg * dg + term_b
}

/// The redmean distance between two points
#[must_use]
pub fn distance(x: Point, y: Point) -> f64 {
	squared_distance(x, y).sqrt()
}

/// Returns the index of the centroid closest to `point` along with its distance
///
/// Ties go to the lowest index, since a later centroid must be strictly closer to replace the current best.
///
/// `centroids` must not be empty.
pub(crate) fn nearest(point: Point, centroids: &[Point]) -> (usize, f64) {
	debug_assert!(!centroids.is_empty());

	let mut min_index = 0;
	let mut min_dist = f64::INFINITY;
	for (i, &centroid) in centroids.iter().enumerate() {
		let dist = distance(point, centroid);
		if dist < min_dist {
			min_dist = dist;
			min_index = i;
		}
	}

	(min_index, min_dist)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_points() -> Vec<Point> {
		let range = (0..=u8::MAX).step_by(51);
		let mut points = Vec::new();
		for r in range.clone() {
			for g in range.clone() {
				for b in range.clone() {
					points.push(Point::from([r, g, b]));
				}
			}
		}
		points
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn black_to_white_golden_value() {
		let black = Point::from([0, 0, 0]);
		let white = Point::from([255, 255, 255]);

		assert_eq!(squared_distance(black, white), 584970.0);
		assert_eq!(distance(black, white), 584970.0f64.sqrt());
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn floor_applies_to_each_scaled_term() {
		// rmean = 0.5, dr = 1: (512.5 * 1) / 256 = 2.0019.. => 2
		// db = 1: (766.5 * 1) / 256 = 2.994.. => 2
		let x = Point::from([0, 0, 0]);
		let y = Point::from([1, 0, 1]);
		assert_eq!(squared_distance(x, y), 4.0);

		// green is weighted by 4 without any flooring
		let z = Point::from([0, 3, 0]);
		assert_eq!(squared_distance(x, z), 36.0);
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn distance_to_self_is_zero() {
		for p in test_points() {
			assert_eq!(distance(p, p), 0.0);
		}
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn distance_is_symmetric() {
		let points = test_points();
		for &x in &points {
			for &y in &points {
				assert_eq!(distance(x, y), distance(y, x));
			}
		}
	}

	#[test]
	fn nearest_prefers_lowest_index_on_ties() {
		let centroids = [[10, 10, 10], [30, 30, 30], [10, 10, 10]].map(Point::from);

		assert_eq!(nearest(Point::from([20, 20, 20]), &centroids).0, 0);
		assert_eq!(nearest(Point::from([11, 11, 11]), &centroids).0, 0);
		assert_eq!(nearest(Point::from([29, 29, 29]), &centroids).0, 1);
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn nearest_reports_distance() {
		let centroids = [[0, 0, 0], [255, 255, 255]].map(Point::from);
		let point = Point::from([250, 250, 250]);
		let (index, dist) = nearest(point, &centroids);
		assert_eq!(index, 1);
		assert_eq!(dist, distance(point, centroids[1]));
	}
}
