//! The source of randomness used to seed the initial centroids

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// The random draws made while seeding k-means
///
/// Every draw in a run comes from a single [`RandomSource`] in a fixed order,
/// so a run is reproducible given the same points, arguments, and source state.
///
/// This is implemented for every [`rand::Rng`].
pub trait RandomSource {
	/// A uniformly random index in `0..len`, where `len` > 0
	fn index(&mut self, len: usize) -> usize;

	/// A uniformly random integer in `0..=max`
	fn threshold(&mut self, max: u64) -> u64;
}

impl<R: Rng> RandomSource for R {
	fn index(&mut self, len: usize) -> usize {
		self.gen_range(0..len)
	}

	fn threshold(&mut self, max: u64) -> u64 {
		self.gen_range(0..=max)
	}
}

/// The default generator, seeded with the given value
#[must_use]
pub fn from_seed(seed: u64) -> Xoshiro256PlusPlus {
	Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// A [`RandomSource`] replaying fixed draws, for tests
#[cfg(test)]
pub(crate) struct Scripted {
	/// Remaining results for [`RandomSource::index`]
	indices: std::collections::VecDeque<usize>,
	/// Remaining results for [`RandomSource::threshold`]
	thresholds: std::collections::VecDeque<u64>,
}

#[cfg(test)]
impl Scripted {
	/// Create a source that returns the given draws in order
	pub(crate) fn new(indices: &[usize], thresholds: &[u64]) -> Self {
		Self {
			indices: indices.iter().copied().collect(),
			thresholds: thresholds.iter().copied().collect(),
		}
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
impl RandomSource for Scripted {
	fn index(&mut self, len: usize) -> usize {
		let index = self.indices.pop_front().unwrap();
		assert!(index < len, "scripted index {index} is out of range for {len} points");
		index
	}

	fn threshold(&mut self, max: u64) -> u64 {
		let threshold = self.thresholds.pop_front().unwrap();
		assert!(threshold <= max, "scripted threshold {threshold} exceeds {max}");
		threshold
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_seed_gives_same_draws() {
		let mut x = from_seed(42);
		let mut y = from_seed(42);

		for len in 1..100 {
			assert_eq!(x.index(len), y.index(len));
			assert_eq!(x.threshold(len as u64), y.threshold(len as u64));
		}
	}

	#[test]
	fn draws_stay_in_range() {
		let mut rng = from_seed(0);

		for _ in 0..1000 {
			assert!(rng.index(7) < 7);
			assert!(rng.threshold(3) <= 3);
		}
		assert_eq!(rng.threshold(0), 0);
		assert_eq!(rng.index(1), 0);
	}
}
