//! Board generation.

use rand::Rng;
use rand::seq::SliceRandom;

/// A generated board: `cells` is row-major with exactly one cell holding the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
	pub cells: Vec<String>,
	pub target_index: usize,
}

/// Builds a `grid_size` x `grid_size` board hiding `target` among decoys.
///
/// The target position is uniform over the board and every other cell samples the
/// decoy pool independently (duplicates are expected). Callers must pass a non-zero
/// `grid_size`, a non-empty `decoys` pool, and a target that is not itself a decoy.
pub fn generate<R: Rng + ?Sized>(
	target: &str,
	grid_size: usize,
	decoys: &[String],
	rng: &mut R,
) -> Board {
	debug_assert!(grid_size > 0, "grid size must be positive");
	debug_assert!(!decoys.is_empty(), "decoy pool must not be empty");

	let len = grid_size * grid_size;
	let target_index = rng.gen_range(0..len);
	let cells = (0..len)
		.map(|i| {
			if i == target_index {
				target.to_string()
			} else {
				decoys[rng.gen_range(0..decoys.len())].clone()
			}
		})
		.collect();

	Board {
		cells,
		target_index,
	}
}

/// Picks a round target uniformly from `targets` (must be non-empty).
pub fn pick_target<R: Rng + ?Sized>(targets: &[String], rng: &mut R) -> String {
	targets.choose(rng).cloned().unwrap_or_default()
}
