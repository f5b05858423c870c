//! Game constants, overridable from JSON embedded in the host page.

use log::warn;
use serde::Deserialize;

use super::types::Tone;

/// Largest accepted board side; bigger boards would not fit on screen anyway.
const MAX_GRID_SIZE: usize = 32;

const TARGETS: [&str; 9] = ["🦊", "🐱", "🐶", "🐵", "🦄", "🐼", "🐸", "🐤", "🐙"];

const DECOYS: [&str; 20] = [
	"🐯", "🐰", "🐻", "🐷", "🐮", "🐺", "🐹", "🐭", "🐨", "🐦", "🐧", "🦆", "🐢", "🐍", "🦎", "🐝",
	"🦋", "🐛", "🐠", "🐟",
];

/// Tunable parameters for a hunt session.
///
/// Every field has a default, so a host page only needs to list what it overrides:
///
/// ```json
/// { "grid_size": 6, "time_limit": 10.0 }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
	/// Board side length; the board has `grid_size * grid_size` cells.
	pub grid_size: usize,
	/// Seconds available per round.
	pub time_limit: f64,
	/// Countdown tick period in milliseconds.
	pub tick_ms: u32,
	/// Seconds removed from the countdown per tick.
	pub tick_step: f64,
	/// Pause between a correct find and the next round, in milliseconds.
	pub settle_ms: u32,
	pub targets: Vec<String>,
	pub decoys: Vec<String>,
	pub success_tone: Tone,
	pub failure_tone: Tone,
}

impl Default for GameConfig {
	fn default() -> Self {
		Self {
			grid_size: 10,
			time_limit: 7.0,
			tick_ms: 100,
			tick_step: 0.1,
			settle_ms: 700,
			targets: TARGETS.iter().map(|s| s.to_string()).collect(),
			decoys: DECOYS.iter().map(|s| s.to_string()).collect(),
			success_tone: Tone {
				frequency_hz: 800.0,
				duration_secs: 0.2,
			},
			failure_tone: Tone {
				frequency_hz: 200.0,
				duration_secs: 0.5,
			},
		}
	}
}

impl GameConfig {
	/// Replaces unusable fields with their defaults, logging each fallback.
	///
	/// Decoys that also appear in the target set are dropped so a board can never
	/// show two correct-looking cells.
	pub fn validated(mut self) -> Self {
		let defaults = Self::default();

		if self.grid_size == 0 {
			warn!("emoji-hunt: grid_size must be positive, using {}", defaults.grid_size);
			self.grid_size = defaults.grid_size;
		}
		if self.grid_size > MAX_GRID_SIZE {
			warn!(
				"emoji-hunt: grid_size {} too large, using {}",
				self.grid_size, MAX_GRID_SIZE
			);
			self.grid_size = MAX_GRID_SIZE;
		}
		if !(self.time_limit > 0.0) {
			warn!("emoji-hunt: time_limit must be positive, using {}", defaults.time_limit);
			self.time_limit = defaults.time_limit;
		}
		if !(self.tick_step > 0.0) {
			warn!("emoji-hunt: tick_step must be positive, using {}", defaults.tick_step);
			self.tick_step = defaults.tick_step;
		}
		if self.tick_ms == 0 {
			warn!("emoji-hunt: tick_ms must be positive, using {}", defaults.tick_ms);
			self.tick_ms = defaults.tick_ms;
		}
		if self.targets.is_empty() {
			warn!("emoji-hunt: empty target set, using defaults");
			self.targets = defaults.targets.clone();
		}

		let before = self.decoys.len();
		let targets = &self.targets;
		self.decoys.retain(|d| !targets.contains(d));
		if self.decoys.len() != before {
			warn!(
				"emoji-hunt: dropped {} decoys that are also targets",
				before - self.decoys.len()
			);
		}
		if self.decoys.is_empty() {
			warn!("emoji-hunt: empty decoy pool, using defaults");
			self.decoys = defaults
				.decoys
				.clone()
				.into_iter()
				.filter(|d| !self.targets.contains(d))
				.collect();
		}
		if self.decoys.is_empty() {
			warn!("emoji-hunt: targets cover every default decoy, using default emoji sets");
			self.targets = defaults.targets;
			self.decoys = defaults.decoys;
		}

		self
	}

	pub fn cell_count(&self) -> usize {
		self.grid_size * self.grid_size
	}
}
