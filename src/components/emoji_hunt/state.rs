//! Round state machine.
//!
//! `HuntState` owns the session (player, score, countdown) and the current round. Every
//! operation checks the current phase first, so events that arrive late (a timer tick
//! racing a click, a second click during the settle delay) are no-ops. Side effects are
//! returned as [`Effect`]s for the host to execute.

use log::{debug, info};
use rand::Rng;

use super::config::GameConfig;
use super::grid::{self, Board};
use super::types::{CellRect, Direction, Effect, FailureCause, Phase};

/// Countdown values at or below this are treated as zero, absorbing float drift from
/// repeated subtraction of the tick step.
const TIME_EPSILON: f64 = 1e-9;

/// One "find the target" board.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
	pub target: String,
	pub board: Board,
	/// Cell last picked or focused by the player.
	pub selected: Option<usize>,
}

impl Round {
	fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
		let target = grid::pick_target(&config.targets, rng);
		let board = grid::generate(&target, config.grid_size, &config.decoys, rng);
		Self {
			target,
			board,
			selected: None,
		}
	}

	pub fn target_index(&self) -> usize {
		self.board.target_index
	}
}

/// Session state spanning multiple rounds.
#[derive(Clone, Debug)]
pub struct HuntState {
	config: GameConfig,
	phase: Phase,
	player: String,
	score: u32,
	best_score: u32,
	remaining_time: f64,
	round: Option<Round>,
	round_id: u64,
	failure: Option<FailureCause>,
}

impl HuntState {
	pub fn new(config: GameConfig) -> Self {
		let remaining_time = config.time_limit;
		Self {
			config,
			phase: Phase::Idle,
			player: String::new(),
			score: 0,
			best_score: 0,
			remaining_time,
			round: None,
			round_id: 0,
			failure: None,
		}
	}

	pub fn config(&self) -> &GameConfig {
		&self.config
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn player_label(&self) -> &str {
		&self.player
	}

	pub fn score(&self) -> u32 {
		self.score
	}

	/// Longest streak reached this session.
	pub fn best_score(&self) -> u32 {
		self.best_score
	}

	pub fn remaining_time(&self) -> f64 {
		self.remaining_time
	}

	/// Remaining share of the time limit in `[0, 1]`.
	pub fn time_fraction(&self) -> f64 {
		(self.remaining_time / self.config.time_limit).clamp(0.0, 1.0)
	}

	pub fn round(&self) -> Option<&Round> {
		self.round.as_ref()
	}

	pub fn round_id(&self) -> u64 {
		self.round_id
	}

	pub fn target(&self) -> Option<&str> {
		self.round.as_ref().map(|r| r.target.as_str())
	}

	pub fn cells(&self) -> &[String] {
		self.round
			.as_ref()
			.map(|r| r.board.cells.as_slice())
			.unwrap_or_default()
	}

	pub fn selected(&self) -> Option<usize> {
		self.round.as_ref().and_then(|r| r.selected)
	}

	/// The correct cell, exposed to the view only after a failure.
	pub fn revealed_target(&self) -> Option<usize> {
		match self.phase {
			Phase::Fail => self.round.as_ref().map(Round::target_index),
			_ => None,
		}
	}

	/// The correct cell once it has been found.
	pub fn found_target(&self) -> Option<usize> {
		match self.phase {
			Phase::Success => self.round.as_ref().map(Round::target_index),
			_ => None,
		}
	}

	pub fn failure(&self) -> Option<FailureCause> {
		self.failure
	}

	/// Message shown under the board after a round resolves.
	pub fn feedback(&self) -> Option<String> {
		match (self.phase, self.failure) {
			(Phase::Success, _) => Some("Nice! +1".to_string()),
			(Phase::Fail, Some(FailureCause::Timeout)) => Some(format!(
				"Time's up! The {} was here:",
				self.target().unwrap_or_default()
			)),
			(Phase::Fail, _) => Some(format!(
				"Oops, you lost your points. The {} was here:",
				self.target().unwrap_or_default()
			)),
			_ => None,
		}
	}

	/// Begins the session for `name`. Ignored unless idle with a non-blank name.
	pub fn start_game<R: Rng + ?Sized>(&mut self, name: &str, rng: &mut R) -> Vec<Effect> {
		let name = name.trim();
		if self.phase != Phase::Idle || name.is_empty() {
			return Vec::new();
		}
		info!("emoji-hunt: {} started hunting", name);
		self.player = name.to_string();
		self.score = 0;
		self.start_stage(rng)
	}

	/// Resolves a pick of cell `index`. `cell` is the picked cell's screen rectangle,
	/// used to place the celebration burst.
	pub fn select(&mut self, index: usize, cell: Option<CellRect>) -> Vec<Effect> {
		if self.phase != Phase::Playing {
			return Vec::new();
		}
		let Some(round) = self.round.as_mut() else {
			return Vec::new();
		};
		if index >= round.board.cells.len() {
			return Vec::new();
		}
		round.selected = Some(index);

		if index != round.target_index() {
			return self.fail(FailureCause::WrongCell(index));
		}

		self.phase = Phase::Success;
		self.score += 1;
		self.best_score = self.best_score.max(self.score);
		debug!(
			"emoji-hunt: round {} found at {}, score {}",
			self.round_id, index, self.score
		);

		let mut effects = vec![Effect::PlayTone(self.config.success_tone)];
		if let Some(rect) = cell {
			let (x, y) = rect.center();
			effects.push(Effect::Burst { x, y });
		}
		effects.push(Effect::ScheduleAdvance {
			round_id: self.round_id,
			delay_ms: self.config.settle_ms,
		});
		effects
	}

	/// Picks the currently focused cell, if any.
	pub fn confirm_focus(&mut self, cell: Option<CellRect>) -> Vec<Effect> {
		match self.selected() {
			Some(index) => self.select(index, cell),
			None => Vec::new(),
		}
	}

	/// Moves the keyboard focus one cell, clamped at the board edges.
	pub fn move_focus(&mut self, direction: Direction) {
		if self.phase != Phase::Playing {
			return;
		}
		let size = self.config.grid_size;
		let Some(round) = self.round.as_mut() else {
			return;
		};
		let Some(current) = round.selected else {
			round.selected = Some(0);
			return;
		};
		let (row, col) = (current / size, current % size);
		let next = match direction {
			Direction::Up if row > 0 => current - size,
			Direction::Down if row + 1 < size => current + size,
			Direction::Left if col > 0 => current - 1,
			Direction::Right if col + 1 < size => current + 1,
			_ => current,
		};
		round.selected = Some(next);
	}

	/// Advances the countdown by one tick; fires the timeout once it reaches zero.
	pub fn tick(&mut self) -> Vec<Effect> {
		if self.phase != Phase::Playing {
			return Vec::new();
		}
		let next = self.remaining_time - self.config.tick_step;
		if next <= TIME_EPSILON {
			self.remaining_time = 0.0;
			return self.fail(FailureCause::Timeout);
		}
		self.remaining_time = next;
		Vec::new()
	}

	/// Starts the next round after a success. `round_id` must match the round that
	/// scheduled the advance; anything else is stale.
	pub fn advance<R: Rng + ?Sized>(&mut self, round_id: u64, rng: &mut R) -> Vec<Effect> {
		if self.phase != Phase::Success || round_id != self.round_id {
			debug!("emoji-hunt: ignoring stale advance for round {}", round_id);
			return Vec::new();
		}
		self.start_stage(rng)
	}

	/// Starts over after a failure.
	pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Effect> {
		if self.phase != Phase::Fail {
			return Vec::new();
		}
		self.score = 0;
		self.start_stage(rng)
	}

	fn start_stage<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Effect> {
		self.round = Some(Round::new(&self.config, rng));
		self.round_id += 1;
		self.remaining_time = self.config.time_limit;
		self.failure = None;
		self.phase = Phase::Playing;
		debug!("emoji-hunt: round {} started", self.round_id);
		vec![Effect::StartCountdown {
			period_ms: self.config.tick_ms,
		}]
	}

	fn fail(&mut self, cause: FailureCause) -> Vec<Effect> {
		debug!(
			"emoji-hunt: round {} lost ({:?}), streak of {} reset",
			self.round_id, cause, self.score
		);
		self.phase = Phase::Fail;
		self.score = 0;
		self.failure = Some(cause);
		vec![Effect::PlayTone(self.config.failure_tone)]
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn playing(config: GameConfig) -> (HuntState, StdRng) {
		let mut rng = StdRng::seed_from_u64(42);
		let mut state = HuntState::new(config);
		state.start_game("Ada", &mut rng);
		(state, rng)
	}

	fn wrong_index(state: &HuntState) -> usize {
		let target = state.round().unwrap().target_index();
		(target + 1) % state.config().cell_count()
	}

	#[test]
	fn start_requires_a_name() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut state = HuntState::new(GameConfig::default());
		state.start_game("   ", &mut rng);
		assert_eq!(state.phase(), Phase::Idle);
		assert!(state.round().is_none());

		state.start_game("  Ada ", &mut rng);
		assert_eq!(state.phase(), Phase::Playing);
		assert_eq!(state.player_label(), "Ada");
		assert_eq!(state.remaining_time(), 7.0);
		assert_eq!(state.cells().len(), 100);
	}

	#[test]
	fn player_label_is_fixed_after_start() {
		let (mut state, mut rng) = playing(GameConfig::default());
		state.start_game("Bob", &mut rng);
		assert_eq!(state.player_label(), "Ada");
	}

	#[test]
	fn correct_pick_scores_and_schedules_advance() {
		let (mut state, mut rng) = playing(GameConfig::default());
		let round_id = state.round_id();
		let target = state.round().unwrap().target_index();
		let cell = CellRect {
			x: 10.0,
			y: 20.0,
			width: 40.0,
			height: 40.0,
		};

		let effects = state.select(target, Some(cell));
		assert_eq!(state.phase(), Phase::Success);
		assert_eq!(state.score(), 1);
		assert_eq!(state.found_target(), Some(target));
		assert_eq!(
			effects,
			vec![
				Effect::PlayTone(state.config().success_tone),
				Effect::Burst { x: 30.0, y: 40.0 },
				Effect::ScheduleAdvance {
					round_id,
					delay_ms: 700
				},
			]
		);

		// Input during the settle delay is ignored.
		assert!(state.select(target, None).is_empty());
		assert!(state.tick().is_empty());
		assert_eq!(state.score(), 1);

		state.advance(round_id, &mut rng);
		assert_eq!(state.phase(), Phase::Playing);
		assert_eq!(state.round_id(), round_id + 1);
		assert_eq!(state.remaining_time(), 7.0);
		assert_eq!(state.selected(), None);
		let round = state.round().unwrap();
		assert_eq!(round.board.cells[round.target_index()], round.target);
	}

	#[test]
	fn burst_is_skipped_without_geometry() {
		let (mut state, _) = playing(GameConfig::default());
		let target = state.round().unwrap().target_index();
		let effects = state.select(target, None);
		assert!(!effects.iter().any(|e| matches!(e, Effect::Burst { .. })));
	}

	#[test]
	fn wrong_pick_resets_streak_and_reveals_target() {
		let (mut state, mut rng) = playing(GameConfig::default());
		for _ in 0..3 {
			let target = state.round().unwrap().target_index();
			state.select(target, None);
			state.advance(state.round_id(), &mut rng);
		}
		assert_eq!(state.score(), 3);
		assert_eq!(state.revealed_target(), None);

		let wrong = wrong_index(&state);
		let effects = state.select(wrong, None);
		assert_eq!(state.phase(), Phase::Fail);
		assert_eq!(state.score(), 0);
		assert_eq!(state.best_score(), 3);
		assert_eq!(state.failure(), Some(FailureCause::WrongCell(wrong)));
		assert_eq!(
			state.revealed_target(),
			Some(state.round().unwrap().target_index())
		);
		assert_eq!(effects, vec![Effect::PlayTone(state.config().failure_tone)]);
		assert!(state.feedback().unwrap().starts_with("Oops"));
	}

	#[test]
	fn countdown_times_out_exactly_once() {
		let (mut state, _) = playing(GameConfig::default());
		let mut failures = 0;
		for _ in 0..200 {
			let effects = state.tick();
			failures += effects.len();
			assert!((0.0..=7.0).contains(&state.remaining_time()));
		}
		assert_eq!(failures, 1);
		assert_eq!(state.phase(), Phase::Fail);
		assert_eq!(state.failure(), Some(FailureCause::Timeout));
		assert_eq!(state.remaining_time(), 0.0);
	}

	#[test]
	fn seventy_ticks_exhaust_seven_seconds() {
		let (mut state, _) = playing(GameConfig::default());
		for _ in 0..69 {
			state.tick();
		}
		assert_eq!(state.phase(), Phase::Playing);
		assert!(state.remaining_time() > 0.0);
		state.tick();
		assert_eq!(state.phase(), Phase::Fail);
	}

	#[test]
	fn partial_step_clamps_to_zero() {
		let (mut state, _) = playing(GameConfig {
			time_limit: 0.05,
			..GameConfig::default()
		});
		let effects = state.tick();
		assert_eq!(state.remaining_time(), 0.0);
		assert_eq!(state.phase(), Phase::Fail);
		assert_eq!(effects.len(), 1);
	}

	#[test]
	fn click_after_timeout_is_ignored() {
		let (mut state, _) = playing(GameConfig {
			time_limit: 0.1,
			..GameConfig::default()
		});
		state.tick();
		let target = state.round().unwrap().target_index();
		assert!(state.select(target, None).is_empty());
		assert_eq!(state.phase(), Phase::Fail);
		assert_eq!(state.failure(), Some(FailureCause::Timeout));
	}

	#[test]
	fn stale_advance_is_ignored() {
		let (mut state, mut rng) = playing(GameConfig::default());
		let first = state.round_id();
		let target = state.round().unwrap().target_index();
		state.select(target, None);
		state.advance(first, &mut rng);
		let board = state.round().unwrap().board.clone();

		// A duplicate of the same timer must not replace the fresh round.
		state.advance(first, &mut rng);
		assert_eq!(state.round().unwrap().board, board);
		assert_eq!(state.phase(), Phase::Playing);
	}

	#[test]
	fn restart_only_from_fail() {
		let (mut state, mut rng) = playing(GameConfig::default());
		let id = state.round_id();
		state.restart(&mut rng);
		assert_eq!(state.round_id(), id);

		let wrong = wrong_index(&state);
		state.select(wrong, None);
		state.restart(&mut rng);
		assert_eq!(state.phase(), Phase::Playing);
		assert_eq!(state.score(), 0);
		assert_eq!(state.remaining_time(), 7.0);
		assert_eq!(state.failure(), None);
		assert_eq!(state.round_id(), id + 1);
	}

	#[test]
	fn every_new_round_rearms_the_countdown() {
		let mut rng = StdRng::seed_from_u64(8);
		let mut state = HuntState::new(GameConfig {
			tick_ms: 50,
			..GameConfig::default()
		});
		let rearm = vec![Effect::StartCountdown { period_ms: 50 }];
		assert_eq!(state.start_game("Ada", &mut rng), rearm);

		let target = state.round().unwrap().target_index();
		state.select(target, None);
		assert_eq!(state.advance(state.round_id(), &mut rng), rearm);

		let wrong = wrong_index(&state);
		state.select(wrong, None);
		assert_eq!(state.restart(&mut rng), rearm);

		// Rejected transitions leave the running countdown alone.
		assert!(state.restart(&mut rng).is_empty());
		assert!(state.advance(state.round_id(), &mut rng).is_empty());
	}

	#[test]
	fn out_of_range_pick_is_ignored() {
		let (mut state, _) = playing(GameConfig::default());
		assert!(state.select(100, None).is_empty());
		assert_eq!(state.phase(), Phase::Playing);
	}

	#[test]
	fn focus_starts_at_origin_and_clamps() {
		let (mut state, _) = playing(GameConfig {
			grid_size: 3,
			..GameConfig::default()
		});
		assert!(state.confirm_focus(None).is_empty());

		state.move_focus(Direction::Left);
		assert_eq!(state.selected(), Some(0));
		state.move_focus(Direction::Up);
		state.move_focus(Direction::Left);
		assert_eq!(state.selected(), Some(0));
		state.move_focus(Direction::Right);
		state.move_focus(Direction::Right);
		state.move_focus(Direction::Right);
		assert_eq!(state.selected(), Some(2));
		state.move_focus(Direction::Down);
		state.move_focus(Direction::Down);
		state.move_focus(Direction::Down);
		assert_eq!(state.selected(), Some(8));
	}

	#[test]
	fn confirm_focus_selects_focused_cell() {
		let (mut state, _) = playing(GameConfig {
			grid_size: 1,
			..GameConfig::default()
		});
		state.move_focus(Direction::Down);
		state.confirm_focus(None);
		assert_eq!(state.phase(), Phase::Success);
		assert_eq!(state.score(), 1);
	}
}
