// Integration tests (native) for the `emoji-hunt` crate.
// These drive whole sessions through the public state machine API and avoid any
// browser functionality so they run under plain `cargo test`.

use emoji_hunt::components::emoji_hunt::input::{self, Command};
use emoji_hunt::components::emoji_hunt::{Direction, Effect, GameConfig, HuntState, Phase};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn check_round_invariants(state: &HuntState) {
	let round = state.round().expect("round in progress");
	let cells = &round.board.cells;
	assert_eq!(cells.len(), state.config().cell_count());
	assert_eq!(cells[round.target_index()], round.target);
	assert_eq!(cells.iter().filter(|c| **c == round.target).count(), 1);
}

// Feeds a key press through the input adapter, as the component does.
fn press(state: &mut HuntState, key: &str, name: &str, rng: &mut StdRng) -> Vec<Effect> {
	let name_ready = !name.trim().is_empty();
	let Some(action) = input::map_key(state.phase(), key, name_ready) else {
		return Vec::new();
	};
	match action.command {
		Command::StartGame => state.start_game(name, rng),
		Command::Select(i) => state.select(i, None),
		Command::MoveFocus(d) => {
			state.move_focus(d);
			Vec::new()
		}
		Command::ConfirmFocus => state.confirm_focus(None),
		Command::Restart => state.restart(rng),
	}
}

#[test]
fn streak_then_failure_then_restart() {
	let mut rng = StdRng::seed_from_u64(2024);
	let mut state = HuntState::new(GameConfig::default());
	assert_eq!(state.phase(), Phase::Idle);

	state.start_game("Grace", &mut rng);
	check_round_invariants(&state);

	for expected in 1..=5 {
		let target = state.round().unwrap().target_index();
		let effects = state.select(target, None);
		assert_eq!(state.score(), expected);
		let Some(Effect::ScheduleAdvance { round_id, delay_ms }) = effects.last().cloned() else {
			panic!("success must schedule the next round");
		};
		assert_eq!(delay_ms, 700);
		state.advance(round_id, &mut rng);
		assert_eq!(state.phase(), Phase::Playing);
		check_round_invariants(&state);
	}

	// Let the clock run out.
	while state.phase() == Phase::Playing {
		state.tick();
		assert!(state.remaining_time() >= 0.0);
	}
	assert_eq!(state.phase(), Phase::Fail);
	assert_eq!(state.score(), 0);
	assert_eq!(state.best_score(), 5);
	assert!(state.revealed_target().is_some());
	assert!(state.feedback().unwrap().starts_with("Time's up!"));

	press(&mut state, "Enter", "Grace", &mut rng);
	assert_eq!(state.phase(), Phase::Playing);
	assert_eq!(state.player_label(), "Grace");
	check_round_invariants(&state);
}

#[test]
fn keyboard_only_session() {
	let mut rng = StdRng::seed_from_u64(99);
	let mut state = HuntState::new(GameConfig {
		grid_size: 4,
		..GameConfig::default()
	});

	press(&mut state, "Enter", "  ", &mut rng);
	assert_eq!(state.phase(), Phase::Idle);
	press(&mut state, "Enter", "Lin", &mut rng);
	assert_eq!(state.phase(), Phase::Playing);

	// Walk the focus to the target cell and confirm it.
	let target = state.round().unwrap().target_index();
	press(&mut state, "ArrowDown", "Lin", &mut rng);
	assert_eq!(state.selected(), Some(0));
	for _ in 0..target / 4 {
		press(&mut state, "ArrowDown", "Lin", &mut rng);
	}
	for _ in 0..target % 4 {
		press(&mut state, "ArrowRight", "Lin", &mut rng);
	}
	assert_eq!(state.selected(), Some(target));

	let effects = press(&mut state, " ", "Lin", &mut rng);
	assert_eq!(state.phase(), Phase::Success);
	assert_eq!(state.score(), 1);
	assert!(matches!(effects.first(), Some(Effect::PlayTone(t)) if t.frequency_hz == 800.0));

	// Nothing the player does during the settle delay counts.
	for key in ["Enter", " ", "ArrowLeft"] {
		assert!(press(&mut state, key, "Lin", &mut rng).is_empty());
	}
	assert_eq!(state.selected(), Some(target));
}

#[test]
fn failure_tone_is_lower_than_success_tone() {
	let config = GameConfig::default();
	assert!(config.failure_tone.frequency_hz < config.success_tone.frequency_hz);

	let mut rng = StdRng::seed_from_u64(5);
	let mut state = HuntState::new(config);
	state.start_game("Kay", &mut rng);
	state.move_focus(Direction::Right);
	let target = state.round().unwrap().target_index();
	let wrong = if target == 0 { 1 } else { 0 };
	let effects = state.select(wrong, None);
	assert!(matches!(effects.as_slice(), [Effect::PlayTone(t)] if t.frequency_hz == 200.0));
}
