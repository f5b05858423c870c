//! Maps pointer and keyboard input to game commands.

use super::types::{Direction, Phase};

/// What the player asked for, already filtered by the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	StartGame,
	Select(usize),
	MoveFocus(Direction),
	ConfirmFocus,
	Restart,
}

/// A mapped key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyAction {
	pub command: Command,
	/// Suppress the browser default (page scroll on arrows / space).
	pub prevent_default: bool,
}

fn is_confirm(key: &str) -> bool {
	matches!(key, "Enter" | " " | "Spacebar")
}

/// Maps a `KeyboardEvent.key` value. `name_ready` tells whether the name field holds
/// a non-blank name.
pub fn map_key(phase: Phase, key: &str, name_ready: bool) -> Option<KeyAction> {
	let (command, prevent_default) = match phase {
		Phase::Idle => match key {
			"Enter" if name_ready => (Command::StartGame, false),
			_ => return None,
		},
		Phase::Playing => match key {
			"ArrowUp" => (Command::MoveFocus(Direction::Up), true),
			"ArrowDown" => (Command::MoveFocus(Direction::Down), true),
			"ArrowLeft" => (Command::MoveFocus(Direction::Left), true),
			"ArrowRight" => (Command::MoveFocus(Direction::Right), true),
			k if is_confirm(k) => (Command::ConfirmFocus, true),
			_ => return None,
		},
		Phase::Fail => match key {
			k if is_confirm(k) => (Command::Restart, k != "Enter"),
			_ => return None,
		},
		Phase::Success => return None,
	};
	Some(KeyAction {
		command,
		prevent_default,
	})
}

/// Maps a click on cell `index`.
pub fn map_click(phase: Phase, index: usize) -> Option<Command> {
	(phase == Phase::Playing).then_some(Command::Select(index))
}
