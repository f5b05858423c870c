//! Shared data structures passed between the game core and the view layer.

use serde::Deserialize;

/// Discrete state of a hunt session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// Before the first round; waiting for a player name.
	#[default]
	Idle,
	/// A board is shown and the countdown is running.
	Playing,
	/// The target was found; the next round starts after the settle delay.
	Success,
	/// Wrong cell or timeout. Waits for a restart.
	Fail,
}

/// Why the last round was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCause {
	/// The player picked this (non-target) cell.
	WrongCell(usize),
	/// The countdown reached zero.
	Timeout,
}

/// Keyboard focus movement on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

/// A short sine tone, fulfilled by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Tone {
	pub frequency_hz: f32,
	pub duration_secs: f64,
}

/// Screen-space rectangle of one board cell, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellRect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl CellRect {
	/// Rectangle of cell `index` inside a container laid out as a `columns` x `rows` grid.
	pub fn in_container(container: CellRect, index: usize, columns: usize, rows: usize) -> Self {
		let (columns, rows) = (columns.max(1), rows.max(1));
		let (width, height) = (
			container.width / columns as f64,
			container.height / rows as f64,
		);
		let (row, col) = (index / columns, index % columns);
		Self {
			x: container.x + col as f64 * width,
			y: container.y + row as f64 * height,
			width,
			height,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Side effects requested by the state machine. The host executes them; the core never
/// touches timers, audio or the canvas directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	PlayTone(Tone),
	/// Spawn celebratory particles at this screen position.
	Burst { x: f64, y: f64 },
	/// Call `advance(round_id)` once `delay_ms` have elapsed.
	ScheduleAdvance { round_id: u64, delay_ms: u32 },
	/// A round just began: (re)arm the countdown so its first tick lands a full
	/// `period_ms` from now.
	StartCountdown { period_ms: u32 },
}
