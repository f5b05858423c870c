//! Leptos component wiring the hunt state machine to the DOM.
//!
//! The state machine lives in a signal. DOM events are mapped to commands by the input
//! adapter, applied to the state, and the returned effects are executed here: tones go
//! to the audio module, bursts to the particle canvas, and advances become one-shot
//! timers. Each new round re-arms the countdown interval, which then ticks until the
//! component unmounts or the next round starts.

use std::f64::consts::PI;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use super::audio;
use super::canvas::{ParticleCanvas, ParticleSlot};
use super::config::GameConfig;
use super::input::{self, Command};
use super::scheduler::{Interval, Timeout, WindowListener};
use super::state::HuntState;
use super::types::{CellRect, Effect, FailureCause, Phase};

/// Radius of the countdown ring in SVG units.
const RING_RADIUS: f64 = 28.0;

/// Timers and listeners owned by one mounted game.
#[derive(Default)]
struct Handles {
	countdown: Option<Interval>,
	advance: Option<Timeout>,
	keys: Option<WindowListener>,
}

impl Handles {
	fn cancel_all(&mut self) {
		self.countdown.take();
		self.advance.take();
		self.keys.take();
	}
}

/// Per-cell highlight state, split out so the board only re-renders classes when one
/// of these changes rather than on every countdown tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct CellMarks {
	selected: Option<usize>,
	found: Option<usize>,
	revealed: Option<usize>,
	wrong: Option<usize>,
}

impl CellMarks {
	fn of(hunt: &HuntState) -> Self {
		Self {
			selected: hunt.selected(),
			found: hunt.found_target(),
			revealed: hunt.revealed_target(),
			wrong: match hunt.failure() {
				Some(FailureCause::WrongCell(i)) => Some(i),
				_ => None,
			},
		}
	}

	fn class_for(&self, index: usize) -> String {
		let mut class = String::from("cell");
		for (mark, name) in [
			(self.selected, " selected"),
			(self.found, " found"),
			(self.revealed, " revealed"),
			(self.wrong, " wrong"),
		] {
			if mark == Some(index) {
				class.push_str(name);
			}
		}
		class
	}
}

/// Applies commands to the hunt state and executes the resulting effects.
#[derive(Clone, Copy)]
struct Driver {
	hunt: RwSignal<HuntState>,
	name: RwSignal<String>,
	handles: StoredValue<Handles, LocalStorage>,
	particles: ParticleSlot,
	grid_ref: NodeRef<leptos::html::Div>,
}

impl Driver {
	fn run(self, command: Command) {
		let mut rng = rand::thread_rng();
		let effects = match command {
			Command::StartGame => {
				let name = self.name.get_untracked();
				self.hunt.try_update(|h| h.start_game(&name, &mut rng))
			}
			Command::Select(index) => {
				let cell = self.cell_rect(index);
				self.hunt.try_update(|h| h.select(index, cell))
			}
			Command::ConfirmFocus => {
				let cell = self
					.hunt
					.with_untracked(HuntState::selected)
					.and_then(|i| self.cell_rect(i));
				self.hunt.try_update(|h| h.confirm_focus(cell))
			}
			Command::MoveFocus(direction) => self.hunt.try_update(|h| {
				h.move_focus(direction);
				Vec::new()
			}),
			Command::Restart => self.hunt.try_update(|h| h.restart(&mut rng)),
		};
		self.apply(effects.unwrap_or_default());
	}

	fn tick(self) {
		if self.hunt.with_untracked(HuntState::phase) != Phase::Playing {
			return;
		}
		let effects = self.hunt.try_update(HuntState::tick).unwrap_or_default();
		self.apply(effects);
	}

	fn advance(self, round_id: u64) {
		let mut rng = rand::thread_rng();
		let effects = self
			.hunt
			.try_update(|h| h.advance(round_id, &mut rng))
			.unwrap_or_default();
		self.apply(effects);
	}

	fn key_down(self, ev: web_sys::Event) {
		let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		let phase = self.hunt.with_untracked(HuntState::phase);
		let name_ready = self.name.with_untracked(|n| !n.trim().is_empty());
		let Some(action) = input::map_key(phase, &ev.key(), name_ready) else {
			return;
		};
		if action.prevent_default {
			ev.prevent_default();
		}
		self.run(action.command);
	}

	fn apply(self, effects: Vec<Effect>) {
		for effect in effects {
			match effect {
				Effect::PlayTone(tone) => audio::play_tone(tone),
				Effect::Burst { x, y } => self.particles.update_value(|slot| {
					if let Some(ps) = slot {
						ps.burst(x, y, &mut rand::thread_rng());
					}
				}),
				Effect::ScheduleAdvance { round_id, delay_ms } => {
					let timeout = Timeout::new(delay_ms, move || self.advance(round_id));
					self.handles.update_value(|h| h.advance = timeout);
				}
				Effect::StartCountdown { period_ms } => {
					let countdown = Interval::new(period_ms, move || self.tick());
					self.handles.update_value(|h| h.countdown = countdown);
				}
			}
		}
	}

	/// Screen rectangle of a cell, derived from the rendered board's bounding box.
	fn cell_rect(self, index: usize) -> Option<CellRect> {
		let rect = self.grid_ref.get_untracked()?.get_bounding_client_rect();
		let size = self.hunt.with_untracked(|h| h.config().grid_size);
		let container = CellRect {
			x: rect.left(),
			y: rect.top(),
			width: rect.width(),
			height: rect.height(),
		};
		Some(CellRect::in_container(container, index, size, size))
	}
}

/// The complete game: particle backdrop, start screen, board, countdown and feedback.
#[component]
pub fn EmojiHunt(
	/// Game constants; defaults apply when omitted.
	#[prop(optional)]
	config: Option<GameConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default().validated();

	let driver = Driver {
		hunt: RwSignal::new(HuntState::new(config)),
		name: RwSignal::new(String::new()),
		handles: StoredValue::new_local(Handles::default()),
		particles: StoredValue::new_local(None),
		grid_ref: NodeRef::new(),
	};

	driver
		.handles
		.update_value(|h| h.keys = WindowListener::new("keydown", move |ev| driver.key_down(ev)));
	let handles = driver.handles;
	on_cleanup(move || handles.update_value(Handles::cancel_all));

	let hunt = driver.hunt;
	let started = Memo::new(move |_| hunt.with(HuntState::phase) != Phase::Idle);

	view! {
		<ParticleCanvas particles=driver.particles />
		<main class="emoji-hunt">
			{move || {
				if started.get() {
					view! { <GameScreen driver=driver /> }.into_any()
				} else {
					view! { <StartScreen driver=driver /> }.into_any()
				}
			}}
		</main>
	}
}

#[component]
fn StartScreen(driver: Driver) -> impl IntoView {
	let name = driver.name;
	let limit = driver.hunt.with_untracked(|h| h.config().time_limit);

	view! {
		<section class="panel start-screen">
			<h1>"Emoji Hunt"</h1>
			<p>{format!("Find the hidden emoji in {limit} seconds!")}</p>
			<label for="player-name">"Your Name"</label>
			<input
				id="player-name"
				type="text"
				placeholder="Enter your name..."
				autofocus=true
				prop:value=move || name.get()
				on:input=move |ev| name.set(event_target_value(&ev))
			/>
			<button
				class="primary"
				disabled=move || name.with(|n| n.trim().is_empty())
				on:click=move |_| driver.run(Command::StartGame)
				aria-label="Start the emoji hunt game"
			>
				"Start Hunt"
			</button>
		</section>
	}
}

#[component]
fn GameScreen(driver: Driver) -> impl IntoView {
	let hunt = driver.hunt;
	let phase = Memo::new(move |_| hunt.with(HuntState::phase));
	let cells = Memo::new(move |_| hunt.with(|h| h.cells().to_vec()));
	let marks = Memo::new(move |_| hunt.with(CellMarks::of));
	let columns = hunt.with_untracked(|h| h.config().grid_size);

	let board = move || {
		cells
			.get()
			.into_iter()
			.enumerate()
			.map(move |(index, symbol)| {
				let label = format!("Emoji {}, position {}", symbol, index + 1);
				view! {
					<button
						class=move || marks.with(|m| m.class_for(index))
						disabled=move || phase.get() != Phase::Playing
						aria-label=label
						on:click=move |_| {
							if let Some(command) = input::map_click(phase.get_untracked(), index) {
								driver.run(command);
							}
						}
					>
						{symbol}
					</button>
				}
			})
			.collect_view()
	};

	view! {
		<section class="game-screen">
			<header>
				<h2>
					{move || hunt.with(|h| format!("{} | Points: {}", h.player_label(), h.score()))}
				</h2>
				<span class="best">{move || hunt.with(|h| format!("Best: {}", h.best_score()))}</span>
				<Show when=move || phase.get() == Phase::Playing>
					<Countdown hunt=hunt />
				</Show>
			</header>
			<Show when=move || phase.get() == Phase::Playing>
				<div class="target">
					<p>"Find this emoji:"</p>
					<div class="target-symbol">
						{move || hunt.with(|h| h.target().unwrap_or_default().to_string())}
					</div>
				</div>
			</Show>
			<div class="panel board-frame">
				<div
					node_ref=driver.grid_ref
					class="board"
					style=format!("grid-template-columns: repeat({columns}, minmax(0, 1fr));")
				>
					{board}
				</div>
			</div>
			<div class="feedback">
				<p class=move || if phase.get() == Phase::Success { "good" } else { "bad" }>
					{move || hunt.with(HuntState::feedback)}
				</p>
				<Show when=move || phase.get() == Phase::Fail>
					<button
						class="primary"
						on:click=move |_| driver.run(Command::Restart)
						aria-label="Restart the game and reset score"
					>
						"Restart Game"
					</button>
				</Show>
			</div>
		</section>
	}
}

/// Circular countdown indicator.
#[component]
fn Countdown(hunt: RwSignal<HuntState>) -> impl IntoView {
	let circumference = 2.0 * PI * RING_RADIUS;
	let remaining = move || hunt.with(HuntState::remaining_time);
	let offset = move || circumference * (1.0 - hunt.with(HuntState::time_fraction));

	view! {
		<div class="countdown">
			<svg viewBox="0 0 64 64" width="64" height="64">
				<circle cx="32" cy="32" r="28" fill="none" stroke="rgb(17, 24, 39)" stroke-width="4" />
				<circle
					cx="32"
					cy="32"
					r="28"
					fill="none"
					stroke="rgb(45, 212, 191)"
					stroke-width="4"
					stroke-dasharray=circumference.to_string()
					stroke-dashoffset=move || offset().to_string()
					transform="rotate(-90 32 32)"
				/>
			</svg>
			<span
				aria-live="polite"
				aria-label=move || format!("{:.1} seconds remaining", remaining())
			>
				{move || format!("{:.1}", remaining())}
			</span>
		</div>
	}
}
