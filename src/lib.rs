//! emoji-hunt: a find-the-emoji reaction game for the browser.
//!
//! This crate provides a WASM game component: a timed board of emoji decoys hiding one
//! target, with an animated particle backdrop, keyboard navigation and sound cues.

use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::emoji_hunt::{EmojiHunt, GameConfig, HuntState, Phase};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("emoji-hunt: logging initialized");
}

/// Load game settings from a script element with id="game-config".
/// Expected format: a JSON object with any subset of the `GameConfig` fields.
fn load_game_config() -> Option<GameConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("game-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GameConfig>(&json_text) {
		Ok(config) => {
			info!(
				"emoji-hunt: loaded config, {}x{} board, {}s limit",
				config.grid_size, config.grid_size, config.time_limit
			);
			Some(config)
		}
		Err(e) => {
			warn!("emoji-hunt: failed to parse game config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads settings from the DOM and renders the game.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_game_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Emoji Hunt" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<EmojiHunt config=config />
	}
}
