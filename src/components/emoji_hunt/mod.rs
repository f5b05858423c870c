//! Find-the-emoji reaction game.
//!
//! A player is shown a target emoji and must find it on a board of decoys before the
//! countdown runs out. The pieces:
//! - [`grid`] generates boards
//! - [`state`] is the round state machine (phase, score, countdown)
//! - [`particles`] simulates the ambient and celebratory particle backdrop
//! - [`input`] maps clicks and key presses to commands
//! - [`EmojiHunt`] wires everything to the DOM
//!
//! The core modules are free of browser calls: the state machine returns [`Effect`]s
//! and the component executes them.
//!
//! # Example
//!
//! ```ignore
//! use emoji_hunt::{EmojiHunt, GameConfig};
//!
//! let config = GameConfig { grid_size: 6, ..GameConfig::default() };
//! view! { <EmojiHunt config=config /> }
//! ```

mod audio;
mod canvas;
mod component;
pub mod config;
pub mod grid;
pub mod input;
pub mod particles;
mod render;
mod scheduler;
pub mod state;
pub mod theme;
mod types;

pub use canvas::ParticleCanvas;
pub use component::EmojiHunt;
pub use config::GameConfig;
pub use state::{HuntState, Round};
pub use types::{CellRect, Direction, Effect, FailureCause, Phase, Tone};
