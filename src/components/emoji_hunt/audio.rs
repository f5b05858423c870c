//! Fire-and-forget tone playback over Web Audio.
//!
//! One `AudioContext` is created lazily and shared by all tones. Any failure (no Web
//! Audio support, autoplay policy, closed context) is logged at debug level and
//! otherwise ignored; game logic never waits on sound.

use std::cell::RefCell;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use super::types::Tone;

thread_local! {
	static CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

const PEAK_GAIN: f32 = 0.3;
const FLOOR_GAIN: f32 = 0.001;

/// Plays `tone` as a sine wave with an exponential fade-out.
pub fn play_tone(tone: Tone) {
	if let Err(e) = try_play(tone) {
		debug!("emoji-hunt: tone {:?} not played: {:?}", tone, e);
	}
}

fn try_play(tone: Tone) -> Result<(), JsValue> {
	let ctx = shared_context()?;
	// Contexts created before a user gesture start suspended.
	let _ = ctx.resume();

	let oscillator = ctx.create_oscillator()?;
	let gain = ctx.create_gain()?;
	oscillator.connect_with_audio_node(&gain)?;
	gain.connect_with_audio_node(&ctx.destination())?;

	oscillator.set_type(OscillatorType::Sine);
	oscillator.frequency().set_value(tone.frequency_hz);

	let now = ctx.current_time();
	let end = now + tone.duration_secs;
	gain.gain().set_value_at_time(PEAK_GAIN, now)?;
	gain.gain().exponential_ramp_to_value_at_time(FLOOR_GAIN, end)?;

	oscillator.start_with_when(now)?;
	oscillator.stop_with_when(end)?;
	Ok(())
}

fn shared_context() -> Result<AudioContext, JsValue> {
	CONTEXT.with(|slot| {
		let mut slot = slot.borrow_mut();
		if let Some(ctx) = slot.as_ref() {
			return Ok(ctx.clone());
		}
		let ctx = AudioContext::new()?;
		*slot = Some(ctx.clone());
		Ok(ctx)
	})
}
