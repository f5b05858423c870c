//! Cancellable browser timers and listeners.
//!
//! Each handle owns its JS callback and cancels it on drop, so tearing down whatever
//! holds the handle stops the callback for good.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

fn window() -> Option<Window> {
	let window = web_sys::window();
	if window.is_none() {
		warn!("emoji-hunt: no window, timer not scheduled");
	}
	window
}

/// Repeating timer (`setInterval`).
pub struct Interval {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

impl Interval {
	pub fn new(period_ms: u32, callback: impl FnMut() + 'static) -> Option<Self> {
		let callback: Closure<dyn FnMut()> = Closure::new(callback);
		let id = window()?
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				period_ms as i32,
			)
			.ok()?;
		Some(Self {
			id,
			_callback: callback,
		})
	}
}

impl Drop for Interval {
	fn drop(&mut self) {
		if let Some(w) = web_sys::window() {
			w.clear_interval_with_handle(self.id);
		}
	}
}

/// One-shot timer (`setTimeout`).
pub struct Timeout {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

impl Timeout {
	pub fn new(delay_ms: u32, callback: impl FnOnce() + 'static) -> Option<Self> {
		let callback: Closure<dyn FnMut()> = Closure::once(callback);
		let id = window()?
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				delay_ms as i32,
			)
			.ok()?;
		Some(Self {
			id,
			_callback: callback,
		})
	}
}

impl Drop for Timeout {
	fn drop(&mut self) {
		if let Some(w) = web_sys::window() {
			w.clear_timeout_with_handle(self.id);
		}
	}
}

struct FrameLoopState {
	frame_id: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// The loop runs until the handle is dropped. The callback only holds a weak
/// reference to the loop state, so no frame is requested after teardown. The handle
/// must not be dropped from inside its own frame callback.
pub struct FrameLoop {
	state: Rc<FrameLoopState>,
}

impl FrameLoop {
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Option<Self> {
		let window = window()?;
		let state = Rc::new(FrameLoopState {
			frame_id: Cell::new(None),
			callback: RefCell::new(None),
		});

		let weak: Weak<FrameLoopState> = Rc::downgrade(&state);
		*state.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(state) = weak.upgrade() else {
				return;
			};
			on_frame();
			if let (Some(w), Some(cb)) = (web_sys::window(), state.callback.borrow().as_ref()) {
				state
					.frame_id
					.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		if let Some(ref cb) = *state.callback.borrow() {
			state
				.frame_id
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
		Some(Self { state })
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(w), Some(id)) = (web_sys::window(), self.state.frame_id.take()) {
			let _ = w.cancel_animation_frame(id);
		}
		self.state.callback.borrow_mut().take();
	}
}

/// `window.addEventListener` registration, removed on drop.
pub struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
	pub fn new(event: &'static str, callback: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
		let callback: Closure<dyn FnMut(web_sys::Event)> = Closure::new(callback);
		window()?
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(w) = web_sys::window() {
			let _ = w.remove_event_listener_with_callback(
				self.event,
				self.callback.as_ref().unchecked_ref(),
			);
		}
	}
}
