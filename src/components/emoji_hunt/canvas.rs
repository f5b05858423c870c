//! Leptos component hosting the particle backdrop.
//!
//! The canvas fills the viewport behind the game UI. A `requestAnimationFrame` loop
//! advances and redraws the particles every frame for as long as the component is
//! mounted; unmounting cancels the loop and the resize listener.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::particles::ParticleSystem;
use super::render;
use super::scheduler::{FrameLoop, WindowListener};
use super::theme::ParticleStyle;

/// Shared slot for the particle system, so the game view can spawn bursts into it.
pub type ParticleSlot = StoredValue<Option<ParticleSystem>, LocalStorage>;

/// Fixed simulation step per animation frame.
const FRAME_DT: f64 = 1.0 / 60.0;

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Full-viewport canvas drawing ambient particles and celebration bursts.
#[component]
pub fn ParticleCanvas(
	/// Slot the canvas fills with its particle system on mount.
	particles: ParticleSlot,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let resize_listener = StoredValue::new_local(None::<WindowListener>);
	let style = ParticleStyle::default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("emoji-hunt: no window, particle backdrop disabled");
			return;
		};

		let (w, h) = window_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("emoji-hunt: no 2d context, particle backdrop disabled");
			return;
		};

		particles.set_value(Some(ParticleSystem::new(
			&style,
			w,
			h,
			&mut rand::thread_rng(),
		)));

		let canvas_resize = canvas.clone();
		resize_listener.set_value(WindowListener::new("resize", move |_| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			particles.update_value(|slot| {
				if let Some(ps) = slot {
					ps.resize(nw, nh);
				}
			});
		}));

		frame_loop.set_value(FrameLoop::start(move || {
			particles.update_value(|slot| {
				if let Some(ps) = slot {
					ps.update(FRAME_DT);
					render::render(&ctx, ps);
				}
			});
		}));
	});

	on_cleanup(move || {
		frame_loop.set_value(None);
		resize_listener.set_value(None);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
