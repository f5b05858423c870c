//! Canvas rendering for the particle backdrop.
//!
//! The canvas is transparent: each frame clears it fully and redraws every particle, so
//! the page background shows through behind the game UI.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSystem;

/// Renders the complete particle field to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, particles: &ParticleSystem) {
	let (width, height) = particles.bounds();
	ctx.clear_rect(0.0, 0.0, width, height);

	let style = particles.style();
	let glow = style.glow_color.to_css();

	for p in &particles.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
		ctx.set_fill_style_str(&style.color.with_alpha(p.opacity).to_css());
		ctx.fill();

		// Second fill with a shadow for the glow halo
		ctx.set_shadow_color(&glow);
		ctx.set_shadow_blur(style.glow_blur);
		ctx.fill();
		ctx.set_shadow_blur(0.0);
	}
}
