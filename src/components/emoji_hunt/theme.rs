//! Visual theming for the particle backdrop.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Particle effect configuration.
///
/// Speeds are in pixels per frame at 60 fps; the simulation rescales them by the
/// elapsed time.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Number of ambient particles
	pub count: usize,
	/// Particles spawned per celebration burst
	pub burst_count: usize,
	/// Particle fill color (alpha comes from each particle)
	pub color: Color,
	/// Glow around each particle
	pub glow_color: Color,
	pub glow_blur: f64,
	/// Ambient radius range
	pub size_min: f64,
	pub size_max: f64,
	/// Burst radius range
	pub burst_size_min: f64,
	pub burst_size_max: f64,
	/// Max ambient speed; each axis is drawn from `[-speed/2, speed/2)`
	pub speed: f64,
	/// Max burst speed; each axis is drawn from `[-burst_speed/2, burst_speed/2)`
	pub burst_speed: f64,
	/// Ambient opacity range
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Life lost by a burst particle per frame
	pub burst_decay: f64,
}

impl Default for ParticleStyle {
	/// Teal dots with a soft glow.
	fn default() -> Self {
		let teal = Color::rgb(45, 212, 191);
		Self {
			count: 50,
			burst_count: 10,
			color: teal,
			glow_color: teal.with_alpha(0.5),
			glow_blur: 10.0,
			size_min: 1.0,
			size_max: 3.0,
			burst_size_min: 2.0,
			burst_size_max: 5.0,
			speed: 0.5,
			burst_speed: 4.0,
			opacity_min: 0.1,
			opacity_max: 0.4,
			burst_decay: 0.02,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_style_ranges_are_ordered() {
		let style = ParticleStyle::default();
		assert!(style.size_min <= style.size_max);
		assert!(style.burst_size_min <= style.burst_size_max);
		assert!(style.opacity_min <= style.opacity_max);
		assert!(style.burst_decay > 0.0);
		assert_eq!(style.glow_color, style.color.with_alpha(0.5));
		assert_eq!(style.color.to_css(), "#2dd4bf");
	}
}
