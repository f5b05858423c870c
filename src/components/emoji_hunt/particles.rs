//! Ambient and celebratory particle effects.

use rand::Rng;

use super::theme::ParticleStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
	/// Drifts forever, wrapping around the edges.
	Ambient,
	/// Spawned by a celebration; fades out and is removed.
	Burst,
}

/// A single particle.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
	/// Remaining life in `(0, 1]`; only burst particles decay.
	pub life: f64,
	pub kind: ParticleKind,
}

/// Manages the ambient population plus any live bursts.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	style: ParticleStyle,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	pub fn new<R: Rng + ?Sized>(style: &ParticleStyle, width: f64, height: f64, rng: &mut R) -> Self {
		let particles = (0..style.count)
			.map(|_| Particle {
				x: rng.gen_range(0.0..=width),
				y: rng.gen_range(0.0..=height),
				vx: (rng.r#gen::<f64>() - 0.5) * style.speed,
				vy: (rng.r#gen::<f64>() - 0.5) * style.speed,
				radius: rng.gen_range(style.size_min..=style.size_max),
				opacity: rng.gen_range(style.opacity_min..=style.opacity_max),
				life: 1.0,
				kind: ParticleKind::Ambient,
			})
			.collect();

		Self {
			particles,
			style: style.clone(),
			width,
			height,
		}
	}

	pub fn style(&self) -> &ParticleStyle {
		&self.style
	}

	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Spawns a celebration burst centered on `(x, y)`.
	pub fn burst<R: Rng + ?Sized>(&mut self, x: f64, y: f64, rng: &mut R) {
		let style = &self.style;
		self.particles.extend((0..style.burst_count).map(|_| Particle {
			x,
			y,
			vx: (rng.r#gen::<f64>() - 0.5) * style.burst_speed,
			vy: (rng.r#gen::<f64>() - 0.5) * style.burst_speed,
			radius: rng.gen_range(style.burst_size_min..=style.burst_size_max),
			opacity: 1.0,
			life: 1.0,
			kind: ParticleKind::Burst,
		}));
	}

	/// Update particle positions
	pub fn update(&mut self, dt: f64) {
		let frames = dt * 60.0;
		let decay = self.style.burst_decay * frames;
		let (width, height) = (self.width, self.height);

		self.particles.retain_mut(|p| {
			p.x += p.vx * frames;
			p.y += p.vy * frames;

			match p.kind {
				ParticleKind::Burst => {
					p.life -= decay;
					p.opacity = p.life.max(0.0);
					p.life > 0.0
				}
				ParticleKind::Ambient => {
					// Wrap around screen edges
					if p.x < 0.0 {
						p.x = width;
					} else if p.x > width {
						p.x = 0.0;
					}
					if p.y < 0.0 {
						p.y = height;
					} else if p.y > height {
						p.y = 0.0;
					}
					true
				}
			}
		});
	}

	/// Resize the drawable bounds. Particles keep their positions; any that end up
	/// outside wrap back in on the next update.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn count(&self, kind: ParticleKind) -> usize {
		self.particles.iter().filter(|p| p.kind == kind).count()
	}
}
