//! Pointer-reactive particle field.
//!
//! A fixed-size set of particles scattered uniformly over the viewport.
//! Each particle remembers its spawn point; the pointer pushes nearby
//! particles away (closer means stronger, scaled by a per-particle
//! density so the motion is non-uniform) and particles ease back toward
//! their base when left alone.
//!
//! The state is an owned object and the step function takes the pointer
//! explicitly, so the field can be simulated headless:
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut field = FieldSim::new(FieldConfig::default(), 1920.0, 1080.0, &mut rng);
//! field.step(Some(Vec2::new(200.0, 300.0)));
//! ```

use glam::Vec2;
use rand::Rng;

use crate::draw::{Disc, DrawList};
use crate::visuals::Rgba;

/// Density (repulsion strength) is sampled once per particle from
/// `[DENSITY_MIN, DENSITY_MIN + DENSITY_SPAN)`.
const DENSITY_MIN: f32 = 5.0;
const DENSITY_SPAN: f32 = 40.0;

/// Configuration for the particle field.
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    /// Number of particles.
    pub count: usize,
    /// Pointer influence radius in pixels.
    pub influence_radius: f32,
    /// Rendered disc radius in pixels.
    pub particle_radius: f32,
    /// Ease-back divisor: each frame a resting particle moves
    /// `offset / ease_divisor` toward its base (exponential decay).
    pub ease_divisor: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            influence_radius: 150.0,
            particle_radius: 3.0,
            ease_divisor: 10.0,
        }
    }
}

/// One field particle.
#[derive(Debug, Clone, Copy)]
pub struct FieldParticle {
    pub position: Vec2,
    /// Spawn point; never changes after creation.
    pub base: Vec2,
    /// Per-particle repulsion strength.
    pub density: f32,
}

impl FieldParticle {
    fn spawn(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let base = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        Self {
            position: base,
            base,
            density: DENSITY_MIN + rng.gen::<f32>() * DENSITY_SPAN,
        }
    }
}

/// The pointer-reactive particle field simulation.
pub struct FieldSim {
    config: FieldConfig,
    particles: Vec<FieldParticle>,
}

impl FieldSim {
    /// Spawn `config.count` particles uniformly over `[0, width) x [0, height)`.
    pub fn new(config: FieldConfig, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| FieldParticle::spawn(width, height, rng))
            .collect();
        Self { config, particles }
    }

    /// Discard all particles and respawn over the new viewport.
    pub fn reseed(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.particles.clear();
        self.particles
            .extend((0..self.config.count).map(|_| FieldParticle::spawn(width, height, rng)));
    }

    /// Advance the field by one frame.
    ///
    /// `pointer` is the cursor position in pixels, `None` when the
    /// cursor has not entered (or has left) the surface.
    ///
    /// Every particle checks its distance to the single pointer; no
    /// spatial index is needed at this scale.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        let radius = self.config.influence_radius;
        let ease = self.config.ease_divisor;

        for p in &mut self.particles {
            if let Some(cursor) = pointer {
                let offset = p.position - cursor;
                let distance = offset.length();

                if distance < radius {
                    // Zero distance leaves the push direction undefined;
                    // the particle holds still for this frame.
                    if distance > 0.0 {
                        let force = (radius - distance) / radius;
                        p.position += offset / distance * force * p.density;
                    }
                    continue;
                }
            }

            // Exponential ease back toward the spawn point.
            p.position -= (p.position - p.base) / ease;
        }
    }

    /// Emit one solid white disc per particle.
    pub fn render(&self, frame: &mut DrawList) {
        for p in &self.particles {
            frame.push_disc(Disc::solid(p.position, self.config.particle_radius, Rgba::WHITE));
        }
    }

    pub fn particles(&self) -> &[FieldParticle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
