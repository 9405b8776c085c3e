//! Ambient background effects: twinkling stars and rising floaters.
//!
//! Purely cosmetic. Stars sit still and oscillate in opacity; floaters
//! spawn occasionally at the bottom edge, drift upward across the
//! viewport, and are removed when their lifetime expires. Unlike the
//! field and circuit layers these are timer-driven, so `step` takes the
//! frame's delta time.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use crate::draw::{Disc, DrawList};
use crate::visuals::Rgba;

/// Configuration for the ambient layer.
#[derive(Debug, Clone, Copy)]
pub struct AmbientConfig {
    /// Number of twinkling stars.
    pub star_count: usize,
    /// Seconds between floater spawn rolls.
    pub spawn_interval: f32,
    /// Chance that a spawn roll produces a floater.
    pub spawn_chance: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            star_count: 50,
            spawn_interval: 2.0,
            spawn_chance: 0.3,
        }
    }
}

/// A fixed star with a periodic opacity oscillation.
#[derive(Debug, Clone, Copy)]
struct Star {
    position: Vec2,
    /// Twinkle period in seconds, `[2, 6)`.
    period: f32,
    /// Phase offset so the stars don't pulse in unison.
    phase: f32,
}

impl Star {
    fn spawn(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            period: 2.0 + rng.gen::<f32>() * 4.0,
            phase: rng.gen::<f32>() * 2.0 * PI,
        }
    }

    /// Opacity at a point in time: an ease-in-out alternation between
    /// 0.2 and 1.
    fn opacity(&self, elapsed: f32) -> f32 {
        let wave = (elapsed * 2.0 * PI / self.period + self.phase).sin() * 0.5 + 0.5;
        0.2 + wave * 0.8
    }
}

/// A short-lived particle rising from the bottom of the viewport.
#[derive(Debug, Clone, Copy)]
struct Floater {
    start: Vec2,
    /// Horizontal drift over the full lifetime, `[-100, 100)` px.
    drift: f32,
    /// Age in seconds.
    age: f32,
    /// Total lifetime in seconds, `[5, 10)`.
    lifetime: f32,
}

impl Floater {
    fn spawn(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            start: Vec2::new(rng.gen::<f32>() * width, height),
            drift: rng.gen::<f32>() * 200.0 - 100.0,
            age: 0.0,
            lifetime: 5.0 + rng.gen::<f32>() * 5.0,
        }
    }

    fn life_fraction(&self) -> f32 {
        self.age / self.lifetime
    }

    /// Rises the full viewport height over its lifetime.
    fn position(&self, height: f32) -> Vec2 {
        let t = self.life_fraction();
        self.start + Vec2::new(self.drift * t, -height * t)
    }

    /// Fades in over the first 10% of life and out over the last 10%.
    fn opacity(&self) -> f32 {
        let t = self.life_fraction();
        if t < 0.1 {
            t / 0.1
        } else if t > 0.9 {
            (1.0 - t) / 0.1
        } else {
            1.0
        }
    }
}

/// The ambient background simulation.
pub struct AmbientSim {
    config: AmbientConfig,
    width: f32,
    height: f32,
    stars: Vec<Star>,
    floaters: Vec<Floater>,
    elapsed: f32,
    /// Time accumulated toward the next spawn roll.
    spawn_timer: f32,
}

impl AmbientSim {
    pub fn new(config: AmbientConfig, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let stars = (0..config.star_count)
            .map(|_| Star::spawn(width, height, rng))
            .collect();
        Self {
            config,
            width,
            height,
            stars,
            floaters: Vec::new(),
            elapsed: 0.0,
            spawn_timer: 0.0,
        }
    }

    /// Discard and respawn everything for a new viewport size.
    pub fn reseed(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        self.stars.clear();
        self.stars
            .extend((0..self.config.star_count).map(|_| Star::spawn(width, height, rng)));
        self.floaters.clear();
        self.spawn_timer = 0.0;
    }

    /// Advance by `dt` seconds: age and cull floaters, roll for spawns.
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) {
        self.elapsed += dt;

        for floater in &mut self.floaters {
            floater.age += dt;
        }
        self.floaters.retain(|f| f.age < f.lifetime);

        self.spawn_timer += dt;
        while self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer -= self.config.spawn_interval;
            if rng.gen::<f32>() < self.config.spawn_chance {
                self.floaters.push(Floater::spawn(self.width, self.height, rng));
            }
        }
    }

    /// Emit the stars and floaters as discs.
    pub fn render(&self, frame: &mut DrawList) {
        for star in &self.stars {
            frame.push_disc(Disc::solid(
                star.position,
                1.0,
                Rgba::WHITE.with_alpha(star.opacity(self.elapsed)),
            ));
        }

        for floater in &self.floaters {
            let alpha = floater.opacity() * 0.6;
            frame.push_disc(Disc::new(
                floater.position(self.height),
                2.0,
                [
                    Rgba::CYAN.with_alpha(alpha),
                    Rgba::CYAN.with_alpha(alpha * 0.5),
                    Rgba::CYAN.faded(),
                ],
            ));
        }
    }

    pub fn floater_count(&self) -> usize {
        self.floaters.len()
    }
}
