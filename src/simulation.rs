use crate::canvas::Surface;
use crate::config::Config;
use crate::input::InputController;
use crate::rocket::{Flight, Rocket};
use crate::spark::{Burn, Spark};
use fastrand::Rng;
use log::debug;
use std::time::Duration;

/// Anything the frame loop can draw.
pub trait Entity {
    fn draw(&self, surface: &mut dyn Surface, rng: &mut Rng);
}

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub arrived: usize,
    pub spawned: usize,
    pub extinguished: usize,
}

/// Owns every live rocket and spark. Removal from a collection is the
/// entity's end of life.
pub struct Simulation {
    config: Config,
    rng: Rng,
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
}

impl Simulation {
    pub fn new(config: Config, rng: Rng) -> Self {
        Self {
            config,
            rng,
            rockets: Vec::new(),
            sparks: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Launches from the bottom center of the surface towards `target`.
    pub fn launch_toward(&mut self, width: f32, height: f32, target: (f32, f32)) {
        let origin = (width / 2.0, height);
        self.rockets
            .push(Rocket::new(&mut self.rng, &self.config.rocket, origin, target));
    }

    /// Launches towards a random point in the top half of the surface.
    pub fn launch_random(&mut self, width: f32, height: f32) {
        let target = (self.rng.f32() * width, self.rng.f32() * height / 2.0);
        self.launch_toward(width, height, target);
    }

    /// Spawns one batch of sparks at `at`, sized for the current width.
    pub fn explode(&mut self, at: (f32, f32), width: f32) -> usize {
        let count = self.config.batch.size_for(width);
        self.sparks.reserve(count);
        for _ in 0..count {
            self.sparks
                .push(Spark::new(&mut self.rng, &self.config.spark, at));
        }
        debug!("explosion at ({:.1}, {:.1}): {count} sparks", at.0, at.1);
        count
    }

    /// Advances every entity once without drawing.
    pub fn advance_frame(&mut self, width: f32) -> FrameStats {
        self.run_frame(width, |_, _| {})
    }

    /// Draws every entity with its pre-update trail, then advances it.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) -> FrameStats {
        let width = surface.width();
        self.run_frame(width, |entity, rng| entity.draw(&mut *surface, rng))
    }

    // Walks both collections back to front so swap_remove only ever moves an
    // entity that has already been visited this frame.
    fn run_frame(
        &mut self,
        width: f32,
        mut draw: impl FnMut(&dyn Entity, &mut Rng),
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        for i in (0..self.rockets.len()).rev() {
            draw(&self.rockets[i], &mut self.rng);
            if let Flight::Arrived { x, y } = self.rockets[i].advance() {
                self.rockets.swap_remove(i);
                stats.arrived += 1;
                stats.spawned += self.explode((x, y), width);
            }
        }

        for i in (0..self.sparks.len()).rev() {
            draw(&self.sparks[i], &mut self.rng);
            if self.sparks[i].advance() == Burn::Extinguished {
                self.sparks.swap_remove(i);
                stats.extinguished += 1;
            }
        }

        stats
    }

    /// Occasionally launches a rocket on its own once nobody has touched
    /// the surface for a while. Returns whether a rocket was launched.
    pub fn maybe_auto_launch(
        &mut self,
        width: f32,
        height: f32,
        now: Duration,
        input: &InputController,
    ) -> bool {
        if input.is_interacting() || input.idle_for(now) <= self.config.idle_threshold {
            return false;
        }
        if self.rng.f32() >= self.config.idle_launch_chance {
            return false;
        }
        self.launch_random(width, height);
        true
    }
}
