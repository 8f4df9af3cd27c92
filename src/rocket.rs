use crate::canvas::Surface;
use crate::color::hsl;
use crate::config::RocketConfig;
use crate::simulation::Entity;
use crate::trail::Trail;
use fastrand::Rng;

const TRAIL_LEN: usize = 3;

/// Result of advancing a rocket by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flight {
    Flying,
    /// Reached its target this tick; sparks belong at `(x, y)`.
    Arrived { x: f32, y: f32 },
}

/// Shell climbing in a straight line towards its burst point.
#[derive(Clone, Debug)]
pub struct Rocket {
    x: f32,
    y: f32,
    target_x: f32,
    target_y: f32,
    angle: f32,
    speed: f32,
    acceleration: f32,
    brightness: f32,
    trail: Trail<TRAIL_LEN>,
}

impl Rocket {
    pub fn new(
        rng: &mut Rng,
        config: &RocketConfig,
        (x, y): (f32, f32),
        (target_x, target_y): (f32, f32),
    ) -> Self {
        Self {
            x,
            y,
            target_x,
            target_y,
            angle: (target_y - y).atan2(target_x - x),
            speed: config.initial_speed,
            acceleration: config.acceleration,
            brightness: 50.0 + rng.f32() * 50.0,
            trail: Trail::new(x, y),
        }
    }

    pub fn advance(&mut self) -> Flight {
        self.trail.push(self.x, self.y);
        self.speed *= self.acceleration;

        // Arrive rather than overshoot once the target is within one step
        if self.distance_to_target() <= self.speed {
            return Flight::Arrived {
                x: self.target_x,
                y: self.target_y,
            };
        }

        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
        Flight::Flying
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.target_x - self.x).hypot(self.target_y - self.y)
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Entity for Rocket {
    fn draw(&self, surface: &mut dyn Surface, rng: &mut Rng) {
        let (from_x, from_y) = self.trail.oldest();
        surface.begin_path();
        surface.move_to(from_x, from_y);
        surface.line_to(self.x, self.y);
        surface.stroke(hsl(rng.f32() * 360.0, 100.0, self.brightness), 1.0);
    }
}
