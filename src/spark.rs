use crate::canvas::Surface;
use crate::color::hsla;
use crate::config::SparkConfig;
use crate::simulation::Entity;
use crate::trail::Trail;
use fastrand::Rng;
use std::f32::consts::TAU;

const TRAIL_LEN: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Burn {
    Alive,
    Extinguished,
}

/// Ballistic fragment of an exploded rocket. Fades out at its own pace.
#[derive(Clone, Debug)]
pub struct Spark {
    x: f32,
    y: f32,
    angle: f32,
    speed: f32,
    friction: f32,
    gravity: f32,
    hue: f32,
    brightness: f32,
    alpha: f32,
    decay: f32,
    trail: Trail<TRAIL_LEN>,
}

fn in_range(rng: &mut Rng, range: &std::ops::Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}

impl Spark {
    pub fn new(rng: &mut Rng, config: &SparkConfig, (x, y): (f32, f32)) -> Self {
        Self {
            x,
            y,
            angle: rng.f32() * TAU,
            speed: in_range(rng, &config.speed),
            friction: config.friction,
            gravity: config.gravity,
            hue: rng.f32() * 360.0,
            brightness: 50.0 + rng.f32() * 50.0,
            alpha: 1.0,
            decay: in_range(rng, &config.decay),
            trail: Trail::new(x, y),
        }
    }

    pub fn advance(&mut self) -> Burn {
        self.trail.push(self.x, self.y);
        self.speed *= self.friction;
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed + self.gravity;
        self.alpha -= self.decay;

        if self.alpha <= self.decay {
            Burn::Extinguished
        } else {
            Burn::Alive
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }
}

impl Entity for Spark {
    fn draw(&self, surface: &mut dyn Surface, _rng: &mut Rng) {
        let (from_x, from_y) = self.trail.oldest();
        surface.begin_path();
        surface.move_to(from_x, from_y);
        surface.line_to(self.x, self.y);
        surface.stroke(hsla(self.hue, 100.0, self.brightness, self.alpha), 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::Recorder;
    use crate::config::Config;

    fn spark_at(origin: (f32, f32), seed: u64) -> Spark {
        let mut rng = Rng::with_seed(seed);
        Spark::new(&mut rng, &Config::default().spark, origin)
    }

    #[test]
    fn created_within_configured_ranges() {
        let config = Config::default().spark;
        for seed in 0..50 {
            let spark = spark_at((3.0, 4.0), seed);
            assert_eq!(spark.position(), (3.0, 4.0));
            assert_eq!(spark.trail.oldest(), (3.0, 4.0));
            assert!((0.0..TAU).contains(&spark.angle));
            assert!(config.speed.contains(&spark.speed));
            assert!(config.decay.contains(&spark.decay));
            assert!((0.0..360.0).contains(&spark.hue));
            assert!((50.0..100.0).contains(&spark.brightness));
            assert_eq!(spark.alpha(), 1.0);
        }
    }

    #[test]
    fn one_tick_of_friction_and_gravity() {
        let mut spark = spark_at((0.0, 0.0), 1);
        spark.speed = 5.0;
        spark.friction = 0.95;
        spark.gravity = 0.8;
        let angle = spark.angle;

        spark.advance();

        assert!((spark.speed - 4.75).abs() < 1e-6);
        let (x, y) = spark.position();
        assert!((x - angle.cos() * 4.75).abs() < 1e-5);
        assert!((y - (angle.sin() * 4.75 + 0.8)).abs() < 1e-5);
    }

    #[test]
    fn opacity_decays_linearly_until_extinguished() {
        let mut spark = spark_at((0.0, 0.0), 9);
        let decay = spark.decay();

        let mut ticks = 0u32;
        loop {
            let before = spark.alpha();
            let burn = spark.advance();
            ticks += 1;

            assert!(spark.alpha() < before);
            assert!((spark.alpha() - (1.0 - ticks as f32 * decay)).abs() < 1e-4);
            if burn == Burn::Extinguished {
                assert!(spark.alpha() <= decay);
                break;
            }
            assert!(spark.alpha() > decay);
        }

        // Roughly 1/decay ticks of life
        let expected = (1.0 / decay).floor() as u32;
        assert!(ticks + 2 >= expected && ticks <= expected + 1, "{ticks} vs {expected}");
    }

    #[test]
    fn speed_never_grows() {
        let mut spark = spark_at((10.0, 10.0), 3);
        let mut last = spark.speed;
        while spark.advance() == Burn::Alive {
            assert!(spark.speed < last);
            last = spark.speed;
        }
    }

    #[test]
    fn draw_uses_current_opacity() {
        let mut spark = spark_at((50.0, 50.0), 4);
        spark.advance();
        spark.advance();

        let mut rng = Rng::with_seed(0);
        let mut surface = Recorder::new(100.0, 100.0);
        spark.draw(&mut surface, &mut rng);

        let stroke = &surface.strokes[0];
        assert_eq!(stroke.points, vec![(50.0, 50.0), spark.position()]);
        assert!((stroke.color.a - spark.alpha()).abs() < 1e-6);
    }
}
