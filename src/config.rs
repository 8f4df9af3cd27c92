use std::ops::Range;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct RocketConfig {
    pub initial_speed: f32,
    /// Speed multiplier applied every tick. Must be >= 1.
    pub acceleration: f32,
}

#[derive(Clone, Debug)]
pub struct SparkConfig {
    pub speed: Range<f32>,
    /// Speed multiplier applied every tick. Must be < 1.
    pub friction: f32,
    /// Constant downward displacement per tick.
    pub gravity: f32,
    /// Opacity lost per tick, drawn once per spark.
    pub decay: Range<f32>,
}

/// Sparks per explosion, smaller on narrow surfaces.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub wide: usize,
    pub narrow: usize,
    pub narrow_below_width: f32,
}

impl BatchConfig {
    pub fn size_for(&self, surface_width: f32) -> usize {
        if surface_width < self.narrow_below_width {
            self.narrow
        } else {
            self.wide
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub rocket: RocketConfig,
    pub spark: SparkConfig,
    pub batch: BatchConfig,
    pub idle_threshold: Duration,
    /// Per-frame chance of an idle launch once the idle threshold has passed.
    pub idle_launch_chance: f32,
    pub hold_interval: Duration,
    pub burst_count: usize,
    pub burst_stagger: Duration,
    /// Alpha of the destination-out fill that fades the previous frame.
    pub fade_alpha: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rocket: RocketConfig {
                initial_speed: 2.0,
                acceleration: 1.05,
            },
            spark: SparkConfig {
                speed: 1.0..10.0,
                friction: 0.95,
                gravity: 0.8,
                decay: 0.01..0.03,
            },
            batch: BatchConfig {
                wide: 35,
                narrow: 20,
                narrow_below_width: 768.0,
            },
            idle_threshold: Duration::from_millis(2000),
            idle_launch_chance: 0.04,
            hold_interval: Duration::from_millis(300),
            burst_count: 3,
            burst_stagger: Duration::from_millis(200),
            fade_alpha: 0.3,
        }
    }
}

impl Config {
    /// Kinematics scaled down for half-block terminal pixels, where a full
    /// screen is a couple hundred pixels wide instead of a thousand.
    pub fn terminal() -> Self {
        let base = Self::default();
        Self {
            rocket: RocketConfig {
                initial_speed: 0.5,
                ..base.rocket
            },
            spark: SparkConfig {
                speed: 0.25..2.5,
                gravity: 0.2,
                ..base.spark
            },
            batch: BatchConfig {
                narrow_below_width: 120.0,
                ..base.batch
            },
            fade_alpha: 0.35,
            ..base
        }
    }
}
