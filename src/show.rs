use crate::canvas::{Composite, Surface};
use crate::color::Rgba;
use crate::config::Config;
use crate::input::{Command, InputController, InputEvent};
use crate::simulation::{FrameStats, Simulation};
use fastrand::Rng;
use log::debug;
use std::time::Duration;

/// One fireworks display: the simulation, its input state, and the burst
/// launches still waiting for their turn.
pub struct Show {
    simulation: Simulation,
    input: InputController,
    pending_launches: Vec<Duration>,
}

impl Show {
    pub fn new(config: Config, rng: Rng) -> Self {
        let input = InputController::new(config.hold_interval);
        Self {
            simulation: Simulation::new(config, rng),
            input,
            pending_launches: Vec::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn handle(&mut self, event: InputEvent, now: Duration, surface: &dyn Surface) {
        match self.input.handle(event, now) {
            Command::None => {}
            Command::Launch { x, y } => {
                self.simulation
                    .launch_toward(surface.width(), surface.height(), (x, y));
            }
            Command::Burst => {
                let config = self.simulation.config();
                debug!("burst of {} rockets", config.burst_count);
                let stagger = config.burst_stagger;
                self.pending_launches
                    .extend((0..config.burst_count as u32).map(|i| now + stagger * i));
            }
        }
    }

    /// One display refresh: fade, hold-to-fire, draw and advance, idle launch.
    pub fn frame(&mut self, now: Duration, surface: &mut dyn Surface) -> FrameStats {
        let (width, height) = (surface.width(), surface.height());

        let due = self.pending_launches.iter().filter(|&&at| at <= now).count();
        self.pending_launches.retain(|&at| at > now);
        for _ in 0..due {
            self.simulation.launch_random(width, height);
        }

        let fade = self.simulation.config().fade_alpha;
        surface.set_composite(Composite::DestinationOut);
        surface.fill_rect(0.0, 0.0, width, height, Rgba::BLACK.with_alpha(fade));
        surface.set_composite(Composite::Lighter);

        if let Some(target) = self.input.hold_fire(now) {
            self.simulation.launch_toward(width, height, target);
        }

        let stats = self.simulation.render_frame(surface);
        self.simulation
            .maybe_auto_launch(width, height, now, &self.input);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::Recorder;
    use crate::canvas::Canvas;
    use crate::input::Phase;

    const FRAME: Duration = Duration::from_millis(16);

    fn show() -> Show {
        let config = Config {
            idle_launch_chance: 0.0,
            ..Config::default()
        };
        Show::new(config, Rng::with_seed(42))
    }

    fn pointer(phase: Phase, x: f32, y: f32) -> InputEvent {
        InputEvent::Pointer { phase, x, y }
    }

    #[test]
    fn frame_fades_then_draws_additively() {
        let mut show = show();
        let mut surface = Recorder::new(1000.0, 600.0);
        show.handle(pointer(Phase::Down, 100.0, 50.0), Duration::ZERO, &surface);
        show.frame(FRAME, &mut surface);

        assert_eq!(surface.fills.len(), 1);
        let fade = &surface.fills[0];
        assert_eq!(fade.rect, (0.0, 0.0, 1000.0, 600.0));
        assert_eq!(fade.composite, Composite::DestinationOut);
        assert!((fade.color.a - 0.3).abs() < 1e-6);

        assert_eq!(surface.strokes.len(), 1);
        assert_eq!(surface.strokes[0].composite, Composite::Lighter);
    }

    #[test]
    fn press_launches_from_bottom_center() {
        let mut show = show();
        let surface = Recorder::new(1000.0, 600.0);
        show.handle(pointer(Phase::Down, 100.0, 50.0), Duration::ZERO, &surface);

        let rockets = show.simulation().rockets();
        assert_eq!(rockets.len(), 1);
        assert_eq!(rockets[0].position(), (500.0, 600.0));
    }

    #[test]
    fn holding_repeats_until_release() {
        let mut show = show();
        let mut surface = Recorder::new(1000.0, 600.0);
        show.handle(pointer(Phase::Down, 500.0, 100.0), Duration::ZERO, &surface);

        let mut now = Duration::ZERO;
        let mut launched = 1;
        while now < Duration::from_millis(1000) {
            now += FRAME;
            let before = show.simulation().rockets().len();
            let stats = show.frame(now, &mut surface);
            launched += show.simulation().rockets().len() + stats.arrived - before;
        }
        assert_eq!(launched, 4);

        show.handle(pointer(Phase::Up, 500.0, 100.0), now, &surface);
        assert!(!show.input().is_interacting());
        for _ in 0..100 {
            now += FRAME;
            let before = show.simulation().rockets().len();
            let stats = show.frame(now, &mut surface);
            assert_eq!(show.simulation().rockets().len() + stats.arrived, before);
        }
    }

    #[test]
    fn burst_launches_are_staggered() {
        let mut show = show();
        let mut surface = Recorder::new(1000.0, 600.0);
        let start = Duration::from_millis(10_000);
        show.handle(InputEvent::Burst, start, &surface);
        assert!(!show.input().is_interacting());
        assert!(show.simulation().rockets().is_empty());

        show.frame(start, &mut surface);
        assert_eq!(show.simulation().rockets().len(), 1);

        show.frame(start + Duration::from_millis(199), &mut surface);
        assert_eq!(show.simulation().rockets().len(), 1);

        show.frame(start + Duration::from_millis(200), &mut surface);
        assert_eq!(show.simulation().rockets().len(), 2);

        show.frame(start + Duration::from_millis(400), &mut surface);
        assert_eq!(show.simulation().rockets().len(), 3);

        show.frame(start + Duration::from_millis(2000), &mut surface);
        assert!(show.simulation().rockets().len() <= 3);
    }

    #[test]
    fn idle_show_launches_on_its_own() {
        let mut show = Show::new(Config::default(), Rng::with_seed(3));
        let mut canvas = Canvas::new(200, 100);

        let mut now = Duration::ZERO;
        let mut launched = false;
        for _ in 0..1000 {
            now += FRAME;
            show.frame(now, &mut canvas);
            if !show.simulation().rockets().is_empty() {
                launched = true;
                assert!(now > Duration::from_millis(2000));
                break;
            }
        }
        assert!(launched);
    }

    #[test]
    fn trails_fade_from_the_canvas() {
        let mut show = show();
        let mut canvas = Canvas::new(200, 100);
        show.handle(pointer(Phase::Down, 100.0, 10.0), Duration::ZERO, &canvas);
        show.handle(pointer(Phase::Up, 100.0, 10.0), Duration::ZERO, &canvas);

        let mut now = Duration::ZERO;
        for _ in 0..10 {
            now += FRAME;
            show.frame(now, &mut canvas);
        }
        let lit = |canvas: &Canvas| {
            (0..100)
                .flat_map(|y| (0..200).map(move |x| (x, y)))
                .filter(|&(x, y)| canvas.pixel(x, y)[3] > 0.01)
                .count()
        };
        assert!(lit(&canvas) > 0);

        // With nothing left alive the destination-out fill clears everything
        for _ in 0..400 {
            now += FRAME;
            show.frame(now, &mut canvas);
        }
        assert!(show.simulation().rockets().is_empty());
        assert!(show.simulation().sparks().is_empty());
        assert_eq!(lit(&canvas), 0);
    }
}
