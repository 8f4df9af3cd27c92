use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use log::trace;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Down,
    Move,
    Up,
}

/// Host input, already mapped into canvas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse or touch. Touch start/move/end arrive as Down/Move/Up.
    Pointer { phase: Phase, x: f32, y: f32 },
    Burst,
    /// The surface size must be queried again.
    Resize,
}

/// A clickable label drawn over the canvas, in terminal cells.
#[derive(Clone, Copy, Debug)]
pub struct Button {
    pub column: u16,
    pub row: u16,
    pub label: &'static str,
}

impl Button {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let width = self.label.chars().count() as u16;
        row == self.row && column >= self.column && column < self.column + width
    }
}

/// Controls that sit on top of the canvas and are not part of it.
#[derive(Clone, Copy, Debug)]
pub struct Hud {
    pub burst: Button,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            burst: Button {
                column: 0,
                row: 0,
                label: " ✺ burst ",
            },
        }
    }
}

impl InputEvent {
    pub fn from_terminal(event: &Event, hud: &Hud) -> Option<Self> {
        match event {
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let on_button = hud.burst.contains(*column, *row);
                // Account for half-block rendering
                let (x, y) = (*column as f32, *row as f32 * 2.0);

                let phase = match kind {
                    MouseEventKind::Down(MouseButton::Left) if on_button => {
                        return Some(InputEvent::Burst);
                    }
                    MouseEventKind::Down(MouseButton::Left) => Phase::Down,
                    MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => Phase::Move,
                    MouseEventKind::Up(MouseButton::Left) => Phase::Up,
                    _ => return None,
                };
                Some(InputEvent::Pointer { phase, x, y })
            }
            Event::Key(key_event) => match key_event.code {
                KeyCode::Char('b') | KeyCode::Char(' ') => Some(InputEvent::Burst),
                _ => None,
            },
            Event::Resize(..) => Some(InputEvent::Resize),
            _ => None,
        }
    }
}

/// What the render loop should do in response to an input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    None,
    Launch { x: f32, y: f32 },
    Burst,
}

/// Press/drag/release state machine plus hold-to-fire timing.
#[derive(Clone, Debug)]
pub struct InputController {
    interacting: bool,
    last_interaction: Duration,
    last_repeat: Duration,
    pointer: (f32, f32),
    hold_interval: Duration,
}

impl InputController {
    pub fn new(hold_interval: Duration) -> Self {
        Self {
            interacting: false,
            last_interaction: Duration::ZERO,
            last_repeat: Duration::ZERO,
            pointer: (0.0, 0.0),
            hold_interval,
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Duration) -> Command {
        match event {
            InputEvent::Pointer { phase, x, y } => self.pointer_event(phase, x, y, now),
            InputEvent::Burst => Command::Burst,
            InputEvent::Resize => Command::None,
        }
    }

    fn pointer_event(&mut self, phase: Phase, x: f32, y: f32, now: Duration) -> Command {
        match (phase, self.interacting) {
            (Phase::Down, false) => {
                trace!("interaction start at ({x}, {y})");
                self.interacting = true;
                self.pointer = (x, y);
                self.last_interaction = now;
                self.last_repeat = now;
                Command::Launch { x, y }
            }
            (Phase::Move, true) => {
                self.pointer = (x, y);
                self.last_interaction = now;
                Command::None
            }
            (Phase::Up, true) => {
                trace!("interaction end at ({x}, {y})");
                self.interacting = false;
                self.last_interaction = now;
                Command::None
            }
            // A second press while held, or stray motion while idle
            _ => Command::None,
        }
    }

    /// Target of the next hold-to-fire rocket, once per hold interval.
    pub fn hold_fire(&mut self, now: Duration) -> Option<(f32, f32)> {
        if !self.interacting || now.saturating_sub(self.last_repeat) < self.hold_interval {
            return None;
        }
        self.last_repeat = now;
        Some(self.pointer)
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn idle_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.last_interaction)
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }
}
