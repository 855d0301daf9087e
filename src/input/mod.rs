use egui::{Pos2, Rect};

mod handler;
pub use handler::InputHandler;

/// Phase of a normalized pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer position in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Pos2,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self {
            position: Pos2::new(x, y),
            phase,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

/// Mouse-family event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
    /// Pointer left the surface
    Leave,
}

/// Touch-family event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw input event in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Mouse {
        kind: MouseKind,
        client: Pos2,
    },
    Touch {
        kind: TouchKind,
        /// Touch points still on the surface
        touches: Vec<Pos2>,
        /// Touch points that changed in this event
        changed_touches: Vec<Pos2>,
    },
}

/// Converts mouse and touch events into `PointerSample`s relative to the surface.
///
/// Touch events take the same path as mouse events. The last normalized
/// position is remembered so a touch-end without any touch point still
/// closes the gesture where it was.
#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    last_position: Option<Pos2>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one event against the surface's screen rectangle.
    ///
    /// Returns `None` for events that carry no usable point.
    pub fn normalize(&mut self, event: &RawInputEvent, surface_rect: Rect) -> Option<PointerSample> {
        let (client, phase) = match event {
            RawInputEvent::Mouse { kind, client } => {
                let phase = match kind {
                    MouseKind::Down => PointerPhase::Down,
                    MouseKind::Move => PointerPhase::Move,
                    MouseKind::Up | MouseKind::Leave => PointerPhase::Up,
                };
                (*client, phase)
            }
            RawInputEvent::Touch {
                kind,
                touches,
                changed_touches,
            } => match kind {
                TouchKind::Start => (*touches.first()?, PointerPhase::Down),
                TouchKind::Move => (*touches.first()?, PointerPhase::Move),
                TouchKind::End | TouchKind::Cancel => {
                    let client = match touches.first().or_else(|| changed_touches.first()) {
                        Some(point) => *point,
                        None => self.last_position? + surface_rect.min.to_vec2(),
                    };
                    (client, PointerPhase::Up)
                }
            },
        };

        let position = Pos2::new(client.x - surface_rect.min.x, client.y - surface_rect.min.y);
        self.last_position = Some(position);
        Some(PointerSample { position, phase })
    }

    /// Forget the last known position, e.g. when the surface is hidden
    pub fn reset(&mut self) {
        self.last_position = None;
    }
}
