use egui::{Context, Event, PointerButton, Pos2, TouchId, TouchPhase};

use super::{MouseKind, RawInputEvent, TouchKind};

/// Handles converting raw egui input into our `RawInputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// The touch that drives drawing; other fingers are ignored until it lifts
    primary_touch: Option<TouchId>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's egui input and generate our events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<RawInputEvent> {
        let events = ctx.input(|input| input.events.clone());
        self.translate(&events)
    }

    /// Translate a batch of egui events, in order
    pub fn translate(&mut self, events: &[Event]) -> Vec<RawInputEvent> {
        // egui also synthesizes pointer events for the primary touch
        let has_touch = events.iter().any(|event| matches!(event, Event::Touch { .. }));

        let mut translated = Vec::new();
        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if !has_touch => {
                    self.last_pointer_pos = Some(*pos);
                    let kind = if *pressed { MouseKind::Down } else { MouseKind::Up };
                    translated.push(RawInputEvent::Mouse { kind, client: *pos });
                }
                Event::PointerMoved(pos) if !has_touch => {
                    self.last_pointer_pos = Some(*pos);
                    translated.push(RawInputEvent::Mouse {
                        kind: MouseKind::Move,
                        client: *pos,
                    });
                }
                Event::PointerGone if !has_touch => {
                    // Pointer left the window
                    if let Some(client) = self.last_pointer_pos.take() {
                        translated.push(RawInputEvent::Mouse {
                            kind: MouseKind::Leave,
                            client,
                        });
                    }
                }
                Event::Touch { id, phase, pos, .. } => {
                    if let Some(event) = self.translate_touch(*id, *phase, *pos) {
                        translated.push(event);
                    }
                }
                _ => {}
            }
        }
        translated
    }

    fn translate_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2) -> Option<RawInputEvent> {
        match phase {
            TouchPhase::Start => {
                if self.primary_touch.is_some() {
                    return None;
                }
                self.primary_touch = Some(id);
                Some(RawInputEvent::Touch {
                    kind: TouchKind::Start,
                    touches: vec![pos],
                    changed_touches: vec![pos],
                })
            }
            TouchPhase::Move => {
                if self.primary_touch != Some(id) {
                    return None;
                }
                Some(RawInputEvent::Touch {
                    kind: TouchKind::Move,
                    touches: vec![pos],
                    changed_touches: vec![pos],
                })
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if self.primary_touch != Some(id) {
                    return None;
                }
                self.primary_touch = None;
                let kind = if phase == TouchPhase::End {
                    TouchKind::End
                } else {
                    TouchKind::Cancel
                };
                Some(RawInputEvent::Touch {
                    kind,
                    touches: Vec::new(),
                    changed_touches: vec![pos],
                })
            }
        }
    }
}
