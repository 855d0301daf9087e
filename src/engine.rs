use egui::{Color32, Pos2};

use crate::config::{ArrowPreviewMode, OverlayConfig};
use crate::input::{PointerPhase, PointerSample};
use crate::surface::{DrawOp, Layer, Surface};
use crate::tools::{CompositeMode, StrokeStyle, Tool, ToolSettings};

/// One pointer-down → pointer-up interaction.
///
/// Tool, color and style are captured at pointer-down, so toolbar changes
/// made mid-gesture only apply to the next gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub tool: Tool,
    pub color: Color32,
    /// Brush and eraser style; `None` for arrows
    pub style: Option<StrokeStyle>,
    pub start_point: Pos2,
    pub last_point: Pos2,
}

/// Input to the drawing state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    Down {
        sample: PointerSample,
        tool: Tool,
        color: Color32,
    },
    Move(PointerSample),
    Up(PointerSample),
}

/// Everything the drawing state machine needs between events
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineState {
    pub settings: ToolSettings,
    pub preview_mode: ArrowPreviewMode,
    /// The active gesture; at most one exists at a time
    pub gesture: Option<Gesture>,
}

impl EngineState {
    pub fn new(settings: ToolSettings, preview_mode: ArrowPreviewMode) -> Self {
        Self {
            settings,
            preview_mode,
            gesture: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    fn arrow(&self, gesture: &Gesture, to: Pos2, alpha: f32, layer: Layer) -> DrawOp {
        DrawOp::Arrow {
            from: gesture.start_point,
            to,
            color: gesture.color,
            alpha,
            width: self.settings.arrow_width,
            head_length: self.settings.arrow_head_length,
            layer,
        }
    }
}

/// Advance the drawing state machine by one event.
///
/// Returns the next state and the pixel operations to apply, in order.
/// A pointer-down while a gesture is active is ignored; move and up
/// without an active gesture are no-ops.
pub fn transition(state: &EngineState, event: EngineEvent) -> (EngineState, Vec<DrawOp>) {
    let mut next = state.clone();
    let mut ops = Vec::new();

    match event {
        EngineEvent::Down { sample, tool, color } => {
            if next.gesture.is_some() {
                log::debug!("Ignoring pointer down while a gesture is active");
                return (next, ops);
            }

            let style = next.settings.style_for(tool, color);
            if let Some(style) = style {
                if style.composite != CompositeMode::SourceOver {
                    ops.push(DrawOp::SetComposite(style.composite));
                }
            }

            log::debug!("{} gesture started at {:?}", tool.name(), sample.position);
            next.gesture = Some(Gesture {
                tool,
                color,
                style,
                start_point: sample.position,
                last_point: sample.position,
            });
        }
        EngineEvent::Move(sample) => {
            let Some(gesture) = next.gesture.as_ref() else {
                return (next, ops);
            };

            match (gesture.tool, gesture.style) {
                (Tool::Arrow, _) => {
                    let alpha = next.settings.preview_alpha;
                    match next.preview_mode {
                        ArrowPreviewMode::Layered => {
                            ops.push(DrawOp::Clear(Layer::Preview));
                            ops.push(next.arrow(gesture, sample.position, alpha, Layer::Preview));
                        }
                        ArrowPreviewMode::Destructive => {
                            ops.push(DrawOp::Clear(Layer::Committed));
                            ops.push(next.arrow(gesture, sample.position, alpha, Layer::Committed));
                        }
                    }
                }
                (_, Some(style)) => {
                    ops.push(DrawOp::Segment {
                        from: gesture.last_point,
                        to: sample.position,
                        style,
                    });
                }
                (_, None) => {}
            }

            if let Some(gesture) = next.gesture.as_mut() {
                gesture.last_point = sample.position;
            }
        }
        EngineEvent::Up(sample) => {
            let Some(gesture) = next.gesture.take() else {
                return (next, ops);
            };

            match gesture.tool {
                Tool::Arrow => {
                    if next.preview_mode == ArrowPreviewMode::Layered {
                        ops.push(DrawOp::Clear(Layer::Preview));
                    }
                    ops.push(next.arrow(&gesture, sample.position, 1.0, Layer::Committed));
                }
                Tool::Brush => {}
                Tool::Eraser => ops.push(DrawOp::SetComposite(CompositeMode::SourceOver)),
            }
            log::debug!("{} gesture ended at {:?}", gesture.tool.name(), sample.position);
        }
    }

    (next, ops)
}

/// Owns the drawing state and the surface it mutates
#[derive(Debug, Clone)]
pub struct DrawingEngine {
    state: EngineState,
    surface: Surface,
    /// Bumped whenever surface pixels may have changed
    revision: u64,
}

impl DrawingEngine {
    pub fn new(width: u32, height: u32, settings: ToolSettings, preview_mode: ArrowPreviewMode) -> Self {
        Self {
            state: EngineState::new(settings, preview_mode),
            surface: Surface::new(width, height),
            revision: 0,
        }
    }

    pub fn from_config(config: &OverlayConfig, width: u32, height: u32) -> Self {
        Self::new(width, height, ToolSettings::from(config), config.arrow_preview)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.state.gesture.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn on_pointer_down(&mut self, sample: PointerSample, tool: Tool, color: Color32) {
        self.dispatch(EngineEvent::Down { sample, tool, color });
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        self.dispatch(EngineEvent::Move(sample));
    }

    pub fn on_pointer_up(&mut self, sample: PointerSample) {
        self.dispatch(EngineEvent::Up(sample));
    }

    /// Route a normalized sample by its phase.
    /// `tool` and `color` only matter for `Down`.
    pub fn handle_sample(&mut self, sample: PointerSample, tool: Tool, color: Color32) {
        match sample.phase {
            PointerPhase::Down => self.on_pointer_down(sample, tool, color),
            PointerPhase::Move => self.on_pointer_move(sample),
            PointerPhase::Up => self.on_pointer_up(sample),
        }
    }

    /// Abandon the active gesture without drawing its final state.
    ///
    /// Used when the overlay stops accepting input and the pointer-up will
    /// never arrive. Drops the arrow preview and restores normal compositing.
    pub fn cancel_gesture(&mut self) {
        let Some(gesture) = self.state.gesture.take() else {
            return;
        };
        log::debug!("{} gesture cancelled", gesture.tool.name());
        self.surface.apply(&DrawOp::Clear(Layer::Preview));
        self.surface.apply(&DrawOp::SetComposite(CompositeMode::SourceOver));
        self.revision += 1;
    }

    /// Host-triggered full erase
    pub fn clear(&mut self) {
        self.surface.clear();
        self.revision += 1;
    }

    /// Match the surface to a new on-screen size; content is dropped
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface.width() != width || self.surface.height() != height {
            self.surface.resize(width, height);
            self.revision += 1;
        }
    }

    fn dispatch(&mut self, event: EngineEvent) {
        let (next, ops) = transition(&self.state, event);
        self.state = next;
        if ops.is_empty() {
            return;
        }
        for op in &ops {
            self.surface.apply(op);
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn sample(x: f32, y: f32, phase: PointerPhase) -> PointerSample {
        PointerSample::new(x, y, phase)
    }

    fn down(x: f32, y: f32, tool: Tool) -> EngineEvent {
        EngineEvent::Down {
            sample: sample(x, y, PointerPhase::Down),
            tool,
            color: Color32::from_rgb(255, 0, 0),
        }
    }

    #[test]
    fn test_move_without_gesture_is_noop() {
        let state = EngineState::default();
        let (next, ops) = transition(&state, EngineEvent::Move(sample(1.0, 1.0, PointerPhase::Move)));
        assert!(ops.is_empty());
        assert_eq!(next, state);
    }

    #[test]
    fn test_up_without_gesture_is_noop() {
        let state = EngineState::default();
        let (next, ops) = transition(&state, EngineEvent::Up(sample(1.0, 1.0, PointerPhase::Up)));
        assert!(ops.is_empty());
        assert!(!next.is_drawing());
    }

    #[test]
    fn test_second_down_is_ignored() {
        let (state, _) = transition(&EngineState::default(), down(1.0, 1.0, Tool::Brush));
        let (next, ops) = transition(&state, down(9.0, 9.0, Tool::Eraser));
        assert!(ops.is_empty());
        let gesture = next.gesture.unwrap();
        assert_eq!(gesture.tool, Tool::Brush);
        assert_eq!(gesture.start_point, pos2(1.0, 1.0));
    }

    #[test]
    fn test_eraser_switches_composite_mode() {
        let (state, ops) = transition(&EngineState::default(), down(0.0, 0.0, Tool::Eraser));
        assert_eq!(ops, vec![DrawOp::SetComposite(CompositeMode::DestinationOut)]);

        let (_, ops) = transition(&state, EngineEvent::Up(sample(0.0, 0.0, PointerPhase::Up)));
        assert_eq!(ops, vec![DrawOp::SetComposite(CompositeMode::SourceOver)]);
    }

    #[test]
    fn test_arrow_down_draws_nothing() {
        let (state, ops) = transition(&EngineState::default(), down(3.0, 4.0, Tool::Arrow));
        assert!(ops.is_empty());
        assert_eq!(state.gesture.unwrap().style, None);
    }

    #[test]
    fn test_layered_arrow_preview_then_commit() {
        let (state, _) = transition(&EngineState::default(), down(0.0, 0.0, Tool::Arrow));
        let (state, ops) = transition(&state, EngineEvent::Move(sample(10.0, 0.0, PointerPhase::Move)));
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], DrawOp::Clear(Layer::Preview));
        assert!(matches!(ops[1], DrawOp::Arrow { layer: Layer::Preview, alpha, .. } if alpha == 0.7));

        let (state, ops) = transition(&state, EngineEvent::Up(sample(12.0, 0.0, PointerPhase::Up)));
        assert_eq!(ops[0], DrawOp::Clear(Layer::Preview));
        assert!(matches!(
            ops[1],
            DrawOp::Arrow { layer: Layer::Committed, alpha, to, .. } if alpha == 1.0 && to == pos2(12.0, 0.0)
        ));
        assert!(!state.is_drawing());
    }

    #[test]
    fn test_destructive_arrow_preview_clears_committed() {
        let state = EngineState::new(ToolSettings::default(), ArrowPreviewMode::Destructive);
        let (state, _) = transition(&state, down(0.0, 0.0, Tool::Arrow));
        let (state, ops) = transition(&state, EngineEvent::Move(sample(5.0, 5.0, PointerPhase::Move)));
        assert_eq!(ops[0], DrawOp::Clear(Layer::Committed));
        assert!(matches!(ops[1], DrawOp::Arrow { layer: Layer::Committed, .. }));

        let (_, ops) = transition(&state, EngineEvent::Up(sample(5.0, 5.0, PointerPhase::Up)));
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_engine_clear_blanks_surface() {
        let mut engine = DrawingEngine::new(20, 20, ToolSettings::default(), ArrowPreviewMode::Layered);
        engine.on_pointer_down(sample(2.0, 2.0, PointerPhase::Down), Tool::Brush, Color32::BLACK);
        engine.on_pointer_move(sample(18.0, 18.0, PointerPhase::Move));
        engine.on_pointer_up(sample(18.0, 18.0, PointerPhase::Up));
        assert!(!engine.surface().is_blank());

        engine.clear();
        assert!(engine.surface().is_blank());
    }

    #[test]
    fn test_cancel_gesture_restores_compositing_and_drops_preview() {
        let mut engine = DrawingEngine::new(20, 20, ToolSettings::default(), ArrowPreviewMode::Layered);

        // Cancel an eraser stroke mid-gesture
        engine.on_pointer_down(sample(2.0, 2.0, PointerPhase::Down), Tool::Eraser, Color32::BLACK);
        assert_eq!(engine.surface().composite_mode(), CompositeMode::DestinationOut);
        engine.cancel_gesture();
        assert!(!engine.is_drawing());
        assert_eq!(engine.surface().composite_mode(), CompositeMode::SourceOver);

        // Cancel an arrow while its preview is showing
        engine.on_pointer_down(sample(2.0, 10.0, PointerPhase::Down), Tool::Arrow, Color32::BLACK);
        engine.on_pointer_move(sample(18.0, 10.0, PointerPhase::Move));
        assert!(!engine.surface().is_blank());
        engine.cancel_gesture();
        assert!(engine.surface().is_blank());

        // Nothing to cancel
        let revision = engine.revision();
        engine.cancel_gesture();
        assert_eq!(engine.revision(), revision);
    }
}
