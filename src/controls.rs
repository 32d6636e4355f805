// Control surface: turns window input into clamped edits of the live parameters.
// Visual: the HUD highlights the selected control; the next frame shows the change.

use tracing::debug;

use crate::params::{LiveParams, ParamId};

/// One user intent, already decoded from keys/mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SelectNext,
    SelectPrev,
    /// Step the selected control by this many increments (negative = down).
    Step(f32),
    ToggleMultiply,
    ToggleDisplacement,
    Reset,
    /// Left button went down; later drags are measured from here.
    DragStart,
    /// Total mouse movement since [`ControlEvent::DragStart`], in logical
    /// canvas pixels, screen axes (y down).
    Drag { dx: f32, dy: f32 },
    /// Scroll wheel notches; positive grows the design.
    Scroll(f32),
}

pub struct Controls {
    selected: usize,
    defaults: LiveParams,
    drag_origin: Option<(f32, f32)>, // offsets when the current drag began
}

impl Controls {
    /// `defaults` is what [`ControlEvent::Reset`] restores.
    pub fn new(defaults: LiveParams) -> Self {
        Self { selected: ParamId::ALL.len() - 1, defaults, drag_origin: None }
    }

    pub fn selected(&self) -> ParamId {
        ParamId::ALL[self.selected]
    }

    /// Apply one event. Returns true if any parameter changed.
    pub fn apply(&mut self, params: &mut LiveParams, event: ControlEvent) -> bool {
        let before = *params;
        match event {
            ControlEvent::SelectNext => {
                self.selected = (self.selected + 1) % ParamId::ALL.len();
            }
            ControlEvent::SelectPrev => {
                self.selected = (self.selected + ParamId::ALL.len() - 1) % ParamId::ALL.len();
            }
            ControlEvent::Step(n) => {
                params.nudge(self.selected(), n);
            }
            ControlEvent::ToggleMultiply => params.multiply_enabled = !params.multiply_enabled,
            ControlEvent::ToggleDisplacement => {
                params.displacement_enabled = !params.displacement_enabled
            }
            ControlEvent::Reset => {
                *params = self.defaults;
                self.drag_origin = None;
            }
            ControlEvent::DragStart => {
                self.drag_origin = Some((params.offset_x_pixels, params.offset_y_pixels));
            }
            ControlEvent::Drag { dx, dy } => {
                let (ox, oy) = *self
                    .drag_origin
                    .get_or_insert((params.offset_x_pixels, params.offset_y_pixels));
                // UV y grows upward, so dragging down lowers the offset.
                params.set(ParamId::OffsetX, ox + dx);
                params.set(ParamId::OffsetY, oy - dy);
            }
            ControlEvent::Scroll(notches) => {
                params.nudge(ParamId::Scale, notches);
            }
        }

        let changed = *params != before;
        if changed {
            debug!(?event, selected = self.selected().spec().name, ?params, "parameters changed");
        }
        changed
    }
}
