/// Pointer buttons the orbit scheme cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Host-neutral pointer event. Deltas are in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(PointerButton),
    Released(PointerButton),
    Moved { dx: f32, dy: f32 },
    /// Scroll in lines; positive scrolls away from the user.
    Wheel(f32),
}

/// A camera navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitAction {
    /// Orbit around the focus point by a pointer delta.
    Rotate { dx: f32, dy: f32 },
    /// Slide the focus point by a pointer delta.
    Pan { dx: f32, dy: f32 },
    /// Dolly steps; positive moves toward the focus point.
    Dolly(f32),
}

/// Turns a pointer event stream into orbit actions.
///
/// Primary drag rotates, secondary drag pans, middle drag and the wheel dolly.
#[derive(Debug, Default)]
pub struct PointerTracker {
    active: Option<PointerButton>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button driving the current drag, if any.
    pub fn active(&self) -> Option<PointerButton> {
        self.active
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<OrbitAction> {
        match event {
            PointerEvent::Pressed(button) => {
                if self.active.is_none() {
                    self.active = Some(button);
                }
                None
            }
            PointerEvent::Released(button) => {
                if self.active == Some(button) {
                    self.active = None;
                }
                None
            }
            PointerEvent::Moved { dx, dy } => match self.active? {
                PointerButton::Primary => Some(OrbitAction::Rotate { dx, dy }),
                PointerButton::Secondary => Some(OrbitAction::Pan { dx, dy }),
                PointerButton::Middle if dy != 0.0 => Some(OrbitAction::Dolly(-dy.signum())),
                PointerButton::Middle => None,
            },
            PointerEvent::Wheel(lines) if lines != 0.0 => {
                tracing::trace!("wheel {lines}");
                Some(OrbitAction::Dolly(lines.signum()))
            }
            PointerEvent::Wheel(_) => None,
        }
    }
}
