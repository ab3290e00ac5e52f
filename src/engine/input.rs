use glam::Vec2;

/// Discrete player actions delivered by the input device layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    DashPressed,
    DashReleased,
    AttackPressed,
}

/// Per-frame input snapshot: a continuous move direction plus the discrete
/// events that arrived since the last frame.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    /// Stick / WASD direction. `x` is strafe, `y` is forward.
    pub direction: Vec2,
    /// Yaw of the view the direction is relative to (radians).
    pub view_yaw: f32,
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drop last frame's events, keep the held direction.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }
}
