//! Collaborator contracts the behavior core talks to.
//!
//! The core never owns physics, navigation, animation playback or health
//! bookkeeping; it drives them through these traits. Implementations live in
//! [`super::physics`] for the headless simulation, and tests supply their own.

use glam::{Quat, Vec3};

/// Local forward axis of every agent.
pub const FORWARD: Vec3 = Vec3::Z;

/// Cross-fade length used by every state's entry animation.
pub const CROSS_FADE: f32 = 0.1;

/// Animation clip identifiers. Opaque to the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    Locomotion,
    Jump,
    Dash,
    Attack,
    Walk,
    Run,
}

/// Fire-and-forget animation player.
pub trait Animator {
    fn cross_fade(&mut self, clip: Clip, blend: f32);

    /// Locomotion blend parameter.
    fn set_speed(&mut self, _speed: f32) {}
}

/// Rigid body the player drives by velocity.
pub trait Body {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn is_grounded(&self) -> bool;

    fn forward(&self) -> Vec3 {
        self.rotation() * FORWARD
    }
}

/// Navigation agent an enemy steers by destination.
pub trait Navigator {
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    /// Idempotent: re-issuing the current destination changes nothing.
    fn set_destination(&mut self, destination: Vec3);
    /// No path pending and the agent has arrived (or has no path).
    fn path_complete(&self) -> bool;
    /// Nearest navigable point within `max_distance` of `point`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;
}

pub trait Health {
    fn take_damage(&mut self, amount: i32);
}
