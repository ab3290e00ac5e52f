pub mod character;
pub mod physics;

pub use character::{Animator, Body, Clip, Health, Navigator, CROSS_FADE, FORWARD};
pub use physics::{KinematicBody, NavAgent, NavBounds};

/// Marker: this entity is the player.
pub struct Player;

/// Marker: this entity is an enemy.
pub struct Enemy;

/// Hit points. Never drops below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthPool {
    pub current: i32,
    pub max: i32,
}

impl HealthPool {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

impl Health for HealthPool {
    fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }
}

/// Damage an enemy has dealt this frame, waiting to be applied to its
/// target's [`HealthPool`] by `enemy_system`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutbox {
    pub pending: i32,
    pub hits: u32,
}

impl DamageOutbox {
    /// Take the accumulated damage, leaving the outbox empty.
    pub fn drain(&mut self) -> i32 {
        self.hits = 0;
        std::mem::take(&mut self.pending)
    }
}

impl Health for DamageOutbox {
    fn take_damage(&mut self, amount: i32) {
        self.pending += amount;
        self.hits += 1;
    }
}

/// Crossfade tracker standing in for an animation player.
#[derive(Clone, Debug)]
pub struct CrossFader {
    pub clip: Option<Clip>,
    pub previous: Option<Clip>,
    /// 0.0 = fully `previous`, 1.0 = fully `clip`.
    pub blend: f32,
    /// Per second. Derived from the requested blend duration.
    pub blend_speed: f32,
    pub speed: f32,
    /// Total crossfades requested, for diagnostics.
    pub requests: u32,
}

impl CrossFader {
    pub fn new() -> Self {
        Self {
            clip: None,
            previous: None,
            blend: 1.0,
            blend_speed: 0.0,
            speed: 0.0,
            requests: 0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.blend < 1.0 {
            self.blend = (self.blend + self.blend_speed * dt).min(1.0);
        }
    }
}

impl Default for CrossFader {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for CrossFader {
    fn cross_fade(&mut self, clip: Clip, blend: f32) {
        self.previous = self.clip.replace(clip);
        self.requests += 1;
        if blend > 0.0 {
            self.blend = 0.0;
            self.blend_speed = 1.0 / blend;
        } else {
            self.blend = 1.0;
        }
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_floors_at_zero() {
        let mut health = HealthPool::new(15);
        health.take_damage(10);
        assert!(health.is_alive());
        health.take_damage(10);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn outbox_accumulates_until_drained() {
        let mut outbox = DamageOutbox::default();
        outbox.take_damage(10);
        outbox.take_damage(5);
        assert_eq!(outbox.hits, 2);
        assert_eq!(outbox.drain(), 15);
        assert_eq!(outbox, DamageOutbox::default());
    }

    #[test]
    fn crossfade_blends_over_requested_duration() {
        let mut fader = CrossFader::new();
        fader.cross_fade(Clip::Walk, 0.1);
        fader.cross_fade(Clip::Run, 0.1);
        assert_eq!(fader.previous, Some(Clip::Walk));
        fader.tick(0.05);
        assert!((fader.blend - 0.5).abs() < 1e-5);
        fader.tick(0.1);
        assert_eq!(fader.blend, 1.0);
    }
}
