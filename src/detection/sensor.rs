use glam::Vec3;

use super::{ConeDetection, DetectionStrategy, Observer};
use crate::config::DetectionConfig;
use crate::engine::timer::Timer;
use crate::error::ConfigError;

/// Enemy-side sensor answering "can I see / reach the player?".
///
/// A positive sighting starts the cooldown timer; while it runs the detector
/// keeps answering `true` without re-running the strategy (sticky detection).
/// Set [`DetectionConfig::sticky`] to `false` to re-check every call.
pub struct PlayerDetector {
    strategy: Box<dyn DetectionStrategy>,
    cooldown: Timer,
    observer: Observer,
    target: Option<Vec3>,
    attack_range: f32,
    sticky: bool,
}

impl PlayerDetector {
    /// Cone detector built from `config`.
    pub fn new(config: &DetectionConfig) -> Result<Self, ConfigError> {
        let cone = ConeDetection::from_config(config)?;
        Self::with_strategy(config, cone)
    }

    pub fn with_strategy(
        config: &DetectionConfig,
        strategy: impl DetectionStrategy + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            strategy: Box::new(strategy),
            cooldown: Timer::new("detection_cooldown", config.cooldown)?,
            observer: Observer::default(),
            target: None,
            attack_range: config.attack_range,
            sticky: config.sticky,
        })
    }

    pub fn set_strategy(&mut self, strategy: impl DetectionStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }

    pub fn set_observer(&mut self, position: Vec3, forward: Vec3) {
        self.observer = Observer { position, forward };
    }

    /// Position of the tracked target this frame, or `None` when there is
    /// nothing to track (dead, despawned, not spawned yet).
    pub fn track(&mut self, target: Option<Vec3>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Always `false` without a target, regardless of the cooldown.
    pub fn can_detect_player(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if self.sticky && self.cooldown.is_running() {
            return true;
        }
        self.strategy.execute(target, &self.observer, &mut self.cooldown)
    }

    pub fn can_attack_player(&self) -> bool {
        self.target
            .is_some_and(|target| target.distance(self.observer.position) <= self.attack_range)
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(bool);

    impl DetectionStrategy for Always {
        fn execute(&self, _target: Vec3, _observer: &Observer, cooldown: &mut Timer) -> bool {
            if self.0 {
                cooldown.start();
            }
            self.0
        }
    }

    fn detector() -> PlayerDetector {
        PlayerDetector::new(&DetectionConfig::default()).unwrap()
    }

    #[test]
    fn no_target_is_never_detected() {
        let mut detector = PlayerDetector::with_strategy(&DetectionConfig::default(), Always(true)).unwrap();
        assert!(!detector.can_detect_player());
        assert!(!detector.can_attack_player());
    }

    #[test]
    fn detection_is_sticky_during_cooldown() {
        let mut detector = detector();
        detector.track(Some(Vec3::new(0.0, 0.0, 3.0)));
        assert!(detector.can_detect_player());

        // Target leaves range but the cooldown still runs.
        detector.track(Some(Vec3::new(0.0, 0.0, 50.0)));
        detector.tick(0.5);
        assert!(detector.can_detect_player());

        detector.tick(0.5);
        assert!(!detector.is_cooling_down());
        assert!(!detector.can_detect_player());
    }

    #[test]
    fn non_sticky_rechecks_geometry() {
        let config = DetectionConfig { sticky: false, ..DetectionConfig::default() };
        let mut detector = PlayerDetector::new(&config).unwrap();
        detector.track(Some(Vec3::new(0.0, 0.0, 3.0)));
        assert!(detector.can_detect_player());
        detector.track(Some(Vec3::new(0.0, 0.0, 50.0)));
        assert!(!detector.can_detect_player());
    }

    #[test]
    fn attack_range_uses_observer_position() {
        let mut detector = detector();
        detector.set_observer(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        detector.track(Some(Vec3::new(11.5, 0.0, 0.0)));
        assert!(detector.can_attack_player());
        detector.track(Some(Vec3::new(13.0, 0.0, 0.0)));
        assert!(!detector.can_attack_player());
    }

    #[test]
    fn strategy_can_be_swapped() {
        let mut detector = detector();
        detector.track(Some(Vec3::new(0.0, 0.0, 3.0)));
        detector.set_strategy(Always(false));
        assert!(!detector.can_detect_player());
    }
}
