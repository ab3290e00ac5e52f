//! Spatial queries that decide whether an enemy can see its target.

mod sensor;

pub use sensor::PlayerDetector;

use glam::Vec3;

use crate::config::DetectionConfig;
use crate::engine::timer::Timer;
use crate::error::ConfigError;

/// Where the detector stands and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: crate::components::FORWARD,
        }
    }
}

/// Pluggable visibility test. On a positive result the strategy starts
/// `cooldown`, which rate-limits further checks by the owning sensor.
pub trait DetectionStrategy: Send + Sync {
    fn execute(&self, target: Vec3, observer: &Observer, cooldown: &mut Timer) -> bool;
}

/// Cone of vision with an omnidirectional close range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeDetection {
    /// Full field of view, degrees.
    angle: f32,
    outer_radius: f32,
    inner_radius: f32,
}

impl ConeDetection {
    pub fn new(angle: f32, outer_radius: f32, inner_radius: f32) -> Result<Self, ConfigError> {
        DetectionConfig {
            angle,
            outer_radius,
            inner_radius,
            ..DetectionConfig::default()
        }
        .validate()?;
        Ok(Self {
            angle,
            outer_radius,
            inner_radius,
        })
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self, ConfigError> {
        Self::new(config.angle, config.outer_radius, config.inner_radius)
    }

    /// Pure geometry, without touching any timer.
    pub fn sees(&self, target: Vec3, observer: &Observer) -> bool {
        let to_target = target - observer.position;
        let distance_sq = to_target.length_squared();

        if distance_sq < self.inner_radius * self.inner_radius {
            return true;
        }
        if distance_sq >= self.outer_radius * self.outer_radius {
            return false;
        }
        // NaN (zero-length forward) compares false.
        let angle = to_target.angle_between(observer.forward).to_degrees();
        angle <= self.angle / 2.0
    }
}

impl DetectionStrategy for ConeDetection {
    fn execute(&self, target: Vec3, observer: &Observer, cooldown: &mut Timer) -> bool {
        let seen = self.sees(target, observer);
        if seen {
            cooldown.start();
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone() -> ConeDetection {
        ConeDetection::new(60.0, 10.0, 5.0).unwrap()
    }

    fn at_angle(distance: f32, degrees: f32) -> Vec3 {
        let rad = degrees.to_radians();
        Vec3::new(rad.sin(), 0.0, rad.cos()) * distance
    }

    #[test]
    fn inside_inner_radius_ignores_angle() {
        let observer = Observer::default();
        assert!(cone().sees(at_angle(4.0, 180.0), &observer));
        assert!(cone().sees(at_angle(4.9, 90.0), &observer));
    }

    #[test]
    fn between_radii_requires_half_fov() {
        let observer = Observer::default();
        assert!(cone().sees(at_angle(8.0, 0.0), &observer));
        assert!(cone().sees(at_angle(8.0, 29.0), &observer));
        assert!(!cone().sees(at_angle(8.0, 31.0), &observer));
        assert!(!cone().sees(at_angle(8.0, 120.0), &observer));
    }

    #[test]
    fn beyond_outer_radius_is_never_seen() {
        let observer = Observer::default();
        assert!(!cone().sees(at_angle(10.5, 0.0), &observer));
    }

    #[test]
    fn observer_transform_is_respected() {
        let observer = Observer {
            position: Vec3::new(100.0, 0.0, 0.0),
            forward: Vec3::X,
        };
        assert!(cone().sees(Vec3::new(108.0, 0.0, 0.0), &observer));
        assert!(!cone().sees(Vec3::new(92.0, 0.0, 0.0), &observer));
    }

    #[test]
    fn positive_result_starts_cooldown() {
        let mut cooldown = Timer::new("detection", 1.0).unwrap();
        let observer = Observer::default();
        assert!(!cone().execute(at_angle(20.0, 0.0), &observer, &mut cooldown));
        assert!(!cooldown.is_running());
        assert!(cone().execute(at_angle(8.0, 0.0), &observer, &mut cooldown));
        assert!(cooldown.is_running());
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(ConeDetection::new(60.0, 0.0, 0.0).is_err());
        assert!(ConeDetection::new(60.0, 5.0, 10.0).is_err());
        assert!(ConeDetection::new(0.0, 10.0, 5.0).is_err());
    }
}
