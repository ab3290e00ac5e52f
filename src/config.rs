//! Tuning surface for the player, the enemies and their detectors.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "player": { "jump_max_height": 3.0 }, "detection": { "sticky": false } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gravity used when none is configured (m/s², negative is down).
pub const DEFAULT_GRAVITY: f32 = -9.81;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub detection: DetectionConfig,
}

impl SimConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.enemy.validate()?;
        self.detection.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    // Movement
    pub move_speed: f32,
    /// Radians per second the facing turns toward the move direction.
    pub rotation_speed: f32,
    /// Smoothing time of the animator speed parameter.
    pub smooth_time: f32,

    // Jump
    pub jump_force: f32,
    pub jump_duration: f32,
    pub jump_cooldown: f32,
    pub jump_max_height: f32,
    pub gravity_multiplier: f32,
    pub gravity: f32,

    // Dash
    pub dash_force: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,

    // Attack
    pub attack_cooldown: f32,
    pub attack_distance: f32,
    pub attack_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            rotation_speed: 15.0,
            smooth_time: 0.2,
            jump_force: 10.0,
            jump_duration: 0.5,
            jump_cooldown: 0.0,
            jump_max_height: 2.0,
            gravity_multiplier: 3.0,
            gravity: DEFAULT_GRAVITY,
            dash_force: 10.0,
            dash_duration: 1.0,
            dash_cooldown: 2.0,
            attack_cooldown: 0.5,
            attack_distance: 1.0,
            attack_damage: 10,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        duration("jump_duration", self.jump_duration)?;
        duration("jump_cooldown", self.jump_cooldown)?;
        duration("dash_duration", self.dash_duration)?;
        duration("dash_cooldown", self.dash_cooldown)?;
        duration("attack_cooldown", self.attack_cooldown)?;
        duration("smooth_time", self.smooth_time)?;
        radius("attack_distance", self.attack_distance)?;
        positive("move_speed", self.move_speed)?;
        positive("rotation_speed", self.rotation_speed)?;
        positive("jump_max_height", self.jump_max_height)?;
        positive("dash_force", self.dash_force)?;
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite { name: "gravity", value: self.gravity });
        }
        Ok(())
    }

    /// Launch velocity that carries the body to `jump_max_height`.
    pub fn launch_velocity(&self) -> f32 {
        (2.0 * self.jump_max_height * self.gravity.abs()).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub wander_radius: f32,
    pub time_between_attacks: f32,
    pub attack_damage: i32,
    /// Walk speed of the navigation agent.
    pub nav_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            wander_radius: 10.0,
            time_between_attacks: 1.0,
            attack_damage: 10,
            nav_speed: 3.5,
        }
    }
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        radius("wander_radius", self.wander_radius)?;
        duration("time_between_attacks", self.time_between_attacks)?;
        positive("nav_speed", self.nav_speed)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Full field of view in degrees.
    pub angle: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub cooldown: f32,
    pub attack_range: f32,
    /// Treat a running cooldown as "still detected".
    pub sticky: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            angle: 60.0,
            outer_radius: 10.0,
            inner_radius: 5.0,
            cooldown: 1.0,
            attack_range: 2.0,
            sticky: true,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.angle > 0.0 && self.angle <= 360.0) {
            return Err(ConfigError::InvalidAngle { name: "angle", value: self.angle });
        }
        radius("outer_radius", self.outer_radius)?;
        radius("inner_radius", self.inner_radius)?;
        radius("attack_range", self.attack_range)?;
        if self.inner_radius > self.outer_radius {
            return Err(ConfigError::InnerRadiusBeyondOuter {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        duration("cooldown", self.cooldown)
    }
}

fn duration(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}

fn radius(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
