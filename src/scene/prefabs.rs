use glam::Vec3;
use hecs::{Entity, World};

use crate::agent::{EnemyController, PlayerController};
use crate::components::{CrossFader, DamageOutbox, Enemy, HealthPool, KinematicBody, NavAgent, NavBounds, Player};
use crate::config::SimConfig;
use crate::detection::PlayerDetector;
use crate::error::AgentError;

pub const PLAYER_HEALTH: i32 = 100;
pub const ENEMY_HEALTH: i32 = 30;

/// Spawn the player: controller (owning its body and animator), health and
/// the [`Player`] marker.
pub fn spawn_player(world: &mut World, config: &SimConfig, pos: Vec3) -> Result<Entity, AgentError> {
    let controller = PlayerController::new(
        config.player.clone(),
        KinematicBody::new(pos),
        CrossFader::new(),
    )?;
    Ok(world.spawn((controller, HealthPool::new(PLAYER_HEALTH), Player)))
}

/// Spawn an enemy on the navmesh. Each enemy gets its own detector and a
/// wander seed derived from `seed`.
pub fn spawn_enemy(
    world: &mut World,
    config: &SimConfig,
    pos: Vec3,
    bounds: NavBounds,
    seed: u64,
) -> Result<Entity, AgentError> {
    let detector = PlayerDetector::new(&config.detection)?;
    let nav = NavAgent::new(pos, config.enemy.nav_speed, bounds);
    let controller = EnemyController::new(
        config.enemy.clone(),
        detector,
        nav,
        CrossFader::new(),
        DamageOutbox::default(),
        seed,
    )?;
    Ok(world.spawn((controller, HealthPool::new(ENEMY_HEALTH), Enemy)))
}
