use std::f32::consts::TAU;

use glam::Vec3;
use hecs::{Entity, World};

use crate::components::NavBounds;
use crate::config::SimConfig;
use crate::error::AgentError;
use crate::scene::prefabs::{spawn_enemy, spawn_player};

/// Half side of the square arena the enemies navigate.
pub const ARENA_HALF_EXTENT: f32 = 25.0;

pub struct TestScene {
    pub player: Entity,
    pub enemies: Vec<Entity>,
}

/// Player at the origin, `enemy_count` enemies evenly spaced on a ring just
/// outside detection range so they start out wandering.
pub fn load_test_scene(
    world: &mut World,
    config: &SimConfig,
    enemy_count: usize,
    seed: u64,
) -> Result<TestScene, AgentError> {
    let bounds = NavBounds::square(ARENA_HALF_EXTENT);
    let player = spawn_player(world, config, Vec3::ZERO)?;

    let ring = (config.detection.outer_radius * 1.5).min(ARENA_HALF_EXTENT);
    let mut enemies = Vec::with_capacity(enemy_count);
    for i in 0..enemy_count {
        let angle = TAU * i as f32 / enemy_count as f32;
        let pos = Vec3::new(angle.cos() * ring, 0.0, angle.sin() * ring);
        enemies.push(spawn_enemy(world, config, pos, bounds, seed.wrapping_add(i as u64))?);
    }

    tracing::info!(enemies = enemy_count, ring, "test scene loaded");
    Ok(TestScene { player, enemies })
}
