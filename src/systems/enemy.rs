use glam::Vec3;
use hecs::World;

use super::{SimEnemy, SimPlayer};
use crate::components::{Enemy, Health, HealthPool, Player};
use crate::error::FsmError;

/// Position of the first live player, if any.
fn player_target(world: &World) -> Option<Vec3> {
    world
        .query::<(&SimPlayer, &HealthPool)>()
        .with::<&Player>()
        .iter()
        .find(|(_, (_, health))| health.is_alive())
        .map(|(_, (player, _))| player.body().position)
}

/// Frame pass for every live enemy, then forward the damage they dealt to
/// the player. Returns the damage forwarded this frame.
pub fn enemy_system(world: &mut World, dt: f32) -> Result<i32, FsmError> {
    let target = player_target(world);

    let mut damage = 0;
    for (_e, (enemy, health, _marker)) in
        world.query_mut::<(&mut SimEnemy, &HealthPool, &Enemy)>()
    {
        if !health.is_alive() {
            continue;
        }
        enemy.track(target);
        enemy.update(dt)?;
        damage += enemy.target_health_mut().drain();
    }

    if damage > 0 {
        for (_e, (health, _marker)) in world.query_mut::<(&mut HealthPool, &Player)>() {
            let before = health.current;
            health.take_damage(damage);
            tracing::info!(damage, before, after = health.current, "player hit");
        }
    }
    Ok(damage)
}

pub fn enemy_fixed_system(world: &mut World) -> Result<(), FsmError> {
    for (_e, (enemy, health)) in world.query_mut::<(&mut SimEnemy, &HealthPool)>() {
        if health.is_alive() {
            enemy.fixed_update()?;
        }
    }
    Ok(())
}
