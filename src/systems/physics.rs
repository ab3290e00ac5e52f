use hecs::World;

use super::{SimEnemy, SimPlayer};
use crate::components::HealthPool;

/// One fixed step of body integration and navigation. Dead enemies stay put.
pub fn physics_step(world: &mut World, dt: f32) {
    for (_e, player) in world.query_mut::<&mut SimPlayer>() {
        player.body_mut().integrate(dt);
    }
    for (_e, (enemy, health)) in world.query_mut::<(&mut SimEnemy, &HealthPool)>() {
        if health.is_alive() {
            enemy.nav_mut().step(dt);
        }
    }
}
