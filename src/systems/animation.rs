use hecs::World;

use super::{SimEnemy, SimPlayer};

/// Advance every crossfade in flight.
pub fn animation_system(world: &mut World, dt: f32) {
    for (_e, player) in world.query_mut::<&mut SimPlayer>() {
        player.animator_mut().tick(dt);
    }
    for (_e, enemy) in world.query_mut::<&mut SimEnemy>() {
        enemy.animator_mut().tick(dt);
    }
}
