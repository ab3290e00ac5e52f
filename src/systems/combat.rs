use hecs::World;

use super::{SimEnemy, SimPlayer};
use crate::agent::Strike;
use crate::components::{Health, HealthPool};

/// Resolve the player's strikes against enemy health. Returns how many
/// enemies were hit.
pub fn combat_system(world: &mut World) -> usize {
    let strikes: Vec<Strike> = world
        .query_mut::<&mut SimPlayer>()
        .into_iter()
        .flat_map(|(_, player)| player.drain_strikes())
        .collect();
    if strikes.is_empty() {
        return 0;
    }

    let mut hits = 0;
    for (entity, (enemy, health)) in world.query_mut::<(&SimEnemy, &mut HealthPool)>() {
        if !health.is_alive() {
            continue;
        }
        let position = enemy.nav().position;
        for strike in &strikes {
            if position.distance(strike.center) <= strike.radius {
                health.take_damage(strike.damage);
                hits += 1;
                tracing::info!(?entity, remaining = health.current, max = health.max, "enemy hit");
                if !health.is_alive() {
                    tracing::info!(?entity, "enemy defeated");
                    break;
                }
            }
        }
    }
    hits
}
