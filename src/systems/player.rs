use hecs::World;

use super::SimPlayer;
use crate::components::{HealthPool, Player};
use crate::engine::input::InputState;
use crate::error::FsmError;

/// Frame pass for every live player. Input is applied before the controller
/// ticks its timers so a press this frame can transition this frame.
pub fn player_system(world: &mut World, input: &InputState, dt: f32) -> Result<(), FsmError> {
    for (_e, (player, health, _marker)) in
        world.query_mut::<(&mut SimPlayer, &HealthPool, &Player)>()
    {
        if !health.is_alive() {
            continue;
        }
        player.apply_input(input);
        player.update(dt)?;
    }
    Ok(())
}

/// Physics pass: the current state writes the body's velocity.
pub fn player_fixed_system(world: &mut World, dt: f32) -> Result<(), FsmError> {
    for (_e, (player, health)) in world.query_mut::<(&mut SimPlayer, &HealthPool)>() {
        if !health.is_alive() {
            continue;
        }
        player.fixed_update(dt)?;
    }
    Ok(())
}
