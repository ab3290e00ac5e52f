//! Per-frame and per-physics-step passes over the hecs [`World`](hecs::World).

mod animation;
mod combat;
mod enemy;
mod physics;
mod player;

pub use animation::animation_system;
pub use combat::combat_system;
pub use enemy::{enemy_fixed_system, enemy_system};
pub use physics::physics_step;
pub use player::{player_fixed_system, player_system};

use crate::agent::{EnemyController, PlayerController};
use crate::components::{CrossFader, DamageOutbox, KinematicBody, NavAgent};

/// Player controller as spawned into the simulation world.
pub type SimPlayer = PlayerController<KinematicBody, CrossFader>;

/// Enemy controller as spawned into the simulation world. Damage lands in
/// its [`DamageOutbox`] and is forwarded to the player by [`enemy_system`].
pub type SimEnemy = EnemyController<NavAgent, CrossFader, DamageOutbox>;
