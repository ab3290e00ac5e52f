//! Player and enemy controllers: a context struct, a state machine over it,
//! and the per-frame glue between input, timers and collaborators.

mod enemy;
mod enemy_states;
mod player;
mod player_states;

pub use enemy::{EnemyController, EnemyCtx, EnemyStates};
pub use enemy_states::{AttackState as EnemyAttackState, ChaseState, WanderState};
pub use player::{PlayerController, PlayerCtx, PlayerStates, PlayerTimers, Strike, LAUNCH_POINT};
pub use player_states::{AttackState, DashState, JumpState, LocomotionState};
