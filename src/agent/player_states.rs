//! The player's four states. Each entry crossfades its clip; the physics hook
//! picks the vertical velocity rule and then moves horizontally.

use super::player::PlayerCtx;
use crate::components::{Animator, Body, Clip, CROSS_FADE};
use crate::fsm::State;

pub struct LocomotionState;

impl<B: Body, A: Animator> State<PlayerCtx<B, A>> for LocomotionState {
    fn name(&self) -> &'static str {
        "Locomotion"
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.animator.cross_fade(Clip::Locomotion, CROSS_FADE);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.handle_fall();
        ctx.handle_movement();
    }
}

pub struct JumpState;

impl<B: Body, A: Animator> State<PlayerCtx<B, A>> for JumpState {
    fn name(&self) -> &'static str {
        "Jump"
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.animator.cross_fade(Clip::Jump, CROSS_FADE);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.handle_jump();
        ctx.handle_movement();
    }
}

pub struct DashState;

impl<B: Body, A: Animator> State<PlayerCtx<B, A>> for DashState {
    fn name(&self) -> &'static str {
        "Dash"
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.animator.cross_fade(Clip::Dash, CROSS_FADE);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.handle_fall();
        ctx.handle_movement();
    }
}

/// Strikes once on entry; leaves when the attack cooldown runs out.
pub struct AttackState;

impl<B: Body, A: Animator> State<PlayerCtx<B, A>> for AttackState {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.animator.cross_fade(Clip::Attack, CROSS_FADE);
        ctx.attack();
    }

    fn fixed_update(&mut self, ctx: &mut PlayerCtx<B, A>) {
        ctx.handle_fall();
        ctx.handle_movement();
    }
}
