use glam::Vec3;

use super::enemy::EnemyCtx;
use crate::components::{Animator, Clip, Health, Navigator, CROSS_FADE};
use crate::fsm::State;

/// Roams random points around a fixed anchor, picking a new one each time
/// the previous path completes.
pub struct WanderState {
    anchor: Vec3,
    radius: f32,
}

impl WanderState {
    pub fn new(anchor: Vec3, radius: f32) -> Self {
        Self { anchor, radius }
    }
}

impl<N: Navigator, A: Animator, H: Health> State<EnemyCtx<N, A, H>> for WanderState {
    fn name(&self) -> &'static str {
        "Wander"
    }

    fn on_enter(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        ctx.animator.cross_fade(Clip::Walk, CROSS_FADE);
    }

    fn update(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        if !ctx.nav.path_complete() {
            return;
        }

        let point = ctx.random_point_around(self.anchor, self.radius);
        match ctx.nav.sample_position(point, self.radius) {
            Some(goal) => ctx.nav.set_destination(goal),
            None => tracing::warn!(?point, radius = self.radius, "no navigable wander point"),
        }
    }
}

pub struct ChaseState;

impl<N: Navigator, A: Animator, H: Health> State<EnemyCtx<N, A, H>> for ChaseState {
    fn name(&self) -> &'static str {
        "Chase"
    }

    fn on_enter(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        ctx.animator.cross_fade(Clip::Run, CROSS_FADE);
    }

    fn update(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        if let Some(target) = ctx.detector.target() {
            ctx.nav.set_destination(target);
        }
    }
}

/// Keeps closing in while swinging whenever the attack timer allows.
pub struct AttackState;

impl<N: Navigator, A: Animator, H: Health> State<EnemyCtx<N, A, H>> for AttackState {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn on_enter(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        ctx.animator.cross_fade(Clip::Attack, CROSS_FADE);
        ctx.attack();
    }

    fn update(&mut self, ctx: &mut EnemyCtx<N, A, H>) {
        if let Some(target) = ctx.detector.target() {
            ctx.nav.set_destination(target);
        }
        ctx.attack();
    }
}
