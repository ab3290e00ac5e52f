use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::enemy_states::{AttackState, ChaseState, WanderState};
use crate::components::{Animator, Health, Navigator};
use crate::config::EnemyConfig;
use crate::detection::PlayerDetector;
use crate::engine::timer::Timer;
use crate::error::{AgentError, FsmError};
use crate::fsm::{Predicate, StateId, StateMachine};

/// Context shared by the enemy's states and predicates.
pub struct EnemyCtx<N, A, H> {
    pub config: EnemyConfig,
    pub nav: N,
    pub animator: A,
    /// Whatever the enemy hurts when an attack lands.
    pub target_health: H,
    pub detector: PlayerDetector,
    /// Runs for `time_between_attacks` after every landed hit.
    pub attack_timer: Timer,
    rng: SmallRng,
}

impl<N: Navigator, A: Animator, H: Health> EnemyCtx<N, A, H> {
    /// Hit the target unless the attack timer is still running. Returns
    /// whether damage was dealt.
    pub fn attack(&mut self) -> bool {
        if self.attack_timer.is_running() {
            return false;
        }
        self.attack_timer.start();
        self.target_health.take_damage(self.config.attack_damage);
        tracing::debug!(damage = self.config.attack_damage, "enemy hit");
        true
    }

    /// Uniform point inside the sphere of `radius` around `anchor`.
    pub fn random_point_around(&mut self, anchor: Vec3, radius: f32) -> Vec3 {
        loop {
            let p = Vec3::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
            if p.length_squared() <= 1.0 {
                return anchor + p * radius;
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EnemyStates {
    pub wander: StateId,
    pub chase: StateId,
    pub attack: StateId,
}

/// Enemy agent: wander until the detector fires, chase, attack in range.
///
/// The host feeds the target position each frame through
/// [`track`](Self::track), then calls [`update`](Self::update).
pub struct EnemyController<N, A, H> {
    machine: StateMachine<EnemyCtx<N, A, H>>,
    ctx: EnemyCtx<N, A, H>,
    states: EnemyStates,
}

impl<N, A, H> EnemyController<N, A, H>
where
    N: Navigator + 'static,
    A: Animator + 'static,
    H: Health + 'static,
{
    /// Wander is anchored at the navigator's spawn position. `seed` drives
    /// the wander point picks.
    pub fn new(
        config: EnemyConfig,
        detector: PlayerDetector,
        nav: N,
        animator: A,
        target_health: H,
        seed: u64,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        let anchor = nav.position();
        let mut ctx = EnemyCtx {
            attack_timer: Timer::new("time_between_attacks", config.time_between_attacks)?,
            config,
            nav,
            animator,
            target_health,
            detector,
            rng: SmallRng::seed_from_u64(seed),
        };

        let mut machine = StateMachine::new();
        let states = EnemyStates {
            wander: machine.add_state(WanderState::new(anchor, ctx.config.wander_radius)),
            chase: machine.add_state(ChaseState),
            attack: machine.add_state(AttackState),
        };

        machine.add_transition(
            states.wander,
            states.chase,
            Predicate::new(|ctx: &mut EnemyCtx<N, A, H>| ctx.detector.can_detect_player()),
        )?;
        machine.add_transition(
            states.chase,
            states.wander,
            Predicate::new(|ctx: &mut EnemyCtx<N, A, H>| !ctx.detector.can_detect_player()),
        )?;
        machine.add_transition(
            states.chase,
            states.attack,
            Predicate::new(|ctx: &mut EnemyCtx<N, A, H>| ctx.detector.can_attack_player()),
        )?;
        machine.add_transition(
            states.attack,
            states.chase,
            Predicate::new(|ctx: &mut EnemyCtx<N, A, H>| !ctx.detector.can_attack_player()),
        )?;

        machine.set_state(states.wander, &mut ctx)?;

        Ok(Self { machine, ctx, states })
    }

    /// Target position for this frame, `None` when there is nothing to hunt.
    pub fn track(&mut self, target: Option<Vec3>) {
        self.ctx.detector.track(target);
    }

    /// Refresh the sensor pose, tick timers, then run the machine.
    pub fn update(&mut self, dt: f32) -> Result<Option<StateId>, FsmError> {
        let ctx = &mut self.ctx;
        ctx.detector.set_observer(ctx.nav.position(), ctx.nav.forward());
        ctx.detector.tick(dt);
        ctx.attack_timer.tick(dt);
        self.machine.update(&mut self.ctx)
    }

    pub fn fixed_update(&mut self) -> Result<(), FsmError> {
        self.machine.fixed_update(&mut self.ctx)
    }

    pub fn states(&self) -> EnemyStates {
        self.states
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.machine.is_in(state)
    }

    pub fn current_state_name(&self) -> Option<&'static str> {
        self.machine.current_name()
    }

    pub fn nav(&self) -> &N {
        &self.ctx.nav
    }

    pub fn nav_mut(&mut self) -> &mut N {
        &mut self.ctx.nav
    }

    pub fn animator(&self) -> &A {
        &self.ctx.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.ctx.animator
    }

    pub fn target_health(&self) -> &H {
        &self.ctx.target_health
    }

    pub fn target_health_mut(&mut self) -> &mut H {
        &mut self.ctx.target_health
    }

    pub fn detector(&self) -> &PlayerDetector {
        &self.ctx.detector
    }

    pub fn detector_mut(&mut self) -> &mut PlayerDetector {
        &mut self.ctx.detector
    }

    pub fn attack_timer(&self) -> &Timer {
        &self.ctx.attack_timer
    }
}
