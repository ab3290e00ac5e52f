use glam::{Quat, Vec2, Vec3};

use super::player_states::{AttackState, DashState, JumpState, LocomotionState};
use crate::components::{Animator, Body, FORWARD};
use crate::config::PlayerConfig;
use crate::engine::input::{InputEvent, InputState};
use crate::engine::time::smooth_damp;
use crate::engine::timer::Timer;
use crate::error::{AgentError, ConfigError, FsmError};
use crate::fsm::{Predicate, StateId, StateMachine};

/// Jump progress past which the force curve is replaced by the launch
/// velocity clamp.
pub const LAUNCH_POINT: f32 = 0.9;

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// Every timer the player owns. Ticked in declaration order each frame.
#[derive(Debug)]
pub struct PlayerTimers {
    pub jump: Timer,
    pub jump_cooldown: Timer,
    pub dash: Timer,
    pub dash_cooldown: Timer,
    pub attack: Timer,
}

impl PlayerTimers {
    fn new(config: &PlayerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            jump: Timer::new("jump", config.jump_duration)?,
            jump_cooldown: Timer::new("jump_cooldown", config.jump_cooldown)?,
            dash: Timer::new("dash", config.dash_duration)?,
            dash_cooldown: Timer::new("dash_cooldown", config.dash_cooldown)?,
            attack: Timer::new("attack", config.attack_cooldown)?,
        })
    }
}

/// Melee hit volume emitted when the player enters its attack state. The
/// host resolves it against whatever health components overlap it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    pub center: Vec3,
    pub radius: f32,
    pub damage: i32,
}

// ---------------------------------------------------------------------------
// Context shared by the player's states and predicates
// ---------------------------------------------------------------------------

pub struct PlayerCtx<B, A> {
    pub config: PlayerConfig,
    pub body: B,
    pub animator: A,
    pub timers: PlayerTimers,
    direction: Vec2,
    view_yaw: f32,
    /// Vertical velocity owned by the jump arc / gravity integration.
    jump_velocity: f32,
    /// Horizontal speed multiplier; `dash_force` while dashing, else 1.
    dash_multiplier: f32,
    /// Smoothed horizontal input magnitude fed to the animator.
    current_speed: f32,
    speed_velocity: f32,
    strikes: Vec<Strike>,
    fixed_dt: f32,
}

impl<B: Body, A: Animator> PlayerCtx<B, A> {
    /// Vertical velocity for the jump state.
    ///
    /// - grounded with no jump running: 0 (landed)
    /// - jump running, progress <= 0.9: `v += (1 - progress) * jump_force * dt`
    /// - jump running, progress > 0.9: `v = sqrt(2 * max_height * |g|)`
    /// - jump over, airborne: `v += g * gravity_multiplier * dt`
    pub fn handle_jump(&mut self) {
        let jump = &self.timers.jump;
        if !jump.is_running() && self.body.is_grounded() {
            self.jump_velocity = 0.0;
            return;
        }

        if jump.is_running() {
            let progress = jump.progress();
            if progress > LAUNCH_POINT {
                self.jump_velocity = self.config.launch_velocity();
            } else {
                self.jump_velocity += (1.0 - progress) * self.config.jump_force * self.fixed_dt;
            }
        } else {
            self.apply_gravity();
        }
    }

    /// Vertical velocity for every state that is not jumping: fall when
    /// airborne, rest on the ground otherwise.
    pub fn handle_fall(&mut self) {
        if self.body.is_grounded() {
            self.jump_velocity = 0.0;
        } else {
            self.apply_gravity();
        }
    }

    /// Camera-relative horizontal movement, composed with the current
    /// vertical velocity and handed to the body.
    pub fn handle_movement(&mut self) {
        let input = Vec3::new(self.direction.x, 0.0, self.direction.y);
        let adjusted = Quat::from_rotation_y(self.view_yaw) * input;

        let horizontal = if adjusted.length_squared() > 0.0 {
            self.face(adjusted);
            self.smooth_speed(adjusted.length());
            adjusted * self.config.move_speed * self.dash_multiplier
        } else {
            self.smooth_speed(0.0);
            Vec3::ZERO
        };

        self.body
            .set_velocity(Vec3::new(horizontal.x, self.jump_velocity, horizontal.z));
    }

    /// Queue a strike one unit in front of the body.
    pub fn attack(&mut self) {
        let center = self.body.position() + self.body.forward();
        tracing::debug!(?center, radius = self.config.attack_distance, "player strike");
        self.strikes.push(Strike {
            center,
            radius: self.config.attack_distance,
            damage: self.config.attack_damage,
        });
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    pub fn dash_multiplier(&self) -> f32 {
        self.dash_multiplier
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Any-state guard back to locomotion, left half.
    fn is_grounded(&self) -> bool {
        self.body.is_grounded()
    }

    /// Any-state guard back to locomotion, right half.
    fn is_idle(&self) -> bool {
        !self.timers.attack.is_running()
            && !self.timers.jump.is_running()
            && !self.timers.dash.is_running()
    }

    fn apply_gravity(&mut self) {
        self.jump_velocity += self.config.gravity * self.config.gravity_multiplier * self.fixed_dt;
    }

    /// Turn toward `direction`, at most `rotation_speed * dt` radians.
    fn face(&mut self, direction: Vec3) {
        let target = Quat::from_rotation_arc(FORWARD, direction.normalize());
        let current = self.body.rotation();
        let max_step = self.config.rotation_speed * self.fixed_dt;
        let angle = current.angle_between(target);
        let next = if angle <= max_step {
            target
        } else {
            current.slerp(target, max_step / angle)
        };
        self.body.set_rotation(next);
    }

    fn smooth_speed(&mut self, target: f32) {
        self.current_speed = smooth_damp(
            self.current_speed,
            target,
            &mut self.speed_velocity,
            self.config.smooth_time,
            self.fixed_dt,
        );
    }

    // Timer wiring: every start/stop goes through these so the follow-up
    // effects (launch velocity, dash multiplier, cooldowns) always happen.

    fn start_jump(&mut self) {
        self.timers.jump.start();
        self.jump_velocity = self.config.jump_force;
    }

    fn stop_jump(&mut self) {
        self.timers.jump.stop();
        self.on_jump_stopped();
    }

    fn on_jump_stopped(&mut self) {
        self.timers.jump_cooldown.start();
    }

    fn start_dash(&mut self) {
        self.timers.dash.start();
        self.dash_multiplier = self.config.dash_force;
    }

    fn stop_dash(&mut self) {
        self.timers.dash.stop();
        self.on_dash_stopped();
    }

    fn on_dash_stopped(&mut self) {
        self.dash_multiplier = 1.0;
        self.timers.dash_cooldown.start();
    }

    fn tick_timers(&mut self, dt: f32) {
        if self.timers.jump.tick(dt).is_some() {
            self.on_jump_stopped();
        }
        self.timers.jump_cooldown.tick(dt);
        if self.timers.dash.tick(dt).is_some() {
            self.on_dash_stopped();
        }
        self.timers.dash_cooldown.tick(dt);
        self.timers.attack.tick(dt);
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Handles of the player's states inside its machine.
#[derive(Clone, Copy, Debug)]
pub struct PlayerStates {
    pub locomotion: StateId,
    pub jump: StateId,
    pub dash: StateId,
    pub attack: StateId,
}

/// Player agent: input → timers → state machine → body velocity.
///
/// Call [`apply_input`](Self::apply_input) and [`update`](Self::update) once
/// per frame, [`fixed_update`](Self::fixed_update) once per physics step.
pub struct PlayerController<B, A> {
    machine: StateMachine<PlayerCtx<B, A>>,
    ctx: PlayerCtx<B, A>,
    states: PlayerStates,
}

impl<B, A> PlayerController<B, A>
where
    B: Body + 'static,
    A: Animator + 'static,
{
    pub fn new(config: PlayerConfig, body: B, animator: A) -> Result<Self, AgentError> {
        config.validate()?;
        let timers = PlayerTimers::new(&config)?;
        let mut ctx = PlayerCtx {
            config,
            body,
            animator,
            timers,
            direction: Vec2::ZERO,
            view_yaw: 0.0,
            jump_velocity: 0.0,
            dash_multiplier: 1.0,
            current_speed: 0.0,
            speed_velocity: 0.0,
            strikes: Vec::new(),
            fixed_dt: 0.0,
        };

        let mut machine = StateMachine::new();
        let states = PlayerStates {
            locomotion: machine.add_state(LocomotionState),
            jump: machine.add_state(JumpState),
            dash: machine.add_state(DashState),
            attack: machine.add_state(AttackState),
        };

        machine.add_transition(
            states.locomotion,
            states.jump,
            Predicate::new(|ctx: &mut PlayerCtx<B, A>| ctx.timers.jump.is_running()),
        )?;
        machine.add_transition(
            states.locomotion,
            states.dash,
            Predicate::new(|ctx: &mut PlayerCtx<B, A>| ctx.timers.dash.is_running()),
        )?;
        machine.add_transition(
            states.locomotion,
            states.attack,
            Predicate::new(|ctx: &mut PlayerCtx<B, A>| ctx.timers.attack.is_running()),
        )?;
        machine.add_transition(
            states.attack,
            states.locomotion,
            Predicate::new(|ctx: &mut PlayerCtx<B, A>| !ctx.timers.attack.is_running()),
        )?;
        machine.add_any_transition(
            states.locomotion,
            Predicate::new(|ctx: &mut PlayerCtx<B, A>| ctx.is_grounded())
                .and(Predicate::new(|ctx: &mut PlayerCtx<B, A>| ctx.is_idle())),
        )?;

        machine.set_state(states.locomotion, &mut ctx)?;

        Ok(Self { machine, ctx, states })
    }

    /// Latch the held direction and dispatch this frame's discrete events.
    pub fn apply_input(&mut self, input: &InputState) {
        self.ctx.direction = input.direction.clamp_length_max(1.0);
        self.ctx.view_yaw = input.view_yaw;
        for &event in &input.events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::JumpPressed => self.on_jump(true),
            InputEvent::JumpReleased => self.on_jump(false),
            InputEvent::DashPressed => self.on_dash(true),
            InputEvent::DashReleased => self.on_dash(false),
            InputEvent::AttackPressed => self.on_attack(),
        }
    }

    /// Frame pass: timers first, then transitions and the state's frame hook.
    /// Returns the state entered this frame, if any.
    pub fn update(&mut self, dt: f32) -> Result<Option<StateId>, FsmError> {
        self.ctx.tick_timers(dt);
        let entered = self.machine.update(&mut self.ctx)?;
        let speed = self.ctx.current_speed;
        self.ctx.animator.set_speed(speed);
        Ok(entered)
    }

    /// Physics pass: the current state's velocity logic.
    pub fn fixed_update(&mut self, dt: f32) -> Result<(), FsmError> {
        self.ctx.fixed_dt = dt;
        self.machine.fixed_update(&mut self.ctx)
    }

    /// Strikes emitted since the last call.
    pub fn drain_strikes(&mut self) -> Vec<Strike> {
        std::mem::take(&mut self.ctx.strikes)
    }

    pub fn states(&self) -> PlayerStates {
        self.states
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.machine.is_in(state)
    }

    pub fn current_state_name(&self) -> Option<&'static str> {
        self.machine.current_name()
    }

    pub fn context(&self) -> &PlayerCtx<B, A> {
        &self.ctx
    }

    pub fn body(&self) -> &B {
        &self.ctx.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.ctx.body
    }

    pub fn animator(&self) -> &A {
        &self.ctx.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.ctx.animator
    }

    pub fn timers(&self) -> &PlayerTimers {
        &self.ctx.timers
    }

    fn on_jump(&mut self, pressed: bool) {
        let ctx = &mut self.ctx;
        if pressed
            && !ctx.timers.jump.is_running()
            && !ctx.timers.jump_cooldown.is_running()
            && ctx.body.is_grounded()
        {
            ctx.start_jump();
        } else if !pressed && ctx.timers.jump.is_running() {
            // Releasing early cuts the jump short.
            ctx.stop_jump();
        }
    }

    fn on_dash(&mut self, pressed: bool) {
        let ctx = &mut self.ctx;
        if pressed && !ctx.timers.dash.is_running() && !ctx.timers.dash_cooldown.is_running() {
            ctx.start_dash();
        } else if !pressed && ctx.timers.dash.is_running() {
            ctx.stop_dash();
        }
    }

    fn on_attack(&mut self) {
        if !self.ctx.timers.attack.is_running() {
            self.ctx.timers.attack.start();
        }
    }
}
