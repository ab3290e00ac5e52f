use std::time::Duration;

use hecs::World;

use crate::components::HealthPool;
use crate::config::SimConfig;
use crate::engine::time::{FixedStep, FrameTimer, PHYSICS_DT};
use crate::error::{AgentError, ConfigError, FsmError};
use crate::scene::{load_test_scene, InputScript, TestScene};
use crate::systems::{
    animation_system, combat_system, enemy_fixed_system, enemy_system, physics_step,
    player_fixed_system, player_system, SimEnemy, SimPlayer,
};

/// How long and how fast to run the headless simulation.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub seconds: f32,
    pub fps: f32,
    /// Pace frames against the wall clock instead of stepping as fast as
    /// possible with a constant dt.
    pub realtime: bool,
}

/// End-of-run snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSummary {
    pub frames: u64,
    pub physics_steps: u64,
    pub elapsed: f32,
    pub player_state: Option<&'static str>,
    pub player_health: i32,
    pub damage_taken: i32,
    pub strikes_landed: usize,
    pub enemies_alive: usize,
    pub enemy_states: Vec<&'static str>,
}

/// Headless host: scripted input in, systems over a hecs world, fixed-rate
/// physics from a frame accumulator.
pub struct SimApp {
    world: World,
    scene: TestScene,
    script: InputScript,
    fixed: FixedStep,
    frames: u64,
    physics_steps: u64,
    elapsed: f32,
    damage_taken: i32,
    strikes_landed: usize,
}

impl SimApp {
    pub fn new(config: &SimConfig, enemies: usize, seed: u64) -> Result<Self, AgentError> {
        config.validate()?;
        let mut world = World::new();
        let scene = load_test_scene(&mut world, config, enemies, seed)?;
        Ok(Self {
            world,
            scene,
            script: InputScript::new(),
            fixed: FixedStep::default(),
            frames: 0,
            physics_steps: 0,
            elapsed: 0.0,
            damage_taken: 0,
            strikes_landed: 0,
        })
    }

    /// Run until `options.seconds` of simulated time pass or the player dies.
    ///
    /// `fps` must be finite and positive, `seconds` finite and not negative.
    pub fn run(&mut self, options: &RunOptions) -> Result<SimSummary, AgentError> {
        if !(options.fps.is_finite() && options.fps > 0.0) {
            return Err(ConfigError::NonPositive { name: "fps", value: options.fps }.into());
        }
        if !(options.seconds.is_finite() && options.seconds >= 0.0) {
            return Err(ConfigError::InvalidDuration { name: "seconds", value: options.seconds }.into());
        }
        let frame = 1.0 / options.fps;
        let mut timer = if options.realtime {
            FrameTimer::new()
        } else {
            FrameTimer::fixed(frame)
        };

        while self.elapsed < options.seconds {
            if options.realtime {
                std::thread::sleep(Duration::from_secs_f32(frame));
            }
            timer.tick();
            self.step(timer.dt)?;

            if !self.player_alive() {
                tracing::info!(elapsed = self.elapsed, "player defeated");
                break;
            }
        }

        Ok(self.summary())
    }

    /// One frame: input and behavior at frame rate, then every physics step
    /// the accumulator owes.
    pub fn step(&mut self, dt: f32) -> Result<(), FsmError> {
        let input = self.script.next_frame(dt);
        player_system(&mut self.world, input, dt)?;
        self.damage_taken += enemy_system(&mut self.world, dt)?;
        self.strikes_landed += combat_system(&mut self.world);

        for _ in 0..self.fixed.advance(dt) {
            player_fixed_system(&mut self.world, PHYSICS_DT)?;
            enemy_fixed_system(&mut self.world)?;
            physics_step(&mut self.world, PHYSICS_DT);
            self.physics_steps += 1;
        }

        animation_system(&mut self.world, dt);
        self.frames += 1;
        self.elapsed += dt;
        Ok(())
    }

    pub fn player_alive(&self) -> bool {
        self.world
            .get::<&HealthPool>(self.scene.player)
            .is_ok_and(|health| health.is_alive())
    }

    pub fn summary(&self) -> SimSummary {
        let player_state = self
            .world
            .get::<&SimPlayer>(self.scene.player)
            .ok()
            .and_then(|player| player.current_state_name());
        let player_health = self
            .world
            .get::<&HealthPool>(self.scene.player)
            .map(|health| health.current)
            .unwrap_or(0);

        let mut enemies_alive = 0;
        let mut enemy_states = Vec::with_capacity(self.scene.enemies.len());
        for &entity in &self.scene.enemies {
            if let Ok(health) = self.world.get::<&HealthPool>(entity) {
                if health.is_alive() {
                    enemies_alive += 1;
                }
            }
            if let Ok(enemy) = self.world.get::<&SimEnemy>(entity) {
                enemy_states.extend(enemy.current_state_name());
            }
        }

        SimSummary {
            frames: self.frames,
            physics_steps: self.physics_steps,
            elapsed: self.elapsed,
            player_state,
            player_health,
            damage_taken: self.damage_taken,
            strikes_landed: self.strikes_landed,
            enemies_alive,
            enemy_states,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scene(&self) -> &TestScene {
        &self.scene
    }
}
