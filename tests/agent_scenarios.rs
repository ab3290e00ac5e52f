//! End-to-end controller scenarios against hand-rolled collaborators.

use glam::{Quat, Vec3};
use lance_ai::agent::{EnemyController, PlayerController, LAUNCH_POINT};
use lance_ai::components::{Animator, Body, Clip, Health, Navigator};
use lance_ai::config::{DetectionConfig, EnemyConfig, PlayerConfig};
use lance_ai::detection::PlayerDetector;
use lance_ai::engine::input::{InputEvent, InputState};

#[derive(Default)]
struct RecordingNav {
    position: Vec3,
    destinations: Vec<Vec3>,
}

impl Navigator for RecordingNav {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        Vec3::Z
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destinations.push(destination);
    }

    // Never arrives once it has a destination, so Wander picks only once.
    fn path_complete(&self) -> bool {
        self.destinations.is_empty()
    }

    fn sample_position(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
        Some(point)
    }
}

#[derive(Default)]
struct Clips(Vec<Clip>);

impl Animator for Clips {
    fn cross_fade(&mut self, clip: Clip, _blend: f32) {
        self.0.push(clip);
    }
}

#[derive(Default)]
struct Tally(i32);

impl Health for Tally {
    fn take_damage(&mut self, amount: i32) {
        self.0 += amount;
    }
}

struct StillBody {
    velocity: Vec3,
    rotation: Quat,
}

impl Body for StillBody {
    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn is_grounded(&self) -> bool {
        true
    }
}

fn enemy() -> EnemyController<RecordingNav, Clips, Tally> {
    let detector = PlayerDetector::new(&DetectionConfig::default()).unwrap();
    EnemyController::new(
        EnemyConfig::default(),
        detector,
        RecordingNav::default(),
        Clips::default(),
        Tally::default(),
        3,
    )
    .unwrap()
}

#[test]
fn sighting_enters_chase_before_any_chase_update() {
    let mut enemy = enemy();
    enemy.update(0.1).unwrap();
    assert!(enemy.is_in(enemy.states().wander));
    let wander_picks = enemy.nav().destinations.len();

    let target = Vec3::new(0.0, 0.0, 7.0);
    enemy.track(Some(target));
    let entered = enemy.update(0.1).unwrap();

    assert_eq!(entered, Some(enemy.states().chase));
    let runs = enemy.animator().0.iter().filter(|&&c| c == Clip::Run).count();
    assert_eq!(runs, 1);
    // Chase has not steered yet on its entry tick.
    assert_eq!(enemy.nav().destinations.len(), wander_picks);

    enemy.update(0.1).unwrap();
    assert_eq!(enemy.nav().destinations.last(), Some(&target));
    let runs = enemy.animator().0.iter().filter(|&&c| c == Clip::Run).count();
    assert_eq!(runs, 1);
}

#[test]
fn chase_reissues_destination_every_tick() {
    let mut enemy = enemy();
    let target = Vec3::new(0.0, 0.0, 7.0);
    enemy.track(Some(target));
    assert_eq!(enemy.update(0.1).unwrap(), Some(enemy.states().chase));

    let before = enemy.nav().destinations.len();
    for _ in 0..4 {
        assert_eq!(enemy.update(0.1).unwrap(), None);
    }
    let issued = &enemy.nav().destinations[before..];
    assert_eq!(issued, &[target; 4]);
}

#[test]
fn missing_target_never_leaves_wander() {
    let mut enemy = enemy();
    for _ in 0..50 {
        enemy.update(0.1).unwrap();
    }
    assert!(enemy.is_in(enemy.states().wander));
    assert_eq!(enemy.target_health().0, 0);
}

#[test]
fn enemy_in_reach_lands_a_hit_on_attack_entry() {
    let mut enemy = enemy();
    enemy.track(Some(Vec3::new(0.0, 0.0, 1.0)));
    enemy.update(0.1).unwrap();
    assert!(enemy.is_in(enemy.states().chase));
    enemy.update(0.1).unwrap();
    assert!(enemy.is_in(enemy.states().attack));
    assert_eq!(enemy.target_health().0, 10);
}

#[test]
fn jump_velocity_clamps_at_ninety_five_percent_progress() {
    let config = PlayerConfig::default();
    let launch = config.launch_velocity();
    let body = StillBody { velocity: Vec3::ZERO, rotation: Quat::IDENTITY };
    let mut player = PlayerController::new(config, body, Clips::default()).unwrap();

    let mut input = InputState::new();
    input.push(InputEvent::JumpPressed);
    player.apply_input(&input);

    player.update(0.475).unwrap();
    assert!(player.is_in(player.states().jump));
    assert!(player.timers().jump.progress() > LAUNCH_POINT);

    player.fixed_update(1.0 / 60.0).unwrap();
    let vy = player.body().velocity.y;
    assert!((vy - launch).abs() < 1e-5, "expected {launch}, got {vy}");
    assert!((launch - (2.0f32 * 2.0 * 9.81).sqrt()).abs() < 1e-5);
}
