use glam::Vec2;

use crate::engine::input::{InputEvent, InputState};

/// One periodic input event: fires at `offset`, then every `period` seconds.
struct Cue {
    event: InputEvent,
    offset: f32,
    period: f32,
}

impl Cue {
    /// Index of the last firing at or before `t`, `None` before the first.
    fn firing(&self, t: f32) -> Option<u32> {
        (t >= self.offset).then(|| ((t - self.offset) / self.period).floor() as u32)
    }

    fn fires_between(&self, prev: f32, now: f32) -> bool {
        self.firing(now) > self.firing(prev)
    }
}

const CUES: [Cue; 5] = [
    Cue { event: InputEvent::AttackPressed, offset: 0.5, period: 1.5 },
    Cue { event: InputEvent::JumpPressed, offset: 1.0, period: 3.0 },
    Cue { event: InputEvent::JumpReleased, offset: 1.4, period: 3.0 },
    Cue { event: InputEvent::DashPressed, offset: 2.0, period: 6.0 },
    Cue { event: InputEvent::DashReleased, offset: 2.6, period: 6.0 },
];

/// Deterministic stand-in for a human player: walks a slow circle and
/// presses attack, jump and dash on fixed schedules.
#[derive(Debug, Default)]
pub struct InputScript {
    elapsed: f32,
    input: InputState,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the frame ending `dt` seconds after the previous one.
    pub fn next_frame(&mut self, dt: f32) -> &InputState {
        let prev = self.elapsed;
        self.elapsed += dt;
        let now = self.elapsed;

        self.input.begin_frame();
        self.input.direction = Vec2::new((now * 0.5).sin(), (now * 0.5).cos());
        for cue in &CUES {
            if cue.fires_between(prev, now) {
                self.input.push(cue.event);
            }
        }
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_until(script: &mut InputScript, seconds: f32, dt: f32) -> Vec<InputEvent> {
        let frames = (seconds / dt).round() as usize;
        (0..frames)
            .flat_map(|_| script.next_frame(dt).events.clone())
            .collect()
    }

    #[test]
    fn cues_fire_once_per_period() {
        let mut script = InputScript::new();
        let events = events_until(&mut script, 3.2, 0.1);
        let count = |event: InputEvent| events.iter().filter(|&&e| e == event).count();
        assert_eq!(count(InputEvent::AttackPressed), 2);
        assert_eq!(count(InputEvent::JumpPressed), 1);
        assert_eq!(count(InputEvent::JumpReleased), 1);
        assert_eq!(count(InputEvent::DashPressed), 1);
    }

    #[test]
    fn events_do_not_leak_into_the_next_frame() {
        let mut script = InputScript::new();
        let mut saw_attack = false;
        for _ in 0..20 {
            let input = script.next_frame(0.05);
            if input.events.contains(&InputEvent::AttackPressed) {
                saw_attack = true;
                break;
            }
        }
        assert!(saw_attack);
        assert!(script.next_frame(0.05).events.is_empty());
    }
}
