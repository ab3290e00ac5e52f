use std::time::Instant;

/// Fixed physics step (60 Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Frame delta source. Wall clock for realtime runs, a constant step for
/// headless deterministic runs.
pub struct FrameTimer {
    last: Option<Instant>,
    step: f32,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Some(Instant::now()),
            step: 0.0,
            dt: 0.0,
        }
    }

    /// Every `tick` yields exactly `step` seconds.
    pub fn fixed(step: f32) -> Self {
        Self {
            last: None,
            step,
            dt: step,
        }
    }

    pub fn tick(&mut self) {
        match self.last {
            Some(last) => {
                let now = Instant::now();
                self.dt = now.duration_since(last).as_secs_f32();
                self.last = Some(now);
            }
            None => self.dt = self.step,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Most physics steps a single frame may run. Backlog beyond that is dropped.
pub const MAX_STEPS_PER_FRAME: usize = 8;

/// Accumulator that converts variable frame time into whole physics steps.
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add `frame_dt` and return how many `PHYSICS_DT` steps are due, at
    /// most [`MAX_STEPS_PER_FRAME`].
    pub fn advance(&mut self, frame_dt: f32) -> usize {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= PHYSICS_DT && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= PHYSICS_DT;
            steps += 1;
        }
        if self.accumulator >= PHYSICS_DT {
            tracing::warn!(backlog = self.accumulator, "dropping physics backlog");
            self.accumulator = 0.0;
        }
        steps
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries the rate of change between calls. Never overshoots.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp so we never pass the target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt.max(f32::EPSILON);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timer_yields_constant_step() {
        let mut timer = FrameTimer::fixed(0.02);
        timer.tick();
        timer.tick();
        assert_eq!(timer.dt, 0.02);
    }

    #[test]
    fn fixed_step_carries_remainder() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(PHYSICS_DT * 0.5), 0);
        assert_eq!(step.advance(PHYSICS_DT * 2.0), 2);
        assert_eq!(step.advance(PHYSICS_DT * 0.6), 1);
    }

    #[test]
    fn fixed_step_caps_steps_and_drops_backlog() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(1.0), MAX_STEPS_PER_FRAME);
        assert_eq!(step.advance(f32::INFINITY), MAX_STEPS_PER_FRAME);
        assert_eq!(step.advance(PHYSICS_DT * 0.5), 0);
        assert_eq!(step.advance(f32::NAN), 0);
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        for _ in 0..200 {
            value = smooth_damp(value, 1.0, &mut velocity, 0.2, 1.0 / 60.0);
            assert!(value <= 1.0);
        }
        assert!((value - 1.0).abs() < 1e-3);
    }
}
