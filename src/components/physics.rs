use glam::{Quat, Vec2, Vec3};

use super::character::{Body, Navigator, FORWARD};

/// Velocity-driven body on a flat ground plane. The player controller writes
/// its velocity; `physics_step` integrates it.
#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub grounded: bool,
    /// Height of the ground plane.
    pub ground_height: f32,
}

impl KinematicBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounded: position.y <= 0.0,
            ground_height: 0.0,
        }
    }

    /// Semi-implicit Euler step against the ground plane. Vertical velocity
    /// is owned by the controller, so no gravity is applied here.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        if self.position.y <= self.ground_height {
            self.position.y = self.ground_height;
            self.velocity.y = self.velocity.y.max(0.0);
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

impl Body for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
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
        self.grounded
    }
}

/// Axis-aligned walkable rectangle at a fixed height. Stands in for a navmesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavBounds {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl NavBounds {
    pub fn square(half_extent: f32) -> Self {
        Self {
            min: Vec2::splat(-half_extent),
            max: Vec2::splat(half_extent),
            height: 0.0,
        }
    }

    /// Nearest point on the walkable surface.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            self.height,
            point.z.clamp(self.min.y, self.max.y),
        )
    }
}

/// Destination-seeking agent constrained to [`NavBounds`].
#[derive(Clone, Debug)]
pub struct NavAgent {
    pub position: Vec3,
    pub rotation: Quat,
    pub speed: f32,
    pub stopping_distance: f32,
    pub bounds: NavBounds,
    destination: Option<Vec3>,
    velocity: Vec3,
}

impl NavAgent {
    pub fn new(position: Vec3, speed: f32, bounds: NavBounds) -> Self {
        Self {
            position: bounds.clamp(position),
            rotation: Quat::IDENTITY,
            speed,
            stopping_distance: 0.1,
            bounds,
            destination: None,
            velocity: Vec3::ZERO,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Walk straight toward the destination, turning to face it.
    pub fn step(&mut self, dt: f32) {
        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };
        let mut to_goal = destination - self.position;
        to_goal.y = 0.0;
        let distance = to_goal.length();
        if distance <= self.stopping_distance {
            self.velocity = Vec3::ZERO;
            return;
        }

        let direction = to_goal / distance;
        self.position += direction * (self.speed * dt).min(distance);
        self.velocity = direction * self.speed;
        self.rotation = Quat::from_rotation_arc(FORWARD, direction);
    }
}

impl Navigator for NavAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(self.bounds.clamp(destination));
    }

    fn path_complete(&self) -> bool {
        match self.destination {
            None => true,
            Some(destination) => {
                let mut remaining = destination - self.position;
                remaining.y = 0.0;
                remaining.length() <= self.stopping_distance
            }
        }
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let nearest = self.bounds.clamp(point);
        (nearest.distance(point) <= max_distance).then_some(nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_lands_on_ground_plane() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.5, 0.0));
        assert!(!body.grounded);
        body.velocity = Vec3::new(1.0, -10.0, 0.0);
        body.integrate(0.1);
        assert!(body.grounded);
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.position.x, 0.1);
    }

    #[test]
    fn agent_walks_to_destination_and_completes() {
        let mut agent = NavAgent::new(Vec3::ZERO, 2.0, NavBounds::square(50.0));
        assert!(agent.path_complete());
        agent.set_destination(Vec3::new(1.0, 0.0, 0.0));
        assert!(!agent.path_complete());

        for _ in 0..60 {
            agent.step(1.0 / 60.0);
        }
        assert!(agent.path_complete());
        assert!(agent.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn sampling_respects_max_distance() {
        let agent = NavAgent::new(Vec3::ZERO, 2.0, NavBounds::square(5.0));
        assert_eq!(
            agent.sample_position(Vec3::new(2.0, 1.0, 0.0), 2.0),
            Some(Vec3::new(2.0, 0.0, 0.0))
        );
        assert_eq!(agent.sample_position(Vec3::new(20.0, 0.0, 0.0), 2.0), None);
    }
}
