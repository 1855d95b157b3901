//! Model transform driven by directional movement and rotation input.
//!
//! Input polling belongs to the host; this module only integrates the
//! state behind it. Each call nudges the position or angle by `speed * dt`
//! and recomposes the model matrix, so the transform read back between
//! calls is always current.

use sprite_m4::Mat4;

/// Initial movement state.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Starting position of the renderable's center
    pub center: [f32; 3],
    /// Per-axis movement speed, in units per time step
    pub speed: [f32; 3],
    /// Rotation axis (unit vector, same contract as [`Mat4::rotate`])
    pub rotation_axis: [f32; 3],
    /// Starting angle in radians
    pub angle: f32,
    /// Rotation speed in radians per time step
    pub rotation_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            speed: [1.0, 1.0, 0.0],
            rotation_axis: [0.0, 0.0, 1.0],
            angle: 0.0,
            rotation_speed: 1.0,
        }
    }
}

/// Position and orientation of one renderable, with its composed model
/// transform.
#[derive(Debug, Clone)]
pub struct Movement {
    center: [f32; 3],
    speed: [f32; 3],
    rotation_axis: [f32; 3],
    angle: f32,
    rotation_speed: f32,
    transform: Mat4,
}

impl Movement {
    /// Create a movement state and compose its initial transform.
    pub fn new(config: MovementConfig) -> Self {
        let mut movement = Self {
            center: config.center,
            speed: config.speed,
            rotation_axis: config.rotation_axis,
            angle: config.angle,
            rotation_speed: config.rotation_speed,
            transform: Mat4::new(),
        };
        movement.recompose();
        movement
    }

    /// Move along +x by `speed.x * dt`.
    pub fn move_right(&mut self, dt: f32) {
        self.center[0] += self.speed[0] * dt;
        self.recompose();
    }

    /// Move along -x by `speed.x * dt`.
    pub fn move_left(&mut self, dt: f32) {
        self.center[0] -= self.speed[0] * dt;
        self.recompose();
    }

    /// Move along +y by `speed.y * dt`.
    pub fn move_up(&mut self, dt: f32) {
        self.center[1] += self.speed[1] * dt;
        self.recompose();
    }

    /// Move along -y by `speed.y * dt`.
    pub fn move_down(&mut self, dt: f32) {
        self.center[1] -= self.speed[1] * dt;
        self.recompose();
    }

    /// Advance the angle by `rotation_speed * dt`.
    pub fn rotate_clockwise(&mut self, dt: f32) {
        self.angle += self.rotation_speed * dt;
        self.recompose();
    }

    /// Advance the angle by `-rotation_speed * dt`.
    pub fn rotate_counter_clockwise(&mut self, dt: f32) {
        self.angle -= self.rotation_speed * dt;
        self.recompose();
    }

    /// Current center position.
    pub fn center(&self) -> [f32; 3] {
        self.center
    }

    /// Current angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// The composed model transform, column-major, ready for a uniform
    /// upload.
    pub fn transform(&self) -> &[f32; 16] {
        self.transform.as_array()
    }

    fn recompose(&mut self) {
        let [x, y, z] = self.center;
        let [ax, ay, az] = self.rotation_axis;
        self.transform
            .identity()
            .translate(x, y, z)
            .rotate(ax, ay, az, self.angle);
    }
}
