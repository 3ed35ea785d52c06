//! Blade spin.
//!
//! [`RotationDriver`] turns its entity about local Z while enabled and
//! remembers the orientation it was spawned with.

use bevy::prelude::*;

/// Fastest allowed spin, degrees per second.
pub const MAX_ROTATION_SPEED: f32 = 360.0;

/// Spins the entity about its local Z axis while `rotating` is set.
#[derive(Component, Clone, Debug, Reflect)]
pub struct RotationDriver {
    /// Degrees per second, clamped to `[0, MAX_ROTATION_SPEED]`.
    pub speed: f32,
    /// Whether the blades turn this frame.
    pub rotating: bool,
    initial: Quat,
}

impl RotationDriver {
    /// Captures `initial` as the orientation [`RotationDriver::reset`] restores.
    pub fn new(speed: f32, initial: Quat) -> Self {
        Self {
            speed: speed.clamp(0.0, MAX_ROTATION_SPEED),
            rotating: false,
            initial,
        }
    }

    /// Orientation captured at spawn.
    pub fn initial(&self) -> Quat {
        self.initial
    }

    /// Rotates `transform` by `speed * delta` degrees when enabled.
    ///
    /// Turns clockwise seen from the front, i.e. about −Z.
    pub fn advance(&self, transform: &mut Transform, delta: f32) {
        if self.rotating {
            transform.rotate_local_z(-(self.speed * delta).to_radians());
        }
    }

    /// Puts `transform` back to the captured orientation.
    pub fn reset(&self, transform: &mut Transform) {
        transform.rotation = self.initial;
    }
}

/// Advances every [`RotationDriver`] by the frame delta.
pub fn spin_blades(time: Res<Time>, mut query: Query<(&RotationDriver, &mut Transform)>) {
    let delta = time.delta_secs();
    for (driver, mut transform) in &mut query {
        driver.advance(&mut transform, delta);
    }
}
