//! Scene visuals: camera, bloom, tonemapping, sun light and ground.
//!
//! Frames the windmill with an HDR `Camera3d` and a single shadow-casting
//! directional light over a plain ground plane.

mod entities;
mod systems;

pub use entities::{Ground, ShowcaseCamera};
pub use systems::setup_visuals;

use bevy::prelude::*;

/// Per-plugin configuration for the scene around the windmill.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct VisualsConfig {
    /// Background colour.
    pub clear_color: Color,
    /// Bloom intensity on the camera.
    pub bloom_intensity: f32,
    /// Camera position in world space.
    pub camera_position: Vec3,
    /// Point the camera looks at.
    pub camera_target: Vec3,
    /// Sun illuminance in lux.
    pub sun_illuminance: f32,
    /// Side length of the square ground plane.
    pub ground_size: f32,
    /// Ground base colour.
    pub ground_color: Color,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::srgb(0.52, 0.68, 0.86),
            bloom_intensity: 0.15,
            camera_position: Vec3::new(7.0, 5.0, 11.0),
            camera_target: Vec3::new(0.0, 3.2, 0.0),
            sun_illuminance: 9000.0,
            ground_size: 40.0,
            ground_color: Color::srgb(0.33, 0.45, 0.24),
        }
    }
}

/// Sets up the camera, light, ground and clear colour.
pub struct VisualsPlugin(pub VisualsConfig);

impl Plugin for VisualsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<VisualsConfig>()
            .register_type::<ShowcaseCamera>()
            .register_type::<Ground>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, setup_visuals);
    }
}
