//! The windmill model and the per-frame wiring of its build controller.
//!
//! Spawns a procedural windmill whose body and blades are multi-material
//! groups, captures their design-time materials, and runs the
//! [`crate::build`] controller each frame through [`WindmillHost`].

mod entities;
mod layout;
mod startup_systems;
mod systems;

pub use entities::{
    ActiveWindmill, MeshGroupRenderer, ShaderLibrary, Submesh, SubmeshMaterials, SurfaceShading,
    WindmillCommand, WindmillHost, WindmillRoot, WireframePlaceholder,
};
pub use layout::{BLADES_OFFSET, BODY_REVEAL_ORDER, PartShape, PartSpec, blade_parts, body_parts};

use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;

use crate::build::{BuildTiming, WIREFRAME_ON_SURFACE_SHADER};
use crate::rotation::{self, RotationDriver};

/// Per-plugin configuration for the windmill and its build sequence.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
pub struct WindmillConfig {
    /// Stage durations used by every build.
    pub timing: BuildTiming,
    /// Body slot revealed at each step; must be a permutation of the body's slots.
    pub body_reveal_order: Vec<usize>,
    /// Number of sails on the hub.
    pub sail_count: usize,
    /// Blade spin in degrees per second (0–360).
    pub rotation_speed: f32,
    /// Start a build as soon as the windmill is spawned.
    pub auto_build: bool,
    /// Tint of the wireframe placeholder material.
    pub wireframe_color: Color,
}

impl Default for WindmillConfig {
    fn default() -> Self {
        Self {
            timing: BuildTiming::default(),
            body_reveal_order: BODY_REVEAL_ORDER.to_vec(),
            sail_count: 4,
            rotation_speed: 50.0,
            auto_build: false,
            wireframe_color: Color::srgb(0.0, 0.6, 1.0),
        }
    }
}

/// Windmill spawning, build controller and blade spin.
pub struct WindmillPlugin(pub WindmillConfig);

impl Plugin for WindmillPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WindmillConfig>()
            .register_type::<WindmillRoot>()
            .register_type::<MeshGroupRenderer>()
            .register_type::<SubmeshMaterials>()
            .register_type::<Submesh>()
            .register_type::<RotationDriver>()
            .insert_resource(self.0.clone())
            .init_resource::<ShaderLibrary>()
            .add_message::<WindmillCommand>()
            .add_systems(
                Startup,
                (
                    startup_systems::spawn_windmill,
                    startup_systems::init_controller,
                )
                    .chain(),
            );
        add_build_systems(app);
    }

    fn finish(&self, app: &mut App) {
        // The edge overlay is drawn by Bevy's wireframe renderer.
        if app.is_plugin_added::<WireframePlugin>() {
            app.world_mut()
                .resource_mut::<ShaderLibrary>()
                .register(WIREFRAME_ON_SURFACE_SHADER, SurfaceShading::EdgeOverlay);
        } else {
            warn!("WireframePlugin not added, `{WIREFRAME_ON_SURFACE_SHADER}` is unavailable");
        }
    }
}

/// Per-frame build systems: requests, timeline, renderer sync, then blade spin.
fn add_build_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            systems::handle_commands,
            systems::tick_build,
            systems::sync_submeshes,
        )
            .chain(),
    )
    .add_systems(
        Update,
        rotation::spin_blades.after(systems::tick_build),
    );
}
