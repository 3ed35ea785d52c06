use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::VisualsConfig;
use super::entities::{Ground, ShowcaseCamera};

/// Spawns the camera, the sun and the ground plane.
pub fn setup_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<VisualsConfig>,
) {
    // Camera with bloom and tonemapping
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Transform::from_translation(cfg.camera_position).looking_at(cfg.camera_target, Vec3::Y),
        ShowcaseCamera,
    ));

    // Sun angled from above
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: cfg.sun_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -FRAC_PI_4, FRAC_PI_6, 0.0)),
    ));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(cfg.ground_size, cfg.ground_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cfg.ground_color,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Ground,
    ));
}
