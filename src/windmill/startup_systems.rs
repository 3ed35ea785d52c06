use bevy::ecs::error::Result;
use bevy::prelude::*;

use super::WindmillConfig;
use super::entities::{
    ActiveWindmill, MeshGroupRenderer, Submesh, SubmeshMaterials, WindmillCommand, WindmillHost,
    WindmillRoot, WireframePlaceholder,
};
use super::layout::{self, PartSpec};
use crate::build::{MaterialStager, MeshGroup, RevealOrder, WindmillController};
use crate::rotation::RotationDriver;

/// Spawns the procedural windmill and the shared placeholder material.
///
/// Hierarchy: `WindmillRoot` → one [`MeshGroupRenderer`] per group → one
/// [`Submesh`] per slot. The blades group also carries the [`RotationDriver`].
pub fn spawn_windmill(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<WindmillConfig>,
) {
    let placeholder = materials.add(StandardMaterial {
        base_color: cfg.wireframe_color.with_alpha(0.06),
        emissive: cfg.wireframe_color.to_linear() * 0.5,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.insert_resource(WireframePlaceholder(placeholder));

    let root = commands
        .spawn((
            Name::new("Windmill"),
            WindmillRoot,
            Transform::default(),
            Visibility::Visible,
        ))
        .id();

    spawn_group(
        &mut commands,
        root,
        MeshGroup::Body,
        Transform::default(),
        &layout::body_parts(),
        &mut meshes,
        &mut materials,
    );

    let blades_tf = Transform::from_translation(layout::BLADES_OFFSET);
    let blades = spawn_group(
        &mut commands,
        root,
        MeshGroup::Blades,
        blades_tf,
        &layout::blade_parts(cfg.sail_count),
        &mut meshes,
        &mut materials,
    );
    commands
        .entity(blades)
        .insert(RotationDriver::new(cfg.rotation_speed, blades_tf.rotation));
}

fn spawn_group(
    commands: &mut Commands,
    root: Entity,
    group: MeshGroup,
    transform: Transform,
    parts: &[PartSpec],
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let handles: Vec<Handle<StandardMaterial>> = parts
        .iter()
        .map(|part| materials.add(part.material()))
        .collect();

    let group_entity = commands
        .spawn((
            Name::new(format!("{group}")),
            MeshGroupRenderer { group },
            SubmeshMaterials(handles.clone()),
            transform,
            Visibility::Inherited,
        ))
        .id();

    let submeshes: Vec<Entity> = parts
        .iter()
        .zip(handles)
        .enumerate()
        .map(|(slot, (part, material))| {
            commands
                .spawn((
                    Name::new(format!("{} {slot}", part.name)),
                    Submesh { group, slot },
                    Mesh3d(meshes.add(part.shape.mesh())),
                    MeshMaterial3d(material),
                    part.transform(),
                ))
                .id()
        })
        .collect();
    commands.entity(group_entity).add_children(&submeshes);
    commands.entity(root).add_child(group_entity);
    group_entity
}

/// Captures the spawned materials as originals and installs [`ActiveWindmill`].
///
/// A reveal order that doesn't fit the spawned model is a hard failure.
pub fn init_controller(
    mut commands: Commands,
    cfg: Res<WindmillConfig>,
    placeholder: Res<WireframePlaceholder>,
    host: WindmillHost,
    mut requests: MessageWriter<WindmillCommand>,
) -> Result {
    let body_order = RevealOrder::permutation(cfg.body_reveal_order.clone())?;
    let stager = MaterialStager::new(placeholder.0.clone())
        .with_reveal_order(MeshGroup::Body, body_order);
    let mut controller = WindmillController::new(stager, cfg.timing);
    controller.init(&host)?;
    commands.insert_resource(ActiveWindmill(controller));

    if cfg.auto_build {
        requests.write(WindmillCommand::StartBuilding);
    }
    Ok(())
}
