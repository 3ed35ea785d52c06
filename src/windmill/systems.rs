use bevy::ecs::error::Result;
use bevy::pbr::wireframe::Wireframe;
use bevy::prelude::*;

use super::entities::{
    ActiveWindmill, MeshGroupRenderer, ShaderLibrary, Submesh, SubmeshMaterials, SurfaceShading,
    WindmillCommand, WindmillHost, WireframePlaceholder,
};

// ── Update: requests ───────────────────────────────────────────────

/// Applies overlay / mesh / build requests in arrival order.
pub fn handle_commands(
    mut requests: MessageReader<WindmillCommand>,
    mut windmill: ResMut<ActiveWindmill>,
    mut library: ResMut<ShaderLibrary>,
    mut host: WindmillHost,
) -> Result {
    for request in requests.read() {
        match request {
            WindmillCommand::ToggleOverlay => {
                windmill.toggle_overlay(&mut *library)?;
            }
            WindmillCommand::ToggleMesh => {
                windmill.toggle_mesh(&mut host);
            }
            WindmillCommand::StartBuilding => windmill.start_building(&mut host)?,
        }
    }
    Ok(())
}

// ── Update: build timeline ─────────────────────────────────────────

/// Advances a running build by the frame delta.
pub fn tick_build(time: Res<Time>, mut windmill: ResMut<ActiveWindmill>, mut host: WindmillHost) {
    if windmill.is_building() {
        windmill.tick(time.delta_secs(), &mut host);
    }
}

// ── Update: renderer sync ──────────────────────────────────────────

/// Copies each group's [`SubmeshMaterials`] onto its submesh entities and
/// adds or removes the [`Wireframe`] overlay.
///
/// A slot gets the overlay when it shows the placeholder, or when its
/// material was switched to [`SurfaceShading::EdgeOverlay`].
pub fn sync_submeshes(
    mut commands: Commands,
    groups: Query<(&MeshGroupRenderer, &SubmeshMaterials)>,
    library: Res<ShaderLibrary>,
    placeholder: Res<WireframePlaceholder>,
    mut submeshes: Query<(
        Entity,
        &Submesh,
        &mut MeshMaterial3d<StandardMaterial>,
        Has<Wireframe>,
    )>,
) {
    for (entity, submesh, mut material, has_wireframe) in &mut submeshes {
        let Some(handle) = groups
            .iter()
            .find(|(renderer, _)| renderer.group == submesh.group)
            .and_then(|(_, materials)| materials.0.get(submesh.slot))
        else {
            continue;
        };

        if material.0 != *handle {
            material.0 = handle.clone();
        }

        let wants_wireframe = *handle == placeholder.0
            || library.shading_of(handle.id()) == SurfaceShading::EdgeOverlay;
        match (wants_wireframe, has_wireframe) {
            (true, false) => {
                commands.entity(entity).insert(Wireframe);
            }
            (false, true) => {
                commands.entity(entity).remove::<Wireframe>();
            }
            _ => {}
        }
    }
}
