use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::build::{
    MaterialRenderer, MeshGroup, ModelHost, STANDARD_SHADER, ShaderRegistry, WindmillController,
};
use crate::rotation::RotationDriver;

/// Marker on the windmill's root entity; its visibility is the model's
/// active flag.
#[derive(Component, Reflect)]
pub struct WindmillRoot;

/// A mesh group entity. Its [`SubmeshMaterials`] is what the group renders.
#[derive(Component, Reflect)]
pub struct MeshGroupRenderer {
    /// Which group this entity renders.
    pub group: MeshGroup,
}

/// Whole material sequence of a mesh group, one handle per submesh slot.
///
/// Always replaced as a unit; [`super::systems::sync_submeshes`] copies it
/// onto the submesh entities.
#[derive(Component, Clone, Debug, Default, Reflect)]
pub struct SubmeshMaterials(pub Vec<Handle<StandardMaterial>>);

/// One material-bearing segment of a mesh group.
#[derive(Component, Reflect)]
pub struct Submesh {
    /// Owning group.
    pub group: MeshGroup,
    /// Slot index into the group's [`SubmeshMaterials`].
    pub slot: usize,
}

/// Shared placeholder material shown in slots that aren't revealed.
#[derive(Resource)]
pub struct WireframePlaceholder(pub Handle<StandardMaterial>);

/// The windmill's build controller over Bevy material handles.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveWindmill(pub WindmillController<Handle<StandardMaterial>>);

/// Requests from the UI layer.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindmillCommand {
    /// Flip the edge overlay on the original materials.
    ToggleOverlay,
    /// Flip between full wireframe and the original materials.
    ToggleMesh,
    /// (Re)start the construction sequence.
    StartBuilding,
}

/// How a material is shaded on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum SurfaceShading {
    /// Plain PBR surface.
    #[default]
    Solid,
    /// PBR surface with Bevy's wireframe drawn over it.
    EdgeOverlay,
}

/// Named shading modes plus the shading currently assigned per material.
///
/// Starts with only [`STANDARD_SHADER`]; the edge overlay is registered by
/// [`super::WindmillPlugin`] once a wireframe renderer is present.
#[derive(Resource)]
pub struct ShaderLibrary {
    shaders: HashMap<String, SurfaceShading>,
    assigned: HashMap<AssetId<StandardMaterial>, SurfaceShading>,
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        let mut library = Self {
            shaders: HashMap::new(),
            assigned: HashMap::new(),
        };
        library.register(STANDARD_SHADER, SurfaceShading::Solid);
        library
    }
}

impl ShaderLibrary {
    /// Makes `shading` available under `name`.
    pub fn register(&mut self, name: impl Into<String>, shading: SurfaceShading) {
        self.shaders.insert(name.into(), shading);
    }

    /// Shading assigned to a material; [`SurfaceShading::Solid`] when never set.
    pub fn shading_of(&self, material: AssetId<StandardMaterial>) -> SurfaceShading {
        self.assigned.get(&material).copied().unwrap_or_default()
    }
}

impl ShaderRegistry<Handle<StandardMaterial>> for ShaderLibrary {
    type Shader = SurfaceShading;

    fn find_shader(&self, name: &str) -> Option<SurfaceShading> {
        self.shaders.get(name).copied()
    }

    fn set_shader(&mut self, material: &Handle<StandardMaterial>, shader: &SurfaceShading) {
        self.assigned.insert(material.id(), *shader);
    }
}

/// ECS view the build controller drives: group material lists, root
/// visibility and the blade rotor.
#[derive(SystemParam)]
pub struct WindmillHost<'w, 's> {
    roots: Query<'w, 's, &'static mut Visibility, With<WindmillRoot>>,
    groups: Query<'w, 's, (&'static MeshGroupRenderer, &'static mut SubmeshMaterials)>,
    rotors: Query<'w, 's, (&'static mut RotationDriver, &'static mut Transform)>,
}

impl MaterialRenderer<Handle<StandardMaterial>> for WindmillHost<'_, '_> {
    fn materials(&self, group: MeshGroup) -> Vec<Handle<StandardMaterial>> {
        self.groups
            .iter()
            .find(|(renderer, _)| renderer.group == group)
            .map(|(_, materials)| materials.0.clone())
            .unwrap_or_default()
    }

    fn set_materials(&mut self, group: MeshGroup, materials: Vec<Handle<StandardMaterial>>) {
        if let Some((_, mut current)) = self
            .groups
            .iter_mut()
            .find(|(renderer, _)| renderer.group == group)
        {
            current.0 = materials;
        }
    }
}

impl ModelHost for WindmillHost<'_, '_> {
    fn set_active(&mut self, active: bool) {
        let visibility = if active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        for mut root in &mut self.roots {
            *root = visibility;
        }
    }

    fn set_rotating(&mut self, rotating: bool) {
        for (mut driver, _) in &mut self.rotors {
            driver.rotating = rotating;
        }
    }

    fn reset_rotation(&mut self) {
        for (driver, mut transform) in &mut self.rotors {
            driver.reset(&mut transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{
        BuildError, BuildTiming, MaterialStager, ShaderMode, WIREFRAME_ON_SURFACE_SHADER,
    };

    #[test]
    fn default_library_only_knows_standard() {
        let library = ShaderLibrary::default();
        assert_eq!(
            library.find_shader(STANDARD_SHADER),
            Some(SurfaceShading::Solid)
        );
        assert_eq!(library.find_shader(WIREFRAME_ON_SURFACE_SHADER), None);
        assert_eq!(library.find_shader("Unlit/Texture"), None);
    }

    #[test]
    fn overlay_needs_a_registered_edge_shader() {
        let mut materials = Assets::<StandardMaterial>::default();
        let placeholder = materials.add(StandardMaterial::default());
        let mut controller =
            WindmillController::new(MaterialStager::new(placeholder), BuildTiming::default());
        let mut library = ShaderLibrary::default();

        assert_eq!(
            controller.toggle_overlay(&mut library),
            Err(BuildError::MissingShader(WIREFRAME_ON_SURFACE_SHADER))
        );
        assert_eq!(controller.shader_mode(), ShaderMode::Standard);

        library.register(WIREFRAME_ON_SURFACE_SHADER, SurfaceShading::EdgeOverlay);
        assert_eq!(
            controller.toggle_overlay(&mut library),
            Ok(ShaderMode::WireframeOnSurface)
        );
    }

    #[test]
    fn shading_is_tracked_per_material() {
        let mut materials = Assets::<StandardMaterial>::default();
        let brick = materials.add(StandardMaterial::default());
        let glass = materials.add(StandardMaterial::default());
        let mut library = ShaderLibrary::default();

        library.set_shader(&brick, &SurfaceShading::EdgeOverlay);

        assert_eq!(library.shading_of(brick.id()), SurfaceShading::EdgeOverlay);
        assert_eq!(library.shading_of(glass.id()), SurfaceShading::Solid);
    }
}
