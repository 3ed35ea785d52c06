//! Fake host for driving the build core without a renderer.

use std::collections::HashMap;

use super::{MaterialRenderer, MeshGroup, ModelHost, ShaderRegistry};

pub const WIRE: &str = "wire";

pub const BODY: [&str; 5] = ["roof", "upper", "gallery", "base", "lower"];
pub const BLADES: [&str; 5] = ["hub", "sail0", "sail1", "sail2", "sail3"];

/// Records everything the core pushes to the host.
pub struct FakeHost {
    pub renderers: [Vec<&'static str>; 2],
    pub pushes: usize,
    pub active: bool,
    pub rotating: bool,
    pub rotation_resets: usize,
}

impl FakeHost {
    pub fn windmill() -> Self {
        Self::with_slots(BODY.to_vec(), BLADES.to_vec())
    }

    pub fn with_slots(body: Vec<&'static str>, blades: Vec<&'static str>) -> Self {
        Self {
            renderers: [body, blades],
            pushes: 0,
            active: true,
            rotating: true,
            rotation_resets: 0,
        }
    }

    pub fn shown(&self, group: MeshGroup) -> &[&'static str] {
        &self.renderers[group.index()]
    }

    /// Physical slots of `group` currently showing their design material.
    pub fn revealed(&self, group: MeshGroup) -> Vec<usize> {
        self.shown(group)
            .iter()
            .enumerate()
            .filter(|(_, m)| **m != WIRE)
            .map(|(slot, _)| slot)
            .collect()
    }
}

impl MaterialRenderer<&'static str> for FakeHost {
    fn materials(&self, group: MeshGroup) -> Vec<&'static str> {
        self.renderers[group.index()].clone()
    }

    fn set_materials(&mut self, group: MeshGroup, materials: Vec<&'static str>) {
        assert_eq!(
            materials.len(),
            self.renderers[group.index()].len(),
            "material sequence length changed"
        );
        self.renderers[group.index()] = materials;
        self.pushes += 1;
    }
}

impl ModelHost for FakeHost {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_rotating(&mut self, rotating: bool) {
        self.rotating = rotating;
    }

    fn reset_rotation(&mut self) {
        self.rotation_resets += 1;
    }
}

/// Shader registry that knows a fixed set of names.
pub struct FakeShaders {
    pub known: Vec<&'static str>,
    pub assigned: HashMap<&'static str, &'static str>,
}

impl FakeShaders {
    pub fn with(known: &[&'static str]) -> Self {
        Self {
            known: known.to_vec(),
            assigned: HashMap::new(),
        }
    }
}

impl ShaderRegistry<&'static str> for FakeShaders {
    type Shader = &'static str;

    fn find_shader(&self, name: &str) -> Option<&'static str> {
        self.known.iter().copied().find(|known| *known == name)
    }

    fn set_shader(&mut self, material: &&'static str, shader: &&'static str) {
        self.assigned.insert(*material, *shader);
    }
}
