//! Staged "construction" reveal of the windmill's materials.
//!
//! Pure logic with no ECS access. The renderer, the model root and the shader
//! lookup are reached through the host traits below, so the whole timeline can
//! be driven from tests with simulated time. [`crate::windmill`] implements the
//! traits over Bevy queries.

mod controller;
mod error;
mod sequencer;
mod stager;

#[cfg(test)]
mod test_support;

pub use controller::{DisplayMode, WindmillController};
pub use error::BuildError;
pub use sequencer::{BuildSequencer, BuildTimeline, BuildTiming};
pub use stager::{
    MaterialStager, RevealOrder, STANDARD_SHADER, ShaderMode, WIREFRAME_ON_SURFACE_SHADER,
};

use std::fmt;

use bevy::prelude::Reflect;

/// A renderable sub-object of the windmill with its own material list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum MeshGroup {
    /// Tower, gallery and roof.
    Body,
    /// Hub and sails.
    Blades,
}

impl MeshGroup {
    /// Groups in reveal order.
    pub const ALL: [MeshGroup; 2] = [MeshGroup::Body, MeshGroup::Blades];

    /// Position of the group in [`MeshGroup::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Body => 0,
            Self::Blades => 1,
        }
    }

    /// The group revealed after this one, if any.
    pub const fn next(self) -> Option<MeshGroup> {
        match self {
            Self::Body => Some(Self::Blades),
            Self::Blades => None,
        }
    }
}

impl fmt::Display for MeshGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("body"),
            Self::Blades => f.write_str("blades"),
        }
    }
}

/// Per-group material sequences as seen by the host renderer.
///
/// `set_materials` must replace the whole sequence in one step so a reader
/// never observes a half-written list.
pub trait MaterialRenderer<M> {
    /// The materials currently assigned to `group`, one per submesh slot.
    fn materials(&self, group: MeshGroup) -> Vec<M>;
    /// Replaces the entire material sequence of `group`.
    fn set_materials(&mut self, group: MeshGroup, materials: Vec<M>);
}

/// Model-level switches the build sequence flips on the host.
pub trait ModelHost {
    /// Shows or hides the whole model.
    fn set_active(&mut self, active: bool);
    /// Enables or disables the blade spin.
    fn set_rotating(&mut self, rotating: bool);
    /// Restores the blades to their captured starting orientation.
    fn reset_rotation(&mut self);
}

/// Shader lookup plus the persistent shader swap on shared material objects.
pub trait ShaderRegistry<M> {
    /// Resolved shader reference.
    type Shader;

    /// Looks a shader up by name; `None` when the backend doesn't provide it.
    fn find_shader(&self, name: &str) -> Option<Self::Shader>;
    /// Makes `material` render with `shader` wherever it is used.
    fn set_shader(&mut self, material: &M, shader: &Self::Shader);
}
