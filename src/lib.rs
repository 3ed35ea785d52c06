#![warn(missing_docs)]
//! Windmill viewer with a staged construction reveal.
//!
//! The windmill's body and blades start as wireframe placeholders and their
//! design-time materials are revealed slot by slot on a configurable
//! timeline, after which the blades start to spin. An edge overlay and a
//! full-wireframe display can be toggled at any time.

pub mod build;
#[cfg(feature = "native")]
pub mod cli;
pub mod controls;
pub mod rotation;
pub mod visuals;
pub mod windmill;

use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Windmill view with keyboard shortcuts active.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}
