use bevy::prelude::*;

/// Marker for the camera framing the windmill.
#[derive(Component, Reflect)]
pub struct ShowcaseCamera;

/// Marker for the ground plane under the windmill.
#[derive(Component, Reflect)]
pub struct Ground;
