use std::f32::consts::TAU;

use bevy::prelude::*;

/// Body slot revealed at each build step: foundation, lower tower, upper
/// tower, gallery, roof. The body's submeshes are authored in a different
/// order (see [`body_parts`]).
pub const BODY_REVEAL_ORDER: [usize; 5] = [3, 4, 1, 2, 0];

/// Hub position relative to the windmill root, in front of the gallery.
pub const BLADES_OFFSET: Vec3 = Vec3::new(0.0, 5.1, 1.65);

/// Distance from the hub centre to a sail's centre.
const SAIL_REACH: f32 = 1.45;

const STONE: Color = Color::srgb(0.55, 0.53, 0.5);
const PLASTER: Color = Color::srgb(0.86, 0.82, 0.74);
const TIMBER: Color = Color::srgb(0.42, 0.27, 0.16);
const ROOF_TILE: Color = Color::srgb(0.62, 0.16, 0.12);
const CANVAS: Color = Color::srgb(0.93, 0.92, 0.88);

/// Primitive a windmill part is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartShape {
    /// Axis-aligned box with the given full extents.
    Block(Vec3),
    /// Y-aligned cylinder.
    Column {
        /// Cylinder radius.
        radius: f32,
        /// Full height.
        height: f32,
    },
    /// Y-aligned cone, apex up.
    Spire {
        /// Base radius.
        radius: f32,
        /// Full height.
        height: f32,
    },
}

impl PartShape {
    /// Builds the mesh, centred on the origin.
    pub fn mesh(&self) -> Mesh {
        match *self {
            Self::Block(size) => Cuboid::from_size(size).into(),
            Self::Column { radius, height } => Cylinder::new(radius, height).into(),
            Self::Spire { radius, height } => Cone { radius, height }.into(),
        }
    }
}

/// One submesh slot of the procedural windmill.
#[derive(Clone, Debug, PartialEq)]
pub struct PartSpec {
    /// Entity name.
    pub name: &'static str,
    /// Geometry.
    pub shape: PartShape,
    /// Centre relative to the owning group.
    pub offset: Vec3,
    /// Rotation about the group's Z axis (radians).
    pub roll: f32,
    /// Base colour of the design-time material.
    pub color: Color,
}

impl PartSpec {
    const fn new(name: &'static str, shape: PartShape, offset: Vec3, color: Color) -> Self {
        Self {
            name,
            shape,
            offset,
            roll: 0.0,
            color,
        }
    }

    /// Local transform of the part entity.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.offset).with_rotation(Quat::from_rotation_z(self.roll))
    }

    /// Design-time material.
    pub fn material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.color,
            perceptual_roughness: 0.85,
            ..default()
        }
    }
}

/// Body submeshes in authoring (slot) order, not build order.
pub fn body_parts() -> Vec<PartSpec> {
    vec![
        PartSpec::new(
            "Roof",
            PartShape::Spire {
                radius: 1.6,
                height: 1.4,
            },
            Vec3::new(0.0, 6.3, 0.0),
            ROOF_TILE,
        ),
        PartSpec::new(
            "Upper tower",
            PartShape::Column {
                radius: 1.1,
                height: 2.0,
            },
            Vec3::new(0.0, 3.6, 0.0),
            PLASTER,
        ),
        PartSpec::new(
            "Gallery",
            PartShape::Block(Vec3::new(3.0, 1.0, 3.0)),
            Vec3::new(0.0, 5.1, 0.0),
            TIMBER,
        ),
        PartSpec::new(
            "Foundation",
            PartShape::Block(Vec3::new(3.6, 0.4, 3.6)),
            Vec3::new(0.0, 0.2, 0.0),
            STONE,
        ),
        PartSpec::new(
            "Lower tower",
            PartShape::Column {
                radius: 1.4,
                height: 2.2,
            },
            Vec3::new(0.0, 1.5, 0.0),
            STONE,
        ),
    ]
}

/// Hub followed by `sails` evenly spaced sails, relative to [`BLADES_OFFSET`].
pub fn blade_parts(sails: usize) -> Vec<PartSpec> {
    let hub = PartSpec::new(
        "Hub",
        PartShape::Block(Vec3::new(0.5, 0.5, 0.3)),
        Vec3::ZERO,
        TIMBER,
    );
    let sail_shape = PartShape::Block(Vec3::new(0.45, 2.4, 0.06));
    let sails = (0..sails).map(|i| {
        let roll = i as f32 * TAU / sails as f32;
        PartSpec {
            roll,
            ..PartSpec::new(
                "Sail",
                sail_shape,
                Quat::from_rotation_z(roll) * Vec3::new(0.0, SAIL_REACH, 0.0),
                CANVAS,
            )
        }
    });
    std::iter::once(hub).chain(sails).collect()
}
