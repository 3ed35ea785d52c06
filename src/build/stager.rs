use bevy::log::debug;

use super::{BuildError, MaterialRenderer, MeshGroup, ShaderRegistry};

/// Shader name for the edge-overlay look.
pub const WIREFRAME_ON_SURFACE_SHADER: &str = "Lit/WireframeOnSurfaceShader";
/// Shader name for plain solid shading.
pub const STANDARD_SHADER: &str = "Standard";

/// Which shader the original materials render with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShaderMode {
    /// Solid shading.
    #[default]
    Standard,
    /// Solid shading with the mesh edges drawn on top.
    WireframeOnSurface,
}

impl ShaderMode {
    /// Name looked up in the [`ShaderRegistry`].
    pub const fn shader_name(self) -> &'static str {
        match self {
            Self::Standard => STANDARD_SHADER,
            Self::WireframeOnSurface => WIREFRAME_ON_SURFACE_SHADER,
        }
    }

    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::WireframeOnSurface,
            Self::WireframeOnSurface => Self::Standard,
        }
    }
}

/// Maps reveal step `i` to the physical submesh slot revealed at that step.
///
/// The windmill body's submeshes were authored out of build order, so the
/// body carries a fixed correction table; the blades use [`RevealOrder::identity`].
/// A table can only be built through [`RevealOrder::permutation`], so every
/// non-identity order is a valid permutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealOrder {
    table: Option<Box<[usize]>>,
}

impl RevealOrder {
    /// Step `i` reveals slot `i`, for any slot count.
    pub const fn identity() -> Self {
        Self { table: None }
    }

    /// Step `i` reveals slot `order[i]`.
    ///
    /// Fails unless `order` is a permutation of `0..order.len()`.
    pub fn permutation(order: Vec<usize>) -> Result<Self, BuildError> {
        let mut seen = vec![false; order.len()];
        let valid = order.iter().all(|&slot| match seen.get_mut(slot) {
            Some(taken) if !*taken => {
                *taken = true;
                true
            }
            _ => false,
        });
        if !valid {
            return Err(BuildError::RevealOrderNotPermutation { order });
        }
        Ok(Self {
            table: Some(order.into_boxed_slice()),
        })
    }

    /// Physical slot revealed at step `logical`.
    pub fn physical_slot(&self, logical: usize) -> usize {
        match &self.table {
            None => logical,
            Some(table) => table[logical],
        }
    }

    fn check_len(&self, group: MeshGroup, slot_count: usize) -> Result<(), BuildError> {
        match &self.table {
            Some(table) if table.len() != slot_count => Err(BuildError::RevealOrderLength {
                group,
                order_len: table.len(),
                slot_count,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug)]
struct GroupSlots<M> {
    originals: Vec<M>,
    current: Vec<M>,
    order: RevealOrder,
}

impl<M> Default for GroupSlots<M> {
    fn default() -> Self {
        Self {
            originals: Vec::new(),
            current: Vec::new(),
            order: RevealOrder::identity(),
        }
    }
}

/// Sole owner of the original and in-progress material lists of both groups.
///
/// Every change is pushed to the renderer as a whole sequence, so the
/// renderer's list length always equals the group's slot count.
#[derive(Clone, Debug)]
pub struct MaterialStager<M> {
    wireframe: M,
    groups: [GroupSlots<M>; 2],
}

impl<M: Clone> MaterialStager<M> {
    /// A stager that fills hidden slots with `wireframe`.
    pub fn new(wireframe: M) -> Self {
        Self {
            wireframe,
            groups: [GroupSlots::default(), GroupSlots::default()],
        }
    }

    /// Sets the reveal order used by [`MaterialStager::reveal_slot`] for `group`.
    pub fn with_reveal_order(mut self, group: MeshGroup, order: RevealOrder) -> Self {
        self.groups[group.index()].order = order;
        self
    }

    /// Reads the design-time materials of both groups as the originals.
    ///
    /// Fails without touching any state when a reveal order doesn't match its
    /// group's slot count.
    pub fn capture_originals(
        &mut self,
        renderer: &impl MaterialRenderer<M>,
    ) -> Result<(), BuildError> {
        let captured = MeshGroup::ALL.map(|group| renderer.materials(group));
        for (group, originals) in MeshGroup::ALL.iter().zip(&captured) {
            self.groups[group.index()]
                .order
                .check_len(*group, originals.len())?;
        }
        for (slots, originals) in self.groups.iter_mut().zip(captured) {
            slots.current = originals.clone();
            slots.originals = originals;
        }
        Ok(())
    }

    /// Puts the placeholder material in every slot of both groups.
    pub fn apply_full_wireframe(&mut self, renderer: &mut impl MaterialRenderer<M>) {
        for group in MeshGroup::ALL {
            let slots = &mut self.groups[group.index()];
            slots.current.fill(self.wireframe.clone());
            renderer.set_materials(group, slots.current.clone());
        }
    }

    /// Pushes the original sequences of both groups.
    pub fn apply_original(&mut self, renderer: &mut impl MaterialRenderer<M>) {
        for group in MeshGroup::ALL {
            let slots = &mut self.groups[group.index()];
            slots.current.clone_from(&slots.originals);
            renderer.set_materials(group, slots.originals.clone());
        }
    }

    /// Restores the slot at reveal step `logical_index` of `group` and
    /// re-pushes the group's whole sequence.
    ///
    /// # Panics
    /// When `logical_index` is not below the group's slot count.
    pub fn reveal_slot(
        &mut self,
        group: MeshGroup,
        logical_index: usize,
        renderer: &mut impl MaterialRenderer<M>,
    ) {
        let slots = &mut self.groups[group.index()];
        let slot_count = slots.originals.len();
        assert!(
            logical_index < slot_count,
            "reveal step {logical_index} out of range for {group} ({slot_count} slots)"
        );
        let physical = slots.order.physical_slot(logical_index);
        slots.current[physical] = slots.originals[physical].clone();
        renderer.set_materials(group, slots.current.clone());
        debug!("revealed {group} slot {physical} (step {logical_index})");
    }

    /// Swaps the shader of every original material to the one for `mode`.
    ///
    /// The placeholder material is left alone.
    pub fn set_shader_mode<R>(&self, mode: ShaderMode, registry: &mut R) -> Result<(), BuildError>
    where
        R: ShaderRegistry<M>,
    {
        let name = mode.shader_name();
        let shader = registry
            .find_shader(name)
            .ok_or(BuildError::MissingShader(name))?;
        for material in self.groups.iter().flat_map(|slots| &slots.originals) {
            registry.set_shader(material, &shader);
        }
        Ok(())
    }

    /// Number of submesh slots captured for `group`.
    pub fn slot_count(&self, group: MeshGroup) -> usize {
        self.groups[group.index()].originals.len()
    }

    /// Design-time materials of `group`.
    pub fn originals(&self, group: MeshGroup) -> &[M] {
        &self.groups[group.index()].originals
    }

    /// Materials `group` is currently showing.
    pub fn current(&self, group: MeshGroup) -> &[M] {
        &self.groups[group.index()].current
    }

    /// The shared placeholder material.
    pub fn wireframe(&self) -> &M {
        &self.wireframe
    }
}
