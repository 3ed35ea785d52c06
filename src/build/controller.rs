use bevy::log::{info, warn};

use super::{
    BuildError, BuildSequencer, BuildTimeline, BuildTiming, MaterialRenderer, MaterialStager,
    MeshGroup, ModelHost, ShaderMode, ShaderRegistry,
};

/// Material assignment used while no build is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Design-time materials.
    #[default]
    Normal,
    /// Placeholder material in every slot.
    FullWireframe,
}

impl DisplayMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::FullWireframe,
            Self::FullWireframe => Self::Normal,
        }
    }
}

/// The three public entry points (overlay, mesh toggle, build) over one
/// stager and one sequencer.
///
/// [`DisplayMode`] and [`ShaderMode`] are orthogonal. The shader swap applies
/// to the original materials wherever they happen to be visible. A running
/// build owns the material lists: a mesh toggle during a build only records
/// the mode, which is applied once the build completes.
#[derive(Debug)]
pub struct WindmillController<M> {
    stager: MaterialStager<M>,
    sequencer: BuildSequencer,
    timing: BuildTiming,
    display: DisplayMode,
    shading: ShaderMode,
}

impl<M: Clone> WindmillController<M> {
    /// Wraps a stager whose originals haven't been captured yet.
    pub fn new(stager: MaterialStager<M>, timing: BuildTiming) -> Self {
        Self {
            stager,
            sequencer: BuildSequencer::new(),
            timing,
            display: DisplayMode::Normal,
            shading: ShaderMode::Standard,
        }
    }

    /// Validates the timing and captures the renderer's design-time materials.
    pub fn init(&mut self, renderer: &impl MaterialRenderer<M>) -> Result<(), BuildError> {
        self.timing.validate()?;
        self.stager.capture_originals(renderer)?;
        info!(
            "windmill ready: {} body slots, {} blade slots",
            self.stager.slot_count(MeshGroup::Body),
            self.stager.slot_count(MeshGroup::Blades)
        );
        Ok(())
    }

    /// Flips the shader used by the original materials.
    pub fn toggle_overlay<R>(&mut self, registry: &mut R) -> Result<ShaderMode, BuildError>
    where
        R: ShaderRegistry<M>,
    {
        let mode = self.shading.toggled();
        self.stager.set_shader_mode(mode, registry)?;
        self.shading = mode;
        info!("shader mode: {mode:?}");
        Ok(mode)
    }

    /// Flips between full wireframe and the original materials.
    pub fn toggle_mesh(&mut self, renderer: &mut impl MaterialRenderer<M>) -> DisplayMode {
        self.display = self.display.toggled();
        if self.sequencer.is_building() {
            warn!(
                "display mode {:?} deferred until the build completes",
                self.display
            );
        } else {
            self.apply_display(renderer);
            info!("display mode: {:?}", self.display);
        }
        self.display
    }

    /// Restarts the construction sequence with the configured timing.
    pub fn start_building<H>(&mut self, host: &mut H) -> Result<(), BuildError>
    where
        H: MaterialRenderer<M> + ModelHost,
    {
        self.sequencer
            .start_build(self.timing, &mut self.stager, host)?;
        self.display = DisplayMode::Normal;
        Ok(())
    }

    /// Advances a running build by `delta` seconds.
    pub fn tick<H>(&mut self, delta: f32, host: &mut H)
    where
        H: MaterialRenderer<M> + ModelHost,
    {
        if !self.sequencer.is_building() {
            return;
        }
        self.sequencer.tick(delta, &mut self.stager, host);
        if !self.sequencer.is_building() && self.display == DisplayMode::FullWireframe {
            self.apply_display(host);
        }
    }

    /// Replaces the timing used by the next build.
    pub fn set_timing(&mut self, timing: BuildTiming) -> Result<(), BuildError> {
        timing.validate()?;
        self.timing = timing;
        Ok(())
    }

    fn apply_display(&mut self, renderer: &mut impl MaterialRenderer<M>) {
        match self.display {
            DisplayMode::Normal => self.stager.apply_original(renderer),
            DisplayMode::FullWireframe => self.stager.apply_full_wireframe(renderer),
        }
    }

    /// Materials `group` should be showing right now.
    pub fn current_materials(&self, group: MeshGroup) -> &[M] {
        self.stager.current(group)
    }

    /// Current mesh display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.display
    }

    /// Current shader mode of the original materials.
    pub fn shader_mode(&self) -> ShaderMode {
        self.shading
    }

    /// Current build stage.
    pub fn timeline(&self) -> BuildTimeline {
        self.sequencer.timeline()
    }

    /// Whether a build is running.
    pub fn is_building(&self) -> bool {
        self.sequencer.is_building()
    }

    /// The sequencer, for progress readouts.
    pub fn sequencer(&self) -> &BuildSequencer {
        &self.sequencer
    }

    /// Timing used by the next build.
    pub fn timing(&self) -> BuildTiming {
        self.timing
    }
}
