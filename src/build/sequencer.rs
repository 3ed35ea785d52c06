use std::fmt;

use bevy::log::{debug, info};
use bevy::prelude::Reflect;

use super::{BuildError, MaterialRenderer, MaterialStager, MeshGroup, ModelHost};

/// Stage durations of one build, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct BuildTiming {
    /// How long the model stays hidden before the reveal starts.
    pub pre_reveal_delay: f32,
    /// Time to reveal every body slot, split evenly between slots.
    pub body_reveal_duration: f32,
    /// Time to reveal every blade slot, split evenly between slots.
    pub blades_reveal_duration: f32,
}

impl Default for BuildTiming {
    fn default() -> Self {
        Self {
            pre_reveal_delay: 0.5,
            body_reveal_duration: 6.0,
            blades_reveal_duration: 2.0,
        }
    }
}

impl BuildTiming {
    /// Rejects negative, NaN or infinite durations.
    pub fn validate(&self) -> Result<(), BuildError> {
        let stages = [
            ("pre-reveal", self.pre_reveal_delay),
            ("body reveal", self.body_reveal_duration),
            ("blades reveal", self.blades_reveal_duration),
        ];
        for (stage, seconds) in stages {
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(BuildError::InvalidDuration { stage, seconds });
            }
        }
        Ok(())
    }

    /// Wall time from build start to completion.
    pub fn total(&self) -> f32 {
        self.pre_reveal_delay + self.body_reveal_duration + self.blades_reveal_duration
    }

    /// Reveal duration configured for `group`.
    pub fn reveal_duration(&self, group: MeshGroup) -> f32 {
        match group {
            MeshGroup::Body => self.body_reveal_duration,
            MeshGroup::Blades => self.blades_reveal_duration,
        }
    }
}

/// Where the build is.
///
/// `Hiding` and `Complete` are passed through within a single call; a caller
/// only ever observes `Idle`, `WaitingBeforeReveal` or `Revealing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildTimeline {
    /// No build running.
    #[default]
    Idle,
    /// Model hidden, rotation stopped, everything switched to wireframe.
    Hiding,
    /// Waiting out the pre-reveal delay.
    WaitingBeforeReveal,
    /// Waiting to reveal step `slot` of `group`.
    Revealing {
        /// Group being revealed.
        group: MeshGroup,
        /// Next reveal step (logical index).
        slot: usize,
    },
    /// Final restore and rotation start.
    Complete,
}

impl fmt::Display for BuildTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Hiding => f.write_str("hiding"),
            Self::WaitingBeforeReveal => f.write_str("waiting"),
            Self::Revealing { group, slot } => write!(f, "revealing {group} #{slot}"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Deterministic state machine for the staged reveal.
///
/// Each wait is a countdown in `stage_remaining`. [`BuildSequencer::tick`]
/// fires every stage the elapsed time covers and carries the overshoot into
/// the next one, so the outcome depends only on total elapsed time, not on how
/// it was sliced into frames. Starting a build replaces the timeline outright,
/// which is what cancels a build in flight.
#[derive(Debug, Default)]
pub struct BuildSequencer {
    timeline: BuildTimeline,
    timing: BuildTiming,
    stage_remaining: f32,
    generation: u32,
}

impl BuildSequencer {
    /// An idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    pub fn timeline(&self) -> BuildTimeline {
        self.timeline
    }

    /// `true` from `start_build` until the build completes.
    pub fn is_building(&self) -> bool {
        self.timeline != BuildTimeline::Idle
    }

    /// Number of builds started so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Seconds left before the current stage fires.
    pub fn stage_remaining(&self) -> f32 {
        self.stage_remaining.max(0.0)
    }

    /// (Re)starts the build: hides the model, stops and resets the rotation,
    /// switches everything to wireframe and begins the pre-reveal wait.
    ///
    /// A build already in flight is dropped; none of its pending stages fire.
    pub fn start_build<M, H>(
        &mut self,
        timing: BuildTiming,
        stager: &mut MaterialStager<M>,
        host: &mut H,
    ) -> Result<(), BuildError>
    where
        M: Clone,
        H: MaterialRenderer<M> + ModelHost,
    {
        timing.validate()?;
        if self.is_building() {
            debug!(
                "build #{} cancelled while {}",
                self.generation, self.timeline
            );
        }
        self.generation = self.generation.wrapping_add(1);
        self.timing = timing;

        self.timeline = BuildTimeline::Hiding;
        host.set_active(false);
        host.set_rotating(false);
        host.reset_rotation();
        stager.apply_full_wireframe(host);

        self.timeline = BuildTimeline::WaitingBeforeReveal;
        self.stage_remaining = timing.pre_reveal_delay;
        info!(
            "build #{} started, {:.2}s to completion",
            self.generation,
            timing.total()
        );
        Ok(())
    }

    /// Advances the build by `delta` seconds.
    pub fn tick<M, H>(&mut self, delta: f32, stager: &mut MaterialStager<M>, host: &mut H)
    where
        M: Clone,
        H: MaterialRenderer<M> + ModelHost,
    {
        if !self.is_building() {
            return;
        }
        self.stage_remaining -= delta.max(0.0);

        while self.stage_remaining <= 0.0 {
            match self.timeline {
                BuildTimeline::WaitingBeforeReveal => {
                    host.set_active(true);
                    self.begin_reveal(MeshGroup::Body, stager);
                }
                BuildTimeline::Revealing { group, slot } => {
                    stager.reveal_slot(group, slot, host);
                    if slot + 1 < stager.slot_count(group) {
                        self.timeline = BuildTimeline::Revealing {
                            group,
                            slot: slot + 1,
                        };
                        self.stage_remaining += self.slot_duration(group, stager);
                    } else if let Some(next) = group.next() {
                        self.begin_reveal(next, stager);
                    } else {
                        self.timeline = BuildTimeline::Complete;
                    }
                }
                BuildTimeline::Complete => {
                    // Full restore, independent of what the reveals left behind.
                    stager.apply_original(host);
                    host.set_rotating(true);
                    self.timeline = BuildTimeline::Idle;
                    self.stage_remaining = 0.0;
                    info!("build #{} complete", self.generation);
                }
                BuildTimeline::Idle | BuildTimeline::Hiding => break,
            }
        }
    }

    /// Enters the first non-empty group starting at `group`, or `Complete`.
    fn begin_reveal<M: Clone>(&mut self, group: MeshGroup, stager: &MaterialStager<M>) {
        let mut candidate = Some(group);
        while let Some(group) = candidate {
            if stager.slot_count(group) > 0 {
                self.timeline = BuildTimeline::Revealing { group, slot: 0 };
                self.stage_remaining += self.slot_duration(group, stager);
                return;
            }
            debug!("{group} has no slots, skipping its reveal");
            candidate = group.next();
        }
        self.timeline = BuildTimeline::Complete;
    }

    fn slot_duration<M: Clone>(&self, group: MeshGroup, stager: &MaterialStager<M>) -> f32 {
        self.timing.reveal_duration(group) / stager.slot_count(group) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::super::RevealOrder;
    use super::super::test_support::{BODY, FakeHost, WIRE};
    use super::*;

    const EPS: f32 = 1e-3;

    fn timing(pre: f32, body: f32, blades: f32) -> BuildTiming {
        BuildTiming {
            pre_reveal_delay: pre,
            body_reveal_duration: body,
            blades_reveal_duration: blades,
        }
    }

    fn setup(host: &FakeHost) -> (BuildSequencer, MaterialStager<&'static str>) {
        let mut stager = MaterialStager::new(WIRE).with_reveal_order(
            MeshGroup::Body,
            RevealOrder::permutation(vec![3, 4, 1, 2, 0]).unwrap(),
        );
        stager.capture_originals(host).unwrap();
        (BuildSequencer::new(), stager)
    }

    fn assert_fully_restored(host: &FakeHost, stager: &MaterialStager<&'static str>) {
        for group in MeshGroup::ALL {
            assert_eq!(host.shown(group), stager.originals(group), "{group}");
        }
        assert!(host.rotating);
        assert!(host.active);
    }

    // ── start ───────────────────────────────────────────────────────

    #[test]
    fn start_hides_model_and_switches_to_wireframe() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.start_build(timing(0.5, 6.0, 2.0), &mut stager, &mut host)
            .unwrap();

        assert!(!host.active);
        assert!(!host.rotating);
        assert_eq!(host.rotation_resets, 1);
        assert!(host.revealed(MeshGroup::Body).is_empty());
        assert!(host.revealed(MeshGroup::Blades).is_empty());
        assert_eq!(seq.timeline(), BuildTimeline::WaitingBeforeReveal);
        assert_eq!(seq.generation(), 1);
    }

    #[test]
    fn negative_duration_is_rejected_without_side_effects() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let err = seq
            .start_build(timing(0.5, -1.0, 2.0), &mut stager, &mut host)
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidDuration {
                stage: "body reveal",
                ..
            }
        ));
        assert!(host.active);
        assert_eq!(host.pushes, 0);
        assert!(!seq.is_building());
    }

    #[test]
    fn nan_duration_is_rejected() {
        assert!(timing(f32::NAN, 1.0, 1.0).validate().is_err());
        assert!(timing(0.0, 0.0, f32::INFINITY).validate().is_err());
        assert!(timing(0.0, 0.0, 0.0).validate().is_ok());
    }

    // ── waiting ─────────────────────────────────────────────────────

    #[test]
    fn model_stays_hidden_until_delay_elapses() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.start_build(timing(0.5, 5.0, 2.0), &mut stager, &mut host)
            .unwrap();

        seq.tick(0.4, &mut stager, &mut host);
        assert!(!host.active);
        seq.tick(0.1 + EPS, &mut stager, &mut host);
        assert!(host.active);
        assert_eq!(
            seq.timeline(),
            BuildTimeline::Revealing {
                group: MeshGroup::Body,
                slot: 0
            }
        );
        assert!(host.revealed(MeshGroup::Body).is_empty());
    }

    // ── reveal ──────────────────────────────────────────────────────

    #[test]
    fn four_fifths_of_body_reveals_shuffled_slots() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let body = 5.0;
        seq.start_build(timing(0.5, body, 2.0), &mut stager, &mut host)
            .unwrap();
        seq.tick(0.5, &mut stager, &mut host);

        seq.tick(4.0 * (body / 5.0) + EPS, &mut stager, &mut host);

        let mut revealed = host.revealed(MeshGroup::Body);
        revealed.sort_unstable();
        assert_eq!(revealed, vec![1, 2, 3, 4]);
        assert_eq!(host.shown(MeshGroup::Body)[0], WIRE);
        assert!(host.revealed(MeshGroup::Blades).is_empty());
    }

    #[test]
    fn blades_reveal_after_body_in_order() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.start_build(timing(0.0, 1.0, 1.0), &mut stager, &mut host)
            .unwrap();

        seq.tick(1.0 + 0.2 + 0.2 + EPS, &mut stager, &mut host);

        assert_eq!(host.revealed(MeshGroup::Body).len(), 5);
        assert_eq!(host.revealed(MeshGroup::Blades), vec![0, 1]);
        assert!(!host.rotating);
    }

    #[test]
    fn zero_body_duration_reveals_whole_body_at_once() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.start_build(timing(0.5, 0.0, 2.0), &mut stager, &mut host)
            .unwrap();

        seq.tick(0.5, &mut stager, &mut host);
        seq.tick(0.0, &mut stager, &mut host);

        assert_eq!(host.shown(MeshGroup::Body), BODY);
        assert!(host.revealed(MeshGroup::Blades).is_empty());
        assert_eq!(
            seq.timeline(),
            BuildTimeline::Revealing {
                group: MeshGroup::Blades,
                slot: 0
            }
        );
    }

    #[test]
    fn all_zero_durations_complete_on_first_tick() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.start_build(timing(0.0, 0.0, 0.0), &mut stager, &mut host)
            .unwrap();
        assert!(seq.is_building());

        seq.tick(0.0, &mut stager, &mut host);

        assert!(!seq.is_building());
        assert_fully_restored(&host, &stager);
    }

    #[test]
    fn empty_groups_skip_straight_to_completion() {
        let mut host = FakeHost::with_slots(vec![], vec![]);
        let mut stager = MaterialStager::new(WIRE);
        stager.capture_originals(&host).unwrap();
        let mut seq = BuildSequencer::new();
        seq.start_build(timing(0.25, 3.0, 3.0), &mut stager, &mut host)
            .unwrap();

        seq.tick(0.25, &mut stager, &mut host);

        assert!(!seq.is_building());
        assert!(host.active);
        assert!(host.rotating);
    }

    // ── completion ──────────────────────────────────────────────────

    #[test]
    fn full_duration_in_one_tick_restores_everything() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let t = timing(0.5, 6.0, 2.0);
        seq.start_build(t, &mut stager, &mut host).unwrap();

        seq.tick(t.total() + EPS, &mut stager, &mut host);

        assert_eq!(seq.timeline(), BuildTimeline::Idle);
        assert_fully_restored(&host, &stager);
    }

    #[test]
    fn frame_sized_ticks_match_single_tick() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let t = timing(0.5, 6.0, 2.0);
        seq.start_build(t, &mut stager, &mut host).unwrap();

        let frame = 1.0 / 60.0;
        let mut elapsed = 0.0;
        while elapsed < t.total() + 2.0 * frame {
            seq.tick(frame, &mut stager, &mut host);
            elapsed += frame;
        }

        assert!(!seq.is_building());
        assert_fully_restored(&host, &stager);
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        seq.tick(10.0, &mut stager, &mut host);
        assert_eq!(host.pushes, 0);
        assert_eq!(seq.generation(), 0);
    }

    // ── restart ─────────────────────────────────────────────────────

    #[test]
    fn restart_mid_reveal_rewinds_to_wireframe() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let t = timing(0.5, 5.0, 2.0);
        seq.start_build(t, &mut stager, &mut host).unwrap();
        seq.tick(0.5 + 2.0 + EPS, &mut stager, &mut host);
        assert_eq!(host.revealed(MeshGroup::Body).len(), 2);

        seq.start_build(t, &mut stager, &mut host).unwrap();

        assert_eq!(seq.generation(), 2);
        assert_eq!(seq.timeline(), BuildTimeline::WaitingBeforeReveal);
        assert!(host.revealed(MeshGroup::Body).is_empty());
        assert!(!host.active);
        assert_eq!(host.rotation_resets, 2);
    }

    #[test]
    fn restart_leaves_no_stale_wireframe_after_completion() {
        let mut host = FakeHost::windmill();
        let (mut seq, mut stager) = setup(&host);
        let t = timing(0.5, 5.0, 2.0);
        seq.start_build(t, &mut stager, &mut host).unwrap();
        seq.tick(3.7, &mut stager, &mut host);

        let shorter = timing(0.1, 1.0, 0.5);
        seq.start_build(shorter, &mut stager, &mut host).unwrap();
        seq.tick(shorter.total() + EPS, &mut stager, &mut host);

        assert!(!seq.is_building());
        assert_fully_restored(&host, &stager);

        // Nothing from the first build may fire afterwards.
        let pushes = host.pushes;
        seq.tick(t.total(), &mut stager, &mut host);
        assert_eq!(host.pushes, pushes);
    }
}
