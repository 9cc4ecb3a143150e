use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use crate::animation::{AnimatedProperty, Motion};
use crate::haptics::{Haptics, NullHaptics};
use crate::playback::LoopMode;
use crate::timeline::{PhaseTimeline, SideEffect};

/// A target assignment produced by a state-to-target mapper
#[derive(Clone, Debug)]
pub struct PropertyTarget<K> {
    pub key: K,
    pub target: f32,
    pub motion: Motion,
}

impl<K> PropertyTarget<K> {
    pub fn new(key: K, target: f32, motion: Motion) -> Self {
        Self {
            key,
            target,
            motion,
        }
    }
}

/// Lifecycle of a sequencer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerStatus {
    /// Built but not started
    Idle,
    /// Timeline in progress
    Running,
    /// Terminal phase reached; properties may still be converging
    Completed,
    /// Torn down before completion; ticks are rejected
    Cancelled,
}

type TargetMapper<P, K> = Box<dyn Fn(P) -> Vec<PropertyTarget<K>>>;
type LoopModes<P> = Box<dyn Fn(P) -> LoopMode>;
type PlaybackSink = Box<dyn FnMut(LoopMode)>;

/// Builder for [`Sequencer`]
pub struct SequencerBuilder<P, K> {
    timeline: PhaseTimeline<P>,
    properties: HashMap<K, AnimatedProperty<f32>>,
    mapper: TargetMapper<P, K>,
    haptics: Box<dyn Haptics>,
    on_complete: Option<Box<dyn FnOnce()>>,
    loop_modes: Option<LoopModes<P>>,
    playback_sink: Option<PlaybackSink>,
}

impl<P, K> SequencerBuilder<P, K>
where
    P: Copy + PartialEq + fmt::Debug + 'static,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    pub fn new(timeline: PhaseTimeline<P>) -> Self {
        Self {
            timeline,
            properties: HashMap::new(),
            mapper: Box::new(|_| Vec::new()),
            haptics: Box::new(NullHaptics),
            on_complete: None,
            loop_modes: None,
            playback_sink: None,
        }
    }

    /// Register an animated property with its seed value
    pub fn property(mut self, key: K, seed: f32) -> Self {
        self.properties.insert(key, AnimatedProperty::new(seed));
        self
    }

    /// Pure function mapping each phase to target assignments. Properties
    /// a phase does not mention keep their previous target.
    pub fn mapper(mut self, mapper: impl Fn(P) -> Vec<PropertyTarget<K>> + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    /// Sink for the timeline's haptic side effects
    pub fn haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    /// Callback invoked exactly once when the terminal phase is reached
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Issue a composition playback request on every phase entry:
    /// `modes` picks the loop count for a phase, `sink` delivers the
    /// request to the playback engine.
    pub fn playback(
        mut self,
        modes: impl Fn(P) -> LoopMode + 'static,
        sink: impl FnMut(LoopMode) + 'static,
    ) -> Self {
        self.loop_modes = Some(Box::new(modes));
        self.playback_sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Sequencer<P, K> {
        Sequencer {
            timeline: self.timeline,
            properties: self.properties,
            mapper: self.mapper,
            haptics: self.haptics,
            on_complete: self.on_complete,
            loop_modes: self.loop_modes,
            playback_sink: self.playback_sink,
            status: SequencerStatus::Idle,
            hold_remaining: None,
        }
    }
}

/// Orchestrates one screen's intro choreography: owns a phase timeline
/// and a set of animated properties, and binds them together through a
/// state-to-target mapper.
///
/// The sequencer is driven externally: the host calls [`tick`] once per
/// rendered frame with the frame delta. Each tick counts down the current
/// phase's hold; on expiry the timeline advances, the mapper's targets
/// are pushed into the properties, the step's side effects fire in
/// declared order, and a playback request is reissued. Reaching the
/// terminal phase invokes the completion callback exactly once; in-flight
/// properties keep converging on subsequent ticks.
///
/// [`tick`]: Sequencer::tick
pub struct Sequencer<P, K> {
    timeline: PhaseTimeline<P>,
    properties: HashMap<K, AnimatedProperty<f32>>,
    mapper: TargetMapper<P, K>,
    haptics: Box<dyn Haptics>,
    on_complete: Option<Box<dyn FnOnce()>>,
    loop_modes: Option<LoopModes<P>>,
    playback_sink: Option<PlaybackSink>,
    status: SequencerStatus,
    /// Time left in the current phase; `None` once terminal
    hold_remaining: Option<Duration>,
}

impl<P, K> Sequencer<P, K>
where
    P: Copy + PartialEq + fmt::Debug + 'static,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    pub fn builder(timeline: PhaseTimeline<P>) -> SequencerBuilder<P, K> {
        SequencerBuilder::new(timeline)
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    /// The phase currently held by the timeline
    pub fn phase(&self) -> P {
        self.timeline.current_phase()
    }

    /// Current value of a registered property
    pub fn value(&self, key: K) -> Option<f32> {
        self.properties.get(&key).map(|prop| *prop.current())
    }

    /// Value a registered property is converging toward
    pub fn target(&self, key: K) -> Option<f32> {
        self.properties.get(&key).map(|prop| *prop.target())
    }

    /// Whether a registered property has finished converging
    pub fn is_settled(&self, key: K) -> bool {
        self.properties
            .get(&key)
            .map(|prop| prop.is_settled())
            .unwrap_or(false)
    }

    /// Begin the sequence: applies the initial phase's targets and arms
    /// the first hold. Calling `start` on a sequencer that is already
    /// running (or done) is a no-op, so a re-rendering host cannot spawn
    /// duplicate timelines.
    pub fn start(&mut self) {
        if self.status != SequencerStatus::Idle {
            log::debug!("sequencer start ignored, status {:?}", self.status);
            return;
        }
        self.status = SequencerStatus::Running;

        let phase = self.timeline.current_phase();
        log::debug!("sequence starting in phase {:?}", phase);
        self.apply_targets(phase);
        self.request_playback(phase);

        match self.timeline.next_hold() {
            Some(hold) => self.hold_remaining = Some(hold),
            None => self.finish(),
        }
    }

    /// Advance by one frame delta.
    ///
    /// Counts down the current hold (crossing several phase boundaries if
    /// `dt` is large) and samples every property. Sampling is segmented
    /// at phase boundaries, so a property retargeted by a boundary inside
    /// this tick only integrates the time that actually followed the
    /// retarget. After cancellation no samples are taken and no effects
    /// fire.
    pub fn tick(&mut self, dt: Duration) {
        match self.status {
            SequencerStatus::Running => {}
            SequencerStatus::Completed => {
                self.sample_all(dt);
                return;
            }
            SequencerStatus::Idle | SequencerStatus::Cancelled => return,
        }

        let mut budget = dt;
        while let Some(hold) = self.hold_remaining {
            if budget < hold {
                self.hold_remaining = Some(hold - budget);
                break;
            }
            self.sample_all(hold);
            budget -= hold;
            self.hold_remaining = None;
            self.advance_phase();
            if self.status != SequencerStatus::Running {
                break;
            }
        }

        self.sample_all(budget);
    }

    /// Tear down before completion: pending holds are dropped and no
    /// side effect or completion callback will ever fire.
    pub fn cancel(&mut self) {
        log::debug!("sequence cancelled in phase {:?}", self.phase());
        self.status = SequencerStatus::Cancelled;
        self.hold_remaining = None;
        self.on_complete = None;
    }

    fn advance_phase(&mut self) {
        let (phase, effects) = match self.timeline.advance() {
            Ok(step) => (step.next, step.effects.clone()),
            Err(err) => {
                // Unreachable while hold bookkeeping is correct
                log::error!("timeline advance failed: {err}");
                self.finish();
                return;
            }
        };

        log::debug!("phase -> {:?}", phase);
        self.apply_targets(phase);
        for effect in effects {
            match effect {
                SideEffect::Haptic(kind) => self.haptics.trigger(kind),
            }
        }
        self.request_playback(phase);

        if self.timeline.is_exhausted() {
            self.finish();
        } else {
            self.hold_remaining = self.timeline.next_hold();
        }
    }

    fn apply_targets(&mut self, phase: P) {
        for assignment in (self.mapper)(phase) {
            let PropertyTarget {
                key,
                target,
                motion,
            } = assignment;
            match self.properties.get_mut(&key) {
                Some(prop) => {
                    if let Err(err) = prop.retarget(target, motion) {
                        log::error!("property {:?}: motion rejected: {err}", key);
                    }
                }
                None => {
                    log::error!("mapper addressed unregistered property {:?}", key);
                }
            }
        }
    }

    fn request_playback(&mut self, phase: P) {
        if let (Some(modes), Some(sink)) = (&self.loop_modes, &mut self.playback_sink) {
            sink(modes(phase));
        }
    }

    fn sample_all(&mut self, dt: Duration) {
        for prop in self.properties.values_mut() {
            prop.sample(dt);
        }
    }

    fn finish(&mut self) {
        self.status = SequencerStatus::Completed;
        self.hold_remaining = None;
        log::debug!("sequence complete in phase {:?}", self.phase());
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;
    use crate::haptics::HapticKind;
    use crate::timeline::TimelineStep;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Stage {
        In,
        Mid,
        Out,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Prop {
        X,
        Fade,
    }

    fn timeline() -> PhaseTimeline<Stage> {
        PhaseTimeline::new(
            Stage::In,
            vec![
                TimelineStep::after(Duration::from_millis(100), Stage::Mid)
                    .with_haptic(HapticKind::LongPress),
                TimelineStep::after(Duration::from_millis(200), Stage::Out)
                    .with_haptic(HapticKind::LongPress),
            ],
        )
    }

    fn mapper(phase: Stage) -> Vec<PropertyTarget<Prop>> {
        let snap = Motion::tween(0.0, TimingFunction::Linear);
        match phase {
            Stage::In => vec![PropertyTarget::new(Prop::X, 1.0, snap)],
            Stage::Mid => vec![PropertyTarget::new(Prop::X, 2.0, snap)],
            Stage::Out => vec![
                PropertyTarget::new(Prop::X, 3.0, snap),
                PropertyTarget::new(Prop::Fade, 0.0, Motion::default()),
            ],
        }
    }

    fn build() -> (Sequencer<Stage, Prop>, Rc<RefCell<Vec<HapticKind>>>, Rc<RefCell<u32>>) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(RefCell::new(0));
        let fired_sink = fired.clone();
        let completions_sink = completions.clone();
        let sequencer = Sequencer::builder(timeline())
            .property(Prop::X, 0.0)
            .property(Prop::Fade, 1.0)
            .mapper(mapper)
            .haptics(move |kind: HapticKind| fired_sink.borrow_mut().push(kind))
            .on_complete(move || *completions_sink.borrow_mut() += 1)
            .build();
        (sequencer, fired, completions)
    }

    #[test]
    fn test_start_applies_initial_targets() {
        let (mut seq, fired, _) = build();
        assert_eq!(seq.status(), SequencerStatus::Idle);
        seq.start();
        assert_eq!(seq.status(), SequencerStatus::Running);
        assert_eq!(seq.phase(), Stage::In);
        assert_eq!(seq.value(Prop::X), Some(1.0));
        // Starting fires no step effects
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_phases_advance_on_hold_expiry() {
        let (mut seq, fired, completions) = build();
        seq.start();

        seq.tick(Duration::from_millis(99));
        assert_eq!(seq.phase(), Stage::In);

        seq.tick(Duration::from_millis(1));
        assert_eq!(seq.phase(), Stage::Mid);
        assert_eq!(fired.borrow().len(), 1);

        seq.tick(Duration::from_millis(200));
        assert_eq!(seq.phase(), Stage::Out);
        assert_eq!(seq.status(), SequencerStatus::Completed);
        assert_eq!(fired.borrow().len(), 2);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn test_large_tick_crosses_every_boundary() {
        let (mut seq, fired, completions) = build();
        seq.start();
        seq.tick(Duration::from_secs(5));
        assert_eq!(seq.phase(), Stage::Out);
        assert_eq!(fired.borrow().len(), 2);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut seq, fired, completions) = build();
        seq.start();
        seq.start();
        seq.tick(Duration::from_secs(1));
        seq.start();
        assert_eq!(fired.borrow().len(), 2);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn test_sampling_continues_after_completion() {
        let (mut seq, _, _) = build();
        seq.start();
        seq.tick(Duration::from_secs(1));
        assert_eq!(seq.status(), SequencerStatus::Completed);
        assert!(!seq.is_settled(Prop::Fade));

        for _ in 0..600 {
            seq.tick(Duration::from_millis(16));
        }
        assert!(seq.is_settled(Prop::Fade));
        assert_eq!(seq.value(Prop::Fade), Some(0.0));
    }

    #[test]
    fn test_cancel_silences_everything() {
        let (mut seq, fired, completions) = build();
        seq.start();
        seq.tick(Duration::from_millis(50));
        seq.cancel();

        let frozen = seq.value(Prop::X);
        seq.tick(Duration::from_secs(10));
        assert_eq!(seq.status(), SequencerStatus::Cancelled);
        assert_eq!(seq.value(Prop::X), frozen);
        assert!(fired.borrow().is_empty());
        assert_eq!(*completions.borrow(), 0);
    }

    #[test]
    fn test_unknown_mapper_key_is_skipped() {
        let mut seq: Sequencer<Stage, Prop> = Sequencer::builder(timeline())
            .property(Prop::X, 0.0)
            .mapper(|_| vec![PropertyTarget::new(Prop::Fade, 1.0, Motion::default())])
            .build();
        seq.start();
        seq.tick(Duration::from_secs(1));
        assert_eq!(seq.value(Prop::Fade), None);
        assert_eq!(seq.value(Prop::X), Some(0.0));
    }

    #[test]
    fn test_playback_requests_follow_phases() {
        let modes = Rc::new(RefCell::new(Vec::new()));
        let sink = modes.clone();
        let mut seq: Sequencer<Stage, Prop> = Sequencer::builder(timeline())
            .playback(
                |phase| match phase {
                    Stage::In => LoopMode::Infinite,
                    _ => LoopMode::Once,
                },
                move |mode| sink.borrow_mut().push(mode),
            )
            .build();
        seq.start();
        seq.tick(Duration::from_secs(1));
        assert_eq!(
            *modes.borrow(),
            vec![LoopMode::Infinite, LoopMode::Once, LoopMode::Once]
        );
    }
}
