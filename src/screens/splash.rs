use std::time::Duration;

use crate::animation::{Motion, SpringConfig, TimingFunction};
use crate::sequencer::{PropertyTarget, Sequencer, SequencerStatus};
use crate::timeline::{PhaseTimeline, TimelineStep};

/// Stages of the splash intro
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashPhase {
    /// Logo faded out, gathering presence
    Resting,
    /// Logo pops to full size while the backdrop sweeps around
    Greeting,
    /// Terminal: fade away and hand off to the login screen
    Ready,
}

/// Independently animated splash attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplashProperty {
    LogoScale,
    LogoOpacity,
    LogoRotation,
}

const FADE_IN_MS: f32 = 2000.0;
const SWEEP_MS: f32 = 3000.0;
const FADE_OUT_MS: f32 = 1200.0;
/// The logo lingers at full presence before fading
const LINGER: Duration = Duration::from_millis(1500);

/// Phase holds for the splash timeline
#[derive(Clone, Copy, Debug)]
pub struct SplashConfig {
    pub rest_hold: Duration,
    pub greet_hold: Duration,
}

impl SplashConfig {
    pub fn rest_hold(mut self, hold: Duration) -> Self {
        self.rest_hold = hold;
        self
    }

    pub fn greet_hold(mut self, hold: Duration) -> Self {
        self.greet_hold = hold;
        self
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            rest_hold: Duration::from_millis(FADE_IN_MS as u64),
            greet_hold: Duration::from_millis(SWEEP_MS as u64) + LINGER,
        }
    }
}

/// Per-frame snapshot for the render collaborator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashView {
    pub scale: f32,
    pub opacity: f32,
    pub rotation: f32,
}

/// The splash screen's animation state: runs once, then invokes the
/// timeout callback so the host can switch to the login screen.
pub struct SplashScreen {
    sequencer: Sequencer<SplashPhase, SplashProperty>,
}

impl SplashScreen {
    pub fn new(config: SplashConfig, on_timeout: impl FnOnce() + 'static) -> Self {
        let timeline = PhaseTimeline::new(
            SplashPhase::Resting,
            vec![
                TimelineStep::after(config.rest_hold, SplashPhase::Greeting),
                TimelineStep::after(config.greet_hold, SplashPhase::Ready),
            ],
        );
        let sequencer = Sequencer::builder(timeline)
            .property(SplashProperty::LogoScale, 0.7)
            .property(SplashProperty::LogoOpacity, 0.0)
            .property(SplashProperty::LogoRotation, 0.0)
            .mapper(targets_for)
            .on_complete(on_timeout)
            .build();
        Self { sequencer }
    }

    pub fn start(&mut self) {
        self.sequencer.start();
    }

    /// Advance by one frame delta
    pub fn update(&mut self, dt: Duration) {
        self.sequencer.tick(dt);
    }

    /// Stop everything; no timeout callback will fire afterwards
    pub fn unmount(&mut self) {
        self.sequencer.cancel();
    }

    pub fn phase(&self) -> SplashPhase {
        self.sequencer.phase()
    }

    pub fn status(&self) -> SequencerStatus {
        self.sequencer.status()
    }

    /// The fade-out tween keeps converging after the terminal phase; the
    /// host can wait on this before tearing the splash down.
    pub fn is_faded_out(&self) -> bool {
        self.status() == SequencerStatus::Completed
            && self.sequencer.is_settled(SplashProperty::LogoOpacity)
    }

    pub fn view(&self) -> SplashView {
        SplashView {
            scale: self.sequencer.value(SplashProperty::LogoScale).unwrap_or(1.0),
            opacity: self
                .sequencer
                .value(SplashProperty::LogoOpacity)
                .unwrap_or(1.0),
            rotation: self
                .sequencer
                .value(SplashProperty::LogoRotation)
                .unwrap_or(0.0),
        }
    }
}

fn targets_for(phase: SplashPhase) -> Vec<PropertyTarget<SplashProperty>> {
    match phase {
        SplashPhase::Resting => vec![PropertyTarget::new(
            SplashProperty::LogoOpacity,
            1.0,
            Motion::tween(FADE_IN_MS, TimingFunction::ease_in_out_cubic()),
        )],
        SplashPhase::Greeting => vec![
            PropertyTarget::new(
                SplashProperty::LogoScale,
                1.0,
                Motion::spring(SpringConfig::new(
                    SpringConfig::DAMPING_LOW_BOUNCE,
                    SpringConfig::STIFFNESS_VERY_LOW,
                )),
            ),
            PropertyTarget::new(
                SplashProperty::LogoRotation,
                360.0,
                Motion::tween(SWEEP_MS, TimingFunction::ease_out_quart()),
            ),
        ],
        SplashPhase::Ready => vec![PropertyTarget::new(
            SplashProperty::LogoOpacity,
            0.0,
            Motion::tween(FADE_OUT_MS, TimingFunction::ease_in_cubic()),
        )],
    }
}
