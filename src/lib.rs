//! Scripted intro choreography for mobile-style screens.
//!
//! A screen's entrance is modelled as a fixed, forward-only sequence of
//! timed phases. Each phase pushes new targets into a set of
//! independently animated properties (spring physics or eased tweens),
//! pulses haptic feedback on transitions, and the terminal phase fires a
//! one-shot completion callback. The host's render loop drives
//! everything by calling `tick`/`update` once per frame with the frame
//! delta and polling current values — the crate has no dependency on any
//! particular UI runtime.
//!
//! Two ready-made screen variants ship in [`screens`]: a splash intro
//! (logo fade/pop/fade) that hands off to a login intro (character
//! walks in, waves, and drags the credential card into place).

pub mod animation;
pub mod haptics;
pub mod playback;
pub mod screens;
pub mod sequencer;
pub mod timeline;

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimatedProperty, Motion, MotionError, SpringConfig, SpringState,
        TimingFunction, Vec2,
    };
    pub use crate::haptics::{HapticKind, Haptics, NullHaptics};
    pub use crate::playback::{ClipPlayback, CompositionHandle, LoopMode};
    pub use crate::screens::login::{
        ArrivalFeedback, CredentialForm, LoginConfig, LoginPhase, LoginProperty, LoginScreen,
        LoginView,
    };
    pub use crate::screens::splash::{
        SplashConfig, SplashPhase, SplashProperty, SplashScreen, SplashView,
    };
    pub use crate::sequencer::{
        PropertyTarget, Sequencer, SequencerBuilder, SequencerStatus,
    };
    pub use crate::timeline::{PhaseTimeline, SideEffect, TimelineError, TimelineStep};
}
