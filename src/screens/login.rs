use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::{AnimatedProperty, Motion, SpringConfig, Vec2};
use crate::haptics::{HapticKind, Haptics};
use crate::playback::{ClipPlayback, CompositionHandle, LoopMode};
use crate::sequencer::{PropertyTarget, Sequencer, SequencerStatus};
use crate::timeline::{PhaseTimeline, TimelineStep};

/// Stages of the login intro narrative
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginPhase {
    /// Character walks in from off-screen, clip loops
    Walking,
    /// Character stops beside the card and waves
    Waving,
    /// Character drags off while the card springs into place
    Dragging,
}

/// Independently animated login attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoginProperty {
    CharacterX,
    CardOffsetY,
    CardScale,
}

/// When the card's "lock into place" pulse fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrivalFeedback {
    /// With the phase transition, as the card starts moving
    AtPhaseEntry,
    /// Once the card offset has settled
    AfterSettle,
}

const CHARACTER_CLIP: CompositionHandle = CompositionHandle("character_animation");
const CLIP_DURATION: Duration = Duration::from_millis(2000);

const CHARACTER_OFF_SCREEN: f32 = -200.0;
const CHARACTER_BESIDE_CARD: f32 = 20.0;
const CHARACTER_EXIT: f32 = 320.0;
const CARD_OFF_SCREEN: f32 = 1500.0;
const CARD_REST_SCALE: f32 = 0.9;

const CHARACTER_SPRING: SpringConfig = SpringConfig::new(
    SpringConfig::DAMPING_LOW_BOUNCE,
    SpringConfig::STIFFNESS_VERY_LOW,
);
const CARD_SCALE_SPRING: SpringConfig = SpringConfig::new(
    SpringConfig::DAMPING_HIGH_BOUNCE,
    SpringConfig::STIFFNESS_MEDIUM,
);
const TILT_SPRING: SpringConfig = SpringConfig::new(
    SpringConfig::DAMPING_MEDIUM_BOUNCE,
    SpringConfig::STIFFNESS_LOW,
);

/// Drag deltas are scaled down and clamped to this tilt range (degrees)
const TILT_LIMIT: f32 = 10.0;
const TILT_SCALE: f32 = 1.0 / 50.0;

/// Subtle breathing effect driven by clip progress
const BREATHING_DEPTH: f32 = 0.02;

/// Timing and motion choices that vary across design iterations
#[derive(Clone, Debug)]
pub struct LoginConfig {
    pub walk_hold: Duration,
    pub wave_hold: Duration,
    /// How the card enters on the terminal phase; the iterations split
    /// between spring physics and fixed-duration tweens
    pub card_entrance: Motion,
    pub arrival_feedback: ArrivalFeedback,
}

impl LoginConfig {
    pub fn walk_hold(mut self, hold: Duration) -> Self {
        self.walk_hold = hold;
        self
    }

    pub fn wave_hold(mut self, hold: Duration) -> Self {
        self.wave_hold = hold;
        self
    }

    pub fn card_entrance(mut self, motion: Motion) -> Self {
        self.card_entrance = motion;
        self
    }

    pub fn arrival_feedback(mut self, feedback: ArrivalFeedback) -> Self {
        self.arrival_feedback = feedback;
        self
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            walk_hold: Duration::from_millis(1200),
            wave_hold: Duration::from_millis(2800),
            card_entrance: Motion::spring(SpringConfig::new(
                SpringConfig::DAMPING_MEDIUM_BOUNCE,
                SpringConfig::STIFFNESS_LOW,
            )),
            arrival_feedback: ArrivalFeedback::AfterSettle,
        }
    }
}

/// Locally held, ephemeral credential state. Visually functional,
/// behaviorally inert: nothing validates or transmits these values.
#[derive(Clone, Debug, Default)]
pub struct CredentialForm {
    username: String,
    password: String,
    reveal_password: bool,
}

impl CredentialForm {
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn reveal_password(&self) -> bool {
        self.reveal_password
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_password = !self.reveal_password;
    }

    /// What the password field shows: plain text when revealed, one mask
    /// dot per character otherwise
    pub fn password_display(&self) -> String {
        if self.reveal_password {
            self.password.clone()
        } else {
            "\u{2022}".repeat(self.password.chars().count())
        }
    }
}

/// Per-frame snapshot for the render collaborator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoginView {
    pub character_x: f32,
    pub card_offset_y: f32,
    pub card_scale: f32,
    pub card_tilt: Vec2,
    pub breathing_scale: f32,
    pub clip_progress: f32,
}

/// The login screen's animation state: a walk/wave/drag narrative
/// sequencer plus the interactive extras layered on top (drag tilt,
/// breathing scale, the inert credential form).
pub struct LoginScreen {
    sequencer: Sequencer<LoginPhase, LoginProperty>,
    clip: Rc<RefCell<ClipPlayback>>,
    tilt: AnimatedProperty<Vec2>,
    haptics: Rc<RefCell<Box<dyn Haptics>>>,
    form: CredentialForm,
    arrival_feedback: ArrivalFeedback,
    arrival_fired: bool,
}

impl LoginScreen {
    pub fn new(config: LoginConfig, haptics: impl Haptics + 'static) -> Self {
        let haptics: Rc<RefCell<Box<dyn Haptics>>> = Rc::new(RefCell::new(Box::new(haptics)));
        let clip = Rc::new(RefCell::new(ClipPlayback::new(
            CHARACTER_CLIP,
            CLIP_DURATION,
        )));

        let timeline = PhaseTimeline::new(
            LoginPhase::Walking,
            vec![
                TimelineStep::after(config.walk_hold, LoginPhase::Waving)
                    .with_haptic(HapticKind::LongPress),
                TimelineStep::after(config.wave_hold, LoginPhase::Dragging)
                    .with_haptic(HapticKind::LongPress),
            ],
        );

        let card_entrance = config.card_entrance.clone();
        let sequencer_haptics = haptics.clone();
        let playback_clip = clip.clone();
        let sequencer = Sequencer::builder(timeline)
            .property(LoginProperty::CharacterX, CHARACTER_OFF_SCREEN)
            .property(LoginProperty::CardOffsetY, CARD_OFF_SCREEN)
            .property(LoginProperty::CardScale, CARD_REST_SCALE)
            .mapper(move |phase| targets_for(phase, &card_entrance))
            .haptics(move |kind: HapticKind| sequencer_haptics.borrow_mut().trigger(kind))
            .playback(loop_mode_for, move |mode| {
                playback_clip.borrow_mut().request(mode)
            })
            .build();

        Self {
            sequencer,
            clip,
            tilt: AnimatedProperty::new(Vec2::ZERO),
            haptics,
            form: CredentialForm::default(),
            arrival_feedback: config.arrival_feedback,
            arrival_fired: false,
        }
    }

    pub fn start(&mut self) {
        self.sequencer.start();
    }

    /// Advance by one frame delta
    pub fn update(&mut self, dt: Duration) {
        if self.sequencer.status() == SequencerStatus::Cancelled {
            return;
        }
        self.sequencer.tick(dt);
        self.clip.borrow_mut().sample(dt);
        self.tilt.sample(dt);

        if !self.arrival_fired && self.sequencer.phase() == LoginPhase::Dragging {
            let due = match self.arrival_feedback {
                ArrivalFeedback::AtPhaseEntry => true,
                ArrivalFeedback::AfterSettle => {
                    self.sequencer.is_settled(LoginProperty::CardOffsetY)
                }
            };
            if due {
                self.haptics.borrow_mut().trigger(HapticKind::LongPress);
                self.arrival_fired = true;
            }
        }
    }

    /// Stop everything; nothing fires afterwards
    pub fn unmount(&mut self) {
        self.sequencer.cancel();
    }

    pub fn phase(&self) -> LoginPhase {
        self.sequencer.phase()
    }

    pub fn status(&self) -> SequencerStatus {
        self.sequencer.status()
    }

    /// Tilt the card toward the drag direction
    pub fn drag(&mut self, delta: Vec2) {
        let target = Vec2::new(delta.x * TILT_SCALE, delta.y * TILT_SCALE)
            .clamp(-TILT_LIMIT, TILT_LIMIT);
        if let Err(err) = self.tilt.retarget(target, Motion::spring(TILT_SPRING)) {
            log::error!("tilt motion rejected: {err}");
        }
    }

    /// Let the card spring back upright
    pub fn release_drag(&mut self) {
        if let Err(err) = self.tilt.retarget(Vec2::ZERO, Motion::spring(TILT_SPRING)) {
            log::error!("tilt motion rejected: {err}");
        }
    }

    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CredentialForm {
        &mut self.form
    }

    /// The sign-in button: pulses feedback, nothing else happens
    pub fn submit(&mut self) {
        log::debug!("sign-in pressed (inert)");
        self.haptics.borrow_mut().trigger(HapticKind::Confirm);
    }

    pub fn view(&self) -> LoginView {
        let progress = self.clip.borrow().progress();
        LoginView {
            character_x: self
                .sequencer
                .value(LoginProperty::CharacterX)
                .unwrap_or(CHARACTER_OFF_SCREEN),
            card_offset_y: self
                .sequencer
                .value(LoginProperty::CardOffsetY)
                .unwrap_or(CARD_OFF_SCREEN),
            card_scale: self
                .sequencer
                .value(LoginProperty::CardScale)
                .unwrap_or(CARD_REST_SCALE),
            card_tilt: *self.tilt.current(),
            breathing_scale: 1.0 + progress * BREATHING_DEPTH,
            clip_progress: progress,
        }
    }
}

fn loop_mode_for(phase: LoginPhase) -> LoopMode {
    match phase {
        LoginPhase::Walking => LoopMode::Infinite,
        LoginPhase::Waving | LoginPhase::Dragging => LoopMode::Once,
    }
}

fn targets_for(phase: LoginPhase, card_entrance: &Motion) -> Vec<PropertyTarget<LoginProperty>> {
    let character = Motion::spring(CHARACTER_SPRING);
    match phase {
        LoginPhase::Walking => vec![PropertyTarget::new(
            LoginProperty::CharacterX,
            CHARACTER_OFF_SCREEN,
            character,
        )],
        LoginPhase::Waving => vec![PropertyTarget::new(
            LoginProperty::CharacterX,
            CHARACTER_BESIDE_CARD,
            character,
        )],
        LoginPhase::Dragging => vec![
            PropertyTarget::new(LoginProperty::CharacterX, CHARACTER_EXIT, character),
            PropertyTarget::new(
                LoginProperty::CardOffsetY,
                0.0,
                card_entrance.clone(),
            ),
            PropertyTarget::new(
                LoginProperty::CardScale,
                1.0,
                Motion::spring(CARD_SCALE_SPRING),
            ),
        ],
    }
}
