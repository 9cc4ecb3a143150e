use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use overture::prelude::*;

const FRAME: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Walking,
    Waving,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Prop {
    CharacterX,
    CardOffsetY,
}

fn intro_timeline() -> PhaseTimeline<Phase> {
    PhaseTimeline::new(
        Phase::Walking,
        vec![
            TimelineStep::after(Duration::from_millis(1000), Phase::Waving)
                .with_haptic(HapticKind::LongPress),
            TimelineStep::after(Duration::from_millis(2500), Phase::Dragging)
                .with_haptic(HapticKind::LongPress),
        ],
    )
}

fn intro_mapper(phase: Phase) -> Vec<PropertyTarget<Prop>> {
    let walk = Motion::spring(SpringConfig::new(
        SpringConfig::DAMPING_LOW_BOUNCE,
        SpringConfig::STIFFNESS_VERY_LOW,
    ));
    match phase {
        Phase::Walking => vec![PropertyTarget::new(Prop::CharacterX, -200.0, walk)],
        Phase::Waving => vec![PropertyTarget::new(Prop::CharacterX, 20.0, walk)],
        Phase::Dragging => vec![
            PropertyTarget::new(Prop::CharacterX, 320.0, walk),
            PropertyTarget::new(Prop::CardOffsetY, 0.0, Motion::default()),
        ],
    }
}

fn intro_sequencer() -> (
    Sequencer<Phase, Prop>,
    Rc<RefCell<Vec<HapticKind>>>,
    Rc<RefCell<u32>>,
) {
    let fired = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(RefCell::new(0u32));
    let fired_sink = fired.clone();
    let completions_sink = completions.clone();
    let sequencer = Sequencer::builder(intro_timeline())
        .property(Prop::CharacterX, -200.0)
        .property(Prop::CardOffsetY, 1500.0)
        .mapper(intro_mapper)
        .haptics(move |kind: HapticKind| fired_sink.borrow_mut().push(kind))
        .on_complete(move || *completions_sink.borrow_mut() += 1)
        .build();
    (sequencer, fired, completions)
}

#[test]
fn intro_sequence_end_to_end() {
    let (mut sequencer, fired, completions) = intro_sequencer();
    sequencer.start();
    assert_eq!(sequencer.phase(), Phase::Walking);

    // 20 x 50 ms = 1000 ms: waving begins with one pulse
    for _ in 0..20 {
        sequencer.tick(FRAME);
    }
    assert_eq!(sequencer.phase(), Phase::Waving);
    assert_eq!(*fired.borrow(), vec![HapticKind::LongPress]);
    assert_eq!(*completions.borrow(), 0);

    // 50 more frames, 3500 ms total: terminal phase, second pulse, one
    // completion; the card is now converging on its settled position
    for _ in 0..50 {
        sequencer.tick(FRAME);
    }
    assert_eq!(sequencer.phase(), Phase::Dragging);
    assert_eq!(sequencer.status(), SequencerStatus::Completed);
    assert_eq!(
        *fired.borrow(),
        vec![HapticKind::LongPress, HapticKind::LongPress]
    );
    assert_eq!(*completions.borrow(), 1);
    assert_eq!(sequencer.target(Prop::CardOffsetY), Some(0.0));

    // In-flight convergence finishes after completion
    for _ in 0..200 {
        sequencer.tick(FRAME);
    }
    assert_eq!(sequencer.value(Prop::CardOffsetY), Some(0.0));
    assert!(sequencer.is_settled(Prop::CharacterX));
    assert_eq!(sequencer.value(Prop::CharacterX), Some(320.0));

    // Completion stays exactly-once no matter how long the host keeps ticking
    assert_eq!(*completions.borrow(), 1);
}

#[test]
fn start_is_idempotent_across_the_run() {
    let (mut sequencer, fired, completions) = intro_sequencer();
    sequencer.start();
    sequencer.start();
    for _ in 0..40 {
        sequencer.tick(FRAME);
    }
    sequencer.start();
    for _ in 0..40 {
        sequencer.tick(FRAME);
    }
    sequencer.start();

    assert_eq!(fired.borrow().len(), 2);
    assert_eq!(*completions.borrow(), 1);
}

#[test]
fn cancellation_before_first_advance_silences_everything() {
    let (mut sequencer, fired, completions) = intro_sequencer();
    sequencer.start();

    // 500 ms in, the hosting screen unmounts
    for _ in 0..10 {
        sequencer.tick(FRAME);
    }
    sequencer.cancel();
    let frozen = sequencer.value(Prop::CharacterX);

    for _ in 0..200 {
        sequencer.tick(FRAME);
    }
    assert_eq!(sequencer.status(), SequencerStatus::Cancelled);
    assert!(fired.borrow().is_empty());
    assert_eq!(*completions.borrow(), 0);
    assert_eq!(sequencer.value(Prop::CharacterX), frozen);
}

#[test]
fn splash_hands_off_to_login() {
    // The app shell: splash runs once, its timeout callback swaps in the
    // login screen, whose own intro then runs to rest.
    let handoff = Rc::new(Cell::new(false));
    let flag = handoff.clone();
    let mut splash = SplashScreen::new(SplashConfig::default(), move || flag.set(true));
    splash.start();

    let mut guard = 0;
    while !splash.is_faded_out() {
        splash.update(FRAME);
        guard += 1;
        assert!(guard < 1000, "splash never faded out");
    }
    assert!(handoff.get());
    assert_eq!(splash.phase(), SplashPhase::Ready);

    let mut login = LoginScreen::new(LoginConfig::default(), NullHaptics);
    login.start();
    let mut guard = 0;
    loop {
        login.update(FRAME);
        guard += 1;
        let view = login.view();
        if login.status() == SequencerStatus::Completed
            && view.card_offset_y == 0.0
            && view.card_scale == 1.0
        {
            break;
        }
        assert!(guard < 2000, "login intro never settled");
    }
    assert_eq!(login.phase(), LoginPhase::Dragging);
}
