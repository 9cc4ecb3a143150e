use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::haptics::HapticKind;

/// One-shot effect fired when the timeline enters a step's phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideEffect {
    Haptic(HapticKind),
}

/// One step of a phase timeline: hold the current phase for `hold`, then
/// enter `next`, firing `effects` in declared order.
#[derive(Clone, Debug)]
pub struct TimelineStep<P> {
    /// How long the preceding phase holds before this step begins
    pub hold: Duration,
    /// Phase entered when the hold expires
    pub next: P,
    /// Effects fired on entry, in order
    pub effects: Vec<SideEffect>,
}

impl<P> TimelineStep<P> {
    /// Step into `next` after holding the previous phase for `hold`
    pub fn after(hold: Duration, next: P) -> Self {
        Self {
            hold,
            next,
            effects: Vec::new(),
        }
    }

    /// Add a haptic pulse to this step's entry effects
    pub fn with_haptic(mut self, kind: HapticKind) -> Self {
        self.effects.push(SideEffect::Haptic(kind));
        self
    }
}

/// Advancing past the terminal phase is a programming-logic fault
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("phase timeline advanced past its terminal phase")]
    Exhausted,
}

/// An ordered, immutable sequence of timed phases.
///
/// The timeline is a passive state holder: it never schedules itself. The
/// owning sequencer waits out each step's hold and calls [`advance`],
/// which moves strictly forward — phases are never revisited or skipped.
///
/// [`advance`]: PhaseTimeline::advance
#[derive(Clone, Debug)]
pub struct PhaseTimeline<P> {
    initial: P,
    steps: Vec<TimelineStep<P>>,
    /// Number of steps already taken
    position: usize,
}

impl<P: Copy + PartialEq + fmt::Debug> PhaseTimeline<P> {
    /// Build a timeline starting at `initial` with a fixed step sequence
    pub fn new(initial: P, steps: Vec<TimelineStep<P>>) -> Self {
        Self {
            initial,
            steps,
            position: 0,
        }
    }

    /// The phase currently held
    pub fn current_phase(&self) -> P {
        if self.position == 0 {
            self.initial
        } else {
            self.steps[self.position - 1].next
        }
    }

    /// Hold duration of the current phase, `None` once terminal
    pub fn next_hold(&self) -> Option<Duration> {
        self.steps.get(self.position).map(|step| step.hold)
    }

    /// Whether the terminal phase has been reached
    pub fn is_exhausted(&self) -> bool {
        self.position == self.steps.len()
    }

    /// Move to the next step and return it.
    ///
    /// Fails with [`TimelineError::Exhausted`] if called after the
    /// terminal phase; the sequencer guards against this by running the
    /// timeline exactly once per lifetime.
    pub fn advance(&mut self) -> Result<&TimelineStep<P>, TimelineError> {
        let step = self
            .steps
            .get(self.position)
            .ok_or(TimelineError::Exhausted)?;
        self.position += 1;
        Ok(step)
    }
}
