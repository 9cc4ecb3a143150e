use std::time::Duration;

use super::{Animatable, Motion, MotionError, SpringConfig, SpringState, TimingFunction};

/// Settling threshold for spring convergence, in normalized progress.
const SPRING_SETTLE: f32 = 1e-3;

/// Active interpolation toward the current target
#[derive(Debug)]
enum Engine {
    /// Converged; `current == target`
    Settled,
    Tween {
        elapsed: Duration,
        duration: Duration,
        timing: TimingFunction,
    },
    Spring {
        state: SpringState,
        config: SpringConfig,
    },
}

/// A single visual attribute undergoing continuous interpolation toward a
/// target value.
///
/// The property is driven by the host's render loop: one [`sample`]
/// call per frame advances the interpolation and returns the updated
/// value. Assigning a new target with [`retarget`] abandons any in-flight
/// convergence and starts a fresh one **from the current, possibly
/// mid-flight value** — the value never jumps on retarget.
///
/// [`sample`]: AnimatedProperty::sample
/// [`retarget`]: AnimatedProperty::retarget
pub struct AnimatedProperty<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Value the property is converging toward
    target: T,
    /// Value when the active convergence started
    start: T,
    engine: Engine,
}

impl<T: Animatable> AnimatedProperty<T> {
    /// Create a property settled at its seed value
    pub fn new(initial: T) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            engine: Engine::Settled,
        }
    }

    /// Replace the target and (re)start convergence.
    ///
    /// A malformed motion spec is rejected and the previous convergence
    /// continues unaffected. Retargeting the value the property already
    /// holds, or retargeting with a zero-duration tween, completes
    /// immediately — the next `sample` returns the target, never a stale
    /// frame.
    pub fn retarget(&mut self, target: T, motion: Motion) -> Result<(), MotionError> {
        motion.validate()?;

        // Already converging (or converged) on this exact target: keep the
        // in-flight motion instead of restarting it from zero velocity.
        if target == self.target {
            if matches!(self.engine, Engine::Settled) {
                self.current = target;
            }
            return Ok(());
        }

        self.start = self.current.clone();
        self.target = target;
        self.engine = match motion {
            Motion::Tween {
                duration_ms,
                timing,
            } => {
                if duration_ms == 0.0 {
                    self.current = self.target.clone();
                    Engine::Settled
                } else {
                    Engine::Tween {
                        elapsed: Duration::ZERO,
                        duration: Duration::from_secs_f32(duration_ms / 1000.0),
                        timing,
                    }
                }
            }
            Motion::Spring(config) => Engine::Spring {
                state: SpringState::new(),
                config,
            },
        };
        Ok(())
    }

    /// Advance the interpolation by `dt` and return the updated value.
    ///
    /// Tweens produce the target exactly once elapsed time reaches the
    /// duration; springs snap to the target once position and velocity
    /// fall inside the settling threshold.
    pub fn sample(&mut self, dt: Duration) -> T {
        match &mut self.engine {
            Engine::Settled => {}
            Engine::Tween {
                elapsed,
                duration,
                timing,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    self.current = self.target.clone();
                    self.engine = Engine::Settled;
                } else {
                    let t = elapsed.as_secs_f32() / duration.as_secs_f32();
                    self.current = T::lerp(&self.start, &self.target, timing.evaluate(t));
                }
            }
            Engine::Spring { state, config } => {
                let position = state.step(dt.as_secs_f32(), config);
                if state.is_settled(SPRING_SETTLE) {
                    self.current = self.target.clone();
                    self.engine = Engine::Settled;
                } else {
                    self.current = T::lerp(&self.start, &self.target, position);
                }
            }
        }
        self.current.clone()
    }

    /// Current interpolated value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Value the property is converging toward
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Whether convergence has finished (`current == target`)
    pub fn is_settled(&self) -> bool {
        matches!(self.engine, Engine::Settled)
    }
}
