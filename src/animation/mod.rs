mod animatable;
mod property;
mod spring;
mod timing;

pub use animatable::{Animatable, Vec2};
pub use property::AnimatedProperty;
pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;

use thiserror::Error;

/// How a property moves toward a new target value
#[derive(Clone, Debug)]
pub enum Motion {
    /// Physics-based convergence; settles asymptotically, may overshoot
    Spring(SpringConfig),
    /// Fixed-duration eased interpolation; reaches the target exactly
    Tween {
        /// Duration of the tween in milliseconds
        duration_ms: f32,
        /// Timing function controlling the animation curve
        timing: TimingFunction,
    },
}

impl Motion {
    /// Spring motion with the given configuration
    pub fn spring(config: SpringConfig) -> Self {
        Motion::Spring(config)
    }

    /// Tween motion with the given duration and timing function
    pub fn tween(duration_ms: f32, timing: TimingFunction) -> Self {
        Motion::Tween {
            duration_ms,
            timing,
        }
    }

    /// Reject malformed parameters before they enter the interpolation
    /// engine. A zero-duration tween is valid and completes immediately.
    pub fn validate(&self) -> Result<(), MotionError> {
        match self {
            Motion::Spring(config) => {
                if config.is_valid() {
                    Ok(())
                } else {
                    Err(MotionError::InvalidSpring {
                        damping_ratio: config.damping_ratio,
                        stiffness: config.stiffness,
                    })
                }
            }
            Motion::Tween { duration_ms, .. } => {
                if duration_ms.is_finite() && *duration_ms >= 0.0 {
                    Ok(())
                } else {
                    Err(MotionError::InvalidDuration {
                        duration_ms: *duration_ms,
                    })
                }
            }
        }
    }
}

impl Default for Motion {
    /// Default motion uses spring physics with pleasant overshoot
    fn default() -> Self {
        Motion::Spring(SpringConfig::default())
    }
}

/// A motion spec the interpolation engine refuses to run
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum MotionError {
    #[error("spring parameters must be positive and finite (damping_ratio={damping_ratio}, stiffness={stiffness})")]
    InvalidSpring { damping_ratio: f32, stiffness: f32 },
    #[error("tween duration must be non-negative and finite (got {duration_ms} ms)")]
    InvalidDuration { duration_ms: f32 },
}
