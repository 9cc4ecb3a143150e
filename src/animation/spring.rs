/// Configuration for spring physics motion.
///
/// A spring is characterized by its damping ratio and stiffness; the mass
/// is fixed at 1. A damping ratio below 1 oscillates around the target
/// before settling, 1 is critically damped, above 1 creeps in slowly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Damping ratio (must be positive; < 1.0 bounces)
    pub damping_ratio: f32,
    /// Stiffness of the spring (must be positive)
    pub stiffness: f32,
}

impl SpringConfig {
    /// No oscillation, settles as fast as possible
    pub const DAMPING_NO_BOUNCE: f32 = 1.0;
    /// Subtle overshoot
    pub const DAMPING_LOW_BOUNCE: f32 = 0.75;
    /// Noticeable overshoot, the "organic" default
    pub const DAMPING_MEDIUM_BOUNCE: f32 = 0.5;
    /// Pronounced wobble
    pub const DAMPING_HIGH_BOUNCE: f32 = 0.2;

    /// Slow, heavy motion for large travel distances
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;
    /// Relaxed motion
    pub const STIFFNESS_LOW: f32 = 200.0;
    /// Moderately quick response
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    /// Snappy response
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;

    /// Create a spring configuration from a damping ratio and stiffness
    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
        }
    }

    /// Damping coefficient for the unit-mass oscillator
    pub fn damping_coefficient(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }

    /// Check if the spring will overshoot its target
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio < 1.0
    }

    /// Both parameters positive and finite
    pub fn is_valid(&self) -> bool {
        self.damping_ratio.is_finite()
            && self.damping_ratio > 0.0
            && self.stiffness.is_finite()
            && self.stiffness > 0.0
    }
}

impl Default for SpringConfig {
    /// Default spring with pleasant overshoot
    fn default() -> Self {
        Self::new(Self::DAMPING_MEDIUM_BOUNCE, Self::STIFFNESS_LOW)
    }
}

/// Cap on a single integration step. Larger frame deltas are split into
/// substeps so stiff springs stay numerically stable.
const MAX_STEP_SECS: f32 = 1.0 / 120.0;

/// State for spring physics simulation.
///
/// The spring always animates normalized progress from 0.0 toward 1.0;
/// the owning property lerps its start and target values through this
/// progress, which keeps the simulation independent of the animated type.
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position (0.0 = start, 1.0 = target, may overshoot)
    pub position: f32,
    /// Current velocity
    pub velocity: f32,
}

impl SpringState {
    /// Create a new spring state at rest at position 0.0
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
        }
    }

    /// Advance the simulation by `dt_secs` and return the new position.
    ///
    /// Uses semi-implicit Euler with substepping; the spring keeps
    /// oscillating until it naturally settles, there is no duration.
    pub fn step(&mut self, dt_secs: f32, config: &SpringConfig) -> f32 {
        let mut remaining = dt_secs.max(0.0);
        let damping = config.damping_coefficient();

        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECS);
            remaining -= dt;

            // F = -k * x - c * v, unit mass
            let displacement = self.position - 1.0;
            let acceleration = -config.stiffness * displacement - damping * self.velocity;

            self.velocity += acceleration * dt;
            self.position += self.velocity * dt;
        }

        self.position
    }

    /// Check if the spring has settled: position within `threshold` of the
    /// target and velocity below `threshold`.
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new()
    }
}
