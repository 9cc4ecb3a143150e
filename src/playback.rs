use std::time::Duration;

/// Opaque reference to a prerecorded vector-animation composition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionHandle(pub &'static str);

/// How many times a composition plays for the current request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopMode {
    /// Play to the end and hold the final frame
    Once,
    /// Wrap around indefinitely
    Infinite,
}

/// Frame-driven playback of a prerecorded composition.
///
/// Stands in for the host's vector-animation engine: given a loop-count
/// request it produces a normalized progress value in [0, 1] per frame.
/// Reissuing a request restarts playback from the beginning — that is the
/// only way to rewind.
#[derive(Clone, Debug)]
pub struct ClipPlayback {
    asset: CompositionHandle,
    clip_duration: Duration,
    loop_mode: LoopMode,
    elapsed: Duration,
}

impl ClipPlayback {
    /// Playback of `asset`, one pass of which takes `clip_duration`
    pub fn new(asset: CompositionHandle, clip_duration: Duration) -> Self {
        Self {
            asset,
            clip_duration,
            loop_mode: LoopMode::Once,
            elapsed: Duration::ZERO,
        }
    }

    pub fn asset(&self) -> CompositionHandle {
        self.asset
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Restart playback under a new loop mode
    pub fn request(&mut self, loop_mode: LoopMode) {
        log::debug!("clip {:?}: playback requested, {:?}", self.asset, loop_mode);
        self.loop_mode = loop_mode;
        self.elapsed = Duration::ZERO;
    }

    /// Advance playback by one frame delta
    pub fn sample(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    /// Normalized progress in [0, 1]: wraps under `Infinite`, holds the
    /// final frame under `Once`
    pub fn progress(&self) -> f32 {
        if self.clip_duration.is_zero() {
            return 1.0;
        }
        let raw = self.elapsed.as_secs_f32() / self.clip_duration.as_secs_f32();
        match self.loop_mode {
            LoopMode::Once => raw.min(1.0),
            LoopMode::Infinite => raw.fract(),
        }
    }
}
