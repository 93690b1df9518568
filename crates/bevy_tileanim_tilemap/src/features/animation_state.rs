//! Global resources for controlling tile animations.

use bevy::prelude::*;

/// Global speed multiplier for all tile animations.
///
/// Default is 1.0 (normal speed). Set to 2.0 for double speed, 0.5 for half speed.
/// Negative values are treated as 0.
#[derive(Resource, Debug, Clone)]
pub struct AnimationSpeed(pub f32);

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl AnimationSpeed {
    /// Multiplier applied to elapsed time, never below 0.
    pub fn clamped(&self) -> f32 {
        self.0.max(0.0)
    }
}

/// Resource that pauses all tile animations when present.
///
/// Insert this resource to pause animations, remove it to resume. Time spent
/// paused does not count toward any frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct AnimationsPaused;
