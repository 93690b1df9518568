//! Runtime controls for tile animations.

pub mod animation_state;

pub use animation_state::{AnimationSpeed, AnimationsPaused};
