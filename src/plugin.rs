//! Unified plugin for bevy_tileanim.

use bevy::prelude::*;
use bevy_tileanim_tilemap::{TileAnimationConfig, TileAnimationPlugin};

/// Unified plugin that adds all enabled bevy_tileanim functionality.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tileanim::prelude::*;
///
/// App::new()
///     .add_plugins(BevyTileAnimPlugin::default().with_animation(TileAnimationConfig {
///         sync_texture_indices: false,
///         ..default()
///     }));
/// ```
#[derive(Default)]
pub struct BevyTileAnimPlugin {
    /// Animation configuration
    pub animation: TileAnimationConfig,
}

impl BevyTileAnimPlugin {
    /// Create with custom animation configuration
    pub fn with_animation(mut self, config: TileAnimationConfig) -> Self {
        self.animation = config;
        self
    }
}

impl Plugin for BevyTileAnimPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TileAnimationPlugin::new(self.animation.clone()));

        info!("BevyTileAnimPlugin initialized");
    }
}
