//! Configuration for tile animation.

use bevy::prelude::*;

/// Configuration for [`TileAnimationPlugin`](crate::TileAnimationPlugin).
#[derive(Resource, Clone, Debug)]
pub struct TileAnimationConfig {
    /// Run the animation systems (default: true with "animations" feature)
    pub enable_animations: bool,

    /// Mirror changed `GlobalTileId`s into `TileTextureIndex` (default: true)
    ///
    /// Disable when rendering tile entities with something other than
    /// `bevy_ecs_tilemap` and reading `GlobalTileId` directly.
    pub sync_texture_indices: bool,
}

impl Default for TileAnimationConfig {
    fn default() -> Self {
        Self {
            enable_animations: cfg!(feature = "animations"),
            sync_texture_indices: true,
        }
    }
}
