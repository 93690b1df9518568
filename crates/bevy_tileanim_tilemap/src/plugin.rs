//! Main plugin for `bevy_tileanim_tilemap`.

use bevy::prelude::*;

use crate::components::{GlobalTileId, TilesetFirstGid};
use crate::config::TileAnimationConfig;
use crate::features::AnimationSpeed;
use crate::tiles;

/// System set containing the tile animation systems.
///
/// Runs in `PostUpdate`, after gameplay systems have moved things for the
/// frame and before rendering extracts tile indices.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileAnimationSystems;

/// Plugin animating Tiled tiles spawned as `bevy_ecs_tilemap` entities.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tileanim_tilemap::TileAnimationPlugin;
/// App::new()
///     .add_plugins(TileAnimationPlugin::default());
/// ```
#[derive(Default)]
pub struct TileAnimationPlugin {
    /// Configuration for animation
    pub config: TileAnimationConfig,
}

impl TileAnimationPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: TileAnimationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TileAnimationPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<bevy_ecs_tilemap::TilemapPlugin>() {
            app.add_plugins(bevy_ecs_tilemap::TilemapPlugin);
        }

        app.insert_resource(self.config.clone());
        app.register_type::<GlobalTileId>()
            .register_type::<TilesetFirstGid>();

        if self.config.enable_animations {
            app.init_resource::<AnimationSpeed>();
            app.add_observer(tiles::on_tile_animator_removed);
            app.add_systems(
                PostUpdate,
                (
                    tiles::start_tile_animations,
                    tiles::advance_tile_animations,
                    tiles::sync_tile_texture_indices.run_if(texture_sync_enabled),
                )
                    .chain()
                    .in_set(TileAnimationSystems),
            );
        }

        info!("TileAnimationPlugin initialized");
    }
}

fn texture_sync_enabled(config: Res<TileAnimationConfig>) -> bool {
    config.sync_texture_indices
}
