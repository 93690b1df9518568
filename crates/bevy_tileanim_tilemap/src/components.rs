//! Components linking tile entities to the animation driver.

use bevy::prelude::*;
use bevy_tileanim_core::{TileAnimationDriver, TileSet};

/// Global tile id currently displayed by a tile entity.
///
/// The animation driver writes this; `sync_tile_texture_indices` mirrors it
/// into `bevy_ecs_tilemap`'s `TileTextureIndex`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct GlobalTileId(pub u32);

/// First global id of the tileset a tilemap entity renders.
///
/// Texture index of a tile = `GlobalTileId - TilesetFirstGid`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TilesetFirstGid(pub u32);

/// Requests tile animations for a map entity.
///
/// Inserting this is the subscription: once every entity in `layers` carries a
/// `TileStorage`, `start_tile_animations` scans them and attaches a
/// [`TileAnimator`]. [`TileMapBuilder`](crate::tiles::TileMapBuilder) inserts it
/// automatically.
#[derive(Component, Debug, Clone)]
pub struct TileAnimationSource {
    /// Tilesets with their animation metadata.
    pub tilesets: Vec<TileSet>,
    /// Tilemap entities to scan, in layer order.
    pub layers: Vec<Entity>,
}

/// Per-map animation state, owned by the map entity.
///
/// Removing this component (or despawning the map) ends the animations; the
/// map's [`TileAnimationSource`] is dropped with it.
#[derive(Component, Debug, Default)]
pub struct TileAnimator {
    pub(crate) driver: TileAnimationDriver<Entity>,
}

impl TileAnimator {
    pub fn driver(&self) -> &TileAnimationDriver<Entity> {
        &self.driver
    }
}
