//! Loaders that turn Tiled files into the typed [`TileMap`](bevy_tileanim_core::TileMap) model.

pub mod map;
pub mod tileset;

use thiserror::Error;

/// Setup-time data errors. Any of these aborts scene creation before an
/// animation driver is built.
#[derive(Debug, Error)]
pub enum TileMapLoadError {
    #[error("Failed to load map: {0}")]
    Tiled(#[from] tiled::Error),

    #[error("Tileset '{tileset}' has no image. Check names in Tiled")]
    MissingTilesetImage { tileset: String },
}
