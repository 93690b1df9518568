//! Tileset conversion.

use std::path::Path;

use bevy::log::warn;
use bevy_tileanim_core::{AnimationDef, Frame, TileDef, TileSet};

use super::TileMapLoadError;

/// Convert a parsed Tiled tileset into a [`TileSet`] starting at `first_gid`.
///
/// Animation metadata is resolved into the typed `TileDef::animation` field
/// here, once. Animations without frames are dropped with a warning.
///
/// # Errors
///
/// [`TileMapLoadError::MissingTilesetImage`] if the tileset has neither a
/// spritesheet nor any per-tile image.
pub fn tileset_from_tiled(
    tileset: &tiled::Tileset,
    first_gid: u32,
) -> Result<TileSet, TileMapLoadError> {
    let has_image =
        tileset.image.is_some() || tileset.tiles().any(|(_, tile)| tile.image.is_some());
    if !has_image {
        return Err(TileMapLoadError::MissingTilesetImage {
            tileset: tileset.name.clone(),
        });
    }

    let mut converted = TileSet::new(tileset.name.clone(), first_gid, tileset.tilecount);

    for (tile_id, tile) in tileset.tiles() {
        let animation = tile.animation.as_ref().and_then(|frames| {
            if frames.is_empty() {
                warn!(
                    "Tile {} in tileset '{}' has an empty animation, ignoring it",
                    tile_id, tileset.name
                );
                return None;
            }
            Some(AnimationDef::new(
                frames
                    .iter()
                    .map(|frame| Frame::new(frame.duration, frame.tile_id))
                    .collect(),
            ))
        });
        converted.tiles.insert(tile_id, TileDef { animation });
    }

    Ok(converted)
}

/// Load a standalone `.tsx` tileset.
pub fn load_tileset(path: impl AsRef<Path>, first_gid: u32) -> Result<TileSet, TileMapLoadError> {
    let mut loader = tiled::Loader::new();
    let tileset = loader.load_tsx_tileset(path.as_ref())?;
    tileset_from_tiled(&tileset, first_gid)
}
