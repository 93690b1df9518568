//! Tile layer spawning and animation systems.

pub mod animations;
pub mod tilemap_builder;

pub use animations::{
    advance_tile_animations, on_tile_animator_removed, start_tile_animations,
    stop_tile_animations, sync_tile_texture_indices,
};
pub use tilemap_builder::{TileMapBuildError, TileMapBuilder, TilesetTexture, TilesetTextures};
