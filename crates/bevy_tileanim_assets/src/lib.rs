//! # `bevy_tileanim_assets`
//!
//! Layer 2: converts Tiled files (parsed with the `tiled` crate) into the typed
//! [`TileMap`](bevy_tileanim_core::TileMap) model consumed by the animation
//! driver.
//!
//! Animation metadata is resolved at load time into
//! `TileDef::animation: Option<AnimationDef>`. A tileset without images is a
//! setup-time error and is reported before anything is spawned.

pub mod loaders;

pub use loaders::TileMapLoadError;
pub use loaders::map::{load_tile_map, tile_map_from_tiled};
pub use loaders::tileset::{load_tileset, tileset_from_tiled};

pub mod prelude {
    //! Common imports for `bevy_tileanim_assets` users.

    pub use crate::loaders::TileMapLoadError;
    pub use crate::loaders::map::{load_tile_map, tile_map_from_tiled};
    pub use crate::loaders::tileset::{load_tileset, tileset_from_tiled};
}
