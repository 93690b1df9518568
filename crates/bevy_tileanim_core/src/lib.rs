//! # `bevy_tileanim_core`
//!
//! Engine-agnostic animated tile driver for Tiled maps.
//!
//! **This crate does NOT load files or render anything.** Layer 2
//! (`bevy_tileanim_assets`) converts parsed Tiled maps into a [`TileMap`], and
//! Layer 3 (`bevy_tileanim_tilemap`) runs the driver against tile entities
//! every frame.
//!
//! ## Example
//!
//! ```rust
//! use bevy_tileanim_core::prelude::*;
//!
//! let water = TileSet::new("water", 100, 16).with_animation(
//!     5,
//!     AnimationDef::new(vec![Frame::new(200, 5), Frame::new(300, 6)]),
//! );
//! let mut layer = MapLayer::empty(1, 1);
//! layer.set_index(0, 0, Some(105));
//! let mut map = TileMap::new(vec![water], vec![layer]);
//!
//! let mut driver = TileAnimationDriver::initialize(&map);
//! driver.advance(250.0, &mut map);
//! assert_eq!(map.layers[0].index_at(0, 0), Some(106));
//! ```

pub mod driver;
pub mod grid;
pub mod model;

pub mod prelude {
    //! Common imports for `bevy_tileanim_core` users.

    pub use crate::driver::{AnimatedTile, TileAnimationDriver, TileIndexSink, TileMapView};
    pub use crate::grid::{CellRef, MapLayer, PlacedTile, TileMap};
    pub use crate::model::{AnimationDef, Frame, TileDef, TileSet};
}

pub use driver::{AnimatedTile, TileAnimationDriver, TileIndexSink, TileMapView};
pub use grid::{CellRef, MapLayer, PlacedTile, TileMap};
pub use model::{AnimationDef, Frame, TileDef, TileSet};
