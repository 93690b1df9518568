//! # bevy_tileanim
//!
//! Animated Tiled tiles for Bevy.
//!
//! This is a meta-crate that combines the `bevy_tileanim_*` sub-crates behind
//! feature flags.
//!
//! ## Features
//!
//! - **default**: Includes `tilemap`
//! - **tilemap**: Bevy plugin animating `bevy_ecs_tilemap` tile entities
//!
//! ## Architecture
//!
//! - **Layer 1** ([`core`]): engine-agnostic animation driver and map model
//! - **Layer 2** ([`assets`]): Tiled map conversion with load-time errors
//! - **Layer 3** (optional) [`tilemap`]: Bevy systems, components and plugin
//!
//! ## Headless use
//!
//! ```rust
//! use bevy_tileanim::prelude::*;
//!
//! let lava = TileSet::new("lava", 1, 4).with_animation(
//!     0,
//!     AnimationDef::new(vec![Frame::new(100, 0), Frame::new(100, 1)]),
//! );
//! let mut layer = MapLayer::empty(2, 1);
//! layer.set_index(0, 0, Some(1));
//! layer.set_index(1, 0, Some(1));
//! let mut map = TileMap::new(vec![lava], vec![layer]);
//!
//! let mut driver = TileAnimationDriver::initialize(&map);
//! driver.advance(16.0, &mut map);
//! assert_eq!(map.layers[0].index_at(1, 0), Some(1));
//! driver.advance(100.0, &mut map);
//! assert_eq!(map.layers[0].index_at(1, 0), Some(2));
//! ```

#[cfg(feature = "tilemap")]
pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_tileanim_assets as assets;
pub use bevy_tileanim_core as core;

#[cfg(feature = "tilemap")]
pub use bevy_tileanim_tilemap as tilemap;

pub use tiled;

/// Unified prelude for bevy_tileanim
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    #[cfg(feature = "tilemap")]
    pub use crate::tilemap::prelude::*;

    #[cfg(feature = "tilemap")]
    pub use crate::plugin::BevyTileAnimPlugin;
}
