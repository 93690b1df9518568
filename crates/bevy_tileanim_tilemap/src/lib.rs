//! # `bevy_tileanim_tilemap`
//!
//! Animated Tiled tiles for `bevy_ecs_tilemap`.
//!
//! This crate is the Layer 3 plugin: it spawns tilemaps from a
//! [`TileMap`](bevy_tileanim_core::TileMap), owns one animation driver per map
//! entity, and advances it every frame.
//!
//! ## Features
//!
//! - **Tile layers**: one batched tilemap per layer/tileset pair
//! - **Tile animations**: frame cycling from tileset animation data, with a
//!   global speed multiplier and pause switch
//! - **Explicit lifetime**: animations start when a map requests them and stop
//!   when the map entity (or its `TileAnimator`) goes away
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_tileanim_assets::load_tile_map;
//! use bevy_tileanim_tilemap::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TileAnimationPlugin::default())
//!         .add_systems(Startup, spawn_map)
//!         .run();
//! }
//!
//! fn spawn_map(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     let map = load_tile_map("assets/map.tmx").expect("map should load");
//!     let textures = TilesetTextures::new().with(
//!         "water",
//!         TilesetTexture {
//!             image: asset_server.load("tilesets/water.png"),
//!             tile_size: Vec2::splat(16.0),
//!         },
//!     );
//!     let map_entity = commands.spawn((Transform::default(), Visibility::default())).id();
//!     TileMapBuilder::build(&mut commands, map_entity, &map, &textures)
//!         .expect("tileset textures should be registered");
//! }
//! ```

pub mod components;
pub mod config;
pub mod events;
pub mod features;
pub mod plugin;
pub mod tiles;

pub use config::TileAnimationConfig;
pub use plugin::{TileAnimationPlugin, TileAnimationSystems};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::components::{GlobalTileId, TileAnimationSource, TileAnimator, TilesetFirstGid};
    pub use crate::config::TileAnimationConfig;
    pub use crate::events::TileAnimationsStarted;
    pub use crate::features::{AnimationSpeed, AnimationsPaused};
    pub use crate::plugin::{TileAnimationPlugin, TileAnimationSystems};
    pub use crate::tiles::{
        TileMapBuildError, TileMapBuilder, TilesetTexture, TilesetTextures, stop_tile_animations,
    };
}
