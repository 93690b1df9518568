//! Tileset and animation definitions.
//!
//! These types are resolved once when a map is loaded. Animation metadata is a
//! typed optional field on [`TileDef`], so nothing downstream has to probe tile
//! data for an "animation" entry at runtime.

use std::collections::BTreeMap;

/// A single step of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// How long to display this frame (milliseconds, positive).
    pub duration_ms: u32,
    /// The tile to display during this frame.
    ///
    /// Tileset-local inside an [`AnimationDef`], global once resolved into an
    /// [`AnimatedTile`](crate::driver::AnimatedTile).
    pub tile_id: u32,
}

impl Frame {
    pub fn new(duration_ms: u32, tile_id: u32) -> Self {
        Self {
            duration_ms,
            tile_id,
        }
    }
}

/// Ordered, non-empty frame sequence of one animated tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDef {
    pub frames: Vec<Frame>,
}

impl AnimationDef {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

/// Per-tile data carried by a tileset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDef {
    /// Animation metadata, if the tile is animated.
    pub animation: Option<AnimationDef>,
}

/// A tileset with a contiguous global id range starting at `first_gid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    /// Tileset name as authored in Tiled.
    pub name: String,
    /// First global tile id of this tileset.
    pub first_gid: u32,
    /// Number of tiles in the tileset.
    pub tile_count: u32,
    /// Tile definitions keyed by local tile id (0-based, NOT a GID).
    ///
    /// Ordered so animated tiles are discovered in ascending local id order.
    pub tiles: BTreeMap<u32, TileDef>,
}

impl TileSet {
    pub fn new(name: impl Into<String>, first_gid: u32, tile_count: u32) -> Self {
        Self {
            name: name.into(),
            first_gid,
            tile_count,
            tiles: BTreeMap::new(),
        }
    }

    /// Attach an animation to a local tile id.
    pub fn with_animation(mut self, local_id: u32, animation: AnimationDef) -> Self {
        self.tiles.entry(local_id).or_default().animation = Some(animation);
        self
    }

    /// Whether `gid` falls in this tileset's global id range.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tile_count
    }

    /// Iterate `(local_id, animation)` for every animated tile, ascending by local id.
    pub fn animations(&self) -> impl Iterator<Item = (u32, &AnimationDef)> {
        self.tiles
            .iter()
            .filter_map(|(local_id, tile)| tile.animation.as_ref().map(|anim| (*local_id, anim)))
    }
}
