//! Animated tile scheduling.
//!
//! [`TileAnimationDriver::initialize`] scans a map once for tiles whose tileset
//! definition carries an animation and snapshots every placed cell showing that
//! tile. [`TileAnimationDriver::advance`] is then called once per tick and
//! rewrites the snapshotted cells whenever a frame's duration elapses.
//!
//! The driver is generic over a cell handle so it can drive both the in-memory
//! [`TileMap`](crate::grid::TileMap) and ECS tile entities.

use bevy::log::{debug, trace};

use crate::model::{Frame, TileSet};

/// Read side of a tile map: tilesets plus an ordered set of layers of cells.
pub trait TileMapView {
    /// Stable handle to a placed cell.
    type Cell: Copy;

    fn tilesets(&self) -> &[TileSet];

    fn layer_count(&self) -> usize;

    /// Iterate the placed (non-empty) cells of `layer` with their current index.
    fn layer_cells(&self, layer: usize) -> impl Iterator<Item = (Self::Cell, u32)> + '_;
}

/// Write side of a tile map: overwrite the displayed index of a cell.
pub trait TileIndexSink<C> {
    fn set_index(&mut self, layer: usize, cell: C, index: u32);
}

/// Playback state of one animated tile definition.
#[derive(Debug, Clone)]
pub struct AnimatedTile<C> {
    global_id: u32,
    frames: Vec<Frame>,
    current_frame: usize,
    remaining: f32,
    /// One list per map layer, captured at initialization.
    occurrences: Vec<Vec<C>>,
}

impl<C: Copy> AnimatedTile<C> {
    /// Global id the animation starts from (local index + `first_gid`).
    pub fn global_id(&self) -> u32 {
        self.global_id
    }

    /// Frames with global tile ids.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Milliseconds left before the next frame swap.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn current_tile_id(&self) -> u32 {
        self.frames[self.current_frame].tile_id
    }

    /// Cells captured for each layer, indexed by layer.
    pub fn occurrences(&self) -> &[Vec<C>] {
        &self.occurrences
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.iter().map(Vec::len).sum()
    }

    /// Count down by `delta_ms`; returns `true` if the frame changed.
    ///
    /// At most one frame per call. Overshoot is dropped, not carried.
    fn tick(&mut self, delta_ms: f32) -> bool {
        self.remaining -= delta_ms;
        if self.remaining > 0.0 {
            return false;
        }
        self.current_frame = (self.current_frame + 1) % self.frames.len();
        self.remaining = self.frames[self.current_frame].duration_ms as f32;
        true
    }
}

/// Owns the animated tiles of one map for the lifetime of its scene.
#[derive(Debug, Clone)]
pub struct TileAnimationDriver<C> {
    tiles: Vec<AnimatedTile<C>>,
}

impl<C> Default for TileAnimationDriver<C> {
    fn default() -> Self {
        Self { tiles: Vec::new() }
    }
}

impl<C: Copy> TileAnimationDriver<C> {
    /// Build the animation schedule for `map`.
    ///
    /// Scans every layer once per animated tile definition. Tiles placed after
    /// this call are not tracked.
    pub fn initialize<M>(map: &M) -> Self
    where
        M: TileMapView<Cell = C>,
    {
        let mut tiles = Vec::new();

        for tileset in map.tilesets() {
            for (local_id, animation) in tileset.animations() {
                let global_id = local_id + tileset.first_gid;
                let frames: Vec<Frame> = animation
                    .frames
                    .iter()
                    .map(|frame| Frame::new(frame.duration_ms, frame.tile_id + tileset.first_gid))
                    .collect();

                // Tilesets may declare a starting frame other than the first.
                let current_frame = frames
                    .iter()
                    .position(|frame| frame.tile_id == global_id)
                    .unwrap_or(0);
                let remaining = frames[current_frame].duration_ms as f32;

                let occurrences = (0..map.layer_count())
                    .map(|layer| {
                        map.layer_cells(layer)
                            .filter(|(_, index)| *index == global_id)
                            .map(|(cell, _)| cell)
                            .collect()
                    })
                    .collect();

                let tile = AnimatedTile {
                    global_id,
                    frames,
                    current_frame,
                    remaining,
                    occurrences,
                };
                debug!(
                    "Animated tile {} in tileset '{}': {} frames, {} placed cells",
                    global_id,
                    tileset.name,
                    tile.frames.len(),
                    tile.occurrence_count()
                );
                tiles.push(tile);
            }
        }

        Self { tiles }
    }

    /// Advance every animated tile by `delta_ms` and rewrite swapped cells.
    ///
    /// Returns how many tiles changed frame this tick.
    pub fn advance<S>(&mut self, delta_ms: f32, sink: &mut S) -> usize
    where
        S: TileIndexSink<C>,
    {
        let mut swapped = 0;
        for tile in &mut self.tiles {
            if !tile.tick(delta_ms) {
                continue;
            }
            swapped += 1;
            let index = tile.current_tile_id();
            for (layer, cells) in tile.occurrences.iter().enumerate() {
                for cell in cells {
                    sink.set_index(layer, *cell, index);
                }
            }
        }
        if swapped > 0 {
            trace!("{} animated tiles swapped frame", swapped);
        }
        swapped
    }

    pub fn tiles(&self) -> &[AnimatedTile<C>] {
        &self.tiles
    }

    /// Find the animated tile starting from `global_id`.
    pub fn tile(&self, global_id: u32) -> Option<&AnimatedTile<C>> {
        self.tiles.iter().find(|tile| tile.global_id == global_id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
