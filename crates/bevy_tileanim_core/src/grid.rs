//! In-memory tile map: tilesets plus layers of placed tiles.

use crate::driver::{TileIndexSink, TileMapView};
use crate::model::TileSet;

/// A tile placed in a layer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// Global tile id currently displayed.
    pub index: u32,
}

/// Position of a cell inside a [`MapLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub x: u32,
    pub y: u32,
}

/// Ordered grid of placed-tile cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayer {
    /// Layer name as authored in Tiled.
    pub name: String,

    /// Layer width in tiles
    pub width: u32,

    /// Layer height in tiles
    pub height: u32,

    /// Flattened grid of tiles: index = y * width + x
    /// None = empty cell
    pub cells: Vec<Option<PlacedTile>>,
}

impl MapLayer {
    /// Create an empty, unnamed layer with the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::named("", width, height)
    }

    pub fn named(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Get the placed tile at a position (None if out of bounds or empty).
    pub fn get(&self, x: u32, y: u32) -> Option<&PlacedTile> {
        self.cells.get(self.offset(x, y)?)?.as_ref()
    }

    /// Displayed global id at a position.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u32> {
        self.get(x, y).map(|tile| tile.index)
    }

    /// Place (`Some`) or clear (`None`) the tile at a position.
    ///
    /// Out-of-bounds positions are ignored.
    pub fn set_index(&mut self, x: u32, y: u32, index: Option<u32>) {
        if let Some(slot) = self.offset(x, y).and_then(|offset| self.cells.get_mut(offset)) {
            *slot = index.map(|index| PlacedTile { index });
        }
    }

    /// Iterate all placed tiles with their positions.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (CellRef, &PlacedTile)> {
        self.cells.iter().enumerate().filter_map(|(idx, tile)| {
            tile.as_ref().map(|t| {
                let x = (idx as u32) % self.width;
                let y = (idx as u32) / self.width;
                (CellRef { x, y }, t)
            })
        })
    }
}

/// A loaded tile map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
    pub tilesets: Vec<TileSet>,
    pub layers: Vec<MapLayer>,
}

impl TileMap {
    pub fn new(tilesets: Vec<TileSet>, layers: Vec<MapLayer>) -> Self {
        Self { tilesets, layers }
    }

    /// Index of the tileset whose gid range contains `gid`.
    pub fn tileset_index_for(&self, gid: u32) -> Option<usize> {
        self.tilesets.iter().position(|tileset| tileset.contains(gid))
    }
}

impl TileMapView for TileMap {
    type Cell = CellRef;

    fn tilesets(&self) -> &[TileSet] {
        &self.tilesets
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_cells(&self, layer: usize) -> impl Iterator<Item = (CellRef, u32)> + '_ {
        self.layers
            .get(layer)
            .into_iter()
            .flat_map(|layer| layer.iter_tiles())
            .map(|(cell, tile)| (cell, tile.index))
    }
}

impl TileIndexSink<CellRef> for TileMap {
    fn set_index(&mut self, layer: usize, cell: CellRef, index: u32) {
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.set_index(cell.x, cell.y, Some(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_positions_are_row_major() {
        let mut layer = MapLayer::empty(3, 2);
        layer.set_index(2, 1, Some(9));
        assert_eq!(layer.cells[5], Some(PlacedTile { index: 9 }));
        assert_eq!(layer.index_at(2, 1), Some(9));

        let placed: Vec<CellRef> = layer.iter_tiles().map(|(cell, _)| cell).collect();
        assert_eq!(placed, vec![CellRef { x: 2, y: 1 }]);
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut layer = MapLayer::empty(2, 2);
        layer.set_index(2, 0, Some(1));
        assert!(layer.iter_tiles().next().is_none());
        assert_eq!(layer.get(5, 5), None);
    }

    #[test]
    fn large_layers_size_cells_without_overflow() {
        let layer = MapLayer::empty(70_000, 0);
        assert!(layer.cells.is_empty());

        let layer = MapLayer::empty(300, 200);
        assert_eq!(layer.cells.len(), 60_000);
        assert_eq!(layer.get(299, 199), None);
    }

    #[test]
    fn tileset_lookup_by_gid() {
        let map = TileMap::new(
            vec![TileSet::new("main", 1, 4), TileSet::new("water", 5, 4)],
            Vec::new(),
        );
        assert_eq!(map.tileset_index_for(4), Some(0));
        assert_eq!(map.tileset_index_for(5), Some(1));
        assert_eq!(map.tileset_index_for(9), None);
        assert_eq!(map.tileset_index_for(0), None);
    }

    #[test]
    fn view_skips_missing_layers() {
        let map = TileMap::default();
        assert_eq!(map.layer_cells(3).count(), 0);
    }
}
