//! Map conversion.

use std::path::Path;

use bevy::log::{info, warn};
use bevy_tileanim_core::{MapLayer, TileMap};

use super::TileMapLoadError;
use super::tileset::tileset_from_tiled;

/// Load a `.tmx` map from disk and convert it.
///
/// # Example
///
/// ```rust,no_run
/// use bevy_tileanim_assets::load_tile_map;
///
/// let map = load_tile_map("assets/map.tmx").expect("map should load");
/// println!("{} tilesets, {} layers", map.tilesets.len(), map.layers.len());
/// ```
pub fn load_tile_map(path: impl AsRef<Path>) -> Result<TileMap, TileMapLoadError> {
    let path = path.as_ref();
    let mut loader = tiled::Loader::new();
    let map = loader.load_tmx_map(path)?;

    let tile_map = tile_map_from_tiled(&map)?;
    info!(
        "Loaded map {} with {} tilesets and {} tile layers",
        path.display(),
        tile_map.tilesets.len(),
        tile_map.layers.len()
    );
    Ok(tile_map)
}

/// Convert a parsed Tiled map into a [`TileMap`].
///
/// Tile layers nested in groups are flattened depth-first in document order.
/// Object and image layers are skipped.
pub fn tile_map_from_tiled(map: &tiled::Map) -> Result<TileMap, TileMapLoadError> {
    let mut tilesets = Vec::with_capacity(map.tilesets().len());
    let mut first_gids = Vec::with_capacity(map.tilesets().len());
    let mut current_gid = 1u32; // GIDs start at 1

    for tileset in map.tilesets() {
        tilesets.push(tileset_from_tiled(tileset, current_gid)?);
        first_gids.push(current_gid);
        // Next tileset's first_gid = current + tile count
        current_gid += tileset.tilecount;
    }

    let mut layers = Vec::new();
    collect_tile_layers(map.layers(), &first_gids, &mut layers);

    Ok(TileMap::new(tilesets, layers))
}

fn collect_tile_layers<'a>(
    layers: impl Iterator<Item = tiled::Layer<'a>>,
    first_gids: &[u32],
    out: &mut Vec<MapLayer>,
) {
    for layer in layers {
        if let Some(tile_layer) = layer.as_tile_layer() {
            out.push(convert_tile_layer(&layer.name, &tile_layer, first_gids));
        } else if let Some(group) = layer.as_group_layer() {
            collect_tile_layers(group.layers(), first_gids, out);
        }
    }
}

fn convert_tile_layer(name: &str, tile_layer: &tiled::TileLayer, first_gids: &[u32]) -> MapLayer {
    if let tiled::TileLayer::Infinite(_) = tile_layer {
        warn!("Layer '{}' is infinite; animated tiles are only tracked on finite layers", name);
    }

    let width = tile_layer.width().unwrap_or(0);
    let height = tile_layer.height().unwrap_or(0);
    let mut converted = MapLayer::named(name, width, height);

    for y in 0..height {
        for x in 0..width {
            let Some(tile) = tile_layer.get_tile(x as i32, y as i32) else {
                continue;
            };
            let Some(first_gid) = first_gids.get(tile.tileset_index()) else {
                warn!(
                    "Tile at ({}, {}) references tileset index {} which doesn't exist",
                    x,
                    y,
                    tile.tileset_index()
                );
                continue;
            };
            converted.set_index(x, y, Some(first_gid + tile.id()));
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use bevy_tileanim_core::{AnimationDef, Frame, TileAnimationDriver};
    use tempfile::{TempDir, tempdir};

    use super::*;

    const ANIMATED_TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="3" height="2" tilewidth="16" tileheight="16" infinite="0" nextlayerid="6" nextobjectid="1">
 <tileset firstgid="1" name="main_tiles" tilewidth="16" tileheight="16" tilecount="4" columns="4">
  <image source="main_tiles.png" width="64" height="16"/>
  <tile id="1">
   <animation>
    <frame tileid="1" duration="100"/>
    <frame tileid="2" duration="100"/>
   </animation>
  </tile>
 </tileset>
 <tileset firstgid="5" name="water" tilewidth="16" tileheight="16" tilecount="4" columns="4">
  <image source="water.png" width="64" height="16"/>
  <tile id="0">
   <animation>
    <frame tileid="0" duration="200"/>
    <frame tileid="1" duration="300"/>
   </animation>
  </tile>
 </tileset>
 <layer id="1" name="ground" width="3" height="2">
  <data encoding="csv">
1,5,5,
0,2,6
</data>
 </layer>
 <group id="3" name="decor">
  <layer id="4" name="overlay" width="3" height="2">
   <data encoding="csv">
0,0,5,
0,0,0
</data>
  </layer>
 </group>
 <objectgroup id="5" name="spawns"/>
</map>
"#;

    const IMAGELESS_TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="1" height="1" tilewidth="16" tileheight="16" infinite="0" nextlayerid="2" nextobjectid="1">
 <tileset firstgid="1" name="ghost" tilewidth="16" tileheight="16" tilecount="1" columns="0">
 </tileset>
 <layer id="1" name="ground" width="1" height="1">
  <data encoding="csv">
1
</data>
 </layer>
</map>
"#;

    /// Infinite map with one 16x16 chunk of animated water tiles.
    fn infinite_tmx() -> String {
        let chunk = vec!["1"; 16 * 16].join(",");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="16" height="16" tilewidth="16" tileheight="16" infinite="1" nextlayerid="2" nextobjectid="1">
 <tileset firstgid="1" name="water" tilewidth="16" tileheight="16" tilecount="4" columns="4">
  <image source="water.png" width="64" height="16"/>
  <tile id="0">
   <animation>
    <frame tileid="0" duration="200"/>
    <frame tileid="1" duration="300"/>
   </animation>
  </tile>
 </tileset>
 <layer id="1" name="endless" width="16" height="16">
  <data encoding="csv">
   <chunk x="0" y="0" width="16" height="16">
{chunk}
   </chunk>
  </data>
 </layer>
</map>
"#
        )
    }

    fn write_fixture(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.tmx");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn resolves_first_gids_and_animations() {
        let (_dir, path) = write_fixture(ANIMATED_TMX);
        let map = load_tile_map(&path).unwrap();

        let first_gids: Vec<u32> = map.tilesets.iter().map(|t| t.first_gid).collect();
        assert_eq!(first_gids, vec![1, 5]);

        let water = &map.tilesets[1];
        assert_eq!(water.name, "water");
        assert_eq!(
            water.tiles[&0].animation,
            Some(AnimationDef::new(vec![Frame::new(200, 0), Frame::new(300, 1)]))
        );
    }

    #[test]
    fn flattens_group_layers_and_skips_objects() {
        let (_dir, path) = write_fixture(ANIMATED_TMX);
        let map = load_tile_map(&path).unwrap();

        let names: Vec<&str> = map.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["ground", "overlay"]);

        let ground = &map.layers[0];
        assert_eq!(ground.index_at(0, 0), Some(1));
        assert_eq!(ground.index_at(1, 0), Some(5));
        assert_eq!(ground.index_at(0, 1), None);
        assert_eq!(ground.index_at(2, 1), Some(6));
        assert_eq!(map.layers[1].index_at(2, 0), Some(5));
    }

    #[test]
    fn loaded_map_drives_animations_across_layers() {
        let (_dir, path) = write_fixture(ANIMATED_TMX);
        let mut map = load_tile_map(&path).unwrap();

        let mut driver = TileAnimationDriver::initialize(&map);
        assert_eq!(driver.len(), 2);
        assert_eq!(driver.tile(5).map(|t| t.occurrence_count()), Some(3));
        assert_eq!(driver.tile(2).map(|t| t.occurrence_count()), Some(1));

        assert_eq!(driver.advance(250.0, &mut map), 2);
        assert_eq!(map.layers[0].index_at(1, 0), Some(6));
        assert_eq!(map.layers[0].index_at(2, 0), Some(6));
        assert_eq!(map.layers[0].index_at(1, 1), Some(3));
        assert_eq!(map.layers[1].index_at(2, 0), Some(6));
        // Plain tiles that happen to show a later frame are left alone.
        assert_eq!(map.layers[0].index_at(2, 1), Some(6));
    }

    #[test]
    fn tileset_without_image_is_rejected() {
        let (_dir, path) = write_fixture(IMAGELESS_TMX);
        let err = load_tile_map(&path).unwrap_err();
        assert!(matches!(
            err,
            TileMapLoadError::MissingTilesetImage { ref tileset } if tileset == "ghost"
        ));
    }

    #[test]
    fn missing_file_is_a_tiled_error() {
        let dir = tempdir().unwrap();
        let err = load_tile_map(dir.path().join("nope.tmx")).unwrap_err();
        assert!(matches!(err, TileMapLoadError::Tiled(_)));
    }

    #[test]
    fn infinite_layers_convert_empty() {
        let (_dir, path) = write_fixture(&infinite_tmx());
        let map = load_tile_map(&path).unwrap();

        assert_eq!(map.layers.len(), 1);
        assert_eq!(map.layers[0], MapLayer::named("endless", 0, 0));

        let driver = TileAnimationDriver::initialize(&map);
        assert_eq!(driver.len(), 1);
        let tile = driver.tile(1).unwrap();
        assert_eq!(tile.occurrence_count(), 0);
        assert_eq!(tile.occurrences().len(), 1);
        assert!(tile.occurrences()[0].is_empty());
    }
}
