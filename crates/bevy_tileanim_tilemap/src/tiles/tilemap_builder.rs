//! Spawns `bevy_ecs_tilemap` structures from a [`TileMap`].

use std::collections::BTreeMap;

use bevy::{platform::collections::HashMap, prelude::*};
use bevy_ecs_tilemap::prelude::*;
use bevy_tileanim_core::{CellRef, MapLayer, TileMap};
use thiserror::Error;

use crate::components::{GlobalTileId, TileAnimationSource, TilesetFirstGid};

/// Spritesheet used to render one tileset.
#[derive(Debug, Clone)]
pub struct TilesetTexture {
    pub image: Handle<Image>,
    /// Tile size in pixels
    pub tile_size: Vec2,
}

/// Tileset textures keyed by tileset name.
#[derive(Debug, Clone, Default)]
pub struct TilesetTextures {
    by_name: HashMap<String, TilesetTexture>,
}

impl TilesetTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tileset: impl Into<String>, texture: TilesetTexture) -> Self {
        self.insert(tileset, texture);
        self
    }

    pub fn insert(&mut self, tileset: impl Into<String>, texture: TilesetTexture) {
        self.by_name.insert(tileset.into(), texture);
    }

    pub fn get(&self, tileset: &str) -> Option<&TilesetTexture> {
        self.by_name.get(tileset)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileMapBuildError {
    #[error("No texture registered for tileset '{0}'")]
    MissingTexture(String),
}

/// Tiles of one layer that belong to one tileset.
struct LayerGroup<'a> {
    layer_index: usize,
    layer: &'a MapLayer,
    tileset_index: usize,
    tiles: Vec<(CellRef, u32)>,
}

/// Builds `bevy_ecs_tilemap` entities for every tile layer of a [`TileMap`].
///
/// `bevy_ecs_tilemap` requires one tilemap per texture, so each layer is split
/// into one tilemap per tileset it uses. Every tile entity carries a
/// [`GlobalTileId`], and the map entity receives a [`TileAnimationSource`]
/// listing the spawned tilemaps so animations start on their own.
pub struct TileMapBuilder;

impl TileMapBuilder {
    /// Spawn tilemaps as children of `map_entity`.
    ///
    /// Returns the spawned tilemap entities in layer order.
    ///
    /// # Errors
    ///
    /// [`TileMapBuildError::MissingTexture`] if a tileset used by any layer has
    /// no texture. Nothing is spawned in that case.
    pub fn build(
        commands: &mut Commands,
        map_entity: Entity,
        map: &TileMap,
        textures: &TilesetTextures,
    ) -> Result<Vec<Entity>, TileMapBuildError> {
        let groups = Self::group_by_tileset(map);

        // Validate everything before spawning so a failure leaves no partial map
        for group in &groups {
            let tileset = &map.tilesets[group.tileset_index];
            if textures.get(&tileset.name).is_none() {
                return Err(TileMapBuildError::MissingTexture(tileset.name.clone()));
            }
        }

        let mut tilemaps = Vec::with_capacity(groups.len());
        for group in groups {
            let tileset = &map.tilesets[group.tileset_index];
            let Some(texture) = textures.get(&tileset.name) else {
                continue;
            };
            tilemaps.push(Self::create_tilemap(
                commands,
                map_entity,
                &group,
                tileset.first_gid,
                &tileset.name,
                texture,
            ));
        }

        info!(
            "Spawned {} tilemaps for {} layers",
            tilemaps.len(),
            map.layers.len()
        );

        commands.entity(map_entity).insert(TileAnimationSource {
            tilesets: map.tilesets.clone(),
            layers: tilemaps.clone(),
        });

        Ok(tilemaps)
    }

    /// Group each layer's tiles by the tileset their gid falls in.
    fn group_by_tileset(map: &TileMap) -> Vec<LayerGroup<'_>> {
        let mut groups = Vec::new();

        for (layer_index, layer) in map.layers.iter().enumerate() {
            let mut by_tileset: BTreeMap<usize, Vec<(CellRef, u32)>> = BTreeMap::new();
            for (cell, tile) in layer.iter_tiles() {
                let Some(tileset_index) = map.tileset_index_for(tile.index) else {
                    warn!(
                        "Tile {} at ({}, {}) in layer '{}' matches no tileset, skipping",
                        tile.index, cell.x, cell.y, layer.name
                    );
                    continue;
                };
                by_tileset
                    .entry(tileset_index)
                    .or_default()
                    .push((cell, tile.index));
            }

            groups.extend(by_tileset.into_iter().map(|(tileset_index, tiles)| LayerGroup {
                layer_index,
                layer,
                tileset_index,
                tiles,
            }));
        }

        groups
    }

    /// Create a single tilemap for one layer/tileset pair.
    fn create_tilemap(
        commands: &mut Commands,
        map_entity: Entity,
        group: &LayerGroup,
        first_gid: u32,
        tileset_name: &str,
        texture: &TilesetTexture,
    ) -> Entity {
        let map_size = TilemapSize {
            x: group.layer.width,
            y: group.layer.height,
        };

        let tile_size = TilemapTileSize {
            x: texture.tile_size.x,
            y: texture.tile_size.y,
        };

        let grid_size = TilemapGridSize {
            x: texture.tile_size.x,
            y: texture.tile_size.y,
        };

        let mut tile_storage = TileStorage::empty(map_size);

        // Spawn empty tilemap entity first (following bevy_ecs_tilemap pattern)
        let tilemap_entity = commands.spawn_empty().id();
        commands.entity(map_entity).add_child(tilemap_entity);

        let mut tile_entities = Vec::with_capacity(group.tiles.len());

        // Flip Y coordinate: Tiled has (0,0) at top-left, bevy_ecs_tilemap at bottom-left
        for &(cell, gid) in &group.tiles {
            let flipped_y = group.layer.height - 1 - cell.y;
            let tile_pos = TilePos {
                x: cell.x,
                y: flipped_y,
            };

            let tile_entity = commands
                .spawn((
                    TileBundle {
                        position: tile_pos,
                        texture_index: TileTextureIndex(gid - first_gid),
                        tilemap_id: TilemapId(tilemap_entity),
                        ..default()
                    },
                    GlobalTileId(gid),
                ))
                .id();

            tile_storage.set(&tile_pos, tile_entity);
            tile_entities.push(tile_entity);
        }

        commands.entity(tilemap_entity).add_children(&tile_entities);

        // Later layers draw on top
        let z = group.layer_index as f32;
        commands.entity(tilemap_entity).insert((
            TilemapBundle {
                grid_size,
                size: map_size,
                storage: tile_storage,
                texture: TilemapTexture::Single(texture.image.clone()),
                tile_size,
                map_type: TilemapType::Square,
                transform: Transform::from_xyz(tile_size.x / 2.0, tile_size.y / 2.0, z),
                ..default()
            },
            TilesetFirstGid(first_gid),
            Name::new(format!("Layer: {} ({})", group.layer.name, tileset_name)),
        ));

        tilemap_entity
    }
}
