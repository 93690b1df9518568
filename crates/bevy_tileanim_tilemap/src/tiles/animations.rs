//! Tile animation systems.
//!
//! The driver from `bevy_tileanim_core` runs against tile entities here: a
//! layer is a tilemap entity with a `TileStorage`, and a cell is a tile entity
//! with a [`GlobalTileId`].

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::*;
use bevy_tileanim_core::{AnimatedTile, TileAnimationDriver, TileIndexSink, TileMapView, TileSet};

use crate::components::{GlobalTileId, TileAnimationSource, TileAnimator, TilesetFirstGid};
use crate::events::TileAnimationsStarted;
use crate::features::{AnimationSpeed, AnimationsPaused};

/// Read-only view of a map's tilemap entities.
struct EcsTileMap<'a, 'w, 's, 'q> {
    tilesets: &'a [TileSet],
    layers: Vec<&'a TileStorage>,
    gids: &'a Query<'w, 's, &'q GlobalTileId>,
}

impl TileMapView for EcsTileMap<'_, '_, '_, '_> {
    type Cell = Entity;

    fn tilesets(&self) -> &[TileSet] {
        self.tilesets
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_cells(&self, layer: usize) -> impl Iterator<Item = (Entity, u32)> + '_ {
        self.layers
            .get(layer)
            .into_iter()
            .flat_map(|storage| storage.iter().flatten().copied())
            .filter_map(|entity| self.gids.get(entity).ok().map(|gid| (entity, gid.0)))
    }
}

/// Writes new frames into tile entities.
struct GlobalTileIdWriter<'a, 'w, 's, 'q> {
    gids: &'a mut Query<'w, 's, &'q mut GlobalTileId>,
}

impl TileIndexSink<Entity> for GlobalTileIdWriter<'_, '_, '_, '_> {
    fn set_index(&mut self, _layer: usize, cell: Entity, index: u32) {
        // Tiles despawned by other systems are simply skipped
        if let Ok(mut gid) = self.gids.get_mut(cell) {
            gid.0 = index;
        }
    }
}

/// System that builds a [`TileAnimator`] for every requested map.
///
/// Waits until all layer entities carry a `TileStorage`, then scans them once.
/// Tiles added to the layers afterwards are not animated.
pub fn start_tile_animations(
    mut commands: Commands,
    sources: Query<(Entity, &TileAnimationSource), Without<TileAnimator>>,
    storages: Query<&TileStorage>,
    gids: Query<&GlobalTileId>,
) {
    for (map_entity, source) in &sources {
        let layers: Vec<&TileStorage> = source
            .layers
            .iter()
            .filter_map(|layer| storages.get(*layer).ok())
            .collect();

        if layers.len() != source.layers.len() {
            debug!(
                "Layers of map {:?} are not ready yet, deferring tile animations",
                map_entity
            );
            continue;
        }

        let view = EcsTileMap {
            tilesets: &source.tilesets,
            layers,
            gids: &gids,
        };
        let driver = TileAnimationDriver::initialize(&view);

        let animated_tiles = driver.len();
        let tracked_cells: usize = driver.tiles().iter().map(AnimatedTile::occurrence_count).sum();
        info!(
            "Started {} tile animations on map {:?} ({} tiles)",
            animated_tiles, map_entity, tracked_cells
        );

        commands.entity(map_entity).insert(TileAnimator { driver });
        commands
            .entity(map_entity)
            .trigger(move |entity| TileAnimationsStarted {
                entity,
                animated_tiles,
                tracked_cells,
            });
    }
}

/// System that advances all tile animations.
///
/// Converts the frame delta to milliseconds, scaled by [`AnimationSpeed`], and
/// does nothing while [`AnimationsPaused`] is present.
pub fn advance_tile_animations(
    time: Res<Time>,
    speed: Res<AnimationSpeed>,
    paused: Option<Res<AnimationsPaused>>,
    mut animators: Query<&mut TileAnimator>,
    mut gids: Query<&mut GlobalTileId>,
) {
    // Skip if animations are paused
    if paused.is_some() {
        return;
    }

    let delta_ms = time.delta_secs() * 1000.0 * speed.clamped();
    let mut writer = GlobalTileIdWriter { gids: &mut gids };

    for mut animator in &mut animators {
        animator.driver.advance(delta_ms, &mut writer);
    }
}

/// System that mirrors changed [`GlobalTileId`]s into `TileTextureIndex`.
pub fn sync_tile_texture_indices(
    tilemaps: Query<&TilesetFirstGid>,
    mut tiles: Query<(&GlobalTileId, &TilemapId, &mut TileTextureIndex), Changed<GlobalTileId>>,
) {
    for (gid, tilemap_id, mut texture_index) in &mut tiles {
        let Ok(first_gid) = tilemaps.get(tilemap_id.0) else {
            warn!("Tilemap {:?} has no TilesetFirstGid, skipping", tilemap_id.0);
            continue;
        };
        let index = gid.0.saturating_sub(first_gid.0);
        if texture_index.0 != index {
            texture_index.0 = index;
        }
    }
}

/// Stop animating a map. Its tiles keep whatever frame they show.
pub fn stop_tile_animations(commands: &mut Commands, map_entity: Entity) {
    commands
        .entity(map_entity)
        .remove::<(TileAnimator, TileAnimationSource)>();
}

/// Observer ending a map's animations once its [`TileAnimator`] goes away.
///
/// Drops the [`TileAnimationSource`] too, so `start_tile_animations` does not
/// rebuild a driver from the frames the tiles currently show.
pub fn on_tile_animator_removed(trigger: On<Remove, TileAnimator>, mut commands: Commands) {
    let map_entity = trigger.event().entity;
    debug!("Tile animations stopped for map {:?}", map_entity);
    // The map may be mid-despawn
    commands.entity(map_entity).try_remove::<TileAnimationSource>();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy_tileanim_core::{AnimationDef, Frame};

    use super::*;

    struct Fixture {
        world: World,
        map: Entity,
        tilemap: Entity,
        water: Entity,
        sand: Entity,
    }

    /// Tileset at first gid 100; local tile 5 cycles 5 -> 6.
    fn fixture() -> Fixture {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<AnimationSpeed>();
        world.add_observer(on_tile_animator_removed);

        let tilemap = world.spawn(TilesetFirstGid(100)).id();
        let water = world
            .spawn((GlobalTileId(105), TileTextureIndex(5), TilemapId(tilemap)))
            .id();
        let sand = world
            .spawn((GlobalTileId(101), TileTextureIndex(1), TilemapId(tilemap)))
            .id();

        let mut storage = TileStorage::empty(TilemapSize { x: 2, y: 1 });
        storage.set(&TilePos { x: 0, y: 0 }, water);
        storage.set(&TilePos { x: 1, y: 0 }, sand);
        world.entity_mut(tilemap).insert(storage);

        let tileset = TileSet::new("water", 100, 16).with_animation(
            5,
            AnimationDef::new(vec![Frame::new(200, 5), Frame::new(300, 6)]),
        );
        let map = world
            .spawn(TileAnimationSource {
                tilesets: vec![tileset],
                layers: vec![tilemap],
            })
            .id();

        Fixture {
            world,
            map,
            tilemap,
            water,
            sand,
        }
    }

    impl Fixture {
        fn start(&mut self) {
            self.world.run_system_once(start_tile_animations).unwrap();
        }

        fn step(&mut self, ms: u64) {
            self.world
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(ms));
            self.world.run_system_once(advance_tile_animations).unwrap();
            self.world.run_system_once(sync_tile_texture_indices).unwrap();
        }

        fn gid(&self, entity: Entity) -> u32 {
            self.world.get::<GlobalTileId>(entity).unwrap().0
        }

        fn texture_index(&self, entity: Entity) -> u32 {
            self.world.get::<TileTextureIndex>(entity).unwrap().0
        }
    }

    #[test]
    fn start_snapshots_matching_tiles() {
        let mut fx = fixture();
        fx.start();

        let animator = fx.world.get::<TileAnimator>(fx.map).unwrap();
        assert_eq!(animator.driver().len(), 1);
        let tile = animator.driver().tile(105).unwrap();
        assert_eq!(tile.occurrences(), &[vec![fx.water]]);
        assert_eq!(tile.remaining(), 200.0);
    }

    #[test]
    fn advance_swaps_frame_and_syncs_texture_index() {
        let mut fx = fixture();
        fx.start();

        fx.step(100);
        assert_eq!(fx.gid(fx.water), 105);

        fx.step(150);
        assert_eq!(fx.gid(fx.water), 106);
        assert_eq!(fx.texture_index(fx.water), 6);
        assert_eq!(fx.gid(fx.sand), 101);
        assert_eq!(fx.texture_index(fx.sand), 1);

        let animator = fx.world.get::<TileAnimator>(fx.map).unwrap();
        assert_eq!(animator.driver().tile(105).unwrap().remaining(), 300.0);
    }

    #[test]
    fn paused_animations_do_not_advance() {
        let mut fx = fixture();
        fx.start();
        fx.world.insert_resource(AnimationsPaused);

        fx.step(1_000);
        assert_eq!(fx.gid(fx.water), 105);

        fx.world.remove_resource::<AnimationsPaused>();
        fx.step(250);
        assert_eq!(fx.gid(fx.water), 106);
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let mut fx = fixture();
        fx.start();
        fx.world.insert_resource(AnimationSpeed(2.0));

        fx.step(150);
        assert_eq!(fx.gid(fx.water), 106);
    }

    #[test]
    fn start_waits_for_tile_storage() {
        let mut fx = fixture();
        let storage = fx.world.entity_mut(fx.tilemap).take::<TileStorage>().unwrap();

        fx.start();
        assert!(fx.world.get::<TileAnimator>(fx.map).is_none());

        fx.world.entity_mut(fx.tilemap).insert(storage);
        fx.start();
        assert!(fx.world.get::<TileAnimator>(fx.map).is_some());
    }

    #[test]
    fn stopping_releases_the_driver() {
        let mut fx = fixture();
        fx.start();

        let map = fx.map;
        fx.world
            .run_system_once(move |mut commands: Commands| stop_tile_animations(&mut commands, map))
            .unwrap();
        assert!(fx.world.get::<TileAnimator>(fx.map).is_none());
        assert!(fx.world.get::<TileAnimationSource>(fx.map).is_none());

        fx.step(1_000);
        assert_eq!(fx.gid(fx.water), 105);
    }

    #[test]
    fn removing_the_animator_does_not_restart_animations() {
        let mut fx = fixture();
        fx.start();
        fx.step(250);
        assert_eq!(fx.gid(fx.water), 106);

        fx.world.entity_mut(fx.map).remove::<TileAnimator>();
        fx.world.flush();
        assert!(fx.world.get::<TileAnimationSource>(fx.map).is_none());

        fx.start();
        assert!(fx.world.get::<TileAnimator>(fx.map).is_none());

        fx.step(1_000);
        assert_eq!(fx.gid(fx.water), 106);
    }

    #[test]
    fn despawning_an_animated_map_is_clean() {
        let mut fx = fixture();
        fx.start();

        fx.world.despawn(fx.map);
        fx.world.flush();
        assert!(fx.world.get_entity(fx.map).is_err());

        fx.step(1_000);
        assert_eq!(fx.gid(fx.water), 105);
    }
}
