//! Animation lifecycle events.

use bevy::prelude::*;

/// Fired on a map entity once its tile animations are running.
///
/// # Example
///
/// ```ignore
/// commands.spawn(TileAnimationSource { tilesets, layers })
///     .observe(|trigger: On<TileAnimationsStarted>| {
///         info!("{} animated tiles", trigger.event().animated_tiles);
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct TileAnimationsStarted {
    /// The map entity
    #[event_target]
    pub entity: Entity,
    /// Number of animated tile definitions found in the tilesets
    pub animated_tiles: usize,
    /// Number of placed tile entities being animated
    pub tracked_cells: usize,
}
