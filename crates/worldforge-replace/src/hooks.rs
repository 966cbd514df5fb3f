//! Post-mutation hooks: per-tile derived state recompute and the single
//! render invalidation emitted at the end of a batch.

use std::collections::BTreeSet;
use worldforge_core::id::TileId;
use worldforge_core::region::{Region, TilePosition};

/// Whatever draws the region. Told once per batch that its picture is stale.
pub trait RenderSurface {
    fn invalidate(&mut self);
}

/// A surface that only counts invalidations. Useful headless.
#[derive(Debug, Clone, Default)]
pub struct InvalidationCounter {
    count: usize,
}

impl InvalidationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl RenderSurface for InvalidationCounter {
    fn invalidate(&mut self) {
        self.count += 1;
    }
}

/// Tracks which tiles a batch has mutated.
///
/// Marking is idempotent, so a tile mutated by several components or
/// several overlapping rectangles is recomputed once.
#[derive(Debug, Clone, Default)]
pub struct TouchedTiles {
    tiles: BTreeSet<TileId>,
    order: Vec<TileId>,
}

impl TouchedTiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a tile as mutated. Returns `true` the first time.
    pub fn mark(&mut self, tile: TileId) -> bool {
        let fresh = self.tiles.insert(tile);
        if fresh {
            self.order.push(tile);
        }
        fresh
    }

    pub fn is_touched(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Touched tiles in the order they were first marked.
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.order.iter().copied()
    }
}

/// Recompute derived state once per touched tile, then invalidate the
/// surface once. Returns the positions of the recomputed tiles.
pub fn finish_batch<S: RenderSurface + ?Sized>(
    region: &mut Region,
    touched: &TouchedTiles,
    surface: &mut S,
) -> Vec<TilePosition> {
    let mut positions = Vec::with_capacity(touched.len());
    for id in touched.iter() {
        if let Some(tile) = region.tile_mut(id) {
            tile.recompute_derived_state();
            positions.push(tile.position());
        }
    }
    surface.invalidate();
    positions
}
