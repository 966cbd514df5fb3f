//! Tile and region store.
//!
//! A [`Region`] maps unique grid coordinates to [`Tile`]s. Tiles live in a
//! slot map so they keep a stable [`TileId`] while a position index
//! (`BTreeMap<TilePosition, TileId>`) answers rectangle queries.

use crate::component::{TerrainComponent, VariantKind};
use crate::id::{StaticId, TileId};
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A tile coordinate in region space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for TilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors from region operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("a tile already exists at {0}")]
    Occupied(TilePosition),
    #[error("no tile at {0}")]
    NoTile(TilePosition),
}

// ---------------------------------------------------------------------------
// Variant families
// ---------------------------------------------------------------------------

/// A group of variant kinds a caller can restrict component queries to.
pub trait ComponentFamily {
    fn includes(kind: VariantKind) -> bool;
}

/// Every terrain component.
pub struct AnyTerrain;

impl ComponentFamily for AnyTerrain {
    fn includes(_kind: VariantKind) -> bool {
        true
    }
}

/// Walkable ground: floors, water and ice.
pub struct FloorFamily;

impl ComponentFamily for FloorFamily {
    fn includes(kind: VariantKind) -> bool {
        matches!(
            kind,
            VariantKind::Floor | VariantKind::Water | VariantKind::PoisonedWater | VariantKind::Ice
        )
    }
}

/// Components that move whoever uses them to a destination.
pub struct TeleporterFamily;

impl ComponentFamily for TeleporterFamily {
    fn includes(kind: VariantKind) -> bool {
        matches!(
            kind,
            VariantKind::Rope | VariantKind::Shaft | VariantKind::Staircase | VariantKind::Sky
        )
    }
}

/// Spell effects layered over terrain.
pub struct ObscuringFamily;

impl ComponentFamily for ObscuringFamily {
    fn includes(kind: VariantKind) -> bool {
        matches!(
            kind,
            VariantKind::Darkness | VariantKind::Fire | VariantKind::Web | VariantKind::Whirlwind
        )
    }
}

// ---------------------------------------------------------------------------
// Derived terrain
// ---------------------------------------------------------------------------

/// Terrain state derived from a tile's components.
///
/// Only refreshed by [`Tile::recompute_derived_state`]; `revision` counts
/// how many times that has happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTerrain {
    pub movement_cost: u32,
    pub blocks_movement: bool,
    pub blocks_vision: bool,
    /// Graphics to draw, bottom to top.
    pub graphics: Vec<StaticId>,
    pub revision: u64,
}

impl Default for DerivedTerrain {
    fn default() -> Self {
        Self {
            movement_cost: 1,
            blocks_movement: false,
            blocks_vision: false,
            graphics: Vec::new(),
            revision: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One grid cell and its ordered terrain components.
#[derive(Debug, Clone)]
pub struct Tile {
    position: TilePosition,
    components: Vec<TerrainComponent>,
    derived: DerivedTerrain,
}

impl Tile {
    pub fn new(position: TilePosition) -> Self {
        Self {
            position,
            components: Vec::new(),
            derived: DerivedTerrain::default(),
        }
    }

    pub fn position(&self) -> TilePosition {
        self.position
    }

    pub fn components(&self) -> &[TerrainComponent] {
        &self.components
    }

    /// In-place access to components. The sequence itself cannot grow or
    /// shrink through this slice.
    pub fn components_mut(&mut self) -> &mut [TerrainComponent] {
        &mut self.components
    }

    /// Components restricted to a variant family, in stored order.
    pub fn components_of<F: ComponentFamily>(&self) -> FamilyIter<'_, F> {
        FamilyIter {
            inner: self.components.iter(),
            _family: PhantomData,
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Append a component.
    pub fn add_component(&mut self, component: TerrainComponent) {
        self.components.push(component);
    }

    /// Remove the component at `index`, preserving the order of the rest.
    pub fn remove_component(&mut self, index: usize) -> Option<TerrainComponent> {
        (index < self.components.len()).then(|| self.components.remove(index))
    }

    /// Replace components in one pass. Every component for which `replace`
    /// returns a new component is removed; the replacements are appended in
    /// the order their originals were stored. Returns how many were replaced.
    ///
    /// Replacements are never themselves offered to `replace`.
    pub fn replace_where<F>(&mut self, mut replace: F) -> usize
    where
        F: FnMut(usize, &TerrainComponent) -> Option<TerrainComponent>,
    {
        let mut kept = Vec::with_capacity(self.components.len());
        let mut appended = Vec::new();
        for (index, component) in std::mem::take(&mut self.components).into_iter().enumerate() {
            match replace(index, &component) {
                Some(new_component) => appended.push(new_component),
                None => kept.push(component),
            }
        }
        let replaced = appended.len();
        kept.extend(appended);
        self.components = kept;
        replaced
    }

    pub fn derived(&self) -> &DerivedTerrain {
        &self.derived
    }

    /// Rebuild [`DerivedTerrain`] from the current components.
    pub fn recompute_derived_state(&mut self) {
        let mut derived = DerivedTerrain {
            revision: self.derived.revision + 1,
            ..DerivedTerrain::default()
        };

        for component in &self.components {
            match component {
                TerrainComponent::Floor(floor) => {
                    derived.movement_cost = derived.movement_cost.max(floor.movement_cost);
                }
                TerrainComponent::Wall(_) => {
                    derived.blocks_movement = true;
                    derived.blocks_vision = true;
                }
                TerrainComponent::Door(door) if !door.is_opened => {
                    derived.blocks_movement = true;
                    derived.blocks_vision = true;
                }
                TerrainComponent::Obstruction(obstruction) => {
                    derived.blocks_movement = true;
                    derived.blocks_vision |= obstruction.blocks_vision;
                }
                TerrainComponent::Counter(_) => derived.blocks_movement = true,
                TerrainComponent::Darkness(_) => derived.blocks_vision = true,
                _ => {}
            }
            if let Some(id) = component
                .visible_static()
                .filter(|id| *id != StaticId::NONE && *id != StaticId::UNSET)
            {
                derived.graphics.push(id);
            }
        }

        self.derived = derived;
    }
}

/// Iterator returned by [`Tile::components_of`].
pub struct FamilyIter<'a, F> {
    inner: std::slice::Iter<'a, TerrainComponent>,
    _family: PhantomData<F>,
}

impl<'a, F: ComponentFamily> Iterator for FamilyIter<'a, F> {
    type Item = &'a TerrainComponent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|c| F::includes(c.kind()))
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An in-memory map segment: unique positions to tiles.
#[derive(Debug, Default)]
pub struct Region {
    tiles: SlotMap<TileId, Tile>,
    index: BTreeMap<TilePosition, TileId>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Tile management --

    /// Create an empty tile at `position`.
    pub fn insert_tile(&mut self, position: TilePosition) -> Result<TileId, RegionError> {
        if self.index.contains_key(&position) {
            return Err(RegionError::Occupied(position));
        }
        let id = self.tiles.insert(Tile::new(position));
        self.index.insert(position, id);
        Ok(id)
    }

    /// The tile at `position`, creating an empty one if needed.
    pub fn tile_or_insert(&mut self, position: TilePosition) -> TileId {
        if let Some(&id) = self.index.get(&position) {
            return id;
        }
        let id = self.tiles.insert(Tile::new(position));
        self.index.insert(position, id);
        id
    }

    /// Remove the tile at `position` with all its components.
    pub fn remove_tile(&mut self, position: TilePosition) -> Result<Tile, RegionError> {
        let id = self
            .index
            .remove(&position)
            .ok_or(RegionError::NoTile(position))?;
        self.tiles.remove(id).ok_or(RegionError::NoTile(position))
    }

    /// Append a component to the tile at `position`, creating the tile if needed.
    pub fn add_component(&mut self, position: TilePosition, component: TerrainComponent) -> TileId {
        let id = self.tile_or_insert(position);
        self.tiles[id].add_component(component);
        id
    }

    // -- Point queries --

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    pub fn tile_id_at(&self, position: TilePosition) -> Option<TileId> {
        self.index.get(&position).copied()
    }

    pub fn tile_at(&self, position: TilePosition) -> Option<&Tile> {
        self.tile_id_at(position).and_then(|id| self.tiles.get(id))
    }

    pub fn tile_at_mut(&mut self, position: TilePosition) -> Option<&mut Tile> {
        let id = self.tile_id_at(position)?;
        self.tiles.get_mut(id)
    }

    // -- Area queries --

    /// Every tile inside any rectangle of the selection, each exactly once,
    /// ordered by position.
    pub fn tiles_in(&self, selection: &Selection) -> Vec<TileId> {
        let mut found = BTreeSet::new();
        for rect in selection.rectangles() {
            let Some((min, max)) = rect.corners() else {
                continue;
            };
            for (&pos, _) in self.index.range(min..=max) {
                if rect.contains(pos) {
                    found.insert(pos);
                }
            }
        }
        found.into_iter().map(|pos| self.index[&pos]).collect()
    }

    /// Iterate all tiles in position order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.index.values().map(move |&id| (id, &self.tiles[id]))
    }

    // -- Stats --

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Total number of components across all tiles.
    pub fn component_count(&self) -> usize {
        self.tiles.values().map(Tile::component_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::*;
    use crate::selection::Rectangle;

    fn floor(ground: i32) -> TerrainComponent {
        TerrainComponent::Floor(FloorComponent {
            ground: StaticId(ground),
            movement_cost: 1,
        })
    }

    fn fire() -> TerrainComponent {
        TerrainComponent::Fire(FireComponent { can_dispel: true })
    }

    // -----------------------------------------------------------------------
    // Tile tests
    // -----------------------------------------------------------------------

    #[test]
    fn components_of_filters_by_family() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(floor(1));
        tile.add_component(fire());
        tile.add_component(TerrainComponent::Ice(IceComponent {
            ground: StaticId(2),
        }));

        assert_eq!(tile.components_of::<AnyTerrain>().count(), 3);
        let floors: Vec<_> = tile
            .components_of::<FloorFamily>()
            .map(|c| c.kind())
            .collect();
        assert_eq!(floors, vec![VariantKind::Floor, VariantKind::Ice]);
        assert_eq!(tile.components_of::<ObscuringFamily>().count(), 1);
        assert_eq!(tile.components_of::<TeleporterFamily>().count(), 0);
    }

    #[test]
    fn replace_where_appends_in_original_order() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(floor(1));
        tile.add_component(fire());
        tile.add_component(floor(2));

        let replaced = tile.replace_where(|_, c| match c {
            TerrainComponent::Floor(f) => Some(TerrainComponent::Ice(IceComponent {
                ground: f.ground,
            })),
            _ => None,
        });

        assert_eq!(replaced, 2);
        let kinds: Vec<_> = tile.components().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![VariantKind::Fire, VariantKind::Ice, VariantKind::Ice]
        );
        assert_eq!(tile.components()[1].dominant_value(), Some(StaticId(1)));
        assert_eq!(tile.components()[2].dominant_value(), Some(StaticId(2)));
    }

    #[test]
    fn replace_where_never_revisits_replacements() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(floor(1));
        let mut calls = 0;
        tile.replace_where(|_, c| {
            calls += 1;
            Some(c.clone())
        });
        assert_eq!(calls, 1);
        assert_eq!(tile.component_count(), 1);
    }

    #[test]
    fn remove_component_out_of_range() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(fire());
        assert!(tile.remove_component(3).is_none());
        assert_eq!(tile.remove_component(0), Some(fire()));
        assert_eq!(tile.component_count(), 0);
    }

    #[test]
    fn recompute_derives_blocking_and_graphics() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(TerrainComponent::Floor(FloorComponent {
            ground: StaticId(3),
            movement_cost: 4,
        }));
        tile.add_component(TerrainComponent::Wall(WallComponent {
            wall: StaticId(20),
            ruins: StaticId(0),
            destroyed: StaticId(0),
            is_indestructible: false,
        }));
        tile.add_component(fire());

        assert_eq!(tile.derived().revision, 0);
        tile.recompute_derived_state();

        let derived = tile.derived();
        assert_eq!(derived.revision, 1);
        assert_eq!(derived.movement_cost, 4);
        assert!(derived.blocks_movement);
        assert!(derived.blocks_vision);
        assert_eq!(derived.graphics, vec![StaticId(3), StaticId(20)]);
    }

    #[test]
    fn open_door_does_not_block() {
        let mut tile = Tile::new(TilePosition::new(0, 0));
        tile.add_component(TerrainComponent::Door(DoorComponent {
            closed_id: StaticId(5),
            open_id: StaticId(6),
            secret_id: StaticId(0),
            destroyed_id: StaticId(0),
            is_secret: false,
            is_opened: true,
        }));
        tile.recompute_derived_state();
        assert!(!tile.derived().blocks_movement);
        assert_eq!(tile.derived().graphics, vec![StaticId(6)]);
    }

    // -----------------------------------------------------------------------
    // Region tests
    // -----------------------------------------------------------------------

    #[test]
    fn insert_tile_rejects_duplicate_position() {
        let mut region = Region::new();
        let pos = TilePosition::new(1, 1);
        region.insert_tile(pos).unwrap();
        assert_eq!(region.insert_tile(pos), Err(RegionError::Occupied(pos)));
        assert_eq!(region.tile_count(), 1);
    }

    #[test]
    fn add_component_reuses_tile() {
        let mut region = Region::new();
        let pos = TilePosition::new(4, -2);
        let a = region.add_component(pos, floor(1));
        let b = region.add_component(pos, fire());
        assert_eq!(a, b);
        assert_eq!(region.tile_count(), 1);
        assert_eq!(region.component_count(), 2);
        assert_eq!(region.tile_at(pos).unwrap().position(), pos);
    }

    #[test]
    fn remove_tile_frees_position() {
        let mut region = Region::new();
        let pos = TilePosition::new(0, 0);
        region.add_component(pos, floor(1));
        let tile = region.remove_tile(pos).unwrap();
        assert_eq!(tile.component_count(), 1);
        assert!(region.tile_at(pos).is_none());
        assert_eq!(region.remove_tile(pos).unwrap_err(), RegionError::NoTile(pos));
    }

    #[test]
    fn tiles_in_respects_rect_bounds() {
        let mut region = Region::new();
        for x in 0..5 {
            for y in 0..5 {
                region.insert_tile(TilePosition::new(x, y)).unwrap();
            }
        }
        let selection = Selection::single(Rectangle::new(1, 1, 2, 3));
        let ids = region.tiles_in(&selection);
        assert_eq!(ids.len(), 6);
        for id in ids {
            let pos = region.tile(id).unwrap().position();
            assert!((1..3).contains(&pos.x));
            assert!((1..4).contains(&pos.y));
        }
    }

    #[test]
    fn tiles_in_overlapping_rects_has_no_duplicates() {
        let mut region = Region::new();
        for x in 0..4 {
            for y in 0..4 {
                region.insert_tile(TilePosition::new(x, y)).unwrap();
            }
        }
        let selection = Selection::new()
            .with(Rectangle::new(0, 0, 3, 3))
            .with(Rectangle::new(1, 1, 3, 3));
        let ids = region.tiles_in(&selection);
        let unique: BTreeSet<_> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        // 9 + 9 - 4 overlapping
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn tiles_in_skips_missing_positions_and_empty_selection() {
        let mut region = Region::new();
        region.insert_tile(TilePosition::new(10, 10)).unwrap();
        assert!(region.tiles_in(&Selection::new()).is_empty());
        let selection = Selection::single(Rectangle::new(0, 0, 10, 10));
        assert!(region.tiles_in(&selection).is_empty());
    }

    #[test]
    fn tiles_in_is_position_ordered() {
        let mut region = Region::new();
        region.insert_tile(TilePosition::new(2, 0)).unwrap();
        region.insert_tile(TilePosition::new(0, 1)).unwrap();
        region.insert_tile(TilePosition::new(0, 0)).unwrap();
        let ids = region.tiles_in(&Selection::single(Rectangle::new(0, 0, 3, 3)));
        let positions: Vec<_> = ids
            .iter()
            .map(|&id| region.tile(id).unwrap().position())
            .collect();
        assert_eq!(
            positions,
            vec![
                TilePosition::new(0, 0),
                TilePosition::new(0, 1),
                TilePosition::new(2, 0)
            ]
        );
    }
}
