//! WorldForge Core -- the in-memory terrain model behind the region editor.
//!
//! # Key Types
//!
//! - [`component::TerrainComponent`] -- closed set of terrain component
//!   variants (walls, doors, floors, teleporters, spell effects, ...).
//! - [`component::VariantKind`] -- variant tags and name resolution.
//! - [`region::Region`] -- unique tile coordinates mapped to [`region::Tile`]s,
//!   each holding an ordered component list and its derived terrain state.
//! - [`selection::Selection`] -- a set of rectangles a batch edit may touch.

pub mod component;
pub mod id;
pub mod region;
pub mod selection;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
