use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a tile in a region. Stable for the lifetime of the tile.
    pub struct TileId;
}

/// A key into the external static/graphic catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticId(pub i32);

impl StaticId {
    /// The "no graphic" id used for unset secondary fields.
    pub const NONE: StaticId = StaticId(0);
    /// Written into a converted component's primary field when the source
    /// had no static ID to carry over.
    pub const UNSET: StaticId = StaticId(-1);
}

impl From<i32> for StaticId {
    fn from(value: i32) -> Self {
        StaticId(value)
    }
}

impl std::fmt::Display for StaticId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a region (map segment) a teleporter can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u32);
