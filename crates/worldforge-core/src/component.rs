//! Terrain component variant model.
//!
//! A tile holds an ordered list of [`TerrainComponent`]s. The set of
//! variants is closed: every kind is listed in [`VariantKind`] and every
//! operation on components is an exhaustive match over it.
//!
//! Each variant carries zero or more *static-ID fields* (references into the
//! external graphic catalog) and zero or more *auxiliary fields* (flags,
//! small integers, directions). One static-ID field per variant is its
//! *dominant value*, used as the component's identity when converting it into
//! another variant. Variants without static-ID fields have no dominant value.

use crate::id::{RegionId, StaticId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Variant tags
// ---------------------------------------------------------------------------

/// Discriminant tag for terrain component variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantKind {
    Static,
    Floor,
    Water,
    PoisonedWater,
    Ice,
    Tree,
    Ruins,
    Altar,
    Counter,
    Door,
    Obstruction,
    Wall,
    Rope,
    Shaft,
    Staircase,
    Sky,
    Darkness,
    Fire,
    Web,
    Whirlwind,
    Trash,
}

/// Total number of variant kinds.
pub const VARIANT_KIND_COUNT: usize = 21;

/// A variant name that does not resolve to any [`VariantKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown terrain component type '{0}'")]
pub struct UnknownVariant(pub String);

impl VariantKind {
    /// Every variant kind, in declaration order.
    pub const ALL: [VariantKind; VARIANT_KIND_COUNT] = [
        VariantKind::Static,
        VariantKind::Floor,
        VariantKind::Water,
        VariantKind::PoisonedWater,
        VariantKind::Ice,
        VariantKind::Tree,
        VariantKind::Ruins,
        VariantKind::Altar,
        VariantKind::Counter,
        VariantKind::Door,
        VariantKind::Obstruction,
        VariantKind::Wall,
        VariantKind::Rope,
        VariantKind::Shaft,
        VariantKind::Staircase,
        VariantKind::Sky,
        VariantKind::Darkness,
        VariantKind::Fire,
        VariantKind::Web,
        VariantKind::Whirlwind,
        VariantKind::Trash,
    ];

    /// The stored type name shown in the editor's type pickers.
    pub fn type_name(self) -> &'static str {
        match self {
            VariantKind::Static => "StaticComponent",
            VariantKind::Floor => "FloorComponent",
            VariantKind::Water => "WaterComponent",
            VariantKind::PoisonedWater => "PoisonedWaterComponent",
            VariantKind::Ice => "IceComponent",
            VariantKind::Tree => "TreeComponent",
            VariantKind::Ruins => "RuinsComponent",
            VariantKind::Altar => "AltarComponent",
            VariantKind::Counter => "CounterComponent",
            VariantKind::Door => "DoorComponent",
            VariantKind::Obstruction => "ObstructionComponent",
            VariantKind::Wall => "WallComponent",
            VariantKind::Rope => "RopeComponent",
            VariantKind::Shaft => "ShaftComponent",
            VariantKind::Staircase => "StaircaseComponent",
            VariantKind::Sky => "SkyComponent",
            VariantKind::Darkness => "Darkness",
            VariantKind::Fire => "Fire",
            VariantKind::Web => "Web",
            VariantKind::Whirlwind => "Whirlwind",
            VariantKind::Trash => "Trash",
        }
    }

    /// Resolve a type name to a variant kind.
    ///
    /// Matching ignores ASCII case, surrounding whitespace and a trailing
    /// `Component` suffix, so `"wall"`, `"Wall"` and `"WallComponent"` all
    /// resolve to [`VariantKind::Wall`]. Names are compared whole, never by
    /// suffix, so `"Water"` never matches `PoisonedWater`.
    pub fn resolve(name: &str) -> Option<VariantKind> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.type_name()) == wanted)
    }

    /// Sorted type names offered in the editor's type pickers.
    pub fn choices() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Self::ALL.iter().map(|k| k.type_name()).collect();
        names.sort_unstable();
        names
    }

    /// Whether components of this kind carry a dominant static ID.
    pub fn has_dominant_value(self) -> bool {
        !matches!(
            self,
            VariantKind::Darkness
                | VariantKind::Fire
                | VariantKind::Web
                | VariantKind::Whirlwind
                | VariantKind::Trash
        )
    }
}

fn normalize(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    match lower.strip_suffix("component") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}

impl FromStr for VariantKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantKind::resolve(s).ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

// ---------------------------------------------------------------------------
// Auxiliary field types
// ---------------------------------------------------------------------------

/// Side from which a counter can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessDirection {
    #[default]
    None,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Where a teleporter sends whoever uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Destination {
    pub x: i32,
    pub y: i32,
    pub region: RegionId,
}

// ---------------------------------------------------------------------------
// Variant payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticComponent {
    pub static_id: StaticId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorComponent {
    pub ground: StaticId,
    pub movement_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterComponent {
    pub ground: StaticId,
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoisonedWaterComponent {
    pub ground: StaticId,
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceComponent {
    pub ground: StaticId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeComponent {
    pub tree: StaticId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuinsComponent {
    pub ruins: StaticId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltarComponent {
    pub altar: StaticId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterComponent {
    pub counter: StaticId,
    pub access_direction: AccessDirection,
}

/// A door. `closed_id` is the graphic it shows by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorComponent {
    pub closed_id: StaticId,
    pub open_id: StaticId,
    pub secret_id: StaticId,
    pub destroyed_id: StaticId,
    pub is_secret: bool,
    pub is_opened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstructionComponent {
    pub obstruction: StaticId,
    pub blocks_vision: bool,
}

/// A wall, with the graphics it shows once ruined or destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallComponent {
    pub wall: StaticId,
    pub ruins: StaticId,
    pub destroyed: StaticId,
    pub is_indestructible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RopeComponent {
    pub teleporter_id: StaticId,
    pub destination: Destination,
    pub is_secret: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaftComponent {
    pub teleporter_id: StaticId,
    pub destination: Destination,
    /// Percent chance to slip while climbing.
    pub slip_chance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaircaseComponent {
    pub teleporter_id: StaticId,
    pub destination: Destination,
    pub descends: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyComponent {
    pub teleporter_id: StaticId,
    pub destination: Destination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarknessComponent {
    pub can_dispel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireComponent {
    pub can_dispel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebComponent {
    pub can_dispel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhirlwindComponent {
    pub damage: u32,
    pub can_dispel: bool,
}

// ---------------------------------------------------------------------------
// TerrainComponent
// ---------------------------------------------------------------------------

/// One terrain component instance on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainComponent {
    Static(StaticComponent),
    Floor(FloorComponent),
    Water(WaterComponent),
    PoisonedWater(PoisonedWaterComponent),
    Ice(IceComponent),
    Tree(TreeComponent),
    Ruins(RuinsComponent),
    Altar(AltarComponent),
    Counter(CounterComponent),
    Door(DoorComponent),
    Obstruction(ObstructionComponent),
    Wall(WallComponent),
    Rope(RopeComponent),
    Shaft(ShaftComponent),
    Staircase(StaircaseComponent),
    Sky(SkyComponent),
    Darkness(DarknessComponent),
    Fire(FireComponent),
    Web(WebComponent),
    Whirlwind(WhirlwindComponent),
    Trash,
}

impl TerrainComponent {
    /// Get the variant tag for this component.
    pub fn kind(&self) -> VariantKind {
        match self {
            TerrainComponent::Static(_) => VariantKind::Static,
            TerrainComponent::Floor(_) => VariantKind::Floor,
            TerrainComponent::Water(_) => VariantKind::Water,
            TerrainComponent::PoisonedWater(_) => VariantKind::PoisonedWater,
            TerrainComponent::Ice(_) => VariantKind::Ice,
            TerrainComponent::Tree(_) => VariantKind::Tree,
            TerrainComponent::Ruins(_) => VariantKind::Ruins,
            TerrainComponent::Altar(_) => VariantKind::Altar,
            TerrainComponent::Counter(_) => VariantKind::Counter,
            TerrainComponent::Door(_) => VariantKind::Door,
            TerrainComponent::Obstruction(_) => VariantKind::Obstruction,
            TerrainComponent::Wall(_) => VariantKind::Wall,
            TerrainComponent::Rope(_) => VariantKind::Rope,
            TerrainComponent::Shaft(_) => VariantKind::Shaft,
            TerrainComponent::Staircase(_) => VariantKind::Staircase,
            TerrainComponent::Sky(_) => VariantKind::Sky,
            TerrainComponent::Darkness(_) => VariantKind::Darkness,
            TerrainComponent::Fire(_) => VariantKind::Fire,
            TerrainComponent::Web(_) => VariantKind::Web,
            TerrainComponent::Whirlwind(_) => VariantKind::Whirlwind,
            TerrainComponent::Trash => VariantKind::Trash,
        }
    }

    /// The static ID treated as this component's identity, or `None` for
    /// variants that carry no static ID.
    pub fn dominant_value(&self) -> Option<StaticId> {
        match self {
            TerrainComponent::Static(c) => Some(c.static_id),
            TerrainComponent::Floor(c) => Some(c.ground),
            TerrainComponent::Water(c) => Some(c.ground),
            TerrainComponent::PoisonedWater(c) => Some(c.ground),
            TerrainComponent::Ice(c) => Some(c.ground),
            TerrainComponent::Tree(c) => Some(c.tree),
            TerrainComponent::Ruins(c) => Some(c.ruins),
            TerrainComponent::Altar(c) => Some(c.altar),
            TerrainComponent::Counter(c) => Some(c.counter),
            TerrainComponent::Door(c) => Some(c.closed_id),
            TerrainComponent::Obstruction(c) => Some(c.obstruction),
            TerrainComponent::Wall(c) => Some(c.wall),
            TerrainComponent::Rope(c) => Some(c.teleporter_id),
            TerrainComponent::Shaft(c) => Some(c.teleporter_id),
            TerrainComponent::Staircase(c) => Some(c.teleporter_id),
            TerrainComponent::Sky(c) => Some(c.teleporter_id),
            TerrainComponent::Darkness(_)
            | TerrainComponent::Fire(_)
            | TerrainComponent::Web(_)
            | TerrainComponent::Whirlwind(_)
            | TerrainComponent::Trash => None,
        }
    }

    /// Mutable references to every remappable static-ID field, in field order.
    ///
    /// A door's `secret_id` is not remappable.
    pub fn static_ids_mut(&mut self) -> Vec<&mut StaticId> {
        match self {
            TerrainComponent::Static(c) => vec![&mut c.static_id],
            TerrainComponent::Floor(c) => vec![&mut c.ground],
            TerrainComponent::Water(c) => vec![&mut c.ground],
            TerrainComponent::PoisonedWater(c) => vec![&mut c.ground],
            TerrainComponent::Ice(c) => vec![&mut c.ground],
            TerrainComponent::Tree(c) => vec![&mut c.tree],
            TerrainComponent::Ruins(c) => vec![&mut c.ruins],
            TerrainComponent::Altar(c) => vec![&mut c.altar],
            TerrainComponent::Counter(c) => vec![&mut c.counter],
            TerrainComponent::Door(c) => vec![&mut c.open_id, &mut c.closed_id, &mut c.destroyed_id],
            TerrainComponent::Obstruction(c) => vec![&mut c.obstruction],
            TerrainComponent::Wall(c) => vec![&mut c.wall, &mut c.ruins, &mut c.destroyed],
            TerrainComponent::Rope(c) => vec![&mut c.teleporter_id],
            TerrainComponent::Shaft(c) => vec![&mut c.teleporter_id],
            TerrainComponent::Staircase(c) => vec![&mut c.teleporter_id],
            TerrainComponent::Sky(c) => vec![&mut c.teleporter_id],
            TerrainComponent::Darkness(_)
            | TerrainComponent::Fire(_)
            | TerrainComponent::Web(_)
            | TerrainComponent::Whirlwind(_)
            | TerrainComponent::Trash => Vec::new(),
        }
    }

    /// Rewrite every remappable static-ID field equal to `from` to `to`.
    /// Returns the number of fields whose value actually changed.
    pub fn remap_static_id(&mut self, from: StaticId, to: StaticId) -> usize {
        if from == to {
            return 0;
        }
        let mut changed = 0;
        for field in self.static_ids_mut() {
            if *field == from {
                *field = to;
                changed += 1;
            }
        }
        changed
    }

    /// The graphic this component currently shows, if any.
    pub fn visible_static(&self) -> Option<StaticId> {
        match self {
            TerrainComponent::Door(door) if door.is_opened => Some(door.open_id),
            TerrainComponent::Door(door) if door.is_secret => Some(door.secret_id),
            other => other.dominant_value(),
        }
    }
}
