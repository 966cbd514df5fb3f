//! Per-variant construction templates used by type conversion.
//!
//! A template builds a fresh component of its variant from a single
//! dominant static ID. Every other field gets a fixed default.

use worldforge_core::component::*;
use worldforge_core::id::StaticId;

/// Movement cost of a floor built by conversion.
pub const DEFAULT_MOVEMENT_COST: u32 = 1;
/// Depth of water built by conversion.
pub const DEFAULT_WATER_DEPTH: u32 = 3;
/// Damage of a whirlwind built by conversion.
pub const DEFAULT_WHIRLWIND_DAMAGE: u32 = 3;

/// Knows how to build one variant from a dominant value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionTemplate {
    kind: VariantKind,
}

impl ConstructionTemplate {
    pub fn for_kind(kind: VariantKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    /// Build a new component. `dominant` lands in the variant's primary
    /// static-ID field; a missing value becomes [`StaticId::UNSET`] while the
    /// secondary fields stay [`StaticId::NONE`]. Variants without static-ID
    /// fields ignore it.
    pub fn build(&self, dominant: Option<StaticId>) -> TerrainComponent {
        let v = dominant.unwrap_or(StaticId::UNSET);
        let nowhere = Destination::default();
        match self.kind {
            VariantKind::Static => TerrainComponent::Static(StaticComponent { static_id: v }),
            VariantKind::Floor => TerrainComponent::Floor(FloorComponent {
                ground: v,
                movement_cost: DEFAULT_MOVEMENT_COST,
            }),
            VariantKind::Water => TerrainComponent::Water(WaterComponent {
                ground: v,
                depth: DEFAULT_WATER_DEPTH,
            }),
            VariantKind::PoisonedWater => TerrainComponent::PoisonedWater(PoisonedWaterComponent {
                ground: v,
                depth: DEFAULT_WATER_DEPTH,
            }),
            VariantKind::Ice => TerrainComponent::Ice(IceComponent { ground: v }),
            VariantKind::Tree => TerrainComponent::Tree(TreeComponent { tree: v }),
            VariantKind::Ruins => TerrainComponent::Ruins(RuinsComponent { ruins: v }),
            VariantKind::Altar => TerrainComponent::Altar(AltarComponent { altar: v }),
            VariantKind::Counter => TerrainComponent::Counter(CounterComponent {
                counter: v,
                access_direction: AccessDirection::None,
            }),
            VariantKind::Door => TerrainComponent::Door(DoorComponent {
                closed_id: v,
                open_id: StaticId::NONE,
                secret_id: StaticId::NONE,
                destroyed_id: StaticId::NONE,
                is_secret: false,
                is_opened: false,
            }),
            VariantKind::Obstruction => TerrainComponent::Obstruction(ObstructionComponent {
                obstruction: v,
                blocks_vision: false,
            }),
            VariantKind::Wall => TerrainComponent::Wall(WallComponent {
                wall: v,
                ruins: StaticId::NONE,
                destroyed: StaticId::NONE,
                is_indestructible: false,
            }),
            VariantKind::Rope => TerrainComponent::Rope(RopeComponent {
                teleporter_id: v,
                destination: nowhere,
                is_secret: false,
            }),
            VariantKind::Shaft => TerrainComponent::Shaft(ShaftComponent {
                teleporter_id: v,
                destination: nowhere,
                slip_chance: 0,
            }),
            VariantKind::Staircase => TerrainComponent::Staircase(StaircaseComponent {
                teleporter_id: v,
                destination: nowhere,
                descends: false,
            }),
            VariantKind::Sky => TerrainComponent::Sky(SkyComponent {
                teleporter_id: v,
                destination: nowhere,
            }),
            VariantKind::Darkness => TerrainComponent::Darkness(DarknessComponent { can_dispel: true }),
            VariantKind::Fire => TerrainComponent::Fire(FireComponent { can_dispel: true }),
            VariantKind::Web => TerrainComponent::Web(WebComponent { can_dispel: true }),
            VariantKind::Whirlwind => TerrainComponent::Whirlwind(WhirlwindComponent {
                damage: DEFAULT_WHIRLWIND_DAMAGE,
                can_dispel: true,
            }),
            VariantKind::Trash => TerrainComponent::Trash,
        }
    }
}
