//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::component::*;
use crate::id::StaticId;
use crate::region::{Region, TilePosition};
use crate::selection::Rectangle;

// ===========================================================================
// Positions
// ===========================================================================

pub fn pos(x: i32, y: i32) -> TilePosition {
    TilePosition::new(x, y)
}

pub fn rect(x: i32, y: i32, width: u32, height: u32) -> Rectangle {
    Rectangle::new(x, y, width, height)
}

// ===========================================================================
// Component constructors
// ===========================================================================

pub fn static_c(id: i32) -> TerrainComponent {
    TerrainComponent::Static(StaticComponent {
        static_id: StaticId(id),
    })
}

pub fn floor(ground: i32) -> TerrainComponent {
    TerrainComponent::Floor(FloorComponent {
        ground: StaticId(ground),
        movement_cost: 1,
    })
}

pub fn water(ground: i32, depth: u32) -> TerrainComponent {
    TerrainComponent::Water(WaterComponent {
        ground: StaticId(ground),
        depth,
    })
}

pub fn tree(id: i32) -> TerrainComponent {
    TerrainComponent::Tree(TreeComponent { tree: StaticId(id) })
}

pub fn wall(wall: i32, ruins: i32, destroyed: i32) -> TerrainComponent {
    TerrainComponent::Wall(WallComponent {
        wall: StaticId(wall),
        ruins: StaticId(ruins),
        destroyed: StaticId(destroyed),
        is_indestructible: false,
    })
}

pub fn door(closed: i32, open: i32, destroyed: i32) -> TerrainComponent {
    TerrainComponent::Door(DoorComponent {
        closed_id: StaticId(closed),
        open_id: StaticId(open),
        secret_id: StaticId(0),
        destroyed_id: StaticId(destroyed),
        is_secret: false,
        is_opened: false,
    })
}

pub fn counter(id: i32, access_direction: AccessDirection) -> TerrainComponent {
    TerrainComponent::Counter(CounterComponent {
        counter: StaticId(id),
        access_direction,
    })
}

pub fn staircase(id: i32, destination: Destination) -> TerrainComponent {
    TerrainComponent::Staircase(StaircaseComponent {
        teleporter_id: StaticId(id),
        destination,
        descends: true,
    })
}

pub fn fire() -> TerrainComponent {
    TerrainComponent::Fire(FireComponent { can_dispel: false })
}

pub fn darkness() -> TerrainComponent {
    TerrainComponent::Darkness(DarknessComponent { can_dispel: false })
}

// ===========================================================================
// Region builders
// ===========================================================================

/// A `width` x `height` region with one floor of `ground` on every tile.
pub fn floor_grid(width: i32, height: i32, ground: i32) -> Region {
    let mut region = Region::new();
    for x in 0..width {
        for y in 0..height {
            region.add_component(pos(x, y), floor(ground));
        }
    }
    region
}

/// Place `component` on every tile of `area`.
pub fn paint(region: &mut Region, area: Rectangle, component: TerrainComponent) {
    for dx in 0..area.width as i32 {
        for dy in 0..area.height as i32 {
            region.add_component(pos(area.x + dx, area.y + dy), component.clone());
        }
    }
}

/// Components at a position, or an empty slice when there is no tile.
pub fn components_at(region: &Region, position: TilePosition) -> &[TerrainComponent] {
    region
        .tile_at(position)
        .map(|tile| tile.components())
        .unwrap_or(&[])
}
