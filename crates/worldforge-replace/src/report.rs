//! Batch outcomes and engine errors.

use worldforge_core::component::VariantKind;
use worldforge_core::region::TilePosition;

/// Errors from replace operations. All are local to one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplaceError {
    #[error("unresolvable terrain component type '{name}'")]
    UnresolvableVariant { name: String },
}

/// A component left untouched because it could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub tile: TilePosition,
    /// Index of the component in the tile's sequence when it was skipped.
    pub index: usize,
    pub kind: VariantKind,
    pub error: ReplaceError,
}

/// What one batch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Tiles under the selection that were inspected.
    pub tiles_inspected: usize,
    /// Tiles that were mutated and had their derived state recomputed, in
    /// processing order.
    pub tiles_touched: Vec<TilePosition>,
    /// Static-ID fields rewritten by a remap.
    pub fields_rewritten: usize,
    /// Components replaced by a conversion.
    pub components_converted: usize,
    pub skips: Vec<Skip>,
    /// Whether the render surface was invalidated for this batch.
    pub signalled: bool,
}

impl BatchReport {
    /// `true` if no component was skipped.
    pub fn is_clean(&self) -> bool {
        self.skips.is_empty()
    }

    /// `true` if the batch mutated nothing.
    pub fn is_noop(&self) -> bool {
        self.tiles_touched.is_empty()
    }
}
