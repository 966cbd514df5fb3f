//! Type conversion: replace every component of one variant with a newly
//! built component of another.

use crate::hooks::{RenderSurface, TouchedTiles, finish_batch};
use crate::report::{BatchReport, ReplaceError, Skip};
use crate::request::ConvertRequest;
use crate::template::ConstructionTemplate;
use tracing::{debug, warn};
use worldforge_core::component::{TerrainComponent, VariantKind};
use worldforge_core::id::StaticId;
use worldforge_core::region::Region;

/// Whether a component is picked up by a conversion from `source` with the
/// given static filter.
///
/// Variants without a dominant value always pass the filter.
pub fn matches_source(
    component: &TerrainComponent,
    source: VariantKind,
    static_filter: Option<StaticId>,
) -> bool {
    if component.kind() != source {
        return false;
    }
    match (static_filter, component.dominant_value()) {
        (None, _) | (_, None) => true,
        (Some(filter), Some(value)) => filter == value,
    }
}

/// Convert matching components under the selection.
///
/// The source variant must resolve, otherwise the request fails before
/// anything is inspected. The target is resolved before any component is
/// removed: if it does not resolve, every matching component is left in
/// place and reported as a [`Skip`], and the batch still completes.
///
/// Within a tile, replacements are appended in the order their originals
/// were stored. Each mutated tile is recomputed once and the surface is
/// invalidated once. An empty selection does nothing and emits no signal.
pub fn apply_convert<S: RenderSurface + ?Sized>(
    region: &mut Region,
    request: &ConvertRequest,
    surface: &mut S,
) -> Result<BatchReport, ReplaceError> {
    let source = request.source.resolve()?;
    let template = request.target.resolve().map(ConstructionTemplate::for_kind);

    let mut report = BatchReport::default();
    if request.selection.is_empty() {
        debug!("convert skipped: empty selection");
        return Ok(report);
    }

    let filter = request.static_filter;
    let mut touched = TouchedTiles::new();
    for id in region.tiles_in(&request.selection) {
        let Some(tile) = region.tile_mut(id) else {
            continue;
        };
        report.tiles_inspected += 1;

        match &template {
            Ok(template) => {
                let converted = tile.replace_where(|_, component| {
                    matches_source(component, source, filter)
                        .then(|| template.build(component.dominant_value()))
                });
                if converted > 0 {
                    touched.mark(id);
                    report.components_converted += converted;
                }
            }
            Err(error) => {
                let position = tile.position();
                for (index, component) in tile.components().iter().enumerate() {
                    if !matches_source(component, source, filter) {
                        continue;
                    }
                    warn!(%position, index, %source, %error, "conversion skipped");
                    report.skips.push(Skip {
                        tile: position,
                        index,
                        kind: component.kind(),
                        error: error.clone(),
                    });
                }
            }
        }
    }

    report.tiles_touched = finish_batch(region, &touched, surface);
    report.signalled = true;
    debug!(
        %source,
        inspected = report.tiles_inspected,
        touched = report.tiles_touched.len(),
        converted = report.components_converted,
        skipped = report.skips.len(),
        "convert finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::InvalidationCounter;
    use crate::request::VariantRef;
    use worldforge_core::component::*;
    use worldforge_core::selection::Selection;
    use worldforge_core::test_utils::*;

    fn convert(
        source: impl Into<VariantRef>,
        target: impl Into<VariantRef>,
        filter: Option<i32>,
        selection: Selection,
    ) -> ConvertRequest {
        ConvertRequest {
            source: source.into(),
            target: target.into(),
            static_filter: filter.map(StaticId),
            selection,
        }
    }

    fn whole(width: u32, height: u32) -> Selection {
        Selection::single(rect(0, 0, width, height))
    }

    #[test]
    fn matches_source_filter_rules() {
        assert!(matches_source(&floor(7), VariantKind::Floor, None));
        assert!(matches_source(&floor(7), VariantKind::Floor, Some(StaticId(7))));
        assert!(!matches_source(&floor(7), VariantKind::Floor, Some(StaticId(8))));
        assert!(!matches_source(&floor(7), VariantKind::Water, None));
        assert!(matches_source(&fire(), VariantKind::Fire, Some(StaticId(42))));
    }

    #[test]
    fn floor_to_water_keeps_ground() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), floor(7));
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert(VariantKind::Floor, VariantKind::Water, None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(components_at(&region, pos(0, 0)), &[water(7, 3)]);
        assert_eq!(report.components_converted, 1);
        assert_eq!(surface.count(), 1);
    }

    #[test]
    fn fire_ignores_static_filter() {
        let mut region = Region::new();
        paint(&mut region, rect(0, 0, 2, 2), fire());
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert("Fire", "Darkness", Some(42), whole(2, 2)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(report.components_converted, 4);
        for (_, tile) in region.iter() {
            assert_eq!(
                tile.components(),
                &[TerrainComponent::Darkness(DarknessComponent { can_dispel: true })]
            );
        }
    }

    #[test]
    fn filter_selects_by_dominant_value() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), wall(10, 1, 2));
        region.add_component(pos(1, 0), wall(11, 1, 2));
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert("WallComponent", "DoorComponent", Some(10), whole(2, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(report.tiles_touched, vec![pos(0, 0)]);
        assert_eq!(
            components_at(&region, pos(0, 0)),
            &[TerrainComponent::Door(DoorComponent {
                closed_id: StaticId(10),
                open_id: StaticId(0),
                secret_id: StaticId(0),
                destroyed_id: StaticId(0),
                is_secret: false,
                is_opened: false,
            })]
        );
        assert_eq!(components_at(&region, pos(1, 0)), &[wall(11, 1, 2)]);
        assert_eq!(region.tile_at(pos(1, 0)).unwrap().derived().revision, 0);
    }

    #[test]
    fn converted_component_moves_to_end() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), tree(3));
        region.add_component(pos(0, 0), floor(4));
        let mut surface = InvalidationCounter::new();

        apply_convert(
            &mut region,
            &convert("Tree", "Static", None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(components_at(&region, pos(0, 0)), &[floor(4), static_c(3)]);
    }

    #[test]
    fn every_duplicate_instance_is_converted() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), floor(1));
        region.add_component(pos(0, 0), floor(2));
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert("Floor", "Ice", None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(report.components_converted, 2);
        assert_eq!(report.tiles_touched.len(), 1);
        assert_eq!(region.tile_at(pos(0, 0)).unwrap().derived().revision, 1);
    }

    #[test]
    fn same_variant_conversion_resets_auxiliary_fields() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), counter(8, AccessDirection::West));
        let mut surface = InvalidationCounter::new();

        apply_convert(
            &mut region,
            &convert("Counter", "Counter", None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(
            components_at(&region, pos(0, 0)),
            &[counter(8, AccessDirection::None)]
        );
    }

    #[test]
    fn unresolvable_target_leaves_components_in_place() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), static_c(5));
        region.add_component(pos(0, 0), floor(1));
        region.add_component(pos(1, 0), static_c(6));
        let before = region.component_count();
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert("Static", "Bogus", None, whole(2, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(region.component_count(), before);
        assert_eq!(components_at(&region, pos(0, 0)), &[static_c(5), floor(1)]);
        assert_eq!(components_at(&region, pos(1, 0)), &[static_c(6)]);
        assert_eq!(report.skips.len(), 2);
        assert_eq!(report.skips[0].tile, pos(0, 0));
        assert_eq!(report.skips[0].index, 0);
        assert_eq!(report.skips[1].tile, pos(1, 0));
        assert_eq!(
            report.skips[0].error,
            ReplaceError::UnresolvableVariant {
                name: "Bogus".to_string()
            }
        );
        assert!(report.tiles_touched.is_empty());
        assert!(report.signalled);
        assert_eq!(surface.count(), 1);
    }

    #[test]
    fn unresolvable_source_fails_up_front() {
        let mut region = floor_grid(2, 2, 1);
        let mut surface = InvalidationCounter::new();

        let result = apply_convert(
            &mut region,
            &convert("Nonsense", "Floor", None, whole(2, 2)),
            &mut surface,
        );

        assert_eq!(
            result,
            Err(ReplaceError::UnresolvableVariant {
                name: "Nonsense".to_string()
            })
        );
        assert_eq!(surface.count(), 0);
        assert_eq!(components_at(&region, pos(0, 0)), &[floor(1)]);
    }

    #[test]
    fn empty_selection_is_silent_noop() {
        let mut region = floor_grid(2, 2, 1);
        let mut surface = InvalidationCounter::new();

        let report = apply_convert(
            &mut region,
            &convert("Floor", "Water", None, Selection::new()),
            &mut surface,
        )
        .unwrap();

        assert_eq!(report, BatchReport::default());
        assert_eq!(surface.count(), 0);
    }

    #[test]
    fn statics_free_source_builds_target_with_unset_id() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), darkness());
        let mut surface = InvalidationCounter::new();

        apply_convert(
            &mut region,
            &convert("Darkness", "Wall", None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert_eq!(components_at(&region, pos(0, 0)), &[wall(-1, 0, 0)]);
        let derived = region.tile_at(pos(0, 0)).unwrap().derived();
        assert!(derived.blocks_movement);
        assert!(derived.graphics.is_empty());
    }

    #[tracing_test::traced_test]
    #[test]
    fn skipped_components_are_logged() {
        let mut region = Region::new();
        region.add_component(pos(0, 0), static_c(5));
        let mut surface = InvalidationCounter::new();

        apply_convert(
            &mut region,
            &convert("Static", "Bogus", None, whole(1, 1)),
            &mut surface,
        )
        .unwrap();

        assert!(logs_contain("conversion skipped"));
    }
}
