//! Static-ID remap across a selection.

use crate::hooks::{RenderSurface, TouchedTiles, finish_batch};
use crate::report::BatchReport;
use crate::request::RemapRequest;
use tracing::debug;
use worldforge_core::region::Region;

/// Rewrite every static-ID field equal to `request.from` to `request.to` on
/// every component under the selection.
///
/// Never creates or destroys components and never touches auxiliary fields.
/// Each mutated tile is recomputed once, then the surface is invalidated
/// once. An empty selection does nothing and emits no signal.
pub fn apply_remap<S: RenderSurface + ?Sized>(
    region: &mut Region,
    request: &RemapRequest,
    surface: &mut S,
) -> BatchReport {
    let mut report = BatchReport::default();
    if request.selection.is_empty() {
        debug!("remap skipped: empty selection");
        return report;
    }

    let mut touched = TouchedTiles::new();
    for id in region.tiles_in(&request.selection) {
        let Some(tile) = region.tile_mut(id) else {
            continue;
        };
        report.tiles_inspected += 1;

        let changed: usize = tile
            .components_mut()
            .iter_mut()
            .map(|component| component.remap_static_id(request.from, request.to))
            .sum();
        if changed > 0 {
            touched.mark(id);
            report.fields_rewritten += changed;
        }
    }

    report.tiles_touched = finish_batch(region, &touched, surface);
    report.signalled = true;
    debug!(
        from = request.from.0,
        to = request.to.0,
        inspected = report.tiles_inspected,
        touched = report.tiles_touched.len(),
        fields = report.fields_rewritten,
        "remap finished"
    );
    report
}
