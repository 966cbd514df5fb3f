//! Criterion benchmarks for batch remap and conversion.

use criterion::{Criterion, criterion_group, criterion_main};
use worldforge_core::component::VariantKind;
use worldforge_core::id::StaticId;
use worldforge_core::region::Region;
use worldforge_core::selection::Selection;
use worldforge_core::test_utils::*;
use worldforge_replace::*;

/// 128x128 floor region with a wall ring and scattered trees.
fn bench_region() -> Region {
    let mut region = floor_grid(128, 128, 1);
    for i in 0..128 {
        region.add_component(pos(i, 0), wall(20, 21, 22));
        region.add_component(pos(i, 127), wall(20, 21, 22));
        region.add_component(pos(0, i), wall(20, 21, 22));
        region.add_component(pos(127, i), wall(20, 21, 22));
    }
    for i in (0..128).step_by(3) {
        region.add_component(pos(i, (i * 7) % 128), tree(30));
    }
    region
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");
    group.sample_size(30);

    let everything = Selection::single(rect(0, 0, 128, 128));

    group.bench_function("remap_full_region", |b| {
        b.iter_batched(
            bench_region,
            |mut region| {
                let request = RemapRequest {
                    from: StaticId(1),
                    to: StaticId(2),
                    selection: everything.clone(),
                };
                apply_remap(&mut region, &request, &mut InvalidationCounter::new())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("convert_walls_to_doors", |b| {
        b.iter_batched(
            bench_region,
            |mut region| {
                let request = ConvertRequest {
                    source: VariantKind::Wall.into(),
                    target: VariantKind::Door.into(),
                    static_filter: Some(StaticId(20)),
                    selection: everything.clone(),
                };
                apply_convert(&mut region, &request, &mut InvalidationCounter::new())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("convert_overlapping_selection", |b| {
        let overlapping = Selection::new()
            .with(rect(0, 0, 96, 96))
            .with(rect(32, 32, 96, 96));
        b.iter_batched(
            bench_region,
            |mut region| {
                let request = ConvertRequest {
                    source: VariantKind::Floor.into(),
                    target: VariantKind::Water.into(),
                    static_filter: None,
                    selection: overlapping.clone(),
                };
                apply_convert(&mut region, &request, &mut InvalidationCounter::new())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_replace);
criterion_main!(benches);
