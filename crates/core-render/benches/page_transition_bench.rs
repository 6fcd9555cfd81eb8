use core_model::RenderDirection;
use core_render::{Geometry, MemorySurface, WindowRenderer};
use core_store::Placeholder;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_page_transitions(c: &mut Criterion) {
    let geometry = Geometry::new(50.0, 1_000.0).unwrap();
    let mut renderer =
        WindowRenderer::new(geometry, Placeholder::new(1_000_000), MemorySurface::new());
    renderer.render_page(0, RenderDirection::Initial);

    c.bench_function("advance_retreat_pair", |b| {
        b.iter(|| {
            black_box(renderer.render_page(1, RenderDirection::Advance));
            black_box(renderer.render_page(0, RenderDirection::Retreat));
        })
    });

    c.bench_function("scan_forward_1000_pages", |b| {
        b.iter(|| {
            renderer.render_page(0, RenderDirection::Initial);
            for page in 1..=1_000 {
                black_box(renderer.render_page(page, RenderDirection::Advance));
            }
        })
    });
}

criterion_group!(benches, bench_page_transitions);
criterion_main!(benches);
