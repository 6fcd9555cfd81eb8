use core_model::RenderDirection;
use core_render::{Geometry, MemorySurface, RenderOutcome, WindowRenderer};
use core_store::{Placeholder, PlaceholderItem};
use proptest::prelude::*;

type Renderer = WindowRenderer<Placeholder, MemorySurface<PlaceholderItem>>;

fn mk(len: usize, item: u32, viewport: u32) -> Renderer {
    let geometry = Geometry::new(item as f64, viewport as f64).unwrap();
    let mut r = WindowRenderer::new(geometry, Placeholder::new(len), MemorySurface::new());
    r.render_page(0, RenderDirection::Initial);
    r
}

fn assert_consistent(r: &Renderer) {
    let page_size = r.geometry().page_size();
    assert_eq!(r.extent(), r.full_height(), "total height invariant");
    assert!(r.spacers().top >= 0.0 && r.spacers().bottom >= 0.0);
    assert!(r.materialized() <= page_size);
    if r.page_index() < r.max_page_index() {
        assert_eq!(r.materialized(), page_size);
    }
    // Slots carry consecutive labels starting at the page's first index.
    let start = r.page_index() * page_size;
    let expected: Vec<usize> = (start..start + r.materialized()).collect();
    assert_eq!(r.surface().labels(), expected);
    assert_eq!(r.surface().spacers(), r.spacers());
}

#[test]
fn sequential_scan_down_then_up_keeps_invariants() {
    let mut r = mk(10_000, 50, 1_000);
    assert_consistent(&r);
    for page in 1..=r.max_page_index() {
        r.render_page(page, RenderDirection::Advance);
        assert_consistent(&r);
    }
    assert_eq!(r.spacers().bottom, 0.0);
    for page in (0..r.max_page_index()).rev() {
        r.render_page(page, RenderDirection::Retreat);
        assert_consistent(&r);
    }
    assert_eq!(r.spacers().top, 0.0);
    assert_eq!(r.spacers().bottom, 497_900.0);
}

#[test]
fn rejected_render_leaves_state_untouched() {
    let mut r = mk(500, 50, 1_000);
    let max = r.max_page_index();
    r.render_page(max, RenderDirection::Advance);
    let before = (r.spacers(), r.surface().labels());
    assert!(matches!(
        r.render_page(max + 1, RenderDirection::Advance),
        RenderOutcome::OutOfRange { .. }
    ));
    assert_eq!((r.spacers(), r.surface().labels()), before);
    assert_consistent(&r);
}

proptest! {
    #[test]
    fn random_walk_preserves_total_height(
        len in 0usize..3_000,
        item in 1u32..80,
        viewport in 1u32..1_200,
        steps in proptest::collection::vec(any::<bool>(), 0..80),
    ) {
        let mut r = mk(len, item, viewport);
        assert_consistent(&r);
        for forward in steps {
            let page = r.page_index();
            if forward && page < r.max_page_index() {
                r.render_page(page + 1, RenderDirection::Advance);
            } else if !forward && page > 0 {
                r.render_page(page - 1, RenderDirection::Retreat);
            }
            assert_consistent(&r);
        }
    }

    #[test]
    fn k_forward_then_k_back_round_trips(k in 0usize..30) {
        let mut r = mk(10_000, 50, 1_000);
        let start = r.spacers();
        for page in 1..=k {
            r.render_page(page, RenderDirection::Advance);
        }
        for page in (0..k).rev() {
            r.render_page(page, RenderDirection::Retreat);
        }
        prop_assert_eq!(r.page_index(), 0);
        prop_assert_eq!(r.spacers(), start);
    }
}
