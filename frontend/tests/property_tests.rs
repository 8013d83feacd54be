use landing::scroll::{Elapsed, Milestone, ScrollController, ScrollMetrics};
use proptest::prelude::*;

prop_compose! {
    fn arb_page()(viewport in 200.0..2000.0f64, extra in 1.0..20_000.0f64) -> (f64, f64) {
        (viewport + extra, viewport)
    }
}

proptest! {
    #[test]
    fn progress_is_clamped_ratio((doc, viewport) in arb_page(), y in -500.0..25_000.0f64) {
        let max_scroll = doc - viewport;
        let percent = ScrollMetrics::new(y, doc, viewport).percent();
        let expected = (y / max_scroll * 100.0).clamp(0.0, 100.0);
        prop_assert!((0.0..=100.0).contains(&percent));
        prop_assert!((percent - expected).abs() < 1e-9);
    }

    #[test]
    fn cta_matches_half_document((doc, viewport) in arb_page(), y in 0.0..25_000.0f64) {
        let metrics = ScrollMetrics::new(y, doc, viewport);
        prop_assert_eq!(metrics.cta_visible(), y > doc * 0.5);
    }

    #[test]
    fn milestones_are_unique_and_increasing(
        backfill in any::<bool>(),
        positions in prop::collection::vec(0.0..1.0f64, 1..60),
    ) {
        let mut controller = ScrollController::new(backfill);
        let mut fired: Vec<Milestone> = Vec::new();
        for p in positions {
            fired.extend(controller.apply(ScrollMetrics::new(p * 1000.0, 2000.0, 1000.0)).milestones);
        }
        for pair in fired.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        let again = controller.apply(ScrollMetrics::new(1000.0, 2000.0, 1000.0)).milestones;
        if fired.last() == Some(&Milestone::Ninety) {
            prop_assert!(again.is_empty());
        }
    }

    #[test]
    fn elapsed_seconds_stay_below_sixty(y in 0.0..1000.0f64) {
        let elapsed = Elapsed::from_percent(ScrollMetrics::new(y, 2000.0, 1000.0).percent());
        prop_assert!(elapsed.seconds < 60);
        prop_assert!(elapsed.minutes <= 15);
    }
}
