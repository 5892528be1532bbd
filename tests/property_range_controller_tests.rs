use proptest::prelude::*;
use timeline_rs::core::{RangeController, TimeRange, zoom_range};

const TOTAL_START: f64 = 1_600_000_000_000.0;
const TOTAL_SPAN: f64 = 400.0 * 86_400_000.0;

fn total() -> TimeRange {
    TimeRange::new(TOTAL_START, TOTAL_START + TOTAL_SPAN).expect("total")
}

proptest! {
    #[test]
    fn contained_ranges_pass_through_unchanged(
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let requested = TimeRange::new(
            TOTAL_START + a * TOTAL_SPAN,
            TOTAL_START + b * TOTAL_SPAN,
        ).expect("requested");
        let mut controller = RangeController::new(total());
        controller.set_range(requested);
        prop_assert_eq!(controller.filtered_range(), requested);
    }

    #[test]
    fn clamped_ranges_are_contained_with_maximal_overlap(
        a in -2.0f64..3.0,
        b in -2.0f64..3.0,
    ) {
        let requested = TimeRange::new(
            TOTAL_START + a * TOTAL_SPAN,
            TOTAL_START + b * TOTAL_SPAN,
        ).expect("requested");
        let mut controller = RangeController::new(total());
        controller.set_range(requested);
        let result = controller.filtered_range();

        prop_assert!(total().contains_range(result));
        let overlap = (requested.end().min(total().end())
            - requested.start().max(total().start()))
            .max(0.0);
        prop_assert!((result.span() - overlap).abs() <= 1e-3);
        if overlap > 0.0 {
            prop_assert!(requested.contains_range(result));
        }
    }

    #[test]
    fn zoom_and_pan_never_escape_total(
        factors in prop::collection::vec(0.01f64..20.0, 1..16),
        deltas in prop::collection::vec(-2.0f64..2.0, 1..16),
    ) {
        let mut controller = RangeController::new(total());
        for (factor, delta) in factors.iter().zip(deltas.iter()) {
            controller.zoom_visible(*factor).expect("zoom");
            controller.pan_by(delta * TOTAL_SPAN).expect("pan");
            let filtered = controller.filtered_range();
            prop_assert!(filtered.start() <= filtered.end());
            prop_assert!(total().contains_range(filtered));
        }
    }

    #[test]
    fn unit_zoom_is_identity(
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let basis = TimeRange::new(
            TOTAL_START + a * TOTAL_SPAN,
            TOTAL_START + b * TOTAL_SPAN,
        ).expect("basis");
        let zoomed = zoom_range(basis, 1.0).expect("zoom");
        prop_assert!((zoomed.start() - basis.start()).abs() <= 1e-3);
        prop_assert!((zoomed.end() - basis.end()).abs() <= 1e-3);
    }

    #[test]
    fn successive_zooms_compose_multiplicatively(
        a in 0.0f64..1.0,
        span_fraction in 0.001f64..1.0,
        f1 in 0.1f64..10.0,
        f2 in 0.1f64..10.0,
    ) {
        let start = TOTAL_START + a * TOTAL_SPAN;
        let basis = TimeRange::new(start, start + span_fraction * TOTAL_SPAN).expect("basis");

        let stepwise = zoom_range(zoom_range(basis, f2).expect("f2"), f1).expect("f1");
        let combined = zoom_range(basis, f1 * f2).expect("f1*f2");

        let tolerance = 1e-9 * TOTAL_SPAN.max(combined.span()) + 1.0;
        prop_assert!((stepwise.start() - combined.start()).abs() <= tolerance);
        prop_assert!((stepwise.end() - combined.end()).abs() <= tolerance);
    }
}
