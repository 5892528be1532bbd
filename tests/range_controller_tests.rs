use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use timeline_rs::core::{MIN_ZOOM_FACTOR, RangeController, TimeRange};

fn range(start: f64, end: f64) -> TimeRange {
    TimeRange::new(start, end).expect("valid range")
}

#[test]
fn contained_range_is_stored_unchanged() {
    let mut controller = RangeController::new(range(0.0, 1_000.0));
    controller.set_range(range(250.0, 600.0));
    assert_eq!(controller.filtered_range(), range(250.0, 600.0));
}

#[test]
fn overhanging_range_is_clamped_to_total() {
    let mut controller = RangeController::new(range(0.0, 1_000.0));
    controller.set_range(range(-200.0, 400.0));
    assert_eq!(controller.filtered_range(), range(0.0, 400.0));

    controller.set_range(range(900.0, 5_000.0));
    assert_eq!(controller.filtered_range(), range(900.0, 1_000.0));
}

#[test]
fn range_entirely_outside_total_collapses_to_nearest_bound() {
    let mut controller = RangeController::new(range(0.0, 1_000.0));
    controller.set_range(range(2_000.0, 3_000.0));
    assert_eq!(controller.filtered_range(), range(1_000.0, 1_000.0));

    controller.set_range(range(-3_000.0, -2_000.0));
    assert_eq!(controller.filtered_range(), range(0.0, 0.0));
}

#[test]
fn inverted_endpoints_are_swapped() {
    let swapped = range(800.0, 200.0);
    assert_eq!(swapped.start(), 200.0);
    assert_eq!(swapped.end(), 800.0);
}

#[test]
fn non_finite_endpoints_are_rejected() {
    let err = TimeRange::new(f64::NAN, 10.0).expect_err("nan start");
    assert!(format!("{err}").contains("invalid time range"));
    assert!(TimeRange::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn updater_sees_previous_range() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(100.0, 200.0));
    let changed = controller.update_range(|prev| range(prev.start() + 50.0, prev.end() + 50.0));
    assert!(changed);
    assert_eq!(controller.filtered_range(), range(150.0, 250.0));
}

#[test]
fn failing_updater_leaves_range_untouched() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(100.0, 200.0));
    let result = controller.try_update_range(|prev| TimeRange::new(prev.start(), f64::NAN));
    assert!(result.is_err());
    assert_eq!(controller.filtered_range(), range(100.0, 200.0));
}

#[test]
fn zoom_in_and_out_around_basis_center() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(400.0, 600.0));

    controller.zoom(0.5, range(400.0, 600.0)).expect("zoom in");
    assert_eq!(controller.filtered_range(), range(450.0, 550.0));

    controller.zoom(2.0, range(400.0, 600.0)).expect("zoom out");
    assert_eq!(controller.filtered_range(), range(300.0, 700.0));
}

#[test]
fn zoom_out_beyond_total_is_clamped() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(100.0, 300.0));
    controller.zoom_visible(10.0).expect("zoom out");
    assert_eq!(controller.filtered_range(), range(0.0, 1_000.0));
}

#[test]
fn zoom_with_unit_factor_is_identity() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(125.0, 875.0));
    controller.zoom_visible(1.0).expect("zoom");
    let filtered = controller.filtered_range();
    assert_relative_eq!(filtered.start(), 125.0);
    assert_relative_eq!(filtered.end(), 875.0);
}

#[test]
fn zero_and_negative_zoom_factors_never_invert() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(400.0, 600.0));
    controller.zoom_visible(0.0).expect("zero factor is clamped");
    let filtered = controller.filtered_range();
    assert!(filtered.start() <= filtered.end());
    assert_relative_eq!(filtered.center(), 500.0, epsilon = 1e-9);
    assert!(filtered.span() <= 200.0 * MIN_ZOOM_FACTOR + 1e-9);

    assert!(controller.zoom_visible(f64::INFINITY).is_err());
}

#[test]
fn pan_shifts_then_clamps() {
    let mut controller = RangeController::with_filtered(range(0.0, 1_000.0), range(100.0, 300.0));
    controller.pan_by(250.0).expect("pan");
    assert_eq!(controller.filtered_range(), range(350.0, 550.0));

    controller.pan_by(600.0).expect("pan past end");
    assert_eq!(controller.filtered_range(), range(950.0, 1_000.0));

    assert!(controller.pan_by(f64::NAN).is_err());
}

#[test]
fn zero_width_total_collapses_every_request() {
    let mut controller = RangeController::new(range(500.0, 500.0));
    controller.set_range(range(0.0, 1_000.0));
    assert_eq!(controller.filtered_range(), range(500.0, 500.0));

    controller.zoom_visible(3.0).expect("zoom");
    controller.pan_by(42.0).expect("pan");
    assert_eq!(controller.filtered_range(), range(500.0, 500.0));
    assert_eq!(controller.selection_fractions(), (0.0, 1.0));
}

#[test]
fn slider_fractions_round_trip() {
    let mut controller = RangeController::new(range(1_000.0, 2_000.0));
    controller
        .set_range_from_fractions(0.25, 0.75)
        .expect("fractions");
    assert_eq!(controller.filtered_range(), range(1_250.0, 1_750.0));
    let (start, end) = controller.selection_fractions();
    assert_relative_eq!(start, 0.25);
    assert_relative_eq!(end, 0.75);

    assert!(controller.reset());
    assert_eq!(controller.filtered_range(), controller.total_range());
}

#[test]
fn enclosing_covers_all_item_ranges() {
    let total = TimeRange::enclosing([range(30.0, 40.0), range(-5.0, 10.0), range(20.0, 90.0)])
        .expect("non-empty");
    assert_eq!(total, range(-5.0, 90.0));
    assert!(TimeRange::enclosing(Vec::<TimeRange>::new()).is_none());
}

#[test]
fn instant_is_an_empty_range_at_one_time() {
    let at = TimeRange::instant(1_500.0).expect("instant");
    assert!(at.is_empty());
    assert_eq!(at.start(), 1_500.0);
    assert_eq!(at.end(), 1_500.0);
    assert!(TimeRange::instant(f64::INFINITY).is_err());
}

#[test]
fn datetimes_convert_to_millisecond_range() {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).single().expect("end");

    let forward = TimeRange::from_datetimes(start, end).expect("range");
    assert_eq!(forward, range(1_672_531_200_000.0, 1_672_617_600_000.0));
    assert_eq!(TimeRange::from_datetimes(end, start).expect("range"), forward);
}
