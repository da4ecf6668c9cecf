// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    Band, BandStats, Period, PeriodKind, RawObservation, ThresholdTable, TimelineSpec,
};

fn thresholds() -> ThresholdTable {
    ThresholdTable::new([-15.0, 30.0, 60.0, 120.0]).unwrap()
}

fn spec() -> TimelineSpec {
    // Band-scale placement: 40px step from a 20px left margin.
    TimelineSpec::new(
        PeriodKind::Month,
        thresholds(),
        |p: Period| {
            let origin = Period::month(2021, 9).sort_key();
            20.0 + 40.0 * (p.sort_key() - origin) as f64
        },
        30.0,
    )
}

fn month(year: i32, month: u8, green: f64, yellow: f64, red: f64) -> RawObservation {
    RawObservation::new(year, i64::from(month) - 1, green, yellow, red)
}

#[test]
fn contiguous_months_produce_only_present_slots_and_full_connectors() {
    let raw = vec![
        month(2021, 9, 0.55, 0.3, 0.15),
        month(2021, 10, 0.5, 0.3, 0.2),
        month(2021, 11, 0.45, 0.35, 0.2),
    ];
    let layout = spec().layout(&raw).unwrap();

    assert_eq!(layout.slots.len(), 3);
    assert!(layout.slots.iter().all(|s| !s.is_gap()));
    assert_eq!(layout.connectors.len(), 2);

    let xs: Vec<f64> = layout.present_slots().map(|s| s.x).collect();
    assert_eq!(xs, vec![20.0, 60.0, 100.0]);
}

#[test]
fn missing_month_becomes_break_marker_and_suppresses_connector() {
    let raw = vec![
        month(2021, 9, 0.55, 0.3, 0.15),
        month(2021, 10, 0.5, 0.3, 0.2),
        month(2021, 11, 0.45, 0.35, 0.2),
        // December missing.
        month(2022, 1, 0.6, 0.25, 0.15),
        month(2022, 2, 0.55, 0.3, 0.15),
    ];
    let layout = spec().layout(&raw).unwrap();

    assert_eq!(layout.slots.len(), 6);
    let breaks: Vec<_> = layout.break_markers().collect();
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].start, Period::month(2021, 12));
    assert_eq!(breaks[0].end, Period::month(2021, 12));

    // Centered between November's right edge (100 + 30) and January's left
    // edge (180).
    assert!((breaks[0].center_x - 155.0).abs() < 1e-9);

    // One connector per adjacent present pair; the gap breaks the chain.
    assert_eq!(layout.connectors.len(), 3);
    assert!(
        !layout
            .connectors
            .iter()
            .any(|c| c.left == Period::month(2021, 11)),
        "no connector may span the gap"
    );
}

#[test]
fn connector_edges_meet_bar_edges_exactly() {
    let raw = vec![month(2021, 9, 0.5, 0.3, 0.2), month(2021, 10, 0.4, 0.4, 0.2)];
    let layout = spec().layout(&raw).unwrap();
    let slots: Vec<_> = layout.present_slots().collect();
    let conn = &layout.connectors[0];

    assert_eq!(conn.x_left, slots[0].x + slots[0].width);
    assert_eq!(conn.x_right, slots[1].x);
    for band in Band::ALL {
        let c = conn.corners(band);
        let (l_lo, l_hi) = slots[0].bars.segment(band);
        let (r_lo, r_hi) = slots[1].bars.segment(band);
        assert_eq!((c[0].y, c[3].y), (l_lo, l_hi));
        assert_eq!((c[1].y, c[2].y), (r_lo, r_hi));
    }
}

#[test]
fn statistic_markers_land_inside_their_segments() {
    let stats = [
        BandStats {
            mean: Some(12.0),
            mode: Some(20.0),
            std_dev: Some(3.5),
        },
        BandStats {
            mean: Some(45.0),
            mode: Some(0.0),
            std_dev: None,
        },
        BandStats::default(),
    ];
    let raw = vec![month(2021, 9, 0.5, 0.3, 0.2).with_stats(stats)];
    let layout = spec().layout(&raw).unwrap();
    let slot = layout.present_slots().next().unwrap();

    for (band, marker) in Band::ALL.into_iter().zip(slot.markers) {
        let (lo, hi) = slot.bars.segment(band);
        for pos in [marker.mean, marker.mode].into_iter().flatten() {
            assert!(pos > lo && pos < hi, "marker must sit strictly inside");
        }
    }
    // Green has both markers, yellow only a mean (mode was the no-data
    // sentinel), red none.
    assert!(slot.markers[0].mean.is_some() && slot.markers[0].mode.is_some());
    assert!(slot.markers[1].mean.is_some() && slot.markers[1].mode.is_none());
    assert_eq!(slot.markers[2].mean, None);
}

#[test]
fn degenerate_record_fails_the_whole_pass() {
    let raw = vec![month(2021, 9, 0.5, 0.3, 0.2), month(2021, 10, 0.0, 0.0, 0.0)];
    let err = spec().layout(&raw).unwrap_err();
    assert_eq!(err.period, Period::month(2021, 10));
}

#[test]
fn layout_is_deterministic() {
    let raw = vec![
        month(2021, 9, 0.55, 0.3, 0.15),
        month(2021, 11, 0.45, 0.35, 0.2),
        month(2022, 2, 0.55, 0.3, 0.15),
    ];
    let s = spec();
    assert_eq!(s.layout(&raw).unwrap(), s.layout(&raw).unwrap());
}

#[test]
fn weekly_timeline_shares_the_monthly_code_path() {
    let spec = TimelineSpec::new(
        PeriodKind::Week,
        thresholds(),
        |p: Period| {
            let origin = Period::from_raw(PeriodKind::Week, 2021, 30).sort_key();
            10.0 + 5.0 * (p.sort_key() - origin) as f64
        },
        25.0,
    );
    let raw = vec![
        RawObservation::new(2021, 30, 0.5, 0.3, 0.2),
        RawObservation::new(2021, 31, 0.4, 0.4, 0.2),
        // Weeks 32 and 33 missing.
        RawObservation::new(2021, 34, 0.6, 0.25, 0.15),
    ];
    let layout = spec.layout(&raw).unwrap();

    assert_eq!(layout.slots.len(), 4);
    assert_eq!(layout.connectors.len(), 1);
    let gap = layout.break_markers().next().unwrap();
    assert_eq!(gap.end.sort_key() - gap.start.sort_key(), 7);
    assert!(layout.slots[2].is_gap());
    assert!(
        gap.label().contains(" – "),
        "multi-week gaps get a range label"
    );
}
