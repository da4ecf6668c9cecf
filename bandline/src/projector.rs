// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold-based projection of band statistics onto stacked segments.
//!
//! Each band covers one range of the statistic's domain, delimited by a
//! caller-supplied four-point threshold table `[min, medium, high, max]`.
//! A statistic is placed by linear interpolation of its domain position onto
//! the band's divider span, so a marker always lands inside the segment that
//! represents its band.

use crate::observation::{Band, BandStats};
use crate::stack::StackedBars;

/// Minimum domain-unit distance kept between a projected statistic and its
/// band's threshold boundaries, so markers never sit exactly on a segment
/// edge.
pub const EDGE_CLEARANCE: f64 = 0.1;

/// Error for a threshold table that is not strictly ascending, or whose
/// bands are too narrow for the [`EDGE_CLEARANCE`] clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdTableError {
    /// The rejected values.
    pub values: [f64; 4],
}

/// A validated `[min, medium, high, max]` threshold table partitioning the
/// statistic domain into the three band ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdTable {
    values: [f64; 4],
}

impl ThresholdTable {
    /// Validates and wraps a threshold table.
    ///
    /// Fails unless the values are finite and each band spans more than
    /// `2.0 * EDGE_CLEARANCE` domain units, so the boundary clamp always
    /// leaves interior room. The table is never silently reordered.
    pub fn new(values: [f64; 4]) -> Result<Self, ThresholdTableError> {
        let valid = values
            .windows(2)
            .all(|w| w[0].is_finite() && w[1].is_finite() && w[1] - w[0] > 2.0 * EDGE_CLEARANCE);
        if !valid {
            return Err(ThresholdTableError { values });
        }
        Ok(Self { values })
    }

    /// The four threshold values, ascending.
    pub fn values(&self) -> [f64; 4] {
        self.values
    }

    /// The `(lower, upper)` domain range of a band.
    pub fn band_range(&self, band: Band) -> (f64, f64) {
        let i = band.index();
        (self.values[i], self.values[i + 1])
    }
}

/// Projects a statistic value into its band's segment, in proportion space.
///
/// Returns `None` (no marker, not an error) when the value is absent or NaN,
/// or when the band's segment has zero height. Values closer than
/// [`EDGE_CLEARANCE`] to a threshold boundary are clamped inward before
/// interpolating, so a marker never sits flush against a divider.
pub fn project_statistic(
    bars: &StackedBars,
    band: Band,
    value: Option<f64>,
    thresholds: &ThresholdTable,
) -> Option<f64> {
    let v = value?;
    if v.is_nan() {
        return None;
    }
    let (lo, hi) = bars.segment(band);
    if hi - lo == 0.0 {
        return None;
    }
    let (t0, t1) = thresholds.band_range(band);
    let v = if v < t0 + EDGE_CLEARANCE {
        t0 + EDGE_CLEARANCE
    } else if v > t1 - EDGE_CLEARANCE {
        t1 - EDGE_CLEARANCE
    } else {
        v
    };
    Some(lo + (hi - lo) * ((v - t0) / (t1 - t0)))
}

/// Projected marker positions for one band of one present slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatisticMarker {
    /// Projected mean position in proportion space, when present.
    pub mean: Option<f64>,
    /// Projected mode position in proportion space, when present.
    pub mode: Option<f64>,
}

impl StatisticMarker {
    /// Projects a band's mean and mode through the threshold table.
    pub fn for_band(
        bars: &StackedBars,
        band: Band,
        stats: &BandStats,
        thresholds: &ThresholdTable,
    ) -> Self {
        Self {
            mean: project_statistic(bars, band, stats.mean, thresholds),
            mode: project_statistic(bars, band, stats.mode, thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::observation::{CanonicalObservation, RawObservation};
    use crate::period::PeriodKind;

    use super::*;

    fn thresholds() -> ThresholdTable {
        ThresholdTable::new([-15.0, 30.0, 60.0, 120.0]).unwrap()
    }

    fn bars(green: f64, yellow: f64, red: f64) -> StackedBars {
        let raw = RawObservation::new(2021, 8, green, yellow, red);
        let obs = CanonicalObservation::normalize(&raw, PeriodKind::Month).unwrap();
        StackedBars::from_observation(&obs)
    }

    #[test]
    fn rejects_non_ascending_tables() {
        assert!(ThresholdTable::new([0.0, 10.0, 10.0, 20.0]).is_err());
        assert!(ThresholdTable::new([0.0, 20.0, 10.0, 30.0]).is_err());
        assert!(ThresholdTable::new([0.0, f64::NAN, 10.0, 20.0]).is_err());
        assert!(ThresholdTable::new([-15.0, 30.0, 60.0, 120.0]).is_ok());
    }

    #[test]
    fn rejects_bands_too_narrow_for_the_boundary_clamp() {
        // A 0.05-wide green band would let the lower clamp push the
        // interpolation input past the band's upper threshold.
        assert!(ThresholdTable::new([0.0, 0.05, 30.0, 60.0]).is_err());
        // Exactly twice the clearance still leaves no interior room.
        assert!(ThresholdTable::new([0.0, 0.2, 30.0, 60.0]).is_err());
        assert!(ThresholdTable::new([0.0, 0.25, 30.0, 60.0]).is_ok());
    }

    #[test]
    fn midpoint_of_band_range_maps_to_segment_midpoint() {
        let s = bars(0.5, 0.3, 0.2);
        // Green band covers [-15, 30]; its midpoint is 7.5.
        let pos = project_statistic(&s, Band::Green, Some(7.5), &thresholds()).unwrap();
        let (lo, hi) = s.segment(Band::Green);
        assert!((pos - (lo + hi) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn projection_is_monotonic_within_a_band() {
        let s = bars(0.2, 0.5, 0.3);
        let t = thresholds();
        let mut last = f64::NEG_INFINITY;
        // Yellow band covers [30, 60]; sample strictly inside the clearance.
        for v in [31.0, 35.0, 42.0, 51.0, 59.0] {
            let pos = project_statistic(&s, Band::Yellow, Some(v), &t).unwrap();
            assert!(pos > last, "projection must increase with the statistic");
            last = pos;
        }
    }

    #[test]
    fn boundary_values_are_clamped_off_the_segment_edge() {
        let s = bars(0.5, 0.3, 0.2);
        let t = thresholds();
        let (lo, hi) = s.segment(Band::Green);

        // Exactly on the lower threshold: clamped to min + 0.1.
        let at_min = project_statistic(&s, Band::Green, Some(-15.0), &t).unwrap();
        let expected = lo + (hi - lo) * (EDGE_CLEARANCE / 45.0);
        assert!((at_min - expected).abs() < 1e-9);
        assert!(at_min > lo);

        // Beyond the upper threshold: clamped to max - 0.1, still inside.
        let above = project_statistic(&s, Band::Green, Some(200.0), &t).unwrap();
        assert!(above < hi);
    }

    #[test]
    fn absent_nan_and_zero_height_produce_no_marker() {
        let t = thresholds();
        let s = bars(0.5, 0.3, 0.2);
        assert_eq!(project_statistic(&s, Band::Green, None, &t), None);
        assert_eq!(project_statistic(&s, Band::Green, Some(f64::NAN), &t), None);

        let collapsed = bars(0.5, 0.0, 0.5);
        assert_eq!(
            project_statistic(&collapsed, Band::Yellow, Some(45.0), &t),
            None
        );
    }

    #[test]
    fn marker_pairs_project_mean_and_mode_independently() {
        let s = bars(0.4, 0.3, 0.3);
        let stats = BandStats {
            mean: Some(10.0),
            mode: None,
            std_dev: Some(4.0),
        };
        let m = StatisticMarker::for_band(&s, Band::Green, &stats, &thresholds());
        assert!(m.mean.is_some());
        assert_eq!(m.mode, None);
    }
}
