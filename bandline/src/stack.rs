// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cumulative stacking: three proportions into four divider values.

use crate::observation::{Band, CanonicalObservation};

/// The stacked dividers of one present slot, in proportion space.
///
/// Invariant: `0 == d0 <= d1 <= d2 <= d3 == 1`. Segment `j` spans
/// `dividers[j]..dividers[j + 1]`; a zero proportion collapses its segment
/// to zero height (adjacent dividers coincide).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedBars {
    dividers: [f64; 4],
}

impl StackedBars {
    /// Builds the dividers for a normalized observation.
    ///
    /// Total over well-formed input: normalization already guarantees the
    /// proportions are non-negative and sum to one; the cumulative values
    /// are only pinned against float drift.
    pub fn from_observation(obs: &CanonicalObservation) -> Self {
        let d1 = obs.green.clamp(0.0, 1.0);
        let d2 = (obs.green + obs.yellow).clamp(d1, 1.0);
        Self {
            dividers: [0.0, d1, d2, 1.0],
        }
    }

    /// All four divider values, bottom to top.
    pub fn dividers(&self) -> [f64; 4] {
        self.dividers
    }

    /// Divider `i`, `0..=3`.
    pub fn divider(&self, i: usize) -> f64 {
        self.dividers[i]
    }

    /// The `(bottom, top)` proportion span of a band's segment.
    pub fn segment(&self, band: Band) -> (f64, f64) {
        let i = band.index();
        (self.dividers[i], self.dividers[i + 1])
    }

    /// The proportion height of a band's segment.
    pub fn height(&self, band: Band) -> f64 {
        let (lo, hi) = self.segment(band);
        hi - lo
    }
}
