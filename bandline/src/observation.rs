// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation records and percentage normalization.
//!
//! Raw records arrive with three risk-band proportions that are not
//! guaranteed to sum to one (upstream aggregation rounds and occasionally
//! drops a band). Normalization rescales them onto the unit interval once,
//! up front, so every later stage can assume `green + yellow + red == 1`.

use crate::period::{Period, PeriodKind};

/// One of the three risk bands, bottom to top of the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Low-risk band (bottom segment).
    Green,
    /// Medium-risk band (middle segment).
    Yellow,
    /// High-risk band (top segment).
    Red,
}

impl Band {
    /// All bands in stacking order.
    pub const ALL: [Self; 3] = [Self::Green, Self::Yellow, Self::Red];

    /// Zero-based stacking index.
    pub fn index(self) -> usize {
        match self {
            Self::Green => 0,
            Self::Yellow => 1,
            Self::Red => 2,
        }
    }
}

/// Optional per-band summary statistics, in the statistic's own domain
/// (e.g. degrees for joint-angle feeds).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandStats {
    /// Mean of the band's underlying samples.
    pub mean: Option<f64>,
    /// Mode of the band's underlying samples.
    pub mode: Option<f64>,
    /// Standard deviation of the band's underlying samples.
    pub std_dev: Option<f64>,
}

impl BandStats {
    fn canonical(self) -> Self {
        Self {
            mean: present(self.mean),
            mode: present(self.mode),
            std_dev: present(self.std_dev),
        }
    }
}

/// The upstream feed emits `0.0` where a band had no samples; treat it, along
/// with `NaN`/infinities, as absent.
fn present(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => Some(v),
        _ => None,
    }
}

/// One raw observation record, as produced by the data source.
///
/// The period is identified by `(year, subunit)`; see [`Period::from_raw`]
/// for the sub-unit meaning per [`PeriodKind`]. Proportions are free-form
/// non-negative weights; they need not sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawObservation {
    /// Calendar year of the observation period.
    pub year: i32,
    /// Sub-unit index within the year (month/week/day index).
    pub subunit: i64,
    /// Raw green-band proportion.
    pub green: f64,
    /// Raw yellow-band proportion.
    pub yellow: f64,
    /// Raw red-band proportion.
    pub red: f64,
    /// Per-band statistics, indexed by [`Band::index`].
    pub stats: [BandStats; 3],
    /// Number of underlying samples aggregated into this record.
    pub sample_count: u64,
}

impl RawObservation {
    /// A record with the given period identifier and proportions, no
    /// statistics, and a zero sample count.
    pub fn new(year: i32, subunit: i64, green: f64, yellow: f64, red: f64) -> Self {
        Self {
            year,
            subunit,
            green,
            yellow,
            red,
            stats: [BandStats::default(); 3],
            sample_count: 0,
        }
    }

    /// Sets the per-band statistics.
    pub fn with_stats(mut self, stats: [BandStats; 3]) -> Self {
        self.stats = stats;
        self
    }

    /// Sets the sample count.
    pub fn with_sample_count(mut self, count: u64) -> Self {
        self.sample_count = count;
        self
    }
}

/// Error for a record whose proportions sum to zero or below.
///
/// Not recoverable inside the engine: the caller decides whether to drop the
/// record or model the period as a gap before re-running the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateObservationError {
    /// The period of the offending record.
    pub period: Period,
    /// The proportion total that failed the `> 0` check.
    pub total: f64,
}

/// A normalized observation with a typed period.
///
/// Invariant: `green + yellow + red == 1` within `1e-9`. Constructed once
/// per raw record via [`CanonicalObservation::normalize`]; never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanonicalObservation {
    /// The typed observation period.
    pub period: Period,
    /// Normalized green proportion.
    pub green: f64,
    /// Normalized yellow proportion.
    pub yellow: f64,
    /// Normalized red proportion.
    pub red: f64,
    /// Per-band statistics with the no-data sentinel resolved to `None`.
    pub stats: [BandStats; 3],
    /// Number of underlying samples aggregated into this record.
    pub sample_count: u64,
}

impl CanonicalObservation {
    /// Normalizes a raw record for a timeline of the given period kind.
    ///
    /// Fails when the proportion total is zero, negative, or not finite.
    pub fn normalize(
        raw: &RawObservation,
        kind: PeriodKind,
    ) -> Result<Self, DegenerateObservationError> {
        let period = Period::from_raw(kind, raw.year, raw.subunit);
        let total = raw.green + raw.yellow + raw.red;
        if !(total > 0.0 && total.is_finite()) {
            return Err(DegenerateObservationError { period, total });
        }
        Ok(Self {
            period,
            green: raw.green / total,
            yellow: raw.yellow / total,
            red: raw.red / total,
            stats: [
                raw.stats[0].canonical(),
                raw.stats[1].canonical(),
                raw.stats[2].canonical(),
            ],
            sample_count: raw.sample_count,
        })
    }

    /// The normalized proportion for a band.
    pub fn proportion(&self, band: Band) -> f64 {
        match band {
            Band::Green => self.green,
            Band::Yellow => self.yellow,
            Band::Red => self.red,
        }
    }
}
