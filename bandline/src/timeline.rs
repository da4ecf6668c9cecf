// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full layout pass: raw observations in, render records out.
//!
//! [`TimelineSpec`] wires the pipeline together: normalization, alignment,
//! stacking, connector/break geometry, and statistic projection. One call to
//! [`TimelineSpec::layout`] is one complete render pass; the output holds no
//! references into engine state and identical input produces identical
//! output.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::align::{Slot, align};
use crate::connector::{BreakMarker, ConnectorGeometry};
use crate::observation::{
    Band, CanonicalObservation, DegenerateObservationError, RawObservation,
};
use crate::period::{Period, PeriodKind};
use crate::projector::{StatisticMarker, ThresholdTable};
use crate::stack::StackedBars;

/// Layout configuration for one timeline instance.
///
/// Horizontal placement is owned by the rendering adapter: `band_x` maps a
/// present period to the left pixel edge of its band, and `band_width` is
/// the band's pixel width. The engine derives connector and break x-extents
/// from those two.
#[derive(Clone)]
pub struct TimelineSpec {
    /// Period kind the raw identifiers are interpreted as.
    pub kind: PeriodKind,
    /// Threshold table for the statistic projector.
    pub thresholds: ThresholdTable,
    /// Maps a present period to the left pixel edge of its band.
    pub band_x: Arc<dyn Fn(Period) -> f64>,
    /// Pixel width of each band.
    pub band_width: f64,
    /// Horizontal tooth excursion of break markers, in pixels.
    pub break_radius: f64,
}

impl core::fmt::Debug for TimelineSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimelineSpec")
            .field("kind", &self.kind)
            .field("thresholds", &self.thresholds)
            .field("band_x", &"<fn>")
            .field("band_width", &self.band_width)
            .field("break_radius", &self.break_radius)
            .finish()
    }
}

impl TimelineSpec {
    /// Creates a timeline spec with a default break radius.
    pub fn new(
        kind: PeriodKind,
        thresholds: ThresholdTable,
        band_x: impl Fn(Period) -> f64 + 'static,
        band_width: f64,
    ) -> Self {
        Self {
            kind,
            thresholds,
            band_x: Arc::new(band_x),
            band_width,
            break_radius: 10.0,
        }
    }

    /// Sets the break-marker tooth radius.
    pub fn with_break_radius(mut self, radius: f64) -> Self {
        self.break_radius = radius;
        self
    }

    /// Runs a full layout pass over a snapshot of raw observations.
    ///
    /// Fails on the first record whose proportions sum to zero or below;
    /// the caller drops that record (or models it as a gap) and re-runs.
    pub fn layout(
        &self,
        raw: &[RawObservation],
    ) -> Result<TimelineLayout, DegenerateObservationError> {
        let mut observations = Vec::with_capacity(raw.len());
        for record in raw {
            observations.push(CanonicalObservation::normalize(record, self.kind)?);
        }
        let slots = align(observations);

        let mut out_slots: Vec<SlotLayout> = Vec::with_capacity(slots.len());
        let mut connectors: Vec<ConnectorGeometry> = Vec::new();

        for (i, slot) in slots.iter().enumerate() {
            match slot {
                Slot::Present(obs) => {
                    let bars = StackedBars::from_observation(obs);
                    let markers = [
                        StatisticMarker::for_band(
                            &bars,
                            Band::Green,
                            &obs.stats[0],
                            &self.thresholds,
                        ),
                        StatisticMarker::for_band(
                            &bars,
                            Band::Yellow,
                            &obs.stats[1],
                            &self.thresholds,
                        ),
                        StatisticMarker::for_band(
                            &bars,
                            Band::Red,
                            &obs.stats[2],
                            &self.thresholds,
                        ),
                    ];
                    out_slots.push(SlotLayout::Present(PresentSlot {
                        x: (self.band_x)(obs.period),
                        width: self.band_width,
                        bars,
                        markers,
                        observation: *obs,
                    }));
                }
                Slot::Gap { start, end } => {
                    // The aligner only emits gaps between two present slots.
                    let prev = &slots[i - 1];
                    let next = &slots[i + 1];
                    let x_left = (self.band_x)(prev.end()) + self.band_width;
                    let x_right = (self.band_x)(next.start());
                    out_slots.push(SlotLayout::Gap(BreakMarker {
                        start: *start,
                        end: *end,
                        center_x: (x_left + x_right) / 2.0,
                        radius: self.break_radius,
                    }));
                }
            }
        }

        // Connectors join directly adjacent present pairs; a gap slot in
        // between suppresses the pair by construction.
        for window in out_slots.windows(2) {
            let (SlotLayout::Present(a), SlotLayout::Present(b)) = (&window[0], &window[1])
            else {
                continue;
            };
            connectors.push(ConnectorGeometry::new(
                a.observation.period,
                b.observation.period,
                a.x + a.width,
                b.x,
                &a.bars,
                &b.bars,
            ));
        }

        Ok(TimelineLayout {
            slots: out_slots,
            connectors,
        })
    }
}

/// The render record for one timeline slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotLayout {
    /// An observed period with its stacked dividers and markers.
    Present(PresentSlot),
    /// A detected gap with its break-marker geometry.
    Gap(BreakMarker),
}

impl SlotLayout {
    /// Whether this slot is a gap.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap(_))
    }
}

/// Layout output for one present slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentSlot {
    /// Left pixel edge of the band.
    pub x: f64,
    /// Pixel width of the band.
    pub width: f64,
    /// Stacked dividers in proportion space.
    pub bars: StackedBars,
    /// Projected statistic markers, indexed by [`Band::index`].
    pub markers: [StatisticMarker; 3],
    /// The normalized observation, carried for labels and popups.
    pub observation: CanonicalObservation,
}

/// Output of one full layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineLayout {
    /// Ordered per-slot render records (present and gap).
    pub slots: Vec<SlotLayout>,
    /// Connector quadrilaterals, one entry per adjacent present pair.
    pub connectors: Vec<ConnectorGeometry>,
}

impl TimelineLayout {
    /// Iterates over the present slots in timeline order.
    pub fn present_slots(&self) -> impl Iterator<Item = &PresentSlot> {
        self.slots.iter().filter_map(|s| match s {
            SlotLayout::Present(p) => Some(p),
            SlotLayout::Gap(_) => None,
        })
    }

    /// Iterates over the break markers in timeline order.
    pub fn break_markers(&self) -> impl Iterator<Item = &BreakMarker> {
        self.slots.iter().filter_map(|s| match s {
            SlotLayout::Gap(b) => Some(b),
            SlotLayout::Present(_) => None,
        })
    }
}
