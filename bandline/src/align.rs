// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequence alignment: turning a sparse observation set into a contiguous
//! slot sequence with explicit gaps.
//!
//! The aligner is a single linear scan over the period-sorted observations.
//! Adjacent periods produce no extra slot; every non-adjacent boundary
//! produces exactly one [`Slot::Gap`] spanning the missing range, inclusive
//! on both ends (`[successor(before), predecessor(after)]`). Gaps are never
//! merged or split based on their length.

use alloc::string::String;
use alloc::vec::Vec;

use crate::observation::CanonicalObservation;
use crate::period::Period;

/// One entry of the aligned timeline: either an observed period or a
/// synthesized gap covering a missing range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    /// An observed period.
    Present(CanonicalObservation),
    /// A missing range of periods, inclusive on both ends.
    Gap {
        /// First missing period.
        start: Period,
        /// Last missing period. Equal to `start` for a single-period gap.
        end: Period,
    },
}

impl Slot {
    /// Whether this slot is a gap.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }

    /// The slot's first period (the observation period, or the gap start).
    pub fn start(&self) -> Period {
        match self {
            Self::Present(obs) => obs.period,
            Self::Gap { start, .. } => *start,
        }
    }

    /// The slot's last period (equal to [`start`] for present slots).
    ///
    /// [`start`]: Self::start
    pub fn end(&self) -> Period {
        match self {
            Self::Present(obs) => obs.period,
            Self::Gap { end, .. } => *end,
        }
    }

    /// An axis label for the slot.
    ///
    /// Single periods (and single-period gaps) render as one period label;
    /// longer gaps render as a "from – to" range.
    pub fn label(&self) -> String {
        use core::fmt::Write;

        let mut out = String::new();
        match self {
            Self::Present(obs) => {
                let _ = write!(out, "{}", obs.period);
            }
            Self::Gap { start, end } if start == end => {
                let _ = write!(out, "{start}");
            }
            Self::Gap { start, end } => {
                let _ = write!(out, "{start} – {end}");
            }
        }
        out
    }
}

/// Aligns observations into a contiguous slot sequence.
///
/// The input is sorted defensively by period sort key (stable, so records
/// with equal periods keep their input order; callers are expected to supply
/// distinct periods). Zero or one observations yield a sequence with no gap.
pub fn align(mut observations: Vec<CanonicalObservation>) -> Vec<Slot> {
    observations.sort_by_key(|obs| obs.period.sort_key());

    let mut slots = Vec::with_capacity(observations.len());
    let mut iter = observations.into_iter();
    let Some(first) = iter.next() else {
        return slots;
    };

    let mut prev = first.period;
    slots.push(Slot::Present(first));
    for obs in iter {
        let next = obs.period;
        if !prev.is_adjacent_to(next) {
            let start = prev.successor();
            let end = next.predecessor();
            // Equal (duplicate) periods would invert the range; emit nothing.
            if start.sort_key() <= end.sort_key() {
                slots.push(Slot::Gap { start, end });
            }
        }
        slots.push(Slot::Present(obs));
        prev = next;
    }
    slots
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use crate::observation::RawObservation;
    use crate::period::PeriodKind;

    use super::*;

    fn month_obs(year: i32, month: u8) -> CanonicalObservation {
        let raw = RawObservation::new(year, i64::from(month) - 1, 0.5, 0.3, 0.2);
        CanonicalObservation::normalize(&raw, PeriodKind::Month).unwrap()
    }

    #[test]
    fn single_missing_month_yields_one_single_period_gap() {
        let slots = align(vec![month_obs(2021, 9), month_obs(2021, 11)]);
        assert_eq!(slots.len(), 3);
        assert_eq!(
            slots[1],
            Slot::Gap {
                start: Period::month(2021, 10),
                end: Period::month(2021, 10),
            }
        );
        assert_eq!(slots[1].label(), "Oct 2021");
    }

    #[test]
    fn multi_month_gap_spans_inclusive_range_with_range_label() {
        let slots = align(vec![month_obs(2021, 11), month_obs(2022, 3)]);
        assert_eq!(slots.len(), 3);
        assert_eq!(
            slots[1],
            Slot::Gap {
                start: Period::month(2021, 12),
                end: Period::month(2022, 2),
            }
        );
        assert_eq!(slots[1].label(), "Dec 2021 – Feb 2022");
    }

    #[test]
    fn unsorted_input_is_sorted_defensively() {
        let slots = align(vec![month_obs(2021, 11), month_obs(2021, 9), month_obs(2021, 10)]);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| !s.is_gap()));
        assert_eq!(slots[0].start(), Period::month(2021, 9));
        assert_eq!(slots[2].start(), Period::month(2021, 11));
    }

    #[test]
    fn degenerate_inputs_produce_no_gap() {
        assert!(align(Vec::new()).is_empty());
        let slots = align(vec![month_obs(2021, 9)]);
        assert_eq!(slots.len(), 1);
        assert!(!slots[0].is_gap());
    }

    #[test]
    fn realigning_present_slots_reproduces_gap_boundaries() {
        let first = align(vec![month_obs(2021, 6), month_obs(2021, 9), month_obs(2022, 1)]);
        let survivors: Vec<CanonicalObservation> = first
            .iter()
            .filter_map(|s| match s {
                Slot::Present(obs) => Some(*obs),
                Slot::Gap { .. } => None,
            })
            .collect();
        let second = align(survivors);
        assert_eq!(first, second);
    }

    #[test]
    fn adjacency_holds_across_every_boundary() {
        let slots = align(vec![month_obs(2021, 9), month_obs(2021, 12), month_obs(2022, 4)]);
        for pair in slots.windows(2) {
            assert!(
                pair[0].end().is_adjacent_to(pair[1].start()),
                "consecutive slots must cover adjacent periods"
            );
        }
    }
}
