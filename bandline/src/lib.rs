// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for time-series risk-band timelines.
//!
//! A timeline is a sequence of calendar periods (days, weeks, or months),
//! each carrying three risk-band proportions. This crate turns sparse raw
//! records into render-ready geometry:
//! - **Periods** get exact calendar arithmetic and a total order.
//! - **Normalization** rescales each record's proportions onto the unit
//!   interval.
//! - **Alignment** detects missing periods and synthesizes explicit gap
//!   slots.
//! - **Stacking** converts proportions into cumulative divider values.
//! - **Connectors and break markers** join adjacent bars into a ribbon and
//!   mark gaps with a zigzag.
//! - **Statistic projection** places per-band mean/mode markers inside their
//!   segments via a threshold table.
//!
//! The engine computes geometry only; rasterization, styling, and
//! interaction belong to the embedding renderer. Vertical coordinates are
//! stack proportions in `[0, 1]` which the renderer maps through its own
//! scale; horizontal coordinates are pixels supplied by the renderer's
//! band-position function.

#![no_std]

extern crate alloc;

mod align;
mod connector;
mod observation;
mod period;
#[cfg(test)]
mod pipeline_tests;
mod projector;
mod stack;
mod timeline;

pub use align::{Slot, align};
pub use connector::{BREAK_TEETH, BreakMarker, ConnectorGeometry};
pub use observation::{
    Band, BandStats, CanonicalObservation, DegenerateObservationError, RawObservation,
};
pub use period::{Date, Period, PeriodKind, YearMonth};
pub use projector::{
    EDGE_CLEARANCE, StatisticMarker, ThresholdTable, ThresholdTableError, project_statistic,
};
pub use stack::StackedBars;
pub use timeline::{PresentSlot, SlotLayout, TimelineLayout, TimelineSpec};

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("bandline requires either the `std` or `libm` feature");
