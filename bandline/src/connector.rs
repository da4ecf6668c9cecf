// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector and break geometry between adjacent timeline slots.
//!
//! Connectors make the bar sequence read as a continuous ribbon: one
//! quadrilateral per band joins the right edge of a slot's stack to the left
//! edge of the next. Where the aligner detected a gap, a fixed zigzag break
//! marker is emitted instead.
//!
//! Geometry lives in a hybrid space: x in pixels (assigned by the adapter's
//! position function), y in stack proportion `[0, 1]`. The adapter maps y
//! through its own vertical scale when drawing.

use alloc::string::String;

use kurbo::{BezPath, Point};

use crate::observation::Band;
use crate::period::Period;
use crate::stack::StackedBars;

/// Number of teeth in a break marker's zigzag.
pub const BREAK_TEETH: usize = 16;

/// Ribbon geometry joining two adjacent present slots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorGeometry {
    /// Period of the left slot.
    pub left: Period,
    /// Period of the right slot.
    pub right: Period,
    /// Right edge of the left slot's band, in pixels.
    pub x_left: f64,
    /// Left edge of the right slot's band, in pixels.
    pub x_right: f64,
    quads: [[Point; 4]; 3],
}

impl ConnectorGeometry {
    /// Builds the three per-band quadrilaterals between two stacks.
    pub fn new(
        left: Period,
        right: Period,
        x_left: f64,
        x_right: f64,
        left_bars: &StackedBars,
        right_bars: &StackedBars,
    ) -> Self {
        let ld = left_bars.dividers();
        let rd = right_bars.dividers();
        let mut quads = [[Point::ZERO; 4]; 3];
        for (j, quad) in quads.iter_mut().enumerate() {
            *quad = [
                Point::new(x_left, ld[j]),
                Point::new(x_right, rd[j]),
                Point::new(x_right, rd[j + 1]),
                Point::new(x_left, ld[j + 1]),
            ];
        }
        Self {
            left,
            right,
            x_left,
            x_right,
            quads,
        }
    }

    /// The four corners of a band's quadrilateral, counter-clockwise from
    /// the lower-left.
    pub fn corners(&self, band: Band) -> [Point; 4] {
        self.quads[band.index()]
    }

    /// The closed outline of a band's quadrilateral.
    pub fn band_path(&self, band: Band) -> BezPath {
        let c = self.corners(band);
        let mut path = BezPath::new();
        path.move_to(c[0]);
        path.line_to(c[1]);
        path.line_to(c[2]);
        path.line_to(c[3]);
        path.close_path();
        path
    }
}

/// A zigzag marker denoting a detected gap in the period sequence.
///
/// The marker spans the full proportion range `[0, 1]` vertically and
/// alternates left/right excursions of `radius` pixels around `center_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakMarker {
    /// First missing period of the gap.
    pub start: Period,
    /// Last missing period of the gap.
    pub end: Period,
    /// Horizontal center of the gap, in pixels.
    pub center_x: f64,
    /// Horizontal excursion of each tooth, in pixels.
    pub radius: f64,
}

impl BreakMarker {
    /// The axis label for the missing range, following the same single
    /// period versus "from – to" rule as [`Slot::label`].
    ///
    /// [`Slot::label`]: crate::Slot::label
    pub fn label(&self) -> String {
        crate::align::Slot::Gap {
            start: self.start,
            end: self.end,
        }
        .label()
    }

    /// The zigzag outline: [`BREAK_TEETH`] teeth, each a quarter of a
    /// `0.0625` proportion step, with vertices at `0.015625 + 0.0625 i`,
    /// `0.03125 + 0.0625 i`, and `0.046875 + 0.0625 i`.
    pub fn path(&self) -> BezPath {
        let cx = self.center_x;
        let r = self.radius;
        let mut path = BezPath::new();
        path.move_to(Point::new(cx, 0.0));
        for i in 0..BREAK_TEETH {
            let base = 0.0625 * i as f64;
            path.line_to(Point::new(cx + r, base + 0.015625));
            path.line_to(Point::new(cx, base + 0.03125));
            path.line_to(Point::new(cx - r, base + 0.046875));
            path.line_to(Point::new(cx, 0.0625 * (i + 1) as f64));
        }
        path.close_path();
        path
    }
}
