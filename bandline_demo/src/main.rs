// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a monthly risk-band timeline to a standalone SVG file.
//!
//! The sample feed covers Sep 2021 through Mar 2022 with December missing,
//! so the output shows every layout feature at once: stacked bars, ribbon
//! connectors, a zigzag break marker, and projected statistic markers.

mod svg;

use kurbo::{Affine, Circle, Line, Point, Rect, Shape};
use peniko::{Brush, Color};

use bandline::{
    Band, BandStats, Period, PeriodKind, RawObservation, SlotLayout, ThresholdTable,
    TimelineSpec,
};

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_TOP: f64 = 20.0;
const PLOT_HEIGHT: f64 = 260.0;
const BAND_WIDTH: f64 = 46.0;
const BAND_STEP: f64 = 82.0;

/// Band fills, indexed by [`Band::index`].
const BAND_COLORS: [Color; 3] = [
    Color::from_rgb8(0x60, 0xd3, 0x94),
    Color::from_rgb8(0xfd, 0xdb, 0x8a),
    Color::from_rgb8(0xee, 0x60, 0x55),
];

/// Lighter companions used for the connector ribbons.
const CONNECTOR_COLORS: [Color; 3] = [
    Color::from_rgb8(0xb1, 0xff, 0xda),
    Color::from_rgb8(0xff, 0xe0, 0xa6),
    Color::from_rgb8(0xff, 0xad, 0xa8),
];

const AXIS_COLOR: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const MARKER_COLOR: Color = Color::from_rgb8(0x1f, 0x2d, 0x3d);

fn sample_feed() -> Vec<RawObservation> {
    let stats = |mean: f64, mode: f64| BandStats {
        mean: Some(mean),
        mode: Some(mode),
        std_dev: Some(4.0),
    };
    // Sub-unit is the zero-based month index; December 2021 is absent.
    vec![
        RawObservation::new(2021, 8, 0.643_799_472_295_514_5, 0.356_200_527_704_485_46, 0.0)
            .with_stats([stats(12.4, 8.0), stats(41.0, 38.5), BandStats::default()])
            .with_sample_count(118),
        RawObservation::new(2021, 9, 0.338_015_405_527_865_85, 0.249_207_068_418_667_85, 0.412_777_526_053_466_2)
            .with_stats([stats(18.9, 22.0), stats(47.2, 44.0), stats(78.5, 71.0)])
            .with_sample_count(131),
        RawObservation::new(2021, 10, 0.396_816_372_939_17, 0.549_175_667_993_178, 0.054_007_959_067_652_08)
            .with_stats([stats(9.6, 11.5), stats(52.8, 55.0), stats(63.1, 61.5)])
            .with_sample_count(104),
        RawObservation::new(2022, 0, 0.789_361_196_865_352_7, 0.186_297_791_498_456_4, 0.024_341_011_636_190_93)
            .with_stats([stats(6.2, 4.5), stats(36.7, 33.0), stats(90.4, 88.0)])
            .with_sample_count(126),
        RawObservation::new(2022, 1, 0.278_470_056_831_301_94, 0.198_286_588_576_924_94, 0.523_243_354_591_773_3)
            .with_stats([stats(21.3, 24.0), stats(49.9, 51.5), stats(102.6, 97.0)])
            .with_sample_count(97),
        RawObservation::new(2022, 2, 0.623_943_185_661_143_2, 0.353_060_534_325_329_74, 0.022_996_280_013_527_225)
            .with_stats([stats(10.8, 7.5), stats(39.4, 42.0), stats(66.0, 64.5)])
            .with_sample_count(142),
    ]
}

/// Maps a stack proportion in `[0, 1]` to a pixel y, bottom up.
fn proportion_to_px() -> Affine {
    Affine::new([
        1.0,
        0.0,
        0.0,
        -PLOT_HEIGHT,
        0.0,
        MARGIN_TOP + PLOT_HEIGHT,
    ])
}

fn main() {
    let thresholds =
        ThresholdTable::new([-15.0, 30.0, 60.0, 120.0]).expect("static threshold table");
    let origin = Period::month(2021, 9).sort_key();
    let spec = TimelineSpec::new(
        PeriodKind::Month,
        thresholds,
        move |p: Period| MARGIN_LEFT + BAND_STEP * (p.sort_key() - origin) as f64,
        BAND_WIDTH,
    );
    let layout = spec.layout(&sample_feed()).expect("sample feed is well formed");

    let to_px = proportion_to_px();
    let mut scene = svg::SvgScene::default();
    let width = MARGIN_LEFT * 2.0 + BAND_STEP * (layout.slots.len() - 1) as f64 + BAND_WIDTH;
    let height = MARGIN_TOP + PLOT_HEIGHT + 40.0;
    scene.set_view_box(Rect::new(0.0, 0.0, width, height));

    // Connector ribbons go under the bars.
    for conn in &layout.connectors {
        for band in Band::ALL {
            scene.push_filled_path(
                to_px * conn.band_path(band),
                Brush::Solid(CONNECTOR_COLORS[band.index()]),
            );
        }
    }

    for slot in &layout.slots {
        match slot {
            SlotLayout::Present(present) => {
                for band in Band::ALL {
                    let (lo, hi) = present.bars.segment(band);
                    let top = to_px * Point::new(0.0, hi);
                    let bottom = to_px * Point::new(0.0, lo);
                    scene.push_rect(
                        Rect::new(present.x, top.y, present.x + present.width, bottom.y),
                        Brush::Solid(BAND_COLORS[band.index()]),
                    );
                }
                for marker in present.markers {
                    let cx = present.x + present.width / 2.0;
                    if let Some(mean) = marker.mean {
                        let c = to_px * Point::new(0.0, mean);
                        scene.push_circle(
                            Circle::new((cx, c.y), 3.0),
                            Brush::Solid(MARKER_COLOR),
                        );
                    }
                    if let Some(mode) = marker.mode {
                        let c = to_px * Point::new(0.0, mode);
                        let tick = Line::new((cx - 6.0, c.y), (cx + 6.0, c.y));
                        scene.push_stroked_path(
                            tick.to_path(0.1),
                            Brush::Solid(MARKER_COLOR),
                            1.5,
                        );
                    }
                }
                scene.push_label(
                    present.x + present.width / 2.0,
                    MARGIN_TOP + PLOT_HEIGHT + 20.0,
                    12.0,
                    &present.observation.period.to_string(),
                    Brush::Solid(AXIS_COLOR),
                );
            }
            SlotLayout::Gap(marker) => {
                scene.push_stroked_path(
                    to_px * marker.path(),
                    Brush::Solid(AXIS_COLOR),
                    1.0,
                );
                scene.push_label(
                    marker.center_x,
                    MARGIN_TOP + PLOT_HEIGHT + 20.0,
                    12.0,
                    &marker.label(),
                    Brush::Solid(AXIS_COLOR),
                );
            }
        }
    }

    // Baseline under the bars.
    let baseline = Line::new(
        (MARGIN_LEFT - 10.0, MARGIN_TOP + PLOT_HEIGHT),
        (width - MARGIN_LEFT + 10.0, MARGIN_TOP + PLOT_HEIGHT),
    );
    scene.push_stroked_path(baseline.to_path(0.1), Brush::Solid(AXIS_COLOR), 1.0);

    std::fs::write("bandline_demo.svg", scene.to_svg_string()).expect("write bandline_demo.svg");
    println!("wrote bandline_demo.svg");
}
