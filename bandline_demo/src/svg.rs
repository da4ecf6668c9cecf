// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `bandline_demo`.

use kurbo::{BezPath, Circle, Rect};
use peniko::Brush;

/// One drawable element, in paint order.
#[derive(Debug)]
enum Shape {
    Rect {
        rect: Rect,
        fill: Brush,
    },
    Path {
        path: BezPath,
        fill: Option<Brush>,
        stroke: Option<(Brush, f64)>,
    },
    Circle {
        circle: Circle,
        fill: Brush,
    },
    Text {
        x: f64,
        y: f64,
        font_size: f64,
        text: String,
        fill: Brush,
    },
}

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    shapes: Vec<Shape>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn push_rect(&mut self, rect: Rect, fill: Brush) {
        self.shapes.push(Shape::Rect { rect, fill });
    }

    pub(crate) fn push_filled_path(&mut self, path: BezPath, fill: Brush) {
        self.shapes.push(Shape::Path {
            path,
            fill: Some(fill),
            stroke: None,
        });
    }

    pub(crate) fn push_stroked_path(&mut self, path: BezPath, stroke: Brush, width: f64) {
        self.shapes.push(Shape::Path {
            path,
            fill: None,
            stroke: Some((stroke, width)),
        });
    }

    pub(crate) fn push_circle(&mut self, circle: Circle, fill: Brush) {
        self.shapes.push(Shape::Circle { circle, fill });
    }

    pub(crate) fn push_label(&mut self, x: f64, y: f64, font_size: f64, text: &str, fill: Brush) {
        self.shapes.push(Shape::Text {
            x,
            y,
            font_size,
            text: text.to_string(),
            fill,
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        for shape in &self.shapes {
            match shape {
                Shape::Rect { rect, fill } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", fill);
                    out.push_str("/>\n");
                }
                Shape::Path { path, fill, stroke } => {
                    let d = path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    match fill {
                        Some(brush) => write_paint_attr(&mut out, "fill", brush),
                        None => out.push_str(r#" fill="none""#),
                    }
                    if let Some((brush, width)) = stroke {
                        write_paint_attr(&mut out, "stroke", brush);
                        out.push_str(&format!(r#" stroke-width="{width}""#));
                    }
                    out.push_str("/>\n");
                }
                Shape::Circle { circle, fill } => {
                    out.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        circle.center.x, circle.center.y, circle.radius
                    ));
                    write_paint_attr(&mut out, "fill", fill);
                    out.push_str("/>\n");
                }
                Shape::Text {
                    x,
                    y,
                    font_size,
                    text,
                    fill,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{x}" y="{y}" font-size="{font_size}" text-anchor="middle""#,
                    ));
                    write_paint_attr(&mut out, "fill", fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
