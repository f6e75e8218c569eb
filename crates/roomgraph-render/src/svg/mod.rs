//! Static SVG rendering of a placed room graph.
//!
//! Layout coordinates are y-up; they are flipped when written so the drawing matches the layout.

pub(crate) mod util;

use crate::color::NodeColoring;
use crate::place::Placement;
use roomgraph_graphlib::SimpleGraph;
use roomgraph_layout::Point;
use std::fmt::Write as _;
use util::{escape_xml_into, fmt};

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Pixels per layout unit (the shortest edge of a component is one unit long).
    pub unit: f64,
    pub node_radius: f64,
    pub margin: f64,
    pub font_size: f64,
    /// Draw arrow heads. `None` draws them for directed graphs only.
    pub arrows: Option<bool>,
    pub with_labels: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            unit: 60.0,
            node_radius: 16.0,
            margin: 48.0,
            font_size: 10.0,
            arrows: None,
            with_labels: true,
        }
    }
}

const EDGE_COLOR: &str = "#444444";

/// Renders the nodes of `g` that have a position in `placement`, and the edges between them.
pub fn render_graph_svg(
    g: &SimpleGraph,
    placement: &Placement,
    coloring: &NodeColoring,
    opts: &SvgOptions,
) -> String {
    let arrows = opts.arrows.unwrap_or(g.is_directed());
    let to_px = |p: Point| Point::new(p.x * opts.unit, -p.y * opts.unit);

    let (min, max) = bounds(placement.positions.values().map(|&p| to_px(p)));
    let vb_x = min.x - opts.margin;
    let vb_y = min.y - opts.margin;
    let vb_w = (max.x - min.x) + 2.0 * opts.margin;
    let vb_h = (max.y - min.y) + 2.0 * opts.margin;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
        x = fmt(vb_x),
        y = fmt(vb_y),
        w = fmt(vb_w),
        h = fmt(vb_h),
    );
    if arrows {
        let _ = write!(
            out,
            r#"<defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{EDGE_COLOR}"/></marker></defs>"#
        );
    }
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        fmt(vb_x),
        fmt(vb_y),
        fmt(vb_w),
        fmt(vb_h)
    );

    out.push_str(r#"<g class="edges">"#);
    for key in g.edges() {
        let (Some(&a), Some(&b)) = (
            placement.positions.get(&key.v),
            placement.positions.get(&key.w),
        ) else {
            continue;
        };
        let (a, b) = (to_px(a), to_px(b));
        let len = a.distance(b);
        if len <= 0.0 {
            continue;
        }
        let end = if arrows {
            let t = (len - opts.node_radius).max(0.0) / len;
            Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
        } else {
            b
        };
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{EDGE_COLOR}" stroke-width="1.2""#,
            fmt(a.x),
            fmt(a.y),
            fmt(end.x),
            fmt(end.y)
        );
        if arrows {
            out.push_str(r#" marker-end="url(#arrow)""#);
        }
        out.push_str("/>");
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for (id, &p) in &placement.positions {
        if !g.has_node(id) {
            continue;
        }
        let p = to_px(p);
        out.push_str(r#"<circle cx=""#);
        out.push_str(&fmt(p.x));
        out.push_str(r#"" cy=""#);
        out.push_str(&fmt(p.y));
        let _ = write!(out, r#"" r="{}" fill=""#, fmt(opts.node_radius));
        escape_xml_into(&mut out, coloring.color_of(id));
        out.push_str(r##"" stroke="#222222" stroke-width="0.8"><title>"##);
        escape_xml_into(&mut out, id);
        out.push_str("</title></circle>");
    }
    out.push_str("</g>");

    if opts.with_labels {
        let _ = write!(
            out,
            r#"<g class="labels" font-family="sans-serif" font-size="{}" text-anchor="middle" dominant-baseline="central">"#,
            fmt(opts.font_size)
        );
        for (id, &p) in &placement.positions {
            if !g.has_node(id) {
                continue;
            }
            let p = to_px(p);
            let _ = write!(out, r#"<text x="{}" y="{}">"#, fmt(p.x), fmt(p.y));
            escape_xml_into(&mut out, id);
            out.push_str("</text>");
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>\n");
    out
}

fn bounds(points: impl Iterator<Item = Point>) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    if !min.x.is_finite() {
        return (Point::ORIGIN, Point::ORIGIN);
    }
    (min, max)
}
