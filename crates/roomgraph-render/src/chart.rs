//! Reach chart: how many rooms lie within `k` hops of the best connected room.

use crate::svg::util::{escape_xml_into, fmt};
use roomgraph_graphlib::{SimpleGraph, alg};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachSeries {
    /// Node of maximum degree the hops are counted from.
    pub start: String,
    /// `counts[k]` is the number of nodes within `k` hops of `start`, following edge direction.
    pub counts: Vec<usize>,
}

/// Reach of the max-degree node for `k` in `0..=d`, where `d` is the largest diameter over the
/// weakly connected components of `g`. `None` for an empty graph.
pub fn reach_counts(g: &SimpleGraph) -> Option<ReachSeries> {
    let start = alg::max_degree_node(g)?;
    let max_diameter = alg::components(g)
        .into_iter()
        .filter_map(|members| {
            let sub = alg::subgraph(g, |id| members.iter().any(|m| m == id));
            alg::diameter(&alg::to_undirected(&sub))
        })
        .max()
        .unwrap_or(0);
    let counts = (0..=max_diameter)
        .map(|k| alg::single_source_shortest_path_length(g, &start, Some(k)).len())
        .collect();
    Some(ReachSeries { start, counts })
}

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 420.0;
const LEFT: f64 = 64.0;
const RIGHT: f64 = 24.0;
const TOP: f64 = 24.0;
const BOTTOM: f64 = 56.0;
const MAX_TICKS: usize = 10;

/// Line chart of `series` with integer ticks on both axes.
pub fn render_reach_svg(series: &ReachSeries) -> String {
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = HEIGHT - TOP - BOTTOM;
    let x_max = series.counts.len().saturating_sub(1).max(1) as f64;
    let y_max = series.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let px = |k: f64| LEFT + k / x_max * plot_w;
    let py = |c: f64| TOP + plot_h - c / y_max * plot_h;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = fmt(WIDTH),
        h = fmt(HEIGHT)
    );
    let _ = write!(
        out,
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        fmt(WIDTH),
        fmt(HEIGHT)
    );
    let _ = write!(
        out,
        r##"<path d="M {l} {t} L {l} {b} L {r} {b}" fill="none" stroke="#000000"/>"##,
        l = fmt(LEFT),
        t = fmt(TOP),
        b = fmt(TOP + plot_h),
        r = fmt(LEFT + plot_w)
    );

    for k in integer_ticks(x_max as usize) {
        let x = px(k as f64);
        let _ = write!(
            out,
            r##"<line x1="{x}" y1="{y0}" x2="{x}" y2="{y1}" stroke="#000000"/><text x="{x}" y="{ty}" text-anchor="middle">{k}</text>"##,
            x = fmt(x),
            y0 = fmt(TOP + plot_h),
            y1 = fmt(TOP + plot_h + 5.0),
            ty = fmt(TOP + plot_h + 20.0),
        );
    }
    for c in integer_ticks(y_max as usize) {
        let y = py(c as f64);
        let _ = write!(
            out,
            r##"<line x1="{x0}" y1="{y}" x2="{x1}" y2="{y}" stroke="#000000"/><text x="{tx}" y="{y}" text-anchor="end" dominant-baseline="central">{c}</text>"##,
            x0 = fmt(LEFT - 5.0),
            x1 = fmt(LEFT),
            tx = fmt(LEFT - 8.0),
            y = fmt(y),
        );
    }

    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle">Degrees from "#,
        fmt(LEFT + plot_w / 2.0),
        fmt(HEIGHT - 12.0)
    );
    escape_xml_into(&mut out, &series.start);
    out.push_str("</text>");
    let _ = write!(
        out,
        r#"<text x="16" y="{y}" text-anchor="middle" transform="rotate(-90 16 {y})">Locations</text>"#,
        y = fmt(TOP + plot_h / 2.0)
    );

    if !series.counts.is_empty() {
        out.push_str(r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points=""##);
        for (k, &c) in series.counts.iter().enumerate() {
            if k > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{},{}", fmt(px(k as f64)), fmt(py(c as f64)));
        }
        out.push_str(r#""/>"#);
        for (k, &c) in series.counts.iter().enumerate() {
            let _ = write!(
                out,
                r##"<circle cx="{}" cy="{}" r="4" fill="#1f77b4"/>"##,
                fmt(px(k as f64)),
                fmt(py(c as f64))
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Integer tick values in `0..=max`, at most `MAX_TICKS + 1` of them.
fn integer_ticks(max: usize) -> Vec<usize> {
    let step = max.div_ceil(MAX_TICKS).max(1);
    (0..=max).step_by(step).collect()
}

#[cfg(test)]
mod tests {
    use super::integer_ticks;

    #[test]
    fn ticks_stay_integral_and_sparse() {
        assert_eq!(integer_ticks(3), vec![0, 1, 2, 3]);
        assert_eq!(integer_ticks(0), vec![0]);
        let many = integer_ticks(95);
        assert!(many.len() <= 11);
        assert_eq!(many[1], 10);
    }
}
