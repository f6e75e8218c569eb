//! Layered layout: each breadth-first layer becomes a column, nodes spread vertically within it.

use super::{Adjacency, BfsOptions, rescale};
use crate::graph::Point;

pub(crate) fn layout(adj: &Adjacency, opts: &BfsOptions) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }

    let start = opts
        .start
        .as_deref()
        .and_then(|id| adj.ids.iter().position(|v| v == id))
        .unwrap_or_else(|| max_degree(adj));

    let dist = adj.hops_from(start);
    let deepest = dist.iter().flatten().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); deepest + 1];
    let mut unreachable: Vec<usize> = Vec::new();
    for (v, d) in dist.iter().enumerate() {
        match d {
            Some(d) => layers[*d].push(v),
            None => unreachable.push(v),
        }
    }
    if !unreachable.is_empty() {
        layers.push(unreachable);
    }

    let width = layers.len() as f64;
    let mut pos = vec![Point::ORIGIN; n];
    for (i, layer) in layers.iter().enumerate() {
        let height = layer.len() as f64;
        for (j, &v) in layer.iter().enumerate() {
            pos[v] = Point::new(
                i as f64 - (width - 1.0) / 2.0,
                j as f64 - (height - 1.0) / 2.0,
            );
        }
    }
    rescale(&mut pos, 1.0);
    pos
}

fn max_degree(adj: &Adjacency) -> usize {
    let mut best = 0usize;
    for v in 1..adj.len() {
        if adj.degree(v) > adj.degree(best) {
            best = v;
        }
    }
    best
}
