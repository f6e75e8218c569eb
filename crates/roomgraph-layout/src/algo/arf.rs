//! Attractive-repulsive force placement.
//!
//! Every pair of nodes is pulled together by a unit spring and pushed apart by `rho / d`, with
//! `rho = scaling * sqrt(n)`. Edges use the stronger spring constant `a`. The result is centered
//! on its mean.

use super::{Adjacency, ArfOptions, random_positions};
use crate::graph::Point;

pub(crate) fn layout(adj: &Adjacency, opts: &ArfOptions) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }

    let mut pos = random_positions(n, opts.random_seed);
    let rho = opts.scaling * (n as f64).sqrt();
    let a = opts.a.max(1.0);

    let mut change = vec![Point::ORIGIN; n];
    for _ in 0..opts.max_iter {
        for (j, c) in change.iter_mut().enumerate() {
            *c = Point::ORIGIN;
            for i in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = dx.hypot(dy);
                let k = if adj.has_edge(i, j) { a } else { 1.0 };
                let f = if dist > 0.0 { k - rho / dist } else { k - rho };
                c.x += dx * f;
                c.y += dy * f;
            }
        }

        let mut total = 0.0;
        for (p, c) in pos.iter_mut().zip(&change) {
            p.x += c.x * opts.dt;
            p.y += c.y * opts.dt;
            total += c.norm();
        }
        if total / (n as f64) < opts.etol {
            break;
        }
    }

    let cx = pos.iter().map(|p| p.x).sum::<f64>() / n as f64;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / n as f64;
    for p in &mut pos {
        p.x -= cx;
        p.y -= cy;
    }
    pos
}
