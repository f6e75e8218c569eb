//! Fruchterman-Reingold force-directed placement with a linear cooling schedule.

use super::{Adjacency, SpringOptions, random_positions, rescale};
use crate::graph::Point;

const MIN_DISTANCE: f64 = 0.01;

pub(crate) fn layout(adj: &Adjacency, opts: &SpringOptions) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }

    let mut pos = random_positions(n, opts.random_seed);
    let k = (1.0 / n as f64).sqrt();

    let (min_x, max_x, min_y, max_y) = pos.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), p| (a.min(p.x), b.max(p.x), c.min(p.y), d.max(p.y)),
    );
    let mut t = (max_x - min_x).max(max_y - min_y) * 0.1;
    let dt = t / (opts.iterations as f64 + 1.0);

    let mut disp = vec![Point::ORIGIN; n];
    for _ in 0..opts.iterations {
        for (i, d) in disp.iter_mut().enumerate() {
            *d = Point::ORIGIN;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let attract = if adj.has_edge(i, j) { dist / k } else { 0.0 };
                let f = k * k / (dist * dist) - attract;
                d.x += dx * f;
                d.y += dy * f;
            }
        }

        let mut moved = 0.0;
        for (p, d) in pos.iter_mut().zip(&disp) {
            let mut len = d.norm();
            if len < MIN_DISTANCE {
                len = 0.1;
            }
            let step = Point::new(d.x * t / len, d.y * t / len);
            p.x += step.x;
            p.y += step.y;
            moved += step.norm();
        }
        t -= dt;
        if moved / (n as f64) < opts.threshold {
            break;
        }
    }

    rescale(&mut pos, 1.0);
    pos
}
