//! Kamada-Kawai spring embedding.
//!
//! Every pair of nodes is joined by a spring whose rest length is their hop distance and whose
//! stiffness is the inverse square of that distance. The node with the largest energy gradient is
//! moved one Newton-Raphson step at a time until every gradient is below `epsilon`.

use super::{Adjacency, KamadaKawaiOptions, circular, rescale};
use crate::graph::Point;

const MIN_DISTANCE: f64 = 1e-9;

struct Springs {
    length: Vec<Vec<f64>>,
    strength: Vec<Vec<f64>>,
}

impl Springs {
    fn new(adj: &Adjacency) -> Self {
        let n = adj.len();
        let hops: Vec<Vec<Option<usize>>> = (0..n).map(|v| adj.hops_from(v)).collect();
        let longest = hops.iter().flatten().flatten().copied().max().unwrap_or(1);
        // Pairs in different components keep a spring slightly longer than the diameter.
        let disconnected = (longest + 1) as f64;

        let mut length = vec![vec![0.0; n]; n];
        let mut strength = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = hops[i][j].map(|d| d as f64).unwrap_or(disconnected);
                length[i][j] = d;
                strength[i][j] = 1.0 / (d * d);
            }
        }
        Self { length, strength }
    }

    /// Gradient contribution on `i` from the spring to `j`.
    fn pull(&self, pos: &[Point], i: usize, j: usize) -> (f64, f64) {
        let dx = pos[i].x - pos[j].x;
        let dy = pos[i].y - pos[j].y;
        let dist = dx.hypot(dy).max(MIN_DISTANCE);
        let k = self.strength[i][j];
        let l = self.length[i][j];
        (k * (dx - l * dx / dist), k * (dy - l * dy / dist))
    }

    fn gradient(&self, pos: &[Point], m: usize) -> (f64, f64) {
        let mut gx = 0.0;
        let mut gy = 0.0;
        for j in 0..pos.len() {
            if j != m {
                let (x, y) = self.pull(pos, m, j);
                gx += x;
                gy += y;
            }
        }
        (gx, gy)
    }

    fn newton_step(&self, pos: &[Point], m: usize, gx: f64, gy: f64) -> (f64, f64) {
        let mut hxx = 0.0;
        let mut hxy = 0.0;
        let mut hyy = 0.0;
        for j in 0..pos.len() {
            if j == m {
                continue;
            }
            let dx = pos[m].x - pos[j].x;
            let dy = pos[m].y - pos[j].y;
            let dist = dx.hypot(dy).max(MIN_DISTANCE);
            let cube = dist * dist * dist;
            let k = self.strength[m][j];
            let l = self.length[m][j];
            hxx += k * (1.0 - l * dy * dy / cube);
            hxy += k * l * dx * dy / cube;
            hyy += k * (1.0 - l * dx * dx / cube);
        }
        let det = hxx * hyy - hxy * hxy;
        if det.abs() < 1e-12 {
            return (-gx / (hxx.abs() + 1.0), -gy / (hyy.abs() + 1.0));
        }
        ((-gx * hyy + gy * hxy) / det, (-gy * hxx + gx * hxy) / det)
    }
}

pub(crate) fn layout(adj: &Adjacency, opts: &KamadaKawaiOptions) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }

    let springs = Springs::new(adj);
    let radius = (springs.length.iter().flatten().fold(1.0f64, |a, &b| a.max(b)) / 2.0).max(1.0);
    let mut pos: Vec<Point> = circular(n)
        .into_iter()
        .map(|p| Point::new(p.x * radius, p.y * radius))
        .collect();

    let mut grad: Vec<(f64, f64)> = (0..n).map(|m| springs.gradient(&pos, m)).collect();

    for _ in 0..opts.max_iterations {
        let (m, delta) = grad
            .iter()
            .enumerate()
            .map(|(i, &(gx, gy))| (i, gx.hypot(gy)))
            .fold((0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best });
        if delta < opts.epsilon {
            break;
        }

        let (gx, gy) = grad[m];
        let (sx, sy) = springs.newton_step(&pos, m, gx, gy);

        for (i, g) in grad.iter_mut().enumerate() {
            if i != m {
                let (x, y) = springs.pull(&pos, i, m);
                g.0 -= x;
                g.1 -= y;
            }
        }
        pos[m].x += sx;
        pos[m].y += sy;
        for (i, g) in grad.iter_mut().enumerate() {
            if i != m {
                let (x, y) = springs.pull(&pos, i, m);
                g.0 += x;
                g.1 += y;
            }
        }
        grad[m] = springs.gradient(&pos, m);
    }

    rescale(&mut pos, 1.0);
    pos
}
