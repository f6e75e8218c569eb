//! ForceAtlas2 (Jacomy et al.), dense O(n^2) variant without Barnes-Hut.
//!
//! Starts from a Kamada-Kawai layout, iterates with the adaptive global speed of the reference
//! algorithm and finally centers the result on the origin. The output is not rescaled.

use super::{Adjacency, ForceAtlas2Options, KamadaKawaiOptions, kamada_kawai};
use crate::graph::Point;

const MIN_DISTANCE_SQ: f64 = 1e-18;
const MIN_SPEED_EFFICIENCY: f64 = 0.05;
const MAX_RISE: f64 = 0.5;
const CONVERGED: f64 = 1e-10;

pub(crate) fn layout(adj: &Adjacency, opts: &ForceAtlas2Options) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }

    let mut pos = kamada_kawai::layout(adj, &KamadaKawaiOptions::default());
    let mass: Vec<f64> = (0..n).map(|v| 1.0 + adj.degree(v) as f64).collect();

    let mut prev = vec![Point::ORIGIN; n];
    let mut force = vec![Point::ORIGIN; n];
    let mut speed = 1.0f64;
    let mut speed_efficiency = 1.0f64;

    for _ in 0..opts.max_iter {
        force.iter_mut().for_each(|f| *f = Point::ORIGIN);

        // Repulsion, proportional to the product of masses.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let d2 = (dx * dx + dy * dy).max(MIN_DISTANCE_SQ);
                let f = opts.scaling_ratio * mass[i] * mass[j] / d2;
                force[i].x += dx * f;
                force[i].y += dy * f;
                force[j].x -= dx * f;
                force[j].y -= dy * f;
            }
        }

        // Linear attraction along edges.
        for &(a, b) in &adj.edges {
            let dx = pos[a].x - pos[b].x;
            let dy = pos[a].y - pos[b].y;
            force[a].x -= dx;
            force[a].y -= dy;
            force[b].x += dx;
            force[b].y += dy;
        }

        let (cx, cy) = centroid(&pos);
        for v in 0..n {
            let px = pos[v].x - cx;
            let py = pos[v].y - cy;
            if opts.strong_gravity {
                force[v].x -= opts.gravity * mass[v] * px;
                force[v].y -= opts.gravity * mass[v] * py;
            } else {
                let d = px.hypot(py);
                if d > 0.0 {
                    force[v].x -= opts.gravity * mass[v] * px / d;
                    force[v].y -= opts.gravity * mass[v] * py / d;
                }
            }
        }

        let mut swing = vec![0.0; n];
        let mut total_swing = 0.0;
        let mut total_traction = 0.0;
        for v in 0..n {
            swing[v] = (force[v].x - prev[v].x).hypot(force[v].y - prev[v].y);
            let traction = (force[v].x + prev[v].x).hypot(force[v].y + prev[v].y) / 2.0;
            total_swing += mass[v] * swing[v];
            total_traction += mass[v] * traction;
        }
        if total_swing <= 0.0 || total_traction <= 0.0 {
            break;
        }

        let estimated = 0.05 * (n as f64).sqrt();
        let min_jt = estimated.sqrt();
        let mut jt = opts.jitter_tolerance
            * min_jt.max((estimated * total_traction / (n * n) as f64).min(10.0));
        if total_swing / total_traction > 2.0 {
            if speed_efficiency > MIN_SPEED_EFFICIENCY {
                speed_efficiency *= 0.5;
            }
            jt = jt.max(opts.jitter_tolerance);
        }
        let target_speed = jt * speed_efficiency * total_traction / total_swing;
        if total_swing > jt * total_traction {
            if speed_efficiency > MIN_SPEED_EFFICIENCY {
                speed_efficiency *= 0.7;
            }
        } else if speed < 1000.0 {
            speed_efficiency *= 1.3;
        }
        speed += (target_speed - speed).min(MAX_RISE * speed);

        let mut moved = 0.0;
        for v in 0..n {
            let factor = speed / (1.0 + (speed * swing[v]).sqrt());
            let sx = force[v].x * factor;
            let sy = force[v].y * factor;
            pos[v].x += sx;
            pos[v].y += sy;
            moved += sx.abs() + sy.abs();
        }
        std::mem::swap(&mut prev, &mut force);
        if moved < CONVERGED {
            break;
        }
    }

    let (cx, cy) = centroid(&pos);
    for p in &mut pos {
        p.x -= cx;
        p.y -= cy;
    }
    pos
}

fn centroid(pos: &[Point]) -> (f64, f64) {
    let n = pos.len() as f64;
    (
        pos.iter().map(|p| p.x).sum::<f64>() / n,
        pos.iter().map(|p| p.y).sum::<f64>() / n,
    )
}
