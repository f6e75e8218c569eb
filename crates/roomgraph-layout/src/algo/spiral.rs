use super::{Adjacency, SpiralOptions, rescale};
use crate::graph::Point;

pub(crate) fn layout(adj: &Adjacency, opts: &SpiralOptions) -> Vec<Point> {
    let n = adj.len();
    if n <= 1 {
        return vec![Point::ORIGIN; n];
    }
    let mut pos: Vec<Point> = (0..n)
        .map(|i| {
            let d = i as f64;
            let angle = opts.resolution * d;
            Point::new(d * angle.cos(), d * angle.sin())
        })
        .collect();
    rescale(&mut pos, 1.0);
    pos
}
