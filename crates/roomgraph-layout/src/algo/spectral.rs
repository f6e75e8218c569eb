use nalgebra::DMatrix;

use super::{Adjacency, rescale};
use crate::graph::Point;

pub(crate) fn layout(adj: &Adjacency) -> Vec<Point> {
    let n = adj.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::ORIGIN],
        2 => return vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.0)],
        _ => {}
    }

    // Combinatorial Laplacian L = D - A.
    let mut laplacian = DMatrix::<f64>::zeros(n, n);
    for &(a, b) in &adj.edges {
        laplacian[(a, b)] -= 1.0;
        laplacian[(b, a)] -= 1.0;
        laplacian[(a, a)] += 1.0;
        laplacian[(b, b)] += 1.0;
    }

    let eig = laplacian.symmetric_eigen();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| eig.eigenvalues[i].total_cmp(&eig.eigenvalues[j]));

    let (cx, cy) = (order[1], order[2]);
    let mut pos: Vec<Point> = (0..n)
        .map(|v| Point::new(eig.eigenvectors[(v, cx)], eig.eigenvectors[(v, cy)]))
        .collect();
    rescale(&mut pos, 1.0);
    pos
}
