//! Front-chain circle packing (Wang et al., "Visualization of large hierarchical data by circle
//! packing").
//!
//! Circles are placed in input order, each one tangent to two circles on the current front
//! chain, so the packed layout stays compact when the radii are sorted ascending.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Packs circles of the given radii without overlap. Output order matches `radii`.
///
/// The first circle is centered at the origin.
pub fn pack_circles(radii: &[f64]) -> Vec<Circle> {
    let n = radii.len();
    let mut c: Vec<Circle> = radii
        .iter()
        .map(|&r| Circle { x: 0.0, y: 0.0, r })
        .collect();
    if n <= 1 {
        return c;
    }

    c[0].x = -c[1].r;
    c[1].x = c[0].r;
    if n > 2 {
        c[2] = place(c[1], c[0], c[2].r);
        pack_rest(&mut c);
    }

    let (ox, oy) = (c[0].x, c[0].y);
    for circle in &mut c {
        circle.x -= ox;
        circle.y -= oy;
    }
    c
}

fn pack_rest(c: &mut [Circle]) {
    let n = c.len();
    // Doubly linked front chain over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[1] = 0;
    next[1] = 2;
    prev[2] = 1;
    next[2] = 0;
    prev[0] = 2;

    let mut i = 3;
    'pack: while i < n {
        c[i] = place(c[a], c[b], c[i].r);

        // Closest intersecting circle on the chain, walking both directions by arc length.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = c[b].r;
        let mut sk = c[a].r;
        loop {
            if sj <= sk {
                if intersects(c[j], c[i]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += c[j].r;
                j = next[j];
            } else {
                if intersects(c[k], c[i]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += c[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[i] = a;
        next[i] = b;
        next[a] = i;
        prev[b] = i;
        b = i;

        // Re-anchor on the chain pair whose weighted midpoint is closest to the origin.
        let mut best = score(c, a, next[a]);
        let mut cur = next[i];
        while cur != b {
            let s = score(c, cur, next[cur]);
            if s < best {
                a = cur;
                best = s;
            }
            cur = next[cur];
        }
        b = next[a];
        i += 1;
    }
}

/// Circle of radius `r` tangent to both `a` and `b`.
fn place(b: Circle, a: Circle, r: f64) -> Circle {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 {
        return Circle {
            x: a.x + r,
            y: a.y,
            r,
        };
    }
    let a2 = (a.r + r) * (a.r + r);
    let b2 = (b.r + r) * (b.r + r);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        Circle {
            x: b.x - x * dx - y * dy,
            y: b.y - x * dy + y * dx,
            r,
        }
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        Circle {
            x: a.x + x * dx - y * dy,
            y: a.y + x * dy + y * dx,
            r,
        }
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(c: &[Circle], a: usize, b: usize) -> f64 {
    let (a, b) = (c[a], c[b]);
    let ab = a.r + b.r;
    if ab <= 0.0 {
        let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        return mx * mx + my * my;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
