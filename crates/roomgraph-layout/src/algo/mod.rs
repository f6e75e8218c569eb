pub mod arf;
pub mod bfs;
pub mod forceatlas2;
pub mod kamada_kawai;
pub mod spectral;
pub mod spiral;
pub mod spring;

use crate::error::{Error, Result};
use crate::graph::{Graph, LayoutResult, Point};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Stress minimization against hop distances.
    KamadaKawai(KamadaKawaiOptions),
    /// Fruchterman-Reingold force simulation.
    Spring(SpringOptions),
    /// Nodes placed along an Archimedean spiral in insertion order.
    Spiral(SpiralOptions),
    /// Two smallest non-trivial Laplacian eigenvectors.
    Spectral,
    /// ForceAtlas2, seeded from a Kamada-Kawai layout.
    ForceAtlas2(ForceAtlas2Options),
    /// Breadth-first layers from a start node (the max-degree node by default).
    Bfs(BfsOptions),
    /// Attractive-repulsive forces, centered on the mean.
    Arf(ArfOptions),
}

impl Algorithm {
    /// Names accepted by [`Algorithm::from_name`].
    pub const NAMES: &'static [&'static str] = &[
        "kamada_kawai",
        "spring",
        "spiral",
        "spectral",
        "forceatlas2",
        "bfs",
        "arf",
    ];

    /// Resolves a layout name to an algorithm with default options.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "kamada_kawai" => Ok(Self::KamadaKawai(KamadaKawaiOptions::default())),
            "spring" => Ok(Self::Spring(SpringOptions::default())),
            "spiral" => Ok(Self::Spiral(SpiralOptions::default())),
            "spectral" => Ok(Self::Spectral),
            "forceatlas2" => Ok(Self::ForceAtlas2(ForceAtlas2Options::default())),
            "bfs" => Ok(Self::Bfs(BfsOptions::default())),
            "arf" => Ok(Self::Arf(ArfOptions::default())),
            other => Err(Error::UnknownLayout {
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::KamadaKawai(_) => "kamada_kawai",
            Self::Spring(_) => "spring",
            Self::Spiral(_) => "spiral",
            Self::Spectral => "spectral",
            Self::ForceAtlas2(_) => "forceatlas2",
            Self::Bfs(_) => "bfs",
            Self::Arf(_) => "arf",
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[derive(Debug, Clone)]
pub struct KamadaKawaiOptions {
    /// Upper bound on single-node Newton steps.
    pub max_iterations: usize,
    /// Stop once the largest energy gradient drops below this value.
    pub epsilon: f64,
}

impl Default for KamadaKawaiOptions {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            epsilon: 1e-4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpringOptions {
    pub iterations: usize,
    pub threshold: f64,
    pub random_seed: u64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            iterations: 50,
            threshold: 1e-4,
            random_seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpiralOptions {
    /// Angle increment (radians) between consecutive nodes.
    pub resolution: f64,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self { resolution: 0.35 }
    }
}

#[derive(Debug, Clone)]
pub struct ForceAtlas2Options {
    pub max_iter: usize,
    pub jitter_tolerance: f64,
    pub scaling_ratio: f64,
    pub gravity: f64,
    /// Gravity grows linearly with distance from the center instead of staying constant.
    pub strong_gravity: bool,
}

impl Default for ForceAtlas2Options {
    fn default() -> Self {
        Self {
            max_iter: 100,
            jitter_tolerance: 1.0,
            scaling_ratio: 2.0,
            gravity: 1.0,
            strong_gravity: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArfOptions {
    /// Spring constant of edges; values below 1 are raised to 1.
    pub a: f64,
    pub scaling: f64,
    /// Step size of each update.
    pub dt: f64,
    /// Stop once the mean force per node drops below this value.
    pub etol: f64,
    pub max_iter: usize,
    pub random_seed: u64,
}

impl Default for ArfOptions {
    fn default() -> Self {
        Self {
            a: 1.1,
            scaling: 1.0,
            dt: 1e-3,
            etol: 1e-6,
            max_iter: 1000,
            random_seed: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BfsOptions {
    /// Root of the layering. Falls back to the max-degree node when unset or unknown.
    pub start: Option<String>,
}

/// Index-based undirected view of a layout [`Graph`]. Self loops and duplicate edges are dropped.
pub(crate) struct Adjacency {
    pub(crate) ids: Vec<String>,
    pub(crate) neighbors: Vec<Vec<usize>>,
    pub(crate) edges: Vec<(usize, usize)>,
}

impl Adjacency {
    pub(crate) fn new(graph: &Graph) -> Self {
        let mut id_to_idx: FxHashMap<&str, usize> = FxHashMap::default();
        let mut ids: Vec<String> = Vec::with_capacity(graph.nodes.len());
        for n in &graph.nodes {
            if id_to_idx.contains_key(n.id.as_str()) {
                continue;
            }
            id_to_idx.insert(n.id.as_str(), ids.len());
            ids.push(n.id.clone());
        }

        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for e in &graph.edges {
            let (Some(&a), Some(&b)) = (
                id_to_idx.get(e.source.as_str()),
                id_to_idx.get(e.target.as_str()),
            ) else {
                continue;
            };
            if a == b || neighbors[a].contains(&b) {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
            edges.push((a.min(b), a.max(b)));
        }

        Self {
            ids,
            neighbors,
            edges,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    pub(crate) fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Hop distances from `source`; unreachable nodes are `None`.
    pub(crate) fn hops_from(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist: Vec<Option<usize>> = vec![None; self.len()];
        dist[source] = Some(0);
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(source);
        while let Some(v) = q.pop_front() {
            let d = dist[v].unwrap_or(0);
            for &w in &self.neighbors[v] {
                if dist[w].is_none() {
                    dist[w] = Some(d + 1);
                    q.push_back(w);
                }
            }
        }
        dist
    }

    pub(crate) fn into_result(self, coords: Vec<Point>) -> LayoutResult {
        LayoutResult {
            positions: self.ids.into_iter().zip(coords).collect(),
        }
    }
}

/// Centers `pos` on its mean and scales it so the largest absolute coordinate is `scale`.
pub(crate) fn rescale(pos: &mut [Point], scale: f64) {
    if pos.is_empty() {
        return;
    }
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / n;
    let mut lim = 0.0f64;
    for p in pos.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.x *= scale / lim;
            p.y *= scale / lim;
        }
    }
}

/// Unit-circle placement in node order, used as the Kamada-Kawai starting point.
pub(crate) fn circular(n: usize) -> Vec<Point> {
    if n == 1 {
        return vec![Point::ORIGIN];
    }
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(theta.cos(), theta.sin())
        })
        .collect()
}

pub(crate) fn random_positions(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = XorShift64Star::new(seed);
    (0..n)
        .map(|_| Point::new(rng.next_f64_unit(), rng.next_f64_unit()))
        .collect()
}

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}
