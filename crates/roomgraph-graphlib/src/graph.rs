//! The core `Graph` container.
//!
//! Nodes are identified by strings (page slugs or display names). Edges are simple: at most one
//! edge per ordered pair for directed graphs and per unordered pair for undirected graphs.

use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::hash::{Hash, Hasher};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
struct AdjCache {
    generation: u64,
    out: Vec<Vec<usize>>,
    in_: Vec<Vec<usize>>,
}

#[derive(Clone, Copy, Hash)]
struct EdgeKeyView<'a> {
    v: &'a str,
    w: &'a str,
}

impl<'a> hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'a> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GraphOptions {
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self { directed: true }
    }
}

impl GraphOptions {
    pub fn directed() -> Self {
        Self { directed: true }
    }

    pub fn undirected() -> Self {
        Self { directed: false }
    }
}

/// An edge endpoint pair. For undirected graphs the pair is stored with `v <= w`.
#[derive(Debug, Clone)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

// Must hash exactly like `EdgeKeyView` so view lookups hit stored keys.
impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.as_str().hash(state);
        self.w.as_str().hash(state);
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

pub struct Graph<N, E>
where
    N: Default + 'static,
    E: Default + 'static,
{
    options: GraphOptions,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Neighbor queries dominate the post-processing and coloring passes; rebuilding adjacency
    // lazily keeps them O(degree) without making every query take `&mut self`.
    adj_gen: u64,
    adj_cache: RefCell<Option<AdjCache>>,
}

impl<N, E> Clone for Graph<N, E>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            nodes: self.nodes.clone(),
            node_index: self.node_index.clone(),
            edges: self.edges.clone(),
            edge_index: self.edge_index.clone(),
            adj_gen: 0,
            adj_cache: RefCell::new(None),
        }
    }
}

impl<N, E> std::fmt::Debug for Graph<N, E>
where
    N: Default + 'static,
    E: Default + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &self.options.directed)
            .field("nodes", &self.node_ids())
            .field("edges", &self.edge_keys())
            .finish()
    }
}

impl<N, E> Default for Graph<N, E>
where
    N: Default + 'static,
    E: Default + 'static,
{
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E> Graph<N, E>
where
    N: Default + 'static,
    E: Default + 'static,
{
    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
        *self.adj_cache.get_mut() = None;
    }

    fn ensure_adj(&self) -> std::cell::Ref<'_, AdjCache> {
        let generation = self.adj_gen;
        let stale = self
            .adj_cache
            .borrow()
            .as_ref()
            .is_none_or(|c| c.generation != generation);
        if stale {
            let mut out: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
            let mut in_: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
            for (edge_idx, e) in self.edges.iter().enumerate() {
                let Some(&v_idx) = self.node_index.get(&e.key.v) else {
                    continue;
                };
                let Some(&w_idx) = self.node_index.get(&e.key.w) else {
                    continue;
                };
                out[v_idx].push(edge_idx);
                in_[w_idx].push(edge_idx);
            }
            *self.adj_cache.borrow_mut() = Some(AdjCache {
                generation,
                out,
                in_,
            });
        }
        std::cell::Ref::map(self.adj_cache.borrow(), |c| {
            c.as_ref()
                .expect("adjacency cache should be present after rebuild")
        })
    }

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str) -> EdgeKeyView<'a> {
        if self.options.directed || v <= w {
            EdgeKeyView { v, w }
        } else {
            EdgeKeyView { v: w, w: v }
        }
    }

    fn canonicalize_endpoints(&self, v: String, w: String) -> (String, String) {
        if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        }
    }

    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adj_gen: 0,
            adj_cache: RefCell::new(None),
        }
    }

    pub fn new_directed() -> Self {
        Self::new(GraphOptions::directed())
    }

    pub fn new_undirected() -> Self {
        Self::new(GraphOptions::undirected())
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        self.invalidate_adj();
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge keys in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in &self.edges {
            f(&e.key, &e.label);
        }
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    /// Adds an edge, creating missing endpoints. Re-adding an existing edge is a no-op.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), Some(label))
    }

    fn set_edge_inner(&mut self, v: String, w: String, label: Option<E>) -> &mut Self {
        let (v, w) = self.canonicalize_endpoints(v, w);
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let key = EdgeKey { v, w };
        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.invalidate_adj();
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label: label.unwrap_or_default(),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        let view = self.edge_key_view(v, w);
        self.edge_index.contains_key(&view)
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        let view = self.edge_key_view(v, w);
        let idx = *self.edge_index.get(&view)?;
        Some(&self.edges[idx].label)
    }

    fn remove_edge_at_index(&mut self, idx: usize) {
        self.invalidate_adj();
        let _ = self.edge_index.remove_entry(&self.edges[idx].key);
        self.edges.remove(idx);
        for i in idx..self.edges.len() {
            let k = &self.edges[i].key;
            if let Some(v) = self.edge_index.get_mut(k) {
                *v = i;
            }
        }
    }

    /// Removes the edge `v -> w`. Returns `false` (and leaves the graph untouched) when the
    /// edge does not exist.
    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        let view = self.edge_key_view(v, w);
        let Some(&idx) = self.edge_index.get(&view) else {
            return false;
        };
        self.remove_edge_at_index(idx);
        true
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };

        self.invalidate_adj();
        self.nodes.remove(idx);
        for i in idx..self.nodes.len() {
            let node_id = self.nodes[i].id.as_str();
            if let Some(v) = self.node_index.get_mut(node_id) {
                *v = i;
            }
        }

        // Remove incident edges.
        let before = self.edges.len();
        self.edges.retain(|e| e.key.v != id && e.key.w != id);
        if self.edges.len() != before {
            self.edge_index.clear();
            for (i, e) in self.edges.iter().enumerate() {
                self.edge_index.insert(e.key.clone(), i);
            }
        }

        true
    }

    pub fn remove_nodes<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in ids {
            self.remove_node(id);
        }
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        cache.out[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        cache.in_[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.v.as_str())
            .collect()
    }

    /// Adjacent nodes ignoring direction, deduplicated, in edge insertion order.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let mut out: Vec<&str> = Vec::new();
        for &edge_idx in &cache.out[v_idx] {
            let w = self.edges[edge_idx].key.w.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        for &edge_idx in &cache.in_[v_idx] {
            let u = self.edges[edge_idx].key.v.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Number of incident edge endpoints; a self-loop counts twice.
    pub fn degree(&self, v: &str) -> usize {
        let Some(&v_idx) = self.node_index.get(v) else {
            return 0;
        };
        let cache = self.ensure_adj();
        cache.out[v_idx].len() + cache.in_[v_idx].len()
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let mut out: Vec<EdgeKey> = cache.out[v_idx]
            .iter()
            .map(|&i| self.edges[i].key.clone())
            .collect();
        if !self.options.directed {
            out.extend(
                cache.in_[v_idx]
                    .iter()
                    .filter(|&&i| self.edges[i].key.v != self.edges[i].key.w)
                    .map(|&i| self.edges[i].key.clone()),
            );
        }
        out
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        if !self.options.directed {
            return self.out_edges(v);
        }
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        cache.in_[v_idx]
            .iter()
            .map(|&i| self.edges[i].key.clone())
            .collect()
    }
}
