use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Edge weight. In the review domain this is a 1–5 star rating.
pub type Weight = u32;

/// A single attribute value carried by a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    List(Vec<String>),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::List(v)
    }
}

/// Opaque vertex metadata (title, group, categories for products).
pub type Attributes = HashMap<String, AttrValue>;

/// Per-vertex record: optional metadata plus the adjacency mapping.
#[derive(Debug, Clone, Default)]
struct VertexRecord {
    attributes: Option<Attributes>,
    neighbors: HashMap<String, Weight>,
}

/// In-memory graph keyed by string vertex ids.
///
/// Edges are directed and live in the source vertex's adjacency map. The store
/// has no notion of undirected edges: callers model an undirected relation by
/// inserting both `(u, v)` and `(v, u)`.
///
/// Neighbor and vertex enumeration order is whatever the backing `HashMap`
/// yields. Nothing built on top of the store may depend on it for correctness;
/// tie-breaking between equally good answers is unspecified.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: HashMap<String, VertexRecord>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertex_count),
        }
    }

    /// Register a vertex. Re-adding an existing key is a no-op: the original
    /// attributes are kept.
    pub fn add_vertex(&mut self, key: &str, attributes: Option<Attributes>) {
        if self.vertices.contains_key(key) {
            return;
        }
        self.vertices.insert(
            key.to_string(),
            VertexRecord {
                attributes,
                neighbors: HashMap::new(),
            },
        );
    }

    pub fn vertex_exists(&self, key: &str) -> bool {
        self.vertices.contains_key(key)
    }

    /// Add (or overwrite) the directed edge `from -> to`.
    ///
    /// Only `from` has to exist. `to` may be registered later, but must exist
    /// by the time anything traverses the edge.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Weight) -> Result<()> {
        let record = self
            .vertices
            .get_mut(from)
            .ok_or_else(|| GraphError::invalid_reference(from))?;
        record.neighbors.insert(to.to_string(), weight);
        Ok(())
    }

    /// Neighbor keys of `key`, in unspecified order.
    pub fn neighbors<'g>(&'g self, key: &str) -> Result<impl Iterator<Item = &'g str> + 'g> {
        let record = self.record(key)?;
        Ok(record.neighbors.keys().map(String::as_str))
    }

    /// Weight of the directed edge `from -> to`.
    pub fn weight(&self, from: &str, to: &str) -> Result<Weight> {
        self.record(from)?
            .neighbors
            .get(to)
            .copied()
            .ok_or_else(|| GraphError::invalid_reference(format!("{from}->{to}")))
    }

    /// Neighbor keys paired with edge weights.
    pub fn weighted_neighbors<'g>(
        &'g self,
        key: &str,
    ) -> Result<impl Iterator<Item = (&'g str, Weight)> + 'g> {
        let record = self.record(key)?;
        Ok(record.neighbors.iter().map(|(k, &w)| (k.as_str(), w)))
    }

    /// All vertex keys, in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Look up a vertex key, returning the store's own borrow of it.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.vertices.get_key_value(key).map(|(k, _)| k.as_str())
    }

    pub fn attributes(&self, key: &str) -> Option<&Attributes> {
        self.vertices.get(key).and_then(|r| r.attributes.as_ref())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges (an undirected relation counts twice).
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|r| r.neighbors.len()).sum()
    }

    /// Edges whose target was never registered as a vertex.
    pub fn dangling_edges(&self) -> Vec<(&str, &str)> {
        let vertices = &self.vertices;
        vertices
            .iter()
            .flat_map(move |(from, r)| {
                r.neighbors
                    .keys()
                    .filter(move |to| !vertices.contains_key(to.as_str()))
                    .map(move |to| (from.as_str(), to.as_str()))
            })
            .collect()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let per_entry = size_of::<String>() + 16;
        let vertex_mem: usize = self
            .vertices
            .iter()
            .map(|(k, r)| {
                k.capacity()
                    + per_entry
                    + size_of::<VertexRecord>()
                    + r.attributes.as_ref().map_or(0, |a| a.len() * 64)
            })
            .sum();
        let edge_mem: usize = self
            .vertices
            .values()
            .flat_map(|r| r.neighbors.keys())
            .map(|k| k.capacity() + per_entry + size_of::<Weight>())
            .sum();

        vertex_mem + edge_mem
    }

    fn record(&self, key: &str) -> Result<&VertexRecord> {
        self.vertices
            .get(key)
            .ok_or_else(|| GraphError::invalid_reference(key))
    }
}
