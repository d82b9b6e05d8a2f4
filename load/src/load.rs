use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use review_graph_core::{AttrValue, Attributes, Graph};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LoadConfig;
use crate::error::{LoadError, Result};

/// Product identifier as it appears in the dataset: numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl ProductId {
    pub fn key(&self) -> String {
        match self {
            ProductId::Number(n) => n.to_string(),
            ProductId::Text(s) => s.clone(),
        }
    }
}

/// One product line of the dataset, with the reviewers that rated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// `(reviewer key, rating)` pairs.
    #[serde(default)]
    pub reviewers: Vec<(String, u32)>,
}

impl ProductRecord {
    fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(title) = &self.title {
            attrs.insert("title".into(), AttrValue::Text(title.clone()));
        }
        if let Some(group) = &self.group {
            attrs.insert("group".into(), AttrValue::Text(group.clone()));
        }
        if !self.categories.is_empty() {
            attrs.insert("categories".into(), AttrValue::List(self.categories.clone()));
        }
        attrs
    }
}

/// Counters collected while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    pub products: usize,
    pub reviewers: usize,
    /// Directed edges; each rating contributes two.
    pub edges: usize,
    pub skipped_ratings: usize,
    /// Keys that contradict the reviewer-key convention: products that look
    /// like reviewers, or reviewers that do not.
    pub convention_mismatches: usize,
    /// Keys used both as a product and as a reviewer. The vertex keeps the
    /// role it was first registered with.
    pub key_collisions: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
}

/// A populated graph plus what it took to build it.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub stats: LoadStats,
}

/// Incremental graph construction from product records.
///
/// Each `(reviewer, rating)` pair becomes two directed edges of the same
/// weight, which is how the undirected reviewer–product relation is stored.
pub struct GraphBuilder {
    graph: Graph,
    config: LoadConfig,
    stats: LoadStats,
    started: Instant,
}

impl GraphBuilder {
    pub fn new(config: LoadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph: Graph::new(),
            config,
            stats: LoadStats::default(),
            started: Instant::now(),
        })
    }

    /// Add one product with its ratings.
    ///
    /// Every rating is checked before the graph is touched, so a record that
    /// fails leaves the builder exactly as it was.
    pub fn add_record(&mut self, record: &ProductRecord) -> Result<()> {
        let product = record.id.key();

        let mut accepted = Vec::with_capacity(record.reviewers.len());
        let mut skipped = 0;
        for (reviewer, rating) in &record.reviewers {
            let rating = *rating;
            if self.config.accepts_rating(rating) {
                accepted.push((reviewer.as_str(), rating));
                continue;
            }
            if !self.config.skip_invalid {
                return Err(LoadError::InvalidRating {
                    product,
                    reviewer: reviewer.clone(),
                    rating,
                    min: self.config.min_rating,
                    max: self.config.max_rating,
                });
            }
            warn!(product = %product, reviewer = %reviewer, rating, "skipping out-of-range rating");
            skipped += 1;
        }
        self.stats.skipped_ratings += skipped;

        if self.config.is_reviewer(&product) {
            self.stats.convention_mismatches += 1;
        }

        // Reviewers are the only vertices registered without attributes.
        let registered_as_reviewer =
            self.graph.vertex_exists(&product) && self.graph.attributes(&product).is_none();
        if registered_as_reviewer {
            warn!(product = %product, "product key already used by a reviewer; attributes dropped");
            self.stats.key_collisions += 1;
        } else if !self.graph.vertex_exists(&product) {
            self.stats.products += 1;
        }
        self.graph.add_vertex(&product, Some(record.attributes()));

        for (reviewer, rating) in accepted {
            if !self.graph.vertex_exists(reviewer) {
                if !self.config.is_reviewer(reviewer) {
                    self.stats.convention_mismatches += 1;
                }
                self.graph.add_vertex(reviewer, None);
                self.stats.reviewers += 1;
            } else if reviewer != product && self.graph.attributes(reviewer).is_some() {
                warn!(product = %product, reviewer = %reviewer, "reviewer key already used by a product");
                self.stats.key_collisions += 1;
            }
            self.graph.add_edge(reviewer, &product, rating)?;
            self.graph.add_edge(&product, reviewer, rating)?;
        }

        Ok(())
    }

    /// Check the finished graph and hand it over.
    pub fn finish(mut self) -> Result<LoadedGraph> {
        let dangling = self.graph.dangling_edges().len();
        if dangling > 0 {
            return Err(LoadError::DanglingEdges { count: dangling });
        }

        let memory_bytes = self.graph.memory_usage();
        if let Some(max_mb) = self.config.max_memory_mb {
            let used_mb = memory_bytes / (1024 * 1024);
            if used_mb > max_mb {
                return Err(LoadError::MemoryLimit { used_mb, max_mb });
            }
        }

        if self.stats.convention_mismatches > 0 {
            warn!(
                count = self.stats.convention_mismatches,
                prefix = %self.config.reviewer_prefix,
                "keys do not follow the reviewer-key convention; product filtering may be wrong"
            );
        }

        self.stats.edges = self.graph.edge_count();
        self.stats.memory_bytes = memory_bytes;
        self.stats.load_time_ms = self.started.elapsed().as_secs_f64() * 1000.0;

        info!(
            products = self.stats.products,
            reviewers = self.stats.reviewers,
            edges = self.stats.edges,
            skipped = self.stats.skipped_ratings,
            load_time_ms = self.stats.load_time_ms,
            "graph loaded"
        );

        Ok(LoadedGraph {
            graph: self.graph,
            stats: self.stats,
        })
    }
}

/// Build a graph from a JSON-lines stream of product records.
///
/// Blank lines are ignored. A malformed line fails the whole load and reports
/// its 1-based line number.
pub fn load_products<R: BufRead>(reader: R, config: &LoadConfig) -> Result<LoadedGraph> {
    let mut builder = GraphBuilder::new(config.clone())?;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: ProductRecord = serde_json::from_str(trimmed)
            .map_err(|source| LoadError::Json { line: idx + 1, source })?;
        builder.add_record(&record)?;
    }

    builder.finish()
}

/// [`load_products`] from a file on disk.
pub fn load_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<LoadedGraph> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening dataset");
    let file = File::open(path)?;
    load_products(BufReader::new(file), config)
}
