use std::collections::HashMap;

use crate::types::*;

use super::{GraphError, SparseGraph};

/// Per-node adjacency. Both vectors are parallel and sorted by neighbour.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    neighbours: Vec<NodeId>,
    weights: Vec<EdgeWeight>,
}

impl Adjacency {
    fn find(&self, target: NodeId) -> Option<usize> {
        self.neighbours.binary_search(&target).ok()
    }
}

/// Immutable sparse graph with sorted adjacency lists and dense edge ranks.
///
/// Ranks are assigned in ascending `(u, v)` order, starting at 1.
#[derive(Debug, Clone)]
pub struct StaticSparseGraph {
    nodes: Vec<Adjacency>,
    rank_weights: Vec<EdgeWeight>,
    rank_edges: Vec<Edge>,
    /// Rank of every materialized edge, keyed by [`Edge::id`].
    rank_index: HashMap<EdgeId, RankId>,
}

impl StaticSparseGraph {
    /// Edge holding `rank`, or [`INVALID_EDGE`] for the dummy or an unknown rank.
    pub fn edge_of(&self, rank: RankId) -> Edge {
        self.rank_edges
            .get(rank.index())
            .copied()
            .unwrap_or(INVALID_EDGE)
    }

    /// All materialized edges with their weights, in rank order.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, EdgeWeight)> + '_ {
        self.rank_edges
            .iter()
            .zip(self.rank_weights.iter())
            .skip(1)
            .map(|(&e, &w)| (e, w))
    }
}

impl SparseGraph for StaticSparseGraph {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_edges(&self) -> usize {
        self.rank_edges.len() - 1
    }

    fn non_zero_neighbours(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.index())
            .map(|a| a.neighbours.as_slice())
            .unwrap_or(&[])
    }

    fn weight(&self, edge: Edge) -> EdgeWeight {
        let Some(adj) = self.nodes.get(edge.u.index()) else {
            return ZERO;
        };
        adj.find(edge.v).map(|k| adj.weights[k]).unwrap_or(ZERO)
    }

    fn rank_weight(&self, rank: RankId) -> EdgeWeight {
        self.rank_weights.get(rank.index()).copied().unwrap_or(ZERO)
    }

    fn rank_of(&self, edge: Edge) -> RankId {
        // Pair ids are only unique for u < v.
        if edge.u >= edge.v {
            return RankId::DUMMY;
        }
        self.rank_index
            .get(&edge.id())
            .copied()
            .unwrap_or(RankId::DUMMY)
    }
}

/// Accumulates weighted edges and freezes them into a [`StaticSparseGraph`].
///
/// Zero-weight edges are accepted and dropped: they are indistinguishable
/// from absent edges.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    num_nodes: usize,
    edges: Vec<(Edge, EdgeWeight)>,
}

impl GraphBuilder {
    pub fn new(num_nodes: usize) -> Self {
        GraphBuilder {
            num_nodes,
            edges: Vec::new(),
        }
    }

    fn check_node(&self, node: u32) -> Result<(), GraphError> {
        if node as usize >= self.num_nodes {
            return Err(GraphError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }

    /// Add an undirected edge `u -- v` with weight `w`.
    pub fn add_edge(&mut self, u: u32, v: u32, w: EdgeWeight) -> Result<&mut Self, GraphError> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        let edge = Edge::from((u, v));
        if w.is_nan() {
            return Err(GraphError::NanWeight(edge));
        }
        if w != ZERO {
            self.edges.push((edge, w));
        }
        Ok(self)
    }

    /// Build a graph from `(u, v, weight)` triples.
    pub fn from_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (u32, u32, EdgeWeight)>,
    ) -> Result<StaticSparseGraph, GraphError> {
        let mut builder = GraphBuilder::new(num_nodes);
        for (u, v, w) in edges {
            builder.add_edge(u, v, w)?;
        }
        builder.build()
    }

    pub fn build(mut self) -> Result<StaticSparseGraph, GraphError> {
        self.edges.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = self.edges.windows(2).find(|p| p[0].0 == p[1].0) {
            return Err(GraphError::DuplicateEdge(pair[0].0));
        }

        let mut nodes = vec![Adjacency::default(); self.num_nodes];
        let mut rank_weights = Vec::with_capacity(self.edges.len() + 1);
        let mut rank_edges = Vec::with_capacity(self.edges.len() + 1);
        let mut rank_index = HashMap::with_capacity(self.edges.len());
        rank_weights.push(ZERO);
        rank_edges.push(INVALID_EDGE);

        for (edge, w) in self.edges {
            let rank = RankId(rank_edges.len() as u32);
            rank_weights.push(w);
            rank_edges.push(edge);
            rank_index.insert(edge.id(), rank);
            for (a, b) in [(edge.u, edge.v), (edge.v, edge.u)] {
                let adj = &mut nodes[a.index()];
                adj.neighbours.push(b);
                adj.weights.push(w);
            }
        }

        // Edges were pushed in (u, v) order, so each list is sorted except
        // that a node's smaller neighbours arrive interleaved with larger ones.
        for adj in &mut nodes {
            let mut order: Vec<usize> = (0..adj.neighbours.len()).collect();
            order.sort_by_key(|&k| adj.neighbours[k]);
            adj.neighbours = order.iter().map(|&k| adj.neighbours[k]).collect();
            adj.weights = order.iter().map(|&k| adj.weights[k]).collect();
        }

        Ok(StaticSparseGraph {
            nodes,
            rank_weights,
            rank_edges,
            rank_index,
        })
    }
}
