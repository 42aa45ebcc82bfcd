// Phonotactic tree: the weighted graph that word generation walks.
//
// Despite the name the graph is cyclic: syllable-boundary edges loop from the
// end of one syllable back to the onset and nucleus roots, so a finite set of
// nodes produces words of any length. Every node holds one `Phoneme`; two
// sentinel nodes hold the word-start and word-end boundaries.
//
// Storage is a pair of `Vec` arenas indexed by `NodeId`/`EdgeId`, with each
// node keeping its outgoing edge ids in insertion order. Iteration order is
// therefore deterministic, and the graph has no ownership cycles.
//
// See also: `builder.rs` for construction from hierarchies, `rules.rs` for
// reweighting, `generator.rs` for sampling.
//
// Edge weights are the only state that changes after construction, and only
// through `&mut PhonotacticTree` (the rule engine). Generators borrow the tree
// immutably, so the borrow checker keeps mutation and sampling apart.

use phonotaxis_phonology::Phoneme;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}

/// Which part of the syllable an edge leaves from, or which boundary it
/// crosses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhonotacticContext {
    /// Within the onset, or from the onset into the nucleus.
    Onset,
    /// Within the nucleus, or from the nucleus into the coda.
    Nucleus,
    /// Within the coda.
    Coda,
    /// From the word-start sentinel.
    WordStart,
    /// Into the word-end sentinel.
    WordEnd,
    /// Into the first phoneme of the next syllable.
    SyllableBoundary,
}

impl PhonotacticContext {
    pub const ALL: [PhonotacticContext; 6] = [
        PhonotacticContext::Onset,
        PhonotacticContext::Nucleus,
        PhonotacticContext::Coda,
        PhonotacticContext::WordStart,
        PhonotacticContext::WordEnd,
        PhonotacticContext::SyllableBoundary,
    ];

    /// True for the contexts that close a syllable.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PhonotacticContext::WordEnd | PhonotacticContext::SyllableBoundary
        )
    }
}

/// A node in the phonotactic tree: one occurrence of a phoneme.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub phoneme: Phoneme,
    /// Outgoing edges, in the order they were added.
    pub edges: Vec<EdgeId>,
}

/// A directed, weighted edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub context: PhonotacticContext,
    /// Relative sampling weight, never negative. Zero makes the edge
    /// unreachable.
    pub weight: f64,
}

/// Weight of every freshly added edge.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhonotacticTree {
    nodes: Vec<TreeNode>,
    edges: Vec<TreeEdge>,
    start: NodeId,
    end: NodeId,
}

impl Default for PhonotacticTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PhonotacticTree {
    /// A tree holding only the two sentinels, unconnected.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            start: NodeId(0),
            end: NodeId(1),
        };
        tree.start = tree.add_node(Phoneme::WORD_START);
        tree.end = tree.add_node(Phoneme::WORD_END);
        tree
    }

    /// Add a node. Returns its ID.
    pub fn add_node(&mut self, phoneme: Phoneme) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            id,
            phoneme,
            edges: Vec::new(),
        });
        id
    }

    /// Add a directed edge with the default weight. Returns its ID.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, context: PhonotacticContext) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(TreeEdge {
            id,
            from,
            to,
            context,
            weight: DEFAULT_WEIGHT,
        });
        self.nodes[from.0 as usize].edges.push(id);
        id
    }

    /// The word-start sentinel, root of every walk.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The word-end sentinel.
    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    pub fn edge(&self, id: EdgeId) -> &TreeEdge {
        &self.edges[id.0 as usize]
    }

    /// Set an edge's weight. Negative weights are clamped to zero.
    pub fn set_weight(&mut self, id: EdgeId, weight: f64) {
        self.edges[id.0 as usize].weight = weight.max(0.0);
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = &TreeEdge> + '_ {
        self.node(node).edges.iter().map(|&id| self.edge(id))
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
