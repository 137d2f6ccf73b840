//! Arena-backed radix graph container.

use serde::{Deserialize, Serialize};
use super::{Node, NodeId, Relation};
use crate::{Error, Result};

/// An immutable radix graph.
///
/// Nodes live in a contiguous arena indexed by their id; relations are ids
/// into the same arena. Construction goes through the encoder or through
/// [`RadixGraph::from_nodes`], both of which hand out fully wired graphs only.
/// Deserialization goes through `from_nodes` as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRadixGraph")]
pub struct RadixGraph {
    nodes: Vec<Node>,
    radix: u64,
}

/// Unchecked wire form of [`RadixGraph`].
#[derive(Deserialize)]
struct RawRadixGraph {
    nodes: Vec<Node>,
    radix: u64,
}

impl TryFrom<RawRadixGraph> for RadixGraph {
    type Error = Error;

    fn try_from(raw: RawRadixGraph) -> Result<Self> {
        Self::from_nodes(raw.nodes, raw.radix)
    }
}

impl RadixGraph {
    /// Crate-internal constructor for graphs whose invariants hold by construction.
    pub(crate) fn from_parts(nodes: Vec<Node>, radix: u64) -> Self {
        debug_assert!(Self::check(&nodes, radix).is_ok());
        Self { nodes, radix }
    }

    /// Build a graph from externally supplied nodes, checking structure first.
    pub fn from_nodes(nodes: Vec<Node>, radix: u64) -> Result<Self> {
        Self::check(&nodes, radix)?;
        Ok(Self { nodes, radix })
    }

    /// Parse a graph from JSON, reporting structural defects as
    /// [`Error::MalformedGraph`] rather than as JSON errors.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRadixGraph = serde_json::from_str(json)?;
        raw.try_into()
    }

    pub fn radix(&self) -> u64 {
        self.radix
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Follow one relation from `id`.
    pub fn follow(&self, id: NodeId, relation: Relation) -> NodeId {
        self.nodes[id.index()].target(relation)
    }

    /// Nodes in ring order, starting at the origin node.
    pub fn ring(&self) -> Ring<'_> {
        Ring { graph: self, current: NodeId::ORIGIN, remaining: self.nodes.len() }
    }

    /// Number of edges (always two per node).
    pub fn edge_count(&self) -> usize {
        self.nodes.len() * Relation::ALL.len()
    }

    /// Re-check the structural invariants.
    pub fn validate(&self) -> Result<()> {
        Self::check(&self.nodes, self.radix)
    }

    fn check(nodes: &[Node], radix: u64) -> Result<()> {
        if radix < 2 {
            return Err(Error::InvalidRadix { radix });
        }
        if nodes.is_empty() {
            return Err(Error::MalformedGraph("graph has no nodes".into()));
        }
        let count = nodes.len();
        for (pos, node) in nodes.iter().enumerate() {
            if node.id.index() != pos {
                return Err(Error::MalformedGraph(format!(
                    "node at position {pos} carries id {}", node.id
                )));
            }
            for (relation, target) in node.relations() {
                if target.index() >= count {
                    return Err(Error::MalformedGraph(format!(
                        "node {} {relation} points at missing node {target}", node.id
                    )));
                }
            }
        }

        // NEXT must be a single cycle through every node
        let mut seen = vec![false; count];
        let mut current = NodeId::ORIGIN;
        for _ in 0..count {
            if seen[current.index()] {
                return Err(Error::MalformedGraph(format!(
                    "next ring revisits node {current} before covering all {count} nodes"
                )));
            }
            seen[current.index()] = true;
            current = nodes[current.index()].next;
        }
        if current != NodeId::ORIGIN {
            return Err(Error::MalformedGraph("next ring does not close at node 0".into()));
        }
        Ok(())
    }
}

/// Iterator over the ring, see [`RadixGraph::ring`].
pub struct Ring<'g> {
    graph: &'g RadixGraph,
    current: NodeId,
    remaining: usize,
}

impl<'g> Iterator for Ring<'g> {
    type Item = &'g Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = &self.graph.nodes[self.current.index()];
        self.current = node.next;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ring<'_> {}
