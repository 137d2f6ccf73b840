//! Node in the radix graph.

use serde::{Deserialize, Serialize};

/// Opaque node identifier. Doubles as the node's position in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The designated start node every traversal is anchored at.
    pub const ORIGIN: NodeId = NodeId(0);

    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two outgoing relations every node carries, indexed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Back-pointer whose distance to the node encodes one digit.
    Digit,
    /// Successor on the ring.
    Next,
}

impl Relation {
    /// Both relations in slot order.
    pub const ALL: [Relation; 2] = [Relation::Digit, Relation::Next];

    /// Slot index of the relation (`DIGIT` = 0, `NEXT` = 1).
    pub fn index(self) -> usize {
        match self {
            Self::Digit => 0,
            Self::Next => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Digit),
            1 => Some(Self::Next),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Digit => "digit",
            Self::Next => "next",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the radix graph: an id and its two relation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub digit: NodeId,
    pub next: NodeId,
}

impl Node {
    /// A node whose relations both point at itself.
    pub fn new(id: NodeId) -> Self {
        Self { id, digit: id, next: id }
    }

    pub fn with_digit(mut self, target: NodeId) -> Self {
        self.digit = target;
        self
    }

    pub fn with_next(mut self, target: NodeId) -> Self {
        self.next = target;
        self
    }

    /// Target of the given relation.
    pub fn target(&self, relation: Relation) -> NodeId {
        match relation {
            Relation::Digit => self.digit,
            Relation::Next => self.next,
        }
    }

    /// `(relation, target)` pairs in slot order.
    pub fn relations(&self) -> impl Iterator<Item = (Relation, NodeId)> + '_ {
        Relation::ALL.into_iter().map(move |r| (r, self.target(r)))
    }

    /// Padding nodes point their digit relation at themselves.
    pub fn is_padding(&self) -> bool {
        self.digit == self.id
    }
}
