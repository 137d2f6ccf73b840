//! Construction statements.
//!
//! These types are the generator's output. They are pure data: no
//! rendering syntax lives here beyond a default `Display` for debugging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use crate::model::{NodeId, Relation};

/// Relation steps taken from a root variable.
pub type RelationPath = SmallVec<[Relation; 4]>;

/// A variable expression: a created node's variable, optionally followed by
/// relation steps (`id3.v1.v0` is "the digit of the next of node 3").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarExpr {
    pub root: NodeId,
    pub path: RelationPath,
}

impl VarExpr {
    /// The bare variable of a node.
    pub fn var(root: NodeId) -> Self {
        Self { root, path: SmallVec::new() }
    }

    /// This expression extended by one more relation step.
    pub fn then(&self, relation: Relation) -> Self {
        let mut path = self.path.clone();
        path.push(relation);
        Self { root: self.root, path }
    }

    pub fn is_var(&self) -> bool {
        self.path.is_empty()
    }

    /// Split off the last step: `(parent expression, slot)`.
    pub fn split_last(&self) -> Option<(VarExpr, Relation)> {
        let (&last, rest) = self.path.split_last()?;
        Some((VarExpr { root: self.root, path: rest.iter().copied().collect() }, last))
    }
}

impl std::fmt::Display for VarExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "id{}", self.root)?;
        for step in &self.path {
            write!(f, ".v{}", step.index())?;
        }
        Ok(())
    }
}

/// One construction step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statement {
    /// Create a fresh node and bind it to its variable.
    CreateNode(NodeId),
    /// Store the node denoted by `src` into the slot denoted by `dst`.
    Assign { dst: VarExpr, src: VarExpr },
}

impl Statement {
    /// Variables this statement reads or writes through (none for creation).
    pub fn referenced_vars(&self) -> impl Iterator<Item = NodeId> {
        let refs = match self {
            Self::CreateNode(_) => None,
            Self::Assign { dst, src } => Some([dst.root, src.root]),
        };
        refs.into_iter().flatten()
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateNode(id) => write!(f, "id{id}={{}};"),
            Self::Assign { dst, src } => write!(f, "{dst}={src};"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_display() {
        let expr = VarExpr::var(NodeId(3)).then(Relation::Next).then(Relation::Digit);
        assert_eq!(expr.to_string(), "id3.v1.v0");
        assert!(!expr.is_var());
    }

    #[test]
    fn test_split_last() {
        let expr = VarExpr::var(NodeId(0)).then(Relation::Next).then(Relation::Digit);
        let (parent, slot) = expr.split_last().unwrap();
        assert_eq!(parent, VarExpr::var(NodeId(0)).then(Relation::Next));
        assert_eq!(slot, Relation::Digit);
        assert!(VarExpr::var(NodeId(0)).split_last().is_none());
    }

    #[test]
    fn test_statement_display() {
        let create = Statement::CreateNode(NodeId(4));
        let assign = Statement::Assign {
            dst: VarExpr::var(NodeId(0)).then(Relation::Next),
            src: VarExpr::var(NodeId(4)),
        };
        assert_eq!(create.to_string(), "id4={};");
        assert_eq!(assign.to_string(), "id0.v1=id4;");
        assert_eq!(assign.referenced_vars().collect::<Vec<_>>(), vec![NodeId(0), NodeId(4)]);
    }
}
