//! Randomized construction-script generator.
//!
//! Walks the nodes in a seeded order and emits `CreateNode` / `Assign`
//! statements that rebuild the graph from an empty environment.
//!
//! ## Algorithm
//!
//! 1. Emit node 0 first, then the remaining ids in shuffled order
//! 2. On creation, a node's alias is its own bare variable
//! 3. Each relation whose target already has an alias is assigned at once;
//!    otherwise it is parked in `pending`
//! 4. After every node, sweep `pending` and emit every entry whose target
//!    now has an alias. A resolved target that was only known by its bare
//!    variable and is now reachable from node 0 is re-aliased to that path
//! 5. Anything still pending at the end is an internal invariant violation

use hashbrown::HashSet;
use rand::Rng;
use crate::model::{NodeId, RadixGraph, Relation};
use super::ast::{Statement, VarExpr};
use super::permute::{emission_order, seeded_rng};
use crate::{Error, Result};

/// A relation assignment waiting for its target to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAssignment {
    /// Node that will be stored (the relation target).
    pub src: NodeId,
    /// Node whose slot receives it.
    pub dst: NodeId,
    pub relation: Relation,
}

/// Generate a construction script for `graph`, shuffling with ChaCha20 seeded from `seed`.
pub fn generate(graph: &RadixGraph, seed: u64) -> Result<Vec<Statement>> {
    let mut rng = seeded_rng(seed);
    generate_with_rng(graph, &mut rng)
}

/// Generate a construction script using an injected PRNG for the emission order.
pub fn generate_with_rng<R: Rng>(graph: &RadixGraph, rng: &mut R) -> Result<Vec<Statement>> {
    let order = emission_order(graph.node_count(), rng);
    let mut emitter = Emitter::new(graph);
    for id in order {
        emitter.emit_node(id);
    }
    emitter.finish()
}

/// Working state for one generation run.
struct Emitter<'g> {
    graph: &'g RadixGraph,
    /// Current expression per node id; `None` until the node is created.
    aliases: Vec<Option<VarExpr>>,
    pending: Vec<PendingAssignment>,
    statements: Vec<Statement>,
    deferred: usize,
    compacted: usize,
}

impl<'g> Emitter<'g> {
    fn new(graph: &'g RadixGraph) -> Self {
        let count = graph.node_count();
        Self {
            graph,
            aliases: vec![None; count],
            pending: Vec::new(),
            statements: Vec::with_capacity(count * 3),
            deferred: 0,
            compacted: 0,
        }
    }

    fn alias(&self, id: NodeId) -> Option<&VarExpr> {
        self.aliases[id.index()].as_ref()
    }

    fn emit_node(&mut self, id: NodeId) {
        self.statements.push(Statement::CreateNode(id));
        self.aliases[id.index()] = Some(VarExpr::var(id));

        let node = self.graph.nodes()[id.index()];
        for (relation, target) in node.relations() {
            match self.alias(target).cloned() {
                Some(src) => {
                    let dst = VarExpr::var(id).then(relation);
                    self.statements.push(Statement::Assign { dst, src });
                }
                None => {
                    tracing::trace!(node = %id, %relation, target = %target, "deferring assignment");
                    self.deferred += 1;
                    self.pending.push(PendingAssignment { src: target, dst: id, relation });
                }
            }
        }

        self.sweep();
    }

    /// Emit every pending assignment that has become resolvable.
    ///
    /// A single pass is enough: only the node just created can have gained
    /// an alias, and compaction rewrites existing aliases without creating
    /// new ones.
    fn sweep(&mut self) {
        let mut pending = std::mem::take(&mut self.pending);
        pending.retain(|entry| !self.resolve(*entry));
        self.pending = pending;
    }

    /// Emit `entry` if both ends have aliases. Returns whether it was emitted.
    fn resolve(&mut self, entry: PendingAssignment) -> bool {
        let (Some(src), Some(base)) = (self.alias(entry.src), self.alias(entry.dst)) else {
            return false;
        };
        let src = src.clone();
        let dst = base.then(entry.relation);
        tracing::trace!(%dst, %src, "resolved deferred assignment");

        if dst.root == NodeId::ORIGIN && src.is_var() {
            self.aliases[entry.src.index()] = Some(dst.clone());
            self.compacted += 1;
        }
        self.statements.push(Statement::Assign { dst, src });
        true
    }

    fn finish(self) -> Result<Vec<Statement>> {
        if !self.pending.is_empty() {
            tracing::error!(
                unresolved = self.pending.len(),
                first = ?self.pending.first(),
                "construction script left assignments unresolved"
            );
            return Err(Error::UnresolvedAssignments { count: self.pending.len() });
        }
        tracing::debug!(
            nodes = self.graph.node_count(),
            statements = self.statements.len(),
            deferred = self.deferred,
            compacted = self.compacted,
            "generated construction script"
        );
        Ok(self.statements)
    }
}

/// Check that every variable an `Assign` touches was created by an earlier statement.
pub fn check_order(statements: &[Statement]) -> Result<()> {
    let mut created: HashSet<NodeId> = HashSet::new();
    for (pos, stmt) in statements.iter().enumerate() {
        if let Statement::CreateNode(id) = stmt {
            if !created.insert(*id) {
                return Err(Error::DuplicateVariable(format!("id{id} at statement {pos}")));
            }
            continue;
        }
        for var in stmt.referenced_vars() {
            if !created.contains(&var) {
                return Err(Error::UnboundVariable(format!("id{var} at statement {pos}")));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    fn assign_count(stmts: &[Statement]) -> usize {
        stmts.iter().filter(|s| matches!(s, Statement::Assign { .. })).count()
    }

    #[test]
    fn test_one_create_and_two_assigns_per_node() {
        let graph = encode(912918, 3).unwrap();
        let stmts = generate(&graph, 8).unwrap();
        let creates = stmts.len() - assign_count(&stmts);
        assert_eq!(creates, graph.node_count());
        assert_eq!(assign_count(&stmts), graph.edge_count());
    }

    #[test]
    fn test_origin_created_first() {
        let graph = encode(270175, 7).unwrap();
        for seed in 0..16 {
            let stmts = generate(&graph, seed).unwrap();
            assert_eq!(stmts[0], Statement::CreateNode(NodeId::ORIGIN));
        }
    }

    #[test]
    fn test_no_forward_references() {
        let graph = encode(2818170175, 7).unwrap();
        for seed in 0..64 {
            check_order(&generate(&graph, seed).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let graph = encode(912918, 3).unwrap();
        assert_eq!(generate(&graph, 8).unwrap(), generate(&graph, 8).unwrap());
    }

    #[test]
    fn test_compacted_aliases_are_rooted_at_origin() {
        let graph = encode(912918, 3).unwrap();
        let stmts = generate(&graph, 8).unwrap();
        for stmt in &stmts {
            if let Statement::Assign { src, .. } = stmt {
                assert!(src.is_var() || src.root == NodeId::ORIGIN, "unexpected source {src}");
            }
        }
    }

    #[test]
    fn test_identity_order_with_self_digits() {
        // all-padding graph: every digit relation is a self loop
        let graph = encode(0, 4).unwrap();
        let mut emitter = Emitter::new(&graph);
        for id in (0..4).map(NodeId) {
            emitter.emit_node(id);
        }
        let stmts = emitter.finish().unwrap();
        let text: Vec<String> = stmts.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "id0={};", "id0.v0=id0;",
                "id1={};", "id1.v0=id1;", "id0.v1=id1;",
                "id2={};", "id2.v0=id2;", "id0.v1.v1=id2;",
                "id3={};", "id3.v0=id3;", "id3.v1=id0;", "id0.v1.v1.v1=id3;",
            ]
        );
    }

    #[test]
    fn test_unresolved_is_reported() {
        let graph = encode(5, 3).unwrap();
        let mut emitter = Emitter::new(&graph);
        // node 2 is never emitted, so node 1's next relation stays pending
        emitter.emit_node(NodeId(0));
        emitter.emit_node(NodeId(1));
        let err = emitter.finish().unwrap_err();
        assert!(matches!(err, Error::UnresolvedAssignments { count } if count > 0), "got {err:?}");
    }

    #[test]
    fn test_check_order_rejects_forward_reference() {
        let stmts = vec![
            Statement::CreateNode(NodeId(0)),
            Statement::Assign {
                dst: VarExpr::var(NodeId(0)).then(Relation::Next),
                src: VarExpr::var(NodeId(1)),
            },
            Statement::CreateNode(NodeId(1)),
        ];
        assert!(matches!(check_order(&stmts), Err(Error::UnboundVariable(_))));
    }
}
