//! Script execution.
//!
//! A small reference interpreter for construction scripts. It knows nothing
//! about radix graphs: objects are anonymous two-slot records, variables are
//! bound on creation, and assignments store object references into slots.
//! Any structure it builds is read back by walking slots, never by looking
//! at the generator's node ids.

use hashbrown::HashMap;
use crate::codec::decoder::accumulate;
use crate::codegen::{Statement, VarExpr};
use crate::model::{NodeId, Relation};
use crate::{Error, Result};

/// Reference to an object on the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(pub usize);

/// A two-slot object; slot 0 is the digit relation, slot 1 the next relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Object {
    pub slots: [Option<ObjRef>; 2],
}

/// Execution statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    pub objects_created: u64,
    pub slots_assigned: u64,
    /// Longest relation path evaluated on either side of an assignment.
    pub max_path_len: usize,
}

/// Objects plus the variable environment that names them.
#[derive(Debug, Clone, Default)]
pub struct Heap {
    objects: Vec<Object>,
    env: HashMap<NodeId, ObjRef>,
}

impl Heap {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object behind `obj`, or `None` if the reference belongs to another heap.
    pub fn object(&self, obj: ObjRef) -> Option<&Object> {
        self.objects.get(obj.0)
    }

    /// Object bound to a variable.
    pub fn lookup(&self, var: NodeId) -> Result<ObjRef> {
        self.env.get(&var).copied()
            .ok_or_else(|| Error::UnboundVariable(format!("id{var}")))
    }

    fn slot(&self, obj: ObjRef, relation: Relation) -> Option<ObjRef> {
        self.objects[obj.0].slots[relation.index()]
    }

    /// Evaluate an expression to the object it denotes.
    pub fn eval(&self, expr: &VarExpr) -> Result<ObjRef> {
        let mut obj = self.lookup(expr.root)?;
        for (depth, &step) in expr.path.iter().enumerate() {
            obj = self.slot(obj, step).ok_or_else(|| {
                Error::UnsetSlot(format!("{} is unset while evaluating {expr}", step_prefix(expr, depth + 1)))
            })?;
        }
        Ok(obj)
    }

    fn bind(&mut self, var: NodeId) -> Result<ObjRef> {
        if self.env.contains_key(&var) {
            return Err(Error::DuplicateVariable(format!("id{var}")));
        }
        let obj = ObjRef(self.objects.len());
        self.objects.push(Object::default());
        self.env.insert(var, obj);
        Ok(obj)
    }

    fn walk(&self, from: ObjRef, relation: Relation) -> Result<ObjRef> {
        self.slot(from, relation).ok_or_else(|| {
            Error::MalformedGraph(format!("object {} has no {relation} slot value", from.0))
        })
    }

    /// Hops along slot 1 from `obj`'s slot-0 target back to `obj`.
    pub fn digit(&self, obj: ObjRef) -> Result<u64> {
        let limit = self.objects.len();
        let mut walker = self.walk(obj, Relation::Digit)?;
        let mut hops = 0u64;
        while walker != obj {
            if hops as usize >= limit {
                return Err(Error::MalformedGraph(format!(
                    "digit walk from object {} never returns", obj.0
                )));
            }
            hops += 1;
            walker = self.walk(walker, Relation::Next)?;
        }
        Ok(hops)
    }

    /// Digit-traversal sum over the ring that starts at `root`.
    pub fn value(&self, root: ObjRef, radix: u64) -> Result<u64> {
        if radix < 2 {
            return Err(Error::InvalidRadix { radix });
        }
        let limit = self.objects.len();
        let mut digits = vec![self.digit(root)?];
        let mut current = self.walk(root, Relation::Next)?;
        while current != root {
            if digits.len() >= limit {
                return Err(Error::MalformedGraph(format!(
                    "ring from object {} never closes", root.0
                )));
            }
            digits.push(self.digit(current)?);
            current = self.walk(current, Relation::Next)?;
        }
        accumulate(digits, radix)
    }
}

/// `expr` truncated to its first `depth` steps, for error messages.
fn step_prefix(expr: &VarExpr, depth: usize) -> VarExpr {
    VarExpr { root: expr.root, path: expr.path.iter().take(depth).copied().collect() }
}

/// Executes statements in order against a fresh heap.
#[derive(Debug, Default)]
pub struct Interpreter {
    heap: Heap,
    stats: ExecutionStats,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one statement.
    pub fn step(&mut self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::CreateNode(var) => {
                self.heap.bind(*var)?;
                self.stats.objects_created += 1;
            }
            Statement::Assign { dst, src } => {
                let value = self.heap.eval(src)?;
                let (parent, slot) = dst.split_last().ok_or_else(|| {
                    Error::InvalidAssignment(format!("destination {dst} names a variable, not a slot"))
                })?;
                let target = self.heap.eval(&parent)?;
                self.heap.objects[target.0].slots[slot.index()] = Some(value);
                self.stats.slots_assigned += 1;
                self.stats.max_path_len = self.stats.max_path_len.max(dst.path.len()).max(src.path.len());
            }
        }
        Ok(())
    }

    /// Execute a whole script.
    pub fn run(&mut self, statements: &[Statement]) -> Result<()> {
        for stmt in statements {
            self.step(stmt)?;
        }
        tracing::debug!(
            objects = self.stats.objects_created,
            slots = self.stats.slots_assigned,
            max_path_len = self.stats.max_path_len,
            "executed construction script"
        );
        Ok(())
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    pub fn into_heap(self) -> Heap {
        self.heap
    }
}

/// Execute `statements` on a fresh interpreter.
pub fn execute(statements: &[Statement]) -> Result<Heap> {
    let mut interp = Interpreter::new();
    interp.run(statements)?;
    Ok(interp.into_heap())
}

/// Execute `statements` and read the value back from variable `id0`.
pub fn verify(statements: &[Statement], radix: u64) -> Result<u64> {
    let heap = execute(statements)?;
    let root = heap.lookup(NodeId::ORIGIN)?;
    heap.value(root, radix)
}
