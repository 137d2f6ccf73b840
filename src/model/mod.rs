//! # Radix Graph Model
//!
//! The node/relation types and the arena that holds them.
//! These types cross every boundary: encoder ↔ decoder ↔ codegen ↔ export.
//!
//! Design rule: this module is pure data. No randomness, no I/O,
//! no statement emission.

pub mod node;
pub mod graph;

pub use node::{Node, NodeId, Relation};
pub use graph::{RadixGraph, Ring};
