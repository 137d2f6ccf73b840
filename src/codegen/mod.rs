//! # Construction Script Generation
//!
//! Turns a radix graph into a randomized, dependency-ordered sequence of
//! creation and slot-assignment statements. The statements are abstract:
//! any interpreter that can create two-slot objects and assign slots can
//! replay them (see `crate::execution` and `crate::export::write_script`).

pub mod ast;
pub mod permute;
pub mod generator;

pub use ast::{RelationPath, Statement, VarExpr};
pub use generator::{check_order, generate, generate_with_rng, PendingAssignment};
pub use permute::{emission_order, seeded_rng};
