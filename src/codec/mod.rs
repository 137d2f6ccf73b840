//! # Radix Codec
//!
//! Integer ↔ radix graph. Pure functions over the model:
//! no I/O, no randomness, no shared state.

pub mod encoder;
pub mod decoder;

pub use encoder::{encode, node_count, MAX_RADIX};
pub use decoder::{decode, digit_of, digits};
