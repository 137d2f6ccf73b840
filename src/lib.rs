//! # radix-watermark: Collberg–Thomborson Radix Graph Watermarks
//!
//! Encodes an integer into the shape of a small cyclic graph and emits a
//! randomized script that rebuilds that graph from scratch.
//!
//! ## Design Principles
//!
//! 1. **Arena graphs**: nodes live in a `Vec`, relations are `NodeId` indices
//! 2. **Structure is the value**: decoding walks the graph, nothing is stored
//! 3. **Seeded scripts**: the only randomness is the emission order, drawn
//!    from a caller-supplied seed or PRNG
//! 4. **Errors, not exits**: invariant breaches come back as `Error` values
//!
//! ## Quick Start
//!
//! ```rust
//! use radix_watermark::{Watermark, WatermarkConfig};
//!
//! # fn example() -> radix_watermark::Result<()> {
//! let mark = Watermark::new(WatermarkConfig::default().with_radix(3).with_seed(8))?;
//! let embedding = mark.embed(912918)?;
//!
//! // Structural decode
//! assert_eq!(mark.extract(&embedding.graph)?, 912918);
//!
//! // Replay the generated script on an independent object model
//! assert_eq!(embedding.verify()?, 912918);
//!
//! println!("{}", embedding.script(&mark.config().style));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Encode | `codec::encoder` | value + radix → `RadixGraph` |
//! | Decode | `codec::decoder` | `RadixGraph` → value |
//! | Generate | `codegen` | `RadixGraph` + seed → statements |
//! | Execute | `execution` | statements → heap → value |
//! | Export | `export` | DOT text, script text |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod codec;
pub mod codegen;
pub mod execution;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Node, NodeId, RadixGraph, Relation};
pub use codec::{decode, encode, MAX_RADIX};
pub use codegen::{generate, generate_with_rng, Statement, VarExpr};
pub use execution::{Interpreter, Heap, ExecutionStats};
pub use config::{ScriptStyle, WatermarkConfig};

// ============================================================================
// Top-level Watermark handle
// ============================================================================

/// The primary entry point. A `Watermark` holds a validated configuration
/// and runs the encode → generate and decode pipelines with it.
#[derive(Debug, Clone)]
pub struct Watermark {
    config: WatermarkConfig,
}

impl Watermark {
    /// Create a handle, rejecting invalid configurations up front.
    pub fn new(config: WatermarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load a handle from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(WatermarkConfig::from_json(json)?)
    }

    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    /// Encode `value` and generate its construction script.
    pub fn embed(&self, value: u64) -> Result<Embedding> {
        let graph = encode(value, self.config.radix)?;
        let statements = generate(&graph, self.config.seed)?;
        Ok(Embedding { graph, statements })
    }

    /// Decode the value carried by `graph`.
    pub fn extract(&self, graph: &RadixGraph) -> Result<u64> {
        decode(graph)
    }
}

/// An encoded graph together with one construction script for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedding {
    pub graph: RadixGraph,
    pub statements: Vec<Statement>,
}

impl Embedding {
    /// Script text in the given style.
    pub fn script(&self, style: &ScriptStyle) -> String {
        export::to_script(&self.statements, style)
    }

    /// DOT text of the graph.
    pub fn dot(&self) -> String {
        export::to_dot(&self.graph)
    }

    /// Replay the statements on a fresh interpreter and read the value back.
    pub fn verify(&self) -> Result<u64> {
        execution::verify(&self.statements, self.graph.radix())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid radix {radix}: must be at least 2")]
    InvalidRadix { radix: u64 },

    #[error("Radix {radix} exceeds the supported maximum of {max}")]
    RadixTooLarge { radix: u64, max: u64 },

    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    #[error("Encoded value does not fit in 64 bits")]
    ValueOverflow,

    #[error("Internal invariant violated: {count} assignments left unresolved after code generation")]
    UnresolvedAssignments { count: usize },

    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Variable bound twice: {0}")]
    DuplicateVariable(String),

    #[error("Unset slot: {0}")]
    UnsetSlot(String),

    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_and_extract() {
        let mark = Watermark::new(WatermarkConfig::default()).unwrap();
        let embedding = mark.embed(270175).unwrap();
        assert_eq!(mark.extract(&embedding.graph).unwrap(), 270175);
        assert_eq!(embedding.verify().unwrap(), 270175);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = Watermark::new(WatermarkConfig::default().with_radix(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidRadix { radix: 0 }));
        assert!(Watermark::from_json(r#"{"radix": 70000}"#).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnresolvedAssignments { count: 2 };
        assert!(err.to_string().contains("2 assignments left unresolved"));
    }
}
