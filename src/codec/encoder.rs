//! Encoder: integer → radix graph.

use crate::model::{Node, NodeId, RadixGraph};
use crate::{Error, Result};

/// Largest radix the encoder accepts. Padding makes `node_count >= radix`,
/// so this also bounds the arena size.
pub const MAX_RADIX: u64 = 1 << 16;

/// Number of nodes needed to hold `value` in base `radix`.
///
/// One node per base-`radix` digit, raised to at least `radix` so every
/// digit `0..radix` is a distinct back-hop distance on the ring.
pub fn node_count(value: u64, radix: u64) -> Result<usize> {
    check_radix(radix)?;
    let mut digits = 0usize;
    let mut rest = value;
    while rest > 0 {
        digits += 1;
        rest /= radix;
    }
    Ok(digits.max(radix as usize))
}

fn check_radix(radix: u64) -> Result<()> {
    if radix < 2 {
        return Err(Error::InvalidRadix { radix });
    }
    if radix > MAX_RADIX {
        return Err(Error::RadixTooLarge { radix, max: MAX_RADIX });
    }
    Ok(())
}

/// Encode `value` into a radix graph in base `radix`.
///
/// Node `i` holds digit `i` (least significant first): its `DIGIT` relation
/// points `digit` hops backwards along the ring, so following `NEXT` from
/// the target reaches node `i` again after exactly `digit` hops.
pub fn encode(value: u64, radix: u64) -> Result<RadixGraph> {
    let count = node_count(value, radix)?;

    // Pass 1: allocate every id before any relation is wired.
    let mut nodes: Vec<Node> = (0..count as u32).map(|i| Node::new(NodeId(i))).collect();

    // Pass 2: wire relations by index. Positions past the last digit stay
    // padding (digit relation on self).
    let mut rest = value;
    for (pos, node) in nodes.iter_mut().enumerate() {
        let digit = (rest % radix) as usize;
        rest /= radix;
        let back = (pos + count - digit) % count;
        *node = node
            .with_digit(NodeId(back as u32))
            .with_next(NodeId(((pos + 1) % count) as u32));
    }

    tracing::debug!(value, radix, node_count = count, "encoded radix graph");
    Ok(RadixGraph::from_parts(nodes, radix))
}
