//! Decoder: radix graph → integer, by structural traversal only.

use crate::model::{NodeId, RadixGraph, Relation};
use crate::{Error, Result};

/// Forward `NEXT` hops from `id`'s digit target back to `id`.
///
/// Bounded by the node count; a walk that never returns means the ring is
/// broken.
pub fn digit_of(graph: &RadixGraph, id: NodeId) -> Result<u64> {
    let limit = graph.node_count();
    let mut walker = graph.follow(id, Relation::Digit);
    let mut hops = 0u64;
    while walker != id {
        if hops as usize >= limit {
            return Err(Error::MalformedGraph(format!(
                "digit walk from node {id} does not return within {limit} hops"
            )));
        }
        hops += 1;
        walker = graph.follow(walker, Relation::Next);
    }
    Ok(hops)
}

/// Per-position digits, least significant first (ring order from node 0).
pub fn digits(graph: &RadixGraph) -> Result<Vec<u64>> {
    graph.ring().map(|node| digit_of(graph, node.id)).collect()
}

/// Decode the value carried by `graph`.
pub fn decode(graph: &RadixGraph) -> Result<u64> {
    accumulate(digits(graph)?, graph.radix())
}

/// `Σ digit_i * radix^i` with overflow detection.
///
/// Powers past `u128` are only an error when a non-zero digit needs them;
/// long zero tails from padding are fine.
pub(crate) fn accumulate(digits: impl IntoIterator<Item = u64>, radix: u64) -> Result<u64> {
    let mut value: u128 = 0;
    let mut pow: Option<u128> = Some(1);
    for digit in digits {
        if digit != 0 {
            let weight = pow.ok_or(Error::ValueOverflow)?;
            let term = weight.checked_mul(digit as u128).ok_or(Error::ValueOverflow)?;
            value = value.checked_add(term).ok_or(Error::ValueOverflow)?;
        }
        pow = pow.and_then(|p| p.checked_mul(radix as u128));
    }
    u64::try_from(value).map_err(|_| Error::ValueOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::model::Node;

    #[test]
    fn test_digits_match_base_expansion() {
        let graph = encode(270175, 7).unwrap();
        let ds = digits(&graph).unwrap();
        // 270175 = 2203453 in base 7
        assert_eq!(ds, vec![3, 5, 4, 3, 0, 2, 2]);
        assert_eq!(decode(&graph).unwrap(), 270175);
    }

    #[test]
    fn test_decode_zero() {
        let graph = encode(0, 10).unwrap();
        assert_eq!(graph.node_count(), 10);
        assert!(digits(&graph).unwrap().iter().all(|&d| d == 0));
        assert_eq!(decode(&graph).unwrap(), 0);
    }

    #[test]
    fn test_decode_u64_max() {
        for radix in [2, 3, 10, 16, 255] {
            let graph = encode(u64::MAX, radix).unwrap();
            assert_eq!(decode(&graph).unwrap(), u64::MAX, "radix {radix}");
        }
    }

    #[test]
    fn test_accumulate_overflow() {
        // 2^64 does not fit
        let mut ds = vec![0u64; 64];
        ds.push(1);
        assert!(matches!(accumulate(ds, 2), Err(Error::ValueOverflow)));
    }

    #[test]
    fn test_decode_hand_built_graph() {
        // ring 0 -> 2 -> 1 -> 0; node 1 sits one hop after node 2
        let nodes = vec![
            Node::new(NodeId(0)).with_next(NodeId(2)),
            Node::new(NodeId(1)).with_digit(NodeId(2)).with_next(NodeId(0)),
            Node::new(NodeId(2)).with_next(NodeId(1)),
        ];
        let graph = RadixGraph::from_nodes(nodes, 2).unwrap();
        // ring order 0, 2, 1 → digits 0, 0, 1 → 1 * 2^2
        assert_eq!(decode(&graph).unwrap(), 4);
    }
}
