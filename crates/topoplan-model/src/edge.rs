//! Candidate links between nodes and their measured signal strengths.

use std::collections::BTreeMap;

use crate::band::Band;
use crate::error::PlanError;
use crate::node::NodeInfo;

/// Directional RSSI measurements over one link in one band, in dBm.
///
/// `forward` is measured at the second endpoint of the wire key
/// (first endpoint transmitting), `reverse` the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RssiPair {
    pub forward: i16,
    pub reverse: i16,
}

impl RssiPair {
    /// The weaker of the two directions, which limits a bidirectional
    /// backhaul link.
    pub fn min(&self) -> i16 {
        self.forward.min(self.reverse)
    }

    /// The stronger direction, which governs interference.
    pub fn max(&self) -> i16 {
        self.forward.max(self.reverse)
    }
}

/// Measured link characteristics between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeInfo {
    pub rssi_high: RssiPair,
    pub rssi_low: RssiPair,
}

impl EdgeInfo {
    /// RSSI pair for the given band.
    pub fn rssi(&self, band: Band) -> RssiPair {
        match band {
            Band::High => self.rssi_high,
            Band::Low => self.rssi_low,
        }
    }
}

/// Unordered pair of node IDs identifying a link.
///
/// Normalised so the lexicographically smaller ID comes first, giving a
/// canonical `BTreeMap` key regardless of the direction the edge was
/// declared in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    a: String,
    b: String,
}

impl EdgeKey {
    /// Canonical key for the pair; the declared order is not significant.
    pub fn new(x: &str, y: &str) -> Self {
        if x <= y {
            Self { a: x.to_string(), b: y.to_string() }
        } else {
            Self { a: y.to_string(), b: x.to_string() }
        }
    }

    /// First endpoint in canonical order.
    pub fn first(&self) -> &str {
        &self.a
    }

    /// Second endpoint in canonical order.
    pub fn second(&self) -> &str {
        &self.b
    }

    /// The endpoint that is not `id`, if `id` is one of the two.
    pub fn peer_of(&self, id: &str) -> Option<&str> {
        if self.a == id {
            Some(&self.b)
        } else if self.b == id {
            Some(&self.a)
        } else {
            None
        }
    }

    /// Resolve a wire key of the form `<id1>_<id2>` against the node map.
    ///
    /// Node IDs may themselves contain underscores, so every split point is
    /// tried left to right and the first one whose halves both name known
    /// nodes wins. Returns the two IDs in *declared* order, since the RSSI
    /// vectors are directional.
    pub fn parse_wire(
        key: &str,
        nodes: &BTreeMap<String, NodeInfo>,
    ) -> Result<(String, String), PlanError> {
        for (pos, ch) in key.char_indices() {
            if ch != '_' {
                continue;
            }
            let (left, right) = (&key[..pos], &key[pos + 1..]);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            if nodes.contains_key(left) && nodes.contains_key(right) {
                if left == right {
                    return Err(PlanError::InvalidInput {
                        field: format!("edges.{key}"),
                        value: key.to_string(),
                        requirement: "edge endpoints must be two distinct nodes".to_string(),
                    });
                }
                return Ok((left.to_string(), right.to_string()));
            }
        }
        Err(PlanError::InvalidInput {
            field: format!("edges.{key}"),
            value: key.to_string(),
            requirement: "edge key must join two known node IDs with '_'".to_string(),
        })
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::CapabilityTable;

    fn node() -> NodeInfo {
        NodeInfo {
            gps: (30.0, 120.0),
            load: 0.0,
            capabilities: CapabilityTable::new(),
        }
    }

    fn node_map(ids: &[&str]) -> BTreeMap<String, NodeInfo> {
        ids.iter().map(|id| (id.to_string(), node())).collect()
    }

    #[test]
    fn test_key_normalisation() {
        assert_eq!(EdgeKey::new("B", "A"), EdgeKey::new("A", "B"));
        let key = EdgeKey::new("SN2", "SN1");
        assert_eq!(key.first(), "SN1");
        assert_eq!(key.second(), "SN2");
    }

    #[test]
    fn test_peer_of() {
        let key = EdgeKey::new("A", "B");
        assert_eq!(key.peer_of("A"), Some("B"));
        assert_eq!(key.peer_of("B"), Some("A"));
        assert_eq!(key.peer_of("C"), None);
    }

    #[test]
    fn test_parse_wire_simple() {
        let nodes = node_map(&["SN0", "SN1"]);
        let (a, b) = EdgeKey::parse_wire("SN0_SN1", &nodes).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("SN0", "SN1"));
        // Declared order is preserved even when not canonical.
        let (a, b) = EdgeKey::parse_wire("SN1_SN0", &nodes).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("SN1", "SN0"));
    }

    #[test]
    fn test_parse_wire_ids_containing_underscores() {
        let nodes = node_map(&["ap_east", "ap_west"]);
        let (a, b) = EdgeKey::parse_wire("ap_east_ap_west", &nodes).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("ap_east", "ap_west"));
    }

    #[test]
    fn test_parse_wire_unknown_endpoint() {
        let nodes = node_map(&["SN0", "SN1"]);
        let err = EdgeKey::parse_wire("SN0_SN9", &nodes).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { .. }));
    }

    #[test]
    fn test_parse_wire_self_loop() {
        let nodes = node_map(&["SN0"]);
        let err = EdgeKey::parse_wire("SN0_SN0", &nodes).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { .. }));
    }

    #[test]
    fn test_rssi_pair_min_max() {
        let pair = RssiPair { forward: -60, reverse: -64 };
        assert_eq!(pair.min(), -64);
        assert_eq!(pair.max(), -60);
    }

    #[test]
    fn test_edge_info_band_lookup() {
        let edge = EdgeInfo {
            rssi_high: RssiPair { forward: -60, reverse: -62 },
            rssi_low: RssiPair { forward: -55, reverse: -57 },
        };
        assert_eq!(edge.rssi(Band::High).min(), -62);
        assert_eq!(edge.rssi(Band::Low).min(), -57);
    }
}
