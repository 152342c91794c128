//! Wire-format request types and conversion into the validated model.
//!
//! The request arrives as one JSON record with `nodes`, `edges`, and an
//! optional `config`. Structural shape is enforced by serde; the semantic
//! checks the planner relies on (edge endpoints exist, capability tables are
//! non-empty, coordinates are finite) happen in [`PlanRequest::into_model`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::band::{Band, Bandwidth};
use crate::config::PlannerConfig;
use crate::edge::{EdgeInfo, EdgeKey, RssiPair};
use crate::error::PlanError;
use crate::node::{CapabilityTable, ChannelCap, NodeInfo};

/// One node as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// `[lat, lon]` in degrees.
    pub gps: [f64; 2],
    /// Offered load in Mbps.
    pub load: f64,
    /// `band label -> bandwidth label -> [channel centre, ...]`.
    pub channels: BTreeMap<String, BTreeMap<String, Vec<u16>>>,
    /// Same shape as `channels`, giving the EIRP ceiling per centre.
    #[serde(rename = "maxEirp")]
    pub max_eirp: BTreeMap<String, BTreeMap<String, Vec<i16>>>,
}

/// One link as it appears on the wire. The RSSI pairs are directional:
/// `[id1 -> id2, id2 -> id1]` in the key's declared ID order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub rssi_6gh: [i16; 2],
    pub rssi_6gl: [i16; 2],
}

/// The full planning request record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanRequest {
    pub nodes: BTreeMap<String, NodeSpec>,
    pub edges: BTreeMap<String, EdgeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PlannerConfig>,
}

/// Validated in-memory planner input.
///
/// All maps are ordered so every traversal that can affect the plan walks
/// keys in sorted order.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub nodes: BTreeMap<String, NodeInfo>,
    pub edges: BTreeMap<EdgeKey, EdgeInfo>,
    pub config: PlannerConfig,
}

impl PlanRequest {
    /// Validate the request and build the in-memory model.
    ///
    /// Checks run in sorted key order so the first reported error is
    /// deterministic for a given request.
    pub fn into_model(self) -> Result<PlanInput, PlanError> {
        let config = self.config.unwrap_or_default();

        if self.nodes.is_empty() {
            return Err(PlanError::InvalidInput {
                field: "nodes".to_string(),
                value: "{}".to_string(),
                requirement: "at least one node is required".to_string(),
            });
        }

        let mut nodes: BTreeMap<String, NodeInfo> = BTreeMap::new();
        for (id, spec) in &self.nodes {
            nodes.insert(id.clone(), build_node(id, spec)?);
        }

        let mut edges: BTreeMap<EdgeKey, EdgeInfo> = BTreeMap::new();
        for (wire_key, spec) in &self.edges {
            let (declared_first, declared_second) = EdgeKey::parse_wire(wire_key, &nodes)?;
            let key = EdgeKey::new(&declared_first, &declared_second);
            // Orient the directional pairs to the canonical endpoint order.
            let canonical = key.first() == declared_first;
            let orient = |pair: [i16; 2]| {
                if canonical {
                    RssiPair { forward: pair[0], reverse: pair[1] }
                } else {
                    RssiPair { forward: pair[1], reverse: pair[0] }
                }
            };
            let info = EdgeInfo {
                rssi_high: orient(spec.rssi_6gh),
                rssi_low: orient(spec.rssi_6gl),
            };
            if edges.insert(key.clone(), info).is_some() {
                return Err(PlanError::InvalidInput {
                    field: format!("edges.{wire_key}"),
                    value: wire_key.clone(),
                    requirement: format!("duplicate edge for node pair {key}"),
                });
            }
        }

        log::debug!(
            "validated plan input: {} nodes, {} edges",
            nodes.len(),
            edges.len()
        );
        Ok(PlanInput { nodes, edges, config })
    }
}

fn build_node(id: &str, spec: &NodeSpec) -> Result<NodeInfo, PlanError> {
    let [lat, lon] = spec.gps;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(PlanError::InvalidInput {
            field: format!("nodes.{id}.gps"),
            value: format!("[{lat}, {lon}]"),
            requirement: "GPS coordinates must be finite".to_string(),
        });
    }
    if !spec.load.is_finite() || spec.load < 0.0 {
        return Err(PlanError::InvalidInput {
            field: format!("nodes.{id}.load"),
            value: spec.load.to_string(),
            requirement: "offered load must be a non-negative number".to_string(),
        });
    }

    let capabilities = build_capability_table(id, spec)?;
    if capabilities.is_empty() {
        return Err(PlanError::InvalidInput {
            field: format!("nodes.{id}.channels"),
            value: "{}".to_string(),
            requirement: "capability table must contain at least one channel".to_string(),
        });
    }

    Ok(NodeInfo {
        gps: (lat, lon),
        load: spec.load,
        capabilities,
    })
}

fn build_capability_table(id: &str, spec: &NodeSpec) -> Result<CapabilityTable, PlanError> {
    let mut table = CapabilityTable::new();

    for (band_label, widths) in &spec.channels {
        let band = parse_band(id, band_label)?;
        for (bw_label, centres) in widths {
            let bw = parse_bandwidth(id, band_label, bw_label)?;
            let eirps = spec
                .max_eirp
                .get(band_label)
                .and_then(|m| m.get(bw_label))
                .ok_or_else(|| PlanError::InvalidInput {
                    field: format!("nodes.{id}.maxEirp.{band_label}.{bw_label}"),
                    value: "missing".to_string(),
                    requirement: "every channel list needs a matching EIRP list".to_string(),
                })?;
            if eirps.len() != centres.len() {
                return Err(PlanError::InvalidInput {
                    field: format!("nodes.{id}.maxEirp.{band_label}.{bw_label}"),
                    value: format!("{} entries", eirps.len()),
                    requirement: format!(
                        "EIRP list must parallel the {} channel centres",
                        centres.len()
                    ),
                });
            }
            let caps = centres
                .iter()
                .zip(eirps)
                .map(|(&centre, &max_eirp)| ChannelCap { centre, max_eirp })
                .collect();
            table.set(band, bw, caps);
        }
    }

    // EIRP cells with no channel counterpart indicate a malformed table.
    for (band_label, widths) in &spec.max_eirp {
        for bw_label in widths.keys() {
            let present = spec
                .channels
                .get(band_label)
                .is_some_and(|m| m.contains_key(bw_label));
            if !present {
                return Err(PlanError::InvalidInput {
                    field: format!("nodes.{id}.channels.{band_label}.{bw_label}"),
                    value: "missing".to_string(),
                    requirement: "every EIRP list needs a matching channel list".to_string(),
                });
            }
        }
    }

    Ok(table)
}

fn parse_band(id: &str, label: &str) -> Result<Band, PlanError> {
    match label {
        "6GH" => Ok(Band::High),
        "6GL" => Ok(Band::Low),
        other => Err(PlanError::InvalidInput {
            field: format!("nodes.{id}.channels.{other}"),
            value: other.to_string(),
            requirement: "band must be one of 6GH, 6GL".to_string(),
        }),
    }
}

fn parse_bandwidth(id: &str, band_label: &str, label: &str) -> Result<Bandwidth, PlanError> {
    Bandwidth::from_label(label).ok_or_else(|| PlanError::InvalidInput {
        field: format!("nodes.{id}.channels.{band_label}.{label}"),
        value: label.to_string(),
        requirement: "bandwidth must be one of 20M, 40M, 80M, 160M".to_string(),
    })
}
