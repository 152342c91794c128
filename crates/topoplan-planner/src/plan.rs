//! The per-node output record of a planning run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assigner::Assignments;
use crate::tree::Tree;

/// Everything a node needs to come up: its place in the tree and the
/// channels its radios operate. The three arrays are parallel, one slot
/// per configured radio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Uplink parent; `null` for the root.
    pub parent: Option<String>,
    /// `"H"` / `"L"`; `null` for the root.
    #[serde(rename = "backhaulBand")]
    pub backhaul_band: Option<String>,
    /// Hops from the root.
    pub level: u32,
    /// Channel centre per radio.
    pub channel: Vec<u16>,
    /// Channel width in MHz per radio.
    pub bandwidth: Vec<u16>,
    /// EIRP ceiling in dBm per radio.
    #[serde(rename = "maxEirp")]
    pub max_eirp: Vec<i16>,
}

/// A finished plan, keyed by node ID. Serialises with sorted keys, so
/// parse-and-reserialise reproduces the emitted bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    pub entries: BTreeMap<String, PlanEntry>,
}

impl Plan {
    /// Flatten the tree and channel assignments into the output record.
    pub fn materialise(tree: &Tree, assignments: &Assignments) -> Plan {
        let entries = tree
            .iter()
            .map(|(id, node)| {
                let radios = &assignments[id];
                let entry = PlanEntry {
                    parent: node.parent.clone(),
                    backhaul_band: node.backhaul_band.map(|b| b.short_label().to_string()),
                    level: node.level,
                    channel: radios.iter().map(|r| r.centre).collect(),
                    bandwidth: radios.iter().map(|r| r.bandwidth.mhz()).collect(),
                    max_eirp: radios.iter().map(|r| r.max_eirp).collect(),
                };
                (id.clone(), entry)
            })
            .collect();
        Plan { entries }
    }

    /// The root's entry, if the plan is non-empty.
    pub fn root(&self) -> Option<(&String, &PlanEntry)> {
        self.entries.iter().find(|(_, entry)| entry.parent.is_none())
    }
}
