//! Planner tuning options.

use serde::{Deserialize, Serialize};

/// The recognised planner options with their defaults.
///
/// The option set is closed: unknown keys in the wire form are rejected so a
/// typo cannot silently fall back to a default. Any subset may be supplied;
/// missing options take the values below. The configuration is passed by
/// value into the planner and read nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    /// Maximum children per internal node.
    #[serde(rename = "MAX_DEGREE", default = "defaults::max_degree")]
    pub max_degree: u32,

    /// Floor on per-direction RSSI (dBm) for an edge to carry backhaul.
    #[serde(rename = "RSSI_THRESHOLD", default = "defaults::rssi_threshold")]
    pub rssi_threshold: i16,

    /// Maximum tree depth; the root sits at level 0.
    #[serde(rename = "MAX_HOP", default = "defaults::max_hop")]
    pub max_hop: u32,

    /// Coefficient on the modelled-throughput term.
    #[serde(rename = "THROUGHPUT_WEIGHT", default = "defaults::throughput_weight")]
    pub throughput_weight: f64,

    /// Coefficient on the subtree-load penalty.
    #[serde(rename = "LOAD_WEIGHT", default = "defaults::load_weight")]
    pub load_weight: f64,

    /// Coefficient on the hop-count penalty; negative, so deeper is worse.
    #[serde(rename = "HOP_WEIGHT", default = "defaults::hop_weight")]
    pub hop_weight: f64,

    /// Interference floor (dBm): nodes heard at or above this cannot share
    /// overlapping spectrum.
    #[serde(
        rename = "RSSI_CONFLICT_THRESHOLD",
        default = "defaults::rssi_conflict_threshold"
    )]
    pub rssi_conflict_threshold: i16,
}

mod defaults {
    pub fn max_degree() -> u32 {
        3
    }
    pub fn rssi_threshold() -> i16 {
        -72
    }
    pub fn max_hop() -> u32 {
        5
    }
    pub fn throughput_weight() -> f64 {
        1.0
    }
    pub fn load_weight() -> f64 {
        0.5
    }
    pub fn hop_weight() -> f64 {
        -80.0
    }
    pub fn rssi_conflict_threshold() -> i16 {
        -85
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_degree: defaults::max_degree(),
            rssi_threshold: defaults::rssi_threshold(),
            max_hop: defaults::max_hop(),
            throughput_weight: defaults::throughput_weight(),
            load_weight: defaults::load_weight(),
            hop_weight: defaults::hop_weight(),
            rssi_conflict_threshold: defaults::rssi_conflict_threshold(),
        }
    }
}
