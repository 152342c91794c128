//! Scoring of candidate attachments.

use topoplan_model::{Band, EdgeKey, PlanInput};

use crate::throughput::throughput_mbps;
use crate::tree::Tree;

/// Score for attaching `child` under the in-tree node `parent` with its
/// uplink in `band`. Higher is better; `f64::NEG_INFINITY` marks an
/// ineligible candidate.
///
/// A candidate is ineligible when any of these hold:
/// - no edge was measured between the two nodes;
/// - the weaker direction of the edge's RSSI in `band` is below the
///   backhaul floor (the link must clear it both ways);
/// - the two nodes share no supported bandwidth in `band`;
/// - the parent is already at the degree cap;
/// - the child would land beyond the hop cap.
///
/// Otherwise the score combines the modelled throughput of the uplink at
/// the widest shared width, a penalty for the load already carried by the
/// parent's subtree, and a depth penalty.
pub fn edge_weight(input: &PlanInput, tree: &Tree, parent: &str, child: &str, band: Band) -> f64 {
    let cfg = &input.config;

    let Some(edge) = input.edges.get(&EdgeKey::new(parent, child)) else {
        return f64::NEG_INFINITY;
    };

    let rssi = edge.rssi(band);
    if rssi.min() < cfg.rssi_threshold {
        return f64::NEG_INFINITY;
    }

    let parent_info = &input.nodes[parent];
    let child_info = &input.nodes[child];
    let Some(shared_bw) = parent_info
        .capabilities
        .widest_shared(band, &child_info.capabilities)
    else {
        return f64::NEG_INFINITY;
    };

    let parent_node = match tree.get(parent) {
        Some(node) => node,
        None => return f64::NEG_INFINITY,
    };
    if parent_node.children.len() as u32 >= cfg.max_degree {
        return f64::NEG_INFINITY;
    }
    let child_level = parent_node.level + 1;
    if child_level > cfg.max_hop {
        return f64::NEG_INFINITY;
    }

    let throughput = throughput_mbps(rssi.min() as f64, shared_bw);
    let load = parent_node.subtree_load + child_info.load;

    cfg.throughput_weight * throughput - cfg.load_weight * load
        + cfg.hop_weight * child_level as f64
}
