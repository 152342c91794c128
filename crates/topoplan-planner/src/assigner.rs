//! Channel, bandwidth, and EIRP assignment over a committed tree.
//!
//! Nodes are visited level by level from the root, IDs ascending within a
//! level, so a node's parent always holds its channels before the node is
//! considered. Per band the policy is greedy: widest bandwidth first,
//! channel centres in capability-table order, first candidate that clears
//! the interference floor wins. A non-root node never chooses on its
//! backhaul band; the uplink channel is shared with the parent, so it
//! adopts the parent's centre and width there.

use std::collections::BTreeSet;

use topoplan_model::{
    channels_overlap, Band, Bandwidth, EdgeKey, PlanError, PlanInput,
};

use crate::tree::Tree;

/// One configured radio on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioAssignment {
    pub band: Band,
    pub centre: u16,
    pub bandwidth: Bandwidth,
    pub max_eirp: i16,
}

/// Radios per node, in band order (high before low).
pub type Assignments = std::collections::BTreeMap<String, Vec<RadioAssignment>>;

/// Assign operating channels to every node of the tree.
pub fn assign(input: &PlanInput, tree: &Tree) -> Result<Assignments, PlanError> {
    let mut assigned = Assignments::new();

    for id in tree.bfs_order() {
        let node = tree.get(&id).expect("bfs order yields attached nodes");
        let mut radios = Vec::new();

        for band in operated_bands(tree, &id) {
            let radio = if node.parent.is_some() && node.backhaul_band == Some(band) {
                let parent = node.parent.as_deref().unwrap();
                inherit_uplink_channel(input, tree, &assigned, &id, band, parent)?
            } else {
                select_channel(input, &assigned, &id, band)?
            };
            log::debug!(
                "assigned {id} {}: channel {} @ {} ({} dBm)",
                radio.band,
                radio.centre,
                radio.bandwidth,
                radio.max_eirp
            );
            radios.push(radio);
        }

        assigned.insert(id, radios);
    }

    Ok(assigned)
}

/// Bands a node must operate: the root and every internal node serve both
/// bands; a leaf only needs its uplink.
fn operated_bands(tree: &Tree, id: &str) -> Vec<Band> {
    let node = tree.get(id).expect("attached node");
    if node.parent.is_none() || !node.children.is_empty() {
        Band::ALL.to_vec()
    } else {
        vec![node.backhaul_band.expect("non-root node has a backhaul band")]
    }
}

/// Free selection: scan the capability table widest-first and take the
/// first centre that no interfering assigned node overlaps.
fn select_channel(
    input: &PlanInput,
    assigned: &Assignments,
    id: &str,
    band: Band,
) -> Result<RadioAssignment, PlanError> {
    let caps = &input.nodes[id].capabilities;
    let mut attempted = Vec::new();
    let mut conflicts = BTreeSet::new();

    let no_peers = BTreeSet::new();
    for bw in Bandwidth::DESCENDING {
        for cap in caps.caps(band, bw) {
            attempted.push(cap.centre);
            let blockers = blocking_nodes(input, assigned, id, band, cap.centre, bw, &no_peers);
            if blockers.is_empty() {
                return Ok(RadioAssignment {
                    band,
                    centre: cap.centre,
                    bandwidth: bw,
                    max_eirp: cap.max_eirp,
                });
            }
            conflicts.extend(blockers);
        }
        if !caps.caps(band, bw).is_empty() {
            log::debug!("{id} {band}: no clear channel at {bw}, stepping down");
        }
    }

    Err(PlanError::ChannelAssignment {
        node: id.to_string(),
        band: band.label().to_string(),
        attempted,
        conflicts: conflicts.into_iter().collect(),
    })
}

/// Backhaul inheritance: adopt the parent's centre and width in `band`,
/// with this node's own EIRP ceiling. The pair must exist in this node's
/// capability table, and the shared channel is still checked against every
/// assigned node outside the uplink's own cell: the parent and the
/// siblings that backhaul to it in the same band, which all share this
/// channel by construction.
fn inherit_uplink_channel(
    input: &PlanInput,
    tree: &Tree,
    assigned: &Assignments,
    id: &str,
    band: Band,
    parent: &str,
) -> Result<RadioAssignment, PlanError> {
    let uplink = assigned[parent]
        .iter()
        .find(|radio| radio.band == band)
        .copied()
        .expect("parent operates the child's backhaul band");

    let Some(cap) = input.nodes[id]
        .capabilities
        .find(band, uplink.bandwidth, uplink.centre)
    else {
        return Err(PlanError::ChannelAssignment {
            node: id.to_string(),
            band: band.label().to_string(),
            attempted: vec![uplink.centre],
            conflicts: Vec::new(),
        });
    };

    let peers = backhaul_cell(tree, parent, band);
    let blockers = blocking_nodes(
        input,
        assigned,
        id,
        band,
        uplink.centre,
        uplink.bandwidth,
        &peers,
    );
    if !blockers.is_empty() {
        return Err(PlanError::ChannelAssignment {
            node: id.to_string(),
            band: band.label().to_string(),
            attempted: vec![uplink.centre],
            conflicts: blockers.into_iter().collect(),
        });
    }

    Ok(RadioAssignment {
        band,
        centre: uplink.centre,
        bandwidth: uplink.bandwidth,
        max_eirp: cap.max_eirp,
    })
}

/// The parent and every child backhauling to it in `band`: the set of
/// nodes that legitimately operate the parent's channel in that band.
fn backhaul_cell(tree: &Tree, parent: &str, band: Band) -> BTreeSet<String> {
    let mut cell = BTreeSet::new();
    cell.insert(parent.to_string());
    if let Some(parent_node) = tree.get(parent) {
        for child in &parent_node.children {
            let same_band = tree
                .get(child)
                .is_some_and(|n| n.backhaul_band == Some(band));
            if same_band {
                cell.insert(child.clone());
            }
        }
    }
    cell
}

/// Assigned nodes that both overlap the candidate spectrum in `band` and
/// are heard too loudly to reuse it.
///
/// Interference uses the stronger of the two directional measurements in
/// the band; node pairs with no measured edge never conflict.
fn blocking_nodes(
    input: &PlanInput,
    assigned: &Assignments,
    id: &str,
    band: Band,
    centre: u16,
    bw: Bandwidth,
    exclude: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut blockers = BTreeSet::new();
    for (other, radios) in assigned {
        if other == id || exclude.contains(other) {
            continue;
        }
        let overlaps = radios.iter().any(|radio| {
            radio.band == band && channels_overlap(centre, bw, radio.centre, radio.bandwidth)
        });
        if !overlaps {
            continue;
        }
        let Some(edge) = input.edges.get(&EdgeKey::new(id, other)) else {
            continue;
        };
        if edge.rssi(band).max() >= input.config.rssi_conflict_threshold {
            blockers.insert(other.clone());
        }
    }
    blockers
}
