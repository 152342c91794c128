//! Post-condition audit of a finished plan.
//!
//! The generator and assigner are built to uphold these laws; the audit
//! re-derives each one from the committed tree and channel assignments so a
//! latent inconsistency surfaces as a typed failure instead of a bad plan.

use topoplan_model::{channels_overlap, EdgeKey, PlanError, PlanInput};

use crate::assigner::Assignments;
use crate::tree::Tree;

/// Verify every guarantee the planner makes about its output.
pub fn check(input: &PlanInput, tree: &Tree, assignments: &Assignments) -> Result<(), PlanError> {
    check_tree_shape(input, tree)?;
    check_backhaul_links(input, tree)?;
    check_root_load(input, tree)?;
    check_assignments(input, tree, assignments)?;
    check_interference(input, tree, assignments)?;
    Ok(())
}

fn violation(description: impl Into<String>) -> PlanError {
    PlanError::InternalInvariant { description: description.into() }
}

/// Single root, parent links terminate, levels and degrees within caps.
fn check_tree_shape(input: &PlanInput, tree: &Tree) -> Result<(), PlanError> {
    let cfg = &input.config;
    let mut roots = 0usize;

    for (id, node) in tree.iter() {
        match &node.parent {
            None => {
                roots += 1;
                if node.level != 0 {
                    return Err(violation(format!("root {id} has level {}", node.level)));
                }
            }
            Some(parent) => {
                if parent == id {
                    return Err(violation(format!("node {id} is its own parent")));
                }
                let Some(parent_node) = tree.get(parent) else {
                    return Err(violation(format!("node {id} has unknown parent {parent}")));
                };
                if node.level != parent_node.level + 1 {
                    return Err(violation(format!(
                        "node {id} at level {} under parent at level {}",
                        node.level, parent_node.level
                    )));
                }
                if node.backhaul_band.is_none() {
                    return Err(violation(format!("non-root node {id} has no backhaul band")));
                }
            }
        }
        if node.level > cfg.max_hop {
            return Err(violation(format!(
                "node {id} at level {} exceeds the hop cap {}",
                node.level, cfg.max_hop
            )));
        }
        if node.children.len() as u32 > cfg.max_degree {
            return Err(violation(format!(
                "node {id} has {} children, cap is {}",
                node.children.len(),
                cfg.max_degree
            )));
        }
        // Walking up must reach the root within the node count.
        let mut cursor = node.parent.clone();
        let mut steps = 0usize;
        while let Some(current) = cursor {
            steps += 1;
            if steps > tree.len() {
                return Err(violation(format!("parent chain from {id} does not terminate")));
            }
            cursor = tree.get(&current).and_then(|n| n.parent.clone());
        }
    }

    if roots != 1 {
        return Err(violation(format!("expected exactly one root, found {roots}")));
    }
    if tree.len() != input.nodes.len() {
        return Err(violation(format!(
            "tree holds {} of {} nodes",
            tree.len(),
            input.nodes.len()
        )));
    }
    Ok(())
}

/// Every backhaul edge clears the RSSI floor in both directions.
fn check_backhaul_links(input: &PlanInput, tree: &Tree) -> Result<(), PlanError> {
    for (id, node) in tree.iter() {
        let (Some(parent), Some(band)) = (&node.parent, node.backhaul_band) else {
            continue;
        };
        let Some(edge) = input.edges.get(&EdgeKey::new(id, parent)) else {
            return Err(violation(format!("backhaul {id} -> {parent} has no measured edge")));
        };
        if edge.rssi(band).min() < input.config.rssi_threshold {
            return Err(violation(format!(
                "backhaul {id} -> {parent} in {band} at {} dBm is below the floor {}",
                edge.rssi(band).min(),
                input.config.rssi_threshold
            )));
        }
    }
    Ok(())
}

/// The root carries the highest offered load (ties broken toward the
/// lexicographically smaller ID).
fn check_root_load(input: &PlanInput, tree: &Tree) -> Result<(), PlanError> {
    let root = tree.root();
    let root_load = input.nodes[root].load;
    for (id, info) in &input.nodes {
        if info.load > root_load || (info.load == root_load && id.as_str() < root) {
            return Err(violation(format!(
                "node {id} (load {}) should outrank root {root} (load {root_load})",
                info.load
            )));
        }
    }
    Ok(())
}

/// Every node has the radios its role requires and every triple comes from
/// its own capability table.
fn check_assignments(
    input: &PlanInput,
    tree: &Tree,
    assignments: &Assignments,
) -> Result<(), PlanError> {
    for (id, node) in tree.iter() {
        let Some(radios) = assignments.get(id) else {
            return Err(violation(format!("node {id} has no channel assignment")));
        };
        let expected = if node.parent.is_none() || !node.children.is_empty() {
            2
        } else {
            1
        };
        if radios.len() != expected {
            return Err(violation(format!(
                "node {id} has {} radio(s), expected {expected}",
                radios.len()
            )));
        }
        for radio in radios {
            let known = input.nodes[id]
                .capabilities
                .find(radio.band, radio.bandwidth, radio.centre)
                .is_some_and(|cap| cap.max_eirp == radio.max_eirp);
            if !known {
                return Err(violation(format!(
                    "node {id} assigned channel {} @ {} in {} outside its capability table",
                    radio.centre, radio.bandwidth, radio.band
                )));
            }
        }
        if let (Some(parent), Some(band)) = (&node.parent, node.backhaul_band) {
            // The uplink channel must match the parent's radio in that band.
            let own = radios.iter().find(|r| r.band == band);
            let parents = assignments
                .get(parent)
                .and_then(|rs| rs.iter().find(|r| r.band == band));
            match (own, parents) {
                (Some(a), Some(b)) if a.centre == b.centre && a.bandwidth == b.bandwidth => {}
                _ => {
                    return Err(violation(format!(
                        "backhaul channel of {id} does not match parent {parent} in {band}"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Overlapping same-band channels only between mutually faint nodes, or
/// within one backhaul cell in that band.
fn check_interference(
    input: &PlanInput,
    tree: &Tree,
    assignments: &Assignments,
) -> Result<(), PlanError> {
    let ids: Vec<&String> = assignments.keys().collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            for ra in &assignments[*a] {
                for rb in &assignments[*b] {
                    if ra.band != rb.band
                        || !channels_overlap(ra.centre, ra.bandwidth, rb.centre, rb.bandwidth)
                    {
                        continue;
                    }
                    if same_backhaul_cell(tree, a, b, ra.band) {
                        continue;
                    }
                    let Some(edge) = input.edges.get(&EdgeKey::new(a, b)) else {
                        continue;
                    };
                    if edge.rssi(ra.band).max() >= input.config.rssi_conflict_threshold {
                        return Err(violation(format!(
                            "{a} and {b} share overlapping spectrum in {} at {} dBm",
                            ra.band,
                            edge.rssi(ra.band).max()
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

/// True when the two nodes legitimately operate the same channel in `band`
/// because they belong to one backhaul cell: one is the other's parent over
/// that band, or both uplink to the same parent over it.
fn same_backhaul_cell(tree: &Tree, a: &str, b: &str, band: topoplan_model::Band) -> bool {
    let uplink_parent = |id: &str| {
        tree.get(id).and_then(|n| {
            if n.backhaul_band == Some(band) {
                n.parent.clone()
            } else {
                None
            }
        })
    };
    match (uplink_parent(a), uplink_parent(b)) {
        (Some(pa), Some(pb)) if pa == pb => true,
        (Some(pa), _) if pa == b => true,
        (_, Some(pb)) if pb == a => true,
        _ => false,
    }
}
