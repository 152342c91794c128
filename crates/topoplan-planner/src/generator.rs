//! Rooted-tree construction: a constrained, weight-driven Prim variant.
//!
//! Growth starts from the root (the node with the highest offered load) and
//! repeatedly commits the best-scoring attachment of an out-of-tree node to
//! an in-tree node, where "best" is [`edge_weight`](crate::weight::edge_weight)
//! over both bands. A frontier map caches each out-of-tree node's best known
//! attachment so an iteration only rescans candidates the last commit could
//! have changed.

use std::collections::{BTreeMap, BTreeSet};

use topoplan_model::{Band, PlanError, PlanInput};

use crate::tree::Tree;
use crate::weight::edge_weight;

/// Best known attachment for an out-of-tree node.
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    parent: String,
    band: Band,
    weight: f64,
    /// Level the node would land at if committed now.
    level: u32,
}

impl Candidate {
    /// Whether this candidate beats `other` under the commit ordering:
    /// higher weight, then shallower placement. Equal candidates do not
    /// beat each other, so the first one found in a deterministic scan wins.
    fn beats(&self, other: &Candidate) -> bool {
        if self.weight != other.weight {
            return self.weight > other.weight;
        }
        self.level < other.level
    }
}

/// Build the backhaul tree for a validated input.
///
/// Fails with [`PlanError::TopologyUnreachable`] when no eligible
/// attachment remains while nodes are still detached. Degree or hop
/// exhaustion at a single parent only removes those candidates; the loop
/// continues from other in-tree nodes.
pub fn generate(input: &PlanInput) -> Result<Tree, PlanError> {
    let root = select_root(input);
    log::info!(
        "growing topology from root {root} ({} nodes, {} edges)",
        input.nodes.len(),
        input.edges.len()
    );

    let mut tree = Tree::new(root.clone(), input.nodes[&root].load);
    let adjacency = build_adjacency(input);

    let mut remaining: BTreeSet<String> = input
        .nodes
        .keys()
        .filter(|id| **id != root)
        .cloned()
        .collect();
    let mut frontier: BTreeMap<String, Candidate> = BTreeMap::new();

    relax_around(input, &tree, &adjacency, &root, &remaining, &mut frontier);

    while !remaining.is_empty() {
        let Some(child) = pick_best(&frontier) else {
            let unreachable: Vec<String> = remaining.iter().cloned().collect();
            log::warn!(
                "growth stalled with {} node(s) unattached: {}",
                unreachable.len(),
                unreachable.join(", ")
            );
            return Err(PlanError::TopologyUnreachable {
                unreachable,
                attached: tree.len(),
            });
        };
        let candidate = frontier.remove(&child).expect("picked candidate missing");
        remaining.remove(&child);

        log::debug!(
            "attach {child} -> {} over {} (weight {:.1}, level {})",
            candidate.parent,
            candidate.band,
            candidate.weight,
            candidate.level
        );
        tree.attach(child.as_str(), input.nodes[&child].load, &candidate.parent, candidate.band);

        // New edges into the tree appear only around the node just added.
        relax_around(input, &tree, &adjacency, &child, &remaining, &mut frontier);

        // If the commit saturated the parent, every frontier entry that was
        // counting on it is stale and must find another way in.
        if tree.degree(&candidate.parent) as u32 >= input.config.max_degree {
            reseed_children_of(input, &tree, &candidate.parent, &mut frontier);
        }
    }

    Ok(tree)
}

/// The root anchors the wired uplink: pick the node with the highest
/// offered load, breaking ties toward the lexicographically smaller ID.
fn select_root(input: &PlanInput) -> String {
    input
        .nodes
        .iter()
        .max_by(|(id_a, a), (id_b, b)| {
            a.load
                .partial_cmp(&b.load)
                .expect("loads validated finite")
                .then_with(|| id_b.cmp(id_a))
        })
        .map(|(id, _)| id.clone())
        .expect("input validated non-empty")
}

/// Neighbour lists per node, sorted by ID.
fn build_adjacency(input: &PlanInput) -> BTreeMap<String, Vec<String>> {
    let mut adjacency: BTreeMap<String, Vec<String>> =
        input.nodes.keys().map(|id| (id.clone(), Vec::new())).collect();
    for key in input.edges.keys() {
        adjacency
            .get_mut(key.first())
            .expect("edge endpoints validated")
            .push(key.second().to_string());
        adjacency
            .get_mut(key.second())
            .expect("edge endpoints validated")
            .push(key.first().to_string());
    }
    for neighbours in adjacency.values_mut() {
        neighbours.sort();
    }
    adjacency
}

/// Rescore attachments from the in-tree node `u` to each of its detached
/// neighbours, keeping the better of the fresh and cached candidates.
fn relax_around(
    input: &PlanInput,
    tree: &Tree,
    adjacency: &BTreeMap<String, Vec<String>>,
    u: &str,
    remaining: &BTreeSet<String>,
    frontier: &mut BTreeMap<String, Candidate>,
) {
    let level = tree.get(u).expect("relaxing around detached node").level + 1;
    for v in &adjacency[u] {
        if !remaining.contains(v) {
            continue;
        }
        for band in Band::ALL {
            let weight = edge_weight(input, tree, u, v, band);
            if weight == f64::NEG_INFINITY {
                continue;
            }
            let fresh = Candidate { parent: u.to_string(), band, weight, level };
            match frontier.get(v) {
                Some(current) if !fresh.beats(current) => {}
                _ => {
                    frontier.insert(v.clone(), fresh);
                }
            }
        }
    }
}

/// Replace every frontier entry pointing at the saturated `parent` with the
/// best attachment over all other in-tree nodes, dropping entries that no
/// longer have one.
fn reseed_children_of(
    input: &PlanInput,
    tree: &Tree,
    parent: &str,
    frontier: &mut BTreeMap<String, Candidate>,
) {
    let stale: Vec<String> = frontier
        .iter()
        .filter(|(_, c)| c.parent == parent)
        .map(|(id, _)| id.clone())
        .collect();
    for v in stale {
        match best_attachment(input, tree, &v) {
            Some(candidate) => {
                frontier.insert(v, candidate);
            }
            None => {
                frontier.remove(&v);
            }
        }
    }
}

/// Best eligible attachment of the detached node `v` over every in-tree
/// node and band; `None` when no candidate is eligible.
fn best_attachment(input: &PlanInput, tree: &Tree, v: &str) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (u, node) in tree.iter() {
        for band in Band::ALL {
            let weight = edge_weight(input, tree, u, v, band);
            if weight == f64::NEG_INFINITY {
                continue;
            }
            let candidate = Candidate {
                parent: u.clone(),
                band,
                weight,
                level: node.level + 1,
            };
            match &best {
                Some(current) if !candidate.beats(current) => {}
                _ => best = Some(candidate),
            }
        }
    }
    best
}

/// The detached node to commit next: maximum weight, then lower landing
/// level, then lexicographically smaller ID (the scan order of the map).
fn pick_best(frontier: &BTreeMap<String, Candidate>) -> Option<String> {
    let mut best: Option<(&String, &Candidate)> = None;
    for (id, candidate) in frontier {
        match best {
            Some((_, current)) if !candidate.beats(current) => {}
            _ => best = Some((id, candidate)),
        }
    }
    best.map(|(id, _)| id.clone())
}
