//! # topoplan-planner
//!
//! Core planning engine for WiFi mesh backhaul topologies. Given candidate
//! nodes (GPS, offered load, per-band channel capabilities) and measured
//! per-band link RSSIs, it produces a rooted spanning tree with a backhaul
//! band per uplink and an interference-aware channel plan per node.
//!
//! The entry point is [`plan`], a pure function of its input:
//!
//! - **Topology generation**: a constrained, weight-driven Prim variant
//!   grows the tree from the most loaded node under degree, hop, and RSSI
//!   constraints ([`generator`]).
//! - **Channel assignment**: a level-ordered greedy pass gives every node
//!   one channel per operated band, stepping down in bandwidth when the
//!   interference floor leaves no wide channel free ([`assigner`]).
//!
//! A planning call is sequential, holds no state across invocations, and is
//! deterministic: identical inputs produce byte-identical serialised plans.
//! Independent calls may safely run on separate threads.

mod assigner;
mod generator;
mod invariants;
mod plan;
mod throughput;
mod tree;
mod weight;

pub use assigner::{assign, Assignments, RadioAssignment};
pub use generator::generate;
pub use plan::{Plan, PlanEntry};
pub use throughput::{throughput_mbps, NOISE_FLOOR_DBM};
pub use tree::{Tree, TreeNode};
pub use weight::edge_weight;

use topoplan_model::{PlanError, PlanInput, PlanRequest};

/// Plan a topology for a validated input.
///
/// Runs the generator, the assigner, and a post-condition audit in order,
/// surfacing the first error with full context. Nothing is retried and no
/// partial plan is returned.
pub fn plan(input: &PlanInput) -> Result<Plan, PlanError> {
    let tree = generator::generate(input)?;
    let assignments = assigner::assign(input, &tree)?;
    invariants::check(input, &tree, &assignments)?;
    let plan = Plan::materialise(&tree, &assignments);
    log::info!(
        "planned topology: {} nodes, root {}, depth {}",
        plan.entries.len(),
        tree.root(),
        plan.entries.values().map(|e| e.level).max().unwrap_or(0)
    );
    Ok(plan)
}

/// Validate a wire request and plan a topology for it.
pub fn plan_request(request: PlanRequest) -> Result<Plan, PlanError> {
    let input = request.into_model()?;
    plan(&input)
}
