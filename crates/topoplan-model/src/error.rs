//! Planner failure kinds.

use serde_json::{json, Value};
use thiserror::Error;

/// Everything that can go wrong while planning a topology.
///
/// The four kinds are disjoint: a request fails with exactly one of them,
/// reported once at the site of detection with the context a caller needs
/// to act on it. There is no internal retry or partial result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    /// A semantic check on the input record failed.
    #[error("invalid input: {field} = {value} ({requirement})")]
    InvalidInput {
        /// The offending field, dotted-path style.
        field: String,
        /// The value that failed the check, rendered as text.
        value: String,
        /// What the field was required to satisfy.
        requirement: String,
    },

    /// The growth loop ran out of eligible attachments with nodes left over.
    #[error("topology unreachable: {} node(s) cannot be attached: {}", unreachable.len(), unreachable.join(", "))]
    TopologyUnreachable {
        /// IDs of the nodes that could not be connected, sorted.
        unreachable: Vec<String>,
        /// How many nodes had been attached when the loop stalled.
        attached: usize,
    },

    /// A node exhausted every candidate channel in a band it must operate.
    #[error("channel assignment failed for node {node} in band {band}")]
    ChannelAssignment {
        /// The node that could not be assigned.
        node: String,
        /// Band label (`6GH` / `6GL`).
        band: String,
        /// Channel centres that were tried, in attempt order.
        attempted: Vec<u16>,
        /// Assigned nodes whose channels blocked every candidate, sorted.
        conflicts: Vec<String>,
    },

    /// A post-condition audit of the finished plan found an inconsistency.
    #[error("internal invariant violated: {description}")]
    InternalInvariant {
        /// What the audit found.
        description: String,
    },
}

impl PlanError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "InvalidInput",
            PlanError::TopologyUnreachable { .. } => "TopologyUnreachable",
            PlanError::ChannelAssignment { .. } => "ChannelAssignment",
            PlanError::InternalInvariant { .. } => "InternalInvariant",
        }
    }

    /// Structured detail object for the wire error record.
    pub fn details(&self) -> Value {
        match self {
            PlanError::InvalidInput { field, value, requirement } => json!({
                "field": field,
                "value": value,
                "requirement": requirement,
            }),
            PlanError::TopologyUnreachable { unreachable, attached } => json!({
                "unreachable": unreachable,
                "attached": attached,
            }),
            PlanError::ChannelAssignment { node, band, attempted, conflicts } => json!({
                "node": node,
                "band": band,
                "attempted": attempted,
                "conflicts": conflicts,
            }),
            PlanError::InternalInvariant { description } => json!({
                "description": description,
            }),
        }
    }
}
