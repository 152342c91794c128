//! # topoplan-model
//!
//! Data model for the mesh topology planner: frequency bands and channel
//! bandwidths, node capability tables, measured link RSSIs, planner
//! configuration, and the wire-format request record with its semantic
//! validation.
//!
//! The types here are deliberately inert: no planning logic, no I/O. Two
//! properties the planner leans on are fixed at this layer:
//!
//! - **Deterministic iteration**: every map whose traversal can influence a
//!   plan is a `BTreeMap`, so walks are in sorted key order.
//! - **No string keys after parsing**: capability tables are a fixed
//!   `Band x Bandwidth` grid; band and bandwidth labels exist only on the
//!   wire.

mod band;
mod config;
mod edge;
mod error;
mod input;
mod node;

pub use band::{channels_overlap, Band, Bandwidth, CHANNEL_SPACING_MHZ};
pub use config::PlannerConfig;
pub use edge::{EdgeInfo, EdgeKey, RssiPair};
pub use error::PlanError;
pub use input::{EdgeSpec, NodeSpec, PlanInput, PlanRequest};
pub use node::{CapabilityTable, ChannelCap, NodeInfo};
