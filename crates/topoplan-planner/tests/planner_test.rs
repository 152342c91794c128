//! End-to-end planning scenarios.
//!
//! Each test drives the full pipeline (wire request, validation, tree
//! growth, channel assignment) through [`topoplan_planner::plan_request`]
//! and checks the resulting plan record (or typed failure) against the
//! planner's documented behaviour.

use serde_json::{json, Value};
use topoplan_model::{PlanError, PlanRequest};
use topoplan_planner::plan_request;

// ============================================================================
// Request Builders
// ============================================================================

/// A node with a representative dual-band capability table: one 160 MHz
/// channel per band plus 80 MHz fallbacks, the last of which sits clear of
/// the 160 MHz channel's spectrum.
fn full_node(load: f64) -> Value {
    json!({
        "gps": [30.0, 120.0],
        "load": load,
        "channels": {
            "6GH": { "160M": [143], "80M": [135, 151, 167] },
            "6GL": { "160M": [15], "80M": [7, 39, 55] }
        },
        "maxEirp": {
            "6GH": { "160M": [36], "80M": [33, 33, 33] },
            "6GL": { "160M": [30], "80M": [27, 27, 27] }
        }
    })
}

fn edge(high: [i64; 2], low: [i64; 2]) -> Value {
    json!({ "rssi_6gh": high, "rssi_6gl": low })
}

fn request(nodes: Value, edges: Value) -> PlanRequest {
    serde_json::from_value(json!({ "nodes": nodes, "edges": edges })).unwrap()
}

// ============================================================================
// Scenario: Two-Node Chain
// ============================================================================

#[test]
fn test_two_node_chain() {
    let req = request(
        json!({ "A": full_node(100.0), "B": full_node(50.0) }),
        json!({ "A_B": edge([-60, -62], [-55, -57]) }),
    );
    let plan = plan_request(req).unwrap();

    let a = &plan.entries["A"];
    assert_eq!(a.parent, None);
    assert_eq!(a.backhaul_band, None);
    assert_eq!(a.level, 0);
    // Root serves both bands at the widest width.
    assert_eq!(a.channel, vec![143, 15]);
    assert_eq!(a.bandwidth, vec![160, 160]);
    assert_eq!(a.max_eirp, vec![36, 30]);

    // The low band wins the backhaul: its weaker direction (-57) beats the
    // high band's (-62).
    let b = &plan.entries["B"];
    assert_eq!(b.parent.as_deref(), Some("A"));
    assert_eq!(b.backhaul_band.as_deref(), Some("L"));
    assert_eq!(b.level, 1);
    // A leaf runs one radio, sharing its parent's low channel.
    assert_eq!(b.channel, vec![15]);
    assert_eq!(b.bandwidth, vec![160]);
    assert_eq!(b.max_eirp, vec![30]);
}

// ============================================================================
// Scenario: Degree Cap
// ============================================================================

/// Five nodes all in range of the root; with MAX_DEGREE = 3 the fourth
/// satellite must attach beneath a sibling, chosen deterministically.
fn degree_cap_request() -> PlanRequest {
    request(
        json!({
            "R": full_node(500.0),
            "A": full_node(10.0),
            "B": full_node(10.0),
            "C": full_node(10.0),
            "D": full_node(10.0),
        }),
        json!({
            "R_A": edge([-55, -55], [-65, -65]),
            "R_B": edge([-55, -55], [-65, -65]),
            "R_C": edge([-55, -55], [-65, -65]),
            "R_D": edge([-55, -55], [-65, -65]),
            // D's onward options once the root saturates: low band only.
            "A_D": edge([-75, -75], [-58, -58]),
            "B_D": edge([-75, -75], [-58, -58]),
        }),
    )
}

#[test]
fn test_degree_cap_spills_fourth_child() {
    let plan = plan_request(degree_cap_request()).unwrap();

    for id in ["A", "B", "C"] {
        assert_eq!(plan.entries[id].parent.as_deref(), Some("R"), "{id} under root");
        assert_eq!(plan.entries[id].level, 1);
    }
    // Equal-weight candidates settle on the lexicographically first parent.
    let d = &plan.entries["D"];
    assert_eq!(d.parent.as_deref(), Some("A"));
    assert_eq!(d.level, 2);
    assert_eq!(d.backhaul_band.as_deref(), Some("L"));

    // A became internal, so it runs both bands; its downstream low radio
    // had to clear the root's 160 MHz low channel.
    let a = &plan.entries["A"];
    assert_eq!(a.channel, vec![143, 39]);
    assert_eq!(a.bandwidth, vec![160, 80]);
    // D shares A's downstream low channel.
    assert_eq!(d.channel, vec![39]);
    assert_eq!(d.bandwidth, vec![80]);
}

// ============================================================================
// Scenario: Hop Cap
// ============================================================================

#[test]
fn test_hop_cap_strands_chain_tail() {
    // Eleven nodes in a line; MAX_HOP = 5 reaches N05, stranding the rest.
    let ids: Vec<String> = (0..11).map(|i| format!("N{i:02}")).collect();
    let mut nodes = serde_json::Map::new();
    for (i, id) in ids.iter().enumerate() {
        let load = if i == 0 { 100.0 } else { 10.0 };
        nodes.insert(id.clone(), full_node(load));
    }
    let mut edges = serde_json::Map::new();
    for pair in ids.windows(2) {
        edges.insert(
            format!("{}_{}", pair[0], pair[1]),
            edge([-60, -60], [-70, -70]),
        );
    }
    let req = request(Value::Object(nodes), Value::Object(edges));

    let err = plan_request(req).unwrap_err();
    match err {
        PlanError::TopologyUnreachable { unreachable, attached } => {
            assert_eq!(unreachable, vec!["N06", "N07", "N08", "N09", "N10"]);
            assert_eq!(attached, 6);
        }
        other => panic!("expected TopologyUnreachable, got {other:?}"),
    }
}

// ============================================================================
// Scenario: Channel Reuse Across Distance
// ============================================================================

#[test]
fn test_distant_clusters_reuse_wide_channel() {
    // Two three-node clusters bridged by a low-band link whose high-band
    // RSSI is below the interference floor. Unmeasured cross-cluster pairs
    // never conflict, so both cluster heads can run the same 160 MHz high
    // channel.
    let req = request(
        json!({
            "A1": full_node(300.0), "A2": full_node(10.0), "A3": full_node(10.0),
            "B1": full_node(50.0),  "B2": full_node(10.0), "B3": full_node(10.0),
        }),
        json!({
            "A1_A2": edge([-55, -55], [-60, -60]),
            "A1_A3": edge([-55, -55], [-60, -60]),
            "A2_A3": edge([-58, -58], [-62, -62]),
            "A1_B1": edge([-92, -91], [-60, -62]),
            "B1_B2": edge([-55, -55], [-60, -60]),
            "B1_B3": edge([-55, -55], [-60, -60]),
            "B2_B3": edge([-58, -58], [-62, -62]),
        }),
    );
    let plan = plan_request(req).unwrap();

    // B1 joins over the low band (its high-band RSSI is under the backhaul
    // floor) and heads the second cluster.
    let b1 = &plan.entries["B1"];
    assert_eq!(b1.parent.as_deref(), Some("A1"));
    assert_eq!(b1.backhaul_band.as_deref(), Some("L"));
    assert_eq!(plan.entries["B2"].parent.as_deref(), Some("B1"));
    assert_eq!(plan.entries["B3"].parent.as_deref(), Some("B1"));

    // Both cluster heads operate the same 160 MHz high-band channel.
    let a1 = &plan.entries["A1"];
    assert_eq!(a1.channel[0], 143);
    assert_eq!(a1.bandwidth[0], 160);
    assert_eq!(b1.channel[0], 143);
    assert_eq!(b1.bandwidth[0], 160);
}

// ============================================================================
// Scenario: Forced Bandwidth Step-Down
// ============================================================================

#[test]
fn test_dense_cluster_steps_down_to_80mhz() {
    // Everyone near the root hears everyone else loudly, so the single
    // 160 MHz low channel cannot be reused and downstream low radios must
    // retreat to 80 MHz.
    let req = request(
        json!({
            "R": full_node(300.0),
            "A": full_node(50.0), "B": full_node(50.0), "C": full_node(10.0),
            "D": full_node(10.0), "E": full_node(10.0),
        }),
        json!({
            "R_A": edge([-55, -55], [-60, -60]),
            "R_B": edge([-55, -55], [-60, -60]),
            "R_C": edge([-55, -55], [-60, -60]),
            "A_B": edge([-58, -58], [-61, -61]),
            "A_C": edge([-59, -59], [-63, -63]),
            "B_C": edge([-59, -59], [-63, -63]),
            "A_D": edge([-80, -80], [-58, -58]),
            "B_E": edge([-80, -80], [-58, -58]),
        }),
    );
    let plan = plan_request(req).unwrap();

    // A and B each pick up a low-band child and serve it at 80 MHz: the
    // 160 MHz low centre conflicts with the root, and the first 80 MHz
    // centre sits inside the root's 160 MHz channel.
    let a = &plan.entries["A"];
    assert_eq!(a.channel, vec![143, 39]);
    assert_eq!(a.bandwidth, vec![160, 80]);
    let b = &plan.entries["B"];
    assert_eq!(b.channel, vec![143, 55]);
    assert_eq!(b.bandwidth, vec![160, 80]);

    assert_eq!(plan.entries["D"].channel, vec![39]);
    assert_eq!(plan.entries["E"].channel, vec![55]);
}

// ============================================================================
// Boundary Behaviours
// ============================================================================

#[test]
fn test_single_node_plan() {
    let req = request(json!({ "S": full_node(5.0) }), json!({}));
    let plan = plan_request(req).unwrap();

    assert_eq!(plan.entries.len(), 1);
    let s = &plan.entries["S"];
    assert_eq!(s.parent, None);
    assert_eq!(s.level, 0);
    assert_eq!(s.channel, vec![143, 15]);
    assert_eq!(s.bandwidth, vec![160, 160]);
}

#[test]
fn test_edge_below_threshold_everywhere_is_unreachable() {
    let req = request(
        json!({ "A": full_node(100.0), "B": full_node(50.0) }),
        json!({ "A_B": edge([-80, -80], [-75, -75]) }),
    );
    let err = plan_request(req).unwrap_err();
    match err {
        PlanError::TopologyUnreachable { unreachable, attached } => {
            assert_eq!(unreachable, vec!["B"]);
            assert_eq!(attached, 1);
        }
        other => panic!("expected TopologyUnreachable, got {other:?}"),
    }
}

#[test]
fn test_root_without_low_band_channels_fails_assignment() {
    // The root must serve both bands; this one has nothing in the low band.
    let high_only = json!({
        "gps": [30.0, 120.0],
        "load": 100.0,
        "channels": { "6GH": { "160M": [143], "80M": [135] } },
        "maxEirp": { "6GH": { "160M": [36], "80M": [33] } }
    });
    let req = request(
        json!({ "A": high_only, "B": full_node(50.0) }),
        json!({ "A_B": edge([-60, -60], [-60, -60]) }),
    );
    let err = plan_request(req).unwrap_err();
    match err {
        PlanError::ChannelAssignment { node, band, attempted, conflicts } => {
            assert_eq!(node, "A");
            assert_eq!(band, "6GL");
            assert!(attempted.is_empty());
            assert!(conflicts.is_empty());
        }
        other => panic!("expected ChannelAssignment, got {other:?}"),
    }
}

#[test]
fn test_invalid_input_reported_with_field() {
    let req = request(
        json!({ "A": full_node(100.0) }),
        json!({ "A_Z": edge([-60, -60], [-60, -60]) }),
    );
    let err = plan_request(req).unwrap_err();
    match err {
        PlanError::InvalidInput { field, .. } => assert_eq!(field, "edges.A_Z"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ============================================================================
// Output Record Round-Trip
// ============================================================================

#[test]
fn test_output_json_roundtrip() {
    let plan = plan_request(degree_cap_request()).unwrap();
    let emitted = serde_json::to_string(&plan).unwrap();
    let reparsed: Value = serde_json::from_str(&emitted).unwrap();
    assert_eq!(serde_json::to_string(&reparsed).unwrap(), emitted);
}
