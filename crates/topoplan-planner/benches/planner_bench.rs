//! Planner throughput benchmark over synthetic meshes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use topoplan_model::PlanRequest;
use topoplan_planner::plan_request;

fn full_node(load: f64) -> serde_json::Value {
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

/// A corridor-shaped mesh: node i hears its predecessor well and the node
/// two back only faintly (below both the backhaul floor and the
/// interference floor), so the tree is a long chain with heavy channel
/// reuse along it.
fn ladder_request(n: usize) -> PlanRequest {
    let mut nodes = serde_json::Map::new();
    let mut edges = serde_json::Map::new();
    for i in 0..n {
        let load = if i == 0 { 500.0 } else { 10.0 + (i % 7) as f64 };
        nodes.insert(format!("N{i:03}"), full_node(load));
        if i >= 1 {
            let j = i - 1;
            edges.insert(
                format!("N{j:03}_N{i:03}"),
                json!({ "rssi_6gh": [-58, -59], "rssi_6gl": [-64, -65] }),
            );
        }
        if i >= 2 {
            let j = i - 2;
            edges.insert(
                format!("N{j:03}_N{i:03}"),
                json!({ "rssi_6gh": [-88, -89], "rssi_6gl": [-90, -91] }),
            );
        }
    }
    serde_json::from_value(json!({
        "nodes": nodes,
        "edges": edges,
        "config": { "MAX_HOP": 256, "MAX_DEGREE": 4 }
    }))
    .unwrap()
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    for n in [10, 50, 100] {
        let request = ladder_request(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &request, |b, req| {
            b.iter(|| plan_request(req.clone()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
