//! Archival of successful plans as dated JSON files.

use std::path::{Path, PathBuf};

use chrono::Local;

/// Write the response JSON to `topology_<N>nodes_<YYYYMMDD>_<HHMMSS>.json`
/// under `dir`, creating the directory if needed. Returns the path written.
///
/// Archival is best-effort bookkeeping: callers log a failure and carry on
/// serving the response.
pub fn save_plan_result(dir: &Path, node_count: usize, body: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("topology_{node_count}nodes_{timestamp}.json"));
    std::fs::write(&path, body)?;
    Ok(path)
}
