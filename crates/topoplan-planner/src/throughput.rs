//! Modelled link throughput from RSSI and channel width.

use topoplan_model::Bandwidth;

/// Receiver noise floor in dBm the SNR is computed against.
///
/// A single fixed figure for all widths; only the monotonicity of the
/// resulting curve is observable through the planner, not its absolute
/// calibration.
pub const NOISE_FLOOR_DBM: f64 = -95.0;

/// Shannon-style capacity estimate in Mbps for a link heard at `rssi_dbm`
/// operating a channel of the given width.
///
/// Strictly increasing in RSSI and in width; an RSSI at or below the noise
/// floor still yields a small positive capacity, which keeps the weight
/// ordering smooth near the floor.
pub fn throughput_mbps(rssi_dbm: f64, bandwidth: Bandwidth) -> f64 {
    let snr_db = rssi_dbm - NOISE_FLOOR_DBM;
    let snr_linear = 10f64.powf(snr_db / 10.0);
    bandwidth.mhz() as f64 * (1.0 + snr_linear).log2()
}
