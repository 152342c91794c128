//! Mesh node descriptions and radio capability tables.

use crate::band::{Band, Bandwidth};

/// A channel a radio can operate, with its regulatory power ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCap {
    /// Channel centre (802.11 channel number).
    pub centre: u16,
    /// Maximum EIRP in dBm when operating this channel at this width.
    pub max_eirp: i16,
}

/// Per-band, per-bandwidth menu of operable channels.
///
/// Stored as a fixed `Band x Bandwidth` grid so lookups after parsing are
/// array indexing, not string-keyed map walks. Cell order follows the wire
/// declaration order, which the assigner preserves when scanning candidates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapabilityTable {
    cells: [[Vec<ChannelCap>; 4]; 2],
}

impl CapabilityTable {
    /// Empty table; populate with [`CapabilityTable::set`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the channel list for one `(band, bandwidth)` cell.
    pub fn set(&mut self, band: Band, bw: Bandwidth, caps: Vec<ChannelCap>) {
        self.cells[band.index()][bw.index()] = caps;
    }

    /// Channels operable at the given band and width, in declaration order.
    pub fn caps(&self, band: Band, bw: Bandwidth) -> &[ChannelCap] {
        &self.cells[band.index()][bw.index()]
    }

    /// True when no cell holds any channel.
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// True when the band has at least one operable channel at the width.
    pub fn supports(&self, band: Band, bw: Bandwidth) -> bool {
        !self.caps(band, bw).is_empty()
    }

    /// Look up the capability entry for an exact `(band, width, centre)`.
    pub fn find(&self, band: Band, bw: Bandwidth, centre: u16) -> Option<ChannelCap> {
        self.caps(band, bw).iter().copied().find(|c| c.centre == centre)
    }

    /// Widest bandwidth in `band` that both this table and `other` support.
    pub fn widest_shared(&self, band: Band, other: &CapabilityTable) -> Option<Bandwidth> {
        Bandwidth::DESCENDING
            .into_iter()
            .find(|&bw| self.supports(band, bw) && other.supports(band, bw))
    }
}

/// A candidate mesh node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// GPS position in degrees (latitude, longitude).
    pub gps: (f64, f64),
    /// Offered load in Mbps.
    pub load: f64,
    /// Channels and EIRP ceilings this node can operate.
    pub capabilities: CapabilityTable,
}
