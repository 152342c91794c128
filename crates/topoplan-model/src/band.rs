//! Frequency bands and channel bandwidths.
//!
//! The planner operates in the two halves of the 6 GHz band. Channel centres
//! are 802.11 channel numbers on the 5 MHz grid, so a channel of width `w`
//! MHz occupies `w / 5` consecutive channel numbers.

use serde::{Deserialize, Serialize};

/// Spacing of the channel-number grid in MHz.
pub const CHANNEL_SPACING_MHZ: u16 = 5;

/// One of the two 6 GHz sub-bands a radio can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    /// Upper 6 GHz sub-band (`6GH`).
    High,
    /// Lower 6 GHz sub-band (`6GL`).
    Low,
}

impl Band {
    /// Both bands, in the order radios are configured (high first).
    pub const ALL: [Band; 2] = [Band::High, Band::Low];

    /// The other sub-band.
    pub fn other(&self) -> Band {
        match self {
            Band::High => Band::Low,
            Band::Low => Band::High,
        }
    }

    /// Long wire label used in capability tables and edge records.
    pub const fn label(&self) -> &'static str {
        match self {
            Band::High => "6GH",
            Band::Low => "6GL",
        }
    }

    /// Single-letter label used in plan output (`"H"` / `"L"`).
    pub const fn short_label(&self) -> &'static str {
        match self {
            Band::High => "H",
            Band::Low => "L",
        }
    }

    /// Parse the single-letter output label.
    pub fn from_short_label(s: &str) -> Option<Band> {
        match s {
            "H" => Some(Band::High),
            "L" => Some(Band::Low),
            _ => None,
        }
    }

    /// Index into per-band storage.
    pub(crate) const fn index(&self) -> usize {
        match self {
            Band::High => 0,
            Band::Low => 1,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Channel bandwidth in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bandwidth {
    /// 20 MHz.
    Mhz20,
    /// 40 MHz.
    Mhz40,
    /// 80 MHz.
    Mhz80,
    /// 160 MHz.
    Mhz160,
}

impl Bandwidth {
    /// All bandwidths, widest first: the order the assigner tries them.
    pub const DESCENDING: [Bandwidth; 4] = [
        Bandwidth::Mhz160,
        Bandwidth::Mhz80,
        Bandwidth::Mhz40,
        Bandwidth::Mhz20,
    ];

    /// Width in MHz.
    pub const fn mhz(&self) -> u16 {
        match self {
            Bandwidth::Mhz20 => 20,
            Bandwidth::Mhz40 => 40,
            Bandwidth::Mhz80 => 80,
            Bandwidth::Mhz160 => 160,
        }
    }

    /// Wire label used as capability-table key (`"20M"` … `"160M"`).
    pub const fn label(&self) -> &'static str {
        match self {
            Bandwidth::Mhz20 => "20M",
            Bandwidth::Mhz40 => "40M",
            Bandwidth::Mhz80 => "80M",
            Bandwidth::Mhz160 => "160M",
        }
    }

    /// Parse a wire label.
    pub fn from_label(s: &str) -> Option<Bandwidth> {
        match s {
            "20M" => Some(Bandwidth::Mhz20),
            "40M" => Some(Bandwidth::Mhz40),
            "80M" => Some(Bandwidth::Mhz80),
            "160M" => Some(Bandwidth::Mhz160),
            _ => None,
        }
    }

    /// Index into per-bandwidth storage.
    pub(crate) const fn index(&self) -> usize {
        match self {
            Bandwidth::Mhz20 => 0,
            Bandwidth::Mhz40 => 1,
            Bandwidth::Mhz80 => 2,
            Bandwidth::Mhz160 => 3,
        }
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether two channels on the same band occupy intersecting spectrum.
///
/// Computed on the frequency intervals implied by the channel-number grid.
/// Adjacent channels whose interval edges touch do not overlap: 80 MHz
/// centres 135 and 151 abut at channel 143 but occupy disjoint spectrum.
pub fn channels_overlap(centre_a: u16, width_a: Bandwidth, centre_b: u16, width_b: Bandwidth) -> bool {
    // Work in doubled MHz so half-widths stay integral.
    let (lo_a, hi_a) = interval_2mhz(centre_a, width_a);
    let (lo_b, hi_b) = interval_2mhz(centre_b, width_b);
    lo_a < hi_b && lo_b < hi_a
}

fn interval_2mhz(centre: u16, width: Bandwidth) -> (i32, i32) {
    let mid = centre as i32 * CHANNEL_SPACING_MHZ as i32 * 2;
    let half = width.mhz() as i32;
    (mid - half, mid + half)
}
