//! Waveform CSV assembly.
//!
//! The instrument hands back one ASCII point list per channel; this module
//! merges them into a single CSV table with one column per channel and a
//! header row of channel names. Point values are passed through verbatim —
//! the scope already formats them as scientific-notation voltages.

use crate::instrument::Channel;

/// The captured points of one displayed channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelData {
    pub channel: Channel,
    pub points: Vec<String>,
}

impl ChannelData {
    #[must_use]
    pub fn new(channel: Channel, points: Vec<String>) -> Self {
        Self { channel, points }
    }
}

/// Merge per-channel point lists into a CSV table.
///
/// Channels with fewer points than the longest one pad their column with
/// empty cells, so ragged captures (MATH versus 1200-point channels) still
/// produce a rectangular table.
#[must_use]
pub fn to_csv(channels: &[ChannelData]) -> String {
    if channels.is_empty() {
        return String::new();
    }

    let rows = channels.iter().map(|c| c.points.len()).max().unwrap_or(0);
    let mut csv = String::new();

    let header: Vec<&str> = channels.iter().map(|c| c.channel.scpi_name()).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for row in 0..rows {
        let cells: Vec<&str> = channels
            .iter()
            .map(|c| c.points.get(row).map_or("", String::as_str))
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}
