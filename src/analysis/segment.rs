//! Packet and repetition segmentation
//!
//! A capture holds several independent transmissions (packets), each of
//! which may carry several repeated frames (repetitions). Both boundaries
//! are found purely from inter-edge gap lengths:
//!
//! - gap > 100 ms ending on a low edge → new packet
//! - 10 ms < gap < 100 ms ending on a low edge → new repetition
//! - gap ≤ 10 ms → intra-frame pause
//!
//! Segmentation returns index ranges into the stream; no edge data is
//! copied.

use crate::capture::Edge;
use std::ops::Range;
use tracing::{debug, trace};

/// Gap length that separates two packets, in seconds
pub const PACKET_GAP_S: f64 = 0.1;

/// Gap length that separates two repetitions within a packet, in seconds
pub const REPETITION_GAP_S: f64 = 0.01;

/// Packets with fewer edges than this carry less than two bits and are dropped
pub const MIN_PACKET_EDGES: usize = 4;

const US_PER_S: f64 = 1_000_000.0;

/// Split a stream into packet index ranges
///
/// A new packet begins at edge `i` when the gap since edge `i-1` exceeds
/// [`PACKET_GAP_S`] and edge `i` is low. Edge 0 opens packet 0 only if it is
/// low; a capture that starts high leaves its leading edges outside every
/// packet. Ranges below [`MIN_PACKET_EDGES`] are kept here — the caller
/// decides the drop so packet numbering can stay stable.
pub fn packet_ranges(edges: &[Edge]) -> Vec<Range<usize>> {
    let mut starts = Vec::new();

    if edges.first().is_some_and(|e| !e.high) {
        starts.push(0);
    }
    for i in 1..edges.len() {
        if edges[i].time - edges[i - 1].time > PACKET_GAP_S && !edges[i].high {
            starts.push(i);
        }
    }

    let ranges: Vec<Range<usize>> = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(edges.len());
            start..end
        })
        .collect();

    debug!("Found {} packet boundaries", ranges.len());
    ranges
}

/// Repetition boundaries within one packet
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionSplit {
    /// Boundary edge indices, relative to the packet start; always begins
    /// with 0
    pub starts: Vec<usize>,
    /// Gap preceding each boundary after the first, in microseconds
    pub spacings_us: Vec<f64>,
}

impl RepetitionSplit {
    /// Edge ranges of the individual repetitions, relative to the packet
    pub fn ranges(&self, packet_len: usize) -> Vec<Range<usize>> {
        self.starts
            .iter()
            .enumerate()
            .map(|(n, &start)| {
                let end = self.starts.get(n + 1).copied().unwrap_or(packet_len);
                start..end
            })
            .collect()
    }
}

/// Split one packet's edges into repetitions
///
/// A new repetition begins at a low edge preceded by a gap strictly between
/// [`REPETITION_GAP_S`] and [`PACKET_GAP_S`]. Index 0 is always a boundary.
pub fn repetition_splits(edges: &[Edge]) -> RepetitionSplit {
    let mut starts = vec![0];
    let mut spacings_us = Vec::new();

    for j in 1..edges.len() {
        let gap = edges[j].time - edges[j - 1].time;
        if !edges[j].high && gap > REPETITION_GAP_S && gap < PACKET_GAP_S {
            starts.push(j);
            spacings_us.push(gap * US_PER_S);
            trace!("Repetition boundary at edge {} (gap {:.0}µs)", j, gap * US_PER_S);
        }
    }

    RepetitionSplit { starts, spacings_us }
}
