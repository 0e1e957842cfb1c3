//! Packet analysis pipeline
//!
//! Drives the full segmentation–extraction–matching chain over a loaded
//! capture:
//!
//! 1. split the stream into packets, and each packet into repetitions
//! 2. classify headers and extract (pulse, pause) bits per repetition
//! 3. compute the first repetition's timing profile
//! 4. match the profile (and header, when present) against the protocol table
//!
//! Each call is a pure function of the stream and the tolerance; nothing is
//! cached between calls.

pub mod bits;
pub mod segment;
pub mod types;

pub use types::{Bit, Bounds, HeaderMarker, PacketAnalysis, TimingProfile};

use crate::capture::SampleStream;
use crate::protocols::{match_protocols, ProtocolDescriptor, IR_PROTOCOLS};
use tracing::debug;

/// Analyze a capture against the built-in protocol table
///
/// `tolerance` is the allowed timing deviation as a fraction of each
/// reference value (0.25 = ±25%).
pub fn analyze(stream: &SampleStream, tolerance: f64) -> Vec<PacketAnalysis> {
    analyze_with_table(stream, IR_PROTOCOLS, tolerance)
}

/// Analyze a capture against a caller-provided protocol table
pub fn analyze_with_table(
    stream: &SampleStream,
    table: &[ProtocolDescriptor],
    tolerance: f64,
) -> Vec<PacketAnalysis> {
    let edges = stream.edges();
    let mut results = Vec::new();

    for (n, range) in segment::packet_ranges(edges).into_iter().enumerate() {
        if range.len() < segment::MIN_PACKET_EDGES {
            debug!(
                "Dropping packet {} with only {} edges",
                n + 1,
                range.len()
            );
            continue;
        }

        let packet_edges = &edges[range.clone()];
        let split = segment::repetition_splits(packet_edges);
        let rep_ranges = split.ranges(packet_edges.len());

        let mut header: Option<HeaderMarker> = None;
        let mut first_rep_bits: Vec<Bit> = Vec::new();
        let mut bits_per_repetition = Vec::with_capacity(rep_ranges.len());

        for (j, rep_range) in rep_ranges.iter().enumerate() {
            let rep = &packet_edges[rep_range.clone()];
            let rep_header = bits::detect_header(rep);
            let rep_bits = bits::extract_bits(rep, rep_header.is_some());
            bits_per_repetition.push(rep_bits.len());
            if j == 0 {
                header = rep_header;
                first_rep_bits = rep_bits;
            }
        }

        let timing = bits::timing_profile(&first_rep_bits);
        let matches = match (timing.pulse, timing.pause) {
            (Some(pulse), Some(pause)) => {
                match_protocols(table, pulse, pause, header, tolerance)
            }
            // Timing not available: matching is skipped entirely
            _ => Vec::new(),
        };

        debug!(
            "Packet {}: {} repetitions, {} bits, {} protocol matches",
            n + 1,
            rep_ranges.len(),
            bits_per_repetition.iter().sum::<usize>(),
            matches.len()
        );

        results.push(PacketAnalysis {
            packet: n + 1,
            start_time: packet_edges[0].time,
            edge_range: range,
            repetitions: rep_ranges.len(),
            repetition_spacings_us: split.spacings_us,
            header,
            first_rep_bits: first_rep_bits.len(),
            total_bits: bits_per_repetition.iter().sum(),
            bits_per_repetition,
            timing,
            matches,
        });
    }

    results
}
