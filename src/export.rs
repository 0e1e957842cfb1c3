//! Exports for recognized packets
//!
//! Two compact forms besides the report: a packed hex string of the first
//! repetition's thresholded bits, and a playback listing of raw packet
//! durations consumed by the transmitter firmware. Both address the
//! in-memory stream by the packet's edge range; nothing re-reads the
//! capture file.

use crate::analysis::segment::REPETITION_GAP_S;
use crate::analysis::PacketAnalysis;
use crate::capture::SampleStream;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const US_PER_S: f64 = 1_000_000.0;

/// Pack 0/1 bit values MSB-first into a lowercase `0x`-prefixed hex string
///
/// The sequence is zero-padded on the right to a whole number of nibbles;
/// an empty sequence renders as `0x0`.
pub fn bits_to_hex(bits: &[u8]) -> String {
    if bits.is_empty() {
        return "0x0".to_string();
    }

    let mut out = String::from("0x");
    for chunk in bits.chunks(4) {
        let mut nibble: u8 = 0;
        for (j, &bit) in chunk.iter().enumerate() {
            nibble |= (bit & 1) << (3 - j);
        }
        out.push(b"0123456789abcdef"[nibble as usize] as char);
    }
    out
}

/// Recover the first repetition's 0/1 bit values for one packet
///
/// Requires a recorded header and an available pause profile; packets
/// without either yield no bits. The first repetition ends at the first
/// inter-edge gap over 10 ms past the packet start. Each bit's pause is
/// thresholded against the midpoint of the observed pause bounds: longer
/// pause → 1, else 0. The header's two durations are skipped.
pub fn first_repetition_bits(stream: &SampleStream, packet: &PacketAnalysis) -> Vec<u8> {
    let Some(pause) = packet.timing.pause else {
        return Vec::new();
    };
    if packet.header.is_none() {
        return Vec::new();
    }

    let edges = &stream.edges()[packet.edge_range.clone()];
    let mut end = edges.len();
    for i in 1..edges.len() {
        if edges[i].time - edges[i - 1].time > REPETITION_GAP_S {
            end = i;
            break;
        }
    }
    let edges = &edges[..end];
    if edges.len() < 4 {
        return Vec::new();
    }

    let durations: Vec<f64> = edges
        .windows(2)
        .map(|w| (w[1].time - w[0].time) * US_PER_S)
        .collect();

    let threshold = (pause.min_us + pause.max_us) / 2.0;
    let mut bits = Vec::new();
    let mut i = 2; // past the header pulse and pause
    while i + 1 < durations.len() {
        bits.push(u8::from(durations[i + 1] > threshold));
        i += 2;
    }
    bits
}

/// Write one `<label>\t<hex>` line per recognized packet
pub fn write_hex_lines<W: Write>(
    w: &mut W,
    source_label: &str,
    stream: &SampleStream,
    packets: &[PacketAnalysis],
) -> Result<()> {
    for packet in packets.iter().filter(|p| p.is_recognized()) {
        let hex = bits_to_hex(&first_repetition_bits(stream, packet));
        writeln!(w, "{}\t{}", source_label, hex)?;
    }
    Ok(())
}

/// Write the playback listing of all recognized packets
///
/// One tuple per packet: the source file stem followed by the packet's raw
/// inter-edge durations in whole microseconds, with the trailing duration
/// omitted (it would encode an unbounded terminal pause). Returns the
/// number of packets written.
pub fn write_listing<W: Write>(
    w: &mut W,
    source: &Path,
    stream: &SampleStream,
    packets: &[PacketAnalysis],
) -> Result<usize> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    writeln!(
        w,
        "# Recognized IR packets extracted from CSV file {}",
        source.display()
    )?;
    writeln!(w, "# Format: list of (basename, pulse_duration, pause_duration, ...)")?;
    writeln!(w, "# All durations in microseconds")?;
    writeln!(w)?;
    writeln!(w, "recognized_packets = [")?;

    let mut written = 0;
    for packet in packets.iter().filter(|p| p.is_recognized()) {
        let Some(first_match) = packet.matches.first() else {
            continue;
        };
        writeln!(
            w,
            "    # Packet {} (start time: {:.6}s) - {} protocol",
            packet.packet, packet.start_time, first_match.name
        )?;

        let durations = packet_durations_us(stream, packet);
        let mut tuple = format!("    ('{}'", stem);
        if let Some((_, rest)) = durations.split_last() {
            for d in rest {
                tuple.push_str(&format!(", {}", d));
            }
        }
        tuple.push_str("),");
        writeln!(w, "{}", tuple)?;
        written += 1;
    }

    writeln!(w, "]")?;
    Ok(written)
}

/// Write the playback listing to a file
///
/// When no packet was recognized, nothing is created and 0 is returned.
pub fn export_listing(
    path: &Path,
    source: &Path,
    stream: &SampleStream,
    packets: &[PacketAnalysis],
) -> Result<usize> {
    if !packets.iter().any(|p| p.is_recognized()) {
        return Ok(0);
    }
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_listing(&mut writer, source, stream, packets)?;
    writer.flush()?;
    Ok(written)
}

/// Whole-microsecond inter-edge durations over a packet's full edge span
///
/// Fractions are truncated, matching the integer durations the playback
/// firmware expects.
fn packet_durations_us(stream: &SampleStream, packet: &PacketAnalysis) -> Vec<i64> {
    stream.edges()[packet.edge_range.clone()]
        .windows(2)
        .map(|w| ((w[1].time - w[0].time) * US_PER_S) as i64)
        .collect()
}
