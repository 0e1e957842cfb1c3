//! Human-readable analysis report
//!
//! Renders one summary block per packet: matched protocols and their header
//! timing deviations, the detected header, repetition structure, bit counts
//! and the first repetition's timing bounds. Formatting keeps microsecond
//! values free of trailing zeros and variations signed.

use crate::analysis::PacketAnalysis;
use crate::Result;
use std::io::Write;

const RULE_WIDTH: usize = 100;

/// Format a microsecond value without trailing decimal zeros
pub fn format_us(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}µs", value as i64);
    }
    let rounded = format!("{:.1}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{}µs", trimmed)
}

/// Format an optional microsecond value; absent values render as `N/A`
pub fn format_us_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_us)
}

/// Format a signed variation percentage; absent values render as `N/A`
pub fn format_variation(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) => format!("{:+.1}%", v).replace(".0%", "%"),
    }
}

/// Render the full report
///
/// With `unknown_only` set, only packets without a protocol match are
/// shown. Returns `false` when the filter left nothing to show — the run
/// ends there, mirroring the interactive workflow of triaging unknowns.
pub fn render_report<W: Write>(
    w: &mut W,
    packets: &[PacketAnalysis],
    variation_pct: u32,
    unknown_only: bool,
) -> Result<bool> {
    writeln!(
        w,
        "Found {} packets in the signal (max allowed variation: {}%)",
        packets.len(),
        variation_pct
    )?;
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;

    let display: Vec<&PacketAnalysis> = if unknown_only {
        packets.iter().filter(|p| !p.is_recognized()).collect()
    } else {
        packets.iter().collect()
    };

    if unknown_only {
        if display.is_empty() {
            writeln!(w, "No unidentified packets found.")?;
            return Ok(false);
        }
        writeln!(
            w,
            "Showing only unidentified packets ({} of {})",
            display.len(),
            packets.len()
        )?;
        writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;
    }

    for packet in display {
        render_packet(w, packet)?;
        writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;
    }

    Ok(true)
}

fn render_packet<W: Write>(w: &mut W, packet: &PacketAnalysis) -> Result<()> {
    writeln!(
        w,
        "Packet {} (start time: {:.6}s):",
        packet.packet, packet.start_time
    )?;

    if packet.is_recognized() {
        writeln!(
            w,
            "  Possible protocols: {}",
            packet.protocol_names().join(", ")
        )?;
        writeln!(w, "  Protocol variations:")?;
        for m in &packet.matches {
            writeln!(
                w,
                "    {}: pulse {}, pause {}, avg {}",
                m.name,
                format_variation(m.variation.pulse_pct),
                format_variation(m.variation.pause_pct),
                format_variation(m.variation.avg_pct)
            )?;
        }
    } else {
        writeln!(w, "  Protocol: UNKNOWN")?;
    }

    if let Some(header) = packet.header {
        writeln!(
            w,
            "  Header: Pulse = {}, Pause = {}",
            format_us(header.pulse_us),
            format_us(header.pause_us)
        )?;
    }

    if packet.repetitions > 1 {
        writeln!(w, "  Repetitions: {}", packet.repetitions)?;
        let spacings: Vec<String> = packet
            .repetition_spacings_us
            .iter()
            .map(|&s| format_us(s).trim_end_matches("µs").to_string())
            .collect();
        writeln!(w, "  Repetition spacings: [{}]µs", spacings.join(", "))?;
        writeln!(w, "  Bits per repetition: {:?}", packet.bits_per_repetition)?;
    }

    writeln!(w, "  First repetition bits: {}", packet.first_rep_bits)?;
    writeln!(w, "  Total bits: {}", packet.total_bits)?;
    writeln!(
        w,
        "  First repetition timing: Pulse (min={}, max={}), Pause (min={}, max={})",
        format_us_opt(packet.timing.pulse.map(|b| b.min_us)),
        format_us_opt(packet.timing.pulse.map(|b| b.max_us)),
        format_us_opt(packet.timing.pause.map(|b| b.min_us)),
        format_us_opt(packet.timing.pause.map(|b| b.max_us))
    )?;

    Ok(())
}
