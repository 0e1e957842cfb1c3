//! Analysis result types

use crate::protocols::ProtocolMatch;
use std::ops::Range;

/// One decoded timing bit: an active burst and the quiet gap after it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bit {
    /// Active burst duration in microseconds
    pub pulse_us: f64,
    /// Following quiet duration in microseconds; `None` only for a
    /// repetition's last bit when the capture ended mid-space
    pub pause_us: Option<f64>,
}

/// A leading pulse/pause pair consumed from a repetition before its data bits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderMarker {
    /// Header burst duration in microseconds
    pub pulse_us: f64,
    /// Header quiet duration in microseconds
    pub pause_us: f64,
}

/// Inclusive min/max over a set of observed durations, in microseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_us: f64,
    pub max_us: f64,
}

/// Observed pulse/pause bounds from a packet's first repetition
///
/// Either side may independently be unavailable: a repetition with no
/// decodable bits has neither, and one whose every pause was cut off by the
/// end of the capture has pulse bounds only. Protocol matching requires both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingProfile {
    pub pulse: Option<Bounds>,
    pub pause: Option<Bounds>,
}

impl TimingProfile {
    /// Whether both pulse and pause bounds were observed
    pub fn is_available(&self) -> bool {
        self.pulse.is_some() && self.pause.is_some()
    }
}

/// Full analysis of one packet (one button-press transmission)
#[derive(Debug, Clone)]
pub struct PacketAnalysis {
    /// 1-based packet number within the capture. Numbering counts packets
    /// that were later dropped for having too few edges, so it stays stable
    /// when the drop policy changes.
    pub packet: usize,
    /// Timestamp of the packet's first edge, in seconds
    pub start_time: f64,
    /// The packet's edge span within the source stream
    pub edge_range: Range<usize>,
    /// Number of repeated frames, including the first
    pub repetitions: usize,
    /// Gap preceding each repetition after the first, in microseconds
    pub repetition_spacings_us: Vec<f64>,
    /// Header of the first repetition, when one was detected
    pub header: Option<HeaderMarker>,
    /// Decoded bit count of every repetition, in order
    pub bits_per_repetition: Vec<usize>,
    /// Bit count of the first repetition
    pub first_rep_bits: usize,
    /// Bit count summed over all repetitions
    pub total_bits: usize,
    /// Pulse/pause bounds of the first repetition
    pub timing: TimingProfile,
    /// Protocols whose reference timings are compatible, in table order
    pub matches: Vec<ProtocolMatch>,
}

impl PacketAnalysis {
    /// Whether at least one protocol matched this packet
    pub fn is_recognized(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Names of the matched protocols, in table order
    pub fn protocol_names(&self) -> Vec<&'static str> {
        self.matches.iter().map(|m| m.name).collect()
    }
}
