//! Header classification, bit extraction and timing statistics
//!
//! Operates on one repetition's edges at a time. Edges are walked in
//! (low, high) pairs: the low→high span is the IR burst (pulse), the
//! high→low span after it the quiet gap (pause). Many protocols open a
//! frame with a deliberately longer pulse/pause pair — the header — which
//! is detected first and excluded from data-bit extraction.

use super::types::{Bit, Bounds, HeaderMarker, TimingProfile};
use crate::capture::Edge;
use tracing::trace;

const US_PER_S: f64 = 1_000_000.0;

/// Classify a repetition's leading pulse/pause pair as a header
///
/// The first pair is compared against the shortest pulse of the remaining
/// pairs: if either its pulse or its pause is more than twice that minimum,
/// the pair is a header. A repetition too short to have comparison pulses
/// never has a header.
pub fn detect_header(edges: &[Edge]) -> Option<HeaderMarker> {
    if edges.len() < 4 {
        return None;
    }

    let first_pulse = (edges[1].time - edges[0].time) * US_PER_S;
    let first_pause = (edges[2].time - edges[1].time) * US_PER_S;

    let mut min_other: Option<f64> = None;
    let mut k = 2;
    while k + 1 < edges.len() {
        if !edges[k].high && edges[k + 1].high {
            let pulse = (edges[k + 1].time - edges[k].time) * US_PER_S;
            min_other = Some(min_other.map_or(pulse, |m: f64| m.min(pulse)));
        }
        k += 2;
    }

    let min_other = min_other?;
    if first_pulse > 2.0 * min_other || first_pause > 2.0 * min_other {
        trace!(
            "Header detected: pulse {:.0}µs, pause {:.0}µs (min data pulse {:.0}µs)",
            first_pulse,
            first_pause,
            min_other
        );
        Some(HeaderMarker {
            pulse_us: first_pulse,
            pause_us: first_pause,
        })
    } else {
        None
    }
}

/// Extract the ordered (pulse, pause) bits of one repetition
///
/// Walks edges in pairs from the start (or past the two header edges when
/// `skip_header` is set). A pair only counts when it runs low→high; the
/// pause is taken from the following low edge and is absent when the
/// repetition ends mid-space.
pub fn extract_bits(edges: &[Edge], skip_header: bool) -> Vec<Bit> {
    let mut bits = Vec::new();
    let mut k = if skip_header { 2 } else { 0 };

    while k + 1 < edges.len() {
        if !edges[k].high && edges[k + 1].high {
            let pulse_us = (edges[k + 1].time - edges[k].time) * US_PER_S;
            let pause_us = if k + 2 < edges.len() && !edges[k + 2].high {
                Some((edges[k + 2].time - edges[k + 1].time) * US_PER_S)
            } else {
                None
            };
            bits.push(Bit { pulse_us, pause_us });
        }
        k += 2;
    }

    bits
}

/// Compute the min/max pulse and pause bounds over a repetition's bits
///
/// Pause bounds only consider present pauses; a repetition whose every
/// pause was cut off yields pulse bounds alone.
pub fn timing_profile(bits: &[Bit]) -> TimingProfile {
    let mut pulse: Option<Bounds> = None;
    let mut pause: Option<Bounds> = None;

    for bit in bits {
        pulse = Some(fold(pulse, bit.pulse_us));
        if let Some(pause_us) = bit.pause_us {
            pause = Some(fold(pause, pause_us));
        }
    }

    TimingProfile { pulse, pause }
}

fn fold(bounds: Option<Bounds>, value: f64) -> Bounds {
    match bounds {
        None => Bounds {
            min_us: value,
            max_us: value,
        },
        Some(b) => Bounds {
            min_us: b.min_us.min(value),
            max_us: b.max_us.max(value),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(samples: &[(f64, u8)]) -> Vec<Edge> {
        samples
            .iter()
            .map(|&(t, level)| Edge::new(t, level == 1))
            .collect()
    }

    /// An NEC-style repetition: 9000/4500µs header, then 560µs pulses with
    /// 560µs (bit 0) or 1690µs (bit 1) pauses.
    fn nec_repetition() -> Vec<Edge> {
        let mut t = 0.0;
        let mut out = Vec::new();
        let mut push = |t: &mut f64, dur_us: f64, high: bool| {
            out.push(Edge::new(*t, high));
            *t += dur_us / 1e6;
        };
        push(&mut t, 9000.0, false);
        push(&mut t, 4500.0, true);
        for &one in &[false, true, true, false] {
            push(&mut t, 560.0, false);
            push(&mut t, if one { 1690.0 } else { 560.0 }, true);
        }
        out
    }

    #[test]
    fn test_extracts_pulse_and_pause() {
        let edges = edges(&[(0.0, 0), (0.0005, 1), (0.0020, 0), (0.0025, 1)]);
        let bits = extract_bits(&edges, false);
        assert_eq!(bits.len(), 2);
        assert!((bits[0].pulse_us - 500.0).abs() < 1e-6);
        assert!((bits[0].pause_us.unwrap() - 1500.0).abs() < 1e-6);
        // The capture ended mid-space: last pause is absent
        assert!((bits[1].pulse_us - 500.0).abs() < 1e-6);
        assert_eq!(bits[1].pause_us, None);
    }

    #[test]
    fn test_non_alternating_pairs_are_skipped() {
        let edges = edges(&[(0.0, 1), (0.001, 0), (0.002, 1), (0.003, 0)]);
        assert!(extract_bits(&edges, false).is_empty());
    }

    #[test]
    fn test_skip_header_drops_first_pair() {
        let rep = nec_repetition();
        let with_header = extract_bits(&rep, false);
        let without_header = extract_bits(&rep, true);
        assert_eq!(with_header.len(), 5);
        assert_eq!(without_header.len(), 4);
        assert!((without_header[0].pulse_us - 560.0).abs() < 1e-6);
    }

    #[test]
    fn test_detects_nec_style_header() {
        let header = detect_header(&nec_repetition()).unwrap();
        assert!((header.pulse_us - 9000.0).abs() < 1e-6);
        assert!((header.pause_us - 4500.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_train_has_no_header() {
        // All pulses equal: the first pair is ordinary data
        let edges = edges(&[
            (0.0000, 0),
            (0.0005, 1),
            (0.0010, 0),
            (0.0015, 1),
            (0.0020, 0),
            (0.0025, 1),
        ]);
        assert_eq!(detect_header(&edges), None);
    }

    #[test]
    fn test_long_first_pause_alone_is_a_header() {
        // Pulse is ordinary but the pause is far beyond 2x the data pulses
        let edges = edges(&[(0.0, 0), (0.0005, 1), (0.0020, 0), (0.0025, 1), (0.0030, 0)]);
        let header = detect_header(&edges).unwrap();
        assert!((header.pause_us - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn test_short_repetition_has_no_header() {
        let edges = edges(&[(0.0, 0), (0.009, 1), (0.010, 0)]);
        assert_eq!(detect_header(&edges), None);
    }

    #[test]
    fn test_timing_profile_bounds() {
        let bits = vec![
            Bit {
                pulse_us: 560.0,
                pause_us: Some(560.0),
            },
            Bit {
                pulse_us: 580.0,
                pause_us: Some(1690.0),
            },
            Bit {
                pulse_us: 540.0,
                pause_us: None,
            },
        ];
        let profile = timing_profile(&bits);
        let pulse = profile.pulse.unwrap();
        let pause = profile.pause.unwrap();
        assert_eq!((pulse.min_us, pulse.max_us), (540.0, 580.0));
        // The absent pause is excluded from the bounds
        assert_eq!((pause.min_us, pause.max_us), (560.0, 1690.0));
        assert!(profile.is_available());
    }

    #[test]
    fn test_timing_profile_unavailable_sides() {
        assert!(!timing_profile(&[]).is_available());

        let only_cut_off = vec![Bit {
            pulse_us: 560.0,
            pause_us: None,
        }];
        let profile = timing_profile(&only_cut_off);
        assert!(profile.pulse.is_some());
        assert!(profile.pause.is_none());
        assert!(!profile.is_available());
    }
}
