//! Capture loading
//!
//! Provides [`Edge`] and [`SampleStream`] — the in-memory form of a
//! logic-analyzer capture of an IR receiver output. Captures are plain text
//! rows of `timestamp_seconds,logic_level`; an optional header row and any
//! malformed rows are skipped rather than aborting the load.
//!
//! The stream is loaded once and addressed by index range by every
//! downstream stage, so a single file read serves analysis, hex export and
//! playback listing alike.

use crate::Result;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// One timestamped logic-level transition from a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Capture timestamp in seconds
    pub time: f64,
    /// Logic level from this edge onward (true = high)
    pub high: bool,
}

impl Edge {
    /// Create a new edge
    pub fn new(time: f64, high: bool) -> Self {
        Self { time, high }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Edge[t={:.9}, {}]", self.time, u8::from(self.high))
    }
}

/// A complete capture: the ordered edges from one source file
///
/// Timestamps are non-decreasing. The stream holds no per-run state; every
/// analysis call over it is a pure function of its edges.
#[derive(Debug, Clone, Default)]
pub struct SampleStream {
    edges: Vec<Edge>,
}

impl SampleStream {
    /// Build a stream directly from edges (mainly for tests and tools)
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Load a capture from a CSV file
    ///
    /// A missing or unreadable file is fatal; malformed rows are not.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let stream = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} edges from {}",
            stream.len(),
            path.as_ref().display()
        );
        Ok(stream)
    }

    /// Load a capture from any buffered reader
    ///
    /// Rows are kept only when they carry a parseable, non-negative
    /// timestamp and a 0/1 logic level; everything else (header row,
    /// truncated row, junk fields) is dropped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut edges = Vec::new();
        let mut skipped: usize = 0;

        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split(',');
            let (Some(time_field), Some(level_field)) = (fields.next(), fields.next()) else {
                skipped += 1;
                continue;
            };

            let Ok(time) = time_field.trim().parse::<f64>() else {
                // Covers the optional "Time [s], ..." header row
                skipped += 1;
                continue;
            };
            if time < 0.0 {
                skipped += 1;
                continue;
            }

            let high = match level_field.trim() {
                "0" => false,
                "1" => true,
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            edges.push(Edge::new(time, high));
        }

        if skipped > 0 {
            debug!("Skipped {} malformed capture rows", skipped);
        }

        Ok(Self { edges })
    }

    /// The edges of this capture, in timestamp order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges in the capture
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the capture holds no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> SampleStream {
        SampleStream::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_parses_plain_rows() {
        let stream = load("0.000000,0\n0.000560,1\n0.002250,0\n");
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.edges()[0], Edge::new(0.0, false));
        assert_eq!(stream.edges()[1], Edge::new(0.00056, true));
        assert!(!stream.edges()[2].high);
    }

    #[test]
    fn test_skips_header_row() {
        let stream = load("Time [s],Channel 0\n0.0,0\n0.001,1\n");
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.edges()[0].time, 0.0);
    }

    #[test]
    fn test_skips_negative_timestamps() {
        let stream = load("-0.5,0\n0.0,0\n0.001,1\n");
        assert_eq!(stream.len(), 2);
        assert!(stream.edges().iter().all(|e| e.time >= 0.0));
    }

    #[test]
    fn test_skips_junk_rows() {
        let stream = load("0.0,0\nnot-a-number,1\n0.001,\n0.002\n0.003,2\n0.004,1\n");
        assert_eq!(stream.len(), 2);
        assert!(stream.edges()[1].high);
    }

    #[test]
    fn test_tolerates_spaces_around_fields() {
        let stream = load("0.0, 0\n 0.001 ,1\n");
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let stream = load("");
        assert!(stream.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(SampleStream::from_path("no-such-capture.csv").is_err());
    }
}
