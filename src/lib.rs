//! Batch analyzer for logic-level captures of IR remote-control signals
//!
//! This library decodes raw transition captures of infrared remote
//! transmissions: it splits an edge stream into packets and repeated frames,
//! extracts bit-level pulse/pause timing, and matches the observed timing
//! fingerprint against a table of known consumer-IR protocol encodings
//! within a configurable tolerance.
//!
//! # Architecture
//!
//! - **SampleStream**: the capture, loaded once into memory; every later
//!   stage addresses it by index range
//! - **Segmentation**: packet and repetition boundary detection by gap length
//! - **Bit extraction**: header classification and (pulse, pause) timing bits
//! - **Matching**: tolerance-window comparison against [`IR_PROTOCOLS`]
//! - **Export**: hex packing and playback listings for recognized packets
//!
//! # Example
//!
//! ```no_run
//! use irdecode::{analyze, SampleStream};
//!
//! let stream = SampleStream::from_path("digital.csv")?;
//! for packet in analyze(&stream, 0.25) {
//!     println!("packet {}: {:?}", packet.packet, packet.protocol_names());
//! }
//! # Ok::<(), irdecode::IrError>(())
//! ```

use thiserror::Error;

pub mod analysis;
pub mod capture;
pub mod export;
pub mod protocols;
pub mod report;

// Re-export the capture types
pub use capture::{Edge, SampleStream};

// Re-export the analysis pipeline and its result types
pub use analysis::{
    analyze, analyze_with_table, Bit, Bounds, HeaderMarker, PacketAnalysis, TimingProfile,
};

// Re-export protocol table and matcher
pub use protocols::{
    match_protocols, HeaderVariation, ProtocolDescriptor, ProtocolMatch, DEFAULT_TOLERANCE,
    IR_PROTOCOLS,
};

// Re-export the bit packer
pub use export::bits_to_hex;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IrError>;
