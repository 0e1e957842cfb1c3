//! Protocol descriptor table and timing matcher

pub mod matcher;
pub mod table;

// Re-export the table
pub use table::{ProtocolDescriptor, IR_PROTOCOLS};

// Re-export the matcher
pub use matcher::{match_protocols, variation_pct, HeaderVariation, ProtocolMatch, DEFAULT_TOLERANCE};
