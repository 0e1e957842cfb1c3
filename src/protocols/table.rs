//! Consumer-IR protocol reference table
//!
//! Nominal timing constants for the protocols this tool can identify,
//! derived from the IRMP project's protocol definitions. The table is
//! read-only configuration: it is consulted on every match call and never
//! mutated at runtime.

/// Reference timing constants for one named consumer-IR protocol
///
/// All durations in microseconds. `header_pulse_us`/`header_pause_us` of 0
/// mean the protocol has no header frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtocolDescriptor {
    pub name: &'static str,
    /// Carrier frequency in Hz
    pub carrier_hz: u32,
    /// Burst duration of a logical 1
    pub pulse1_us: f64,
    /// Gap duration of a logical 1
    pub pause1_us: f64,
    /// Burst duration of a logical 0
    pub pulse0_us: f64,
    /// Gap duration of a logical 0
    pub pause0_us: f64,
    pub header_pulse_us: f64,
    pub header_pause_us: f64,
    pub address_bits: u8,
    pub command_bits: u8,
    pub stop_bit: bool,
    /// Whether the protocol transmits least-significant bit first
    pub lsb_first: bool,
    /// Modulation family marker for protocols that are not plain
    /// pulse-distance coded
    pub flag: Option<&'static str>,
}

#[allow(clippy::too_many_arguments)]
const fn proto(
    name: &'static str,
    carrier_hz: u32,
    pulse1_us: f64,
    pause1_us: f64,
    pulse0_us: f64,
    pause0_us: f64,
    header_pulse_us: f64,
    header_pause_us: f64,
    address_bits: u8,
    command_bits: u8,
    stop_bit: bool,
    lsb_first: bool,
    flag: Option<&'static str>,
) -> ProtocolDescriptor {
    ProtocolDescriptor {
        name,
        carrier_hz,
        pulse1_us,
        pause1_us,
        pulse0_us,
        pause0_us,
        header_pulse_us,
        header_pause_us,
        address_bits,
        command_bits,
        stop_bit,
        lsb_first,
        flag,
    }
}

/// The built-in protocol table, in match-report order
#[rustfmt::skip]
pub const IR_PROTOCOLS: &[ProtocolDescriptor] = &[
    // name, carrier, pulse1, pause1, pulse0, pause0, header pulse/pause, addr/cmd bits, stop, lsb, flag
    proto("SIRCS",      40_000, 1200.0,  600.0, 600.0,  600.0, 2400.0,  600.0, 12, 12, false, false, None),
    proto("NEC",        38_000,  560.0, 1690.0, 560.0,  560.0, 9000.0, 4500.0, 16, 16, true,  true,  None),
    proto("APPLE",      38_000,  560.0, 1690.0, 560.0,  560.0, 9000.0, 4500.0,  8, 16, true,  false, None),
    proto("SAMSUNG",    38_000,  550.0, 1650.0, 550.0,  550.0, 4500.0, 4500.0, 16, 16, true,  true,  None),
    proto("MATSUSHITA", 36_000,  400.0, 1200.0, 400.0,  400.0, 3500.0, 3500.0, 12, 12, true,  false, None),
    proto("KASEIKYO",   37_000,  500.0, 1500.0, 500.0,  500.0, 3400.0, 1700.0, 16, 16, true,  false, None),
    proto("RECS80",     38_000,  158.0, 7432.0, 158.0, 4902.0,    0.0,    0.0,  4,  6, false, false, None),
    proto("RC5",        36_000,  889.0,  889.0, 889.0,  889.0,  889.0,  889.0,  5,  6, false, false, Some("RC5")),
    proto("DENON",      38_000,  275.0, 1900.0, 275.0,  775.0,    0.0,    0.0,  5, 10, false, false, None),
    proto("RC6",        36_000,  444.0,  444.0, 444.0,  444.0, 2666.0,  889.0,  8,  8, true,  true,  Some("RC6")),
    proto("SAMSUNG32",  38_000,  500.0, 1500.0, 500.0,  500.0, 4500.0, 4500.0, 16, 16, true,  true,  None),
    proto("RECS80EXT",  38_000,  158.0, 7432.0, 158.0, 4902.0,    0.0,    0.0,  4,  6, false, false, None),
    proto("NEC16",      38_000,  560.0, 1690.0, 560.0,  560.0, 9000.0, 4500.0,  8,  8, true,  true,  None),
];
