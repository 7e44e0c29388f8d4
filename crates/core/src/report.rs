//! Vendor report encoding for the FinalMouse polling rate command.
//!
//! The command is a single 65-byte output report: byte 0 is the HID report
//! ID (always 0), bytes 1-4 are a fixed command prefix, and bytes 5-6 carry
//! the rate encoding. Only bytes 5 and 6 vary between rates.

use crate::error::{Error, Result};

/// Total report length, including the leading report ID byte.
pub const REPORT_LEN: usize = 65;

/// Fixed vendor command prefix at bytes 1-4 of every rate report.
const COMMAND_PREFIX: [u8; 4] = [0x04, 0x04, 0x91, 0x02];

/// Polling rate options supported by the vendor protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PollingRate {
    Hz500 = 500,
    Hz1000 = 1000,
    Hz2000 = 2000,
    Hz4000 = 4000,
    Hz8000 = 8000,
}

impl PollingRate {
    /// Convert from raw Hz value.
    pub fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            500 => Some(Self::Hz500),
            1000 => Some(Self::Hz1000),
            2000 => Some(Self::Hz2000),
            4000 => Some(Self::Hz4000),
            8000 => Some(Self::Hz8000),
            _ => None,
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u32 {
        *self as u32
    }

    /// All supported rates.
    pub const ALL: &'static [PollingRate] = &[
        PollingRate::Hz500,
        PollingRate::Hz1000,
        PollingRate::Hz2000,
        PollingRate::Hz4000,
        PollingRate::Hz8000,
    ];
}

impl std::fmt::Display for PollingRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.as_hz())
    }
}

/// Validate a raw Hz value against the fixed rate table.
pub fn parse_rate(hz: u32) -> Result<PollingRate> {
    PollingRate::from_hz(hz).ok_or(Error::UnsupportedRate { hz })
}

/// Rate encoding for bytes 5-6 of the report.
///
/// Observed on FinalMouse 8k firmware; must match bit-for-bit.
fn rate_params(rate: PollingRate) -> (u8, u8) {
    match rate {
        PollingRate::Hz500 => (244, 1),
        PollingRate::Hz1000 => (232, 3),
        PollingRate::Hz2000 => (208, 7),
        PollingRate::Hz4000 => (160, 15),
        PollingRate::Hz8000 => (64, 31),
    }
}

/// Build the full 65-byte rate report for a polling rate.
///
/// Byte 0 = report ID (0), bytes 1-4 = command prefix, bytes 5-6 = rate
/// encoding, bytes 7-64 = zero padding.
pub fn encode_rate_report(rate: PollingRate) -> [u8; REPORT_LEN] {
    let (a, b) = rate_params(rate);
    let mut report = [0u8; REPORT_LEN];
    report[0] = 0x00;
    report[1] = COMMAND_PREFIX[0];
    report[2] = COMMAND_PREFIX[1];
    report[3] = COMMAND_PREFIX[2];
    report[4] = COMMAND_PREFIX[3];
    report[5] = a;
    report[6] = b;
    report
}
