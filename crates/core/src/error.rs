//! Error types for open-fm-rate-core.

use thiserror::Error;

/// Core library error type.
///
/// Per-candidate open/write failures are not errors at this level; they are
/// recorded as [`crate::session::AttemptOutcome`] entries and only surface as
/// [`Error::AllCandidatesExhausted`] once every candidate has been tried.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested polling rate is not in the device's fixed rate table.
    #[error("unsupported polling rate: {hz} Hz (supported: 500, 1000, 2000, 4000, 8000)")]
    UnsupportedRate { hz: u32 },

    /// Selection produced no candidate device; nothing to attempt.
    #[error("no candidate HID device found")]
    NoCandidates,

    /// Every candidate interface was tried and none accepted the report.
    #[error("no interface accepted the report ({attempts} candidate(s) tried)")]
    AllCandidatesExhausted { attempts: usize },

    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
