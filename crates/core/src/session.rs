//! Transmission session: try each candidate interface until one accepts
//! the report.
//!
//! A multi-interface device typically has exactly one interface that takes
//! the vendor command, so open and write failures on the others are
//! expected. Each failure is recorded and the loop moves on; only
//! exhausting every candidate is a run-level failure.

use crate::catalog::DeviceDescriptor;
use crate::error::{Error, Result};
use crate::report::{encode_rate_report, PollingRate, REPORT_LEN};
use crate::select::{select_candidates, SelectionFilter};
use crate::transport::HidBackend;
use std::ffi::CString;
use tracing::{debug, info, warn};

/// Outcome of one candidate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The interface accepted the write; `bytes` is the count the
    /// transport reported, success regardless of the exact value.
    Accepted { bytes: usize },
    /// Opening the interface failed (busy or access denied).
    OpenFailed { reason: String },
    /// The interface opened but rejected the write.
    WriteFailed { reason: String },
}

/// One recorded attempt against a candidate interface.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub path: CString,
    pub interface_number: i32,
    pub outcome: AttemptOutcome,
}

/// Ordered log of every attempt made during one session.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub attempts: Vec<Attempt>,
}

impl SessionReport {
    /// True iff at least one candidate accepted the write.
    pub fn succeeded(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.outcome, AttemptOutcome::Accepted { .. }))
    }
}

/// Send a report to the first candidate that accepts it.
///
/// Candidates are tried in the given order, each at most once. The open
/// handle is dropped before the next candidate is opened and on every
/// exit path, so exactly one device is held open at any time.
pub fn send_report(
    backend: &dyn HidBackend,
    candidates: &[DeviceDescriptor],
    payload: &[u8; REPORT_LEN],
) -> SessionReport {
    let mut report = SessionReport::default();

    for candidate in candidates {
        debug!(
            path = %candidate.path_display(),
            iface = candidate.interface_number,
            "Opening candidate"
        );

        let mut handle = match backend.open_path(&candidate.path) {
            Ok(h) => h,
            Err(e) => {
                warn!(
                    path = %candidate.path_display(),
                    error = %e,
                    "Open failed, trying next candidate"
                );
                report.attempts.push(Attempt {
                    path: candidate.path.clone(),
                    interface_number: candidate.interface_number,
                    outcome: AttemptOutcome::OpenFailed {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };

        match handle.write_report(payload) {
            Ok(bytes) => {
                info!(
                    path = %candidate.path_display(),
                    iface = candidate.interface_number,
                    bytes,
                    "Report accepted"
                );
                report.attempts.push(Attempt {
                    path: candidate.path.clone(),
                    interface_number: candidate.interface_number,
                    outcome: AttemptOutcome::Accepted { bytes },
                });
                // First success wins; remaining candidates are not tried.
                return report;
            }
            Err(e) => {
                warn!(
                    path = %candidate.path_display(),
                    error = %e,
                    "Write failed, trying next candidate"
                );
                report.attempts.push(Attempt {
                    path: candidate.path.clone(),
                    interface_number: candidate.interface_number,
                    outcome: AttemptOutcome::WriteFailed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    report
}

/// Full rate-change pipeline: enumerate, select, encode, transmit.
///
/// Returns the attempt log on success; [`Error::NoCandidates`] when
/// selection comes up empty and [`Error::AllCandidatesExhausted`] when
/// every candidate refused the report.
pub fn apply_rate(
    backend: &dyn HidBackend,
    filter: &SelectionFilter,
    rate: PollingRate,
) -> Result<SessionReport> {
    let catalog = backend.enumerate_devices();
    debug!(count = catalog.len(), "Device enumeration complete");

    let candidates = select_candidates(&catalog, filter);
    if candidates.is_empty() {
        return Err(Error::NoCandidates);
    }

    let payload = encode_rate_report(rate);
    let report = send_report(backend, &candidates, &payload);

    if report.succeeded() {
        Ok(report)
    } else {
        Err(Error::AllCandidatesExhausted {
            attempts: report.attempts.len(),
        })
    }
}
