//! Candidate selection: narrowing a catalog snapshot to plausible targets.
//!
//! Selection rules are evaluated in strict precedence order — first
//! matching rule wins, later rules are not consulted:
//! 1. explicit path (exact byte match, single result)
//! 2. vendor id + product id (all matching interfaces, catalog order)
//! 3. manufacturer/product substring match against [`crate::TARGET_MATCH`]

use crate::catalog::DeviceDescriptor;
use crate::TARGET_MATCH;
use std::ffi::CString;
use tracing::debug;

/// User-supplied selection constraints from the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct SelectionFilter {
    /// Explicit device path; takes precedence over everything else.
    pub path: Option<CString>,
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

/// ASCII case-insensitive containment check.
///
/// Best-effort on non-ASCII text: bytes outside the ASCII range are
/// compared verbatim.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Filter a catalog snapshot down to the ordered candidate set.
///
/// The vendor/product rule deliberately keeps every matching interface:
/// a multi-interface device has exactly one interface that accepts the
/// command, and the transmission session finds it by trial. When an
/// explicit path is given, any vendor/product filters are silently
/// ignored.
pub fn select_candidates(
    catalog: &[DeviceDescriptor],
    filter: &SelectionFilter,
) -> Vec<DeviceDescriptor> {
    if let Some(path) = &filter.path {
        let matched: Vec<DeviceDescriptor> = catalog
            .iter()
            .filter(|d| d.path == *path)
            .take(1)
            .cloned()
            .collect();
        debug!(
            path = %path.to_string_lossy(),
            matched = !matched.is_empty(),
            "Selection by explicit path"
        );
        return matched;
    }

    if let (Some(vid), Some(pid)) = (filter.vendor_id, filter.product_id) {
        let matched: Vec<DeviceDescriptor> = catalog
            .iter()
            .filter(|d| d.vendor_id == vid && d.product_id == pid)
            .cloned()
            .collect();
        debug!(
            vid = format_args!("0x{:04X}", vid),
            pid = format_args!("0x{:04X}", pid),
            count = matched.len(),
            "Selection by vendor/product id"
        );
        return matched;
    }

    let matched: Vec<DeviceDescriptor> = catalog
        .iter()
        .filter(|d| {
            contains_ignore_ascii_case(&d.manufacturer, TARGET_MATCH)
                || contains_ignore_ascii_case(&d.product, TARGET_MATCH)
        })
        .cloned()
        .collect();
    debug!(count = matched.len(), "Selection by name match");
    matched
}
