//! open-fm-rate-core: FinalMouse polling rate configuration over USB HID.
//!
//! This crate provides the core pipeline for applying a polling rate to a
//! FinalMouse mouse: enumerate HID interfaces, narrow them to plausible
//! candidates, encode the vendor rate report, and transmit it to the first
//! interface that accepts it.

pub mod catalog;
pub mod error;
pub mod report;
pub mod select;
pub mod session;
pub mod transport;

/// Substring matched case-insensitively against manufacturer and product
/// strings when no explicit path or vendor/product filter is given.
pub const TARGET_MATCH: &str = "finalmouse";
