//! Device catalog: normalized snapshots of enumerated HID interfaces.
//!
//! Enumeration is eager — the platform enumeration list is fully decoded
//! into owned [`DeviceDescriptor`] values before the call returns, so no
//! borrow of the platform list escapes it.

use std::ffi::CString;

/// Immutable snapshot of one enumerated HID interface.
///
/// A single physical mouse typically exposes several of these; only one
/// interface accepts the vendor rate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Opaque platform path, the unique key for opening the interface.
    pub path: CString,
    pub vendor_id: u16,
    pub product_id: u16,
    /// USB interface number, -1 when the platform does not report one.
    pub interface_number: i32,
    pub usage_page: u16,
    pub usage: u16,
    /// Empty when the field is absent or undecodable.
    pub manufacturer: String,
    /// Empty when the field is absent or undecodable.
    pub product: String,
    /// Empty when the field is absent or undecodable.
    pub serial: String,
}

/// Decode an optional device string field to owned UTF-8 text.
///
/// Total over its input: absent and zero-length fields both become the
/// empty string, never an error. hidapi has already performed the lossy
/// wide-char conversion by the time the field reaches us.
pub fn decode_string_field(field: Option<&str>) -> String {
    field.unwrap_or("").to_string()
}

impl DeviceDescriptor {
    /// Build a descriptor from a raw hidapi enumeration entry.
    pub fn from_hidapi(info: &hidapi::DeviceInfo) -> Self {
        Self {
            path: info.path().to_owned(),
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            interface_number: info.interface_number(),
            usage_page: info.usage_page(),
            usage: info.usage(),
            manufacturer: decode_string_field(info.manufacturer_string()),
            product: decode_string_field(info.product_string()),
            serial: decode_string_field(info.serial_number()),
        }
    }

    /// Path rendered for human-readable output.
    pub fn path_display(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}
