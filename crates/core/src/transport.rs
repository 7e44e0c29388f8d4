//! HID backend abstraction for enumeration, opening, and report writes.
//!
//! Provides a trait-based transport layer so that real hidapi devices and
//! mock devices share the same interface. Handles are released through
//! `Drop`, so every exit path of a session loop closes the device before
//! the next candidate is opened.

use crate::catalog::DeviceDescriptor;
use crate::error::{Error, Result};
use std::ffi::CStr;

/// Abstraction over platform HID enumeration and open.
pub trait HidBackend {
    /// Enumerate every HID interface visible to the platform.
    ///
    /// Zero devices is an empty vec, never an error — enumeration failure
    /// is indistinguishable from "nothing connected" at this layer.
    fn enumerate_devices(&self) -> Vec<DeviceDescriptor>;

    /// Open one interface by its platform path.
    ///
    /// Open failures are common and expected: another interface of the
    /// same physical device may already be claimed, or the OS may deny
    /// access.
    fn open_path(&self, path: &CStr) -> Result<Box<dyn HidHandle + '_>>;
}

/// One exclusively-owned, opened device connection.
///
/// Dropping the handle releases the underlying device.
pub trait HidHandle {
    /// Write a raw output report, returning the number of bytes accepted.
    fn write_report(&mut self, data: &[u8]) -> Result<usize>;
}

impl HidBackend for hidapi::HidApi {
    fn enumerate_devices(&self) -> Vec<DeviceDescriptor> {
        self.device_list().map(DeviceDescriptor::from_hidapi).collect()
    }

    fn open_path(&self, path: &CStr) -> Result<Box<dyn HidHandle + '_>> {
        let device = hidapi::HidApi::open_path(self, path)
            .map_err(|e| Error::Hid(format!("open {}: {e}", path.to_string_lossy())))?;
        Ok(Box::new(device))
    }
}

impl HidHandle for hidapi::HidDevice {
    fn write_report(&mut self, data: &[u8]) -> Result<usize> {
        self.write(data).map_err(|e| Error::Hid(format!("write: {e}")))
    }
}

/// A mock HID backend for testing.
///
/// Each scripted device carries a behavior for the open/write sequence,
/// and the backend records written payloads and open/release counts.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::ffi::CString;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// What a scripted device does when the session reaches it.
    #[derive(Debug, Clone, Copy)]
    pub enum Behavior {
        /// `open_path` fails (interface busy / access denied).
        RefuseOpen,
        /// Open succeeds, the write fails.
        FailWrite,
        /// Open succeeds, the write accepts this many bytes.
        AcceptWrite(usize),
    }

    /// Mock backend holding a scripted device catalog.
    pub struct ScriptedBackend {
        devices: Vec<(DeviceDescriptor, Behavior)>,
        pub opens: AtomicUsize,
        pub releases: Arc<AtomicUsize>,
        pub written: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl ScriptedBackend {
        pub fn new(devices: Vec<(DeviceDescriptor, Behavior)>) -> Self {
            Self {
                devices,
                opens: AtomicUsize::new(0),
                releases: Arc::new(AtomicUsize::new(0)),
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn open_count(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }

        pub fn release_count(&self) -> usize {
            self.releases.load(Ordering::SeqCst)
        }

        /// Payloads that reached a scripted device, in write order.
        pub fn written_payloads(&self) -> Vec<Vec<u8>> {
            self.written.lock().unwrap().clone()
        }
    }

    /// Build a descriptor for scripted catalogs.
    pub fn scripted_descriptor(path: &str, manufacturer: &str, product: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            path: CString::new(path).unwrap(),
            vendor_id: 0x361D,
            product_id: 0x0100,
            interface_number: 0,
            usage_page: 0xFF00,
            usage: 0x0001,
            manufacturer: manufacturer.to_string(),
            product: product.to_string(),
            serial: String::new(),
        }
    }

    struct ScriptedHandle {
        behavior: Behavior,
        releases: Arc<AtomicUsize>,
        written: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl HidHandle for ScriptedHandle {
        fn write_report(&mut self, data: &[u8]) -> Result<usize> {
            match self.behavior {
                Behavior::RefuseOpen => unreachable!("handle exists for a RefuseOpen device"),
                Behavior::FailWrite => Err(Error::Hid("write: broken pipe".to_string())),
                Behavior::AcceptWrite(n) => {
                    self.written.lock().unwrap().push(data.to_vec());
                    Ok(n)
                }
            }
        }
    }

    impl Drop for ScriptedHandle {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl HidBackend for ScriptedBackend {
        fn enumerate_devices(&self) -> Vec<DeviceDescriptor> {
            self.devices.iter().map(|(d, _)| d.clone()).collect()
        }

        fn open_path(&self, path: &CStr) -> Result<Box<dyn HidHandle + '_>> {
            let (_, behavior) = self
                .devices
                .iter()
                .find(|(d, _)| d.path.as_c_str() == path)
                .ok_or_else(|| Error::Hid("mock: unknown path".to_string()))?;

            match behavior {
                Behavior::RefuseOpen => Err(Error::Hid("open: device busy".to_string())),
                _ => {
                    self.opens.fetch_add(1, Ordering::SeqCst);
                    Ok(Box::new(ScriptedHandle {
                        behavior: *behavior,
                        releases: Arc::clone(&self.releases),
                        written: Arc::clone(&self.written),
                    }))
                }
            }
        }
    }
}
