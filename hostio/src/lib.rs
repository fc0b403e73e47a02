//! Bindings to the XSTOOLs HostIo API, the vendor library that talks to
//! circuits in the FPGA of a USB-attached XESS board.
//!
//! The library is closed and ships pre-built, so it is loaded at runtime and
//! its six entry points are resolved up front. Two kinds of channel exist:
//! a [`DutChannel`] forces and samples the pins of a device-under-test
//! (`HostIoToDut` module), and a [`MemChannel`] moves 64-bit words to and
//! from a RAM-like circuit (`HostIoToMemory` module). Every channel is
//! addressed by the USB port instance of the board and the numeric id of the
//! HostIo module inside the FPGA.

mod ffi;

use libloading::Library;
use std::{
    ffi::OsStr,
    fmt::Display,
    os::raw::c_uint,
    ptr::NonNull,
    sync::Arc,
};
use tracing::{
    debug,
    trace,
};

/// Errors that can come back from the vendor library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't load the XSTOOLs library")]
    Load(#[source] libloading::Error),
    #[error("The XSTOOLs library is missing the `{0}` entry point")]
    Symbol(&'static str, #[source] libloading::Error),
    #[error("Couldn't get a handle for the {kind} module {module_id} on USB port {usb_id}")]
    NoModule {
        kind: ModuleKind,
        usb_id: u32,
        module_id: u32,
    },
    #[error("The board rejected a {op} transfer with status {status}")]
    Transfer { op: &'static str, status: i32 },
    #[error("The DUT takes {expected} input bits but {got} levels were given")]
    BadInputCount { expected: usize, got: usize },
}

/// The two kinds of HostIo module a channel can attach to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Dut,
    Memory,
}

impl Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ModuleKind::Dut => "DUT",
                ModuleKind::Memory => "memory",
            }
        )
    }
}

#[derive(Debug)]
struct Shared {
    entry: ffi::EntryPoints,
    // Keeps the entry points above valid. The vendor API has no close call,
    // so channels never free their handles either.
    _lib: Library,
}

/// A loaded copy of the vendor library. Cheap to clone; open channels keep
/// the library alive.
#[derive(Debug, Clone)]
pub struct Api {
    shared: Arc<Shared>,
}

impl Api {
    /// Load the XSTOOLs library from `path` and resolve its entry points.
    /// # Errors
    /// Returns an error if the library can't be loaded or is missing one of
    /// the HostIo entry points.
    pub fn load(path: impl AsRef<OsStr>) -> Result<Self, Error> {
        let path = path.as_ref();
        // Safety: loading runs the library's initializers. There's nothing
        // to check on our side, we trust the vendor binary.
        let lib = unsafe { Library::new(path) }.map_err(Error::Load)?;
        let entry = ffi::EntryPoints::resolve(&lib)?;
        debug!(path = %path.to_string_lossy(), "loaded the XSTOOLs library");
        Ok(Self {
            shared: Arc::new(Shared { entry, _lib: lib }),
        })
    }

    /// Load the library by its platform name (`XstoolsApi.dll`,
    /// `libXstoolsApi.so`, ...) from the loader's search path.
    /// # Errors
    /// Same as [`Api::load`]
    pub fn load_default() -> Result<Self, Error> {
        Self::load(libloading::library_filename("XstoolsApi"))
    }

    /// Open a channel to the `HostIoToDut` module `module_id` in the FPGA of
    /// the board on USB port `usb_id` (usually 0).
    /// # Errors
    /// Returns [`Error::NoModule`] if the board doesn't answer for that id
    pub fn open_dut(&self, usb_id: u32, module_id: u32) -> Result<DutChannel, Error> {
        let mut num_inputs: c_uint = 0;
        let mut num_outputs: c_uint = 0;
        // Safety: the out-params are valid for writes and the vendor fills
        // them before returning.
        let handle = unsafe {
            (self.shared.entry.dut_init)(usb_id, module_id, &mut num_inputs, &mut num_outputs)
        };
        let handle = NonNull::new(handle).ok_or(Error::NoModule {
            kind: ModuleKind::Dut,
            usb_id,
            module_id,
        })?;
        debug!(usb_id, module_id, num_inputs, num_outputs, "opened a HostIoToDut channel");
        Ok(DutChannel {
            shared: Arc::clone(&self.shared),
            handle,
            num_inputs: num_inputs as usize,
            num_outputs: num_outputs as usize,
        })
    }

    /// Open a channel to the `HostIoToMemory` module `module_id` in the FPGA
    /// of the board on USB port `usb_id`.
    /// # Errors
    /// Returns [`Error::NoModule`] if the board doesn't answer for that id
    pub fn open_mem(&self, usb_id: u32, module_id: u32) -> Result<MemChannel, Error> {
        let mut addr_width: c_uint = 0;
        let mut data_width: c_uint = 0;
        // Safety: same as `open_dut`.
        let handle = unsafe {
            (self.shared.entry.mem_init)(usb_id, module_id, &mut addr_width, &mut data_width)
        };
        let handle = NonNull::new(handle).ok_or(Error::NoModule {
            kind: ModuleKind::Memory,
            usb_id,
            module_id,
        })?;
        debug!(usb_id, module_id, addr_width, data_width, "opened a HostIoToMemory channel");
        Ok(MemChannel {
            shared: Arc::clone(&self.shared),
            handle,
            addr_width: addr_width as usize,
            data_width: data_width as usize,
        })
    }
}

/// An open channel to a device-under-test in the FPGA.
///
/// Pin levels cross the wire one byte per bit (nonzero = high), input/output
/// bit 0 first.
#[derive(Debug)]
pub struct DutChannel {
    shared: Arc<Shared>,
    handle: NonNull<std::os::raw::c_void>,
    num_inputs: usize,
    num_outputs: usize,
}

impl DutChannel {
    /// Number of bits in the DUT's input vector
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of bits in the DUT's output vector
    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Force the DUT inputs to `levels`, one byte per input bit.
    /// # Errors
    /// Returns an error if the level count doesn't match the input vector or
    /// the board rejects the transfer
    pub fn write(&mut self, levels: &[u8]) -> Result<(), Error> {
        if levels.len() != self.num_inputs {
            return Err(Error::BadInputCount {
                expected: self.num_inputs,
                got: levels.len(),
            });
        }
        trace!(n = levels.len(), "DUT write");
        // Safety: the handle came from XsDutInit and the buffer holds
        // exactly the number of levels we claim.
        let status = unsafe {
            (self.shared.entry.dut_write)(
                self.handle.as_ptr(),
                levels.as_ptr(),
                levels.len() as c_uint,
            )
        };
        if status != 0 {
            return Err(Error::Transfer {
                op: "DUT write",
                status,
            });
        }
        Ok(())
    }

    /// Sample the DUT outputs, one byte per output bit.
    /// # Errors
    /// Returns an error if the board rejects the transfer
    pub fn read(&mut self) -> Result<Vec<u8>, Error> {
        let mut levels = vec![0u8; self.num_outputs];
        trace!(n = levels.len(), "DUT read");
        // Safety: the vendor fills `num_outputs` bytes, which is exactly
        // what the buffer holds.
        let status = unsafe {
            (self.shared.entry.dut_read)(
                self.handle.as_ptr(),
                levels.as_mut_ptr(),
                levels.len() as c_uint,
            )
        };
        if status != 0 {
            return Err(Error::Transfer {
                op: "DUT read",
                status,
            });
        }
        Ok(levels)
    }
}

/// An open channel to a RAM-like circuit in the FPGA.
///
/// Transfers move 64-bit words regardless of the circuit's data bus width;
/// only the low `data_width` bits of each word are meaningful.
#[derive(Debug)]
pub struct MemChannel {
    shared: Arc<Shared>,
    handle: NonNull<std::os::raw::c_void>,
    addr_width: usize,
    data_width: usize,
}

impl MemChannel {
    /// Number of bits in the circuit's address bus
    #[must_use]
    pub fn addr_width(&self) -> usize {
        self.addr_width
    }

    /// Number of bits in the circuit's data bus
    #[must_use]
    pub fn data_width(&self) -> usize {
        self.data_width
    }

    /// Read `n` words starting at word address `addr`.
    /// # Errors
    /// Returns an error if the board rejects the transfer
    pub fn read(&mut self, addr: u32, n: usize) -> Result<Vec<u64>, Error> {
        let mut words = vec![0u64; n];
        if n == 0 {
            return Ok(words);
        }
        trace!(addr, n, "memory read");
        // Safety: the handle came from XsMemInit and the buffer holds `n`
        // words.
        let status = unsafe {
            (self.shared.entry.mem_read)(self.handle.as_ptr(), addr, words.as_mut_ptr(), n as c_uint)
        };
        if status != 0 {
            return Err(Error::Transfer {
                op: "memory read",
                status,
            });
        }
        Ok(words)
    }

    /// Write all of `words` starting at word address `addr`.
    /// # Errors
    /// Returns an error if the board rejects the transfer
    pub fn write(&mut self, addr: u32, words: &[u64]) -> Result<(), Error> {
        if words.is_empty() {
            return Ok(());
        }
        trace!(addr, n = words.len(), "memory write");
        // Safety: same as `read`.
        let status = unsafe {
            (self.shared.entry.mem_write)(
                self.handle.as_ptr(),
                addr,
                words.as_ptr(),
                words.len() as c_uint,
            )
        };
        if status != 0 {
            return Err(Error::Transfer {
                op: "memory write",
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_library() {
        let err = Api::load("/definitely/not/a/real/XstoolsApi.so").unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }
}
