//! Raw entry-point signatures for the XSTOOLs HostIo library.
//!
//! Mirrors `XstoolsApi.h`: the init calls return an opaque channel pointer
//! (null on failure) and report the channel geometry through out-params, the
//! transfer calls return 0 on success.

use crate::Error;
use libloading::Library;
use std::os::raw::{
    c_int,
    c_uchar,
    c_uint,
    c_ulonglong,
    c_void,
};

pub(crate) type DutInit =
    unsafe extern "C" fn(c_uint, c_uint, *mut c_uint, *mut c_uint) -> *mut c_void;
pub(crate) type DutWrite = unsafe extern "C" fn(*mut c_void, *const c_uchar, c_uint) -> c_int;
pub(crate) type DutRead = unsafe extern "C" fn(*mut c_void, *mut c_uchar, c_uint) -> c_int;
pub(crate) type MemInit =
    unsafe extern "C" fn(c_uint, c_uint, *mut c_uint, *mut c_uint) -> *mut c_void;
pub(crate) type MemWrite =
    unsafe extern "C" fn(*mut c_void, c_uint, *const c_ulonglong, c_uint) -> c_int;
pub(crate) type MemRead =
    unsafe extern "C" fn(*mut c_void, c_uint, *mut c_ulonglong, c_uint) -> c_int;

/// The six entry points, resolved once at load time.
#[derive(Debug, Copy, Clone)]
pub(crate) struct EntryPoints {
    pub(crate) dut_init: DutInit,
    pub(crate) dut_write: DutWrite,
    pub(crate) dut_read: DutRead,
    pub(crate) mem_init: MemInit,
    pub(crate) mem_write: MemWrite,
    pub(crate) mem_read: MemRead,
}

macro_rules! entry {
    ($lib:expr, $kind:ty, $name:literal) => {
        // Safety: we only assert the signature here, which comes straight
        // from the vendor header. The symbol is copied out as a plain fn
        // pointer, which stays valid for as long as the library is loaded.
        *unsafe { $lib.get::<$kind>(concat!($name, "\0").as_bytes()) }
            .map_err(|e| Error::Symbol($name, e))?
    };
}

impl EntryPoints {
    pub(crate) fn resolve(lib: &Library) -> Result<Self, Error> {
        Ok(Self {
            dut_init: entry!(lib, DutInit, "XsDutInit"),
            dut_write: entry!(lib, DutWrite, "XsDutWrite"),
            dut_read: entry!(lib, DutRead, "XsDutRead"),
            mem_init: entry!(lib, MemInit, "XsMemInit"),
            mem_write: entry!(lib, MemWrite, "XsMemWrite"),
            mem_read: entry!(lib, MemRead, "XsMemRead"),
        })
    }
}
