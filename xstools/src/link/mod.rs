//! The channel seam between the high-level wrappers and whatever carries
//! bits to the board.
//!
//! [`Dut`](crate::dut::Dut) and [`Memory`](crate::mem::Memory) are generic
//! over these traits, so the same test code runs against the vendor-backed
//! links in [`xsusb`] and the hardware-free ones in [`mock`].

pub mod mock;
pub mod xsusb;

use crate::bits::Bits;

/// Errors shared by every link implementation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error from the vendor HostIo library")]
    HostIo(#[from] hostio::Error),
    #[error("The link carries {expected} bits but the vector has {got}")]
    WidthMismatch { expected: usize, got: usize },
    #[error("Address 0x{addr:X}..+{n} falls outside the {width}-bit address space")]
    OutOfBounds { addr: u32, n: usize, width: usize },
}

pub type LinkResult<T> = Result<T, Error>;

/// An open channel to a device-under-test: force the input pins, sample the
/// output pins.
pub trait DutLink {
    /// Number of bits in the DUT's input vector
    fn num_inputs(&self) -> usize;

    /// Number of bits in the DUT's output vector
    fn num_outputs(&self) -> usize;

    /// Force the DUT inputs to `inputs`, which must be exactly
    /// [`num_inputs`](DutLink::num_inputs) bits
    fn write(&mut self, inputs: &Bits) -> LinkResult<()>;

    /// Sample the DUT outputs
    fn read(&mut self) -> LinkResult<Bits>;
}

/// An open channel to a RAM-like circuit addressed in words.
pub trait MemLink {
    /// Number of bits in the circuit's address bus
    fn addr_width(&self) -> usize;

    /// Number of bits in the circuit's data bus
    fn data_width(&self) -> usize;

    /// Read `n` words starting at word address `addr`
    fn read(&mut self, addr: u32, n: usize) -> LinkResult<Vec<u64>>;

    /// Write all of `words` starting at word address `addr`
    fn write(&mut self, addr: u32, words: &[u64]) -> LinkResult<()>;
}
