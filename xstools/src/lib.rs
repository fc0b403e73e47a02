//! # XSTOOLs for Rust
//!
//! Host-side interaction with small test circuits (a blinker, a subtractor,
//! RAM test fixtures) programmed into the FPGA of a USB-attached
//! [XESS](http://www.xess.com) board.
//!
//! Circuits are reached through two kinds of HostIo channel: a
//! device-under-test channel forces and samples pin vectors, and a memory
//! channel moves words to and from RAM-like circuits. The [`dut::Dut`] and
//! [`mem::Memory`] wrappers translate between scalar values and the
//! fixed-width bit vectors those channels carry, with [`bits::Bits`] doing
//! the packing. The actual transport is the vendor's closed HostIo library,
//! wrapped by the `hostio` crate and reached through the
//! [`link::DutLink`]/[`link::MemLink`] seam so that everything above it can
//! also run against the mocks in [`link::mock`].

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bits;
pub mod dut;
pub mod link;
pub mod mem;
pub mod prelude;
