//! Prelude (helpful reexports) for this package

pub use crate::{
    bits::Bits,
    dut::Dut,
    link::{
        mock::{
            MockDut,
            MockMem,
        },
        xsusb::{
            XsUsbDut,
            XsUsbMem,
        },
        DutLink,
        MemLink,
    },
    mem::Memory,
};
pub use hostio::Api;
