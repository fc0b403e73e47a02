//! Links carried over the XSTOOLs USB interface via the vendor HostIo
//! library.

use super::{
    DutLink,
    LinkResult,
    MemLink,
};
use crate::bits::Bits;
use hostio::{
    Api,
    DutChannel,
    MemChannel,
};

/// A DUT link backed by the vendor library
#[derive(Debug)]
pub struct XsUsbDut {
    channel: DutChannel,
}

impl XsUsbDut {
    /// Open the `HostIoToDut` module `module_id` in the FPGA of the board
    /// on USB port `usb_id` (usually 0).
    /// # Errors
    /// Returns an error if the vendor library can't reach the module
    pub fn open(api: &Api, usb_id: u32, module_id: u32) -> LinkResult<Self> {
        Ok(Self {
            channel: api.open_dut(usb_id, module_id)?,
        })
    }
}

impl DutLink for XsUsbDut {
    fn num_inputs(&self) -> usize {
        self.channel.num_inputs()
    }

    fn num_outputs(&self) -> usize {
        self.channel.num_outputs()
    }

    fn write(&mut self, inputs: &Bits) -> LinkResult<()> {
        // The channel itself rejects a level count that doesn't match the
        // input vector
        Ok(self.channel.write(&inputs.levels())?)
    }

    fn read(&mut self) -> LinkResult<Bits> {
        Ok(Bits::from_levels(&self.channel.read()?))
    }
}

/// A memory link backed by the vendor library
#[derive(Debug)]
pub struct XsUsbMem {
    channel: MemChannel,
}

impl XsUsbMem {
    /// Open the `HostIoToMemory` module `module_id` in the FPGA of the
    /// board on USB port `usb_id`.
    /// # Errors
    /// Returns an error if the vendor library can't reach the module
    pub fn open(api: &Api, usb_id: u32, module_id: u32) -> LinkResult<Self> {
        Ok(Self {
            channel: api.open_mem(usb_id, module_id)?,
        })
    }
}

impl MemLink for XsUsbMem {
    fn addr_width(&self) -> usize {
        self.channel.addr_width()
    }

    fn data_width(&self) -> usize {
        self.channel.data_width()
    }

    fn read(&mut self, addr: u32, n: usize) -> LinkResult<Vec<u64>> {
        Ok(self.channel.read(addr, n)?)
    }

    fn write(&mut self, addr: u32, words: &[u64]) -> LinkResult<()> {
        Ok(self.channel.write(addr, words)?)
    }
}
