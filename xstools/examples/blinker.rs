//! Watch the LED driven by the blinker circuit in the FPGA.
//!
//! The board must already hold the blinker design; the state printed here
//! should flip back and forth about once per second.

use std::io::Write;
use xstools::prelude::*;

/// USB port index for the XuLA board connected to the host PC
const USB_ID: u32 = 0;
/// Identifier for the blinker module in the FPGA
const BLINKER_ID: u32 = 1;

fn main() -> anyhow::Result<()> {
    let api = Api::load_default()?;
    // One 1-bit input, one 1-bit output
    let mut blinker = Dut::new(XsUsbDut::open(&api, USB_ID, BLINKER_ID)?);

    loop {
        let led = blinker.read()?;
        print!("LED: {}\r", led.unsigned()?);
        std::io::stdout().flush()?;
    }
}
