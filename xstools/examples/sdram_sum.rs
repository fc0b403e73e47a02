//! Read the summation of the address * data products from the FSM + SDRAM
//! design on the board.

use xstools::prelude::*;

/// USB port index for the XuLA board connected to the host PC
const USB_ID: u32 = 0;
/// Default identifier for the DUT module in the FPGA
const DUT_ID: u32 = 255;

fn main() -> anyhow::Result<()> {
    let api = Api::load_default()?;
    let mut dut = Dut::new(XsUsbDut::open(&api, USB_ID, DUT_ID)?);
    // The 16-bit summation sits on the DUT's output vector
    let sum = dut.read()?;
    println!("Sum = {}", sum.unsigned()?);
    Ok(())
}
