//! Exercise the subtractor circuit in the FPGA with random operands and
//! check its differences against the host.

use rand::Rng;
use xstools::prelude::*;

/// USB port index for the XuLA board connected to the host PC
const USB_ID: u32 = 0;
/// Identifier for the subtractor module in the FPGA
const SUBTRACTOR_ID: u32 = 4;

fn main() -> anyhow::Result<()> {
    let api = Api::load_default()?;
    // Two 8-bit inputs, one 8-bit output
    let link = XsUsbDut::open(&api, USB_ID, SUBTRACTOR_ID)?;
    let mut subtractor = Dut::with_fields(link, &[8, 8], &[8])?;

    let mut rng = rand::rng();
    let mut failures = 0u32;
    for _ in 0..100 {
        let minuend: i64 = rng.random_range(0..=127);
        let subtrahend: i64 = rng.random_range(0..=127);
        #[allow(clippy::cast_sign_loss)]
        let diff = subtractor
            .exec(&[minuend as u64, subtrahend as u64])?
            .signed()?;
        if diff == minuend - subtrahend {
            println!("{minuend:3} - {subtrahend:3} = {diff:4} ==> CORRECT!");
        } else {
            println!("{minuend:3} - {subtrahend:3} = {diff:4} ==> ERROR!!!");
            failures += 1;
        }
    }
    anyhow::ensure!(failures == 0, "{failures} differences came back wrong");
    Ok(())
}
