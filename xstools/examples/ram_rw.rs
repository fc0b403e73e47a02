//! Sweep a block of the RAM interface with a random pattern and verify the
//! readback.

use indicatif::ProgressBar;
use rand::Rng;
use xstools::prelude::*;

/// USB port index for the XuLA board connected to the host PC
const USB_ID: u32 = 0;
/// Default identifier for the RAM interface module in the FPGA
const RAM_ID: u32 = 255;
/// Words per burst
const CHUNK: usize = 256;
/// Number of bursts to sweep
const CHUNKS: u32 = 64;

fn main() -> anyhow::Result<()> {
    let api = Api::load_default()?;
    let mut ram = Memory::new(XsUsbMem::open(&api, USB_ID, RAM_ID)?);
    println!(
        "RAM interface: {} address bits, {} data bits",
        ram.addr_width(),
        ram.data_width()
    );

    let mask = if ram.data_width() >= 64 {
        u64::MAX
    } else {
        (1 << ram.data_width()) - 1
    };
    let mut rng = rand::rng();
    let mut mismatches = 0u64;

    // Don't sweep past the end of a small RAM
    let chunks = CHUNKS.min(u32::try_from(ram.capacity() / CHUNK as u64).unwrap_or(u32::MAX));
    let bar = ProgressBar::new(u64::from(chunks));
    for chunk in 0..chunks {
        let base = chunk * CHUNK as u32;
        let pattern: Vec<u64> = (0..CHUNK).map(|_| rng.random::<u64>() & mask).collect();
        ram.write_words(base, &pattern)?;
        let readback = ram.read_words(base, CHUNK)?;
        for (offset, (wrote, read)) in pattern.iter().zip(&readback).enumerate() {
            if wrote != read {
                println!(
                    "0x{:X}: wrote 0x{wrote:X}, read back 0x{read:X}",
                    base + offset as u32
                );
                mismatches += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish();

    anyhow::ensure!(mismatches == 0, "{mismatches} words came back wrong");
    println!("RAM sweep passed");
    Ok(())
}
