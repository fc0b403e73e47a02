//! Mock link implementations used in testing the interface

use super::{
    DutLink,
    Error,
    LinkResult,
    MemLink,
};
use crate::bits::Bits;
use std::collections::HashMap;

/// A DUT that evaluates a host-side combinational function instead of
/// talking to hardware.
pub struct MockDut {
    num_inputs: usize,
    num_outputs: usize,
    inputs: Bits,
    logic: Box<dyn FnMut(&Bits) -> Bits + Send>,
}

impl std::fmt::Debug for MockDut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDut")
            .field("num_inputs", &self.num_inputs)
            .field("num_outputs", &self.num_outputs)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

impl MockDut {
    /// Construct a mock DUT whose outputs are `logic` applied to the last
    /// written input vector (all zeros until the first write).
    pub fn new(
        num_inputs: usize,
        num_outputs: usize,
        logic: impl FnMut(&Bits) -> Bits + Send + 'static,
    ) -> Self {
        Self {
            num_inputs,
            num_outputs,
            inputs: Bits::zeros(num_inputs),
            logic: Box::new(logic),
        }
    }

    /// A mock whose outputs mirror its inputs
    #[must_use]
    pub fn loopback(width: usize) -> Self {
        Self::new(width, width, Bits::clone)
    }
}

impl DutLink for MockDut {
    fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    fn write(&mut self, inputs: &Bits) -> LinkResult<()> {
        if inputs.len() != self.num_inputs {
            return Err(Error::WidthMismatch {
                expected: self.num_inputs,
                got: inputs.len(),
            });
        }
        self.inputs = inputs.clone();
        Ok(())
    }

    fn read(&mut self) -> LinkResult<Bits> {
        let outputs = (self.logic)(&self.inputs);
        if outputs.len() != self.num_outputs {
            return Err(Error::WidthMismatch {
                expected: self.num_outputs,
                got: outputs.len(),
            });
        }
        Ok(outputs)
    }
}

/// A memory circuit backed by a lazy word store
#[derive(Debug)]
pub struct MockMem {
    addr_width: usize,
    data_width: usize,
    words: HashMap<u64, u64>,
}

impl MockMem {
    /// Construct a mock memory with the given bus widths. Cells spring into
    /// existence on first write instead of allocating the whole address
    /// space.
    #[must_use]
    pub fn new(addr_width: usize, data_width: usize) -> Self {
        Self {
            addr_width,
            data_width,
            words: HashMap::new(),
        }
    }

    fn data_mask(&self) -> u64 {
        if self.data_width >= 64 {
            u64::MAX
        } else {
            (1 << self.data_width) - 1
        }
    }

    fn check_range(&self, addr: u32, n: usize) -> LinkResult<()> {
        let end = u64::from(addr) + n as u64;
        if self.addr_width < 64 && end > 1u64 << self.addr_width {
            return Err(Error::OutOfBounds {
                addr,
                n,
                width: self.addr_width,
            });
        }
        Ok(())
    }
}

impl MemLink for MockMem {
    fn addr_width(&self) -> usize {
        self.addr_width
    }

    fn data_width(&self) -> usize {
        self.data_width
    }

    fn read(&mut self, addr: u32, n: usize) -> LinkResult<Vec<u64>> {
        self.check_range(addr, n)?;
        Ok((0..n as u64)
            .map(|i| {
                self.words
                    .get(&(u64::from(addr) + i))
                    .copied()
                    .unwrap_or(0)
            })
            .collect())
    }

    fn write(&mut self, addr: u32, words: &[u64]) -> LinkResult<()> {
        self.check_range(addr, words.len())?;
        let mask = self.data_mask();
        for (i, word) in words.iter().enumerate() {
            // The data bus truncates whatever doesn't fit
            self.words.insert(u64::from(addr) + i as u64, word & mask);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    #[test]
    fn dut_loopback() {
        let mut dut = MockDut::loopback(4);
        dut.write(&Bits::from_unsigned(0b1010, 4)).unwrap();
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 0b1010);
    }

    #[test]
    fn dut_reads_zeros_before_first_write() {
        let mut dut = MockDut::loopback(8);
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 0);
    }

    #[test]
    fn dut_rejects_wrong_width() {
        let mut dut = MockDut::loopback(4);
        let err = dut.write(&Bits::zeros(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::WidthMismatch {
                expected: 4,
                got: 5
            }
        ));
    }

    #[test]
    fn dut_inverter() {
        let mut dut = MockDut::new(1, 1, |inputs| {
            Bits::from_unsigned(u64::from(inputs.bit(0) == Some(false)), 1)
        });
        dut.write(&Bits::from_unsigned(0, 1)).unwrap();
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 1);
        dut.write(&Bits::from_unsigned(1, 1)).unwrap();
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 0);
    }

    #[test]
    fn mem_write_read() {
        let mut mem = MockMem::new(8, 16);
        mem.write(3, &[0xDEAD, 0xBEEF]).unwrap();
        assert_eq!(mem.read(3, 2).unwrap(), vec![0xDEAD, 0xBEEF]);
    }

    #[test]
    fn mem_reads_zero_when_unwritten() {
        let mut mem = MockMem::new(8, 16);
        assert_eq!(mem.read(200, 2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn mem_out_of_bounds() {
        let mut mem = MockMem::new(8, 16);
        assert!(mem.write(255, &[1]).is_ok());
        let err = mem.write(255, &[1, 2]).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { addr: 255, n: 2, .. }));
    }

    macro_rules! test_mem_mask {
        ($width:literal) => {
            paste! {
                #[test]
                fn [<mem_masks_to_ $width _data_bits>]() {
                    let mut mem = MockMem::new(8, $width);
                    mem.write(0, &[u64::MAX]).unwrap();
                    let expected = u64::MAX >> (64 - $width);
                    assert_eq!(mem.read(0, 1).unwrap()[0], expected);
                }
            }
        };
    }

    test_mem_mask!(1);
    test_mem_mask!(8);
    test_mem_mask!(16);
    test_mem_mask!(33);
    test_mem_mask!(64);
}
