//! Drive a device-under-test: scalar values in, fixed-width bit fields
//! back out.

use crate::{
    bits::Bits,
    link::DutLink,
};
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Link(#[from] crate::link::Error),
    #[error(transparent)]
    Bits(#[from] crate::bits::Error),
    #[error("Expected {expected} input fields, got {got}")]
    FieldCount { expected: usize, got: usize },
    #[error("Input fields sum to {total} bits but the DUT takes {num_inputs}")]
    InputWidths { total: usize, num_inputs: usize },
    #[error("Output fields sum to {total} bits but the DUT only has {num_outputs}")]
    OutputWidths { total: usize, num_outputs: usize },
}

/// A device-under-test with its input and output vectors carved into
/// fixed-width fields.
#[derive(Debug)]
pub struct Dut<L> {
    link: L,
    in_widths: Vec<usize>,
    out_widths: Vec<usize>,
}

impl<L> Dut<L>
where
    L: DutLink,
{
    /// Wrap a link with a single input field and a single output field
    /// spanning the whole vectors.
    pub fn new(link: L) -> Self {
        let in_widths = vec![link.num_inputs()];
        let out_widths = vec![link.num_outputs()];
        Self {
            link,
            in_widths,
            out_widths,
        }
    }

    /// Wrap a link with the input and output vectors split into fields of
    /// the given widths. The input fields must cover the input vector
    /// exactly; the output fields must fit within the output vector.
    /// # Errors
    /// Returns an error if the field widths don't match the link's vectors
    pub fn with_fields(link: L, in_widths: &[usize], out_widths: &[usize]) -> Result<Self, Error> {
        let total_in: usize = in_widths.iter().sum();
        if total_in != link.num_inputs() {
            return Err(Error::InputWidths {
                total: total_in,
                num_inputs: link.num_inputs(),
            });
        }
        let total_out: usize = out_widths.iter().sum();
        if total_out > link.num_outputs() {
            return Err(Error::OutputWidths {
                total: total_out,
                num_outputs: link.num_outputs(),
            });
        }
        Ok(Self {
            link,
            in_widths: in_widths.to_vec(),
            out_widths: out_widths.to_vec(),
        })
    }

    /// Number of bits in the DUT's input vector
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.link.num_inputs()
    }

    /// Number of bits in the DUT's output vector
    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.link.num_outputs()
    }

    /// Force the DUT inputs, one value per input field, packed in field
    /// order from bit 0. Each value is truncated to its field width.
    /// # Errors
    /// Returns an error on a field count mismatch or a bad transfer
    pub fn write(&mut self, fields: &[u64]) -> Result<(), Error> {
        if fields.len() != self.in_widths.len() {
            return Err(Error::FieldCount {
                expected: self.in_widths.len(),
                got: fields.len(),
            });
        }
        let mut inputs = Bits::default();
        for (&value, &width) in fields.iter().zip(&self.in_widths) {
            inputs.push_field(value, width);
        }
        trace!(?fields, "DUT write");
        Ok(self.link.write(&inputs)?)
    }

    /// Sample the whole output vector
    /// # Errors
    /// Returns an error on a bad transfer
    pub fn read(&mut self) -> Result<Bits, Error> {
        Ok(self.link.read()?)
    }

    /// Sample the outputs and split them into the declared output fields
    /// # Errors
    /// Returns an error on a bad transfer
    pub fn read_fields(&mut self) -> Result<Vec<Bits>, Error> {
        let outputs = self.link.read()?;
        Ok(outputs.split_fields(&self.out_widths)?)
    }

    /// Write the inputs, then sample the whole output vector
    /// # Errors
    /// Returns an error on a field count mismatch or a bad transfer
    pub fn exec(&mut self, fields: &[u64]) -> Result<Bits, Error> {
        self.write(fields)?;
        self.read()
    }

    /// Write the inputs, then sample and split the outputs
    /// # Errors
    /// Returns an error on a field count mismatch or a bad transfer
    pub fn exec_fields(&mut self, fields: &[u64]) -> Result<Vec<Bits>, Error> {
        self.write(fields)?;
        self.read_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::mock::MockDut;

    // An 8-bit subtractor, the way the demo gateware wires one up
    fn subtractor() -> MockDut {
        MockDut::new(16, 8, |inputs| {
            let fields = inputs.split_fields(&[8, 8]).unwrap();
            let minuend = i64::try_from(fields[0].unsigned().unwrap()).unwrap();
            let subtrahend = i64::try_from(fields[1].unsigned().unwrap()).unwrap();
            Bits::from_signed(minuend - subtrahend, 8)
        })
    }

    #[test]
    fn subtractor_differences() {
        let mut dut = Dut::with_fields(subtractor(), &[8, 8], &[8]).unwrap();
        assert_eq!(dut.exec(&[100, 42]).unwrap().signed().unwrap(), 58);
        assert_eq!(dut.exec(&[42, 100]).unwrap().signed().unwrap(), -58);
        assert_eq!(dut.exec(&[0, 0]).unwrap().signed().unwrap(), 0);
    }

    #[test]
    fn default_fields_span_the_vectors() {
        let mut dut = Dut::new(MockDut::loopback(4));
        dut.write(&[0b1010]).unwrap();
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 0b1010);
        let fields = dut.read_fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].len(), 4);
    }

    #[test]
    fn values_truncate_to_field_width() {
        let mut dut = Dut::new(MockDut::loopback(8));
        dut.write(&[0x1FF]).unwrap();
        assert_eq!(dut.read().unwrap().unsigned().unwrap(), 0xFF);
    }

    #[test]
    fn field_count_mismatch() {
        let mut dut = Dut::with_fields(MockDut::loopback(16), &[8, 8], &[16]).unwrap();
        let err = dut.write(&[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCount {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn input_widths_must_cover_the_vector() {
        let err = Dut::with_fields(MockDut::loopback(16), &[8], &[16]).unwrap_err();
        assert!(matches!(
            err,
            Error::InputWidths {
                total: 8,
                num_inputs: 16
            }
        ));
    }

    #[test]
    fn output_widths_must_fit_the_vector() {
        let err = Dut::with_fields(MockDut::loopback(16), &[16], &[8, 16]).unwrap_err();
        assert!(matches!(
            err,
            Error::OutputWidths {
                total: 24,
                num_outputs: 16
            }
        ));
    }

    #[test]
    fn read_fields_splits_the_outputs() {
        let mut dut = Dut::with_fields(MockDut::loopback(16), &[8, 8], &[8, 8]).unwrap();
        dut.write(&[100, 42]).unwrap();
        let fields = dut.read_fields().unwrap();
        assert_eq!(fields[0].unsigned().unwrap(), 100);
        assert_eq!(fields[1].unsigned().unwrap(), 42);
    }
}
