//! Read and write RAM-like circuits through a memory channel.

use crate::link::MemLink;
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Link(#[from] crate::link::Error),
    #[error("Address 0x{addr:X}..+{n} runs past the end of a {width}-bit address space")]
    AddressRange { addr: u32, n: usize, width: usize },
    #[error("Word 0x{word:X} doesn't fit in {width} data bits")]
    WordRange { word: u64, width: usize },
}

/// A RAM-like circuit addressed in words.
///
/// Transfers are range-checked against the circuit's bus widths before
/// anything is handed to the link.
#[derive(Debug)]
pub struct Memory<L> {
    link: L,
}

impl<L> Memory<L>
where
    L: MemLink,
{
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// Number of bits in the circuit's address bus
    #[must_use]
    pub fn addr_width(&self) -> usize {
        self.link.addr_width()
    }

    /// Number of bits in the circuit's data bus
    #[must_use]
    pub fn data_width(&self) -> usize {
        self.link.data_width()
    }

    /// Number of addressable words
    #[must_use]
    pub fn capacity(&self) -> u64 {
        if self.addr_width() >= 64 {
            u64::MAX
        } else {
            1 << self.addr_width()
        }
    }

    fn data_mask(&self) -> u64 {
        if self.data_width() >= 64 {
            u64::MAX
        } else {
            (1 << self.data_width()) - 1
        }
    }

    fn check_range(&self, addr: u32, n: usize) -> Result<(), Error> {
        if u64::from(addr) + n as u64 > self.capacity() {
            return Err(Error::AddressRange {
                addr,
                n,
                width: self.addr_width(),
            });
        }
        Ok(())
    }

    /// Read the word at `addr`
    /// # Errors
    /// Returns an error if `addr` is out of range or the transfer fails
    pub fn read_word(&mut self, addr: u32) -> Result<u64, Error> {
        Ok(self.read_words(addr, 1)?[0])
    }

    /// Read `n` consecutive words starting at `addr`
    /// # Errors
    /// Returns an error if the range doesn't fit the address space or the
    /// transfer fails
    pub fn read_words(&mut self, addr: u32, n: usize) -> Result<Vec<u64>, Error> {
        self.check_range(addr, n)?;
        trace!(addr, n, "memory read");
        Ok(self.link.read(addr, n)?)
    }

    /// Write the word at `addr`
    /// # Errors
    /// Returns an error if `addr` is out of range, the word doesn't fit the
    /// data bus, or the transfer fails
    pub fn write_word(&mut self, addr: u32, word: u64) -> Result<(), Error> {
        self.write_words(addr, &[word])
    }

    /// Write all of `words` starting at `addr`
    /// # Errors
    /// Returns an error if the range doesn't fit the address space, a word
    /// doesn't fit the data bus, or the transfer fails
    pub fn write_words(&mut self, addr: u32, words: &[u64]) -> Result<(), Error> {
        self.check_range(addr, words.len())?;
        let mask = self.data_mask();
        if let Some(&word) = words.iter().find(|&&word| word & !mask != 0) {
            return Err(Error::WordRange {
                word,
                width: self.data_width(),
            });
        }
        trace!(addr, n = words.len(), "memory write");
        Ok(self.link.write(addr, words)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::mock::MockMem;

    #[test]
    fn word_round_trip() {
        let mut ram = Memory::new(MockMem::new(8, 16));
        ram.write_word(17, 0xBEEF).unwrap();
        assert_eq!(ram.read_word(17).unwrap(), 0xBEEF);
    }

    #[test]
    fn burst_round_trip() {
        let mut ram = Memory::new(MockMem::new(8, 16));
        let pattern: Vec<u64> = (0..32).collect();
        ram.write_words(100, &pattern).unwrap();
        assert_eq!(ram.read_words(100, 32).unwrap(), pattern);
    }

    #[test]
    fn geometry() {
        let ram = Memory::new(MockMem::new(10, 16));
        assert_eq!(ram.addr_width(), 10);
        assert_eq!(ram.data_width(), 16);
        assert_eq!(ram.capacity(), 1024);
    }

    #[test]
    fn rejects_out_of_range_addresses() {
        let mut ram = Memory::new(MockMem::new(8, 16));
        assert!(ram.write_word(255, 1).is_ok());
        let err = ram.write_words(255, &[1, 2]).unwrap_err();
        assert!(matches!(err, Error::AddressRange { addr: 255, n: 2, .. }));
        let err = ram.read_words(250, 10).unwrap_err();
        assert!(matches!(err, Error::AddressRange { addr: 250, n: 10, .. }));
    }

    #[test]
    fn rejects_words_wider_than_the_data_bus() {
        let mut ram = Memory::new(MockMem::new(8, 16));
        let err = ram.write_word(0, 0x1_0000).unwrap_err();
        assert!(matches!(
            err,
            Error::WordRange {
                word: 0x1_0000,
                width: 16
            }
        ));
    }

    #[test]
    fn zero_length_burst_is_a_noop() {
        let mut ram = Memory::new(MockMem::new(8, 16));
        ram.write_words(0, &[]).unwrap();
        assert!(ram.read_words(0, 0).unwrap().is_empty());
    }
}
