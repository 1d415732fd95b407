use serde::Serialize;

use crate::code_table::Code;

/// A packed bitstream: MSB-first bytes plus the number of meaningful bits.
/// Any bits of the last byte past `written_bits` are zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BinaryWriter {
    pub os: Box<[u8]>,
    pub written_bits: u64,
}

pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: u64,
    current: u8,
    /// Unused bit positions left in `current`.
    free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `bits` bits up front.
    pub fn with_capacity(bits: u64) -> Self {
        Self { os: Vec::with_capacity(bits.div_ceil(8) as usize), ..Self::default() }
    }

    /// Flushes the partial final byte, zero-padded.
    pub fn build(mut self) -> BinaryWriter {
        if self.free < 8 {
            self.os.push(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
            written_bits: self.written_bits,
        }
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        self.free -= 1;
        self.current |= (bit as u8) << self.free;
        self.written_bits += 1;

        if self.free == 0 {
            self.os.push(self.current);
            self.free = 8;
            self.current = 0;
        }
    }

    #[inline(always)]
    pub fn push_code(&mut self, code: &Code) -> usize {
        for &bit in code.bits() {
            self.push_bit(bit);
        }
        code.len()
    }
}

/// Reads bits MSB-first out of a byte slice.
#[derive(Clone, Debug)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    position: usize,
    pub read_bits: u64,
    current: u8,
    /// Bits of `current` not yet handed out.
    fill: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(input_stream: &'a [u8]) -> Self {
        BinaryReader {
            is: input_stream,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u8> {
        let byte = *self.is.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.fill == 0 {
            self.current = self.read()?;
            self.fill = 8;
        }

        self.fill -= 1;
        self.read_bits += 1;
        Some((self.current >> self.fill) & 1 == 1)
    }

    pub fn remaining_bits(&self) -> u64 {
        ((self.is.len() - self.position) * 8 + self.fill) as u64
    }

    #[cfg(test)]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }
}

#[cfg(test)]
mod tests;
