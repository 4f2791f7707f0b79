//! Bit-level packing for encoder payloads.
//!
//! Bits are stored most-significant-bit first within each byte. The final
//! byte is padded with zero bits and the number of meaningful bits travels
//! alongside the bytes so the padding can be dropped on read.

use bitvec::prelude::*;

use crate::code::Code;
use crate::error::{HuffmanError, Result};

#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bits: BitVec::new(),
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitWriter {
            bits: BitVec::with_capacity(bits),
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn push_code(&mut self, code: Code) {
        let packed = code.bits().to_be_bytes();
        let view = packed.view_bits::<Msb0>();
        self.bits.extend_from_bitslice(&view[64 - code.len()..]);
    }

    /// Number of meaningful bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Returns the zero-padded bytes and the meaningful bit count.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_len = self.bit_len();
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), bit_len)
    }
}

/// Reads bits back in the order [`BitWriter`] wrote them.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: u64,
    limit: u64,
}

impl<'a> BitReader<'a> {
    /// Fails with `OutOfRange` when `bit_len` claims more bits than `bytes`
    /// holds.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Result<Self> {
        let bits = bytes.view_bits::<Msb0>();
        let available = bits.len() as u64;
        if bit_len > available {
            return Err(HuffmanError::OutOfRange {
                position: bit_len,
                limit: available,
            });
        }
        Ok(BitReader {
            bits,
            position: 0,
            limit: bit_len,
        })
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.limit {
            return Err(HuffmanError::OutOfRange {
                position: self.position,
                limit: self.limit,
            });
        }
        let bit = self.bits[self.position as usize];
        self.position += 1;
        Ok(bit)
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.position
    }
}
