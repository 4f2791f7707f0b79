//! Self-describing compressed artifact and its byte layout.
//!
//! All integers are big-endian:
//!
//! ```text
//! magic         "HP"
//! version       u8
//! table format  u8    0 = explicit codes, 1 = canonical (lengths only)
//! original_len  u64
//! distinct      u16
//! entries       distinct x { symbol u8, len u8, code bits (explicit only) }
//! payload_bits  u64
//! payload       ceil(payload_bits / 8) bytes
//! ```
//!
//! Explicit code bits take `ceil(len / 8)` bytes, first code bit in the most
//! significant position, zero padded.

use bitvec::prelude::*;

use crate::code::{Code, CodeTable};
use crate::config::TableFormat;
use crate::error::{HuffmanError, Result};

const MAGIC: &[u8; 2] = b"HP";
const VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    pub(crate) original_len: u64,
    pub(crate) table_format: TableFormat,
    pub(crate) table: CodeTable,
    pub(crate) payload: Vec<u8>,
    pub(crate) payload_bits: u64,
}

impl CompressedArtifact {
    /// Assembles an artifact from its parts.
    ///
    /// No consistency check happens here, decoding reports any mismatch
    /// between table, payload and length.
    pub fn new(
        original_len: u64,
        table_format: TableFormat,
        table: CodeTable,
        payload: Vec<u8>,
        payload_bits: u64,
    ) -> Self {
        CompressedArtifact {
            original_len,
            table_format,
            table,
            payload,
            payload_bits,
        }
    }

    pub fn empty(table_format: TableFormat) -> Self {
        Self::new(0, table_format, CodeTable::default(), Vec::new(), 0)
    }

    pub fn original_len(&self) -> u64 {
        self.original_len
    }

    pub fn table_format(&self) -> TableFormat {
        self.table_format
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_bits(&self) -> u64 {
        self.payload_bits
    }

    /// The meaningful payload bits rendered as `0`/`1` text.
    pub fn payload_bit_string(&self) -> String {
        let bits = self.payload.view_bits::<Msb0>();
        let limit = (self.payload_bits as usize).min(bits.len());
        bits[..limit]
            .iter()
            .by_vals()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.table.len() * 3 + self.payload.len());
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.push(self.table_format.to_byte());
        out.extend_from_slice(&self.original_len.to_be_bytes());
        out.extend_from_slice(&(self.table.len() as u16).to_be_bytes());

        for (symbol, code) in self.table.iter() {
            out.push(symbol);
            out.push(code.len() as u8);
            if self.table_format == TableFormat::Explicit {
                let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(code.len());
                code.iter().for_each(|bit| bits.push(bit));
                bits.set_uninitialized(false);
                out.extend_from_slice(&bits.into_vec());
            }
        }

        out.extend_from_slice(&self.payload_bits.to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        if cursor.take(2, "magic")? != MAGIC {
            return Err(HuffmanError::corrupt("bad magic"));
        }
        let version = cursor.u8("version")?;
        if version != VERSION {
            return Err(HuffmanError::corrupt(format!(
                "unsupported version {version}"
            )));
        }
        let format_byte = cursor.u8("table format")?;
        let table_format = TableFormat::from_byte(format_byte).ok_or_else(|| {
            HuffmanError::corrupt(format!("unknown table format {format_byte}"))
        })?;

        let original_len = cursor.u64("original length")?;
        let distinct = cursor.u16("symbol count")?;
        if distinct > 256 {
            return Err(HuffmanError::corrupt(format!(
                "symbol count {distinct} exceeds byte alphabet"
            )));
        }

        let table = match table_format {
            TableFormat::Explicit => {
                let mut entries = Vec::with_capacity(distinct as usize);
                for _ in 0..distinct {
                    let symbol = cursor.u8("table entry")?;
                    let len = cursor.u8("table entry")?;
                    let raw = cursor.take((len as usize).div_ceil(8), "code bits")?;
                    let value = raw
                        .view_bits::<Msb0>()
                        .iter()
                        .by_vals()
                        .take(len as usize)
                        .fold(0u64, |acc, bit| (acc << 1) | bit as u64);
                    let code = Code::new(value, len).ok_or_else(|| {
                        HuffmanError::corrupt(format!(
                            "symbol {symbol:#04x} has invalid code length {len}"
                        ))
                    })?;
                    entries.push((symbol, code));
                }
                CodeTable::from_codes(entries)?
            }
            TableFormat::Canonical => {
                let mut entries = Vec::with_capacity(distinct as usize);
                for _ in 0..distinct {
                    let symbol = cursor.u8("table entry")?;
                    let len = cursor.u8("table entry")?;
                    entries.push((symbol, len as usize));
                }
                CodeTable::from_lengths(entries)?
            }
        };

        let payload_bits = cursor.u64("payload length")?;
        let expected = payload_bits.div_ceil(8);
        let payload = cursor.rest();
        if payload.len() as u64 != expected {
            return Err(HuffmanError::corrupt(format!(
                "payload holds {} bytes, header declares {expected}",
                payload.len()
            )));
        }

        Ok(CompressedArtifact {
            original_len,
            table_format,
            table,
            payload: payload.to_vec(),
            payload_bits,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| HuffmanError::corrupt(format!("header truncated in {what}")))?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u16(&mut self, what: &str) -> Result<u16> {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(self.take(2, what)?);
        Ok(u16::from_be_bytes(buf))
    }

    fn u64(&mut self, what: &str) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, what)?);
        Ok(u64::from_be_bytes(buf))
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.offset..];
        self.offset = self.bytes.len();
        rest
    }
}
