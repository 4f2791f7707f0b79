use tracing::debug;

use crate::bits::BitWriter;
use crate::code::CodeTable;
use crate::config::{CodecConfig, TableFormat};
use crate::container::CompressedArtifact;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Runs the full compression pipeline for one buffer at a time.
///
/// Holds only configuration, so one encoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(config: CodecConfig) -> Self {
        Encoder { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Builds the code table for `data` and packs every byte's code, in
    /// input order, into the artifact payload.
    pub fn encode(&self, data: &[u8]) -> Result<CompressedArtifact> {
        let format = self.config.table_format;
        if data.is_empty() {
            debug!("empty input, emitting empty artifact");
            return Ok(CompressedArtifact::empty(format));
        }

        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::build(&frequencies);
        let mut table = CodeTable::from_tree(&tree)?;
        if format == TableFormat::Canonical {
            table = table.canonical()?;
        }
        debug!(
            symbols = table.len(),
            depth = tree.depth(),
            "built code table"
        );

        let mut writer = BitWriter::with_capacity(table.encoded_bit_len(&frequencies) as usize);
        for &byte in data {
            let code = table.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
            writer.push_code(code);
        }
        let (payload, payload_bits) = writer.finish();

        debug!(
            input_bytes = data.len(),
            payload_bits,
            payload_bytes = payload.len(),
            "encoded payload"
        );

        Ok(CompressedArtifact::new(
            data.len() as u64,
            format,
            table,
            payload,
            payload_bits,
        ))
    }
}

/// Encodes with the default configuration.
pub fn encode(data: &[u8]) -> Result<CompressedArtifact> {
    Encoder::default().encode(data)
}
