use tracing::debug;

use crate::bits::BitReader;
use crate::container::CompressedArtifact;
use crate::error::{HuffmanError, Result};
use crate::trie::{DecodeTrie, Step};

/// Rebuilds the original bytes from an artifact.
///
/// The decode trie is derived from the stored table and dropped when the
/// call returns. Exactly `original_len` symbols are emitted; running out of
/// bits first, walking off the trie, or leaving meaningful bits unread is a
/// `CorruptStream`.
pub fn decode(artifact: &CompressedArtifact) -> Result<Vec<u8>> {
    let expected = artifact.original_len();
    if expected == 0 {
        if artifact.payload_bits() != 0 {
            return Err(HuffmanError::corrupt(format!(
                "{} payload bits for an empty input",
                artifact.payload_bits()
            )));
        }
        return Ok(Vec::new());
    }
    if artifact.table().is_empty() {
        return Err(HuffmanError::corrupt(format!(
            "no code table for {expected} symbols"
        )));
    }

    let trie = DecodeTrie::from_table(artifact.table())?;
    let mut reader = BitReader::new(artifact.payload(), artifact.payload_bits())
        .map_err(|_| HuffmanError::corrupt("payload shorter than its declared bit count"))?;

    // each symbol takes at least one bit
    let capacity = expected.min(artifact.payload_bits()) as usize;
    let mut output = Vec::with_capacity(capacity);
    let mut node = DecodeTrie::ROOT;

    while (output.len() as u64) < expected {
        let bit = reader.read_bit().map_err(|_| {
            HuffmanError::corrupt(format!(
                "payload exhausted after {} of {expected} symbols",
                output.len()
            ))
        })?;

        match trie.step(node, bit) {
            Step::Symbol(symbol) => {
                output.push(symbol);
                node = DecodeTrie::ROOT;
            }
            Step::Inner(next) => node = next,
            Step::Dead => {
                return Err(HuffmanError::corrupt(format!(
                    "bit sequence at position {} matches no code",
                    reader.position() - 1
                )));
            }
        }
    }

    if reader.remaining() != 0 {
        return Err(HuffmanError::corrupt(format!(
            "{} payload bits left after {expected} symbols",
            reader.remaining()
        )));
    }

    debug!(symbols = output.len(), bits = reader.position(), "decoded payload");
    Ok(output)
}
