//! # huffpack
//!
//! Static Huffman coding for byte buffers.
//!
//! The pipeline runs [`FrequencyTable`] → [`HuffmanTree`] → [`CodeTable`] →
//! [`BitWriter`], producing a [`CompressedArtifact`] that carries the
//! original length, the code table and the packed payload, so it can be
//! decoded with nothing else at hand.
//!
//! ```
//! let packed = huffpack::compress(b"aabbbcccc")?;
//! assert_eq!(huffpack::decompress(&packed)?, b"aabbbcccc");
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Equal weights during tree construction are ordered by the lowest symbol
//! in each subtree, so a given input always produces the same artifact.

pub mod bits;
pub mod code;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod tree;
pub mod trie;

pub use bits::{BitReader, BitWriter};
pub use code::{Code, CodeTable, MAX_CODE_LEN};
pub use config::{CodecConfig, TableFormat};
pub use container::CompressedArtifact;
pub use decoder::decode;
pub use encoder::{Encoder, encode};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree, NodeId};
pub use trie::{DecodeTrie, Step};

/// Encodes `data` with the default configuration and serializes the result.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.to_bytes())
}

/// Parses a serialized artifact and decodes it.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    decode(&CompressedArtifact::from_bytes(bytes)?)
}
