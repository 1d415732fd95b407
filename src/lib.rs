//! Byte-oriented Huffman compression.
//!
//! ```
//! let message = b"abracadabra";
//! let container = huffman_rust::encode(message)?;
//! assert_eq!(huffman_rust::decode(&container)?, message);
//! # Ok::<(), huffman_rust::HuffError>(())
//! ```

pub mod bitstreams;
pub mod code_table;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod properties;
pub mod tree;
pub mod utils;

pub use codec::{encoder::EncodeStats, HuffmanCodec};
pub use config::{CodecConfig, Layout, MatcherKind};
pub use error::{HuffError, Result};

/// A single byte of the input alphabet.
pub type Symbol = u8;

/// Encodes `message` into a container with the default (compact) layout.
pub fn encode(message: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::default().encode(message)
}

/// Inverse of [`encode`].
pub fn decode(container: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::default().decode(container)
}
