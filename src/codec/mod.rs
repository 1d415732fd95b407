pub mod decoder;
pub mod encoder;
pub mod matcher;

use crate::{config::CodecConfig, Result};

use self::{decoder::HuffmanDecoder, encoder::{EncodeStats, HuffmanEncoder}};

/// Encoder and decoder sharing one configuration. Holds no per-message
/// state: every call builds and drops its own frequencies, tree and table.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_stats(message).map(|(container, _)| container)
    }

    pub fn encode_with_stats(&self, message: &[u8]) -> Result<(Vec<u8>, EncodeStats)> {
        HuffmanEncoder::new(self.config).encode(message)
    }

    pub fn decode(&self, container: &[u8]) -> Result<Vec<u8>> {
        HuffmanDecoder::new(self.config).decode(container)
    }
}
