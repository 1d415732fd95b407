use log::debug;

use crate::{
    bitstreams::BinaryReader,
    config::{CodecConfig, MatcherKind},
    container::{parse_container, Container},
    HuffError, Result,
};

use super::matcher::{LinearScanMatcher, PrefixMatcher, Step, TrieMatcher};

pub struct HuffmanDecoder {
    config: CodecConfig,
}

impl HuffmanDecoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let container = parse_container(self.config.layout, bytes)?;
        debug!(
            "decoding {} body bytes with a {}-entry table ({} matcher)",
            container.body.len(),
            container.table.len(),
            self.config.matcher
        );

        if container.table.is_empty() {
            return Ok(Vec::new());
        }

        match self.config.matcher {
            MatcherKind::Trie => {
                let mut matcher = TrieMatcher::new(&container.table)?;
                walk_bits(&mut matcher, &container)
            }
            MatcherKind::LinearScan => {
                let mut matcher = LinearScanMatcher::new(&container.table);
                walk_bits(&mut matcher, &container)
            }
        }
    }
}

fn walk_bits<M: PrefixMatcher>(matcher: &mut M, container: &Container) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(container.body);

    match container.symbol_count {
        Some(count) => walk_counted(matcher, &mut reader, count),
        None => walk_until_exhausted(matcher, &mut reader),
    }
}

/// Decodes exactly `count` symbols, then requires the rest of the body to be
/// zero padding inside the final byte.
fn walk_counted<M: PrefixMatcher>(matcher: &mut M, reader: &mut BinaryReader, count: u64) -> Result<Vec<u8>> {
    // Every symbol takes at least one bit.
    if count > reader.remaining_bits() {
        return Err(HuffError::malformed(format!(
            "{count} symbols declared but the body holds only {} bits",
            reader.remaining_bits()
        )));
    }

    let mut output = Vec::with_capacity(count as usize);

    while (output.len() as u64) < count {
        let Some(bit) = reader.read_bit() else {
            return Err(HuffError::malformed(format!(
                "bitstream ended after {} of {count} symbols",
                output.len()
            )));
        };

        match matcher.push_bit(bit) {
            Step::Emit(symbol) => output.push(symbol),
            Step::Pending => {}
            Step::Dead => {
                return Err(HuffError::malformed(format!(
                    "bits ending at offset {} match no code",
                    reader.read_bits - 1
                )));
            }
        }
    }

    if reader.remaining_bits() >= 8 {
        return Err(HuffError::malformed(format!(
            "{} trailing bits after the last symbol",
            reader.remaining_bits()
        )));
    }
    while let Some(bit) = reader.read_bit() {
        if bit {
            return Err(HuffError::malformed("non-zero padding after the last symbol"));
        }
    }

    Ok(output)
}

/// Legacy walk: decode until the body runs out. An incomplete trailing
/// candidate is dropped, a bit path that no code can complete is not.
fn walk_until_exhausted<M: PrefixMatcher>(matcher: &mut M, reader: &mut BinaryReader) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    while let Some(bit) = reader.read_bit() {
        match matcher.push_bit(bit) {
            Step::Emit(symbol) => output.push(symbol),
            Step::Pending => {}
            Step::Dead => {
                return Err(HuffError::malformed(format!(
                    "bits ending at offset {} match no code",
                    reader.read_bits - 1
                )));
            }
        }
    }

    if !matcher.is_idle() {
        debug!("ignoring an incomplete code at the end of the body");
    }

    Ok(output)
}
