use log::debug;
use serde::Serialize;

use crate::{
    bitstreams::BinaryWriterBuilder,
    code_table::CodeTable,
    config::{CodecConfig, Layout},
    container::write_container,
    frequency::FrequencyMap,
    tree::HuffmanTree,
    utils::timer::Timer,
    HuffError, Result,
};

/// What one encode call produced, and how long each phase took (ns).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EncodeStats {
    pub layout: Layout,
    pub original_length: usize,
    pub distinct_symbols: usize,
    pub max_code_len: usize,
    pub tree_depth: usize,
    pub table_bytes: usize,
    pub body_bits: u64,
    pub body_bytes: usize,
    pub container_bytes: usize,
    pub count_time: u64,
    pub tree_time: u64,
    pub table_time: u64,
    pub pack_time: u64,
}

impl EncodeStats {
    /// Container size over message size; 0 for an empty message.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.container_bytes as f64 / self.original_length as f64
    }
}

pub struct HuffmanEncoder {
    config: CodecConfig,
}

impl HuffmanEncoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn encode(&self, message: &[u8]) -> Result<(Vec<u8>, EncodeStats)> {
        let layout = self.config.layout;
        let mut stats = EncodeStats { layout, original_length: message.len(), ..Default::default() };

        if message.is_empty() {
            let container = write_container(layout, &[], 0, &[])?;
            stats.container_bytes = container.len();
            return Ok((container, stats));
        }

        let mut timer = Timer::new();

        let frequencies = timer.time(|| FrequencyMap::count(message));
        stats.count_time = timer.total_time as u64;

        // The tree only lives long enough to derive the table.
        let table = {
            let mut tree_timer = Timer::new();
            let tree = tree_timer.time(|| HuffmanTree::build(&frequencies))?;
            stats.tree_time = tree_timer.total_time as u64;
            stats.tree_depth = tree.depth();

            let mut table_timer = Timer::new();
            let table = table_timer.time(|| CodeTable::from_tree(&tree));
            stats.table_time = table_timer.total_time as u64;
            table
        };

        let table_data = table.serialize()?;

        let mut pack_timer = Timer::new();
        pack_timer.start();
        let mut writer = BinaryWriterBuilder::with_capacity(table.encoded_bits(&frequencies));
        for &byte in message {
            let code = table
                .get(byte)
                .ok_or_else(|| HuffError::InvalidInput(format!("symbol {byte:#04x} is missing from the code table")))?;
            writer.push_code(code);
        }
        let body = writer.build();
        pack_timer.stop();
        stats.pack_time = pack_timer.total_time as u64;

        let container = write_container(layout, &table_data, message.len() as u64, &body.os)?;

        stats.distinct_symbols = table.len();
        stats.max_code_len = table.max_code_len();
        stats.table_bytes = table_data.len();
        stats.body_bits = body.written_bits;
        stats.body_bytes = body.os.len();
        stats.container_bytes = container.len();

        debug!(
            "encoded {} bytes ({} symbols) into {} bytes: {} table bytes, {} body bits",
            stats.original_length, stats.distinct_symbols, stats.container_bytes, stats.table_bytes, stats.body_bits
        );

        Ok((container, stats))
    }
}
