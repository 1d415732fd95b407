//! Container framing:
//!
//! ```text
//! [table length: 1 byte (legacy, compact) or 2 bytes LE (wide)]
//! [serialized code table]
//! [symbol count: 8 bytes LE (compact, wide only)]
//! [MSB-first packed body, zero-padded]
//! ```

use std::io::Write;

use log::trace;

use crate::{code_table::CodeTable, config::Layout, HuffError, Result};

const SYMBOL_COUNT_BYTES: usize = 8;

/// A parsed container. The body is borrowed from the input.
#[derive(Debug)]
pub struct Container<'a> {
    pub table: CodeTable,
    /// `None` for the legacy layout, which does not record it.
    pub symbol_count: Option<u64>,
    pub body: &'a [u8],
}

pub fn write_container(layout: Layout, table_data: &[u8], symbol_count: u64, body: &[u8]) -> Result<Vec<u8>> {
    let max = layout.max_table_len();
    if table_data.len() > max {
        return Err(HuffError::TableTooLarge { len: table_data.len(), max });
    }

    let mut bytes = Vec::with_capacity(header_len(layout) + table_data.len() + body.len());

    match layout {
        Layout::Legacy | Layout::Compact => bytes.push(table_data.len() as u8),
        Layout::Wide => bytes.write_all(&(table_data.len() as u16).to_le_bytes())?,
    }
    bytes.write_all(table_data)?;

    if layout.has_symbol_count() {
        bytes.write_all(&symbol_count.to_le_bytes())?;
    }
    bytes.write_all(body)?;

    trace!("{layout} container: {} table bytes, {} body bytes", table_data.len(), body.len());
    Ok(bytes)
}

pub fn parse_container(layout: Layout, bytes: &[u8]) -> Result<Container<'_>> {
    let len_bytes = layout.table_len_bytes();
    let Some(len_field) = bytes.get(..len_bytes) else {
        return Err(HuffError::malformed(format!(
            "container of {} bytes is too short for a {len_bytes}-byte table length",
            bytes.len()
        )));
    };

    let table_len = match layout {
        Layout::Legacy | Layout::Compact => len_field[0] as usize,
        Layout::Wide => u16::from_le_bytes([len_field[0], len_field[1]]) as usize,
    };

    let rest = &bytes[len_bytes..];
    if table_len > rest.len() {
        return Err(HuffError::malformed(format!(
            "declared table length {table_len} exceeds the {} bytes available",
            rest.len()
        )));
    }
    let (table_data, rest) = rest.split_at(table_len);
    let table = CodeTable::deserialize(table_data)?;

    let (symbol_count, body) = if layout.has_symbol_count() {
        if rest.len() < SYMBOL_COUNT_BYTES {
            return Err(HuffError::malformed("container ends inside the symbol count"));
        }
        let (count, body) = rest.split_at(SYMBOL_COUNT_BYTES);
        let mut count_bytes = [0u8; SYMBOL_COUNT_BYTES];
        count_bytes.copy_from_slice(count);
        (Some(u64::from_le_bytes(count_bytes)), body)
    } else {
        (None, rest)
    };

    if table.is_empty() && (!body.is_empty() || symbol_count.unwrap_or(0) != 0) {
        return Err(HuffError::malformed("container has an empty code table but a non-empty body"));
    }

    Ok(Container { table, symbol_count, body })
}

/// Bytes taken by the fixed-size fields of a layout.
pub fn header_len(layout: Layout) -> usize {
    layout.table_len_bytes() + if layout.has_symbol_count() { SYMBOL_COUNT_BYTES } else { 0 }
}

#[cfg(test)]
mod tests;
