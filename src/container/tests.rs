use crate::{code_table::CodeTable, config::Layout, HuffError};

use super::{header_len, parse_container, write_container};

fn sample_table() -> (CodeTable, Vec<u8>) {
    let table = CodeTable::deserialize(b"a\x011b\x010").unwrap();
    let data = table.serialize().unwrap();
    (table, data)
}

#[test]
fn test_compact_layout_bytes() {
    let (_, data) = sample_table();

    let bytes = write_container(Layout::Compact, &data, 5, &[0b1111_0000]).unwrap();

    let mut expected = vec![6];
    expected.extend_from_slice(b"a\x011b\x010");
    expected.extend_from_slice(&5u64.to_le_bytes());
    expected.push(0b1111_0000);
    assert_eq!(bytes, expected);
}

#[test]
fn test_legacy_layout_has_no_symbol_count() {
    let (_, data) = sample_table();

    let bytes = write_container(Layout::Legacy, &data, 5, &[0xAB]).unwrap();

    assert_eq!(bytes.len(), 1 + data.len() + 1);
    assert_eq!(header_len(Layout::Legacy), 1);
}

#[test]
fn test_wide_layout_uses_two_length_bytes() {
    let (_, data) = sample_table();

    let bytes = write_container(Layout::Wide, &data, 1, &[0x80]).unwrap();

    assert_eq!(&bytes[..2], &[6, 0]);
    assert_eq!(bytes.len(), header_len(Layout::Wide) + data.len() + 1);
}

#[test]
fn test_parse_roundtrip_every_layout() {
    let (table, data) = sample_table();

    for layout in [Layout::Legacy, Layout::Compact, Layout::Wide] {
        let bytes = write_container(layout, &data, 9, &[1, 2, 3]).unwrap();
        let container = parse_container(layout, &bytes).unwrap();

        assert_eq!(container.table, table);
        assert_eq!(container.body, &[1, 2, 3]);
        assert_eq!(container.symbol_count, layout.has_symbol_count().then_some(9));
    }
}

#[test]
fn test_table_too_large_for_length_field() {
    let data = vec![b'0'; 256];

    let result = write_container(Layout::Compact, &data, 0, &[]);

    assert!(matches!(result, Err(HuffError::TableTooLarge { len: 256, max: 255 })));
    assert!(write_container(Layout::Wide, &data, 0, &[]).is_ok());
}

#[test]
fn test_declared_table_length_exceeds_input() {
    let result = parse_container(Layout::Compact, &[10, b'a', 1, b'0']);

    assert!(matches!(result, Err(HuffError::MalformedContainer(_))));
}

#[test]
fn test_empty_input_is_malformed() {
    for layout in [Layout::Legacy, Layout::Compact, Layout::Wide] {
        assert!(matches!(parse_container(layout, &[]), Err(HuffError::MalformedContainer(_))));
    }
}

#[test]
fn test_truncated_symbol_count() {
    let result = parse_container(Layout::Compact, &[3, b'a', 1, b'0', 1, 0, 0]);

    assert!(matches!(result, Err(HuffError::MalformedContainer(_))));
}

#[test]
fn test_empty_table_with_body_is_malformed() {
    let mut bytes = vec![0];
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.push(0xFF);

    let result = parse_container(Layout::Compact, &bytes);

    assert!(matches!(result, Err(HuffError::MalformedContainer(_))));
}
