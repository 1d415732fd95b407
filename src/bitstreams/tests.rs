use crate::code_table::Code;

use super::{BinaryReader, BinaryWriterBuilder};

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

#[test]
fn test_msb_first_packing() {
    let mut writer = BinaryWriterBuilder::new();
    writer.push_code(&code("10110001"));

    let packed = writer.build();

    assert_eq!(&*packed.os, &[0b1011_0001]);
    assert_eq!(packed.written_bits, 8);
}

#[test]
fn test_final_byte_is_zero_padded() {
    let mut writer = BinaryWriterBuilder::new();
    writer.push_code(&code("111"));
    writer.push_code(&code("01"));

    let packed = writer.build();

    assert_eq!(&*packed.os, &[0b1110_1000]);
    assert_eq!(packed.written_bits, 5);
}

#[test]
fn test_codes_span_byte_boundaries() {
    let mut writer = BinaryWriterBuilder::with_capacity(12);
    writer.push_code(&code("110011"));
    writer.push_code(&code("0011"));
    writer.push_code(&code("11"));

    let packed = writer.build();

    assert_eq!(&*packed.os, &[0b1100_1100, 0b1111_0000]);
    assert_eq!(packed.written_bits, 12);
}

#[test]
fn test_empty_writer_builds_no_bytes() {
    let packed = BinaryWriterBuilder::new().build();

    assert!(packed.os.is_empty());
    assert_eq!(packed.written_bits, 0);
}

#[test]
fn test_reader_reads_msb_first() {
    let bytes = [0b1000_0001, 0b0100_0000];
    let mut reader = BinaryReader::new(&bytes);

    let bits: Vec<_> = std::iter::from_fn(|| reader.read_bit()).collect();

    assert_eq!(bits.len(), 16);
    assert!(bits[0] && bits[7] && bits[9]);
    assert_eq!(bits.iter().filter(|&&b| b).count(), 3);
    assert_eq!(reader.read_bits, 16);
    assert!(reader.is_exhausted());
}

#[test]
fn test_reader_remaining_bits() {
    let bytes = [0xFF, 0x00, 0xAA];
    let mut reader = BinaryReader::new(&bytes);
    assert_eq!(reader.remaining_bits(), 24);

    for _ in 0..5 {
        reader.read_bit();
    }

    assert_eq!(reader.remaining_bits(), 19);
}

#[test]
fn test_write_then_read_random_bits() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let bits: Vec<bool> = (0..1001).map(|_| rng.gen()).collect();

    let mut writer = BinaryWriterBuilder::new();
    for &bit in bits.iter() {
        writer.push_bit(bit);
    }
    let packed = writer.build();
    assert_eq!(packed.os.len(), 126);

    let mut reader = BinaryReader::new(&packed.os);
    let read: Vec<_> = (0..bits.len()).map(|_| reader.read_bit().unwrap()).collect();

    assert_eq!(read, bits);
    assert_eq!(reader.remaining_bits(), 7);
    while let Some(padding) = reader.read_bit() {
        assert!(!padding);
    }
}
