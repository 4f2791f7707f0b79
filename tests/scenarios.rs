//! End-to-end behaviour of the codec on fixed inputs.

use huffpack::{
    CodecConfig, CompressedArtifact, Encoder, HuffmanError, TableFormat, compress, decode,
    decompress, encode,
};

#[test]
fn skewed_scenario_orders_code_lengths() {
    let artifact = encode(b"aabbbcccc").unwrap();
    let table = artifact.table();
    let a = table.get(b'a').unwrap().len();
    let b = table.get(b'b').unwrap().len();
    let c = table.get(b'c').unwrap().len();

    assert!(c < a && c < b, "c should have the shortest code");
    assert!(a >= b && a >= c, "a should have the longest code");
    assert!(artifact.payload_bits() < 9 * 8);
    assert_eq!(decode(&artifact).unwrap(), b"aabbbcccc");
}

#[test]
fn single_symbol_round_trips() {
    let artifact = encode(b"aaaa").unwrap();
    assert!(!artifact.payload().is_empty());
    assert_eq!(artifact.table().len(), 1);
    assert_eq!(decompress(&artifact.to_bytes()).unwrap(), b"aaaa");
}

#[test]
fn empty_input_round_trips() {
    let bytes = compress(&[]).unwrap();
    assert_eq!(CompressedArtifact::from_bytes(&bytes).unwrap().original_len(), 0);
    assert!(decompress(&bytes).unwrap().is_empty());
}

#[test]
fn every_byte_value_round_trips() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let packed = compress(&data).unwrap();
    assert_eq!(decompress(&packed).unwrap(), data);

    let artifact = encode(&data).unwrap();
    // a uniform 256-symbol alphabet gets eight-bit codes
    assert!(artifact.table().iter().all(|(_, code)| code.len() == 8));
}

#[test]
fn canonical_tables_round_trip() {
    let data = b"she sells sea shells by the sea shore";
    let encoder = Encoder::new(CodecConfig::canonical());
    let artifact = encoder.encode(data).unwrap();
    let parsed = CompressedArtifact::from_bytes(&artifact.to_bytes()).unwrap();
    assert_eq!(parsed.table_format(), TableFormat::Canonical);
    assert_eq!(decode(&parsed).unwrap(), data);

    // canonical storage drops the code bits, so it is never larger
    let explicit = encode(data).unwrap().to_bytes();
    assert!(artifact.to_bytes().len() <= explicit.len());
}

#[test]
fn truncated_artifacts_never_decode_silently() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let bytes = compress(data).unwrap();
    for len in 0..bytes.len() {
        match decompress(&bytes[..len]) {
            Err(HuffmanError::CorruptStream(_)) | Err(HuffmanError::OutOfRange { .. }) => {}
            other => panic!("truncation to {len} bytes gave {other:?}"),
        }
    }
}

#[test]
fn truncated_payload_in_memory_is_corrupt() {
    let artifact = encode(b"mississippi river").unwrap();
    let keep = artifact.payload_bits() - 3;
    let mut payload = artifact.payload().to_vec();
    payload.truncate(keep.div_ceil(8) as usize);
    let truncated = CompressedArtifact::new(
        artifact.original_len(),
        artifact.table_format(),
        artifact.table().clone(),
        payload,
        keep,
    );
    assert!(matches!(
        decode(&truncated),
        Err(HuffmanError::CorruptStream(_))
    ));
}

#[test]
fn flipped_table_bits_are_detected_or_harmless() {
    let data = b"abcabcabcddddd";
    let bytes = compress(data).unwrap();
    for index in 0..bytes.len() {
        let mut damaged = bytes.clone();
        damaged[index] ^= 0x01;
        if let Ok(decoded) = decompress(&damaged) {
            // a flip that still decodes must at least keep the length
            assert_eq!(decoded.len(), data.len());
        }
    }
}
