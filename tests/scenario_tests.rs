//! End-to-end scenarios over concrete encodings.

use ber_tlv::{parse, to_string_tree, Tlv};

#[test]
fn test_integer_round_trip_positive_small() {
    // 02 01 0A
    let data = [0x02, 0x01, 0x0A];
    let node = parse(&data).unwrap();

    let Tlv::Integer(value) = &node else {
        panic!("expected Integer")
    };
    assert_eq!(value.to_i64(), Some(10));
    assert!(node.is_valid());
    assert!(node.findings().is_empty());
    assert_eq!(node.encoded().as_ref(), &data);
    assert_eq!(node.comment(), " # INTEGER := 10");
}

#[test]
fn test_integer_non_minimal() {
    // 02 02 00 7F: value 127 with a redundant leading zero octet.
    let data = [0x02, 0x02, 0x00, 0x7F];
    let node = parse(&data).unwrap();

    let Tlv::Integer(value) = &node else {
        panic!("expected Integer")
    };
    assert_eq!(value.to_i64(), Some(127));
    assert!(!node.is_valid());
    assert_eq!(node.findings(), ["9 MSBit all equal"]);
    assert_eq!(node.comment(), " # INTEGER := 127, findings: 9 MSBit all equal");
    // Best-effort decoding keeps the wire bytes.
    assert_eq!(node.encoded().as_ref(), &data);
}

#[test]
fn test_bit_string_with_three_unused_bits() {
    // 03 02 03 40
    let node = parse(&[0x03, 0x02, 0x03, 0x40]).unwrap();

    let Tlv::BitString(value) = &node else {
        panic!("expected BitString")
    };
    assert_eq!(value.number_of_unused_bits(), 3);
    assert_eq!(
        ber_tlv::BitString::to_bit_string(3, &value.content()),
        "01000"
    );
    assert_eq!(node.comment(), " # BITSTRING: 3 unused bits: '01000'");
    assert!(node.is_valid());
}

#[test]
fn test_set_not_mutually_exclusive() {
    // 31 05 81 01 11 81 00: two children tagged 0x81.
    let node = parse(&[0x31, 0x05, 0x81, 0x01, 0x11, 0x81, 0x00]).unwrap();

    let Tlv::Set(set) = &node else { panic!("expected Set") };
    assert_eq!(set.template().len(), 2);
    assert_eq!(set.template()[0].tag(), set.template()[1].tag());
    assert!(!node.is_valid());
    assert_eq!(node.findings(), ["tags not mutual exclusive"]);
}

#[test]
fn test_set_wrong_order() {
    // 31 04 42 01 47 02 01 47: APPLICATION tag before UNIVERSAL tag.
    let node = parse(&[0x31, 0x04, 0x42, 0x01, 0x47, 0x02, 0x01, 0x47]).unwrap();

    assert!(!node.is_valid());
    assert_eq!(node.findings(), ["tags not correctly sorted"]);
}

#[test]
fn test_sequence_tree() {
    // 30 06 05 00 04 02 47 14
    let node = parse(&[0x30, 0x06, 0x05, 0x00, 0x04, 0x02, 0x47, 0x14]).unwrap();

    let Tlv::Sequence(sequence) = &node else {
        panic!("expected Sequence")
    };
    assert!(matches!(sequence.template()[0], Tlv::Null(_)));
    let Tlv::OctetString(octets) = &sequence.template()[1] else {
        panic!("expected OctetString")
    };
    assert_eq!(octets.decoded(), vec![0x47, 0x14]);

    let expected = "30 06 # SEQUENCE with 2 elements\n\
                    |  05 00 # NULL\n\
                    |  04 02 4714 # OCTETSTRING";
    assert_eq!(to_string_tree(&node), expected);
}

#[test]
fn test_date() {
    // 1F 1F 08 "19650324"
    let data = [0x1F, 0x1F, 0x08, 0x31, 0x39, 0x36, 0x35, 0x30, 0x33, 0x32, 0x34];
    let node = parse(&data).unwrap();
    assert!(node.is_valid());
    assert_eq!(node.comment(), " # DATE := 1965-03-24");

    let mut delimited = vec![0x1F, 0x1F, 0x0A];
    delimited.extend_from_slice(b"2021-02-13");
    let node = parse(&delimited).unwrap();
    assert!(!node.is_valid());
    assert_eq!(node.findings(), ["wrong format"]);
    assert_eq!(
        node.comment(),
        " # DATE, findings: wrong format, value-field as UTF-8: 2021-02-13"
    );
}

#[test]
fn test_utf8_overlong() {
    // 'A' overlong-encoded as C1 81.
    let node = parse(&[0x0C, 0x02, 0xC1, 0x81]).unwrap();

    let Tlv::Utf8String(value) = &node else {
        panic!("expected Utf8String")
    };
    assert!(value.value().contains('\u{FFFD}'));
    assert_eq!(node.findings(), ["invalid encoding"]);
}

#[test]
fn test_octet_string_tree_recurses_into_embedded_tlvs() {
    // OCTET STRING whose content is NULL followed by BOOLEAN true.
    let node = parse(&[0x04, 0x05, 0x05, 0x00, 0x01, 0x01, 0xFF]).unwrap();
    let expected = "04 05 05000101FF # OCTETSTRING\n\
                    |  05 00 # NULL\n\
                    |  01 01 FF # BOOLEAN := true";
    assert_eq!(to_string_tree(&node), expected);
}

#[test]
fn test_tree_without_comments() {
    let node = parse(&[0x30, 0x06, 0x05, 0x00, 0x04, 0x02, 0x47, 0x14]).unwrap();
    let expected = "30 06\n|  05 00\n|  04 02 4714";
    assert_eq!(node.to_string_with(" ", "|  ", false), expected);
}

#[test]
fn test_generic_nodes_render_without_comment() {
    let node = parse(&[0xA1, 0x03, 0x81, 0x01, 0x11]).unwrap();
    let expected = "A1 03\n|  81 01 11";
    assert_eq!(to_string_tree(&node), expected);
}
