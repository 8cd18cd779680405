//! Byte-exact wire fixtures in the standard protobuf encoding.

use std::collections::BTreeMap;

use ledger_bridge::schema::{external, ledger};
use ledger_bridge::wire::{DecodeErrorKind, Message, WireType};

fn fixture(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

#[test]
fn test_negative_enum_value_is_ten_byte_varint() {
    let limit = ledger::ResourceLimit {
        resource_type: -1,
        limit: 0,
    };
    let bytes = fixture("08ffffffffffffffffff01");
    assert_eq!(limit.encode_to_vec(), bytes);

    let decoded = external::ResourceLimit::decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded.resource_type, -1);
    assert_eq!(external::ResourceType::try_from(decoded.resource_type), Err(-1));
}

#[test]
fn test_negative_int64() {
    let limit = ledger::ResourceLimit {
        resource_type: ledger::ResourceType::Disk.into(),
        limit: -2,
    };
    assert_eq!(limit.encode_to_vec(), fixture("080210feffffffffffffffff01"));
}

#[test]
fn test_double_is_little_endian_fixed64() {
    let pm = ledger::PermissionModel {
        rule: ledger::PermissionRule::SignThreshold.into(),
        accept_value: 1.0,
    };
    assert_eq!(pm.encode_to_vec(), fixture("08011100000000000000f03f"));
}

#[test]
fn test_map_entry_layout() {
    let mut aks_weight = BTreeMap::new();
    aks_weight.insert("a".to_string(), 0.5);
    let acl = ledger::Acl {
        pm: None,
        aks_weight,
    };
    let bytes = fixture("120c0a016111000000000000e03f");
    assert_eq!(acl.encode_to_vec(), bytes);
    assert_eq!(external::Acl::decode(bytes.as_slice()).unwrap().aks_weight["a"], 0.5);
}

#[test]
fn test_embedded_message_and_bool() {
    let record = ledger::UtxoRecord {
        utxo_count: "1".to_string(),
        utxo_amount: String::new(),
        item: Some(vec![ledger::UtxoKey {
            ref_txid: "ab".to_string(),
            ..Default::default()
        }]),
    };
    assert_eq!(record.encode_to_vec(), fixture("0a01311a040a026162"));

    let status = ledger::ContractStatus {
        is_banned: true,
        ..Default::default()
    };
    assert_eq!(status.encode_to_vec(), fixture("2001"));
}

#[test]
fn test_two_byte_keys_for_high_tags() {
    let tx = external::Transaction {
        auth_require: vec!["x".to_string(), "y".to_string()],
        ..Default::default()
    };
    let bytes = fixture("da010178da010179");
    assert_eq!(tx.encode_to_vec(), bytes);
    assert_eq!(ledger::Transaction::decode(bytes.as_slice()).unwrap().auth_require, vec!["x", "y"]);
}

#[test]
fn test_ledger_only_tag_is_skipped_by_external_decode() {
    let bytes = fixture("8a02030a0101");
    let tx = ledger::Transaction::decode(bytes.as_slice()).unwrap();
    assert_eq!(tx.hd_info.unwrap().hd_public_key, vec![0x01]);

    assert_eq!(external::Transaction::decode(bytes.as_slice()).unwrap(), external::Transaction::default());
}

#[test]
fn test_packed_payload_under_scalar_tag_is_rejected() {
    // Packed repeated int32 [1, 2] under tag 1; the schema declares tag 1 as a singular varint.
    let err = ledger::ResourceLimit::decode(fixture("0a020102").as_slice()).unwrap_err();
    assert_eq!(
        err.kind(),
        DecodeErrorKind::WireTypeMismatch {
            expected: WireType::Varint,
            actual: WireType::LengthDelimited,
        }
    );
    assert_eq!(err.path(), &[("ResourceLimit", "resource_type")]);
}
