//! Property tests: shared fields survive a trip through the other schema.

use std::collections::BTreeMap;

use ledger_bridge::bridge::Bridge;
use ledger_bridge::schema::{external, ledger};
use ledger_bridge::wire::Message;
use proptest::prelude::*;

fn blob() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..24)
}

fn short_string() -> impl Strategy<Value = String> {
    "[a-z0-9_]{0,12}"
}

prop_compose! {
    fn arb_utxo()(
        amount in blob(),
        to_addr in blob(),
        to_pubkey in blob(),
        ref_txid in blob(),
        ref_offset in any::<i32>(),
    ) -> external::Utxo {
        external::Utxo { amount, to_addr, to_pubkey, ref_txid, ref_offset }
    }
}

prop_compose! {
    fn arb_tx_input()(
        ref_txid in blob(),
        ref_offset in any::<i32>(),
        from_addr in blob(),
        amount in blob(),
        frozen_height in any::<i64>(),
    ) -> external::TxInput {
        external::TxInput { ref_txid, ref_offset, from_addr, amount, frozen_height }
    }
}

prop_compose! {
    fn arb_invoke_request()(
        module_name in short_string(),
        contract_name in short_string(),
        method_name in short_string(),
        args in proptest::collection::btree_map("[a-z]{1,8}", blob(), 0..4),
        limits in proptest::collection::vec((0i32..4, any::<i64>()), 0..4),
        amount in short_string(),
    ) -> external::InvokeRequest {
        external::InvokeRequest {
            module_name,
            contract_name,
            method_name,
            args,
            resource_limits: limits
                .into_iter()
                .map(|(resource_type, limit)| external::ResourceLimit { resource_type, limit })
                .collect(),
            amount,
        }
    }
}

prop_compose! {
    fn arb_transaction()(
        txid in blob(),
        tx_inputs in proptest::collection::vec(arb_tx_input(), 0..4),
        desc in blob(),
        coinbase in any::<bool>(),
        nonce in short_string(),
        timestamp in any::<i64>(),
        version in any::<i32>(),
        contract_requests in proptest::collection::vec(arb_invoke_request(), 0..3),
        auth_require in proptest::collection::vec(short_string(), 0..4),
        received_timestamp in any::<i64>(),
    ) -> external::Transaction {
        external::Transaction {
            txid,
            tx_inputs,
            desc,
            coinbase,
            nonce,
            timestamp,
            version,
            contract_requests,
            auth_require,
            received_timestamp,
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn prop_utxo_round_trip(utxo in arb_utxo()) {
        let bridge = Bridge::default();
        let ledger = bridge.utxo_to_ledger(Some(&utxo));
        prop_assert!(ledger.is_some());
        prop_assert_eq!(bridge.utxo_to_external(ledger.as_ref()), Some(utxo));
    }

    #[test]
    fn prop_transaction_round_trip(tx in arb_transaction()) {
        let bridge = Bridge::default();
        let ledger = bridge.try_tx_to_ledger(Some(&tx)).unwrap();
        prop_assert_eq!(bridge.try_tx_to_external(ledger.as_ref()).unwrap(), Some(tx));
    }

    #[test]
    fn prop_invoke_requests_keep_order(reqs in proptest::collection::vec(arb_invoke_request(), 0..6)) {
        let bridge = Bridge::default();
        let converted = bridge.invoke_requests_to_ledger(Some(&reqs)).unwrap().unwrap();
        prop_assert_eq!(converted.len(), reqs.len());
        for (src, dst) in reqs.iter().zip(&converted) {
            prop_assert_eq!(&src.contract_name, &dst.contract_name);
            prop_assert_eq!(&src.args, &dst.args);
        }
    }

    #[test]
    fn prop_hd_info_never_reaches_external(
        hd_public_key in blob(),
        original_hash in blob(),
        nonce in short_string(),
    ) {
        let bridge = Bridge::default();
        let tx = ledger::Transaction {
            nonce: nonce.clone(),
            hd_info: Some(ledger::HdInfo { hd_public_key, original_hash }),
            ..Default::default()
        };
        let external = bridge.tx_to_external(Some(&tx)).unwrap();
        let back = bridge.tx_to_ledger(Some(&external)).unwrap();
        prop_assert_eq!(back.hd_info, None);
        prop_assert_eq!(back.nonce, nonce);
    }

    #[test]
    fn prop_acl_weights_survive(
        weights in proptest::collection::btree_map("[a-z]{1,6}", -1.0e6f64..1.0e6, 0..5),
        rule in 0i32..8,
        accept_value in -1.0e6f64..1.0e6,
    ) {
        let bridge = Bridge::default();
        let acl = ledger::Acl {
            pm: Some(ledger::PermissionModel { rule, accept_value }),
            aks_weight: weights.clone(),
        };
        let converted = bridge.acl_to_external(Some(&acl)).unwrap();
        prop_assert_eq!(converted.aks_weight, weights);
        let pm = converted.pm.unwrap();
        prop_assert_eq!(pm.rule, rule);
        prop_assert_eq!(pm.accept_value, accept_value);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        // garbage either decodes or reports an error
        let _ = external::Transaction::decode(bytes.as_slice());
        let _ = ledger::InternalBlock::decode(bytes.as_slice());
    }

    #[test]
    fn prop_block_failed_txs_survive(
        failed_txs in proptest::collection::btree_map("[0-9a-f]{8}", short_string(), 0..4),
        height in any::<i64>(),
    ) {
        let bridge = Bridge::default();
        let block = ledger::InternalBlock {
            height,
            failed_txs: failed_txs.clone(),
            ..Default::default()
        };
        let converted = bridge.block_to_external(Some(&block)).unwrap();
        prop_assert_eq!(converted.height, height);
        prop_assert_eq!(converted.failed_txs, failed_txs);
    }
}

#[test]
fn test_empty_map_value_round_trips() {
    let bridge = Bridge::default();
    let mut args = BTreeMap::new();
    args.insert("empty".to_string(), Vec::new());
    let req = external::InvokeRequest {
        contract_name: "c".to_string(),
        args,
        ..Default::default()
    };
    let converted = bridge.invoke_request_to_ledger(Some(&req)).unwrap();
    assert_eq!(converted.args.get("empty"), Some(&Vec::new()));
}
