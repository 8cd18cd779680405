//! Conversions that do not go through the wire format.

use tracing::debug;

use crate::schema::{external, ledger};

/// Rebuilds a UTXO usage record field by field.
///
/// An absent item list stays absent; it is not replaced with an empty one.
pub fn utxo_record_to_external(record: Option<&ledger::UtxoRecord>) -> Option<external::UtxoRecord> {
    let record = record?;

    let item = record.item.as_ref().map(|items| {
        items
            .iter()
            .map(|key| external::UtxoKey {
                ref_txid: key.ref_txid.clone(),
                offset: key.offset.clone(),
                amount: key.amount.clone(),
            })
            .collect()
    });

    Some(external::UtxoRecord {
        utxo_count: record.utxo_count.clone(),
        utxo_amount: record.utxo_amount.clone(),
        item,
    })
}

/// Flattens a peer directory into the addresses of its direct entries.
///
/// Source order and duplicates are kept; nested peer lists are not visited.
pub fn peer_addresses(info: &ledger::PeerInfo) -> Vec<String> {
    info.peer.iter().map(|peer| peer.address.clone()).collect()
}

/// Maps a raw external subscription type onto the ledger enum.
///
/// Any value without an explicit mapping, including values unknown to the
/// external schema, becomes [`ledger::SubscribeType::Block`]. This never
/// fails: a client asking for an unsupported stream is silently subscribed to
/// blocks. Kept for compatibility with existing clients.
pub fn subscribe_type_to_ledger(raw: i32) -> ledger::SubscribeType {
    match external::SubscribeType::try_from(raw) {
        Ok(external::SubscribeType::Block) => ledger::SubscribeType::Block,
        Err(unknown) => {
            debug!(value = unknown, "unmapped subscribe type, using Block");
            ledger::SubscribeType::Block
        }
    }
}
