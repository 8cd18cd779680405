//! Named conversions, one pair of methods per entity.

use super::list::{convert_list, try_convert_list};
use super::Bridge;
use crate::error::Result;
use crate::schema::{external, ledger};

macro_rules! conversions {
    (
        $(
            $(#[$meta:meta])*
            $name:ident, $try_name:ident: $src:ty => $dst:ty;
        )*
    ) => {
        impl Bridge {
            $(
                $(#[$meta])*
                pub fn $name(&self, src: Option<&$src>) -> Option<$dst> {
                    self.convert(src)
                }

                #[doc = concat!("Explicit-error form of [`Bridge::", stringify!($name), "`].")]
                pub fn $try_name(&self, src: Option<&$src>) -> Result<Option<$dst>> {
                    self.try_convert(src)
                }
            )*
        }
    };
}

conversions! {
    /// Drops ledger-only fields such as `hd_info`.
    tx_to_external, try_tx_to_external: ledger::Transaction => external::Transaction;
    tx_to_ledger, try_tx_to_ledger: external::Transaction => ledger::Transaction;
    block_to_external, try_block_to_external: ledger::InternalBlock => external::InternalBlock;
    block_to_ledger, try_block_to_ledger: external::InternalBlock => ledger::InternalBlock;
    utxo_to_external, try_utxo_to_external: ledger::Utxo => external::Utxo;
    utxo_to_ledger, try_utxo_to_ledger: external::Utxo => ledger::Utxo;
    acl_to_external, try_acl_to_external: ledger::Acl => external::Acl;
    contract_status_to_external, try_contract_status_to_external:
        ledger::ContractStatus => external::ContractStatus;
    balance_detail_to_external, try_balance_detail_to_external:
        ledger::BalanceDetailInfo => external::TokenFrozenDetail;
    ledger_meta_to_external, try_ledger_meta_to_external: ledger::LedgerMeta => external::LedgerMeta;
    utxo_meta_to_external, try_utxo_meta_to_external: ledger::UtxoMeta => external::UtxoMeta;
    invoke_request_to_ledger, try_invoke_request_to_ledger:
        external::InvokeRequest => ledger::InvokeRequest;
    invoke_response_to_external, try_invoke_response_to_external:
        ledger::InvokeResponse => external::InvokeResponse;
    candidate_ratio_to_external, try_candidate_ratio_to_external:
        ledger::CandidateRatio => external::CandidateRatio;
    bonus_reply_to_external, try_bonus_reply_to_external:
        ledger::BonusQueryReply => external::BonusQueryReply;
    verification_table_to_external, try_verification_table_to_external:
        ledger::VerificationTable => external::VerificationTable;
    status_explorer_to_external, try_status_explorer_to_external:
        ledger::BcStatusExplorer => external::BcStatusExplorer;
    /// Pledge and vote records for one address.
    voting_records_to_external, try_voting_records_to_external:
        ledger::PledgeVotingResponse => external::PledgeVotingResponse;
}

impl Bridge {
    pub fn utxo_list_to_external(&self, utxos: Option<&[ledger::Utxo]>) -> Result<Option<Vec<external::Utxo>>> {
        convert_list(utxos, "utxo", |utxo| self.utxo_to_external(Some(utxo)))
    }

    pub fn contract_status_list_to_external(
        &self,
        statuses: Option<&[ledger::ContractStatus]>,
    ) -> Result<Option<Vec<external::ContractStatus>>> {
        convert_list(statuses, "contract status", |status| {
            self.contract_status_to_external(Some(status))
        })
    }

    pub fn balance_details_to_external(
        &self,
        details: Option<&[ledger::BalanceDetailInfo]>,
    ) -> Result<Option<Vec<external::TokenFrozenDetail>>> {
        convert_list(details, "balance detail", |detail| {
            self.balance_detail_to_external(Some(detail))
        })
    }

    /// Request batches surface the failing element's own error.
    pub fn invoke_requests_to_ledger(
        &self,
        reqs: Option<&[external::InvokeRequest]>,
    ) -> Result<Option<Vec<ledger::InvokeRequest>>> {
        try_convert_list(reqs, "invoke request", |req| self.try_invoke_request_to_ledger(Some(req)))
    }

    /// See [`super::utxo_record_to_external`].
    pub fn utxo_record_to_external(&self, record: Option<&ledger::UtxoRecord>) -> Option<external::UtxoRecord> {
        super::remap::utxo_record_to_external(record)
    }

    /// See [`super::peer_addresses`].
    pub fn peer_addresses(&self, info: &ledger::PeerInfo) -> Vec<String> {
        super::remap::peer_addresses(info)
    }

    /// See [`super::subscribe_type_to_ledger`].
    pub fn subscribe_type_to_ledger(&self, raw: i32) -> ledger::SubscribeType {
        super::remap::subscribe_type_to_ledger(raw)
    }
}
