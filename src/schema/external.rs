//! Service-facing messages.
//!
//! These are the types RPC callers see. Their tags are frozen; the ledger
//! schema is free to grow fields around them.

use std::collections::BTreeMap;

crate::enumeration! {
    /// Event stream a client subscribes to.
    pub enum SubscribeType {
        #[default]
        Block = 0,
    }
}

crate::enumeration! {
    pub enum ResourceType {
        #[default]
        Cpu = 0,
        Memory = 1,
        Disk = 2,
        /// Fee charged for a contract call.
        Xfee = 3,
    }
}

crate::enumeration! {
    pub enum PermissionRule {
        #[default]
        Null = 0,
        SignThreshold = 1,
        SignAkset = 2,
        SignRate = 3,
        SignSuma = 4,
        SignSumb = 5,
        CaServer = 6,
        Community = 7,
    }
}

crate::message! {
    /// Common header of query replies.
    pub struct Header {
        logid: String = (1, string),
        from_node: String = (2, string),
        error: i32 = (3, int32),
    }
}

crate::message! {
    pub struct TxInput {
        ref_txid: Vec<u8> = (1, bytes),
        ref_offset: i32 = (2, int32),
        from_addr: Vec<u8> = (5, bytes),
        /// Big-endian unsigned amount.
        amount: Vec<u8> = (6, bytes),
        frozen_height: i64 = (7, int64),
    }
}

crate::message! {
    pub struct TxOutput {
        amount: Vec<u8> = (1, bytes),
        to_addr: Vec<u8> = (2, bytes),
        frozen_height: i64 = (4, int64),
    }
}

crate::message! {
    pub struct TxInputExt {
        bucket: String = (1, string),
        key: Vec<u8> = (2, bytes),
        ref_txid: Vec<u8> = (3, bytes),
        ref_offset: i32 = (4, int32),
    }
}

crate::message! {
    pub struct TxOutputExt {
        bucket: String = (1, string),
        key: Vec<u8> = (2, bytes),
        value: Vec<u8> = (3, bytes),
    }
}

crate::message! {
    pub struct SignatureInfo {
        public_key: String = (1, string),
        sign: Vec<u8> = (2, bytes),
    }
}

crate::message! {
    pub struct ResourceLimit {
        /// A [`ResourceType`] value.
        resource_type: i32 = (1, int32),
        limit: i64 = (2, int64),
    }
}

crate::message! {
    pub struct InvokeRequest {
        module_name: String = (1, string),
        contract_name: String = (2, string),
        method_name: String = (3, string),
        args: BTreeMap<String, Vec<u8>> = (4, bytes_map),
        resource_limits: Vec<ResourceLimit> = (5, message, repeated),
        amount: String = (6, string),
    }
}

crate::message! {
    pub struct ContractResponse {
        status: i32 = (1, int32),
        message: String = (2, string),
        body: Vec<u8> = (3, bytes),
    }
}

crate::message! {
    pub struct InvokeResponse {
        gas_used: i64 = (1, int64),
        response: Vec<Vec<u8>> = (2, bytes, repeated),
        requests: Vec<InvokeRequest> = (3, message, repeated),
        responses: Vec<ContractResponse> = (4, message, repeated),
    }
}

crate::message! {
    pub struct Transaction {
        txid: Vec<u8> = (1, bytes),
        blockid: Vec<u8> = (2, bytes),
        tx_inputs: Vec<TxInput> = (3, message, repeated),
        tx_outputs: Vec<TxOutput> = (4, message, repeated),
        desc: Vec<u8> = (6, bytes),
        coinbase: bool = (7, boolean),
        nonce: String = (8, string),
        timestamp: i64 = (9, int64),
        version: i32 = (10, int32),
        autogen: bool = (11, boolean),
        tx_inputs_ext: Vec<TxInputExt> = (23, message, repeated),
        tx_outputs_ext: Vec<TxOutputExt> = (24, message, repeated),
        contract_requests: Vec<InvokeRequest> = (25, message, repeated),
        initiator: String = (26, string),
        auth_require: Vec<String> = (27, string, repeated),
        initiator_signs: Vec<SignatureInfo> = (28, message, repeated),
        auth_require_signs: Vec<SignatureInfo> = (29, message, repeated),
        received_timestamp: i64 = (30, int64),
    }
}

crate::message! {
    pub struct InternalBlock {
        version: i32 = (1, int32),
        nonce: i32 = (2, int32),
        blockid: Vec<u8> = (3, bytes),
        pre_hash: Vec<u8> = (4, bytes),
        proposer: Vec<u8> = (5, bytes),
        sign: Vec<u8> = (6, bytes),
        pubkey: Vec<u8> = (7, bytes),
        merkle_root: Vec<u8> = (8, bytes),
        height: i64 = (9, int64),
        timestamp: i64 = (10, int64),
        transactions: Vec<Transaction> = (11, message, repeated),
        tx_count: i32 = (12, int32),
        merkle_tree: Vec<Vec<u8>> = (13, bytes, repeated),
        in_trunk: bool = (14, boolean),
        next_hash: Vec<u8> = (15, bytes),
        cur_term: i64 = (16, int64),
        cur_block_num: i64 = (17, int64),
        /// txid -> failure reason
        failed_txs: BTreeMap<String, String> = (18, string_map),
        target_bits: i32 = (19, int32),
    }
}

crate::message! {
    pub struct Utxo {
        amount: Vec<u8> = (1, bytes),
        to_addr: Vec<u8> = (2, bytes),
        to_pubkey: Vec<u8> = (3, bytes),
        ref_txid: Vec<u8> = (4, bytes),
        ref_offset: i32 = (5, int32),
    }
}

crate::message! {
    pub struct UtxoKey {
        ref_txid: String = (1, string),
        offset: String = (2, string),
        amount: String = (3, string),
    }
}

crate::message! {
    /// Summary of the UTXOs held by one address.
    pub struct UtxoRecord {
        utxo_count: String = (1, string),
        utxo_amount: String = (2, string),
        item: Option<Vec<UtxoKey>> = (3, message, nullable),
    }
}

crate::message! {
    pub struct PermissionModel {
        /// A [`PermissionRule`] value.
        rule: i32 = (1, int32),
        accept_value: f64 = (2, double),
    }
}

crate::message! {
    pub struct Acl {
        pm: Option<PermissionModel> = (1, message, optional),
        aks_weight: BTreeMap<String, f64> = (2, double_map),
    }
}

crate::message! {
    pub struct ContractStatus {
        contract_name: String = (1, string),
        txid: String = (2, string),
        desc: Vec<u8> = (3, bytes),
        is_banned: bool = (4, boolean),
        timestamp: i64 = (5, int64),
        runtime: String = (6, string),
    }
}

crate::message! {
    pub struct TokenFrozenDetail {
        balance: String = (1, string),
        is_frozen: bool = (2, boolean),
    }
}

crate::message! {
    pub struct LedgerMeta {
        root_blockid: Vec<u8> = (1, bytes),
        tip_blockid: Vec<u8> = (2, bytes),
        trunk_height: i64 = (3, int64),
    }
}

crate::message! {
    pub struct GasPrice {
        cpu_rate: i64 = (1, int64),
        mem_rate: i64 = (2, int64),
        disk_rate: i64 = (3, int64),
        xfee_rate: i64 = (4, int64),
    }
}

crate::message! {
    pub struct UtxoMeta {
        latest_blockid: Vec<u8> = (1, bytes),
        lock_key_list: Vec<String> = (2, string, repeated),
        utxo_total: String = (3, string),
        avg_delay: i64 = (4, int64),
        unconfirm_tx_amount: i64 = (5, int64),
        max_block_size: i64 = (6, int64),
        reserved_contracts: Vec<InvokeRequest> = (7, message, repeated),
        forbidden_contract: Option<InvokeRequest> = (8, message, optional),
        new_account_resource_amount: i64 = (9, int64),
        irreversible_block_height: i64 = (10, int64),
        irreversible_slide_window: i64 = (11, int64),
        gas_price: Option<GasPrice> = (12, message, optional),
    }
}

crate::message! {
    pub struct CandidateRatio {
        header: Option<Header> = (1, message, optional),
        bcname: String = (2, string),
        /// candidate address -> ratio
        ratio: BTreeMap<String, String> = (3, string_map),
    }
}

crate::message! {
    pub struct BonusQueryReply {
        header: Option<Header> = (1, message, optional),
        bcname: String = (2, string),
        address: String = (3, string),
        bonus: String = (4, string),
    }
}

crate::message! {
    pub struct VerificationTable {
        header: Option<Header> = (1, message, optional),
        length: i64 = (2, int64),
        total_amount: String = (3, string),
        /// candidate address -> ballots
        ballots: BTreeMap<String, String> = (4, string_map),
        unit: String = (5, string),
    }
}

crate::message! {
    pub struct BcStatusExplorer {
        header: Option<Header> = (1, message, optional),
        bcname: String = (2, string),
        height: i64 = (3, int64),
        total_tx_number: String = (4, string),
        total_address_number: String = (5, string),
        utxo_total: String = (6, string),
        tip_blockid: Vec<u8> = (7, bytes),
    }
}

crate::message! {
    pub struct FrozenAssetsTable {
        total: String = (1, string),
        /// txid -> frozen amount
        frozen_detail: BTreeMap<String, String> = (2, string_map),
        timestamp: i64 = (3, int64),
    }
}

crate::message! {
    pub struct VoteDetailsStatus {
        candidate: String = (1, string),
        ballots: String = (2, string),
        ratio: i64 = (3, int64),
    }
}

crate::message! {
    /// Pledge and vote records of one address.
    pub struct PledgeVotingResponse {
        header: Option<Header> = (1, message, optional),
        frozen_assets_table: Option<FrozenAssetsTable> = (2, message, optional),
        vote_details_status: Vec<VoteDetailsStatus> = (3, message, repeated),
        freezetotal: String = (4, string),
    }
}
