use {
    crate::{Addr, Coins, QuerierWrapper, Storage, Timestamp},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Information about the block being executed.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct BlockInfo {
    pub height: u64,
    pub timestamp: Timestamp,
}

/// Context passed to a contract's `instantiate` and `execute` entry points.
/// The contract can mutate its own storage, and knows who called it and with
/// what funds attached.
pub struct MutableCtx<'a> {
    pub storage: &'a mut dyn Storage,
    pub block: BlockInfo,
    pub contract: Addr,
    pub sender: Addr,
    pub funds: Coins,
    pub querier: QuerierWrapper<'a>,
}

/// Context passed to a contract's `query` entry point. Read-only; queries
/// have no sender or funds.
pub struct ImmutableCtx<'a> {
    pub storage: &'a dyn Storage,
    pub block: BlockInfo,
    pub contract: Addr,
    pub querier: QuerierWrapper<'a>,
}
