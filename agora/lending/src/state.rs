use {
    agora_types::{
        lending::{Config, Loan, LoanId},
        market::AssetId,
    },
    plinth::{Addr, Counter, Item, Map, Set},
};

pub const CONFIG: Item<Config> = Item::new("config");

/// Loan IDs count up from 1; zero is never a valid ID.
pub const NEXT_LOAN_ID: Counter<LoanId> = Counter::new("loan_id", 0, 1);

pub const LOANS: Map<LoanId, Loan> = Map::new("loan");

// (asset_id, loan_id) => ()
pub const LOANS_BY_ASSET: Set<(AssetId, LoanId)> = Set::new("loan_by_asset");

// lender => withdrawable amount
pub const REFUNDS: Map<Addr, u128> = Map::new("refund");
