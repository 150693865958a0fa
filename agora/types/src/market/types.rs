use plinth::{Addr, Denom};

/// Numerical identifier of an asset. Assigned monotonically when an asset is
/// first listed, and stable for the asset's entire life, across any number of
/// sales and re-listings.
pub type AssetId = u64;

/// The market's configuration.
#[plinth::derive(Serde, Borsh)]
pub struct Config {
    /// The address that collects listing fees and may adjust the fee policy.
    pub owner: Addr,
    /// The loan ledger contract. The only address permitted to transfer an
    /// asset as part of a loan-backed purchase.
    pub loan_engine: Addr,
    /// The denom all prices and fees in the market are quoted in.
    pub fee_denom: Denom,
    /// Flat fee charged for listing or re-listing an asset, paid out to the
    /// owner when the asset sells.
    pub listing_fee: u128,
    /// Floor below which a listing price is rejected.
    pub min_asset_price: u128,
}

/// Where an asset stands in its sale lifecycle.
#[plinth::derive(Serde, Borsh)]
#[derive(Copy)]
pub enum AssetState {
    /// Listed and purchasable, directly or through a loan.
    ForSale,
    /// A loan-backed purchase is underway. Transient within the approval
    /// transaction; never observable between transactions.
    Pending,
    /// Held by its owner, not purchasable.
    NotForSale,
}

/// A registered asset. Keyed by [`AssetId`] in the market's storage, so the
/// struct itself doesn't carry the ID.
#[plinth::derive(Serde, Borsh)]
pub struct Asset {
    /// The current holder.
    pub owner: Addr,
    /// The address that created the current listing. Stale once the asset
    /// leaves `ForSale`.
    pub seller: Addr,
    /// Sale price in the market's fee denom. Frozen while the asset is for
    /// sale, since re-listing requires `NotForSale`.
    pub price: u128,
    pub state: AssetState,
}
