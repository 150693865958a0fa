use {crate::market::AssetId, plinth::Addr};

/// An asset has been listed or re-listed for sale.
#[plinth::derive(Serde)]
#[plinth::event("asset_listed")]
pub struct AssetListed {
    pub asset_id: AssetId,
    pub seller: Addr,
    pub price: u128,
}

/// A seller has taken their asset off the market.
#[plinth::derive(Serde)]
#[plinth::event("asset_cancelled")]
pub struct AssetCancelled {
    pub asset_id: AssetId,
    pub seller: Addr,
}

/// A loan-backed purchase of the asset has begun.
#[plinth::derive(Serde)]
#[plinth::event("asset_pending")]
pub struct AssetPending {
    pub asset_id: AssetId,
    pub buyer: Addr,
}

/// An asset has been sold, by direct purchase or through an approved loan.
#[plinth::derive(Serde)]
#[plinth::event("asset_sold")]
pub struct AssetSold {
    pub asset_id: AssetId,
    pub seller: Addr,
    pub buyer: Addr,
    pub price: u128,
}
