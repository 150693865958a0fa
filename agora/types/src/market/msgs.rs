use {
    crate::market::{Asset, AssetId, Config},
    plinth::Addr,
    std::collections::BTreeMap,
};

#[plinth::derive(Serde)]
pub struct InstantiateMsg {
    pub config: Config,
}

#[plinth::derive(Serde)]
pub enum ExecuteMsg {
    /// Register a new asset and list it for sale.
    ///
    /// Sender must attach exactly the listing fee, and becomes both the
    /// asset's owner and its seller.
    ListNew { price: u128 },
    /// Re-list an asset the sender owns.
    ///
    /// Sender must attach exactly the listing fee. The asset must not
    /// currently be for sale.
    ListExisting { asset_id: AssetId, price: u128 },
    /// Buy an asset that is for sale.
    ///
    /// Sender must attach exactly the asset's price, and must not be the
    /// asset's current owner.
    Buy { asset_id: AssetId },
    /// Take an asset off the market without selling it.
    ///
    /// Sender must be the asset's seller. The listing fee is not refunded.
    CancelListing { asset_id: AssetId },
    /// Transfer a for-sale asset to the borrower of an approved loan,
    /// disbursing the attached principal to the seller.
    ///
    /// Sender must be the loan engine named in the config.
    TransferByLoan { asset_id: AssetId, to: Addr },
    /// Set the flat listing fee.
    ///
    /// Sender must be the owner.
    SetListingFee { amount: u128 },
    /// Set the minimum listing price.
    ///
    /// Sender must be the owner.
    SetMinimumAssetPrice { amount: u128 },
}

#[plinth::derive(Serde, QueryRequest)]
pub enum QueryMsg {
    /// Query the market's configuration.
    #[returns(Config)]
    Config {},
    /// Query a single asset by ID.
    #[returns(Asset)]
    Asset { asset_id: AssetId },
    /// Enumerate all assets, in whatever state.
    #[returns(BTreeMap<AssetId, Asset>)]
    Assets {
        start_after: Option<AssetId>,
        limit: Option<u32>,
    },
    /// Enumerate assets currently for sale.
    #[returns(BTreeMap<AssetId, Asset>)]
    AssetsForSale {
        start_after: Option<AssetId>,
        limit: Option<u32>,
    },
    /// Enumerate assets held by the given address.
    #[returns(BTreeMap<AssetId, Asset>)]
    AssetsByOwner {
        owner: Addr,
        start_after: Option<AssetId>,
        limit: Option<u32>,
    },
    /// Enumerate for-sale assets listed by the given address.
    #[returns(BTreeMap<AssetId, Asset>)]
    AssetsBySeller {
        seller: Addr,
        start_after: Option<AssetId>,
        limit: Option<u32>,
    },
}
