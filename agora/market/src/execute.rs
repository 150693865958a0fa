use {
    crate::{ASSETS, CONFIG, NEXT_ASSET_ID},
    agora_types::market::{
        Asset, AssetCancelled, AssetId, AssetListed, AssetPending, AssetSold, AssetState, Config,
        ExecuteMsg, InstantiateMsg,
    },
    anyhow::ensure,
    plinth::{Addr, Coins, Message, MutableCtx, Response},
};

pub fn instantiate(ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    CONFIG.save(ctx.storage, &msg.config)?;

    Ok(Response::new())
}

pub fn execute(ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        ExecuteMsg::ListNew { price } => list_new(ctx, price),
        ExecuteMsg::ListExisting { asset_id, price } => list_existing(ctx, asset_id, price),
        ExecuteMsg::Buy { asset_id } => buy(ctx, asset_id),
        ExecuteMsg::CancelListing { asset_id } => cancel_listing(ctx, asset_id),
        ExecuteMsg::TransferByLoan { asset_id, to } => transfer_by_loan(ctx, asset_id, to),
        ExecuteMsg::SetListingFee { amount } => set_listing_fee(ctx, amount),
        ExecuteMsg::SetMinimumAssetPrice { amount } => set_minimum_asset_price(ctx, amount),
    }
}

fn list_new(ctx: MutableCtx, price: u128) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;

    ensure_listable(&ctx, &config, price)?;

    let (_, asset_id) = NEXT_ASSET_ID.increment(ctx.storage)?;

    ASSETS.save(ctx.storage, asset_id, &Asset {
        owner: ctx.sender,
        seller: ctx.sender,
        price,
        state: AssetState::ForSale,
    })?;

    Ok(Response::new().add_event(AssetListed {
        asset_id,
        seller: ctx.sender,
        price,
    })?)
}

fn list_existing(ctx: MutableCtx, asset_id: AssetId, price: u128) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;
    let mut asset = ASSETS.load(ctx.storage, asset_id)?;

    ensure!(asset.owner == ctx.sender, "you must own the asset");

    ensure!(
        matches!(asset.state, AssetState::NotForSale),
        "asset is pending or already listed"
    );

    ensure_listable(&ctx, &config, price)?;

    asset.seller = ctx.sender;
    asset.price = price;
    asset.state = AssetState::ForSale;

    ASSETS.save(ctx.storage, asset_id, &asset)?;

    Ok(Response::new().add_event(AssetListed {
        asset_id,
        seller: ctx.sender,
        price,
    })?)
}

/// The checks shared by first listings and re-listings: an acceptable price,
/// and exactly the listing fee attached. The fee stays on the contract until
/// the asset sells.
fn ensure_listable(ctx: &MutableCtx, config: &Config, price: u128) -> anyhow::Result<()> {
    ensure!(
        price >= config.min_asset_price,
        "price must be at least the minimum asset price"
    );

    let fee = ctx.funds.clone().into_one_coin_of_denom(&config.fee_denom)?;

    ensure!(fee == config.listing_fee, "must send in listing fee");

    Ok(())
}

fn buy(ctx: MutableCtx, asset_id: AssetId) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;
    let mut asset = ASSETS.load(ctx.storage, asset_id)?;

    ensure!(
        matches!(asset.state, AssetState::ForSale),
        "asset is not for sale"
    );

    ensure!(ctx.sender != asset.owner, "no need to buy your own asset");

    let payment = ctx.funds.into_one_coin_of_denom(&config.fee_denom)?;

    ensure!(payment == asset.price, "invalid amount sent");

    let seller = asset.seller;
    let price = asset.price;

    asset.owner = ctx.sender;
    asset.state = AssetState::NotForSale;

    ASSETS.save(ctx.storage, asset_id, &asset)?;

    // The payment goes to the seller in full; the listing fee collected when
    // the asset was listed goes to the policy owner.
    Ok(Response::new()
        .may_add_message(pay(seller, &config, price)?)
        .may_add_message(pay(config.owner, &config, config.listing_fee)?)
        .add_event(AssetSold {
            asset_id,
            seller,
            buyer: ctx.sender,
            price,
        })?)
}

fn cancel_listing(ctx: MutableCtx, asset_id: AssetId) -> anyhow::Result<Response> {
    let mut asset = ASSETS.load(ctx.storage, asset_id)?;

    ensure!(asset.seller == ctx.sender, "only seller can cancel listing");

    ensure!(
        matches!(asset.state, AssetState::ForSale),
        "asset is not for sale"
    );

    asset.state = AssetState::NotForSale;

    ASSETS.save(ctx.storage, asset_id, &asset)?;

    // The listing fee is forfeited; it stays on the contract.
    Ok(Response::new().add_event(AssetCancelled {
        asset_id,
        seller: ctx.sender,
    })?)
}

fn transfer_by_loan(ctx: MutableCtx, asset_id: AssetId, to: Addr) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;

    ensure!(
        ctx.sender == config.loan_engine,
        "only the loan engine can transfer assets"
    );

    let mut asset = ASSETS.load(ctx.storage, asset_id)?;

    ensure!(
        matches!(asset.state, AssetState::ForSale),
        "asset is not for sale"
    );

    // The attached principal must cover the sale. It can exceed the price,
    // in which case the seller keeps the excess.
    let principal = ctx.funds.into_one_coin_of_denom(&config.fee_denom)?;

    ensure!(principal >= asset.price, "invalid amount sent");

    let seller = asset.seller;
    let price = asset.price;

    asset.owner = to;
    asset.state = AssetState::NotForSale;

    ASSETS.save(ctx.storage, asset_id, &asset)?;

    Ok(Response::new()
        .may_add_message(pay(seller, &config, principal)?)
        .may_add_message(pay(config.owner, &config, config.listing_fee)?)
        .add_event(AssetPending { asset_id, buyer: to })?
        .add_event(AssetSold {
            asset_id,
            seller,
            buyer: to,
            price,
        })?)
}

fn set_listing_fee(ctx: MutableCtx, amount: u128) -> anyhow::Result<Response> {
    let mut config = CONFIG.load(ctx.storage)?;

    ensure!(
        ctx.sender == config.owner,
        "only the owner can update the config"
    );

    config.listing_fee = amount;

    CONFIG.save(ctx.storage, &config)?;

    Ok(Response::new())
}

fn set_minimum_asset_price(ctx: MutableCtx, amount: u128) -> anyhow::Result<Response> {
    let mut config = CONFIG.load(ctx.storage)?;

    ensure!(
        ctx.sender == config.owner,
        "only the owner can update the config"
    );

    config.min_asset_price = amount;

    CONFIG.save(ctx.storage, &config)?;

    Ok(Response::new())
}

/// A transfer of the given amount in the market's fee denom, or `None` if the
/// amount is zero.
fn pay(to: Addr, config: &Config, amount: u128) -> anyhow::Result<Option<Message>> {
    if amount == 0 {
        return Ok(None);
    }

    Ok(Some(Message::transfer(
        to,
        Coins::one(config.fee_denom.clone(), amount)?,
    )?))
}

// ----------------------------------- tests -----------------------------------
