use {
    crate::{ASSETS, CONFIG},
    agora_types::market::{Asset, AssetId, AssetState, Config, QueryMsg},
    plinth::{Bound, DEFAULT_PAGE_LIMIT, ImmutableCtx, Json, JsonSerExt, Order, StdResult},
    std::collections::BTreeMap,
};

pub fn query(ctx: ImmutableCtx, msg: QueryMsg) -> StdResult<Json> {
    match msg {
        QueryMsg::Config {} => {
            let res = query_config(ctx)?;
            res.to_json_value()
        },
        QueryMsg::Asset { asset_id } => {
            let res = query_asset(ctx, asset_id)?;
            res.to_json_value()
        },
        QueryMsg::Assets { start_after, limit } => {
            let res = scan_assets(ctx, start_after, limit, |_| true)?;
            res.to_json_value()
        },
        QueryMsg::AssetsForSale { start_after, limit } => {
            let res = scan_assets(ctx, start_after, limit, |asset| {
                matches!(asset.state, AssetState::ForSale)
            })?;
            res.to_json_value()
        },
        QueryMsg::AssetsByOwner {
            owner,
            start_after,
            limit,
        } => {
            let res = scan_assets(ctx, start_after, limit, |asset| asset.owner == owner)?;
            res.to_json_value()
        },
        QueryMsg::AssetsBySeller {
            seller,
            start_after,
            limit,
        } => {
            let res = scan_assets(ctx, start_after, limit, |asset| {
                asset.seller == seller && matches!(asset.state, AssetState::ForSale)
            })?;
            res.to_json_value()
        },
    }
}

fn query_config(ctx: ImmutableCtx) -> StdResult<Config> {
    CONFIG.load(ctx.storage)
}

fn query_asset(ctx: ImmutableCtx, asset_id: AssetId) -> StdResult<Asset> {
    ASSETS.load(ctx.storage, asset_id)
}

/// Walk the asset table in ID order, keeping the entries the predicate
/// accepts, up to `limit` of them.
///
/// The filtered views are linear scans. The asset table is expected to stay
/// small enough that maintaining secondary indexes isn't worth the bookkeeping
/// on every mutation.
fn scan_assets<F>(
    ctx: ImmutableCtx,
    start_after: Option<AssetId>,
    limit: Option<u32>,
    pred: F,
) -> StdResult<BTreeMap<AssetId, Asset>>
where
    F: Fn(&Asset) -> bool,
{
    let start = start_after.map(Bound::Exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT) as usize;

    ASSETS
        .range(ctx.storage, start, None, Order::Ascending)
        .filter(|res| match res {
            // Errors pass the filter so that `collect` surfaces them.
            Ok((_, asset)) => pred(asset),
            Err(_) => true,
        })
        .take(limit)
        .collect()
}
