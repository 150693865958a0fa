use {
    crate::{CONFIG, LOANS, LOANS_BY_ASSET, REFUNDS},
    agora_types::{
        lending::{Config, Loan, LoanId, LoansByUserResponse, QueryMsg},
        market::AssetId,
    },
    plinth::{Addr, Bound, DEFAULT_PAGE_LIMIT, ImmutableCtx, Json, JsonSerExt, Order, StdResult},
    std::collections::BTreeMap,
};

pub fn query(ctx: ImmutableCtx, msg: QueryMsg) -> StdResult<Json> {
    match msg {
        QueryMsg::Config {} => {
            let res = query_config(ctx)?;
            res.to_json_value()
        },
        QueryMsg::Loan { loan_id } => {
            let res = query_loan(ctx, loan_id)?;
            res.to_json_value()
        },
        QueryMsg::Loans { start_after, limit } => {
            let res = query_loans(ctx, start_after, limit)?;
            res.to_json_value()
        },
        QueryMsg::LoansByAsset {
            asset_id,
            start_after,
            limit,
        } => {
            let res = query_loans_by_asset(ctx, asset_id, start_after, limit)?;
            res.to_json_value()
        },
        QueryMsg::LoansByUser { user } => {
            let res = query_loans_by_user(ctx, user)?;
            res.to_json_value()
        },
        QueryMsg::Refund { address } => {
            let res = query_refund(ctx, address)?;
            res.to_json_value()
        },
    }
}

fn query_config(ctx: ImmutableCtx) -> StdResult<Config> {
    CONFIG.load(ctx.storage)
}

fn query_loan(ctx: ImmutableCtx, loan_id: LoanId) -> StdResult<Loan> {
    LOANS.load(ctx.storage, loan_id)
}

fn query_loans(
    ctx: ImmutableCtx,
    start_after: Option<LoanId>,
    limit: Option<u32>,
) -> StdResult<BTreeMap<LoanId, Loan>> {
    let start = start_after.map(Bound::Exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT) as usize;

    LOANS
        .range(ctx.storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

fn query_loans_by_asset(
    ctx: ImmutableCtx,
    asset_id: AssetId,
    start_after: Option<LoanId>,
    limit: Option<u32>,
) -> StdResult<BTreeMap<LoanId, Loan>> {
    let start = start_after.map(Bound::Exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT) as usize;

    LOANS_BY_ASSET
        .prefix(asset_id)
        .keys(ctx.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|res| {
            let loan_id = res?;
            let loan = LOANS.load(ctx.storage, loan_id)?;
            Ok((loan_id, loan))
        })
        .collect()
}

/// Walk every loan, splitting the ones the user is party to by side. A user
/// lending to themselves shows up on both sides.
fn query_loans_by_user(ctx: ImmutableCtx, user: Addr) -> StdResult<LoansByUserResponse> {
    let mut borrowed = BTreeMap::new();
    let mut lent = BTreeMap::new();

    for res in LOANS.range(ctx.storage, None, None, Order::Ascending) {
        let (loan_id, loan) = res?;

        if loan.lender == user {
            lent.insert(loan_id, loan.clone());
        }

        if loan.borrower == Some(user) {
            borrowed.insert(loan_id, loan);
        }
    }

    Ok(LoansByUserResponse { borrowed, lent })
}

fn query_refund(ctx: ImmutableCtx, address: Addr) -> StdResult<u128> {
    Ok(REFUNDS.may_load(ctx.storage, address)?.unwrap_or(0))
}

// ----------------------------------- tests -----------------------------------
