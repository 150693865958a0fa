use {
    crate::{CONFIG, LOANS, LOANS_BY_ASSET, NEXT_LOAN_ID, REFUNDS},
    agora_types::{
        lending::{
            Config, ExecuteMsg, InstantiateMsg, Loan, LoanApproved, LoanCancelled, LoanCreated,
            LoanDeclined, LoanId, LoanRequested, LoanState, RefundWithdrawn,
        },
        market::{self, AssetId},
    },
    anyhow::{bail, ensure},
    plinth::{Coins, Message, MutableCtx, QuerierExt, Response, StdError},
};

pub fn instantiate(ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    CONFIG.save(ctx.storage, &Config { market: msg.market })?;

    Ok(Response::new())
}

pub fn execute(ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        ExecuteMsg::Create { asset_id } => create(ctx, asset_id),
        ExecuteMsg::Apply { loan_id } => apply(ctx, loan_id),
        ExecuteMsg::Approve { loan_id } => approve(ctx, loan_id),
        ExecuteMsg::Decline { loan_id } => decline(ctx, loan_id),
        ExecuteMsg::Cancel { loan_id } => cancel(ctx, loan_id),
        ExecuteMsg::WithdrawRefund {} => withdraw_refund(ctx),
    }
}

fn create(ctx: MutableCtx, asset_id: AssetId) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;
    let market_config = ctx
        .querier
        .query_wasm_smart(config.market, market::QueryConfigRequest {})?;
    let asset = ctx
        .querier
        .query_wasm_smart(config.market, market::QueryAssetRequest { asset_id })?;

    ensure!(
        matches!(asset.state, market::AssetState::ForSale),
        "asset is not for sale"
    );

    // The attached funds are escrowed on this contract until the loan is
    // either approved or cancelled.
    let principal = ctx.funds.into_one_coin_of_denom(&market_config.fee_denom)?;

    ensure!(
        principal >= asset.price,
        "loan must be at least the amount of the asset"
    );

    let (_, loan_id) = NEXT_LOAN_ID.increment(ctx.storage)?;

    LOANS.save(ctx.storage, loan_id, &Loan::new(asset_id, ctx.sender, principal))?;
    LOANS_BY_ASSET.insert(ctx.storage, (asset_id, loan_id))?;

    Ok(Response::new().add_event(LoanCreated {
        loan_id,
        asset_id,
        lender: ctx.sender,
        amount: principal,
    })?)
}

fn apply(ctx: MutableCtx, loan_id: LoanId) -> anyhow::Result<Response> {
    let mut loan = LOANS.load(ctx.storage, loan_id)?;

    ensure!(
        matches!(loan.state, LoanState::New),
        "this loan is not available"
    );

    loan.borrower = Some(ctx.sender);
    loan.state = LoanState::Pending;

    LOANS.save(ctx.storage, loan_id, &loan)?;

    Ok(Response::new().add_event(LoanRequested {
        loan_id,
        borrower: ctx.sender,
    })?)
}

fn approve(ctx: MutableCtx, loan_id: LoanId) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;
    let market_config = ctx
        .querier
        .query_wasm_smart(config.market, market::QueryConfigRequest {})?;
    let mut loan = LOANS.load(ctx.storage, loan_id)?;

    ensure!(loan.lender == ctx.sender, "only lender can approve loan");

    let (LoanState::Pending, Some(borrower)) = (loan.state, loan.borrower) else {
        bail!("only pending loans can be approved");
    };

    loan.state = LoanState::Approved;

    LOANS.save(ctx.storage, loan_id, &loan)?;

    // The escrowed principal rides along with the transfer call; the market
    // forwards it to the seller.
    let principal = if loan.amount == 0 {
        Coins::new()
    } else {
        Coins::one(market_config.fee_denom, loan.amount)?
    };

    Ok(Response::new()
        .add_message(Message::execute(
            config.market,
            &market::ExecuteMsg::TransferByLoan {
                asset_id: loan.asset_id,
                to: borrower,
            },
            principal,
        )?)
        .add_event(LoanApproved {
            loan_id,
            asset_id: loan.asset_id,
            lender: loan.lender,
            borrower,
            amount: loan.amount,
        })?)
}

fn decline(ctx: MutableCtx, loan_id: LoanId) -> anyhow::Result<Response> {
    let mut loan = LOANS.load(ctx.storage, loan_id)?;

    ensure!(loan.lender == ctx.sender, "only lender can decline loan");

    let (LoanState::Pending, Some(borrower)) = (loan.state, loan.borrower) else {
        bail!("only pending loans can be declined");
    };

    loan.borrower = None;
    loan.state = LoanState::New;

    LOANS.save(ctx.storage, loan_id, &loan)?;

    Ok(Response::new().add_event(LoanDeclined { loan_id, borrower })?)
}

fn cancel(ctx: MutableCtx, loan_id: LoanId) -> anyhow::Result<Response> {
    let loan = LOANS.load(ctx.storage, loan_id)?;

    ensure!(loan.lender == ctx.sender, "only the lender can cancel the loan");

    ensure!(
        !matches!(loan.state, LoanState::Approved),
        "only new or pending loans can be cancelled"
    );

    // The principal owed moves to the refund ledger. The loan record itself
    // is deleted, so a second cancel finds nothing to credit.
    REFUNDS.may_update(ctx.storage, loan.lender, |maybe| {
        let credit = maybe.unwrap_or(0);
        credit
            .checked_add(loan.amount)
            .ok_or_else(|| StdError::overflow_add(credit, loan.amount))
    })?;

    LOANS.remove(ctx.storage, loan_id);
    LOANS_BY_ASSET.remove(ctx.storage, (loan.asset_id, loan_id));

    Ok(Response::new().add_event(LoanCancelled {
        loan_id,
        lender: loan.lender,
        amount: loan.amount,
    })?)
}

fn withdraw_refund(ctx: MutableCtx) -> anyhow::Result<Response> {
    let config = CONFIG.load(ctx.storage)?;
    let market_config = ctx
        .querier
        .query_wasm_smart(config.market, market::QueryConfigRequest {})?;

    // Zero the balance before issuing the payout.
    let amount = REFUNDS.may_take(ctx.storage, ctx.sender)?.unwrap_or(0);

    ensure!(amount > 0, "you have no refunds");

    Ok(Response::new()
        .add_message(Message::transfer(
            ctx.sender,
            Coins::one(market_config.fee_denom, amount)?,
        )?)
        .add_event(RefundWithdrawn {
            address: ctx.sender,
            amount,
        })?)
}

// ----------------------------------- tests -----------------------------------
