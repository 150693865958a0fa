use {
    agora_testing::{setup_test, FEE_DENOM, LISTING_FEE},
    agora_types::{
        lending::{self, Loan, LoanState},
        market::{self, AssetState},
    },
    plinth::{Addressable, BalanceChange, Coins, ResultExt},
};

fn coins(amount: u128) -> Coins {
    Coins::one(FEE_DENOM.clone(), amount).unwrap()
}

#[test]
fn buying_through_a_loan() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];
    let owner = &accounts["owner"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();

    // The principal is escrowed on the ledger at creation.
    suite.balances().record(lender, &FEE_DENOM);
    suite.balances().record(&contracts.lending, &FEE_DENOM);

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(lender, &FEE_DENOM, BalanceChange::Decreased(500));
    suite
        .balances()
        .should_change(&contracts.lending, &FEE_DENOM, BalanceChange::Increased(500));

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_succeed_and_equal(Loan {
            asset_id: 1,
            lender: lender.address(),
            borrower: None,
            amount: 500,
            state: LoanState::New,
        });

    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_succeed_and(|loan| matches!(loan.state, LoanState::Pending));

    // Approval moves the asset to the borrower, the principal to the seller
    // and the escrowed listing fee to the policy owner, all in one
    // transaction. The borrower pays nothing.
    suite
        .balances()
        .record_many([seller, owner, lender, borrower], &FEE_DENOM);
    suite.balances().record(&contracts.lending, &FEE_DENOM);
    suite.balances().record(&contracts.market, &FEE_DENOM);

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Approve { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(seller, &FEE_DENOM, BalanceChange::Increased(500));
    suite
        .balances()
        .should_change(owner, &FEE_DENOM, BalanceChange::Increased(LISTING_FEE));
    suite
        .balances()
        .should_change(lender, &FEE_DENOM, BalanceChange::Unchanged);
    suite
        .balances()
        .should_change(borrower, &FEE_DENOM, BalanceChange::Unchanged);
    suite
        .balances()
        .should_change(&contracts.lending, &FEE_DENOM, BalanceChange::Decreased(500));
    suite.balances().should_change(
        &contracts.market,
        &FEE_DENOM,
        BalanceChange::Decreased(LISTING_FEE),
    );

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and(|asset| {
            asset.owner == borrower.address() && matches!(asset.state, AssetState::NotForSale)
        });

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_succeed_and(|loan| matches!(loan.state, LoanState::Approved));
}

#[test]
fn approving_needs_the_lender_and_an_applicant() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();

    // No application is in flight yet.
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Approve { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only pending loans can be approved");
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Decline { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only pending loans can be declined");

    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Approve { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only lender can approve loan");
    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Decline { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only lender can decline loan");
}

#[test]
fn declining_reopens_the_loan() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();
    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Decline { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_succeed_and_equal(Loan {
            asset_id: 1,
            lender: lender.address(),
            borrower: None,
            amount: 500,
            state: LoanState::New,
        });

    // Declining leaves no refund behind; the principal stays escrowed.
    suite
        .query_wasm_smart(contracts.lending, lending::QueryRefundRequest {
            address: lender.address(),
        })
        .should_succeed_and_equal(0);

    // Someone else can now apply.
    suite
        .execute(
            buyer,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();
}

#[test]
fn cancelling_and_withdrawing_the_refund() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();

    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Cancel { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only the lender can cancel the loan");

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Cancel { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    // The loan record is gone; only the refund credit remains.
    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_fail_with_error("data not found");
    suite
        .query_wasm_smart(contracts.lending, lending::QueryRefundRequest {
            address: lender.address(),
        })
        .should_succeed_and_equal(500);

    suite.balances().record(lender, &FEE_DENOM);
    suite.balances().record(&contracts.lending, &FEE_DENOM);

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::WithdrawRefund {},
            Coins::new(),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(lender, &FEE_DENOM, BalanceChange::Increased(500));
    suite
        .balances()
        .should_change(&contracts.lending, &FEE_DENOM, BalanceChange::Decreased(500));

    suite
        .query_wasm_smart(contracts.lending, lending::QueryRefundRequest {
            address: lender.address(),
        })
        .should_succeed_and_equal(0);

    // The payout zeroed the balance.
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::WithdrawRefund {},
            Coins::new(),
        )
        .should_fail_with_error("you have no refunds");
}

#[test]
fn a_loan_goes_stale_once_the_asset_sells() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();
    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    // A direct sale slips in before the lender approves.
    suite
        .execute(
            buyer,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(500),
        )
        .should_succeed();

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Approve { loan_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("asset is not for sale");

    // The failed approval left the loan untouched.
    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoanRequest { loan_id: 1 })
        .should_succeed_and(|loan| matches!(loan.state, LoanState::Pending));

    // The principal isn't stranded: cancel the loan and withdraw it.
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Cancel { loan_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite.balances().record(lender, &FEE_DENOM);

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::WithdrawRefund {},
            Coins::new(),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(lender, &FEE_DENOM, BalanceChange::Increased(500));
}

#[test]
fn creating_needs_a_listing_and_enough_principal() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let lender = &accounts["lender"];

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_fail_with_error("data not found");

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(499),
        )
        .should_fail_with_error("loan must be at least the amount of the asset");

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::CancelListing { asset_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_fail_with_error("asset is not for sale");
}

#[test]
fn loan_views_split_by_asset_and_user() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];
    let lender = &accounts["lender"];
    let borrower = &accounts["borrower"];

    // Two assets; loans 1 and 3 against the first, loan 2 against the second.
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 800 },
            coins(LISTING_FEE),
        )
        .should_succeed();

    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(500),
        )
        .should_succeed();
    suite
        .execute(
            buyer,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 2 },
            coins(800),
        )
        .should_succeed();
    suite
        .execute(
            lender,
            contracts.lending,
            &lending::ExecuteMsg::Create { asset_id: 1 },
            coins(600),
        )
        .should_succeed();

    suite
        .execute(
            borrower,
            contracts.lending,
            &lending::ExecuteMsg::Apply { loan_id: 2 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoansRequest {
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|loans| loans.keys().copied().eq([1, 2, 3]));

    suite
        .query_wasm_smart(contracts.lending, lending::QueryLoansByAssetRequest {
            asset_id: 1,
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|loans| loans.keys().copied().eq([1, 3]));

    let res = suite
        .query_wasm_smart(contracts.lending, lending::QueryLoansByUserRequest {
            user: lender.address(),
        })
        .should_succeed();
    assert!(res.lent.keys().copied().eq([1, 3]));
    assert!(res.borrowed.is_empty());

    let res = suite
        .query_wasm_smart(contracts.lending, lending::QueryLoansByUserRequest {
            user: borrower.address(),
        })
        .should_succeed();
    assert!(res.borrowed.keys().copied().eq([2]));
    assert!(res.lent.is_empty());
}
