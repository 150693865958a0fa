use {
    agora_testing::{setup_test, FEE_DENOM, INITIAL_BALANCE, LISTING_FEE, MIN_ASSET_PRICE},
    agora_types::market::{self, Asset, AssetState},
    plinth::{Addressable, BalanceChange, Coins, ResultExt},
};

fn coins(amount: u128) -> Coins {
    Coins::one(FEE_DENOM.clone(), amount).unwrap()
}

#[test]
fn listing_and_buying() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];
    let owner = &accounts["owner"];

    suite
        .balances()
        .record_many([seller, buyer, owner], &FEE_DENOM);
    suite.balances().record(&contracts.market, &FEE_DENOM);

    // Listing escrows the fee on the market.
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(seller, &FEE_DENOM, BalanceChange::Decreased(LISTING_FEE));
    suite.balances().should_change(
        &contracts.market,
        &FEE_DENOM,
        BalanceChange::Increased(LISTING_FEE),
    );

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and_equal(Asset {
            owner: seller.address(),
            seller: seller.address(),
            price: 500,
            state: AssetState::ForSale,
        });

    suite.balances().refresh_all();

    // The sale pays the seller the full price and forwards the escrowed fee
    // to the policy owner.
    suite
        .execute(
            buyer,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(500),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(buyer, &FEE_DENOM, BalanceChange::Decreased(500));
    suite
        .balances()
        .should_change(seller, &FEE_DENOM, BalanceChange::Increased(500));
    suite
        .balances()
        .should_change(owner, &FEE_DENOM, BalanceChange::Increased(LISTING_FEE));
    suite.balances().should_change(
        &contracts.market,
        &FEE_DENOM,
        BalanceChange::Decreased(LISTING_FEE),
    );

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and_equal(Asset {
            owner: buyer.address(),
            seller: seller.address(),
            price: 500,
            state: AssetState::NotForSale,
        });

    // Sold means off the market.
    suite
        .execute(
            owner,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(500),
        )
        .should_fail_with_error("asset is not for sale");
}

#[test]
fn listing_requires_the_fee_and_a_minimum_price() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew {
                price: MIN_ASSET_PRICE - 1,
            },
            coins(LISTING_FEE),
        )
        .should_fail_with_error("price must be at least the minimum asset price");

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            Coins::new(),
        )
        .should_fail_with_error("must send in listing fee");

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE + 1),
        )
        .should_fail_with_error("must send in listing fee");

    // The failed attempts must not have registered anything or cost a cent.
    suite
        .query_balance(seller, FEE_DENOM.clone())
        .should_succeed_and_equal(INITIAL_BALANCE);
    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsRequest {
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.is_empty());
}

#[test]
fn buying_with_the_wrong_payment() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 500 },
            coins(LISTING_FEE),
        )
        .should_succeed();

    // Underpaying and overpaying are both rejected.
    suite
        .execute(
            buyer,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(400),
        )
        .should_fail_with_error("invalid amount sent");
    suite
        .execute(
            buyer,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(600),
        )
        .should_fail_with_error("invalid amount sent");

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 1 },
            coins(500),
        )
        .should_fail_with_error("no need to buy your own asset");

    suite
        .execute(
            buyer,
            contracts.market,
            &market::ExecuteMsg::Buy { asset_id: 99 },
            coins(500),
        )
        .should_fail_with_error("data not found");

    // The listing survived all of the failures.
    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and(|asset| matches!(asset.state, AssetState::ForSale));
}

#[test]
fn cancelling_forfeits_the_listing_fee() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let buyer = &accounts["buyer"];

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
            buyer,
            contracts.market,
            &market::ExecuteMsg::CancelListing { asset_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("only seller can cancel listing");

    suite.balances().record(seller, &FEE_DENOM);
    suite.balances().record(&contracts.market, &FEE_DENOM);

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::CancelListing { asset_id: 1 },
            Coins::new(),
        )
        .should_succeed();

    // The fee stays with the market; nothing flows back.
    suite
        .balances()
        .should_change(seller, &FEE_DENOM, BalanceChange::Unchanged);
    suite
        .balances()
        .should_change(&contracts.market, &FEE_DENOM, BalanceChange::Unchanged);

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and(|asset| matches!(asset.state, AssetState::NotForSale));

    // Nothing left to cancel.
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::CancelListing { asset_id: 1 },
            Coins::new(),
        )
        .should_fail_with_error("asset is not for sale");

    // Re-listing the same asset costs the fee again.
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListExisting {
                asset_id: 1,
                price: 600,
            },
            coins(LISTING_FEE),
        )
        .should_succeed();

    suite
        .balances()
        .should_change(seller, &FEE_DENOM, BalanceChange::Decreased(LISTING_FEE));

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetRequest { asset_id: 1 })
        .should_succeed_and_equal(Asset {
            owner: seller.address(),
            seller: seller.address(),
            price: 600,
            state: AssetState::ForSale,
        });
}

#[test]
fn views_follow_the_asset_lifecycle() {
    let (mut suite, accounts, contracts) = setup_test();

    let seller = &accounts["seller"];
    let lender = &accounts["lender"];
    let buyer = &accounts["buyer"];

    // Two listings from the seller, one from the lender.
    for (signer, price) in [(seller, 500), (seller, 700), (lender, 900)] {
        suite
            .execute(
                signer,
                contracts.market,
                &market::ExecuteMsg::ListNew { price },
                coins(LISTING_FEE),
            )
            .should_succeed();
    }

    // Asset 1 sells; asset 2 is withdrawn.
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
            seller,
            contracts.market,
            &market::ExecuteMsg::CancelListing { asset_id: 2 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsRequest {
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.keys().copied().eq([1, 2, 3]));

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsForSaleRequest {
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.keys().copied().eq([3]));

    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsByOwnerRequest {
            owner: buyer.address(),
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.keys().copied().eq([1]));

    // Asset 2 still belongs to the seller but isn't listed, so it shows up in
    // the by-owner view only.
    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsByOwnerRequest {
            owner: seller.address(),
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.keys().copied().eq([2]));
    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsBySellerRequest {
            seller: seller.address(),
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|assets| assets.is_empty());

    // Pagination applies after the filter.
    suite
        .query_wasm_smart(contracts.market, market::QueryAssetsRequest {
            start_after: Some(1),
            limit: Some(1),
        })
        .should_succeed_and(|assets| assets.keys().copied().eq([2]));
}

#[test]
fn fee_policy_is_owner_gated() {
    let (mut suite, accounts, contracts) = setup_test();

    let owner = &accounts["owner"];
    let seller = &accounts["seller"];

    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::SetListingFee { amount: 40 },
            Coins::new(),
        )
        .should_fail_with_error("only the owner can update the config");
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::SetMinimumAssetPrice { amount: 200 },
            Coins::new(),
        )
        .should_fail_with_error("only the owner can update the config");

    suite
        .execute(
            owner,
            contracts.market,
            &market::ExecuteMsg::SetListingFee { amount: 40 },
            Coins::new(),
        )
        .should_succeed();
    suite
        .execute(
            owner,
            contracts.market,
            &market::ExecuteMsg::SetMinimumAssetPrice { amount: 200 },
            Coins::new(),
        )
        .should_succeed();

    suite
        .query_wasm_smart(contracts.market, market::QueryConfigRequest {})
        .should_succeed_and(|config| config.listing_fee == 40 && config.min_asset_price == 200);

    // Listings are judged against the updated policy.
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 150 },
            coins(40),
        )
        .should_fail_with_error("price must be at least the minimum asset price");
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 300 },
            coins(LISTING_FEE),
        )
        .should_fail_with_error("must send in listing fee");
    suite
        .execute(
            seller,
            contracts.market,
            &market::ExecuteMsg::ListNew { price: 300 },
            coins(40),
        )
        .should_succeed();
}
