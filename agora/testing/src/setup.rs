use {
    agora_types::{lending, market},
    plinth::{
        Addr, Coins, ContractBuilder, Denom, TestAccount, TestAccounts, TestBuilder, TestSuite,
        GENESIS_SENDER,
    },
    std::sync::LazyLock,
};

/// The denom all prices and fees in the test market are quoted in.
pub static FEE_DENOM: LazyLock<Denom> = LazyLock::new(|| Denom::new_unchecked("ueth"));

pub const LISTING_FEE: u128 = 25;

pub const MIN_ASSET_PRICE: u128 = 100;

/// How much of the fee denom each test account starts with.
///
/// Some of the tests assert absolute balances, so careful when changing this.
pub const INITIAL_BALANCE: u128 = 100_000;

/// Addresses of the contracts deployed during genesis.
#[derive(Debug, Clone, Copy)]
pub struct Contracts {
    pub market: Addr,
    pub lending: Addr,
}

/// Set up a chain with the market and the loan ledger deployed, plus five
/// funded accounts: `owner`, `seller`, `buyer`, `lender` and `borrower`.
///
/// The owner account collects the market's listing fees and is the only one
/// allowed to adjust its fee policy.
pub fn setup_test() -> (TestSuite, TestAccounts, Contracts) {
    let market_code = ContractBuilder::new(Box::new(agora_market::instantiate))
        .with_execute(Box::new(agora_market::execute))
        .with_query(Box::new(agora_market::query))
        .build();

    let lending_code = ContractBuilder::new(Box::new(agora_lending::instantiate))
        .with_execute(Box::new(agora_lending::execute))
        .with_query(Box::new(agora_lending::query))
        .build();

    // Genesis contract addresses depend only on the salts, and account
    // addresses only on the names, so both sides of the market-ledger pairing
    // can be derived before the chain exists.
    let market = Addr::derive(GENESIS_SENDER, b"market");
    let lending = Addr::derive(GENESIS_SENDER, b"lending");
    let owner = TestAccount::new("owner").address;

    let (suite, accounts) = TestBuilder::new()
        .add_contract(market_code, b"market", &market::InstantiateMsg {
            config: market::Config {
                owner,
                loan_engine: lending,
                fee_denom: FEE_DENOM.clone(),
                listing_fee: LISTING_FEE,
                min_asset_price: MIN_ASSET_PRICE,
            },
        })
        .unwrap()
        .add_contract(lending_code, b"lending", &lending::InstantiateMsg {
            market,
        })
        .unwrap()
        .add_account("owner", Coins::one(FEE_DENOM.clone(), INITIAL_BALANCE).unwrap())
        .unwrap()
        .add_account("seller", Coins::one(FEE_DENOM.clone(), INITIAL_BALANCE).unwrap())
        .unwrap()
        .add_account("buyer", Coins::one(FEE_DENOM.clone(), INITIAL_BALANCE).unwrap())
        .unwrap()
        .add_account("lender", Coins::one(FEE_DENOM.clone(), INITIAL_BALANCE).unwrap())
        .unwrap()
        .add_account("borrower", Coins::one(FEE_DENOM.clone(), INITIAL_BALANCE).unwrap())
        .unwrap()
        .build()
        .unwrap();

    (suite, accounts, Contracts { market, lending })
}
