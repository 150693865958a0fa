use {
    counter::{CounterRequest, ExecuteMsg, InstantiateMsg},
    plinth_app::GENESIS_SENDER,
    plinth_testing::{BalanceChange, ContractBuilder, TestBuilder},
    plinth_types::{Addr, Addressable, Coins, Denom, Message, ResultExt, StdError},
    std::str::FromStr,
};

mod counter {
    use {
        plinth_storage::Item,
        plinth_types::{
            ImmutableCtx, Json, JsonSerExt, MutableCtx, QueryRequest, Response, StdError,
            StdResult,
        },
        serde::{Deserialize, Serialize},
    };

    pub const COUNTER: Item<u64> = Item::new("counter");

    #[derive(Serialize, Deserialize)]
    pub struct InstantiateMsg {
        pub initial: u64,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExecuteMsg {
        Increment {},
        Fail {},
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum QueryMsg {
        Counter {},
    }

    pub struct CounterRequest;

    impl QueryRequest for CounterRequest {
        type Message = QueryMsg;
        type Response = u64;
    }

    impl From<CounterRequest> for QueryMsg {
        fn from(_: CounterRequest) -> Self {
            QueryMsg::Counter {}
        }
    }

    pub fn instantiate(ctx: MutableCtx, msg: InstantiateMsg) -> StdResult<Response> {
        COUNTER.save(ctx.storage, &msg.initial)?;

        Ok(Response::new())
    }

    pub fn execute(ctx: MutableCtx, msg: ExecuteMsg) -> StdResult<Response> {
        match msg {
            ExecuteMsg::Increment {} => {
                COUNTER.update(ctx.storage, |count| -> StdResult<_> { Ok(count + 1) })?;

                Ok(Response::new())
            },
            ExecuteMsg::Fail {} => Err(StdError::host("you asked for it")),
        }
    }

    pub fn query(ctx: ImmutableCtx, msg: QueryMsg) -> StdResult<Json> {
        match msg {
            QueryMsg::Counter {} => COUNTER.load(ctx.storage)?.to_json_value(),
        }
    }
}

#[test]
fn deploying_and_executing() {
    let code = ContractBuilder::new(Box::new(counter::instantiate))
        .with_execute(Box::new(counter::execute))
        .with_query(Box::new(counter::query))
        .build();

    let contract = Addr::derive(GENESIS_SENDER, b"counter");

    let (mut suite, accounts) = TestBuilder::new()
        .add_contract(code, b"counter", &InstantiateMsg { initial: 7 })
        .unwrap()
        .add_account("sender", Coins::new())
        .unwrap()
        .build()
        .unwrap();

    let sender = &accounts["sender"];

    suite
        .query_wasm_smart(contract, CounterRequest)
        .should_succeed_and_equal(7);

    suite
        .execute(sender, contract, &ExecuteMsg::Increment {}, Coins::new())
        .should_succeed();

    suite
        .query_wasm_smart(contract, CounterRequest)
        .should_succeed_and_equal(8);

    // A failure inside the contract must surface through the tx outcome.
    suite
        .execute(sender, contract, &ExecuteMsg::Fail {}, Coins::new())
        .should_fail_with_error("you asked for it");

    // The failed execution must not have touched the counter.
    suite
        .query_wasm_smart(contract, CounterRequest)
        .should_succeed_and_equal(8);
}

#[test]
fn transferring_and_tracking_balances() {
    let denom = Denom::from_str("ucoin").unwrap();

    let (mut suite, accounts) = TestBuilder::new()
        .add_account("alice", Coins::one(denom.clone(), 300).unwrap())
        .unwrap()
        .add_account("bob", Coins::new())
        .unwrap()
        .build()
        .unwrap();

    let alice = &accounts["alice"];
    let bob = &accounts["bob"];

    suite.balances().record_many([alice, bob], &denom);

    suite
        .transfer(alice, bob.address(), Coins::one(denom.clone(), 100).unwrap())
        .should_succeed();

    suite
        .balances()
        .should_change(alice, &denom, BalanceChange::Decreased(100));
    suite
        .balances()
        .should_change(bob, &denom, BalanceChange::Increased(100));

    // A multi message tx where the second message overdraws. The whole tx must
    // be rolled back, including the first message.
    suite
        .send_messages(alice, vec![
            Message::transfer(bob.address(), Coins::one(denom.clone(), 150).unwrap()).unwrap(),
            Message::transfer(bob.address(), Coins::one(denom.clone(), 150).unwrap()).unwrap(),
        ])
        .should_fail_with_error(StdError::overflow_sub(50, 150));

    suite
        .query_balance(alice, denom.clone())
        .should_succeed_and_equal(200);
    suite
        .query_balance(bob, denom.clone())
        .should_succeed_and_equal(100);
}
