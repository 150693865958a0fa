use {
    crate::BalanceTracker,
    plinth_app::{App, GenesisState, GENESIS_BLOCK},
    plinth_types::{
        Addr, Addressable, BlockInfo, Coins, Denom, JsonDeExt, JsonSerExt, Message, MockStorage,
        Query, QueryRequest, StdError, Timestamp, Tx, TxOutcome,
    },
    serde::ser::Serialize,
    std::{collections::BTreeMap, fmt::Debug},
};

pub struct TestSuite {
    pub app: App<MockStorage>,
    /// The block most recently finalized. The next block builds on top of it.
    pub block: BlockInfo,
    /// How far the block timestamp advances from one block to the next.
    pub block_time: Timestamp,
    /// Balances recorded by the balance tracker, keyed by account and denom.
    pub(crate) balances: BTreeMap<(Addr, Denom), u128>,
}

impl TestSuite {
    /// Construct a suite over a fresh chain.
    ///
    /// [`TestBuilder`](crate::TestBuilder) is the usual front door; call this
    /// directly only with an already assembled genesis state.
    pub fn new(block_time: Timestamp, genesis_state: GenesisState) -> anyhow::Result<Self> {
        let mut app = App::new(MockStorage::new());
        app.init_chain(genesis_state)?;

        Ok(Self {
            app,
            block: GENESIS_BLOCK,
            block_time,
            balances: BTreeMap::new(),
        })
    }

    /// Advance the chain by one block carrying no transactions.
    pub fn make_empty_block(&mut self) -> Vec<TxOutcome> {
        self.make_block(vec![])
    }

    /// Finalize and commit one block carrying the given transactions.
    pub fn make_block(&mut self, txs: Vec<Tx>) -> Vec<TxOutcome> {
        self.block.height += 1;
        self.block.timestamp = self.block.timestamp + self.block_time;

        let outcomes = self
            .app
            .finalize_block(self.block, txs)
            .unwrap_or_else(|err| {
                panic!("failed to finalize block: {err}");
            });

        self.app.commit().unwrap_or_else(|err| {
            panic!("failed to commit block: {err}");
        });

        outcomes
    }

    /// Run a single transaction in a block of its own.
    pub fn send_transaction(&mut self, tx: Tx) -> TxOutcome {
        self.make_block(vec![tx]).pop().unwrap()
    }

    /// Run a transaction carrying a single message.
    pub fn send_message(&mut self, signer: &dyn Addressable, msg: Message) -> TxOutcome {
        self.send_messages(signer, vec![msg])
    }

    /// Run a transaction carrying the given messages, signed by `signer`.
    pub fn send_messages(&mut self, signer: &dyn Addressable, msgs: Vec<Message>) -> TxOutcome {
        self.send_transaction(Tx {
            sender: signer.address(),
            msgs,
        })
    }

    /// Move coins from the signer to another account.
    pub fn transfer<C>(&mut self, signer: &dyn Addressable, to: Addr, coins: C) -> TxOutcome
    where
        C: TryInto<Coins>,
        StdError: From<C::Error>,
    {
        self.send_message(signer, Message::transfer(to, coins).unwrap())
    }

    /// Call a contract's execute entry point, attaching the given funds.
    pub fn execute<M, C>(
        &mut self,
        signer: &dyn Addressable,
        contract: Addr,
        msg: &M,
        funds: C,
    ) -> TxOutcome
    where
        M: Serialize,
        C: TryInto<Coins>,
        StdError: From<C::Error>,
    {
        self.send_message(signer, Message::execute(contract, msg, funds).unwrap())
    }

    pub fn query_balance<D>(&mut self, account: &dyn Addressable, denom: D) -> anyhow::Result<u128>
    where
        D: TryInto<Denom>,
        D::Error: Debug,
    {
        self.app
            .query(Query::Balance {
                address: account.address(),
                denom: denom.try_into().unwrap(),
            })
            .map(|res| res.as_balance().amount)
    }

    pub fn query_wasm_smart<R>(&mut self, contract: Addr, req: R) -> anyhow::Result<R::Response>
    where
        R: QueryRequest,
    {
        let msg = R::Message::from(req).to_json_value()?;
        let res = self
            .app
            .query(Query::WasmSmart { contract, msg })?
            .as_wasm_smart();

        Ok(res.deserialize_json()?)
    }

    /// Track balance changes across transactions.
    pub fn balances(&mut self) -> BalanceTracker<'_> {
        BalanceTracker { suite: self }
    }
}
