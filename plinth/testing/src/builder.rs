use {
    crate::{tracing::setup_tracing_subscriber, TestAccount, TestAccounts, TestSuite},
    anyhow::ensure,
    plinth_app::{ContractWrapper, GenesisContract, GenesisState},
    plinth_types::{Addr, Coins, Defined, JsonSerExt, MaybeDefined, Timestamp, Undefined},
    serde::Serialize,
    std::collections::BTreeMap,
    tracing::Level,
};

const DEFAULT_TRACING_LEVEL: Level = Level::INFO;
const DEFAULT_BLOCK_TIME: Timestamp = Timestamp::from_millis(250);

pub struct TestBuilder<TA = Undefined<TestAccounts>> {
    tracing_level: Option<Level>,
    block_time: Option<Timestamp>,
    balances: BTreeMap<Addr, Coins>,
    contracts: Vec<GenesisContract>,
    accounts: TA,
}

#[allow(clippy::new_without_default)]
impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tracing_level: Some(DEFAULT_TRACING_LEVEL),
            block_time: None,
            balances: BTreeMap::new(),
            contracts: Vec::new(),
            accounts: Undefined::default(),
        }
    }
}

impl<TA> TestBuilder<TA>
where
    TA: MaybeDefined<TestAccounts>,
{
    /// Choose the tracing verbosity, or pass `None` to silence tracing.
    pub fn set_tracing_level(mut self, level: Option<Level>) -> Self {
        self.tracing_level = level;
        self
    }

    pub fn set_block_time(mut self, block_time: Timestamp) -> Self {
        self.block_time = Some(block_time);
        self
    }

    /// Register a contract to be deployed during genesis.
    ///
    /// The contract's address can be predicted ahead of the deployment as
    /// `Addr::derive(GENESIS_SENDER, salt)`.
    pub fn add_contract<M>(
        mut self,
        code: ContractWrapper,
        salt: &[u8],
        msg: &M,
    ) -> anyhow::Result<Self>
    where
        M: Serialize,
    {
        self.contracts.push(GenesisContract {
            code,
            msg: msg.to_json_value()?,
            salt: salt.to_vec(),
        });

        Ok(self)
    }

    pub fn add_account<C>(
        mut self,
        name: &'static str,
        balances: C,
    ) -> anyhow::Result<TestBuilder<Defined<TestAccounts>>>
    where
        C: TryInto<Coins>,
        anyhow::Error: From<C::Error>,
    {
        let mut accounts = self.accounts.maybe_into_inner().unwrap_or_default();
        ensure!(
            !accounts.contains_key(name),
            "account with name {name} already exists"
        );

        let account = TestAccount::new(name);

        let balances = balances.try_into()?;
        if !balances.is_empty() {
            self.balances.insert(account.address, balances);
        }
        accounts.insert(name, account);

        Ok(TestBuilder {
            tracing_level: self.tracing_level,
            block_time: self.block_time,
            balances: self.balances,
            contracts: self.contracts,
            accounts: Defined::new(accounts),
        })
    }
}

// `build` is only available once at least one account has been added.
impl TestBuilder<Defined<TestAccounts>> {
    pub fn build(self) -> anyhow::Result<(TestSuite, TestAccounts)> {
        if let Some(tracing_level) = self.tracing_level {
            setup_tracing_subscriber(tracing_level);
        }

        let block_time = self.block_time.unwrap_or(DEFAULT_BLOCK_TIME);

        let genesis_state = GenesisState {
            balances: self.balances,
            contracts: self.contracts,
        };

        let suite = TestSuite::new(block_time, genesis_state)?;

        Ok((suite, self.accounts.into_inner()))
    }
}
