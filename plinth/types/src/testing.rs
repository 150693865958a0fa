use {
    crate::{
        range_bounds, Addr, Batch, BlockInfo, Coin, Coins, Defined, Denom, ImmutableCtx, Json,
        MutableCtx, Op, Order, Querier, QuerierWrapper, Query, QueryResponse, Record, StdResult,
        Storage, Timestamp, Undefined,
    },
    std::{collections::BTreeMap, iter},
};

/// The block a [`MockContext`] reports unless overridden.
pub const MOCK_BLOCK: BlockInfo = BlockInfo {
    height: 1,
    timestamp: Timestamp::from_seconds(100),
};

/// The contract address a [`MockContext`] reports unless overridden.
pub const MOCK_CONTRACT: Addr = Addr::mock(0);

// ------------------------------- mock storage --------------------------------

/// An in-memory KV store for testing purposes.
#[derive(Default, Debug, Clone)]
pub struct MockStorage {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MockStorage {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        // BTreeMap panics if the range start is greater than the end.
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Box::new(iter::empty());
            }
        }

        let iter = self
            .data
            .range(range_bounds(min, max))
            .map(|(k, v)| (k.clone(), v.clone()));

        match order {
            Order::Ascending => Box::new(iter),
            Order::Descending => Box::new(iter.rev()),
        }
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(k, _)| k))
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(_, v)| v))
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.data.insert(key.to_vec(), value.to_vec());
    }

    fn remove(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        let keys = self
            .scan_keys(min, max, Order::Ascending)
            .collect::<Vec<_>>();
        for key in keys {
            self.data.remove(&key);
        }
    }

    fn flush(&mut self, batch: Batch) {
        for (key, op) in batch {
            match op {
                Op::Insert(value) => self.data.insert(key, value),
                Op::Delete => self.data.remove(&key),
            };
        }
    }
}

// ------------------------------- mock querier --------------------------------

type SmartQueryHandler = Box<dyn Fn(Addr, Json) -> StdResult<Json>>;

/// A querier for testing purposes. Serves balance queries out of a map;
/// smart queries require a handler to be registered, and panic otherwise.
#[derive(Default)]
pub struct MockQuerier {
    balances: BTreeMap<Addr, Coins>,
    smart_query_handler: Option<SmartQueryHandler>,
}

impl MockQuerier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, address: Addr, coins: Coins) -> Self {
        self.balances.insert(address, coins);
        self
    }

    pub fn with_smart_query_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Addr, Json) -> StdResult<Json> + 'static,
    {
        self.smart_query_handler = Some(Box::new(handler));
        self
    }
}

impl Querier for MockQuerier {
    fn query_chain(&self, req: Query) -> StdResult<QueryResponse> {
        match req {
            Query::Balance { address, denom } => {
                let amount = self
                    .balances
                    .get(&address)
                    .map(|coins| coins.amount_of(&denom))
                    .unwrap_or(0);
                Ok(QueryResponse::Balance(Coin { denom, amount }))
            },
            Query::WasmSmart { contract, msg } => {
                let Some(handler) = &self.smart_query_handler else {
                    panic!("[MockQuerier]: smart query handler not set");
                };
                handler(contract, msg).map(QueryResponse::WasmSmart)
            },
        }
    }
}

// ------------------------------- mock context --------------------------------

/// Everything a contract entry point needs, fabricated for unit tests.
pub struct MockContext<S = MockStorage, Q = MockQuerier, E = Undefined<Addr>, F = Undefined<Coins>>
{
    pub storage: S,
    pub querier: Q,
    pub block: BlockInfo,
    pub contract: Addr,
    pub sender: E,
    pub funds: F,
}

impl Default for MockContext {
    fn default() -> Self {
        Self {
            storage: MockStorage::new(),
            querier: MockQuerier::new(),
            block: MOCK_BLOCK,
            contract: MOCK_CONTRACT,
            sender: Undefined::new(),
            funds: Undefined::new(),
        }
    }
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, Q, E, F> MockContext<S, Q, E, F> {
    pub fn with_storage<T>(self, storage: T) -> MockContext<T, Q, E, F> {
        MockContext {
            storage,
            querier: self.querier,
            block: self.block,
            contract: self.contract,
            sender: self.sender,
            funds: self.funds,
        }
    }

    pub fn with_querier<T>(self, querier: T) -> MockContext<S, T, E, F> {
        MockContext {
            querier,
            storage: self.storage,
            block: self.block,
            contract: self.contract,
            sender: self.sender,
            funds: self.funds,
        }
    }

    pub fn with_sender(self, sender: Addr) -> MockContext<S, Q, Defined<Addr>, F> {
        MockContext {
            storage: self.storage,
            querier: self.querier,
            block: self.block,
            contract: self.contract,
            sender: Defined::new(sender),
            funds: self.funds,
        }
    }

    pub fn with_funds(self, funds: Coins) -> MockContext<S, Q, E, Defined<Coins>> {
        MockContext {
            storage: self.storage,
            querier: self.querier,
            block: self.block,
            contract: self.contract,
            sender: self.sender,
            funds: Defined::new(funds),
        }
    }

    pub fn with_block(mut self, block: BlockInfo) -> Self {
        self.block = block;
        self
    }

    pub fn with_block_height(mut self, height: u64) -> Self {
        self.block.height = height;
        self
    }

    pub fn with_block_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.block.timestamp = timestamp;
        self
    }

    pub fn with_contract(mut self, contract: Addr) -> Self {
        self.contract = contract;
        self
    }

    pub fn update_querier<C>(&mut self, callback: C)
    where
        C: FnOnce(&mut Q),
    {
        callback(&mut self.querier);
    }
}

impl<S, Q, E, F> MockContext<S, Q, E, F>
where
    S: Storage,
    Q: Querier,
{
    pub fn as_immutable(&self) -> ImmutableCtx<'_> {
        ImmutableCtx {
            storage: &self.storage,
            block: self.block,
            contract: self.contract,
            querier: QuerierWrapper::new(&self.querier),
        }
    }
}

impl<S, Q> MockContext<S, Q, Defined<Addr>, Defined<Coins>>
where
    S: Storage,
    Q: Querier,
{
    pub fn as_mutable(&mut self) -> MutableCtx<'_> {
        MutableCtx {
            block: self.block,
            contract: self.contract,
            sender: *self.sender.inner(),
            funds: self.funds.inner().clone(),
            querier: QuerierWrapper::new(&self.querier),
            storage: &mut self.storage,
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanning_respects_bounds_and_order() {
        let mut storage = MockStorage::new();
        storage.write(&[1], &[1]);
        storage.write(&[2], &[2]);
        storage.write(&[3], &[3]);

        // Min bound is inclusive, max bound is exclusive.
        let records = storage
            .scan(Some(&[1]), Some(&[3]), Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(records, vec![(vec![1], vec![1]), (vec![2], vec![2])]);

        let keys = storage
            .scan_keys(None, None, Order::Descending)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec![vec![3], vec![2], vec![1]]);

        // An inverted range must yield nothing instead of panicking.
        assert_eq!(storage.scan(Some(&[3]), Some(&[1]), Order::Ascending).count(), 0);
    }

    #[test]
    fn removing_range_deletes_everything_within() {
        let mut storage = MockStorage::new();
        storage.write(&[1], &[1]);
        storage.write(&[2], &[2]);
        storage.write(&[3], &[3]);

        storage.remove_range(Some(&[2]), None);

        assert_eq!(storage.read(&[1]), Some(vec![1]));
        assert_eq!(storage.read(&[2]), None);
        assert_eq!(storage.read(&[3]), None);
    }
}
