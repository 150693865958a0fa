use {
    crate::process_query,
    plinth_types::{
        concat, increment_last_byte, trim, BlockInfo, Order, Querier, Query, QueryResponse, Record,
        StdError, StdResult, Storage,
    },
};

// ---------------------------------- storage ----------------------------------

/// Provides access to a contract's own portion of the chain's storage.
///
/// Essentially, this is a prefixed key-value storage. The prefix is the single
/// byte `b"w"` followed by the contract address.
#[derive(Clone)]
pub struct StorageProvider {
    storage: Box<dyn Storage>,
    namespace: Vec<u8>,
}

impl StorageProvider {
    pub fn new(storage: Box<dyn Storage>, prefixes: &[&[u8]]) -> Self {
        Self {
            storage,
            namespace: prefixes.concat(),
        }
    }

    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }
}

impl Storage for StorageProvider {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.storage.read(&concat(&self.namespace, key))
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        let (min, max) = prefixed_range_bounds(&self.namespace, min, max);

        Box::new(
            self.storage
                .scan(Some(&min), Some(&max), order)
                .map(|(key, value)| (trim(&self.namespace, &key), value)),
        )
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        let (min, max) = prefixed_range_bounds(&self.namespace, min, max);

        Box::new(
            self.storage
                .scan_keys(Some(&min), Some(&max), order)
                .map(|key| trim(&self.namespace, &key)),
        )
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        let (min, max) = prefixed_range_bounds(&self.namespace, min, max);

        self.storage.scan_values(Some(&min), Some(&max), order)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.storage.write(&concat(&self.namespace, key), value);
    }

    fn remove(&mut self, key: &[u8]) {
        self.storage.remove(&concat(&self.namespace, key));
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        let (min, max) = prefixed_range_bounds(&self.namespace, min, max);

        self.storage.remove_range(Some(&min), Some(&max))
    }
}

/// An unbounded scan inside the namespace is a bounded scan over the base
/// store: from the prefix itself up to the prefix with its last byte
/// incremented.
#[inline]
fn prefixed_range_bounds(
    prefix: &[u8],
    min: Option<&[u8]>,
    max: Option<&[u8]>,
) -> (Vec<u8>, Vec<u8>) {
    let min = min.map_or_else(|| prefix.to_vec(), |bytes| concat(prefix, bytes));
    let max = max.map_or_else(
        || increment_last_byte(prefix.to_vec()),
        |bytes| concat(prefix, bytes),
    );

    (min, max)
}

// ---------------------------------- querier ----------------------------------

/// Provides querier functionalities to a contract. Queries run against the
/// same store the transaction is executing on, so a contract sees its own
/// earlier writes.
pub struct QuerierProvider {
    storage: Box<dyn Storage>,
    block: BlockInfo,
}

impl QuerierProvider {
    pub fn new(storage: Box<dyn Storage>, block: BlockInfo) -> Self {
        Self { storage, block }
    }
}

impl Querier for QuerierProvider {
    fn query_chain(&self, req: Query) -> StdResult<QueryResponse> {
        // Cast the error to `StdError::Host`, since contracts know `StdError`,
        // not the app's error type.
        process_query(self.storage.clone(), self.block, req).map_err(StdError::host)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, plinth_types::MockStorage};

    #[test]
    fn namespacing_keys() {
        let mut base = MockStorage::new();
        base.write(b"before", b"1");

        let mut provider = StorageProvider::new(Box::new(base), &[b"w", &[0xab, 0xcd]]);

        assert_eq!(provider.namespace(), b"w\xab\xcd");

        // Keys outside the namespace must be invisible.
        assert_eq!(provider.read(b"before"), None);

        provider.write(b"a", b"2");
        provider.write(b"b", b"3");
        assert_eq!(provider.read(b"a"), Some(b"2".to_vec()));

        // Iteration only sees the namespace, with the prefix trimmed off.
        let records = provider.scan(None, None, Order::Ascending).collect::<Vec<_>>();
        assert_eq!(records, vec![
            (b"a".to_vec(), b"2".to_vec()),
            (b"b".to_vec(), b"3".to_vec()),
        ]);

        provider.remove(b"a");
        assert_eq!(provider.read(b"a"), None);
    }
}
