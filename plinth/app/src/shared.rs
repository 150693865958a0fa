use {
    plinth_types::{extend_one_byte, Batch, Order, Record, Storage},
    std::{
        sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
        vec,
    },
};

/// Shared ownership of a storage backend.
///
/// Cloning copies the pointer, not the store. Every clone handed out while a
/// block is being finalized reads and writes the same underlying store, which
/// is what lets one buffer collect the writes of all messages in a
/// transaction.
pub struct Shared<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Shared<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    fn read_access(&self) -> RwLockReadGuard<S> {
        self.inner
            .read()
            .unwrap_or_else(|err| panic!("lock poisoned: {err}"))
    }

    fn write_access(&self) -> RwLockWriteGuard<S> {
        self.inner
            .write()
            .unwrap_or_else(|err| panic!("lock poisoned: {err}"))
    }

    /// Reclaim exclusive ownership of the store.
    ///
    /// Panics if any clone is still alive, or if the lock is poisoned.
    pub fn into_inner(self) -> S {
        Arc::try_unwrap(self.inner)
            .unwrap_or_else(|_| panic!("clones of the shared store still exist"))
            .into_inner()
            .unwrap_or_else(|err| panic!("lock poisoned: {err}"))
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Storage for Shared<S>
where
    S: Storage,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.read_access().read(key)
    }

    // `scan` can't simply delegate to the guard: the iterator the guard hands
    // out borrows the guard, which would be dropped at the end of this method.
    // So the returned iterator holds the guard itself, and yields owned
    // records one page at a time. Collecting the whole [min, max) range
    // upfront would also work, but the range can be large.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        Box::new(PagedScan::new(self.read_access(), min, max, order))
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
        self.write_access().write(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        self.write_access().remove(key)
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        self.write_access().remove_range(min, max)
    }

    fn flush(&mut self, batch: Batch) {
        self.write_access().flush(batch)
    }
}

/// Iterates a key range while holding the read lock, fetching records from
/// the store one page at a time.
struct PagedScan<'a, S> {
    guard: RwLockReadGuard<'a, S>,
    page: vec::IntoIter<Record>,
    min: Option<Vec<u8>>,
    max: Option<Vec<u8>>,
    order: Order,
}

const PAGE_SIZE: usize = 30;

impl<'a, S> PagedScan<'a, S> {
    fn new(
        guard: RwLockReadGuard<'a, S>,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Self {
        Self {
            guard,
            page: Vec::new().into_iter(),
            min: min.map(<[u8]>::to_vec),
            max: max.map(<[u8]>::to_vec),
            order,
        }
    }
}

impl<S> PagedScan<'_, S>
where
    S: Storage,
{
    fn refill(&mut self) {
        let page = self
            .guard
            .scan(self.min.as_deref(), self.max.as_deref(), self.order)
            .take(PAGE_SIZE)
            .collect::<Vec<_>>();

        // Advance the bound on the scanned side past the last key of this
        // page. Keys are of variable length, so for the inclusive min bound,
        // the successor of a key is the key with a zero byte appended.
        if let Some((key, _)) = page.last() {
            match self.order {
                Order::Ascending => self.min = Some(extend_one_byte(key.clone())),
                Order::Descending => self.max = Some(key.clone()),
            }
        }

        self.page = page.into_iter();
    }
}

impl<S> Iterator for PagedScan<'_, S>
where
    S: Storage,
{
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.page.next() {
            return Some(record);
        }

        // The page ran out. Fetch the next one; if it comes back empty, the
        // range is exhausted.
        self.refill();
        self.page.next()
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, plinth_types::MockStorage};

    fn numeric_records(min: u32, max: u32, order: Order) -> Vec<Record> {
        let mut records = (min..max)
            .map(|i| (i.to_be_bytes().to_vec(), i.to_be_bytes().to_vec()))
            .collect::<Vec<_>>();
        if order == Order::Descending {
            records.reverse();
        }
        records
    }

    /// 99 records crosses several page boundaries in both directions.
    #[test]
    fn scanning_across_pages() {
        let mut storage = Shared::new(MockStorage::new());

        for (k, v) in numeric_records(1, 100, Order::Ascending) {
            storage.write(&k, &v);
        }

        let records = storage
            .scan(
                Some(&12_u32.to_be_bytes()),
                Some(&89_u32.to_be_bytes()),
                Order::Ascending,
            )
            .collect::<Vec<_>>();
        assert_eq!(records, numeric_records(12, 89, Order::Ascending));

        let records = storage
            .scan(None, None, Order::Descending)
            .collect::<Vec<_>>();
        assert_eq!(records, numeric_records(1, 100, Order::Descending));
    }

    // Variable-length keys whose ordering differs from their insertion order.
    // Catches page cursors advanced with arithmetic that only works for
    // fixed-length keys.
    #[test]
    fn scanning_variable_length_keys() {
        let mut storage = Shared::new(MockStorage::new());

        // The numbers 1 to 100 as strings, in string order, where e.g. "13"
        // sorts between "1" and "2".
        let mut expected = (1..=100).map(|i| i.to_string()).collect::<Vec<_>>();
        expected.sort();

        for key in &expected {
            storage.write(key.as_bytes(), &[]);
        }

        let scanned = storage
            .scan_keys(None, None, Order::Ascending)
            .map(|bytes| String::from_utf8(bytes).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(scanned, expected);
    }

    #[test]
    fn clones_share_the_store() {
        let storage = Shared::new(MockStorage::new());

        let mut clone = storage.clone();
        clone.write(b"key", b"value");
        drop(clone);

        assert_eq!(storage.read(b"key"), Some(b"value".to_vec()));

        let inner = storage.into_inner();
        assert_eq!(inner.read(b"key"), Some(b"value".to_vec()));
    }
}
