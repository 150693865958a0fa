use {dyn_clone::DynClone, std::collections::BTreeMap};

/// A key-value pair of raw bytes.
pub type Record = (Vec<u8>, Vec<u8>);

/// A batch of writes to be applied to a store atomically, ordered by key.
pub type Batch = BTreeMap<Vec<u8>, Op>;

/// A single write operation: either insert a value under a key, or delete
/// the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Insert(Vec<u8>),
    Delete,
}

/// Iteration order over a key space. Keys compare as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Describes a KV store of binary keys and values, with keys ordered
/// lexicographically by their raw bytes.
pub trait Storage: DynClone + Send + Sync {
    /// The value stored under the key, if any.
    fn read(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Iterate the records within the bounds, `min` inclusive and `max`
    /// exclusive. An inverted range (`min` > `max`) yields an empty iterator.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a>;

    /// Like `scan`, but yields only the keys.
    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a>;

    /// Like `scan`, but yields only the values.
    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a>;

    /// Store the value under the key, overwriting any previous value.
    fn write(&mut self, key: &[u8], value: &[u8]);

    /// Delete the key. A no-op if it doesn't exist.
    fn remove(&mut self, key: &[u8]);

    /// Delete every key within the bounds, `min` inclusive and `max`
    /// exclusive.
    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>);

    /// Apply a whole batch of ops. The default applies them one at a time.
    fn flush(&mut self, batch: Batch) {
        for (key, op) in batch {
            match op {
                Op::Insert(value) => self.write(&key, &value),
                Op::Delete => self.remove(&key),
            }
        }
    }
}

// `clone_trait_object` is what makes `Box<dyn Storage>` itself `Clone`. A
// plain `Clone` supertrait can't, not being object safe.
dyn_clone::clone_trait_object!(Storage);

// A boxed storage is also a storage.

impl Storage for Box<dyn Storage> {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).read(key)
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        (**self).scan(min, max, order)
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        (**self).scan_keys(min, max, order)
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        (**self).scan_values(min, max, order)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        (**self).remove(key)
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        (**self).remove_range(min, max)
    }

    fn flush(&mut self, batch: Batch) {
        (**self).flush(batch)
    }
}
