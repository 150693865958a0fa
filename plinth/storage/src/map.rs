use {
    crate::{Borsh, Codec, Path, Prefix, Prefixer, PrimaryKey},
    plinth_types::{Bound, Order, StdError, StdResult, Storage},
    std::marker::PhantomData,
};

/// A mapping from typed keys to typed values, stored under a fixed namespace.
pub struct Map<'a, K, T, C = Borsh>
where
    C: Codec<T>,
{
    namespace: &'a [u8],
    key: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<'a, K, T, C> Map<'a, K, T, C>
where
    C: Codec<T>,
{
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            key: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<K, T, C> Map<'_, K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    #[doc(hidden)]
    pub fn path(&self, key: K) -> Path<T, C> {
        let mut raw = key.raw_keys();
        let last = raw.pop();

        Path::new(self.namespace, &raw, last)
    }

    #[doc(hidden)]
    pub fn no_prefix(&self) -> Prefix<K, T, C> {
        Prefix::new(self.namespace, &[])
    }

    /// Narrow the map down to the entries sharing the given key prefix.
    pub fn prefix(&self, prefix: K::Prefix) -> Prefix<K::Suffix, T, C> {
        Prefix::new(self.namespace, &prefix.raw_prefixes())
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.no_prefix().is_empty(storage)
    }

    pub fn has(&self, storage: &dyn Storage, key: K) -> bool {
        self.path(key).exists(storage)
    }

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).may_load(storage)
    }

    pub fn load(&self, storage: &dyn Storage, key: K) -> StdResult<T> {
        self.path(key).load(storage)
    }

    pub fn may_take(&self, storage: &mut dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).may_take(storage)
    }

    pub fn take(&self, storage: &mut dyn Storage, key: K) -> StdResult<T> {
        self.path(key).take(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &T) -> StdResult<()> {
        self.path(key).save(storage, data)
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        self.path(key).remove(storage)
    }

    pub fn may_update<F, E>(&self, storage: &mut dyn Storage, key: K, action: F) -> Result<T, E>
    where
        F: FnOnce(Option<T>) -> Result<T, E>,
        E: From<StdError>,
    {
        self.path(key).may_update(storage, action)
    }

    pub fn update<F, E>(&self, storage: &mut dyn Storage, key: K, action: F) -> Result<T, E>
    where
        F: FnOnce(T) -> Result<T, E>,
        E: From<StdError>,
    {
        self.path(key).update(storage, action)
    }

    pub fn may_modify<F, E>(
        &self,
        storage: &mut dyn Storage,
        key: K,
        action: F,
    ) -> Result<Option<T>, E>
    where
        F: FnOnce(Option<T>) -> Result<Option<T>, E>,
        E: From<StdError>,
    {
        self.path(key).may_modify(storage, action)
    }

    pub fn modify<F, E>(&self, storage: &mut dyn Storage, key: K, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce(T) -> Result<Option<T>, E>,
        E: From<StdError>,
    {
        self.path(key).modify(storage, action)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b> {
        self.no_prefix().range(storage, min, max, order)
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<K::Output>> + 'b> {
        self.no_prefix().keys(storage, min, max, order)
    }

    pub fn values<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T>> + 'b> {
        self.no_prefix().values(storage, min, max, order)
    }

    pub fn clear(&self, storage: &mut dyn Storage, min: Option<Bound<K>>, max: Option<Bound<K>>) {
        self.no_prefix().clear(storage, min, max)
    }
}

// ----------------------------------- tests -----------------------------------
