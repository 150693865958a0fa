use {
    crate::{Borsh, Codec, Path, Prefix, Prefixer, PrimaryKey},
    plinth_types::{Bound, Empty, Order, StdResult, Storage},
    std::marker::PhantomData,
};

/// A collection of unique items, the storage counterpart of `BTreeSet`.
///
/// An entry is a key with nothing attached, so everything here rides on the
/// same [`Path`] and [`Prefix`] machinery as [`Map`](crate::Map). The stored
/// value is [`Empty`], which Borsh renders as zero bytes.
pub struct Set<'a, T, C = Borsh>
where
    C: Codec<Empty>,
{
    namespace: &'a [u8],
    item: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<'a, T, C> Set<'a, T, C>
where
    C: Codec<Empty>,
{
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            item: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<T, C> Set<'_, T, C>
where
    T: PrimaryKey,
    C: Codec<Empty>,
{
    #[doc(hidden)]
    pub fn path(&self, item: T) -> Path<Empty, Borsh> {
        let mut raw = item.raw_keys();
        let last = raw.pop();

        Path::new(self.namespace, &raw, last)
    }

    #[doc(hidden)]
    pub fn no_prefix(&self) -> Prefix<T, Empty, C> {
        Prefix::new(self.namespace, &[])
    }

    /// Narrow the set down to the items sharing the given key prefix.
    pub fn prefix(&self, prefix: T::Prefix) -> Prefix<T::Suffix, Empty, C> {
        Prefix::new(self.namespace, &prefix.raw_prefixes())
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.no_prefix().is_empty(storage)
    }

    pub fn has(&self, storage: &dyn Storage, item: T) -> bool {
        self.path(item).exists(storage)
    }

    pub fn insert(&self, storage: &mut dyn Storage, item: T) -> StdResult<()> {
        self.path(item).save(storage, &Empty {})
    }

    pub fn remove(&self, storage: &mut dyn Storage, item: T) {
        self.path(item).remove(storage)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<T>>,
        max: Option<Bound<T>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T::Output>> + 'b> {
        self.no_prefix().keys(storage, min, max, order)
    }

    pub fn clear(&self, storage: &mut dyn Storage, min: Option<Bound<T>>, max: Option<Bound<T>>) {
        self.no_prefix().clear(storage, min, max)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::Set,
        plinth_types::{Bound, MockStorage, Order, StdResult},
    };

    const SINGLE: Set<u64> = Set::new("single");

    const DOUBLE: Set<(u64, u64)> = Set::new("double");

    #[test]
    fn insert_has_remove() {
        let storage = &mut MockStorage::new();

        SINGLE.insert(storage, 1).unwrap();

        assert!(SINGLE.has(storage, 1));
        assert!(!SINGLE.has(storage, 2));

        DOUBLE.insert(storage, (1, 11)).unwrap();
        assert!(DOUBLE.has(storage, (1, 11)));
        assert!(!DOUBLE.has(storage, (1, 12)));

        SINGLE.remove(storage, 1);
        assert!(!SINGLE.has(storage, 1));

        DOUBLE.remove(storage, (1, 11));
        assert!(!DOUBLE.has(storage, (1, 11)));
    }

    #[test]
    fn ranging_and_clearing() {
        let storage = &mut MockStorage::new();

        for i in 0..100_u64 {
            SINGLE.insert(storage, i).unwrap();
        }

        let items = SINGLE
            .range(
                storage,
                Some(Bound::Inclusive(40)),
                Some(Bound::Exclusive(50)),
                Order::Ascending,
            )
            .collect::<StdResult<Vec<_>>>()
            .unwrap();

        assert_eq!(items, (40..50).collect::<Vec<_>>());

        SINGLE.clear(storage, Some(Bound::Inclusive(30)), None);

        let remaining = SINGLE
            .range(storage, None, None, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()
            .unwrap();

        assert_eq!(remaining, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn prefixed_members() {
        let storage = &mut MockStorage::new();

        for item in [(1, 11), (1, 12), (2, 21), (3, 31), (3, 32)] {
            DOUBLE.insert(storage, item).unwrap();
        }

        let members = DOUBLE
            .prefix(1)
            .keys(storage, None, None, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()
            .unwrap();

        assert_eq!(members, vec![11, 12]);

        assert!(DOUBLE.prefix(2).keys(storage, None, None, Order::Ascending).count() == 1);
        assert!(DOUBLE.prefix(4).is_empty(storage));
    }
}
