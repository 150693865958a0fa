use {
    crate::{nest_storage_keys, Codec, PrimaryKey, RawKey},
    plinth_types::{
        concat, extend_one_byte, increment_last_byte, trim, Bound, Order, Record, StdResult,
        Storage,
    },
    std::marker::PhantomData,
};

/// A map (or set) narrowed down to the entries under one key prefix. Supports
/// iterating over the remaining part of the keys.
pub struct Prefix<K, T, C> {
    prefix: Vec<u8>,
    suffix: PhantomData<K>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<K, T, C> Prefix<K, T, C> {
    pub fn new(namespace: &[u8], prefixes: &[RawKey]) -> Self {
        Self {
            prefix: nest_storage_keys(Some(namespace), prefixes, None),
            suffix: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }
}

impl<K, T, C> Prefix<K, T, C>
where
    K: PrimaryKey,
    C: Codec<T>,
{
    /// Convert the typed bounds into the raw byte range to scan. The storage
    /// scan takes an inclusive min and an exclusive max, so inclusive/exclusive
    /// flips are done by appending a zero byte.
    fn range_bounds(&self, min: Option<Bound<K>>, max: Option<Bound<K>>) -> (Vec<u8>, Vec<u8>) {
        let min = match min {
            None => self.prefix.clone(),
            Some(Bound::Inclusive(key)) => concat(&self.prefix, &key.joined_key()),
            Some(Bound::Exclusive(key)) => {
                extend_one_byte(concat(&self.prefix, &key.joined_key()))
            },
        };

        let max = match max {
            None => increment_last_byte(self.prefix.clone()),
            Some(Bound::Inclusive(key)) => {
                extend_one_byte(concat(&self.prefix, &key.joined_key()))
            },
            Some(Bound::Exclusive(key)) => concat(&self.prefix, &key.joined_key()),
        };

        (min, max)
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.keys_raw(storage, None, None, Order::Ascending)
            .next()
            .is_none()
    }

    pub fn range_raw<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        let (min, max) = self.range_bounds(min, max);
        let prefix = self.prefix.clone();

        let iter = storage
            .scan(Some(&min), Some(&max), order)
            .map(move |(k, v)| (trim(&prefix, &k), v));

        Box::new(iter)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b> {
        let iter = self.range_raw(storage, min, max, order).map(|(k, v)| {
            let key = K::from_slice(&k)?;
            let data = C::decode(&v)?;
            Ok((key, data))
        });

        Box::new(iter)
    }

    pub fn keys_raw<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'b> {
        let (min, max) = self.range_bounds(min, max);
        let prefix = self.prefix.clone();

        let iter = storage
            .scan_keys(Some(&min), Some(&max), order)
            .map(move |k| trim(&prefix, &k));

        Box::new(iter)
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<K::Output>> + 'b> {
        let iter = self
            .keys_raw(storage, min, max, order)
            .map(|k| K::from_slice(&k));

        Box::new(iter)
    }

    pub fn values_raw<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'b> {
        let (min, max) = self.range_bounds(min, max);

        storage.scan_values(Some(&min), Some(&max), order)
    }

    pub fn values<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T>> + 'b> {
        let iter = self
            .values_raw(storage, min, max, order)
            .map(|v| C::decode(&v));

        Box::new(iter)
    }

    pub fn clear(&self, storage: &mut dyn Storage, min: Option<Bound<K>>, max: Option<Bound<K>>) {
        let (min, max) = self.range_bounds(min, max);

        storage.remove_range(Some(&min), Some(&max))
    }
}
