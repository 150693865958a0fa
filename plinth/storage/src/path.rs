use {
    crate::{nest_storage_keys, Codec, RawKey},
    plinth_types::{StdError, StdResult, Storage},
    std::{borrow::Cow, marker::PhantomData},
};

/// The fully assembled storage key of one value, together with the codec for
/// reading and writing that value.
///
/// Containers such as `Map` and `Item` do their work by assembling a `Path`
/// and calling its methods.
pub struct Path<'a, T, C> {
    key: Cow<'a, [u8]>,
    phantom: PhantomData<(T, C)>,
}

impl<T, C> Clone for Path<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'a, T, C> Path<'a, T, C>
where
    C: Codec<T>,
{
    pub fn new(namespace: &[u8], prefixes: &[RawKey], maybe_key: Option<RawKey>) -> Self {
        Self {
            key: Cow::Owned(nest_storage_keys(Some(namespace), prefixes, maybe_key)),
            phantom: PhantomData,
        }
    }

    pub const fn from_raw(key: &'a [u8]) -> Self {
        Self {
            key: Cow::Borrowed(key),
            phantom: PhantomData,
        }
    }

    #[inline]
    pub fn storage_key(&self) -> &[u8] {
        self.key.as_ref()
    }

    fn read(&self, storage: &dyn Storage) -> Option<Vec<u8>> {
        storage.read(self.storage_key())
    }

    pub fn exists(&self, storage: &dyn Storage) -> bool {
        self.read(storage).is_some()
    }

    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        self.read(storage).map(|raw| C::decode(&raw)).transpose()
    }

    pub fn load(&self, storage: &dyn Storage) -> StdResult<T> {
        match self.read(storage) {
            Some(raw) => C::decode(&raw),
            None => Err(StdError::data_not_found::<T>(self.storage_key())),
        }
    }

    pub fn may_take(&self, storage: &mut dyn Storage) -> StdResult<Option<T>> {
        let taken = self.may_load(storage)?;

        if taken.is_some() {
            self.remove(storage);
        }

        Ok(taken)
    }

    pub fn take(&self, storage: &mut dyn Storage) -> StdResult<T> {
        let taken = self.load(storage)?;

        self.remove(storage);

        Ok(taken)
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let raw = C::encode(data)?;

        storage.write(self.storage_key(), &raw);

        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(self.storage_key());
    }

    pub fn may_update<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<T, E>
    where
        F: FnOnce(Option<T>) -> Result<T, E>,
        E: From<StdError>,
    {
        let updated = action(self.may_load(storage)?)?;

        self.save(storage, &updated)?;

        Ok(updated)
    }

    pub fn update<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<T, E>
    where
        F: FnOnce(T) -> Result<T, E>,
        E: From<StdError>,
    {
        let updated = action(self.load(storage)?)?;

        self.save(storage, &updated)?;

        Ok(updated)
    }

    /// Like `may_update`, except the action returning `None` removes the
    /// entry. A no-op if the action returns `None` and the entry never
    /// existed to begin with.
    pub fn may_modify<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce(Option<T>) -> Result<Option<T>, E>,
        E: From<StdError>,
    {
        let current = self.may_load(storage)?;
        let existed = current.is_some();

        match action(current)? {
            Some(updated) => {
                self.save(storage, &updated)?;

                Ok(Some(updated))
            },
            None => {
                if existed {
                    self.remove(storage);
                }

                Ok(None)
            },
        }
    }

    pub fn modify<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce(T) -> Result<Option<T>, E>,
        E: From<StdError>,
    {
        match action(self.load(storage)?)? {
            Some(updated) => {
                self.save(storage, &updated)?;

                Ok(Some(updated))
            },
            None => {
                self.remove(storage);

                Ok(None)
            },
        }
    }
}
