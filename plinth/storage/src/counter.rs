use {
    crate::{Borsh, Codec, Item},
    plinth_types::{StdError, StdResult, Storage},
};

/// Describes a number type that can back a [`Counter`](crate::Counter).
pub trait Number: Sized {
    fn checked_add(self, other: Self) -> StdResult<Self>;
}

macro_rules! impl_number {
    ($($t:ty),+ $(,)?) => {
        $(impl Number for $t {
            fn checked_add(self, other: Self) -> StdResult<Self> {
                <$t>::checked_add(self, other)
                    .ok_or_else(|| StdError::overflow_add(self as u128, other as u128))
            }
        })+
    };
}

impl_number!(u8, u16, u32, u64, u128);

/// A monotonically increasing number backed by an [`Item`](crate::Item).
///
/// While unset, the counter reads as `base`. Each `increment` adds `step`.
pub struct Counter<'a, T, C = Borsh>
where
    C: Codec<T>,
{
    item: Item<'a, T, C>,
    base: T,
    step: T,
}

impl<'a, T, C> Counter<'a, T, C>
where
    T: Number + Copy,
    C: Codec<T>,
{
    pub const fn new(storage_key: &'a str, base: T, step: T) -> Self {
        Self {
            item: Item::new(storage_key),
            base,
            step,
        }
    }

    pub fn current(&self, storage: &dyn Storage) -> StdResult<T> {
        Ok(self.item.may_load(storage)?.unwrap_or(self.base))
    }

    /// Advance the counter by one step. Returns the values before and after.
    pub fn increment(&self, storage: &mut dyn Storage) -> StdResult<(T, T)> {
        let before = self.current(storage)?;
        let after = before.checked_add(self.step)?;

        self.item.save(storage, &after)?;

        Ok((before, after))
    }

    /// Erase the stored value, so the counter reads as `base` again.
    pub fn reset(&self, storage: &mut dyn Storage) {
        self.item.remove(storage);
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::{Counter, Number},
        borsh::{BorshDeserialize, BorshSerialize},
        plinth_types::{MockStorage, StdError},
        std::fmt::Debug,
        test_case::test_case,
    };

    #[test_case(
        0_u8,
        1_u8;
        "u8"
    )]
    #[test_case(
        0_u64,
        1_u64;
        "u64"
    )]
    #[test_case(
        1_u128,
        10_u128;
        "u128"
    )]
    fn counter_works<T>(base: T, step: T)
    where
        T: BorshSerialize + BorshDeserialize + Number + PartialEq + Debug + Copy,
    {
        let counter = Counter::<T>::new("counter", base, step);

        let mut storage = MockStorage::new();
        let mut current = base;
        let mut next = current.checked_add(step).unwrap();

        for _ in 0..10 {
            assert_eq!(counter.current(&storage).unwrap(), current);
            assert_eq!(counter.increment(&mut storage).unwrap(), (current, next));

            current = next;
            next = next.checked_add(step).unwrap();
        }
    }

    #[test]
    fn incrementing_beyond_max_fails() {
        let counter = Counter::<u8>::new("counter", u8::MAX - 1, 1);

        let mut storage = MockStorage::new();

        counter.increment(&mut storage).unwrap();

        assert!(matches!(
            counter.increment(&mut storage),
            Err(StdError::OverflowAdd { .. })
        ));

        counter.reset(&mut storage);

        assert_eq!(counter.current(&storage).unwrap(), u8::MAX - 1);
    }
}
