use {
    crate::{Borsh, Codec, Path},
    std::ops::Deref,
};

/// A single value stored under a fixed key.
pub struct Item<'a, T, C = Borsh>
where
    C: Codec<T>,
{
    path: Path<'a, T, C>,
}

impl<'a, T, C> Item<'a, T, C>
where
    C: Codec<T>,
{
    pub const fn new(storage_key: &'a str) -> Self {
        Self {
            path: Path::from_raw(storage_key.as_bytes()),
        }
    }
}

// An `Item` is a `Path` whose key is the namespace itself. All of `Path`'s
// methods are exposed through `Deref`.
impl<'a, T, C: Codec<T>> Deref for Item<'a, T, C> {
    type Target = Path<'a, T, C>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::Item,
        borsh::{BorshDeserialize, BorshSerialize},
        plinth_types::{MockStorage, StdError, StdResult},
    };

    #[derive(BorshDeserialize, BorshSerialize, PartialEq, Debug)]
    struct Policy {
        pub owner: String,
        pub listing_fee: u128,
    }

    const POLICY: Item<Policy> = Item::new("policy");

    fn mock_policy() -> Policy {
        Policy {
            owner: "fee_collector".to_string(),
            listing_fee: 25,
        }
    }

    #[test]
    fn loading_before_and_after_saving() {
        let mut storage = MockStorage::new();

        assert!(POLICY.load(&storage).is_err());
        assert_eq!(POLICY.may_load(&storage).unwrap(), None);
        assert!(!POLICY.exists(&storage));

        POLICY.save(&mut storage, &mock_policy()).unwrap();

        assert!(POLICY.exists(&storage));
        assert_eq!(POLICY.load(&storage).unwrap(), mock_policy());
        assert_eq!(POLICY.may_load(&storage).unwrap(), Some(mock_policy()));
    }

    #[test]
    fn existence_is_not_the_same_as_some() {
        let mut storage = MockStorage::new();

        // An entry that exists holding `None` is distinct from an entry that
        // doesn't exist at all.
        const OPTIONAL: Item<Option<u32>> = Item::new("optional");

        assert!(!OPTIONAL.exists(&storage));

        OPTIONAL.save(&mut storage, &None).unwrap();

        assert!(OPTIONAL.exists(&storage));
    }

    #[test]
    fn removing_is_idempotent() {
        let mut storage = MockStorage::new();

        POLICY.save(&mut storage, &mock_policy()).unwrap();

        POLICY.remove(&mut storage);
        assert!(!POLICY.exists(&storage));

        POLICY.remove(&mut storage);
        assert!(!POLICY.exists(&storage));
    }

    #[test]
    fn modifying_in_place() {
        let mut storage = MockStorage::new();

        // The first modification finds nothing and writes the initial value.
        let output = POLICY
            .may_modify(&mut storage, |maybe| -> StdResult<_> {
                assert!(maybe.is_none());

                Ok(Some(mock_policy()))
            })
            .unwrap();

        assert_eq!(POLICY.may_load(&storage).unwrap(), output);

        // The second modification updates it.
        let output = POLICY
            .may_modify(&mut storage, |mut maybe| -> StdResult<_> {
                maybe.as_mut().unwrap().listing_fee *= 2;

                Ok(maybe)
            })
            .unwrap();

        assert_eq!(output.as_ref().unwrap().listing_fee, 50);
        assert_eq!(POLICY.load(&storage).unwrap().listing_fee, 50);

        // Returning `None` deletes it.
        let output = POLICY
            .may_modify(&mut storage, |_| -> StdResult<_> { Ok(None) })
            .unwrap();

        assert_eq!(output, None);
        assert_eq!(POLICY.may_load(&storage).unwrap(), None);
    }

    #[test]
    fn failed_modification_leaves_data_untouched() {
        let mut storage = MockStorage::new();

        POLICY.save(&mut storage, &mock_policy()).unwrap();

        let res = POLICY.may_modify(&mut storage, |_| -> StdResult<_> {
            Err(StdError::overflow_add(u128::MAX, 1))
        });

        assert!(matches!(res, Err(StdError::OverflowAdd { .. })));
        assert_eq!(POLICY.load(&storage).unwrap(), mock_policy());
    }

    #[test]
    fn modifying_with_a_custom_error_type() {
        #[derive(Debug)]
        enum MyError {
            #[allow(dead_code)]
            Std,
            FeeTooHigh,
        }

        impl From<StdError> for MyError {
            fn from(_: StdError) -> MyError {
                MyError::Std
            }
        }

        let mut storage = MockStorage::new();

        POLICY.save(&mut storage, &mock_policy()).unwrap();

        let res = POLICY.may_modify(&mut storage, |mut maybe| {
            if maybe.as_ref().unwrap().listing_fee > 20 {
                return Err(MyError::FeeTooHigh);
            }

            maybe.as_mut().unwrap().listing_fee += 20;

            Ok(maybe)
        });

        assert!(matches!(res, Err(MyError::FeeTooHigh)));
        assert_eq!(POLICY.load(&storage).unwrap(), mock_policy());
    }
}
