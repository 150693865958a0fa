use {
    plinth_storage::Map,
    plinth_types::{Addr, Coins, Denom, StdError, StdResult, Storage},
};

pub(crate) const BALANCES: Map<(Addr, &Denom), u128> = Map::new("b");

/// Write the genesis balances to the store. Called once, during chain
/// initialization.
pub(crate) fn initialize<B>(storage: &mut dyn Storage, initial_balances: B) -> StdResult<()>
where
    B: IntoIterator<Item = (Addr, Coins)>,
{
    for (address, coins) in initial_balances {
        for coin in coins.iter() {
            BALANCES.save(storage, (address, &coin.denom), &coin.amount)?;
        }
    }

    Ok(())
}

/// Move tokens from one account to another.
pub(crate) fn transfer_coins(
    storage: &mut dyn Storage,
    from: Addr,
    to: Addr,
    coins: &Coins,
) -> StdResult<()> {
    for coin in coins.iter() {
        decrease_balance(storage, from, &coin.denom, coin.amount)?;
        increase_balance(storage, to, &coin.denom, coin.amount)?;
    }

    Ok(())
}

/// Add to an account's balance of one token, returning the new value.
fn increase_balance(
    storage: &mut dyn Storage,
    address: Addr,
    denom: &Denom,
    amount: u128,
) -> StdResult<Option<u128>> {
    BALANCES.may_modify(storage, (address, denom), |balance| {
        let balance = balance.unwrap_or_default();
        let balance = balance
            .checked_add(amount)
            .ok_or_else(|| StdError::overflow_add(balance, amount))?;
        // A zero balance is represented by the absence of a record.
        if balance == 0 {
            Ok(None)
        } else {
            Ok(Some(balance))
        }
    })
}

/// Subtract from an account's balance of one token, returning the new value.
///
/// Errors if the account holds less than the amount; this is what makes a
/// transfer of more than the sender owns fail.
fn decrease_balance(
    storage: &mut dyn Storage,
    address: Addr,
    denom: &Denom,
    amount: u128,
) -> StdResult<Option<u128>> {
    BALANCES.may_modify(storage, (address, denom), |balance| {
        let balance = balance.unwrap_or_default();
        let balance = balance
            .checked_sub(amount)
            .ok_or_else(|| StdError::overflow_sub(balance, amount))?;
        // A zero balance is represented by the absence of a record.
        if balance == 0 {
            Ok(None)
        } else {
            Ok(Some(balance))
        }
    })
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, plinth_types::MockStorage, std::str::FromStr};

    fn mock_denom() -> Denom {
        Denom::from_str("ugold").unwrap()
    }

    #[test]
    fn transferring() {
        let mut storage = MockStorage::new();
        let denom = mock_denom();

        initialize(&mut storage, [(
            Addr::mock(1),
            Coins::one(denom.clone(), 100).unwrap(),
        )])
        .unwrap();

        transfer_coins(
            &mut storage,
            Addr::mock(1),
            Addr::mock(2),
            &Coins::one(denom.clone(), 30).unwrap(),
        )
        .unwrap();

        assert_eq!(
            BALANCES
                .load(&storage, (Addr::mock(1), &denom))
                .unwrap(),
            70
        );
        assert_eq!(
            BALANCES
                .load(&storage, (Addr::mock(2), &denom))
                .unwrap(),
            30
        );
    }

    #[test]
    fn transferring_more_than_owned() {
        let mut storage = MockStorage::new();
        let denom = mock_denom();

        initialize(&mut storage, [(
            Addr::mock(1),
            Coins::one(denom.clone(), 100).unwrap(),
        )])
        .unwrap();

        let err = transfer_coins(
            &mut storage,
            Addr::mock(1),
            Addr::mock(2),
            &Coins::one(denom.clone(), 101).unwrap(),
        )
        .unwrap_err();

        assert_eq!(err, StdError::overflow_sub(100, 101));
    }

    #[test]
    fn emptied_balance_is_deleted() {
        let mut storage = MockStorage::new();
        let denom = mock_denom();

        initialize(&mut storage, [(
            Addr::mock(1),
            Coins::one(denom.clone(), 100).unwrap(),
        )])
        .unwrap();

        transfer_coins(
            &mut storage,
            Addr::mock(1),
            Addr::mock(2),
            &Coins::one(denom.clone(), 100).unwrap(),
        )
        .unwrap();

        assert!(!BALANCES.has(&storage, (Addr::mock(1), &denom)));
    }
}
