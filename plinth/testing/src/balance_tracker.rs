use {
    crate::TestSuite,
    plinth_types::{Addressable, Denom},
    std::cmp::Ordering,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    Increased(u128),
    Decreased(u128),
    Unchanged,
}

pub struct BalanceTracker<'a> {
    pub(crate) suite: &'a mut TestSuite,
}

impl BalanceTracker<'_> {
    /// Record the current balance of a list of accounts in the given denom.
    pub fn record_many<'b, I, A>(&mut self, accounts: I, denom: &Denom)
    where
        I: IntoIterator<Item = &'b A>,
        A: Addressable + 'b,
    {
        for account in accounts {
            self.record(account, denom);
        }
    }

    /// Record the current balance of a single account in the given denom.
    pub fn record<A>(&mut self, account: &A, denom: &Denom)
    where
        A: Addressable + ?Sized,
    {
        let address = account.address();
        let amount = self.suite.query_balance(&address, denom.clone()).unwrap();
        self.suite.balances.insert((address, denom.clone()), amount);
    }

    /// Re-query every tracked balance, overwriting the records.
    pub fn refresh_all(&mut self) {
        // Collect the keys up front; `query_balance` needs `&mut self.suite`.
        let keys: Vec<_> = self.suite.balances.keys().cloned().collect();
        for (address, denom) in keys {
            let amount = self.suite.query_balance(&address, denom.clone()).unwrap();
            self.suite.balances.insert((address, denom), amount);
        }
    }

    /// Forget every tracked balance.
    pub fn clear(&mut self) {
        self.suite.balances.clear();
    }

    /// Get the change in an account's balance of the given denom since it was
    /// last recorded.
    pub fn change<A>(&mut self, account: &A, denom: &Denom) -> BalanceChange
    where
        A: Addressable + ?Sized,
    {
        let address = account.address();
        let old_amount = *self
            .suite
            .balances
            .get(&(address, denom.clone()))
            .unwrap_or_else(|| {
                panic!("balance of {address} in {denom} was never recorded");
            });
        let new_amount = self.suite.query_balance(&address, denom.clone()).unwrap();

        match new_amount.cmp(&old_amount) {
            Ordering::Greater => BalanceChange::Increased(new_amount - old_amount),
            Ordering::Less => BalanceChange::Decreased(old_amount - new_amount),
            Ordering::Equal => BalanceChange::Unchanged,
        }
    }

    /// Assert the change in an account's balance of the given denom.
    pub fn should_change<A>(&mut self, account: &A, denom: &Denom, expected: BalanceChange)
    where
        A: Addressable + ?Sized,
    {
        let actual = self.change(account, denom);
        if expected != actual {
            panic!(
                "incorrect balance! account: {}, denom: {}, expected: {:?}, actual: {:?}",
                account.address(),
                denom,
                expected,
                actual
            );
        }
    }
}
