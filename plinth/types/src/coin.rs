use {
    crate::{Denom, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser, Deserialize, Serialize},
    std::{
        collections::{btree_map, BTreeMap},
        fmt::{self, Display, Formatter},
        io, iter,
    },
};

/// A coin: a denomination and an amount, in the smallest indivisible unit of
/// that denomination.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: Denom,
    pub amount: u128,
}

impl Coin {
    pub fn new<D>(denom: D, amount: u128) -> StdResult<Self>
    where
        D: TryInto<Denom>,
        StdError: From<D::Error>,
    {
        Ok(Self {
            denom: denom.try_into()?,
            amount,
        })
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.denom, self.amount)
    }
}

/// A sorted collection of coins, with at most one entry per denom.
///
/// Invariant: no entry has a zero amount. An address holding zero of a denom
/// is represented by the absence of the entry.
#[derive(BorshSerialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Coins(BTreeMap<Denom, u128>);

impl Coins {
    /// Create a new, empty coin collection.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a coin collection holding a single coin.
    pub fn one<D>(denom: D, amount: u128) -> StdResult<Self>
    where
        D: TryInto<Denom>,
        StdError: From<D::Error>,
    {
        if amount == 0 {
            return Err(StdError::invalid_coins("amount must be non-zero"));
        }

        let mut map = BTreeMap::new();
        map.insert(denom.try_into()?, amount);
        Ok(Self(map))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The amount held in the given denom; zero if the denom is absent.
    pub fn amount_of(&self, denom: &Denom) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    /// Add a coin, merging with the existing entry of the same denom if there
    /// is one. Adding a zero amount is a no-op.
    pub fn insert(&mut self, coin: Coin) -> StdResult<&mut Self> {
        if coin.amount == 0 {
            return Ok(self);
        }

        match self.0.entry(coin.denom) {
            btree_map::Entry::Occupied(mut entry) => {
                let sum = entry
                    .get()
                    .checked_add(coin.amount)
                    .ok_or_else(|| StdError::overflow_add(*entry.get(), coin.amount))?;
                *entry.get_mut() = sum;
            },
            btree_map::Entry::Vacant(entry) => {
                entry.insert(coin.amount);
            },
        }

        Ok(self)
    }

    /// Expect the collection to hold exactly one coin, and return it.
    pub fn into_one_coin(self) -> StdResult<Coin> {
        let len = self.0.len();
        let mut iter = self.0.into_iter();
        match (iter.next(), iter.next()) {
            (Some((denom, amount)), None) => Ok(Coin { denom, amount }),
            _ => Err(StdError::invalid_payment(1, len)),
        }
    }

    /// Expect the collection to hold nothing but the given denom (possibly
    /// nothing at all), and return the amount held.
    pub fn into_one_coin_of_denom(self, denom: &Denom) -> StdResult<u128> {
        let len = self.0.len();
        let mut iter = self.0.into_iter();
        match (iter.next(), iter.next()) {
            (None, _) => Ok(0),
            (Some((d, amount)), None) if d == *denom => Ok(amount),
            _ => Err(StdError::invalid_payment(1, len)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0.iter().map(|(denom, amount)| Coin {
            denom: denom.clone(),
            amount: *amount,
        })
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        let mut map = BTreeMap::new();
        if coin.amount != 0 {
            map.insert(coin.denom, coin.amount);
        }
        Self(map)
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = StdError;

    fn try_from(coins: Vec<Coin>) -> StdResult<Self> {
        let mut out = Self::new();
        for coin in coins {
            out.insert(coin)?;
        }
        Ok(out)
    }
}

impl IntoIterator for Coins {
    type IntoIter = iter::Map<btree_map::IntoIter<Denom, u128>, fn((Denom, u128)) -> Coin>;
    type Item = Coin;

    fn into_iter(self) -> Self::IntoIter {
        let make: fn((Denom, u128)) -> Coin = |(denom, amount)| Coin { denom, amount };
        self.0.into_iter().map(make)
    }
}

impl Display for Coins {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(denom, amount)| format!("{denom}:{amount}"))
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

impl ser::Serialize for Coins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        ser::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> de::Deserialize<'de> for Coins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        use de::Error;

        let map = <BTreeMap<Denom, u128> as de::Deserialize>::deserialize(deserializer)?;
        if map.values().any(|amount| *amount == 0) {
            return Err(D::Error::custom("coin amount must be non-zero"));
        }
        Ok(Self(map))
    }
}

impl BorshDeserialize for Coins {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let map = <BTreeMap<Denom, u128> as BorshDeserialize>::deserialize_reader(reader)?;
        if map.values().any(|amount| *amount == 0) {
            return Err(io::Error::other("coin amount must be non-zero"));
        }
        Ok(Self(map))
    }
}

// ----------------------------------- tests -----------------------------------
