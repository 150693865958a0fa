use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display, Formatter},
        io,
        str::FromStr,
    },
};

/// The name of a token, e.g. `ueth` or `market/listing/fee`.
///
/// At most 128 characters, made of one or more parts joined by forward
/// slashes, where each part is a non-empty ASCII alphanumeric string.
/// `market//fee` (an empty part) and `market/&/fee` (a non-alphanumeric
/// character) are both rejected.
#[derive(BorshSerialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub const MAX_LENGTH: usize = 128;

    pub fn new<T>(s: T) -> StdResult<Self>
    where
        T: Into<String>,
    {
        let s = s.into();
        match Self::check(&s) {
            Ok(()) => Ok(Self(s)),
            Err(reason) => Err(StdError::invalid_denom(s, reason)),
        }
    }

    /// Create a denom without validating the string. Only use this when the
    /// input is statically known to be well formed.
    pub fn new_unchecked<T>(s: T) -> Self
    where
        T: Into<String>,
    {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn check(s: &str) -> Result<(), &'static str> {
        if !(1..=Self::MAX_LENGTH).contains(&s.len()) {
            return Err("too short or too long");
        }

        for part in s.split('/') {
            if part.is_empty() {
                return Err("empty part");
            }
            if part.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
                return Err("non-alphanumeric character");
            }
        }

        Ok(())
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Denom {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Denom {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Denom {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        Self::new(s)
    }
}

impl ser::Serialize for Denom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> de::Deserialize<'de> for Denom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        use de::Error;

        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl BorshDeserialize for Denom {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        <String as BorshDeserialize>::deserialize_reader(reader)?
            .try_into()
            .map_err(io::Error::other)
    }
}

// ----------------------------------- tests -----------------------------------
