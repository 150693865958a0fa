use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    sha2::{Digest, Sha256},
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
    },
};

/// The address identifying an account.
///
/// 20 bytes long, displayed in hex with the `0x` prefix.
///
/// Addresses are validated during deserialization, so an `Addr` found inside
/// a message is always well formed. There is no separate "unchecked" string
/// flavor to sanitize.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr([u8; Self::LENGTH]);

impl Addr {
    pub const LENGTH: usize = 20;

    /// Create a new address from a 20-byte array.
    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    pub const fn into_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Derive a contract address from the deployer address and a salt, as the
    /// first 20 bytes of `sha256(deployer | salt)`.
    ///
    /// Deterministic, so collaborating contracts can be wired to each other's
    /// addresses before they are actually instantiated.
    pub fn derive(deployer: Addr, salt: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(deployer.0);
        hasher.update(salt);
        let hash = hasher.finalize();

        let mut bytes = [0; Self::LENGTH];
        bytes.copy_from_slice(&hash[..Self::LENGTH]);
        Self(bytes)
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for Addr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<Addr> for &Addr {
    fn eq(&self, other: &Addr) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<&Addr> for Addr {
    fn eq(&self, other: &&Addr) -> bool {
        self.0 == other.0
    }
}

impl Display for Addr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for Addr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Addr({self})")
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let hex_str = s
            .strip_prefix("0x")
            .ok_or_else(|| StdError::deserialize::<Self, _>("hex", "missing `0x` prefix"))?;

        let bytes = hex::decode(hex_str)
            .map_err(|err| StdError::deserialize::<Self, _>("hex", err))?;

        let array = bytes.as_slice().try_into().map_err(|_| {
            StdError::deserialize::<Self, _>(
                "hex",
                format!("wrong length: expecting {}, found {}", Self::LENGTH, bytes.len()),
            )
        })?;

        Ok(Self(array))
    }
}

impl ser::Serialize for Addr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        use de::Error;

        <String as de::Deserialize>::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

/// Types from which an address can be taken. Lets test suite methods accept
/// either a plain `Addr` or a richer account type.
pub trait Addressable {
    fn address(&self) -> Addr;
}

impl Addressable for Addr {
    fn address(&self) -> Addr {
        *self
    }
}

impl<T> Addressable for &T
where
    T: Addressable,
{
    fn address(&self) -> Addr {
        (**self).address()
    }
}

// ----------------------------------- tests -----------------------------------
