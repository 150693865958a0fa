use {
    borsh::{BorshDeserialize, BorshSerialize},
    plinth_types::{BorshDeExt, BorshSerExt, JsonDeExt, JsonSerExt, StdResult},
    serde::{de::DeserializeOwned, ser::Serialize},
};

/// How a container serializes its values into storage bytes.
///
/// State that is only ever touched by the contract itself is stored as Borsh
/// for compactness; state that outside tooling needs to read as raw bytes is
/// stored as JSON.
pub trait Codec<T> {
    fn encode(data: &T) -> StdResult<Vec<u8>>;

    fn decode(data: &[u8]) -> StdResult<T>;
}

// ----------------------------------- borsh -----------------------------------

pub struct Borsh;

impl<T> Codec<T> for Borsh
where
    T: BorshSerialize + BorshDeserialize,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        data.to_borsh_vec()
    }

    fn decode(data: &[u8]) -> StdResult<T> {
        data.deserialize_borsh()
    }
}

// -------------------------------- serde json ---------------------------------

pub struct Serde;

impl<T> Codec<T> for Serde
where
    T: Serialize + DeserializeOwned,
{
    fn encode(data: &T) -> StdResult<Vec<u8>> {
        data.to_json_vec()
    }

    fn decode(data: &[u8]) -> StdResult<T> {
        data.deserialize_json()
    }
}
