use {
    crate::{Json, JsonSerExt, StdResult},
    serde::{Deserialize, Serialize},
};

/// An event emitted by a contract during a transaction, describing one thing
/// that happened. The consuming layer reads these to react to state changes
/// without re-querying everything.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractEvent {
    #[serde(rename = "type")]
    pub ty: String,
    pub data: Json,
}

impl ContractEvent {
    pub fn new<T>(ty: &str, data: &T) -> StdResult<Self>
    where
        T: Serialize,
    {
        Ok(Self {
            ty: ty.to_string(),
            data: data.to_json_value()?,
        })
    }
}

/// Implemented by typed event structs; associates the struct with the name
/// under which it is emitted. Generated by the `#[plinth::event]` macro.
pub trait EventName {
    const EVENT_NAME: &'static str;
}
