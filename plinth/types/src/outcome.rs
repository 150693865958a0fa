use {
    crate::{ContractEvent, EventName, JsonDeExt, StdResult},
    serde::de::DeserializeOwned,
    std::fmt::{self, Display, Formatter},
};

/// What running a transaction produced.
///
/// Check the result with [`ResultExt::should_succeed`](crate::ResultExt) and
/// friends in tests, or inspect `result` directly in application code.
#[derive(Debug)]
#[must_use = "the result of a transaction must be checked"]
pub struct TxOutcome {
    pub result: Result<(), String>,
    pub events: Vec<ContractEvent>,
}

/// A transaction outcome that has been asserted successful.
#[derive(Debug)]
pub struct TxSuccess {
    pub events: Vec<ContractEvent>,
}

/// A transaction outcome that has been asserted failed.
#[derive(Debug)]
pub struct TxError {
    pub error: String,
    pub events: Vec<ContractEvent>,
}

impl Display for TxError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.error)
    }
}

impl TxSuccess {
    /// Collect and decode all emitted events of the given type, in emission
    /// order.
    pub fn search_event<E>(&self) -> StdResult<Vec<E>>
    where
        E: EventName + DeserializeOwned,
    {
        self.events
            .iter()
            .filter(|event| event.ty == E::EVENT_NAME)
            .map(|event| event.data.clone().deserialize_json())
            .collect()
    }
}
