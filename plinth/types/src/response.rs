use crate::{ContractEvent, Message, StdError, StdResult};

/// The result of a successful contract call: messages for the host to
/// dispatch after this call returns (within the same transaction), and events
/// describing what happened.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub submsgs: Vec<Message>,
    pub events: Vec<ContractEvent>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(mut self, msg: Message) -> Self {
        self.submsgs.push(msg);
        self
    }

    pub fn may_add_message(self, maybe_msg: Option<Message>) -> Self {
        match maybe_msg {
            Some(msg) => self.add_message(msg),
            None => self,
        }
    }

    pub fn add_event<E>(mut self, event: E) -> StdResult<Self>
    where
        E: TryInto<ContractEvent, Error = StdError>,
    {
        self.events.push(event.try_into()?);
        Ok(self)
    }
}
