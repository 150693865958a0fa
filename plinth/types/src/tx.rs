use {
    crate::{Addr, Coins, Json, JsonSerExt, StdError, StdResult},
    serde::ser::Serialize,
};

/// A transaction: one or more messages executed atomically on behalf of a
/// sender. Either all messages succeed and their effects are committed
/// together, or the whole transaction is rejected with no effect.
#[derive(Debug, Clone)]
pub struct Tx {
    pub sender: Addr,
    pub msgs: Vec<Message>,
}

/// A message processed by the app, either at the top level of a transaction
/// or emitted by a contract as a submessage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Send coins from the message sender to the recipient.
    Transfer { to: Addr, coins: Coins },
    /// Call a contract's `execute` entry point, optionally attaching funds,
    /// which are transferred to the contract before it runs.
    Execute {
        contract: Addr,
        msg: Json,
        funds: Coins,
    },
}

impl Message {
    pub fn transfer<C>(to: Addr, coins: C) -> StdResult<Self>
    where
        C: TryInto<Coins>,
        StdError: From<C::Error>,
    {
        let coins = coins.try_into()?;
        if coins.is_empty() {
            return Err(StdError::invalid_payment(1, 0));
        }
        Ok(Self::Transfer { to, coins })
    }

    pub fn execute<M, C>(contract: Addr, msg: &M, funds: C) -> StdResult<Self>
    where
        M: Serialize,
        C: TryInto<Coins>,
        StdError: From<C::Error>,
    {
        Ok(Self::Execute {
            contract,
            msg: msg.to_json_value()?,
            funds: funds.try_into()?,
        })
    }
}
