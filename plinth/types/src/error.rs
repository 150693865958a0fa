use {std::any::type_name, std::convert::Infallible, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StdError {
    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    /// An error that happened in the host while serving a contract's request,
    /// passed back to the contract in stringified form.
    #[error("host error: {reason}")]
    Host { reason: String },

    #[error("data not found! type: {ty}, storage key: {key}")]
    DataNotFound { ty: &'static str, key: String },

    #[error("invalid denom `{denom}`: {reason}")]
    InvalidDenom { denom: String, reason: &'static str },

    #[error("invalid coins: {reason}")]
    InvalidCoins { reason: String },

    #[error("invalid payment: expecting {expect} coins, found {actual}")]
    InvalidPayment { expect: usize, actual: usize },

    #[error("addition overflow: {a} + {b}")]
    OverflowAdd { a: u128, b: u128 },

    #[error("subtraction overflow: {a} - {b}")]
    OverflowSub { a: u128, b: u128 },
}

impl StdError {
    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        T: ?Sized,
        R: ToString,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        T: ?Sized,
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn host<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::Host {
            reason: reason.to_string(),
        }
    }

    pub fn data_not_found<T>(key: &[u8]) -> Self {
        Self::DataNotFound {
            ty: type_name::<T>(),
            key: hex::encode(key),
        }
    }

    pub fn invalid_denom<D>(denom: D, reason: &'static str) -> Self
    where
        D: ToString,
    {
        Self::InvalidDenom {
            denom: denom.to_string(),
            reason,
        }
    }

    pub fn invalid_coins<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidCoins {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_payment(expect: usize, actual: usize) -> Self {
        Self::InvalidPayment { expect, actual }
    }

    pub fn overflow_add(a: u128, b: u128) -> Self {
        Self::OverflowAdd { a, b }
    }

    pub fn overflow_sub(a: u128, b: u128) -> Self {
        Self::OverflowSub { a, b }
    }
}

impl From<Infallible> for StdError {
    fn from(_: Infallible) -> Self {
        unreachable!("infallible conversion can't fail");
    }
}

pub type StdResult<T> = Result<T, StdError>;
