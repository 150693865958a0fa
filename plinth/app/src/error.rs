use {plinth_types::{Addr, StdError}, thiserror::Error};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("contract returned error! address: {address}, method: {name}, msg: {msg}")]
    Guest {
        address: Addr,
        name: &'static str,
        msg: String,
    },

    #[error("contract with index `{index}` not found")]
    ContractNotFound { index: usize },

    #[error("contract with address `{address}` already exists")]
    ContractExists { address: Addr },

    #[error("contract does not implement function `{name}`")]
    FunctionNotFound { name: &'static str },

    #[error("wrong block height! expecting {expect}, got {actual}")]
    IncorrectBlockHeight { expect: u64, actual: u64 },

    #[error("max message depth exceeded")]
    ExceedMaxMessageDepth,
}

impl AppError {
    pub fn guest(address: Addr, name: &'static str, msg: String) -> Self {
        Self::Guest { address, name, msg }
    }

    pub const fn contract_not_found(index: usize) -> Self {
        Self::ContractNotFound { index }
    }

    pub const fn contract_exists(address: Addr) -> Self {
        Self::ContractExists { address }
    }

    pub const fn function_not_found(name: &'static str) -> Self {
        Self::FunctionNotFound { name }
    }
}

pub type AppResult<T> = core::result::Result<T, AppError>;
