mod app;
mod balance;
mod contract;
mod error;
mod execute;
mod providers;
mod query;
mod shared;
mod submessage;
#[rustfmt::skip]
mod traits;

pub use crate::{
    app::*, contract::*, error::*, execute::*, providers::*, query::*, shared::*, submessage::*,
    traits::*,
};
