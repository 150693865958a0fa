mod address;
mod bound;
mod buffer;
mod builder;
mod coin;
mod context;
mod denom;
mod empty;
mod encoding;
mod error;
mod event;
mod outcome;
mod querier;
mod response;
mod result;
mod storage;
mod time;
mod tx;
mod utils;

pub use {
    address::*, bound::*, buffer::*, builder::*, coin::*, context::*, denom::*, empty::*,
    encoding::*, error::*, event::*, outcome::*, querier::*, response::*, result::*, storage::*,
    time::*, tx::*, utils::*,
};

// ---------------------------------- testing ----------------------------------

mod testing;

pub use testing::*;

// -------------------------------- re-exports ---------------------------------

pub use serde_json::{json, Value as Json};
