mod execute;
mod query;
mod state;

pub use {execute::*, query::*, state::*};
