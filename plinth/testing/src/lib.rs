mod account;
mod balance_tracker;
mod builder;
mod suite;
mod tracing;

pub use crate::{account::*, balance_tracker::*, builder::*, suite::*, tracing::*};

// Re-export the contract builder, so that tests only need this one crate to
// set up a chain.
pub use plinth_app::{ContractBuilder, ContractWrapper};
