pub mod lending;
pub mod market;
