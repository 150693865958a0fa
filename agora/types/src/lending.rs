mod events;
mod msgs;
mod types;

pub use {events::*, msgs::*, types::*};
