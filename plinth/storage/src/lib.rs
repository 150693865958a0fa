mod codec;
mod counter;
mod item;
mod key;
mod map;
mod path;
mod prefix;
mod set;
mod utils;

pub use {
    codec::*, counter::*, item::*, key::*, map::*, path::*, prefix::*, set::*, utils::*,
};
