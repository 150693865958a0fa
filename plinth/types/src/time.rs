use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::ops::{Add, Sub},
};

const NANOS_PER_MILLI: u128 = 1_000_000;
const MILLIS_PER_SECOND: u128 = 1_000;

/// A point in time, measured as nanoseconds since the UNIX epoch.
///
/// Equivalently, the duration that has elapsed since the epoch, hence the
/// alias.
pub type Timestamp = Duration;

/// A length of time, counted in whole nanoseconds.
///
/// [`std::time::Duration`] won't do here: it lacks the Borsh traits, and its
/// JSON form is a struct where a plain number is wanted.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
pub struct Duration(u128);

impl Duration {
    pub const fn from_nanos(nanos: u128) -> Self {
        Self(nanos)
    }

    pub const fn from_millis(millis: u128) -> Self {
        Self::from_nanos(millis * NANOS_PER_MILLI)
    }

    pub const fn from_seconds(seconds: u128) -> Self {
        Self::from_millis(seconds * MILLIS_PER_SECOND)
    }

    pub const fn into_nanos(self) -> u128 {
        self.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

// ----------------------------------- tests -----------------------------------
