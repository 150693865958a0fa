use {
    crate::nest_storage_keys,
    plinth_types::{Addr, Denom, StdError, StdResult},
    std::{borrow::Cow, mem},
};

/// One raw component of a storage key, borrowed from the typed key where
/// possible.
pub type RawKey<'a> = Cow<'a, [u8]>;

// ----------------------------------- trait -----------------------------------

/// A value that can serve as a key in [`Map`](crate::Map) and
/// [`Set`](crate::Set).
///
/// Keys encode to raw bytes directly instead of going through `serde`, as the
/// encoding must be compact and must sort the same way the keys themselves do.
/// Compound keys additionally split into a [`Prefix`](PrimaryKey::Prefix) and
/// a [`Suffix`](PrimaryKey::Suffix), which is what makes prefix iteration
/// work.
pub trait PrimaryKey {
    /// How many single keys this key consists of: `1` for plain keys, the sum
    /// over the components for tuple keys.
    ///
    /// Decoding needs this number. The serialized form of a nested tuple such
    /// as `((A, B), (C, D))` is:
    ///
    /// ```plain
    /// len(A) | A | len(B) | B | len(C) | C | D
    /// ```
    ///
    /// which, on its own, could equally be read back as `((A, B, C), D)`.
    /// Only by knowing how many elements go into each component can the bytes
    /// be split at the right places.
    const KEY_ELEMS: u8;

    /// The leading component of a tuple key. Fixing a value for it narrows an
    /// iteration down to the keys that share the value.
    ///
    /// `()` for plain keys.
    type Prefix: Prefixer;

    /// Whatever remains of a tuple key once the
    /// [`Prefix`](PrimaryKey::Prefix) is removed.
    ///
    /// `()` for plain keys.
    type Suffix;

    /// The owned type that keys decode into. Borrowed key types decode into
    /// their owned counterparts, e.g. `&str` into `String`.
    type Output;

    /// The key broken up into its single keys, each one a byte slice.
    fn raw_keys(&self) -> Vec<RawKey>;

    /// Encode the key into a single byte vector.
    ///
    /// Every raw key except the last is prefixed by its length as a 16-bit
    /// big endian integer. The last one needs no length, as it runs to the
    /// end of the bytes.
    fn joined_key(&self) -> Vec<u8> {
        let mut raw_keys = self.raw_keys();
        let last = raw_keys.pop();

        nest_storage_keys(None, &raw_keys, last)
    }

    /// Decode a key from the bytes that
    /// [`joined_key`](PrimaryKey::joined_key) produced.
    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output>;
}

/// The counterpart of [`PrimaryKey`] for the leading components of tuple
/// keys. Encoding works the same way, except every raw prefix keeps its
/// length prefix, as more key material always follows.
pub trait Prefixer {
    fn raw_prefixes(&self) -> Vec<RawKey>;

    fn joined_prefix(&self) -> Vec<u8> {
        nest_storage_keys(None, &self.raw_prefixes(), None)
    }
}

// -------------------------------- plain keys ---------------------------------

impl PrimaryKey for () {
    type Output = ();
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        if bytes.is_empty() {
            Ok(())
        } else {
            Err(StdError::deserialize::<Self::Output, _>(
                "key",
                "expecting empty bytes",
            ))
        }
    }
}

impl Prefixer for () {
    fn raw_prefixes(&self) -> Vec<RawKey> {
        vec![]
    }
}

macro_rules! impl_bytes_key {
    ($($t:ty),+ $(,)?) => {
        $(impl PrimaryKey for $t {
            type Output = Vec<u8>;
            type Prefix = ();
            type Suffix = ();

            const KEY_ELEMS: u8 = 1;

            fn raw_keys(&self) -> Vec<RawKey> {
                vec![RawKey::Borrowed(self)]
            }

            fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
                Ok(bytes.to_vec())
            }
        }

        impl Prefixer for $t {
            fn raw_prefixes(&self) -> Vec<RawKey> {
                vec![RawKey::Borrowed(self)]
            }
        })*
    };
}

impl_bytes_key!(&[u8], Vec<u8>);

macro_rules! impl_string_key {
    ($($t:ty),+ $(,)?) => {
        $(impl PrimaryKey for $t {
            type Output = String;
            type Prefix = ();
            type Suffix = ();

            const KEY_ELEMS: u8 = 1;

            fn raw_keys(&self) -> Vec<RawKey> {
                vec![RawKey::Borrowed(self.as_bytes())]
            }

            fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
                decode_utf8::<Self::Output>(bytes)
            }
        }

        impl Prefixer for $t {
            fn raw_prefixes(&self) -> Vec<RawKey> {
                vec![RawKey::Borrowed(self.as_bytes())]
            }
        })*
    };
}

impl_string_key!(&str, String);

// Big endian encoding keeps numeric keys sorted by value.
macro_rules! impl_number_key {
    ($($t:ty),+ $(,)?) => {
        $(impl PrimaryKey for $t {
            type Output = $t;
            type Prefix = ();
            type Suffix = ();

            const KEY_ELEMS: u8 = 1;

            fn raw_keys(&self) -> Vec<RawKey> {
                vec![RawKey::Owned(self.to_be_bytes().to_vec())]
            }

            fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
                decode_fixed::<$t, { mem::size_of::<$t>() }>(bytes).map(<$t>::from_be_bytes)
            }
        }

        impl Prefixer for $t {
            fn raw_prefixes(&self) -> Vec<RawKey> {
                vec![RawKey::Owned(self.to_be_bytes().to_vec())]
            }
        })*
    };
}

impl_number_key!(u8, u16, u32, u64, u128);

impl PrimaryKey for Addr {
    type Output = Addr;
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![RawKey::Borrowed(self.as_ref())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        decode_fixed::<Addr, { Addr::LENGTH }>(bytes).map(Addr::from_array)
    }
}

impl Prefixer for Addr {
    fn raw_prefixes(&self) -> Vec<RawKey> {
        vec![RawKey::Borrowed(self.as_ref())]
    }
}

impl PrimaryKey for Denom {
    type Output = Denom;
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![RawKey::Owned(self.to_string().into_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        decode_utf8::<Self::Output>(bytes).and_then(Denom::try_from)
    }
}

impl Prefixer for Denom {
    fn raw_prefixes(&self) -> Vec<RawKey> {
        vec![RawKey::Owned(self.to_string().into_bytes())]
    }
}

// ------------------------------- compound keys -------------------------------

impl<K> PrimaryKey for &K
where
    K: PrimaryKey,
{
    type Output = K::Output;
    type Prefix = K::Prefix;
    type Suffix = K::Suffix;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        (*self).raw_keys()
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        K::from_slice(bytes)
    }
}

impl<P> Prefixer for &P
where
    P: Prefixer,
{
    fn raw_prefixes(&self) -> Vec<RawKey> {
        (*self).raw_prefixes()
    }
}

impl<A, B> PrimaryKey for (A, B)
where
    A: PrimaryKey + Prefixer,
    B: PrimaryKey,
{
    type Output = (A::Output, B::Output);
    type Prefix = A;
    type Suffix = B;

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<RawKey> {
        let mut keys = self.0.raw_keys();
        keys.extend(self.1.raw_keys());
        keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let (a_raw, b_raw) = split_first_key(A::KEY_ELEMS, bytes);

        Ok((A::from_slice(&a_raw)?, B::from_slice(b_raw)?))
    }
}

impl<A, B> Prefixer for (A, B)
where
    A: Prefixer,
    B: Prefixer,
{
    fn raw_prefixes(&self) -> Vec<RawKey> {
        let mut prefixes = self.0.raw_prefixes();
        prefixes.extend(self.1.raw_prefixes());
        prefixes
    }
}

impl<A, B, C> PrimaryKey for (A, B, C)
where
    A: PrimaryKey + Prefixer,
    B: PrimaryKey,
    C: PrimaryKey,
{
    type Output = (A::Output, B::Output, C::Output);
    // The split is `A` against `(B, C)`: fix the first element, iterate the
    // remaining two.
    type Prefix = A;
    type Suffix = (B, C);

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS + C::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<RawKey> {
        let mut keys = self.0.raw_keys();
        keys.extend(self.1.raw_keys());
        keys.extend(self.2.raw_keys());
        keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let (a_raw, bc_raw) = split_first_key(A::KEY_ELEMS, bytes);
        let (b_raw, c_raw) = split_first_key(B::KEY_ELEMS, bc_raw);

        Ok((
            A::from_slice(&a_raw)?,
            B::from_slice(&b_raw)?,
            C::from_slice(c_raw)?,
        ))
    }
}

// --------------------------------- helpers -----------------------------------

/// Take the serialized form of a tuple key and split off its first component,
/// which itself spans `key_elems` single keys.
///
/// The component comes back in the same layout `joined_key` would have given
/// it, with every element length-prefixed except the last. E.g. splitting the
/// first component off `((A, B), C)`, serialized as
///
/// ```plain
/// len(A) | A | len(B) | B | C
/// ```
///
/// returns `len(A) | A | B` together with the remainder `C`.
pub fn split_first_key(key_elems: u8, bytes: &[u8]) -> (Vec<u8>, &[u8]) {
    let mut first_key = Vec::new();
    let mut remainder = bytes;

    for elem in 0..key_elems {
        let (len_raw, rest) = remainder.split_at(2);
        let len = u16::from_be_bytes([len_raw[0], len_raw[1]]) as usize;

        // The last element sheds its length prefix, matching the layout that
        // `joined_key` produces.
        if elem < key_elems - 1 {
            first_key.extend_from_slice(len_raw);
        }

        first_key.extend_from_slice(&rest[..len]);
        remainder = &rest[len..];
    }

    (first_key, remainder)
}

fn decode_utf8<T>(bytes: &[u8]) -> StdResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| StdError::deserialize::<T, _>("key", err))
}

fn decode_fixed<T, const N: usize>(bytes: &[u8]) -> StdResult<[u8; N]> {
    bytes.try_into().map_err(|_| {
        StdError::deserialize::<T, _>(
            "key",
            format!("wrong number of bytes: expecting {}, got {}", N, bytes.len()),
        )
    })
}

// ----------------------------------- tests -----------------------------------
