use std::ops::Bound;

/// The length of a byte slice, encoded as two big endian bytes.
///
/// Panics if the slice is longer than `u16::MAX` bytes.
#[doc(hidden)]
pub fn encode_length<B>(bytes: B) -> [u8; 2]
where
    B: AsRef<[u8]>,
{
    let len = bytes.as_ref().len();
    assert!(
        len <= u16::MAX as usize,
        "can't encode length because byte slice is too long: {len} > {}",
        u16::MAX
    );

    (len as u16).to_be_bytes()
}

// Undefined when every input byte is 255. In practice the input is a
// length-prefixed namespace, so for the bytes to be entirely 255 the namespace
// must be 65535 bytes long, which `encode_length` already rules out.
#[doc(hidden)]
pub fn increment_last_byte(mut bytes: Vec<u8>) -> Vec<u8> {
    debug_assert!(
        bytes.iter().any(|byte| *byte != u8::MAX),
        "bytes are entirely 255"
    );

    for byte in bytes.iter_mut().rev() {
        if let Some(incremented) = byte.checked_add(1) {
            *byte = incremented;
            break;
        }

        *byte = 0;
    }

    bytes
}

/// Append a zero byte. This produces the smallest byte vector that is
/// strictly greater than the input, which is how an inclusive bound becomes
/// an exclusive one and vice versa.
#[doc(hidden)]
pub fn extend_one_byte(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.push(0);
    bytes
}

/// The two byte slices joined end to end in a new vector.
#[doc(hidden)]
pub fn concat(namespace: &[u8], key: &[u8]) -> Vec<u8> {
    [namespace, key].concat()
}

/// Strip the namespace off the front of a key, returning the rest. Undoes
/// [`concat`].
///
/// The caller must make sure the key actually starts with the namespace;
/// this is only checked in debug mode.
#[doc(hidden)]
pub fn trim(namespace: &[u8], key: &[u8]) -> Vec<u8> {
    debug_assert!(
        key.starts_with(namespace),
        "key doesn't start with the given namespace"
    );

    key[namespace.len()..].to_vec()
}

/// Convert the raw min/max bounds used by [`Storage::scan`](crate::Storage::scan)
/// (min inclusive, max exclusive) into bounds accepted by `BTreeMap::range`.
#[doc(hidden)]
pub fn range_bounds(
    min: Option<&[u8]>,
    max: Option<&[u8]>,
) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let lower = min.map_or(Bound::Unbounded, |min| Bound::Included(min.to_vec()));
    let upper = max.map_or(Bound::Unbounded, |max| Bound::Excluded(max.to_vec()));

    (lower, upper)
}
