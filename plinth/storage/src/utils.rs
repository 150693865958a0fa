use {crate::RawKey, plinth_types::encode_length};

/// Join an optional namespace, a run of prefixes, and an optional final key
/// into one storage key.
///
/// Every component except the final key carries a 2-byte big-endian length
/// prefix, so component boundaries survive the concatenation:
///
/// ```plain
/// len(namespace) | namespace | len(p1) | p1 | ... | len(pN) | pN | key
/// ```
///
/// Panics if any component is longer than `u16::MAX` bytes.
pub fn nest_storage_keys(
    maybe_namespace: Option<&[u8]>,
    prefixes: &[RawKey],
    maybe_key: Option<RawKey>,
) -> Vec<u8> {
    let size = maybe_namespace.map_or(0, |ns| ns.len() + 2)
        + prefixes.iter().map(|p| p.as_ref().len() + 2).sum::<usize>()
        + maybe_key.as_ref().map_or(0, |k| k.as_ref().len());

    let mut out = Vec::with_capacity(size);

    if let Some(namespace) = maybe_namespace {
        out.extend_from_slice(&encode_length(namespace));
        out.extend_from_slice(namespace);
    }

    for prefix in prefixes {
        out.extend_from_slice(&encode_length(prefix));
        out.extend_from_slice(prefix.as_ref());
    }

    if let Some(key) = maybe_key {
        out.extend_from_slice(key.as_ref());
    }

    out
}
