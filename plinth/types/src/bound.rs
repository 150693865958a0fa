/// Describes the limit of an iteration over a typed key space.
///
/// Compared to [`std::ops::Bound`], this is parameterized over the key type
/// rather than carrying it in each variant, and has no unbounded variant; an
/// unbounded iteration is expressed as `None::<Bound<K>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound<K> {
    Inclusive(K),
    Exclusive(K),
}
