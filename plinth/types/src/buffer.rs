use {
    crate::{Batch, Op, Order, Record, Storage},
    std::{
        cmp::Ordering,
        iter::{self, Peekable},
        ops::Bound,
    },
};

/// Wraps a store so that writes collect in memory instead of hitting it.
///
/// Writes and removals go into the buffer instead of the underlying store,
/// while reads and scans reflect the buffered ops as if they had been
/// applied. The buffer can later be committed to the underlying store in one
/// go, or discarded by simply dropping it. This is what gives transactions
/// their all-or-nothing semantics.
#[derive(Clone)]
pub struct Buffer<S> {
    base: S,
    pending: Batch,
}

impl<S> Buffer<S> {
    /// Wrap a store, optionally seeding the buffer with an existing batch of
    /// pending ops.
    pub fn new(base: S, pending: Option<Batch>) -> Self {
        Self {
            base,
            pending: pending.unwrap_or_default(),
        }
    }

    /// Return the underlying store and the pending ops without flushing.
    pub fn disassemble(self) -> (S, Batch) {
        (self.base, self.pending)
    }
}

impl<S> Buffer<S>
where
    S: Storage,
{
    /// Flush the pending ops into the underlying store and return it.
    pub fn consume(mut self) -> S {
        self.base.flush(self.pending);
        self.base
    }
}

impl<S> Storage for Buffer<S>
where
    S: Storage + Clone,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(Op::Insert(value)) => Some(value.clone()),
            Some(Op::Delete) => None,
            None => self.base.read(key),
        }
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        // `BTreeMap::range` panics on an inverted range; the base store just
        // yields nothing. Settle the inversion here so both sides agree.
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Box::new(iter::empty());
            }
        }

        let base = self.base.scan(min, max, order);

        let bounds = (
            min.map_or(Bound::Unbounded, |bytes| Bound::Included(bytes.to_vec())),
            max.map_or(Bound::Unbounded, |bytes| Bound::Excluded(bytes.to_vec())),
        );
        let pending: Box<dyn Iterator<Item = _>> = match order {
            Order::Ascending => Box::new(self.pending.range(bounds)),
            Order::Descending => Box::new(self.pending.range(bounds).rev()),
        };

        Box::new(Overlay {
            base: base.peekable(),
            pending: pending.peekable(),
            order,
        })
    }

    fn scan_keys<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(k, _)| k))
    }

    fn scan_values<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Vec<u8>> + 'a> {
        Box::new(self.scan(min, max, order).map(|(_, v)| v))
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.pending
            .insert(key.to_vec(), Op::Insert(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), Op::Delete);
    }

    fn remove_range(&mut self, min: Option<&[u8]>, max: Option<&[u8]>) {
        // Mark every key in the range, whether it lives in the base or the
        // buffer, as deleted. The scan borrows `self` immutably, so collect
        // before extending the buffer.
        let deletes = self
            .scan_keys(min, max, Order::Ascending)
            .map(|key| (key, Op::Delete))
            .collect::<Vec<_>>();

        self.pending.extend(deletes);
    }

    fn flush(&mut self, batch: Batch) {
        // On key collisions, `extend` keeps the incoming value, which is the
        // newer one.
        self.pending.extend(batch);
    }
}

/// Merges a scan of the base store with the pending ops covering the same
/// range. On equal keys the pending op wins; pending deletions drop out of
/// the output entirely.
struct Overlay<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    base: Peekable<B>,
    pending: Peekable<P>,
    order: Order,
}

impl<'a, B, P> Overlay<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    /// Consume the front pending op. An insertion yields a record; a deletion
    /// yields nothing.
    fn apply_pending(&mut self) -> Option<Record> {
        match self.pending.next()? {
            (key, Op::Insert(value)) => Some((key.clone(), value.clone())),
            (_, Op::Delete) => None,
        }
    }
}

impl<'a, B, P> Iterator for Overlay<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let in_front = match (self.base.peek(), self.pending.peek()) {
                (Some((base_key, _)), Some((pending_key, _))) => match self.order {
                    Order::Ascending => base_key.cmp(pending_key),
                    Order::Descending => pending_key.cmp(&base_key),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => return None,
            };

            match in_front {
                // The base record comes first, yield it as is.
                Ordering::Less => return self.base.next(),
                // The same key exists on both sides; the pending op shadows
                // the base record.
                Ordering::Equal => {
                    self.base.next();
                    if let Some(record) = self.apply_pending() {
                        return Some(record);
                    }
                },
                // The pending op comes first. A deletion yields no record,
                // in which case keep going.
                Ordering::Greater => {
                    if let Some(record) = self.apply_pending() {
                        return Some(record);
                    }
                },
            }
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::MockStorage};

    // The base holds five records; the buffer deletes one, overwrites one,
    // and inserts two, one of them past the end of the base:
    //
    // base    : 10     20     30     40     50
    // buffer  :        del    =>99          del    35:35  60:60
    // merged  : 10            99     40            35     60 (in key order)
    fn storage_with_overlay() -> (Buffer<MockStorage>, Vec<Record>) {
        let mut base = MockStorage::new();
        for key in [10, 20, 30, 40, 50] {
            base.write(&[key], &[key]);
        }

        let mut buffer = Buffer::new(base, None);
        buffer.remove(&[20]);
        buffer.write(&[30], &[99]);
        buffer.write(&[35], &[35]);
        buffer.remove(&[50]);
        buffer.write(&[60], &[60]);

        let merged = vec![
            (vec![10], vec![10]),
            (vec![30], vec![99]),
            (vec![35], vec![35]),
            (vec![40], vec![40]),
            (vec![60], vec![60]),
        ];

        (buffer, merged)
    }

    fn all_records(storage: &dyn Storage, order: Order) -> Vec<Record> {
        storage.scan(None, None, order).collect()
    }

    #[test]
    fn scans_reflect_pending_ops() {
        let (buffer, mut merged) = storage_with_overlay();
        assert_eq!(all_records(&buffer, Order::Ascending), merged);

        merged.reverse();
        assert_eq!(all_records(&buffer, Order::Descending), merged);
    }

    #[test]
    fn reads_reflect_pending_ops() {
        let (buffer, _) = storage_with_overlay();

        assert_eq!(buffer.read(&[20]), None);
        assert_eq!(buffer.read(&[30]), Some(vec![99]));
        assert_eq!(buffer.read(&[35]), Some(vec![35]));
        assert_eq!(buffer.read(&[40]), Some(vec![40]));
    }

    #[test]
    fn inverted_range_scans_nothing() {
        let (buffer, _) = storage_with_overlay();

        assert_eq!(buffer.scan(Some(&[40]), Some(&[20]), Order::Ascending).count(), 0);
    }

    #[test]
    fn removing_a_range_covers_both_sides() {
        let (mut buffer, _) = storage_with_overlay();

        // Deletes base records (30, 40) as well as the buffered insert (35).
        buffer.remove_range(Some(&[30]), Some(&[50]));

        assert_eq!(all_records(&buffer, Order::Ascending), vec![
            (vec![10], vec![10]),
            (vec![60], vec![60]),
        ]);
    }

    #[test]
    fn disassembling_discards_pending_ops() {
        let (buffer, _) = storage_with_overlay();
        let (base, _) = buffer.disassemble();

        assert_eq!(base.read(&[20]), Some(vec![20]));
        assert_eq!(base.read(&[35]), None);
    }

    #[test]
    fn consuming_applies_pending_ops() {
        let (buffer, merged) = storage_with_overlay();
        let base = buffer.consume();

        assert_eq!(all_records(&base, Order::Ascending), merged);
    }
}
