/// Z-layer of a draw item. Higher layers paint over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        ZIndex(v)
    }
}

/// Paint-order key: layer first, then the sequence number the item was
/// recorded under.
///
/// The derived `Ord` compares fields top to bottom, which is exactly the
/// required ordering. Because the sequence number is unique per list, no
/// two keys in one frame compare equal, so an unstable sort of keys is
/// still deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        SortKey { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_layers_sort_first() {
        assert!(SortKey::new(ZIndex(-1), 9) < SortKey::new(ZIndex(0), 0));
        assert!(SortKey::new(ZIndex(3), 0) > SortKey::new(ZIndex(2), 7));
    }

    #[test]
    fn sequence_breaks_ties_within_a_layer() {
        assert!(SortKey::new(ZIndex(5), 0) < SortKey::new(ZIndex(5), 1));
    }
}
