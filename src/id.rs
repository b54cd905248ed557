use core::fmt;

/// 32-bit element identifier.
///
/// Ids are content addressed: the same label always hashes to the same id, so
/// a button built with `Id::new("Quit")` this frame can be compared against
/// the hover/down ids the context recorded last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Id(pub u32);

impl Id {
    /// "No element". Hit-testing reports this when nothing is hovered.
    pub const NONE: Id = Id(0);

    /// Hashes `label` into an id.
    #[inline]
    pub const fn new(label: &str) -> Id {
        Id(hash_label(label.as_bytes(), 0))
    }

    /// Hashes `label` and `index` together, for ids generated in loops.
    #[inline]
    pub const fn new_index(label: &str, index: u32) -> Id {
        let base = hash_label(label.as_bytes(), 0);
        Id(hash_label(&index.to_le_bytes(), base))
    }

    #[inline]
    pub const fn from_raw(id: u32) -> Id {
        Id(id)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// One-at-a-time hash, offset by one so that an empty-ish label never lands on
/// [`Id::NONE`] for the common case.
const fn hash_label(key: &[u8], seed: u32) -> u32 {
    let mut hash: u32 = seed;
    let mut i = 0;
    while i < key.len() {
        hash = hash.wrapping_add(key[i] as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
        i += 1;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash.wrapping_add(1)
}

impl From<&str> for Id {
    fn from(label: &str) -> Self {
        Id::new(label)
    }
}

impl From<u32> for Id {
    fn from(raw: u32) -> Self {
        Id(raw)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}
