//! Per-frame bump allocator for text.
//!
//! Strings formatted while building a frame (counters, labels with numbers)
//! are written into one fixed buffer and referenced by [`ArenaSpan`]. The
//! whole buffer is released at once when the frame is cleared.

use core::fmt::{self, Write};

/// A byte range inside a [`StringArena`]. Only valid until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaSpan {
    start: u32,
    len: u32,
}

impl ArenaSpan {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub struct StringArena {
    buffer: Vec<u8>,
    offset: usize,
}

impl StringArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            offset: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn used(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Copies `text` into the arena. `None` when it does not fit; the arena
    /// is left untouched in that case.
    pub fn alloc_str(&mut self, text: &str) -> Option<ArenaSpan> {
        let bytes = text.as_bytes();
        if bytes.len() > self.remaining() {
            return None;
        }
        let start = self.offset;
        self.buffer[start..start + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Some(ArenaSpan {
            start: start as u32,
            len: bytes.len() as u32,
        })
    }

    /// Formats straight into the arena. On overflow the partial write is
    /// rolled back and `None` is returned.
    pub fn alloc_fmt(&mut self, args: fmt::Arguments<'_>) -> Option<ArenaSpan> {
        let start = self.offset;
        let mut cursor = ArenaCursor { arena: self };
        if cursor.write_fmt(args).is_err() {
            self.offset = start;
            return None;
        }
        Some(ArenaSpan {
            start: start as u32,
            len: (self.offset - start) as u32,
        })
    }

    pub fn get(&self, span: ArenaSpan) -> &str {
        let start = span.start as usize;
        let end = start + span.len as usize;
        self.buffer
            .get(start..end)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

struct ArenaCursor<'a> {
    arena: &'a mut StringArena,
}

impl Write for ArenaCursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.arena.alloc_str(s).map(|_| ()).ok_or(fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_read_back() {
        let mut arena = StringArena::with_capacity(32);
        let a = arena.alloc_str("DAY").unwrap();
        let b = arena.alloc_fmt(format_args!("{}", 42)).unwrap();
        assert_eq!(arena.get(a), "DAY");
        assert_eq!(arena.get(b), "42");
        assert_eq!(arena.used(), 5);
    }

    #[test]
    fn overflow_leaves_arena_untouched() {
        let mut arena = StringArena::with_capacity(4);
        assert!(arena.alloc_str("abc").is_some());
        assert!(arena.alloc_str("de").is_none());
        assert_eq!(arena.used(), 3);

        // The first fragment fits, the second does not: everything rolls back.
        assert!(arena.alloc_fmt(format_args!("{}{}", "d", "efg")).is_none());
        assert_eq!(arena.used(), 3);
    }

    #[test]
    fn reset_reuses_storage() {
        let mut arena = StringArena::with_capacity(4);
        arena.alloc_str("abcd").unwrap();
        assert_eq!(arena.remaining(), 0);
        arena.reset();
        let span = arena.alloc_str("wxyz").unwrap();
        assert_eq!(arena.get(span), "wxyz");
    }
}
