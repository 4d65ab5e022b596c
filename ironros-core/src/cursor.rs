//! Read/write position threaded across successive field operations.

use crate::buffer::ReadBuffer;

/// Byte offset into a buffer, advanced by each codec operation.
///
/// A cursor only moves forward and is neither `Clone` nor `Copy`. The
/// traversal that owns it lends it by `&mut` to each codec call in turn.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    /// Creates a cursor at the given byte offset.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self { position }
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Advances the cursor by `count` bytes.
    #[inline(always)]
    pub fn advance(&mut self, count: usize) {
        self.position += count;
    }

    /// Moves the cursor forward to `position`, as returned by an encoder.
    ///
    /// Positions behind the cursor are ignored.
    #[inline]
    pub fn advance_to(&mut self, position: usize) {
        debug_assert!(
            position >= self.position,
            "cursor moved backwards: {} -> {}",
            self.position,
            position
        );
        self.position = self.position.max(position);
    }

    /// Returns how many bytes of `buffer` lie past the cursor.
    #[must_use]
    pub fn remaining<B: ReadBuffer + ?Sized>(&self, buffer: &B) -> usize {
        buffer.len().saturating_sub(self.position)
    }
}

impl From<Cursor> for usize {
    fn from(cursor: Cursor) -> Self {
        cursor.position
    }
}
