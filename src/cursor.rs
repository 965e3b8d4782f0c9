//! External iteration protocol.
//!
//! A [`Cursor`] exposes position state explicitly: `rewind` to start,
//! `is_valid` to ask whether the position holds an element, `key` and
//! `current` to read it, `advance` to move on. [`drive`] is the "for each"
//! loop over that protocol and [`Walk`] adapts any cursor to a std
//! [`Iterator`].

use crate::error::Result;

pub trait Cursor {
    type Item;

    /// Move to the first element. Restarts iteration when called again.
    fn rewind(&mut self) -> Result<()>;

    /// The element at the current position.
    fn current(&self) -> &Self::Item;

    /// Zero-based position relative to the last rewind.
    fn key(&self) -> usize;

    /// Move to the next element.
    fn advance(&mut self) -> Result<()>;

    /// Whether the current position holds an element. Implementations may
    /// release resources here once they observe the end.
    fn is_valid(&mut self) -> bool;
}

/// Run the iteration protocol to completion, calling `visit` with each
/// position and element. Returns the number of elements visited.
pub fn drive<C, F>(cursor: &mut C, mut visit: F) -> Result<usize>
where
    C: Cursor + ?Sized,
    F: FnMut(usize, &C::Item) -> Result<()>,
{
    cursor.rewind()?;
    let mut visited = 0;
    while cursor.is_valid() {
        visit(cursor.key(), cursor.current())?;
        visited += 1;
        cursor.advance()?;
    }
    Ok(visited)
}

/// Iterator over `(key, item)` pairs of a cursor. Rewinds on the first
/// call to `next`; stops for good after the first error.
pub struct Walk<'a, C: Cursor + ?Sized> {
    cursor: &'a mut C,
    started: bool,
    failed: bool,
}

impl<'a, C: Cursor + ?Sized> Walk<'a, C> {
    pub fn new(cursor: &'a mut C) -> Self {
        Walk { cursor, started: false, failed: false }
    }
}

impl<C> Iterator for Walk<'_, C>
where
    C: Cursor + ?Sized,
    C::Item: Clone,
{
    type Item = Result<(usize, C::Item)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let step = if self.started {
            self.cursor.advance()
        } else {
            self.started = true;
            self.cursor.rewind()
        };
        if let Err(e) = step {
            self.failed = true;
            return Some(Err(e));
        }
        if !self.cursor.is_valid() {
            return None;
        }
        Some(Ok((self.cursor.key(), self.cursor.current().clone())))
    }
}
