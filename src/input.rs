//! Input buffers and the cursors that walk them.
//!
//! A [`Cursor`] is a cheap, copyable view of the unconsumed suffix of some [`Input`]. Parsers explore alternative
//! ways of consuming the input by copying the cursor and advancing the copies independently: advancing one copy never
//! affects another, and no cursor ever moves backwards.

use super::*;

use core::ops::{Range, RangeFrom};

/// A buffer that parsers can run over.
///
/// Implemented for [`str`] (offsets are byte offsets, always on character boundaries) and for slices of comparable
/// tokens such as `[u8]`.
pub trait Input {
    /// The length of the input, in the units a [`Cursor`] counts offsets in.
    fn len(&self) -> usize;

    /// Whether the input has no content at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this input begins with `prefix`. Comparison is exact and case-sensitive.
    fn has_prefix(&self, prefix: &Self) -> bool;

    /// Get a sub-slice of the input.
    fn slice(&self, range: Range<usize>) -> &Self;

    /// Get the suffix of the input starting at the given offset.
    fn slice_from(&self, from: RangeFrom<usize>) -> &Self;
}

impl Input for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn has_prefix(&self, prefix: &Self) -> bool {
        self.starts_with(prefix)
    }

    fn slice(&self, range: Range<usize>) -> &Self {
        &self[range]
    }

    fn slice_from(&self, from: RangeFrom<usize>) -> &Self {
        &self[from]
    }
}

impl<T: PartialEq> Input for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn has_prefix(&self, prefix: &Self) -> bool {
        self.starts_with(prefix)
    }

    fn slice(&self, range: Range<usize>) -> &Self {
        &self[range]
    }

    fn slice_from(&self, from: RangeFrom<usize>) -> &Self {
        &self[from]
    }
}

/// A value that can be matched literally against some [`Input`]. See [`just`](crate::primitive::just).
///
/// Each literal type names exactly one input type so that grammars built from literals need no type annotations.
pub trait Literal {
    /// The kind of input this literal matches against.
    type Input: ?Sized + Input;

    /// View the literal as a piece of input.
    fn as_input(&self) -> &Self::Input;
}

impl<'a> Literal for &'a str {
    type Input = str;

    fn as_input(&self) -> &str {
        self
    }
}

impl Literal for String {
    type Input = str;

    fn as_input(&self) -> &str {
        self.as_str()
    }
}

impl<'a, T: PartialEq> Literal for &'a [T] {
    type Input = [T];

    fn as_input(&self) -> &[T] {
        self
    }
}

impl<'a, T: PartialEq, const N: usize> Literal for &'a [T; N] {
    type Input = [T];

    fn as_input(&self) -> &[T] {
        &self[..]
    }
}

impl<T: PartialEq> Literal for Vec<T> {
    type Input = [T];

    fn as_input(&self) -> &[T] {
        self.as_slice()
    }
}

/// An immutable position within an [`Input`].
///
/// Cursors are [`Copy`]: copying one is how a parser sets aside a position to come back to.
pub struct Cursor<'src, I: ?Sized = str> {
    src: &'src I,
    offset: usize,
}

impl<'src, I: ?Sized> Copy for Cursor<'src, I> {}
impl<'src, I: ?Sized> Clone for Cursor<'src, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'src, I: ?Sized + Input> Cursor<'src, I> {
    /// Create a cursor at the start of `src`.
    pub fn new(src: &'src I) -> Self {
        Self { src, offset: 0 }
    }

    /// The whole input this cursor walks, including anything already consumed.
    pub fn source(&self) -> &'src I {
        self.src
    }

    /// How far into the input this cursor is.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The unconsumed suffix of the input.
    pub fn remaining(&self) -> &'src I {
        self.src.slice_from(self.offset..)
    }

    /// Whether there is nothing left to consume.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.src.len()
    }

    /// If the remaining input starts with `prefix`, produce a cursor advanced past it along with the matched slice of
    /// the input. Otherwise produce nothing. This cursor is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::Cursor;
    /// let cursor = Cursor::new("HelloWorld");
    ///
    /// let (after, hello) = cursor.try_consume_prefix("Hello").unwrap();
    /// assert_eq!(hello, "Hello");
    /// assert_eq!(after.remaining(), "World");
    /// assert_eq!(cursor.remaining(), "HelloWorld");
    /// assert!(cursor.try_consume_prefix("World").is_none());
    /// ```
    pub fn try_consume_prefix(&self, prefix: &I) -> Option<(Self, &'src I)> {
        if !self.remaining().has_prefix(prefix) {
            return None;
        }
        let end = self.offset + prefix.len();
        let matched = self.src.slice(self.offset..end);
        Some((
            Self {
                src: self.src,
                offset: end,
            },
            matched,
        ))
    }
}

impl<'src, I: ?Sized> PartialEq for Cursor<'src, I> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.src, other.src) && self.offset == other.offset
    }
}

impl<'src, I: ?Sized> Eq for Cursor<'src, I> {}

impl<'src, I: ?Sized + Input + fmt::Debug> fmt::Debug for Cursor<'src, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_prefix_advances_copy_only() {
        let cursor = Cursor::new("HelloWorld");
        let (after, matched) = cursor.try_consume_prefix("Hello").unwrap();

        assert_eq!(matched, "Hello");
        assert_eq!(after.offset(), 5);
        assert_eq!(after.remaining(), "World");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.remaining(), "HelloWorld");
    }

    #[test]
    fn consume_prefix_mismatch() {
        let cursor = Cursor::new("Goodbye");
        assert!(cursor.try_consume_prefix("Hello").is_none());
        assert!(cursor.try_consume_prefix("goodbye").is_none());
        assert!(cursor.try_consume_prefix("Goodbye!").is_none());
    }

    #[test]
    fn consume_empty_prefix() {
        let cursor = Cursor::new("abc");
        let (after, matched) = cursor.try_consume_prefix("").unwrap();
        assert_eq!(matched, "");
        assert_eq!(after, cursor);
    }

    #[test]
    fn remaining_is_suffix() {
        let src = "abcdef";
        let mut cursor = Cursor::new(src);
        for lit in ["ab", "cd", "ef"] {
            cursor = cursor.try_consume_prefix(lit).unwrap().0;
            assert!(src.ends_with(cursor.remaining()));
        }
        assert!(cursor.is_empty());
        assert_eq!(cursor.remaining(), "");
    }

    #[test]
    fn empty_input() {
        let cursor = Cursor::new("");
        assert!(cursor.is_empty());
        assert!(cursor.try_consume_prefix("a").is_none());
    }

    #[test]
    fn multibyte_text() {
        let cursor = Cursor::new("héllo");
        let (after, matched) = cursor.try_consume_prefix("hé").unwrap();
        assert_eq!(matched, "hé");
        assert_eq!(after.offset(), 3);
        assert_eq!(after.remaining(), "llo");
    }

    #[test]
    fn byte_input() {
        let data: &[u8] = b"\x00\x01\x02";
        let cursor = Cursor::new(data);
        let (after, matched) = cursor.try_consume_prefix(&[0, 1][..]).unwrap();
        assert_eq!(matched, &[0, 1]);
        assert_eq!(after.remaining(), &[2]);
    }

    #[test]
    fn cursors_over_different_buffers_differ() {
        let a = String::from("x");
        let b = String::from("x");
        assert_ne!(Cursor::new(a.as_str()), Cursor::new(b.as_str()));
        assert_eq!(Cursor::new(a.as_str()), Cursor::new(a.as_str()));
    }
}
