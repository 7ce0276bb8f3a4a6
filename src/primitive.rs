//! Parser primitives that accept specific patterns.
//!
//! These are the leaves of every grammar. Everything else is built by combining them with the methods on [`Parser`].

use super::*;

/// See [`custom`].
pub struct Custom<F>(F);

impl<F: Copy> Copy for Custom<F> {}
impl<F: Clone> Clone for Custom<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'src, I, O, F> Parser<'src, I, O> for Custom<F>
where
    I: ?Sized + Input,
    F: Fn(&mut Cursor<'src, I>, &mut Sink<'_, 'src, I, O>) -> PResult,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        (self.0)(cursor, sink)
    }
}

/// A parser primitive that allows you to define your own parsers directly in continuation-passing style.
///
/// The function receives the cursor and the sink exactly as [`Parser::go`] does. It's a cleaner alternative to
/// implementing [`Parser`] by hand.
///
/// # Examples
///
/// ```
/// # use cps_parse::prelude::*;
/// // Yields every non-empty prefix of the remaining input
/// let prefixes = custom::<str, String, _>(|cursor, sink| {
///     let rest = cursor.remaining();
///     for (i, c) in rest.char_indices() {
///         let prefix = &rest[..i + c.len_utf8()];
///         let mut after = cursor.try_consume_prefix(prefix).unwrap().0;
///         sink(&mut after, prefix.to_string())?;
///     }
///     Ok(())
/// });
///
/// assert_eq!(prefixes.parse_all("abc").unwrap(), vec!["a", "ab", "abc"]);
/// ```
pub fn custom<'src, I, O, F>(f: F) -> Custom<F>
where
    I: ?Sized + Input,
    F: Fn(&mut Cursor<'src, I>, &mut Sink<'_, 'src, I, O>) -> PResult,
{
    Custom(f)
}

/// See [`end`].
#[derive(Copy, Clone, Debug, Default)]
pub struct End;

impl<'src, I: ?Sized + Input> Parser<'src, I, ()> for End {
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, ()>) -> PResult {
        if cursor.is_empty() {
            tracing::trace!(offset = cursor.offset(), "end of input");
            sink(cursor, ())
        } else {
            Ok(())
        }
    }
}

/// A parser that accepts only the end of input.
///
/// It yields `()` exactly once when nothing remains and never consumes anything.
///
/// # Examples
///
/// ```
/// # use cps_parse::prelude::*;
/// assert_eq!(end().count("").unwrap(), 1);
/// assert_eq!(end().count("hello").unwrap(), 0);
/// ```
pub fn end() -> End {
    End
}

/// See [`empty`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Empty;

impl<'src, I: ?Sized + Input> Parser<'src, I, ()> for Empty {
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, ()>) -> PResult {
        sink(cursor, ())
    }
}

/// A parser that parses no input, yielding `()` exactly once.
pub fn empty() -> Empty {
    Empty
}

/// See [`fail`].
pub struct Fail<O>(PhantomData<fn() -> O>);

impl<O> Copy for Fail<O> {}
impl<O> Clone for Fail<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'src, I: ?Sized + Input, O> Parser<'src, I, O> for Fail<O> {
    #[inline]
    fn go(&self, _cursor: &mut Cursor<'src, I>, _sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        Ok(())
    }
}

/// A parser that never matches anything.
///
/// It's the identity of [`Parser::or`] and is handy as the seed when folding a list of alternatives together.
pub fn fail<O>() -> Fail<O> {
    Fail(PhantomData)
}

/// See [`just`].
#[derive(Copy, Clone, Debug)]
pub struct Just<T>(T);

impl<'src, T: Literal> Parser<'src, T::Input, &'src T::Input> for Just<T> {
    #[inline]
    fn go(
        &self,
        cursor: &mut Cursor<'src, T::Input>,
        sink: &mut Sink<'_, 'src, T::Input, &'src T::Input>,
    ) -> PResult {
        let Some((after, matched)) = cursor.try_consume_prefix(self.0.as_input()) else {
            return Ok(());
        };
        tracing::trace!(offset = cursor.offset(), len = matched.len(), "literal matched");
        *cursor = after;
        sink(cursor, matched)
    }
}

/// A parser that accepts exactly the given literal and yields the slice of input it matched.
///
/// Matching is exact and case-sensitive, with no pattern syntax. On a match the cursor is advanced past the literal;
/// otherwise nothing is yielded and the cursor is untouched.
///
/// # Examples
///
/// ```
/// # use cps_parse::prelude::*;
/// let hello = just("Hello");
///
/// assert_eq!(hello.parse_all("Hello, world").unwrap(), vec!["Hello"]);
/// assert!(hello.parse_all("hello").unwrap().is_empty());
///
/// let magic = just(b"\x7fELF");
/// assert_eq!(magic.count(&b"\x7fELF\x02"[..]).unwrap(), 1);
/// ```
pub fn just<T: Literal>(literal: T) -> Just<T> {
    Just(literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_advances_by_literal_length() {
        let mut cursor = Cursor::new("HelloWorld");
        let mut seen = Vec::new();
        just("Hello").parse_from(&mut cursor, |s| seen.push(s)).unwrap();

        assert_eq!(seen, ["Hello"]);
        assert_eq!(cursor.offset(), "Hello".len());
        assert_eq!(cursor.remaining(), "World");
    }

    #[test]
    fn just_mismatch_leaves_cursor() {
        let mut cursor = Cursor::new("Goodbye");
        let before = cursor;
        let mut calls = 0;
        just("Hello").parse_from(&mut cursor, |_| calls += 1).unwrap();

        assert_eq!(calls, 0);
        assert_eq!(cursor, before);
    }

    #[test]
    fn just_is_case_sensitive() {
        assert_eq!(just("Hello").count("HELLO").unwrap(), 0);
        assert_eq!(just("Hello").count("Hello").unwrap(), 1);
    }

    #[test]
    fn just_owned_literal() {
        let word = String::from("abc");
        assert_eq!(just(word).parse_all("abcd").unwrap(), vec!["abc"]);
    }

    #[test]
    fn just_on_tokens() {
        #[derive(Debug, PartialEq)]
        enum Tok {
            Open,
            Close,
        }
        let toks = [Tok::Open, Tok::Close];
        let pair = just(&[Tok::Open]).then(just(&[Tok::Close]));
        assert_eq!(pair.count(&toks[..]).unwrap(), 1);
    }

    #[test]
    fn end_only_when_empty() {
        assert_eq!(end().count("").unwrap(), 1);
        assert_eq!(end().count(" ").unwrap(), 0);

        let mut cursor = Cursor::new("x");
        let after = cursor.try_consume_prefix("x").unwrap().0;
        cursor = after;
        let mut calls = 0;
        end().parse_from(&mut cursor, |()| calls += 1).unwrap();
        assert_eq!(calls, 1);
        assert_eq!(cursor, after);
    }

    #[test]
    fn empty_yields_once_without_consuming() {
        let mut cursor = Cursor::new("abc");
        let mut calls = 0;
        empty().parse_from(&mut cursor, |()| calls += 1).unwrap();
        assert_eq!(calls, 1);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn fail_never_yields() {
        assert_eq!(fail::<()>().count("").unwrap(), 0);
        assert_eq!(Parser::<str, ()>::or(fail::<()>(), empty()).count("").unwrap(), 1);
    }
}
