//! Combinators that allow combining and extending existing parsers.
//!
//! Although it's *sometimes* useful to be able to name their type, most of these parsers are much easier to work with
//! when accessed through their respective methods on [`Parser`].
//!
//! Every combinator here follows the same backtracking discipline: a sub-parser that must start from the
//! combinator's own position is handed a *copy* of the cursor, so that whatever it (or its continuation) consumes is
//! never seen by the sub-parsers explored after it.

use super::*;

use crate::stack::with_stack;

/// See [`Parser::then`].
pub struct Then<A, B, OA, OB> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
    pub(crate) phantom: PhantomData<fn() -> (OA, OB)>,
}

impl<A: Copy, B: Copy, OA, OB> Copy for Then<A, B, OA, OB> {}
impl<A: Clone, B: Clone, OA, OB> Clone for Then<A, B, OA, OB> {
    fn clone(&self) -> Self {
        Self {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, A, B, OA, OB> Parser<'src, I, (OA, OB)> for Then<A, B, OA, OB>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    B: Parser<'src, I, OB>,
    OA: Clone,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, (OA, OB)>) -> PResult {
        self.parser_a.go(cursor, &mut |cursor, a| {
            tracing::trace!(offset = cursor.offset(), "sequence continues");
            self.parser_b
                .go(cursor, &mut |cursor, b| sink(cursor, (a.clone(), b)))
        })
    }
}

/// See [`Parser::ignore_then`].
pub struct IgnoreThen<A, B, OA> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, B: Copy, OA> Copy for IgnoreThen<A, B, OA> {}
impl<A: Clone, B: Clone, OA> Clone for IgnoreThen<A, B, OA> {
    fn clone(&self) -> Self {
        Self {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, A, B, OA, OB> Parser<'src, I, OB> for IgnoreThen<A, B, OA>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    B: Parser<'src, I, OB>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, OB>) -> PResult {
        self.parser_a
            .go(cursor, &mut |cursor, _| self.parser_b.go(cursor, sink))
    }
}

/// See [`Parser::then_ignore`].
pub struct ThenIgnore<A, B, OB> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
    pub(crate) phantom: PhantomData<fn() -> OB>,
}

impl<A: Copy, B: Copy, OB> Copy for ThenIgnore<A, B, OB> {}
impl<A: Clone, B: Clone, OB> Clone for ThenIgnore<A, B, OB> {
    fn clone(&self) -> Self {
        Self {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, A, B, OA, OB> Parser<'src, I, OA> for ThenIgnore<A, B, OB>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    B: Parser<'src, I, OB>,
    OA: Clone,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, OA>) -> PResult {
        self.parser_a.go(cursor, &mut |cursor, a| {
            self.parser_b
                .go(cursor, &mut |cursor, _| sink(cursor, a.clone()))
        })
    }
}

/// See [`Parser::or`].
#[derive(Copy, Clone)]
pub struct Or<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<'src, I, O, A, B> Parser<'src, I, O> for Or<A, B>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
    B: Parser<'src, I, O>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        let mut branch = *cursor;
        self.parser_a.go(&mut branch, sink)?;

        let mut branch = *cursor;
        tracing::trace!(offset = cursor.offset(), "trying second alternative");
        self.parser_b.go(&mut branch, sink)
    }
}

/// See [`Parser::or_else`].
#[derive(Copy, Clone)]
pub struct OrElse<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<'src, I, O, A, B> Parser<'src, I, O> for OrElse<A, B>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
    B: Parser<'src, I, O>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        let mut matched = false;
        let mut branch = *cursor;
        self.parser_a.go(&mut branch, &mut |cursor, out| {
            matched = true;
            sink(cursor, out)
        })?;

        // Parsing is synchronous, so every alternative of `parser_a` has been seen by now.
        if matched {
            return Ok(());
        }

        let mut branch = *cursor;
        tracing::trace!(offset = cursor.offset(), "falling back to second alternative");
        self.parser_b.go(&mut branch, sink)
    }
}

/// See [`Parser::map`].
pub struct Map<A, OA, F> {
    pub(crate) parser: A,
    pub(crate) mapper: F,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, OA, F: Copy> Copy for Map<A, OA, F> {}
impl<A: Clone, OA, F: Clone> Clone for Map<A, OA, F> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            mapper: self.mapper.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, O, A, OA, F> Parser<'src, I, O> for Map<A, OA, F>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    F: Fn(OA) -> O,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        self.parser
            .go(cursor, &mut |cursor, out| sink(cursor, (self.mapper)(out)))
    }
}

/// See [`Parser::try_map`].
pub struct TryMap<A, OA, F> {
    pub(crate) parser: A,
    pub(crate) mapper: F,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, OA, F: Copy> Copy for TryMap<A, OA, F> {}
impl<A: Clone, OA, F: Clone> Clone for TryMap<A, OA, F> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            mapper: self.mapper.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, O, A, OA, E, F> Parser<'src, I, O> for TryMap<A, OA, F>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    F: Fn(OA) -> Result<O, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        self.parser.go(cursor, &mut |cursor, out| {
            let out = (self.mapper)(out).map_err(|err| {
                tracing::debug!(offset = cursor.offset(), error = %err, "transform failed");
                Error::transform(err)
            })?;
            sink(cursor, out)
        })
    }
}

/// See [`Parser::to`].
pub struct To<A, OA, O> {
    pub(crate) parser: A,
    pub(crate) to: O,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, OA, O: Copy> Copy for To<A, OA, O> {}
impl<A: Clone, OA, O: Clone> Clone for To<A, OA, O> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            to: self.to.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, O, A, OA> Parser<'src, I, O> for To<A, OA, O>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    O: Clone,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        self.parser
            .go(cursor, &mut |cursor, _| sink(cursor, self.to.clone()))
    }
}

/// See [`Parser::ignored`].
pub struct Ignored<A, OA> {
    pub(crate) parser: A,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, OA> Copy for Ignored<A, OA> {}
impl<A: Clone, OA> Clone for Ignored<A, OA> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            phantom: PhantomData,
        }
    }
}

impl<'src, I, A, OA> Parser<'src, I, ()> for Ignored<A, OA>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, ()>) -> PResult {
        self.parser.go(cursor, &mut |cursor, _| sink(cursor, ()))
    }
}

/// See [`Parser::filter`].
#[derive(Copy, Clone)]
pub struct Filter<A, F> {
    pub(crate) parser: A,
    pub(crate) filter: F,
}

impl<'src, I, O, A, F> Parser<'src, I, O> for Filter<A, F>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
    F: Fn(&O) -> bool,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        self.parser.go(cursor, &mut |cursor, out| {
            if (self.filter)(&out) {
                sink(cursor, out)
            } else {
                Ok(())
            }
        })
    }
}

/// See [`Parser::or_not`].
#[derive(Copy, Clone)]
pub struct OrNot<A> {
    pub(crate) parser: A,
}

impl<'src, I, O, A> Parser<'src, I, Option<O>> for OrNot<A>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, Option<O>>) -> PResult {
        let mut branch = *cursor;
        self.parser
            .go(&mut branch, &mut |cursor, out| sink(cursor, Some(out)))?;

        let mut branch = *cursor;
        sink(&mut branch, None)
    }
}

/// See [`Parser::repeated`].
pub struct Repeated<A, OA> {
    pub(crate) parser: A,
    pub(crate) phantom: PhantomData<fn() -> OA>,
}

impl<A: Copy, OA> Copy for Repeated<A, OA> {}
impl<A: Clone, OA> Clone for Repeated<A, OA> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            phantom: PhantomData,
        }
    }
}

impl<A, OA> Repeated<A, OA> {
    fn go_from<'src, I>(
        &self,
        cursor: &mut Cursor<'src, I>,
        items: &mut Vec<OA>,
        sink: &mut Sink<'_, 'src, I, Vec<OA>>,
    ) -> PResult
    where
        I: ?Sized + Input,
        A: Parser<'src, I, OA>,
        OA: Clone,
    {
        let mut stop = *cursor;
        sink(&mut stop, items.clone())?;

        let start = cursor.offset();
        let mut branch = *cursor;
        self.parser.go(&mut branch, &mut |cursor, out| {
            // A repetition that consumed nothing would repeat forever.
            if cursor.offset() == start {
                return Ok(());
            }
            items.push(out);
            // Every further repetition runs inside this continuation, so stack use grows with the input.
            let result = with_stack(|| self.go_from(cursor, items, sink));
            items.pop();
            result
        })
    }
}

impl<'src, I, A, OA> Parser<'src, I, Vec<OA>> for Repeated<A, OA>
where
    I: ?Sized + Input,
    A: Parser<'src, I, OA>,
    OA: Clone,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, Vec<OA>>) -> PResult {
        self.go_from(cursor, &mut Vec::new(), sink)
    }
}

/// See [`choice`].
#[derive(Copy, Clone)]
pub struct Choice<T> {
    parsers: T,
}

/// Parse using every one of a set of parsers, yielding the alternatives of all of them.
///
/// This is the n-ary form of [`Parser::or`]: each parser starts from its own copy of the original cursor, and they
/// are tried in order. It accepts tuples of up to 25 parsers, or a [`Vec`] of parsers of one type.
///
/// # Examples
///
/// ```
/// # use cps_parse::prelude::*;
/// let greeting = choice((just("Hello"), just("Hi"), just("Hey"), just("H")));
///
/// assert_eq!(greeting.parse_all("Hey").unwrap(), vec!["Hey", "H"]);
///
/// let digits = choice((0..10).map(|d| just(d.to_string())).collect::<Vec<_>>());
/// assert_eq!(digits.parse_all("7").unwrap(), vec!["7"]);
/// ```
pub fn choice<T>(parsers: T) -> Choice<T> {
    Choice { parsers }
}

macro_rules! impl_choice_for_tuple {
    () => {};
    ($head:ident $($X:ident)*) => {
        impl_choice_for_tuple!($($X)*);
        impl_choice_for_tuple!(~ $head $($X)*);
    };
    (~ $($X:ident)+) => {
        #[allow(non_snake_case)]
        impl<'src, I, O, $($X),+> Parser<'src, I, O> for Choice<($($X,)+)>
        where
            I: ?Sized + Input,
            $($X: Parser<'src, I, O>),+
        {
            #[inline]
            fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
                let Choice { parsers: ($($X,)+) } = self;
                $(
                    let mut branch = *cursor;
                    $X.go(&mut branch, sink)?;
                )+
                Ok(())
            }
        }
    };
}

impl_choice_for_tuple!(A_ B_ C_ D_ E_ F_ G_ H_ I_ J_ K_ L_ M_ N_ O_ P_ Q_ S_ T_ U_ V_ W_ X_ Y_ Z_);

impl<'src, I, O, A> Parser<'src, I, O> for Choice<Vec<A>>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        for parser in &self.parsers {
            let mut branch = *cursor;
            parser.go(&mut branch, sink)?;
        }
        Ok(())
    }
}

/// See [`Parser::boxed`].
pub struct Boxed<'b, 'src, I: ?Sized, O> {
    pub(crate) inner: Rc<dyn Parser<'src, I, O> + 'b>,
}

impl<'b, 'src, I: ?Sized, O> Clone for Boxed<'b, 'src, I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'b, 'src, I: ?Sized + Input, O> Parser<'src, I, O> for Boxed<'b, 'src, I, O> {
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        self.inner.go(cursor, sink)
    }

    fn boxed<'c>(self) -> Boxed<'c, 'src, I, O>
    where
        Self: Sized + 'c,
    {
        // Never double-box parsers
        Boxed { inner: self.inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::cell::Cell;

    // Yields each of the given lengths as a separate alternative, consuming that many bytes.
    fn lengths<'src>(
        lens: &'static [usize],
    ) -> impl Parser<'src, str, &'src str> + Clone {
        custom::<str, &'src str, _>(move |cursor, sink| {
            for &len in lens {
                let rest = cursor.remaining();
                if let Some(prefix) = rest.get(..len) {
                    let mut after = cursor.try_consume_prefix(prefix).unwrap().0;
                    sink(&mut after, prefix)?;
                }
            }
            Ok(())
        })
    }

    #[test]
    fn then_pairs_alternatives_depth_first() {
        let parser = lengths(&[1, 2]).then(lengths(&[1, 2]));
        assert_eq!(
            parser.parse_all("abcd").unwrap(),
            vec![("a", "b"), ("a", "bc"), ("ab", "c"), ("ab", "cd")],
        );
    }

    #[test]
    fn then_counts_sum_over_first_alternatives() {
        // "ab" leaves "c" (one way to continue), "abc" leaves "" (none)
        let parser = just("ab")
            .or(just("abc"))
            .then(just("c").or(just("c")));
        assert_eq!(parser.count("abc").unwrap(), 2);
    }

    #[test]
    fn then_second_sees_advanced_cursor() {
        let parser = just("Hello").then(just("World"));
        assert_eq!(parser.parse_all("HelloWorld").unwrap(), vec![("Hello", "World")]);
        assert!(parser.parse_all("WorldHello").unwrap().is_empty());
    }

    #[test]
    fn or_runs_both_from_original_cursor() {
        let starts = Cell::new(Vec::new());
        let tracked = |tag: &'static str| {
            let starts = &starts;
            custom::<str, &'static str, _>(move |cursor, sink| {
                let mut seen = starts.take();
                seen.push((tag, cursor.offset()));
                starts.set(seen);
                sink(cursor, tag)
            })
        };

        let parser = just("x").ignore_then(tracked("a").or(tracked("b")));
        assert_eq!(parser.parse_all("xy").unwrap(), vec!["a", "b"]);
        assert_eq!(starts.take(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn or_does_not_commit_cursor() {
        let mut cursor = Cursor::new("Hello");
        let mut seen = Vec::new();
        just("Hello")
            .or(just("He"))
            .parse_from(&mut cursor, |s| seen.push(s))
            .unwrap();

        assert_eq!(seen, ["Hello", "He"]);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn or_else_skips_second_on_success() {
        let runs = Cell::new(0);
        let second = custom::<str, &str, _>(|cursor, sink| {
            runs.set(runs.get() + 1);
            sink(cursor, "second")
        });

        let parser = just("a").or_else(&second);
        assert_eq!(parser.parse_all("a").unwrap(), vec!["a"]);
        assert_eq!(runs.get(), 0);

        assert_eq!(parser.parse_all("b").unwrap(), vec!["second"]);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn or_else_forwards_every_first_alternative() {
        let parser = lengths(&[1, 2, 3]).or_else(just("zzz"));
        assert_eq!(parser.count("abc").unwrap(), 3);
    }

    #[test]
    fn map_preserves_count_and_order() {
        let parser = lengths(&[3, 1, 2]).map(str::len);
        assert_eq!(parser.parse_all("abc").unwrap(), vec![3, 1, 2]);
    }

    #[derive(Debug)]
    struct Odd(usize);

    impl fmt::Display for Odd {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} is odd", self.0)
        }
    }

    impl std::error::Error for Odd {}

    #[test]
    fn try_map_error_aborts_parse() {
        let parser = lengths(&[2, 1]).try_map(|s| {
            if s.len() % 2 == 0 {
                Ok(s.len())
            } else {
                Err(Odd(s.len()))
            }
        });

        let mut seen = Vec::new();
        let result = parser.parse_with("ab", |n| seen.push(n));
        assert!(matches!(result, Err(Error::Transform(_))));
        // The first alternative got through before the second one failed
        assert_eq!(seen, [2]);
    }

    #[test]
    fn try_map_error_escapes_biased_choice() {
        let failing = just("a").try_map(|_| Err::<(), _>(Odd(1)));
        let parser = failing.or_else(just("a").ignored());
        assert!(matches!(parser.count("a"), Err(Error::Transform(_))));
    }

    #[test]
    fn to_and_ignored() {
        assert_eq!(just("yes").to(true).parse_all("yes").unwrap(), vec![true]);
        assert_eq!(just("yes").ignored().parse_all("yes").unwrap(), vec![()]);
    }

    #[test]
    fn filter_drops_alternatives() {
        let parser = lengths(&[1, 2, 3]).filter(|s| s.len() != 2);
        assert_eq!(parser.parse_all("abc").unwrap(), vec!["a", "abc"]);
    }

    #[test]
    fn or_not_yields_some_then_none() {
        let parser = just("-").or_not().then(just("1"));
        assert_eq!(parser.parse_all("-1").unwrap(), vec![(Some("-"), "1")]);
        assert_eq!(parser.parse_all("1").unwrap(), vec![(None, "1")]);
    }

    #[test]
    fn repeated_yields_every_count() {
        let parser = just("a").repeated();
        assert_eq!(
            parser.parse_all("aab").unwrap(),
            vec![vec![], vec!["a"], vec!["a", "a"]],
        );
    }

    #[test]
    fn repeated_is_ambiguous_when_items_are() {
        // "aaa" split into runs of "a" and "aa"
        let parser = just("a").or(just("aa")).repeated().then_ignore(end());
        assert_eq!(
            parser.parse_all("aaa").unwrap(),
            vec![vec!["a", "a", "a"], vec!["a", "aa"], vec!["aa", "a"]],
        );
    }

    #[test]
    fn repeated_stops_on_empty_match() {
        let parser = Parser::<str, ()>::repeated(empty());
        assert_eq!(parser.parse_all("abc").unwrap(), vec![vec![]]);
    }

    #[test]
    fn choice_tuple_and_vec() {
        let tuple = choice((just("a"), just("ab"), just("abc")));
        assert_eq!(tuple.parse_all("abc").unwrap(), vec!["a", "ab", "abc"]);

        let vec = choice(vec![just("x"), just("y"), just("x")]);
        assert_eq!(vec.parse_all("x").unwrap(), vec!["x", "x"]);

        let wide = choice((
            just("0"),
            just("1"),
            just("2"),
            just("3"),
            just("4"),
            just("5"),
            just("6"),
            just("7"),
            just("8"),
            just("9"),
            just("9"),
        ));
        assert_eq!(wide.parse_all("9").unwrap(), vec!["9", "9"]);
    }

    #[test]
    fn boxed_clones_share_parser() {
        let word = just("ab").or(just("a")).boxed();
        let twice = word.clone().then(word);
        assert_eq!(twice.parse_all("aba").unwrap(), vec![("ab", "a")]);
    }
}
