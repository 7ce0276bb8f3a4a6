//! Recursive parsers (parser that include themselves within their patterns).
//!
//! The [`recursive()`] function covers most cases, but sometimes it's necessary to manually control the declaration and
//! definition of parsers more carefully, particularly for mutually-recursive parsers. In such cases, the functions on
//! [`Recursive`] allow for this.
//!
//! A recursive parser limits how many of its invocations may be nested inside one another. An invocation counts as
//! nested until it yields an alternative: whatever runs in that alternative's continuation (the next item of a list,
//! the rest of a sequence) is a sibling rather than a child. A grammar that calls itself without consuming input (left
//! recursion) therefore fails with [`Error::RecursionLimit`] instead of exhausting the stack, while long flat inputs
//! are unaffected.

use super::*;

use crate::stack::with_stack;

use core::cell::{Cell, OnceCell};
use std::rc::Weak;

/// How deeply the invocations of a [`Recursive`] parser may be nested by default.
pub const DEFAULT_RECURSION_LIMIT: usize = 1024;

type OnceParser<'b, 'src, I, O> = OnceCell<Box<dyn Parser<'src, I, O> + 'b>>;

struct Indirect<'b, 'src, I: ?Sized, O> {
    parser: OnceParser<'b, 'src, I, O>,
    depth: Cell<usize>,
    limit: usize,
}

enum RecursiveInner<T> {
    Owned(Rc<T>),
    Unowned(Weak<T>),
}

/// A parser that can be defined in terms of itself by separating its [declaration](Recursive::declare) from its
/// [definition](Recursive::define).
///
/// Prefer to use [`recursive()`], which exists as a convenient wrapper around both operations, if possible.
pub struct Recursive<'b, 'src, I: ?Sized, O> {
    inner: RecursiveInner<Indirect<'b, 'src, I, O>>,
}

impl<'b, 'src, I: ?Sized + Input, O> Recursive<'b, 'src, I, O> {
    /// Declare the existence of a recursive parser, allowing it to be used to construct parser combinators before
    /// being fully defined.
    ///
    /// This should be followed by **exactly one** call to [`Recursive::define`] prior to using the parser for
    /// parsing.
    ///
    /// Note that a declared parser which is defined in terms of clones of itself holds a reference to itself and will
    /// not be freed. [`recursive()`] does not have this problem.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// // Declare the existence of the parser before defining it so that it can reference itself
    /// let mut nested = Recursive::declare();
    ///
    /// // Define the parser in terms of itself
    /// nested.define(
    ///     just("(")
    ///         .ignore_then(nested.clone())
    ///         .then_ignore(just(")"))
    ///         .map(|depth: usize| depth + 1)
    ///         .or(Parser::<str, ()>::to(empty(), 0)),
    /// );
    ///
    /// assert_eq!(nested.then_ignore(end()).parse_all("((()))").unwrap(), vec![3]);
    /// ```
    pub fn declare() -> Self {
        Self::declare_with_limit(DEFAULT_RECURSION_LIMIT)
    }

    /// Declare a recursive parser whose invocations may be nested at most `limit` deep.
    pub fn declare_with_limit(limit: usize) -> Self {
        Recursive {
            inner: RecursiveInner::Owned(Rc::new(Indirect {
                parser: OnceCell::new(),
                depth: Cell::new(0),
                limit,
            })),
        }
    }

    /// Defines the parser after declaring it, allowing it to be used for parsing.
    ///
    /// # Panics
    ///
    /// Panics if the parser has already been defined.
    pub fn define<P: Parser<'src, I, O> + 'b>(&mut self, parser: P) {
        let Some(indirect) = self.indirect() else {
            panic!("recursive parser defined during its own construction");
        };
        if indirect.parser.set(Box::new(parser)).is_err() {
            panic!("recursive parser already defined");
        }
    }

    /// The maximum nesting depth of this parser.
    pub fn limit(&self) -> Option<usize> {
        self.indirect().map(|indirect| indirect.limit)
    }

    fn indirect(&self) -> Option<Rc<Indirect<'b, 'src, I, O>>> {
        match &self.inner {
            RecursiveInner::Owned(x) => Some(x.clone()),
            RecursiveInner::Unowned(x) => x.upgrade(),
        }
    }
}

impl<'b, 'src, I: ?Sized, O> Clone for Recursive<'b, 'src, I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: match &self.inner {
                RecursiveInner::Owned(x) => RecursiveInner::Owned(x.clone()),
                RecursiveInner::Unowned(x) => RecursiveInner::Unowned(x.clone()),
            },
        }
    }
}

// Counts an invocation as nested until it is dropped, however the invocation exits.
struct Nested<'a>(&'a Cell<usize>);

impl<'a> Nested<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for Nested<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

// Stops counting an invocation while one of its continuations runs.
struct Resumed<'a>(&'a Cell<usize>);

impl<'a> Resumed<'a> {
    fn leave(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() - 1);
        Self(depth)
    }
}

impl Drop for Resumed<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

impl<'b, 'src, I: ?Sized + Input, O> Parser<'src, I, O> for Recursive<'b, 'src, I, O> {
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        let indirect = self.indirect().ok_or(Error::Undefined)?;
        let parser = indirect.parser.get().ok_or(Error::Undefined)?;

        let depth = indirect.depth.get();
        if depth >= indirect.limit {
            tracing::debug!(
                limit = indirect.limit,
                offset = cursor.offset(),
                "recursion limit exceeded"
            );
            return Err(Error::RecursionLimit {
                limit: indirect.limit,
            });
        }
        let _nested = Nested::enter(&indirect.depth);

        with_stack(|| {
            parser.go(cursor, &mut |cursor, out| {
                // The continuation belongs to whoever called this parser, so it isn't nested inside it.
                let _resumed = Resumed::leave(&indirect.depth);
                with_stack(|| sink(cursor, out))
            })
        })
    }
}

/// Construct a recursive parser (i.e: a parser that may contain itself as part of its pattern).
///
/// The given function must create the parser. The parser must not be used to parse input before this function returns.
///
/// # Examples
///
/// ```
/// # use cps_parse::prelude::*;
/// #[derive(Clone, Debug, PartialEq)]
/// enum Tree {
///     Leaf,
///     Branch(Vec<Tree>),
/// }
///
/// // Parser that recursively parses nested lists
/// let tree = recursive(|tree| {
///     just("[")
///         .ignore_then(tree.repeated())
///         .then_ignore(just("]"))
///         .map(Tree::Branch)
///         .or(just("x").to(Tree::Leaf))
/// });
///
/// assert_eq!(tree.parse_all("x").unwrap(), vec![Tree::Leaf]);
/// assert_eq!(
///     tree.then_ignore(end()).parse_all("[x[x]]").unwrap(),
///     vec![Tree::Branch(vec![Tree::Leaf, Tree::Branch(vec![Tree::Leaf])])],
/// );
/// ```
///
/// A left-recursive grammar never consumes input before calling itself again, so it fails fast:
///
/// ```
/// # use cps_parse::prelude::*;
/// let sum = recursive(|sum| sum.then_ignore(just("+1")).or(just("1")));
///
/// assert!(matches!(sum.parse_all("1+1"), Err(Error::RecursionLimit { .. })));
/// ```
pub fn recursive<'b, 'src, I, O, A, F>(f: F) -> Recursive<'b, 'src, I, O>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O> + 'b,
    F: FnOnce(Recursive<'b, 'src, I, O>) -> A,
{
    recursive_with_limit(DEFAULT_RECURSION_LIMIT, f)
}

/// Like [`recursive()`], but with a custom limit on how deeply the parser's invocations may be nested.
pub fn recursive_with_limit<'b, 'src, I, O, A, F>(limit: usize, f: F) -> Recursive<'b, 'src, I, O>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O> + 'b,
    F: FnOnce(Recursive<'b, 'src, I, O>) -> A,
{
    let rc = Rc::new_cyclic(|rc| {
        let parser = Recursive {
            inner: RecursiveInner::Unowned(rc.clone()),
        };
        Indirect {
            parser: OnceCell::from(Box::new(f(parser)) as Box<dyn Parser<'src, I, O> + 'b>),
            depth: Cell::new(0),
            limit,
        }
    });

    Recursive {
        inner: RecursiveInner::Owned(rc),
    }
}
