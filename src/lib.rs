#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

/// Implementations of [`Parser`] for references and smart pointers.
mod blanket;
/// Combinators that allow combining and extending existing parsers.
pub mod combinator;
#[cfg(feature = "either")]
mod either;
/// Error types.
pub mod error;
/// Input buffers and the cursors that walk them.
pub mod input;
/// Items related to parser labelling.
pub mod label;
/// Parser primitives that accept specific patterns.
pub mod primitive;
/// Recursive parsers (parser that include themselves within their patterns).
pub mod recursive;
/// The callbacks through which parsers report their alternatives.
pub mod sink;
mod stack;

pub use crate::{
    error::Error,
    input::{Cursor, Input, Literal},
    sink::Sink,
};

use crate::{combinator::*, label::Labelled};

use core::{fmt, marker::PhantomData};
use std::rc::Rc;

/// Commonly used functions, traits and types.
pub mod prelude {
    pub use super::{
        combinator::{choice, Boxed},
        error::Error,
        input::{Cursor, Input},
        primitive::{custom, empty, end, fail, just},
        recursive::{recursive, Recursive},
        sink::Sink,
        PResult, Parser,
    };
}

/// The result of running a parser.
///
/// `Ok(())` says nothing about whether the parser matched: a parser that found no alternatives simply never invoked
/// its sink. `Err` is reserved for fatal conditions that abort the whole parse.
pub type PResult = Result<(), Error>;

/// A trait implemented by parsers.
///
/// Parsers are written in continuation-passing style. Rather than returning a value, a parser calls the [`Sink`] it
/// is given once for every alternative it recognises at the cursor's position, handing over the value together with
/// the cursor that alternative left behind. A parser that recognises nothing returns without calling the sink at all.
/// Every alternative is explored: the combinators backtrack by copying cursors, so the order in which the sink is
/// invoked is depth-first and left-to-right.
///
/// Parsers hold no mutable state of their own, so a parser may be run any number of times over any number of inputs.
pub trait Parser<'src, I: ?Sized + Input, O> {
    /// Run this parser starting at `cursor`, invoking `sink` for each alternative found.
    ///
    /// This is the only required method, and it is the one you implement to write your own parsers. The parser may
    /// advance `cursor`; callers that want to explore siblings from the same position must pass a copy.
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult;

    /// Run this parser from the start of `input`, passing every output to `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let greeting = just("Hello").or(just("World"));
    ///
    /// let mut seen = Vec::new();
    /// greeting.parse_with("World", |s| seen.push(s)).unwrap();
    /// assert_eq!(seen, ["World"]);
    /// ```
    fn parse_with<F>(&self, input: &'src I, f: F) -> PResult
    where
        Self: Sized,
        F: FnMut(O),
    {
        self.parse_from(&mut Cursor::new(input), f)
    }

    /// Run this parser from an existing cursor, passing every output to `f`.
    ///
    /// The cursor is left wherever the parse left it.
    fn parse_from<F>(&self, cursor: &mut Cursor<'src, I>, mut f: F) -> PResult
    where
        Self: Sized,
        F: FnMut(O),
    {
        self.go(cursor, &mut |_, out| {
            f(out);
            Ok(())
        })
    }

    /// Run this parser over `input` and collect every alternative it produces, in the order it produced them.
    ///
    /// An empty vector means the input was not recognised.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let ab = just("a").or(just("ab")).then_ignore(just("b").ignored().or(empty()));
    ///
    /// assert_eq!(ab.parse_all("ab").unwrap(), vec!["a", "a", "ab"]);
    /// ```
    fn parse_all(&self, input: &'src I) -> Result<Vec<O>, Error>
    where
        Self: Sized,
    {
        let mut outputs = Vec::new();
        self.parse_with(input, |out| outputs.push(out))?;
        Ok(outputs)
    }

    /// Run this parser over `input` and keep only the first alternative it produces.
    ///
    /// The remaining alternatives are still explored, so a fatal error raised by any of them is still returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let word = just("do").or(just("done"));
    ///
    /// assert_eq!(word.parse_first("done").unwrap(), Some("do"));
    /// assert_eq!(word.parse_first("undo").unwrap(), None);
    /// ```
    fn parse_first(&self, input: &'src I) -> Result<Option<O>, Error>
    where
        Self: Sized,
    {
        let mut first = None;
        self.parse_with(input, |out| {
            if first.is_none() {
                first = Some(out);
            }
        })?;
        Ok(first)
    }

    /// Run this parser over `input` and count the alternatives it produces.
    fn count(&self, input: &'src I) -> Result<usize, Error>
    where
        Self: Sized,
    {
        let mut count = 0;
        self.parse_with(input, |_| count += 1)?;
        Ok(count)
    }

    /// Parse one thing and then another thing, yielding a tuple of the two outputs.
    ///
    /// Every alternative of this parser is paired with every alternative `other` finds from where that alternative
    /// stopped. The output of this parser must be [`Clone`] because one output may be paired with many.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let hello_world = just("Hello").then(just("World"));
    ///
    /// assert_eq!(hello_world.parse_all("HelloWorld").unwrap(), vec![("Hello", "World")]);
    /// assert!(hello_world.parse_all("Goodbye").unwrap().is_empty());
    /// ```
    fn then<B, OB>(self, other: B) -> Then<Self, B, O, OB>
    where
        Self: Sized,
        B: Parser<'src, I, OB>,
        O: Clone,
    {
        Then {
            parser_a: self,
            parser_b: other,
            phantom: PhantomData,
        }
    }

    /// Parse one thing and then another thing, yielding only the output of the latter.
    fn ignore_then<B, OB>(self, other: B) -> IgnoreThen<Self, B, O>
    where
        Self: Sized,
        B: Parser<'src, I, OB>,
    {
        IgnoreThen {
            parser_a: self,
            parser_b: other,
            phantom: PhantomData,
        }
    }

    /// Parse one thing and then another thing, yielding only the output of the former.
    fn then_ignore<B, OB>(self, other: B) -> ThenIgnore<Self, B, OB>
    where
        Self: Sized,
        B: Parser<'src, I, OB>,
        O: Clone,
    {
        ThenIgnore {
            parser_a: self,
            parser_b: other,
            phantom: PhantomData,
        }
    }

    /// Explore both this parser and `other` from the same position, yielding the alternatives of both.
    ///
    /// This is symmetric choice: `other` runs whether or not this parser found anything, and both start from the
    /// original cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let word = just("do").or(just("done"));
    ///
    /// assert_eq!(word.parse_all("done").unwrap(), vec!["do", "done"]);
    /// assert_eq!(word.then_ignore(end()).parse_all("done").unwrap(), vec!["done"]);
    /// ```
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        Self: Sized,
        B: Parser<'src, I, O>,
    {
        Or {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Try this parser, falling back to `other` only if this parser found no alternatives at all.
    ///
    /// This is biased choice. It relies on parsing being synchronous: every alternative of this parser has been
    /// delivered by the time it returns, so whether to try `other` is known before it would be run.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let word = just("do").or_else(just("done"));
    ///
    /// assert_eq!(word.parse_all("done").unwrap(), vec!["do"]);
    /// assert_eq!(word.parse_all("undone").unwrap(), Vec::<&str>::new());
    /// ```
    fn or_else<B>(self, other: B) -> OrElse<Self, B>
    where
        Self: Sized,
        B: Parser<'src, I, O>,
    {
        OrElse {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Map the output of this parser to another value.
    ///
    /// The function is applied once per alternative. A panic inside it is not caught.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let greeting = just("Hello")
    ///     .then(just("World"))
    ///     .map(|(a, b)| format!("{a}{b}"));
    ///
    /// assert_eq!(greeting.parse_all("HelloWorld").unwrap(), vec!["HelloWorld".to_string()]);
    /// ```
    fn map<U, F>(self, f: F) -> Map<Self, O, F>
    where
        Self: Sized,
        F: Fn(O) -> U,
    {
        Map {
            parser: self,
            mapper: f,
            phantom: PhantomData,
        }
    }

    /// Map the output of this parser with a fallible function.
    ///
    /// An error returned by the function is fatal: it aborts the whole parse with [`Error::Transform`] instead of
    /// being treated as a failure to match.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let byte = just("255")
    ///     .or(just("256"))
    ///     .try_map(|s: &str| s.parse::<u8>());
    ///
    /// assert_eq!(byte.parse_all("255").unwrap(), vec![255]);
    /// assert!(matches!(byte.parse_all("256"), Err(Error::Transform(_))));
    /// ```
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, O, F>
    where
        Self: Sized,
        F: Fn(O) -> Result<U, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        TryMap {
            parser: self,
            mapper: f,
            phantom: PhantomData,
        }
    }

    /// Replace the output of this parser with a clone of `to`.
    fn to<U: Clone>(self, to: U) -> To<Self, O, U>
    where
        Self: Sized,
    {
        To {
            parser: self,
            to,
            phantom: PhantomData,
        }
    }

    /// Discard the output of this parser.
    fn ignored(self) -> Ignored<Self, O>
    where
        Self: Sized,
    {
        Ignored {
            parser: self,
            phantom: PhantomData,
        }
    }

    /// Keep only the alternatives whose output satisfies `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let short = just("a").or(just("aa")).or(just("aaa")).filter(|s: &&str| s.len() < 3);
    ///
    /// assert_eq!(short.parse_all("aaa").unwrap(), vec!["a", "aa"]);
    /// ```
    fn filter<F>(self, f: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&O) -> bool,
    {
        Filter {
            parser: self,
            filter: f,
        }
    }

    /// Optionally parse this pattern, yielding `Some` for each alternative and then `None` for skipping it.
    fn or_not(self) -> OrNot<Self>
    where
        Self: Sized,
    {
        OrNot { parser: self }
    }

    /// Parse this pattern any number of times, yielding the outputs of every possible number of repetitions.
    ///
    /// Shorter repetitions are yielded first. A repetition that consumes no input ends the sequence, so a pattern
    /// that can match the empty string does not loop forever.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cps_parse::prelude::*;
    /// let xs = just("x").repeated().then_ignore(end());
    ///
    /// assert_eq!(xs.parse_all("xx").unwrap(), vec![vec!["x", "x"]]);
    /// assert_eq!(just("x").repeated().count("xx").unwrap(), 3);
    /// ```
    fn repeated(self) -> Repeated<Self, O>
    where
        Self: Sized,
        O: Clone,
    {
        Repeated {
            parser: self,
            phantom: PhantomData,
        }
    }

    /// Label this parser, tracing its entry and every alternative it yields under the given name.
    fn labelled<L>(self, label: L) -> Labelled<Self, L>
    where
        Self: Sized,
        L: fmt::Display,
    {
        Labelled {
            parser: self,
            label,
        }
    }

    /// Box the parser behind a reference-counted pointer, yielding a parser that can be cheaply cloned and shared
    /// between many parent parsers.
    ///
    /// Boxing also erases the parser's type, which keeps the types of large grammars manageable.
    fn boxed<'b>(self) -> Boxed<'b, 'src, I, O>
    where
        Self: Sized + 'b,
    {
        Boxed {
            inner: Rc::new(self),
        }
    }
}
