//! A small module that implements the [`Parser`](Parser) trait for the
//! [`either::Either`](https://docs.rs/either/latest/either/enum.Either.html) type.

use either::Either;

use crate::{Cursor, Input, PResult, Parser, Sink};

impl<'src, L, R, I, O> Parser<'src, I, O> for Either<L, R>
where
    I: ?Sized + Input,
    L: Parser<'src, I, O>,
    R: Parser<'src, I, O>,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        match self {
            Either::Left(l) => l.go(cursor, sink),
            Either::Right(r) => r.go(cursor, sink),
        }
    }
}
