//! Items related to parser labelling.
//!
//! Labels exist for tracing. A labelled parser opens a `trace`-level span named after its label whenever it runs, and
//! records an event for every alternative it yields. Because parsing is continuation-passing, everything that runs
//! after one of those alternatives (the rest of the grammar) runs inside the span as well.

use super::*;

/// See [`Parser::labelled`].
#[derive(Copy, Clone)]
pub struct Labelled<A, L> {
    pub(crate) parser: A,
    pub(crate) label: L,
}

impl<A, L> Labelled<A, L> {
    /// The label attached to this parser.
    pub fn label(&self) -> &L {
        &self.label
    }
}

impl<'src, I, O, A, L> Parser<'src, I, O> for Labelled<A, L>
where
    I: ?Sized + Input,
    A: Parser<'src, I, O>,
    L: fmt::Display,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        let span = tracing::trace_span!("parser", label = %self.label, start = cursor.offset());
        let _entered = span.enter();
        self.parser.go(cursor, &mut |cursor, out| {
            tracing::trace!(end = cursor.offset(), "alternative");
            sink(cursor, out)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn labelled_is_transparent() {
        let greeting = just("Hello").or(just("Hell")).labelled("greeting");
        assert_eq!(greeting.label(), &"greeting");
        assert_eq!(greeting.parse_all("Hello").unwrap(), vec!["Hello", "Hell"]);
        assert!(greeting.parse_all("Goodbye").unwrap().is_empty());
    }
}
