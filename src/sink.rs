//! The callbacks through which parsers report their alternatives.
//!
//! A parser never returns its output. Instead it is handed a [`Sink`] and calls it once per alternative, passing the
//! value along with the cursor the alternative stopped at. Whoever supplied the sink decides what happens next: a
//! combinator typically runs the rest of the grammar from that cursor, while the outermost sink usually just collects
//! or prints the value.
//!
//! A sink returns a [`PResult`] so that fatal errors raised deep inside the continuation travel back out through
//! every parser frame with `?`.

use super::*;

/// The continuation a parser invokes for each alternative it recognises.
///
/// The sink may be invoked zero, one, or many times. It receives the cursor as left by the alternative; it may advance
/// that cursor further (for example, by running the next parser of a sequence), which is never visible to sibling
/// alternatives because each of those is explored from its own copy.
pub type Sink<'s, 'src, I, O> = dyn FnMut(&mut Cursor<'src, I>, O) -> PResult + 's;

/// Adapt an output-only callback into a [`Sink`]-compatible closure that ignores cursors.
///
/// # Examples
///
/// ```
/// # use cps_parse::{prelude::*, sink::emit_to};
/// let mut words = Vec::new();
/// let mut cursor = Cursor::new("World");
/// just("Hello").or(just("World")).go(&mut cursor, &mut emit_to(|w| words.push(w))).unwrap();
/// assert_eq!(words, ["World"]);
/// ```
pub fn emit_to<'src, I, O, F>(mut f: F) -> impl FnMut(&mut Cursor<'src, I>, O) -> PResult
where
    I: ?Sized + Input,
    F: FnMut(O),
{
    move |_, out| {
        f(out);
        Ok(())
    }
}
