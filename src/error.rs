//! Error types.
//!
//! Failing to match is not an error: a parser that does not match simply never invokes its sink. The variants here
//! are fatal conditions that abort the entire parse and are returned from the top-level call.

use thiserror::Error as ThisError;

/// A fatal condition that aborted a parse.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// A function passed to [`Parser::try_map`](crate::Parser::try_map) returned an error.
    #[error("transform failed: {0}")]
    Transform(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The invocations of a [`Recursive`](crate::recursive::Recursive) parser were nested deeper than its limit
    /// allows. An invocation is nested inside another when it runs before the other has yielded anything, so this is
    /// raised by left-recursive grammars and by input nested deeper than the limit, but never by long flat input.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit {
        /// The limit that was exceeded.
        limit: usize,
    },

    /// A [`Recursive`](crate::recursive::Recursive) parser was run before it was defined.
    #[error("recursive parser used before being defined")]
    Undefined,
}

impl Error {
    /// Wrap the error produced by a transform function.
    pub fn transform(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transform(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_display_and_source() {
        let inner = "x".parse::<u8>().unwrap_err();
        let error = Error::transform(inner.clone());

        assert_eq!(error.to_string(), format!("transform failed: {inner}"));
        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), inner.to_string());
    }

    #[test]
    fn recursion_limit_display() {
        let error = Error::RecursionLimit { limit: 16 };
        assert_eq!(error.to_string(), "recursion limit of 16 exceeded");
    }
}
