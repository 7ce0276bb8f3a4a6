//! Runs two small grammars over fixed inputs and prints every parse found.
//!
//! Set `RUST_LOG=trace` to watch the parsers explore their alternatives.

use cps_parse::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let hello_or_world = just("Hello").or(just("World")).labelled("hello_or_world");
    for input in ["World", "Hello", "Goodbye"] {
        tracing::info!(input, "parsing with hello_or_world");
        hello_or_world.parse_with(input, |s| println!("{s}"))?;
    }

    let hello_world = just("Hello")
        .then(just("World"))
        .map(|(a, b)| [a, b].concat())
        .labelled("hello_world");
    for input in ["HelloWorld", "Goodbye"] {
        tracing::info!(input, "parsing with hello_world");
        let mut found = false;
        hello_world.parse_with(input, |s| {
            found = true;
            println!("{s}");
        })?;
        if !found {
            tracing::info!(input, "no parse");
        }
    }

    Ok(())
}
