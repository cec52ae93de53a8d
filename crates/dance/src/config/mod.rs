//! Command-line configuration.
//!
//! Every flag defaults to the reference animation; the engine's config structs are
//! built from the parsed values.

mod cli;

pub use cli::Cli;
