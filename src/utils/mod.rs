//! Path helpers shared by the resolver, the config loader and the CLI.

pub mod paths;

pub use paths::{display_chain, normalize_path};
