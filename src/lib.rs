//! Proptable - schema-driven typed property tables
//!
//! Proptable loads `.properties` key/value text into a table whose values are
//! cast to the types a schema declares, and resolves logical keys against it
//! with schema defaults, unresolved-key diagnostics and `{0}`-style message
//! formatting. The `proptable` binary checks property files and resolves
//! keys from the command line.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`check`, `get`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Typed table, resolution proxy and typed accessors
//! - `issues`: Issue type definitions and reporting
//! - `logging`: `tracing` subscriber setup for the binary

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
