//! Core resolution engine.
//!
//! Data flows bottom-up:
//!
//! ```text
//! raw entries ──► TypedPropertyTable ──► ResolutionProxy::resolve(key, args) ──► Value
//!                      ▲                          ▲
//!                 SchemaProvider            DiagnosticSink
//! ```
//!
//! ## Module Structure
//!
//! - `value`: `Value` and `DeclaredType`
//! - `schema`: `SchemaProvider` trait and the in-memory `Schema`
//! - `split`: escaped-comma splitting for arrays and map sub-keys
//! - `table`: `TypedPropertyTable` and its load grammar
//! - `resolve`: `ResolutionProxy` and per-key descriptors
//! - `format`: positional message patterns
//! - `diagnostics`: unresolved-key sinks
//! - `facade`: `FromValue` and the `constants!` accessor generator
//! - `parsers`: raw line sources

pub mod diagnostics;
pub mod error;
pub mod facade;
pub mod format;
pub mod parsers;
pub mod resolve;
pub mod schema;
pub mod split;
pub mod table;
pub mod value;

pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink, UnresolvedKey};
pub use error::{LoadError, ResolveError, SchemaError};
pub use facade::{FromValue, IntoDefault, resolve_as};
pub use format::{MessagePattern, PatternError, format_message};
pub use resolve::{ResolutionDescriptor, ResolutionProxy};
pub use schema::{Schema, SchemaEntry, SchemaProvider, SharedSchema};
pub use split::split_unescaped_commas;
pub use table::{RawEntry, TypedPropertyTable};
pub use value::{DeclaredType, Value, ValueKind};
