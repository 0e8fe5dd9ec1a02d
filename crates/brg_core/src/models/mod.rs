//! Shared option types.
//!
//! Enums that select between pipeline behaviors. They are plain values
//! so they can live in the TOML config and be passed around freely.

mod enums;

pub use enums::{MalformedDocumentPolicy, RowErrorPolicy, SchemaMode};
