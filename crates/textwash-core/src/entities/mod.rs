//! Per-document entity state
//!
//! Classifier spans are cleaned into an insertion-ordered entity map, which
//! the alias allocator numbers per label. Both live only as long as the
//! document being processed.

mod alias;
mod canonical;

pub use alias::AliasTable;
pub use canonical::{canonicalize, clean_phrase, Entity, EntityFilter, EntityMap};
