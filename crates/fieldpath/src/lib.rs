//! Keel field paths: navigate and mutate semi-structured documents by string
//! path expressions like `spec.items[2].name`.
//!
//! Documents are plain `serde_json::Value` trees with no compile-time schema.
//! Typed code crosses into them through an explicit decode boundary
//! ([`get_into`]) that can fail, and writes through [`set_value`], which
//! creates intermediate objects but never creates or grows arrays.

#![forbid(unsafe_code)]

mod path;
mod paved;

pub use path::{Path, Segment};
pub use paved::{delete_value, get_into, resolve, set_value, Paved};

/// Errors returned by field-path operations.
///
/// The variants call for different recovery policies: `Syntax` and `Invalid`
/// are caller bugs and fatal to the call, `NotFound` is ordinary absence that
/// callers may default over, and `Decode` means the stored shape is
/// incompatible with the requested type and must never be defaulted silently.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid path {path:?}: {reason}")]
    Syntax { path: String, reason: String },
    #[error("no value at {path}")]
    NotFound { path: String },
    #[error("cannot decode value at {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write {path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl Error {
    /// True when this error only signals an absent value. Call sites that
    /// treat absence as "no value set, use a default" branch on this.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
