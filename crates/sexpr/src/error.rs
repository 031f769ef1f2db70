//! Errors produced while encoding S-expressions.

use std::io;
use std::string::FromUtf8Error;
use std::sync::Arc;

/// Error returned by a [`Render`](crate::Render) implementation.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failure of an encode call.
///
/// Errors are cheap to clone so an [`Encoder`](crate::Encoder) can hand the
/// same failure back on every call after the first one fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The value belongs to a category with no S-expression rendering.
    #[error("sexp encode: unsupported type {0}")]
    Unsupported(&'static str),

    /// A record's coding marker is neither `alist` nor `plist`.
    #[error("sexp encode: struct {type_name} with bad coding tag {tag}")]
    BadCoding { type_name: String, tag: String },

    /// An optional reference was empty where a referent was expected.
    #[error("sexp encode: null reference to {0}")]
    NullReference(&'static str),

    /// A record descriptor lists a visible field the record cannot supply.
    #[error("sexp encode: struct {type_name} has no value for field {field}")]
    MissingField { type_name: String, field: String },

    /// Containers nested deeper than the configured limit.
    #[error("sexp encode: nesting exceeds depth limit {0}")]
    DepthLimit(usize),

    /// A NaN or infinite float under [`NonFiniteFloats::Reject`](crate::NonFiniteFloats::Reject).
    #[error("sexp encode: non-finite float {0}")]
    NonFinite(f64),

    /// The output sink rejected a write.
    #[error(transparent)]
    Io(Arc<io::Error>),

    /// A custom renderer failed.
    #[error(transparent)]
    Render(Arc<dyn std::error::Error + Send + Sync>),

    /// [`to_string`](crate::to_string) produced bytes that are not UTF-8.
    #[error("sexp encode: output is not valid UTF-8")]
    Utf8(#[source] FromUtf8Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::Render(Arc::from(err))
    }
}
