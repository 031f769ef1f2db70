//! Encode Rust values as S-expressions.
//!
//! `sexpr` renders in-memory values in the parenthesized notation read by
//! Lisp-family languages: numbers, quoted strings, bare symbols, dotted
//! pairs, lists, and records as association or property lists. It only
//! writes; there is no reader.
//!
//! # Rendering rules
//!
//! | Value                                   | Output                       |
//! |-----------------------------------------|------------------------------|
//! | integers of any width                   | `-42`                        |
//! | `f32`, `f64`                            | `4.25`, `1e+06`              |
//! | [`Symbol`]                              | `1+` (verbatim)              |
//! | `str`, `String`                         | `"say \"hi\""`               |
//! | [`Cons`]                                | `(1 . 2)`                    |
//! | `&T`, `Box<T>`, `Rc<T>`, `Arc<T>`, `Some(T)` | whatever `T` renders as |
//! | slices, arrays, `Vec`, `VecDeque`, tuples | `(5 "shiori")`, `()`       |
//! | records (`#[derive(Record)]`)           | `((Name . "yui"))` or `(Name "yui")` |
//! | [`Render`] implementors, [`Raw`]        | their own bytes, verbatim    |
//!
//! `None`, `bool`, `char`, `()` and channel handles have no rendering and
//! fail the encode.
//!
//! # Example
//!
//! ```
//! use sexpr::{Cons, Record, Symbol};
//!
//! #[derive(Record)]
//! struct Member {
//!     pub name: String,
//!     #[sexp(name = "role")]
//!     pub position: Symbol<&'static str>,
//!     pub levels: Vec<u32>,
//!     notes: String,
//! }
//!
//! #[derive(Record)]
//! #[sexp(coding = "plist")]
//! struct Guild {
//!     pub title: &'static str,
//!     pub leader: Member,
//! }
//!
//! let guild = Guild {
//!     title: "Gourmet Edifice",
//!     leader: Member {
//!         name: "Pecorine".into(),
//!         position: Symbol("vanguard"),
//!         levels: vec![1, 2],
//!         notes: "hungry".into(),
//!     },
//! };
//!
//! assert_eq!(
//!     sexpr::to_string(&guild).unwrap(),
//!     r#"(title "Gourmet Edifice" leader ((name . "Pecorine") (role . vanguard) (levels . (1 2))))"#,
//! );
//! assert_eq!(sexpr::to_string(&Cons::new(Symbol("x"), 1.5)).unwrap(), "(x . 1.5)");
//! ```
//!
//! # Errors
//!
//! The first failure ends an encode call. Output already written to the
//! sink is not retracted, and an [`Encoder`] that failed keeps returning the
//! same [`Error`].

mod atom;
mod config;
mod encode;
mod encoder;
mod error;
mod record;
mod value;

pub use config::{DEFAULT_MAX_DEPTH, EncoderConfig, NonFiniteFloats};
pub use encode::{Category, Encode, Float, Integer, Render};
pub use encoder::Encoder;
pub use error::{Error, RenderError, Result};
pub use record::{
    Coding, FieldDescriptor, ParseCodingError, Record, RecordDescriptor, RecordDescriptorBuilder,
};
pub use sexpr_derive::Record;
pub use value::{Cons, Raw, Symbol};

use std::io;

/// Encode `value` into a fresh byte buffer.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    Encoder::new(&mut out).encode(value)?;
    Ok(out)
}

/// Encode `value` into a `String`.
///
/// Fails with [`Error::Utf8`] if a [`Render`] implementation produced bytes
/// that are not UTF-8.
pub fn to_string<T: Encode + ?Sized>(value: &T) -> Result<String> {
    String::from_utf8(to_vec(value)?).map_err(Error::Utf8)
}

/// Encode `value` into `writer`.
pub fn to_writer<W: io::Write, T: Encode + ?Sized>(writer: W, value: &T) -> Result<()> {
    Encoder::new(writer).encode(value)
}
