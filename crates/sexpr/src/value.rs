//! Value types with a dedicated S-expression shape.

use std::fmt;

/// An unquoted bare-word atom.
///
/// The text is written verbatim: no quoting and no escaping. Callers are
/// responsible for handing over something their Lisp reader accepts.
///
/// ```
/// use sexpr::Symbol;
///
/// assert_eq!(sexpr::to_string(&Symbol("1+")).unwrap(), "1+");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol<T = String>(pub T);

impl<T: AsRef<str>> Symbol<T> {
    /// The symbol's text.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol(text.to_string())
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol(text)
    }
}

impl<T: AsRef<str>> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dotted pair, rendered as `(car . cdr)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cons<A, B> {
    pub car: A,
    pub cdr: B,
}

impl<A, B> Cons<A, B> {
    pub fn new(car: A, cdr: B) -> Self {
        Self { car, cdr }
    }
}

impl<A, B> From<(A, B)> for Cons<A, B> {
    fn from((car, cdr): (A, B)) -> Self {
        Self { car, cdr }
    }
}

/// Pre-rendered S-expression text, spliced into the output as-is.
///
/// The bytes are not validated. Handy for fragments produced elsewhere, or
/// for values whose rendering is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Raw<T = Vec<u8>>(pub T);

impl<T: AsRef<[u8]>> Raw<T> {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}
