//! Streaming encoder and top-level dispatch.

use crate::atom;
use crate::config::{EncoderConfig, NonFiniteFloats};
use crate::encode::{Category, Encode, Float};
use crate::error::{Error, Result};
use std::io;

/// Encodes values as S-expressions into a byte sink.
///
/// Successive calls append to the same sink. The first failure is terminal:
/// it is stored, and every later call returns it again without writing.
/// Bytes written before a failure stay in the sink.
///
/// ```
/// use sexpr::{Cons, Encoder, Symbol};
///
/// let mut out = Vec::new();
/// let mut encoder = Encoder::new(&mut out);
/// encoder.encode(&Cons::new(Symbol("a"), 1)).unwrap();
/// encoder.encode(&[1.5, 2.0]).unwrap();
/// assert_eq!(out, b"(a . 1)(1.5 2)");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    config: EncoderConfig,
    error: Option<Error>,
}

impl<W: io::Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, EncoderConfig::default())
    }

    pub fn with_config(writer: W, config: EncoderConfig) -> Self {
        Self {
            writer,
            config,
            error: None,
        }
    }

    /// Encode one value, appending its text to the sink.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let result = self.emit(value.classify(), 0);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "sexp encoder failed");
            self.error = Some(err.clone());
        }
        result
    }

    /// The failure that ended this encoder, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub(crate) fn emit(&mut self, category: Category<'_>, depth: usize) -> Result<()> {
        match category {
            Category::Custom(value) => {
                let text = value.render_sexp()?;
                self.write(&text)
            }
            Category::Integer(n) => Ok(write!(self.writer, "{n}")?),
            Category::Float(x) => self.emit_float(x),
            Category::Symbol(text) => self.write(text.as_bytes()),
            Category::Str(text) => Ok(atom::write_quoted(&mut self.writer, text)?),
            Category::Pair(car, cdr) => self.emit_pair(car, cdr, depth),
            Category::Null(type_name) => Err(Error::NullReference(type_name)),
            Category::Seq(items) => self.emit_seq(items, depth),
            Category::Record(record) => self.emit_record(record, depth),
            Category::Unsupported(type_name) => Err(Error::Unsupported(type_name)),
        }
    }

    pub(crate) fn emit_pair(
        &mut self,
        car: &dyn Encode,
        cdr: &dyn Encode,
        depth: usize,
    ) -> Result<()> {
        let depth = self.enter(depth)?;
        self.write(b"(")?;
        self.emit(car.classify(), depth)?;
        self.write(b" . ")?;
        self.emit(cdr.classify(), depth)?;
        self.write(b")")
    }

    fn emit_seq<'a>(
        &mut self,
        items: Box<dyn Iterator<Item = &'a dyn Encode> + 'a>,
        depth: usize,
    ) -> Result<()> {
        let depth = self.enter(depth)?;
        self.write(b"(")?;
        for (n, item) in items.enumerate() {
            if n > 0 {
                self.write(b" ")?;
            }
            self.emit(item.classify(), depth)?;
        }
        self.write(b")")
    }

    fn emit_float(&mut self, value: Float) -> Result<()> {
        if value.is_finite() {
            return self.write(atom::format_float(value).as_bytes());
        }
        match self.config.non_finite() {
            NonFiniteFloats::Elisp => {
                self.write(atom::non_finite_literal(value.to_f64()).as_bytes())
            }
            NonFiniteFloats::Reject => Err(Error::NonFinite(value.to_f64())),
        }
    }

    /// Descend into a container, returning the nested depth.
    pub(crate) fn enter(&self, depth: usize) -> Result<usize> {
        let limit = self.config.max_depth();
        if depth >= limit {
            return Err(Error::DepthLimit(limit));
        }
        Ok(depth + 1)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.writer.write_all(bytes)?)
    }
}
