//! The `Encode` capability and the category each value classifies as.
//!
//! Every encodable type answers one question: which S-expression category am
//! I? The [`Encoder`](crate::Encoder) then renders the answer with a single
//! exhaustive match, recursing through the borrowed sub-values a category
//! carries.

use crate::error::RenderError;
use crate::record::Record;
use crate::value::{Cons, Raw, Symbol};
use std::any::type_name;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

/// A value that supplies its own S-expression text.
///
/// The returned bytes are spliced into the output without validation or
/// escaping. An error aborts the whole encode and is returned unchanged.
///
/// Opt in by also implementing [`Encode`] with [`Category::Custom`]:
///
/// ```
/// use sexpr::{Category, Encode, Render, RenderError};
///
/// struct Party;
///
/// impl Render for Party {
///     fn render_sexp(&self) -> Result<Vec<u8>, RenderError> {
///         Ok(b"(kokkoro peco kyaru)".to_vec())
///     }
/// }
///
/// impl Encode for Party {
///     fn classify(&self) -> Category<'_> {
///         Category::Custom(self)
///     }
/// }
///
/// assert_eq!(sexpr::to_string(&Party).unwrap(), "(kokkoro peco kyaru)");
/// ```
pub trait Render {
    fn render_sexp(&self) -> Result<Vec<u8>, RenderError>;
}

/// A value that can be encoded as an S-expression.
pub trait Encode {
    /// Decide how this value is rendered.
    fn classify(&self) -> Category<'_>;
}

/// The rendering rule that applies to a value.
///
/// Variants are listed in dispatch priority order. A type that could fit
/// several categories must classify as the first one that applies; a
/// renderable record, for instance, is `Custom`, never `Record`.
///
/// References have no variant of their own: `&T`, `Box<T>`, `Rc<T>` and
/// `Arc<T>` classify as their referent, and `Option<T>` does the same for
/// `Some`. An absent referent classifies as [`Category::Null`].
pub enum Category<'a> {
    /// Self-rendered text, copied verbatim.
    Custom(&'a dyn Render),
    /// Base-10 integer.
    Integer(Integer),
    /// Floating-point number in shortest general form.
    Float(Float),
    /// Bare word, written verbatim.
    Symbol(&'a str),
    /// Double-quoted, escaped string literal.
    Str(&'a str),
    /// `(car . cdr)`.
    Pair(&'a dyn Encode, &'a dyn Encode),
    /// Missing referent; encoding fails with the named type.
    Null(&'static str),
    /// `(a b c)`, or `()` when empty.
    Seq(Box<dyn Iterator<Item = &'a dyn Encode> + 'a>),
    /// Association or property list, per the record's descriptor.
    Record(&'a dyn Record),
    /// No rendering exists; encoding fails with the named type.
    Unsupported(&'static str),
}

impl Category<'_> {
    /// Short category name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Category::Custom(_) => "custom",
            Category::Integer(_) => "integer",
            Category::Float(_) => "float",
            Category::Symbol(_) => "symbol",
            Category::Str(_) => "string",
            Category::Pair(..) => "pair",
            Category::Null(_) => "null",
            Category::Seq(_) => "sequence",
            Category::Record(_) => "record",
            Category::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Debug for Category<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Integer(n) => write!(f, "Integer({n})"),
            Category::Float(x) => write!(f, "Float({x:?})"),
            Category::Symbol(s) => write!(f, "Symbol({s:?})"),
            Category::Str(s) => write!(f, "Str({s:?})"),
            Category::Null(ty) => write!(f, "Null({ty})"),
            Category::Unsupported(ty) => write!(f, "Unsupported({ty})"),
            other => f.write_str(other.kind()),
        }
    }
}

/// An integer of any width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Signed(i128),
    Unsigned(u128),
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Signed(n) => write!(f, "{n}"),
            Integer::Unsigned(n) => write!(f, "{n}"),
        }
    }
}

/// A float, keeping its precision so shortest digits are computed at the
/// right width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    pub fn is_finite(self) -> bool {
        match self {
            Float::F32(x) => x.is_finite(),
            Float::F64(x) => x.is_finite(),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Float::F32(x) => f64::from(x),
            Float::F64(x) => x,
        }
    }
}

macro_rules! impl_signed {
    ($($ty:ty)*) => {
        $(
            impl Encode for $ty {
                fn classify(&self) -> Category<'_> {
                    Category::Integer(Integer::Signed(*self as i128))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty)*) => {
        $(
            impl Encode for $ty {
                fn classify(&self) -> Category<'_> {
                    Category::Integer(Integer::Unsigned(*self as u128))
                }
            }
        )*
    };
}

impl_signed!(i8 i16 i32 i64 i128 isize);
impl_unsigned!(u8 u16 u32 u64 u128 usize);

impl Encode for f32 {
    fn classify(&self) -> Category<'_> {
        Category::Float(Float::F32(*self))
    }
}

impl Encode for f64 {
    fn classify(&self) -> Category<'_> {
        Category::Float(Float::F64(*self))
    }
}

impl<T: AsRef<str>> Encode for Symbol<T> {
    fn classify(&self) -> Category<'_> {
        Category::Symbol(self.as_str())
    }
}

impl Encode for str {
    fn classify(&self) -> Category<'_> {
        Category::Str(self)
    }
}

impl Encode for String {
    fn classify(&self) -> Category<'_> {
        Category::Str(self)
    }
}

impl Encode for Cow<'_, str> {
    fn classify(&self) -> Category<'_> {
        Category::Str(self)
    }
}

impl<A: Encode, B: Encode> Encode for Cons<A, B> {
    fn classify(&self) -> Category<'_> {
        Category::Pair(&self.car, &self.cdr)
    }
}

impl<T: AsRef<[u8]>> Render for Raw<T> {
    fn render_sexp(&self) -> Result<Vec<u8>, RenderError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl<T: AsRef<[u8]>> Encode for Raw<T> {
    fn classify(&self) -> Category<'_> {
        Category::Custom(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn classify(&self) -> Category<'_> {
        (**self).classify()
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn classify(&self) -> Category<'_> {
        (**self).classify()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn classify(&self) -> Category<'_> {
        (**self).classify()
    }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    fn classify(&self) -> Category<'_> {
        (**self).classify()
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn classify(&self) -> Category<'_> {
        (**self).classify()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn classify(&self) -> Category<'_> {
        match self {
            Some(value) => value.classify(),
            None => Category::Null(type_name::<T>()),
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn classify(&self) -> Category<'_> {
        Category::Seq(Box::new(self.iter().map(|v| v as &dyn Encode)))
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn classify(&self) -> Category<'_> {
        self.as_slice().classify()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn classify(&self) -> Category<'_> {
        self.as_slice().classify()
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn classify(&self) -> Category<'_> {
        Category::Seq(Box::new(self.iter().map(|v| v as &dyn Encode)))
    }
}

macro_rules! impl_tuple {
    ($($name:ident)+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn classify(&self) -> Category<'_> {
                let ($($name,)+) = self;
                Category::Seq(Box::new([$($name as &dyn Encode),+].into_iter()))
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A B);
impl_tuple!(A B C);
impl_tuple!(A B C D);
impl_tuple!(A B C D E);
impl_tuple!(A B C D E F);
impl_tuple!(A B C D E F G);
impl_tuple!(A B C D E F G H);

macro_rules! impl_unsupported {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn classify(&self) -> Category<'_> {
                    Category::Unsupported(type_name::<Self>())
                }
            }
        )*
    };
}

// No canonical rendering; these fail at encode time with their type name.
impl_unsupported!(bool, char, ());

impl<T> Encode for Sender<T> {
    fn classify(&self) -> Category<'_> {
        Category::Unsupported(type_name::<Self>())
    }
}

impl<T> Encode for Receiver<T> {
    fn classify(&self) -> Category<'_> {
        Category::Unsupported(type_name::<Self>())
    }
}
