//! Records: composites with named fields, rendered as alists or plists.
//!
//! A record describes its shape once, through a [`RecordDescriptor`], and
//! hands out field values by declaration index. `#[derive(Record)]` builds
//! both halves; the builder below is for hand-written implementations.
//!
//! ```text
//! alist  ((key1 . val1) (key2 . val2))
//! plist  (key1 val1 key2 val2)
//! ```

use crate::encode::Encode;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::value::Symbol;
use std::borrow::Cow;
use std::io;
use std::str::FromStr;

/// A composite value with named fields.
pub trait Record {
    /// Shape of the record. Implementations return the same descriptor for
    /// every value of a type.
    fn descriptor(&self) -> &RecordDescriptor;

    /// Value of the field at `index` in declaration order.
    ///
    /// Never called for fields the descriptor marks private, so those may
    /// return `None`.
    fn field(&self, index: usize) -> Option<&dyn Encode>;
}

/// Record rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Coding {
    /// `((key . value) ...)`
    #[default]
    Alist,
    /// `(key value ...)`
    Plist,
}

impl Coding {
    pub fn as_str(self) -> &'static str {
        match self {
            Coding::Alist => "alist",
            Coding::Plist => "plist",
        }
    }
}

/// A coding marker other than `alist` or `plist`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coding tag {0:?}, expected \"alist\" or \"plist\"")]
pub struct ParseCodingError(pub String);

impl FromStr for Coding {
    type Err = ParseCodingError;

    /// Only the exact keywords are accepted.
    fn from_str(tag: &str) -> std::result::Result<Self, Self::Err> {
        match tag {
            "alist" => Ok(Coding::Alist),
            "plist" => Ok(Coding::Plist),
            _ => Err(ParseCodingError(tag.to_string())),
        }
    }
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    tag: Option<Cow<'static, str>>,
    exported: bool,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Symbol used as this field's key.
    ///
    /// The tag's first comma-delimited segment wins when non-empty; otherwise
    /// the declared name is used as spelled.
    pub fn key(&self) -> Symbol<&str> {
        let renamed = self
            .tag
            .as_deref()
            .and_then(|tag| tag.split(',').next())
            .filter(|name| !name.is_empty());
        Symbol(renamed.unwrap_or(&self.name))
    }
}

/// Static shape of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    type_name: Cow<'static, str>,
    coding: Option<Cow<'static, str>>,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Start describing the record type `type_name`.
    pub fn builder(type_name: impl Into<Cow<'static, str>>) -> RecordDescriptorBuilder {
        RecordDescriptorBuilder {
            descriptor: RecordDescriptor {
                type_name: type_name.into(),
                coding: None,
                fields: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The raw coding marker, if any.
    pub fn coding_tag(&self) -> Option<&str> {
        self.coding.as_deref()
    }

    /// Resolve the coding marker. No marker means alist.
    pub fn coding(&self) -> Result<Coding> {
        match self.coding.as_deref() {
            None => Ok(Coding::Alist),
            Some(tag) => tag.parse().map_err(|ParseCodingError(tag)| Error::BadCoding {
                type_name: self.type_name.to_string(),
                tag,
            }),
        }
    }

    /// All fields in declaration order, private ones included.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Exported fields with their declaration index.
    pub fn visible_fields(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> {
        self.fields.iter().enumerate().filter(|(_, f)| f.exported)
    }
}

/// Builder for [`RecordDescriptor`]. Fields are recorded in call order.
///
/// ```
/// use sexpr::{Coding, RecordDescriptor};
///
/// let descriptor = RecordDescriptor::builder("Guild")
///     .coding(Coding::Plist)
///     .field_tagged("Pri", "princess")
///     .private_field("secret")
///     .build();
/// assert_eq!(descriptor.visible_fields().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordDescriptorBuilder {
    descriptor: RecordDescriptor,
}

impl RecordDescriptorBuilder {
    pub fn coding(self, coding: Coding) -> Self {
        self.coding_tag(coding.as_str())
    }

    /// Set the coding marker from text. Anything other than `alist` or
    /// `plist` makes every encode of this record fail.
    pub fn coding_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.descriptor.coding = Some(tag.into());
        self
    }

    pub fn field(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.push(name.into(), None, true)
    }

    /// An exported field with a key override tag (`"name"` or `"name,opts"`).
    pub fn field_tagged(
        self,
        name: impl Into<Cow<'static, str>>,
        tag: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.push(name.into(), Some(tag.into()), true)
    }

    /// A field that is never rendered.
    pub fn private_field(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.push(name.into(), None, false)
    }

    pub fn build(self) -> RecordDescriptor {
        self.descriptor
    }

    fn push(
        mut self,
        name: Cow<'static, str>,
        tag: Option<Cow<'static, str>>,
        exported: bool,
    ) -> Self {
        self.descriptor.fields.push(FieldDescriptor {
            name,
            tag,
            exported,
        });
        self
    }
}

impl<W: io::Write> Encoder<W> {
    pub(crate) fn emit_record(&mut self, record: &dyn Record, depth: usize) -> Result<()> {
        let descriptor = record.descriptor();
        let coding = descriptor.coding()?;
        tracing::trace!(
            record = descriptor.type_name(),
            coding = coding.as_str(),
            "encoding record"
        );

        let depth = self.enter(depth)?;
        self.write(b"(")?;
        for (n, (index, field)) in descriptor.visible_fields().enumerate() {
            let value = record
                .field(index)
                .ok_or_else(|| Error::MissingField {
                    type_name: descriptor.type_name().to_string(),
                    field: field.name().to_string(),
                })?;
            if n > 0 {
                self.write(b" ")?;
            }
            let key = field.key();
            match coding {
                Coding::Alist => self.emit_pair(&key, value, depth)?,
                Coding::Plist => {
                    self.emit(key.classify(), depth)?;
                    self.write(b" ")?;
                    self.emit(value.classify(), depth)?;
                }
            }
        }
        self.write(b")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    struct Princess {
        name: String,
        guild: Option<String>,
        secret: u32,
    }

    fn princess_descriptor(coding: Option<&'static str>) -> RecordDescriptor {
        let builder = RecordDescriptor::builder("Princess");
        let builder = match coding {
            Some(tag) => builder.coding_tag(tag),
            None => builder,
        };
        builder
            .field_tagged("name", "princess,omitempty")
            .field("guild")
            .private_field("secret")
            .build()
    }

    struct Described<'a> {
        descriptor: RecordDescriptor,
        value: &'a Princess,
    }

    impl Record for Described<'_> {
        fn descriptor(&self) -> &RecordDescriptor {
            &self.descriptor
        }

        fn field(&self, index: usize) -> Option<&dyn Encode> {
            match index {
                0 => Some(&self.value.name),
                1 => Some(&self.value.guild),
                2 => Some(&self.value.secret),
                _ => None,
            }
        }
    }

    impl Encode for Described<'_> {
        fn classify(&self) -> Category<'_> {
            Category::Record(self)
        }
    }

    fn yui() -> Princess {
        Princess {
            name: "yui".to_string(),
            guild: Some("Twinkle Wish".to_string()),
            secret: 7,
        }
    }

    #[test]
    fn test_key_from_tag() {
        let descriptor = princess_descriptor(None);
        let keys: Vec<_> = descriptor.fields().iter().map(|f| f.key().0).collect();
        assert_eq!(keys, ["princess", "guild", "secret"]);
    }

    #[test]
    fn test_empty_tag_segment_falls_back_to_name() {
        let descriptor = RecordDescriptor::builder("T")
            .field_tagged("Pri", ",omitempty")
            .field_tagged("Sec", "")
            .build();
        let keys: Vec<_> = descriptor.fields().iter().map(|f| f.key().0).collect();
        assert_eq!(keys, ["Pri", "Sec"]);
    }

    #[test]
    fn test_coding_resolution() {
        assert_eq!(princess_descriptor(None).coding().unwrap(), Coding::Alist);
        assert_eq!(
            princess_descriptor(Some("alist")).coding().unwrap(),
            Coding::Alist
        );
        assert_eq!(
            princess_descriptor(Some("plist")).coding().unwrap(),
            Coding::Plist
        );
        let err = princess_descriptor(Some("PLIST")).coding().unwrap_err();
        assert!(matches!(err, Error::BadCoding { ref tag, .. } if tag == "PLIST"));
    }

    #[test]
    fn test_coding_from_str_is_exact() {
        assert_eq!("alist".parse::<Coding>(), Ok(Coding::Alist));
        assert_eq!("plist".parse::<Coding>(), Ok(Coding::Plist));
        let err = "PLIST".parse::<Coding>().unwrap_err();
        assert_eq!(err, ParseCodingError("PLIST".to_string()));
        assert!("".parse::<Coding>().is_err());
        assert!(" plist".parse::<Coding>().is_err());
    }

    #[test]
    fn test_derive_with_crate_path() {
        #[derive(crate::Record)]
        #[sexp(crate = "crate", coding = "plist")]
        struct Guild {
            #[sexp(name = ":title")]
            pub title: &'static str,
            pub members: u8,
        }

        let guild = Guild {
            title: "Twinkle Wish",
            members: 3,
        };
        assert_eq!(guild.descriptor().type_name(), "Guild");
        assert_eq!(
            crate::to_string(&guild).unwrap(),
            r#"(:title "Twinkle Wish" members 3)"#
        );
    }

    #[test]
    fn test_alist_rendering_skips_private() {
        let value = yui();
        let record = Described {
            descriptor: princess_descriptor(None),
            value: &value,
        };
        assert_eq!(
            crate::to_string(&record).unwrap(),
            r#"((princess . "yui") (guild . "Twinkle Wish"))"#
        );
    }

    #[test]
    fn test_plist_rendering_skips_private() {
        let value = yui();
        let record = Described {
            descriptor: princess_descriptor(Some("plist")),
            value: &value,
        };
        assert_eq!(
            crate::to_string(&record).unwrap(),
            r#"(princess "yui" guild "Twinkle Wish")"#
        );
    }

    #[test]
    fn test_bad_coding_writes_nothing() {
        let value = yui();
        let record = Described {
            descriptor: princess_descriptor(Some("bogus")),
            value: &value,
        };
        let mut out = Vec::new();
        let err = Encoder::new(&mut out).encode(&record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sexp encode: struct Princess with bad coding tag bogus"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_field_value() {
        let value = yui();
        let record = Described {
            descriptor: RecordDescriptor::builder("Princess")
                .field("name")
                .field("guild")
                .field("secret")
                .field("extra")
                .build(),
            value: &value,
        };
        let err = crate::to_vec(&record).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field, .. } if field == "extra"));
    }

    #[test]
    fn test_null_field_fails() {
        let value = Princess {
            guild: None,
            ..yui()
        };
        let record = Described {
            descriptor: princess_descriptor(None),
            value: &value,
        };
        assert!(matches!(
            crate::to_vec(&record),
            Err(Error::NullReference(_))
        ));
    }
}
