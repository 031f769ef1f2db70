//! Encoder configuration.
//!
//! Every field is optional so the struct can be embedded in a larger config
//! file and layered with [`EncoderConfig::merge`]. Accessors resolve the
//! defaults.
//!
//! Example config.toml section:
//! ```toml
//! [sexpr]
//! max_depth = 512        # container nesting limit
//! non_finite = "elisp"   # "elisp" or "reject"
//! ```

use serde::{Deserialize, Serialize};

/// Default container nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How NaN and infinities are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NonFiniteFloats {
    /// Emacs Lisp reader syntax: `1.0e+INF`, `-1.0e+INF`, `0.0e+NaN` (default)
    #[default]
    Elisp,
    /// Fail the encode with [`Error::NonFinite`](crate::Error::NonFinite)
    Reject,
}

/// Options for an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Maximum nesting of pairs, lists and records. None = [`DEFAULT_MAX_DEPTH`]
    pub max_depth: Option<usize>,
    /// Non-finite float handling. None = elisp
    pub non_finite: Option<NonFiniteFloats>,
}

impl EncoderConfig {
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn non_finite(&self) -> NonFiniteFloats {
        self.non_finite.unwrap_or_default()
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_depth: other.max_depth.or(self.max_depth),
            non_finite: other.non_finite.or(self.non_finite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(config.non_finite(), NonFiniteFloats::Elisp);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EncoderConfig = serde_json::from_str(r#"{"non_finite": "reject"}"#).unwrap();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.non_finite(), NonFiniteFloats::Reject);

        let config: EncoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EncoderConfig::default());
    }

    #[test]
    fn test_merge_later_wins() {
        let base = EncoderConfig {
            max_depth: Some(8),
            non_finite: Some(NonFiniteFloats::Reject),
        };
        let layer = EncoderConfig {
            max_depth: Some(16),
            ..Default::default()
        };
        let merged = base.merge(layer);
        assert_eq!(merged.max_depth(), 16);
        assert_eq!(merged.non_finite(), NonFiniteFloats::Reject);
    }
}
