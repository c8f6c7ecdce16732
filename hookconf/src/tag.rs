//! Field tag parsing
//!
//! A field tag has the form `key` or `key,default`. The key names the
//! environment lookup (before prefix/suffix/case are applied); the optional
//! default is a literal coerced in place of a missing environment value.
//!
//! Tags are parsed lazily, on every decode walk, so a malformed default is
//! only surfaced when the corresponding environment variable is actually
//! absent.

/// Parsed field metadata: lookup key plus optional default literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    /// Base lookup key, trimmed of surrounding whitespace
    pub key: String,
    /// Default literal, trimmed of surrounding whitespace only
    pub default: Option<String>,
}

impl TagSpec {
    /// Parse a raw tag string.
    ///
    /// Returns `Ok(None)` for an empty tag (the field is skipped), and
    /// `Err(())` when the tag is present but the lookup key is empty after
    /// trimming. The caller attaches field context to the error.
    pub fn parse(raw: &str) -> Result<Option<Self>, ()> {
        if raw.is_empty() {
            return Ok(None);
        }
        let (key, default) = match raw.split_once(',') {
            Some((key, default)) => (key.trim(), Some(default.trim().to_string())),
            None => (raw.trim(), None),
        };
        if key.is_empty() {
            return Err(());
        }
        Ok(Some(Self {
            key: key.to_string(),
            default,
        }))
    }
}
