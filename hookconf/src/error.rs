//! Error types for environment variable decoding

/// Errors that can occur while decoding a structure from environment variables.
///
/// Two failure scenarios exist:
/// - A field carries metadata that parses to an empty lookup key
/// - An environment value (or tag default) cannot be coerced into the
///   field's type
///
/// The absence of an environment variable is never an error: the field is
/// left at whatever value it held before decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Field metadata is present but yields an empty lookup key.
    ///
    /// Occurs for tags like `","` or `",default"` where nothing remains on
    /// the left of the first comma after trimming.
    #[error("tag parse failed for field '{field}': empty lookup key in tag '{tag}'")]
    TagParse {
        /// Name of the struct field carrying the malformed tag
        field: String,
        /// The raw tag string as written on the field
        tag: String,
    },

    /// An effective input string could not be converted into the field's type.
    ///
    /// Carries the resolved environment variable name and the attempted
    /// value so the caller can diagnose which setting is malformed.
    #[error("cannot decode '{value}' from '{var}' into {type_name} for field '{field}': {message}")]
    Coerce {
        /// Name of the struct field being decoded
        field: String,
        /// Resolved environment variable name that was looked up
        var: String,
        /// The value that failed to parse (env value or tag default)
        value: String,
        /// Fully qualified type name the coercion targeted
        type_name: String,
        /// Error message from the underlying parser
        message: String,
    },
}

impl DecodeError {
    /// Create a coercion error (used by the decoder's field walk)
    #[doc(hidden)]
    pub fn coerce<T>(
        field: impl Into<String>,
        var: impl Into<String>,
        value: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Coerce {
            field: field.into(),
            var: var.into(),
            value: value.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a tag parse error (used by the decoder's field walk)
    #[doc(hidden)]
    pub fn tag_parse(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::TagParse {
            field: field.into(),
            tag: tag.into(),
        }
    }

    /// Whether this error is a tag parse failure.
    pub fn is_tag_parse(&self) -> bool {
        matches!(self, Self::TagParse { .. })
    }
}
