//! Environment variable name resolution
//!
//! A final variable name is `prefix + key + suffix` with the case transform
//! applied to the whole concatenation. Resolution is pure: no environment
//! access happens here.

use std::str::FromStr;

/// Textual transform applied to a composed environment variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Uppercase the composed name (the conventional environment style)
    #[default]
    Upper,
    /// Lowercase the composed name
    Lower,
    /// Leave the composed name exactly as declared
    AsIs,
    /// Not yet chosen; normalizes to [`CaseMode::Upper`]
    Undefined,
}

impl CaseMode {
    /// Resolve `Undefined` to the `Upper` default.
    pub fn normalize(self) -> Self {
        match self {
            Self::Undefined => Self::Upper,
            other => other,
        }
    }

    /// Apply this transform to a composed name.
    pub fn apply(self, name: &str) -> String {
        match self.normalize() {
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
            _ => name.to_string(),
        }
    }
}

impl FromStr for CaseMode {
    type Err = String;

    /// Accepts the textual spellings used in option specs
    /// (`case=upper&prefix=app_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" | "default" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "normal" | "as-is" | "asis" => Ok(Self::AsIs),
            other => Err(format!("unknown case mode '{other}'")),
        }
    }
}

/// Compose the final environment variable name for a lookup key.
///
/// Empty prefix/suffix parts are simply omitted; no separator is inserted
/// beyond what the parts themselves contain.
pub fn resolve_name(prefix: &str, key: &str, suffix: &str, case: CaseMode) -> String {
    let composed = format!("{prefix}{key}{suffix}");
    case.apply(&composed)
}
