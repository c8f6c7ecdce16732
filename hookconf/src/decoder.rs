//! The decoder and the structure walk
//!
//! [`EnvDecoder`] holds the naming policy (case mode, prefix, suffix) and
//! drives the walk over a target structure. The walk itself is generated by
//! `#[derive(EnvDecode)]`: one [`EnvDecoder::decode_field`] call per tagged
//! field, in declaration order, plus a recursive [`EnvDecode::decode_env`]
//! call per nested structure. The first failure aborts the walk; fields
//! assigned before the failure keep their values.
//!
//! The environment is injected through [`EnvSource`] so tests can decode
//! against a plain map without touching process state.

use std::collections::HashMap;
use std::env;

use crate::case::{resolve_name, CaseMode};
use crate::de::EnvValue;
use crate::error::DecodeError;
use crate::tag::TagSpec;

/// Read-only key/value lookup, normally the process environment.
pub trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment at the time of the lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// A structure whose fields can be populated from an environment.
///
/// Implemented with `#[derive(EnvDecode)]`; the generated walk visits
/// fields in declaration order and recurses into `#[env(nested)]` fields
/// with the same decoder configuration.
pub trait EnvDecode {
    fn decode_env(
        &mut self,
        decoder: &EnvDecoder,
        source: &dyn EnvSource,
    ) -> Result<(), DecodeError>;
}

/// Single-level ownership: decoding a box decodes its contents.
impl<T: EnvDecode> EnvDecode for Box<T> {
    fn decode_env(
        &mut self,
        decoder: &EnvDecoder,
        source: &dyn EnvSource,
    ) -> Result<(), DecodeError> {
        (**self).decode_env(decoder, source)
    }
}

/// An absent nested structure is skipped, never allocated.
impl<T: EnvDecode> EnvDecode for Option<T> {
    fn decode_env(
        &mut self,
        decoder: &EnvDecoder,
        source: &dyn EnvSource,
    ) -> Result<(), DecodeError> {
        match self.as_mut() {
            Some(inner) => inner.decode_env(decoder, source),
            None => Ok(()),
        }
    }
}

/// Environment variable decoder.
///
/// Holds only the naming policy; a configured decoder may be reused across
/// any number of `marshal` calls. Configure prefix/suffix before decoding.
#[derive(Debug, Clone, Default)]
pub struct EnvDecoder {
    case: CaseMode,
    prefix: String,
    suffix: String,
}

impl EnvDecoder {
    /// Create a decoder with the given case mode.
    ///
    /// [`CaseMode::Undefined`] normalizes to [`CaseMode::Upper`].
    pub fn new(case: CaseMode) -> Self {
        Self {
            case: case.normalize(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Prepend a namespace to every lookup key.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a namespace to every lookup key.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.suffix = suffix.into();
        self
    }

    pub fn case(&self) -> CaseMode {
        self.case
    }

    /// Compose the final environment variable name for a lookup key.
    pub fn resolve_name(&self, key: &str) -> String {
        resolve_name(&self.prefix, key, &self.suffix, self.case)
    }

    /// Populate `target` from the process environment.
    pub fn marshal<T: EnvDecode>(&self, target: &mut T) -> Result<(), DecodeError> {
        self.marshal_with(target, &ProcessEnv)
    }

    /// Populate `target` from an explicit environment snapshot.
    pub fn marshal_with<T: EnvDecode>(
        &self,
        target: &mut T,
        source: &dyn EnvSource,
    ) -> Result<(), DecodeError> {
        target.decode_env(self, source)
    }

    /// Decode one tagged field (called by macro-generated walks).
    ///
    /// The tag is parsed here, per walk, so a malformed tag or default
    /// surfaces only when the field is actually visited. An environment
    /// value that is present but empty falls through to the tag default;
    /// no value and no default leaves the field untouched.
    #[doc(hidden)]
    pub fn decode_field<T: EnvValue>(
        &self,
        field: &mut T,
        field_name: &'static str,
        tag: &'static str,
        source: &dyn EnvSource,
    ) -> Result<(), DecodeError> {
        let Some(spec) =
            TagSpec::parse(tag).map_err(|_| DecodeError::tag_parse(field_name, tag))?
        else {
            return Ok(());
        };
        let var = self.resolve_name(&spec.key);
        let effective = source
            .get(&var)
            .filter(|value| !value.is_empty())
            .or_else(|| spec.default.clone().filter(|value| !value.is_empty()));
        let Some(value) = effective else {
            return Ok(());
        };
        *field = T::parse_env(&value).map_err(|message| {
            DecodeError::coerce::<T>(field_name, var.as_str(), value.as_str(), message)
        })?;
        Ok(())
    }
}

/// Decode a fresh `T` from the process environment with the `Upper` case
/// mode and no prefix/suffix.
pub fn from_env<T: EnvDecode + Default>() -> Result<T, DecodeError> {
    let mut target = T::default();
    EnvDecoder::new(CaseMode::Upper).marshal(&mut target)?;
    Ok(target)
}
