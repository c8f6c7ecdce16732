//! Environment variable decoding for hook configuration structures
//!
//! `hookconf` populates plain structs from process environment variables,
//! guided by per-field tags of the form `key` or `key,default`. A decoder
//! carries a naming policy (case mode plus optional prefix/suffix) and walks
//! the target structure, coercing each variable's textual value into the
//! field's type and recursing into nested structures.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvDecode)]`
//! - **Naming policy**: decoder-level prefix/suffix with `Upper`/`Lower`/`AsIs`
//!   case transforms applied to the composed name
//! - **Defaults**: per-field default literals (`#[env("rotate_count,20")]`)
//!   applied when the variable is unset or empty
//! - **Typed coercion**: integers, floats, booleans, strings, durations
//!   (`10s`, `24h`), timestamps (`2006-01-02 15:04:05`), bracketed sequences
//!   (`[1,1,1]`), and JSON object maps
//! - **Nested structures**: `#[env(nested)]` fields decode under the same
//!   global prefix/suffix, including through `Box` and `Option`
//!
//! # Example
//!
//! ```rust
//! use hookconf::{CaseMode, EnvDecode, EnvDecoder};
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct RotateConfig {
//!     #[env("log_name,app")]
//!     pub log_name: String,
//!
//!     #[env("rotate_count,20")]
//!     pub rotate_count: u32,
//!
//!     #[env("rotation_time,24h")]
//!     pub rotation_time: std::time::Duration,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = RotateConfig::default();
//! let mut decoder = EnvDecoder::new(CaseMode::Upper);
//! decoder.set_prefix("app_");
//! decoder.marshal(&mut config)?; // reads APP_LOG_NAME, APP_ROTATE_COUNT, ...
//! assert_eq!(config.rotate_count, 20);
//! # Ok(())
//! # }
//! ```
//!
//! # Field tags
//!
//! ## `#[env("key")]`
//!
//! Look the field up under `key` (after prefix/suffix/case are applied).
//! A variable that is unset, or set to the empty string, leaves the field
//! at its prior value; this is not an error.
//!
//! ## `#[env("key,default")]`
//!
//! As above, but coerce the literal `default` when no usable environment
//! value exists. The tag is split on the first comma only, so defaults may
//! themselves contain commas (`#[env("arr,[1,2]")]`).
//!
//! ## `#[env(nested)]`
//!
//! Recurse into the field with the same decoder configuration. Nested
//! fields resolve their own keys under the same global prefix/suffix; there
//! is no per-level path qualification. `Option<T>` nested fields are only
//! decoded when they already hold a value.
//!
//! Untagged fields are never touched.
//!
//! # Testing without the process environment
//!
//! [`EnvDecoder::marshal_with`] accepts any [`EnvSource`], and the trait is
//! implemented for `HashMap<String, String>`, so decode paths can be tested
//! against a plain map.

mod case;
mod decoder;
mod error;
mod tag;

#[doc(hidden)]
pub mod de;

pub use case::{resolve_name, CaseMode};
pub use de::{parse_duration, EnvValue, DATE_TIME_LAYOUT};
pub use decoder::{from_env, EnvDecode, EnvDecoder, EnvSource, ProcessEnv};
pub use error::DecodeError;
pub use hookconf_derive::EnvDecode;
pub use tag::TagSpec;

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;
