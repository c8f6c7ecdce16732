//! Factory argument specs
//!
//! A hook factory accepts one textual argument describing where its options
//! come from:
//!
//! - a JSON object literal, holding the options themselves
//! - a query spec: `case=upper&prefix=app_&suffix=_logger`
//! - a `prefix,suffix` pair
//! - a bare namespace prefix (`app` reads as `app_`)
//! - an empty string, which decodes from the environment with defaults

use hookconf::CaseMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OptionSpec {
    /// A JSON object literal holding the options themselves.
    Json(String),
    /// Decode options from the environment under this naming policy.
    Env {
        case: CaseMode,
        prefix: Option<String>,
        suffix: Option<String>,
    },
}

impl OptionSpec {
    pub(crate) fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::env(CaseMode::Upper, None, None);
        }
        if raw.starts_with('{') {
            return Self::Json(raw.to_string());
        }
        // eg: case=upper&prefix=app_&suffix=_logger
        if raw.contains('=') {
            return Self::parse_query(raw);
        }
        // eg: app_,_logger
        if let Some((prefix, suffix)) = raw.split_once(',') {
            return Self::env(
                CaseMode::Upper,
                non_empty(prefix.trim()),
                non_empty(suffix.trim()),
            );
        }
        // bare namespace prefix
        let prefix = if raw.contains('_') {
            raw.to_string()
        } else {
            format!("{raw}_")
        };
        Self::env(CaseMode::Upper, Some(prefix), None)
    }

    fn parse_query(raw: &str) -> Self {
        let mut case = CaseMode::Undefined;
        let mut prefix = None;
        let mut suffix = None;
        for pair in raw.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim().to_lowercase().as_str() {
                "case" => {
                    if let Ok(mode) = value.parse::<CaseMode>() {
                        case = mode;
                    }
                }
                "prefix" => prefix = Some(value.to_string()),
                "suffix" => suffix = Some(value.to_string()),
                _ => {}
            }
        }
        Self::env(case.normalize(), prefix, suffix)
    }

    fn env(case: CaseMode, prefix: Option<String>, suffix: Option<String>) -> Self {
        Self::Env {
            case,
            prefix,
            suffix,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
