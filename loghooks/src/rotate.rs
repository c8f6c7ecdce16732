//! File-rotation hook
//!
//! Options decode from the environment (`ROTATE_COUNT`, `LOG_NAME`, ...)
//! with the defaults carried in the field tags. The hook writes formatted
//! entries to a date-stamped file derived from `log_name_layout`, reopening
//! on rollover and pruning old rotations.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, Local};
use hookconf::{CaseMode, EnvDecode, EnvDecoder, EnvSource};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::hook::{Entry, Hook, HookFactory};
use crate::level::{severity_of, Severity};
use crate::spec::OptionSpec;

/// Registry name of the rotation hook factory.
pub const HOOK_NAME: &str = "rotate";

/// Log file extension appended when a layout lacks it.
pub const LOG_EXT: &str = ".log";

/// Rotation hook options, decoded from the environment.
#[derive(Debug, Clone, PartialEq, EnvDecode, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    #[env("rotate_count,20")]
    pub rotation_count: u32,

    #[env("disable_colors,false")]
    pub disable_colors: bool,

    #[env("log_name_layout,%s-%Y%m%d.log")]
    pub log_name_layout: String,

    #[env("log_name,app")]
    pub log_name: String,

    #[env("rotation_time,24h")]
    pub rotation_time: Duration,

    #[env("max_age,0")]
    pub max_age: Duration,

    #[env("level,warn")]
    pub level: String,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            rotation_count: 20,
            disable_colors: false,
            log_name_layout: "%s-%Y%m%d.log".to_string(),
            log_name: "app.log".to_string(),
            rotation_time: Duration::from_secs(24 * 3600),
            max_age: Duration::ZERO,
            level: "warn".to_string(),
        }
    }
}

impl RotateOptions {
    /// Options with the given log name and defaults everywhere else.
    pub fn with_log_name(name: impl Into<String>) -> Self {
        Self {
            log_name: name.into(),
            ..Self::default()
        }
    }

    /// Decode options from the process environment under a naming policy.
    ///
    /// A decode failure is logged and the options collected so far are
    /// returned; every field has a tag default, so the result is usable.
    pub fn from_env(case: CaseMode, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self::from_env_with(case, prefix, suffix, &hookconf::ProcessEnv)
    }

    /// Same as [`RotateOptions::from_env`] against an explicit source.
    pub fn from_env_with(
        case: CaseMode,
        prefix: Option<&str>,
        suffix: Option<&str>,
        source: &dyn EnvSource,
    ) -> Self {
        let mut decoder = EnvDecoder::new(case);
        if let Some(prefix) = prefix {
            decoder.set_prefix(prefix);
        }
        if let Some(suffix) = suffix {
            decoder.set_suffix(suffix);
        }
        let mut options = Self::default();
        if let Err(err) = decoder.marshal_with(&mut options, source) {
            tracing::error!("decode rotate options error: {err}");
        }
        options
    }

    /// Build options from a factory argument spec (JSON object, query spec,
    /// `prefix,suffix` pair or bare prefix).
    pub fn from_spec(spec: &str) -> Self {
        match OptionSpec::parse(spec) {
            OptionSpec::Json(text) => match serde_json::from_str(&text) {
                Ok(options) => options,
                Err(err) => {
                    tracing::error!("invalid rotate options json: {err}");
                    Self::from_env(CaseMode::Upper, None, None)
                }
            },
            OptionSpec::Env {
                case,
                prefix,
                suffix,
            } => Self::from_env(case, prefix.as_deref(), suffix.as_deref()),
        }
    }

    /// File name layout with `%s` substituted and the `.log` extension
    /// normalized; remaining `%` tokens are strftime date specifiers.
    pub fn link_name(&self) -> String {
        let name = self.log_name.trim_end_matches(LOG_EXT);
        if self.log_name_layout.is_empty() {
            return format!("{name}-%Y%m%d{LOG_EXT}");
        }
        let mut layout = if let Some(rest) = self.log_name_layout.strip_prefix("%s") {
            format!("{name}{rest}")
        } else {
            self.log_name_layout.clone()
        };
        if !layout.ends_with(LOG_EXT) {
            layout.push_str(LOG_EXT);
        }
        layout
    }

    /// Configured severity threshold; unknown names fall back to warn.
    pub fn severity(&self) -> Severity {
        severity_of(&self.level)
    }
}

struct WriterState {
    path: PathBuf,
    file: Option<File>,
}

/// A hook that appends entries to date-stamped files.
pub struct RotateHook {
    options: RotateOptions,
    enabled: Vec<Severity>,
    state: Mutex<WriterState>,
}

impl RotateHook {
    pub fn new(options: RotateOptions) -> Self {
        let enabled = options.severity().enabled();
        Self {
            options,
            enabled,
            state: Mutex::new(WriterState {
                path: PathBuf::new(),
                file: None,
            }),
        }
    }

    pub fn options(&self) -> &RotateOptions {
        &self.options
    }

    /// Current target path for `now`, rendered from the layout.
    fn target_path(&self, now: DateTime<Local>) -> PathBuf {
        use std::fmt::Write as _;

        let layout = self.options.link_name();
        let mut rendered = String::new();
        if write!(rendered, "{}", now.format(&layout)).is_err() {
            // bad strftime token in a user layout; fall back to name-date
            tracing::warn!("invalid log name layout '{layout}'");
            rendered = format!(
                "{}-{}{}",
                self.options.log_name.trim_end_matches(LOG_EXT),
                now.format("%Y%m%d"),
                LOG_EXT
            );
        }
        PathBuf::from(rendered)
    }

    fn format_entry(&self, entry: &Entry) -> String {
        let level = if self.options.disable_colors {
            format!("[{}]", entry.level)
        } else {
            format!("\x1b[{}m[{}]\x1b[0m", color_code(entry.level), entry.level)
        };
        let mut line = format!(
            "{} {} {}",
            entry.timestamp.format(hookconf::DATE_TIME_LAYOUT),
            level,
            entry.message
        );
        for (key, value) in &entry.fields {
            line.push_str(&format!(" {key}={value}"));
        }
        line
    }

    /// Best-effort cleanup of old rotations next to `current`.
    fn prune(&self, current: &Path) {
        let stem = self
            .options
            .log_name
            .trim_end_matches(LOG_EXT)
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        if stem.is_empty() {
            return;
        }
        let dir = match current.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let Ok(read) = fs::read_dir(&dir) else {
            return;
        };
        let mut rotations: Vec<PathBuf> = read
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path != current
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .map(|name| name.starts_with(&stem) && name.ends_with(LOG_EXT))
                        .unwrap_or(false)
            })
            .collect();
        if self.options.max_age > Duration::ZERO {
            // age-based cleanup
            for path in rotations {
                let expired = fs::metadata(&path)
                    .and_then(|meta| meta.modified())
                    .map(|modified| {
                        modified.elapsed().unwrap_or_default() > self.options.max_age
                    })
                    .unwrap_or(false);
                if expired {
                    if let Err(err) = fs::remove_file(&path) {
                        tracing::warn!("prune rotation {path:?} failed: {err}");
                    }
                }
            }
        } else if self.options.rotation_count > 0 {
            // count-based cleanup; date-stamped names sort chronologically
            rotations.sort();
            let keep = self.options.rotation_count as usize;
            if rotations.len() > keep {
                let excess = rotations.len() - keep;
                for path in rotations.drain(..excess) {
                    if let Err(err) = fs::remove_file(&path) {
                        tracing::warn!("prune rotation {path:?} failed: {err}");
                    }
                }
            }
        }
    }
}

impl Hook for RotateHook {
    fn levels(&self) -> Vec<Severity> {
        self.enabled.clone()
    }

    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        if !self.enabled.contains(&entry.level) {
            return Ok(());
        }
        let path = self.target_path(entry.timestamp);
        let line = self.format_entry(entry);

        let mut state = self.state.lock();
        if state.file.is_none() || state.path != path {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    fs::create_dir_all(dir)?;
                }
            }
            let rolled_over = state.file.is_some();
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            state.path = path;
            state.file = Some(file);
            if rolled_over {
                self.prune(&state.path);
            }
        }
        if let Some(file) = state.file.as_mut() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}

fn color_code(level: Severity) -> u8 {
    match level {
        Severity::Panic | Severity::Fatal | Severity::Error => 31,
        Severity::Warn => 33,
        Severity::Info => 36,
        Severity::Debug | Severity::Trace => 37,
    }
}

/// Factory for the rotation hook, registered under [`HOOK_NAME`].
#[derive(Default)]
pub struct RotateHookFactory {
    default_options: OnceLock<RotateOptions>,
}

impl RotateHookFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the options used when `create` is called without arguments.
    /// Has no effect once defaults have been resolved.
    pub fn set_default_options(&self, options: RotateOptions) -> &Self {
        let _ = self.default_options.set(options);
        self
    }

    fn default_options(&self) -> &RotateOptions {
        self.default_options
            .get_or_init(|| RotateOptions::from_env(CaseMode::Upper, None, None))
    }
}

impl HookFactory for RotateHookFactory {
    fn face(&self) -> &str {
        HOOK_NAME
    }

    fn create(&self, args: &[String]) -> Result<Box<dyn Hook>, HookError> {
        let options = match args.first() {
            None => self.default_options().clone(),
            Some(spec) => RotateOptions::from_spec(spec),
        };
        Ok(Box::new(RotateHook::new(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tag_defaults() {
        let options =
            RotateOptions::from_env_with(CaseMode::Upper, None, None, &source(&[]));
        assert_eq!(options.rotation_count, 20);
        assert!(!options.disable_colors);
        assert_eq!(options.log_name, "app");
        assert_eq!(options.log_name_layout, "%s-%Y%m%d.log");
        assert_eq!(options.rotation_time, Duration::from_secs(24 * 3600));
        assert_eq!(options.max_age, Duration::ZERO);
        assert_eq!(options.severity(), Severity::Warn);
    }

    #[test]
    fn test_env_overrides_with_prefix() {
        let env = source(&[
            ("APP_LOG_NAME", "svc.log"),
            ("APP_ROTATE_COUNT", "5"),
            ("APP_LEVEL", "debug"),
            ("APP_ROTATION_TIME", "1h"),
        ]);
        let options = RotateOptions::from_env_with(CaseMode::Upper, Some("app_"), None, &env);
        assert_eq!(options.log_name, "svc.log");
        assert_eq!(options.rotation_count, 5);
        assert_eq!(options.severity(), Severity::Debug);
        assert_eq!(options.rotation_time, Duration::from_secs(3600));
    }

    #[test]
    fn test_link_name_substitution() {
        let options = RotateOptions::with_log_name("svc.log");
        assert_eq!(options.link_name(), "svc-%Y%m%d.log");
    }

    #[test]
    fn test_link_name_empty_layout() {
        let options = RotateOptions {
            log_name_layout: String::new(),
            ..RotateOptions::with_log_name("svc")
        };
        assert_eq!(options.link_name(), "svc-%Y%m%d.log");
    }

    #[test]
    fn test_link_name_appends_extension() {
        let options = RotateOptions {
            log_name_layout: "%s-%Y%m%d".to_string(),
            ..RotateOptions::with_log_name("svc")
        };
        assert_eq!(options.link_name(), "svc-%Y%m%d.log");
    }

    #[test]
    fn test_from_spec_json() {
        let options = RotateOptions::from_spec(r#"{"log_name":"json.log","rotation_count":3}"#);
        assert_eq!(options.log_name, "json.log");
        assert_eq!(options.rotation_count, 3);
        // untouched fields keep defaults
        assert_eq!(options.level, "warn");
    }

    #[test]
    fn test_severity_fallback() {
        let options = RotateOptions {
            level: "banana".to_string(),
            ..RotateOptions::default()
        };
        assert_eq!(options.severity(), Severity::Warn);
    }

    #[test]
    fn test_hook_writes_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let options = RotateOptions {
            log_name: format!("{}/rotate.log", dir.path().display()),
            level: "info".to_string(),
            ..RotateOptions::default()
        };
        let hook = RotateHook::new(options);

        hook.fire(&Entry::new(Severity::Warn, "kept").with_field("count", 1))
            .unwrap();
        // below the threshold, silently skipped
        hook.fire(&Entry::new(Severity::Debug, "dropped")).unwrap();

        let path = hook.target_path(Local::now());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("kept"));
        assert!(contents.contains("count=1"));
        assert!(!contents.contains("dropped"));
    }

    #[test]
    fn test_factory_builds_from_spec() {
        let factory = RotateHookFactory::new();
        factory.set_default_options(RotateOptions::with_log_name("pinned.log"));
        assert_eq!(factory.face(), HOOK_NAME);

        let hook = factory.create(&[]).unwrap();
        // warn threshold from defaults
        assert_eq!(hook.levels(), Severity::Warn.enabled());
    }
}
