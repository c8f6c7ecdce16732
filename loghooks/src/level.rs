//! Severity levels and the name/value enum registry
//!
//! Configuration objects decode level names as plain strings; the level
//! registry translates them into [`Severity`] values. Unknown names fall
//! back to [`Severity::Warn`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Panic,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 7] = [
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }

    /// The closest `tracing` level; panic and fatal collapse onto ERROR.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Severity::Panic | Severity::Fatal | Severity::Error => tracing::Level::ERROR,
            Severity::Warn => tracing::Level::WARN,
            Severity::Info => tracing::Level::INFO,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Trace => tracing::Level::TRACE,
        }
    }

    /// Severities a hook limited to `self` should receive: everything at
    /// least as severe.
    pub fn enabled(self) -> Vec<Severity> {
        Severity::ALL.iter().copied().filter(|s| *s <= self).collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        levels()
            .get(s.to_lowercase().as_str())
            .ok_or_else(|| format!("unknown severity '{s}'"))
    }
}

/// One named enum value with a human-readable description.
#[derive(Debug, Clone)]
pub struct EnumEntry<T> {
    pub name: &'static str,
    pub value: T,
    pub desc: &'static str,
}

/// A symbol-scoped registry of named enum values.
///
/// Lookup is linear; registries are tiny and built once.
#[derive(Debug)]
pub struct EnumSet<T> {
    symbol: &'static str,
    entries: Vec<EnumEntry<T>>,
}

impl<T: Copy + PartialEq> EnumSet<T> {
    pub fn new(symbol: &'static str) -> Self {
        Self {
            symbol,
            entries: Vec::new(),
        }
    }

    /// Register a named value; duplicate names are ignored.
    pub fn add(&mut self, name: &'static str, value: T, desc: &'static str) -> &mut Self {
        if !self.contains(name) {
            self.entries.push(EnumEntry { name, value, desc });
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    pub fn name_of(&self, value: T) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EnumEntry<T>] {
        &self.entries
    }
}

/// The global level registry, mapping textual names to [`Severity`] values.
pub fn levels() -> &'static EnumSet<Severity> {
    static LEVELS: OnceLock<EnumSet<Severity>> = OnceLock::new();
    LEVELS.get_or_init(|| {
        let mut set = EnumSet::new("level");
        set.add("panic", Severity::Panic, "PanicLevel")
            .add("fatal", Severity::Fatal, "FatalLevel")
            .add("error", Severity::Error, "ErrorLevel")
            .add("warn", Severity::Warn, "WarnLevel")
            .add("info", Severity::Info, "InfoLevel")
            .add("debug", Severity::Debug, "DebugLevel")
            .add("trace", Severity::Trace, "TraceLevel");
        set
    })
}

/// Resolve a level name, falling back to `Warn` for unknown names.
pub fn severity_of(name: &str) -> Severity {
    levels().get(name).unwrap_or(Severity::Warn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_registry_lookup() {
        let set = levels();
        assert_eq!(set.symbol(), "level");
        assert_eq!(set.len(), 7);
        assert_eq!(set.get("debug"), Some(Severity::Debug));
        assert_eq!(set.get("nope"), None);
        assert_eq!(set.name_of(Severity::Debug), Some("debug"));
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_of_falls_back_to_warn() {
        assert_eq!(severity_of("info"), Severity::Info);
        assert_eq!(severity_of("banana"), Severity::Warn);
    }

    #[test]
    fn test_enabled_includes_more_severe() {
        assert_eq!(
            Severity::Warn.enabled(),
            vec![Severity::Panic, Severity::Fatal, Severity::Error, Severity::Warn]
        );
        assert_eq!(Severity::Trace.enabled().len(), 7);
    }

    #[test]
    fn test_duplicate_names_ignored() {
        let mut set = EnumSet::new("test");
        set.add("a", 1u8, "first").add("a", 2u8, "second");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a"), Some(1));
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(Severity::Panic.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Severity::Fatal.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Severity::Trace.to_tracing(), tracing::Level::TRACE);
    }
}
