//! HTTP webhook hook
//!
//! Webhook options decode from the environment under a caller-chosen prefix
//! (`NOTIFY_URL`, `NOTIFY_METHOD`, ...). Delivery goes through a
//! [`WebHookClient`], by default an HTTP client honoring the configured
//! method and content type; tests inject their own client.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use hookconf::{CaseMode, EnvDecode, EnvDecoder, EnvSource};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::hook::{Creator, Entry, Hook, HookFactory};
use crate::level::{levels, Severity};
use crate::provider::HookProvider;
use crate::spec::OptionSpec;

pub const CONTENT_TYPE_JSON: &str = "json";
pub const CONTENT_TYPE_FORM: &str = "form";
pub const CONTENT_TYPE_QUERY: &str = "query";
pub const CONTENT_TYPE_TEXT: &str = "text";
pub const CONTENT_TYPE_XML: &str = "xml";
pub const CONTENT_TYPE_PATH: &str = "path";

pub const ALL_SUPPORT_METHODS: [&str; 4] = ["get", "post", "put", "delete"];
pub const ALL_SUPPORT_CONTENT_TYPES: [&str; 6] = [
    CONTENT_TYPE_JSON,
    CONTENT_TYPE_FORM,
    CONTENT_TYPE_QUERY,
    CONTENT_TYPE_TEXT,
    CONTENT_TYPE_XML,
    CONTENT_TYPE_PATH,
];

const DEFAULT_METHOD: &str = "post";
const DEFAULT_CONTENT_TYPE: &str = CONTENT_TYPE_JSON;

/// Webhook options, decoded from the environment.
#[derive(Debug, Clone, Default, PartialEq, EnvDecode, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyOptions {
    #[env("url")]
    pub url: String,

    #[env("name")]
    pub name: String,

    #[env("level")]
    #[serde(rename = "level")]
    pub levels: Vec<String>,

    #[env("method,post")]
    pub method: String,

    #[env("content_type,json")]
    pub content_type: String,
}

impl NotifyOptions {
    /// Decode options from the process environment under `prefix`.
    ///
    /// Returns `None` when decoding fails. An empty `name` falls back to
    /// the prefix with surrounding underscores stripped.
    pub fn from_env_prefix(prefix: &str) -> Option<Self> {
        Self::from_env_with(CaseMode::Upper, Some(prefix), None, &hookconf::ProcessEnv)
    }

    /// Decode options under a full naming policy.
    pub fn from_env(case: CaseMode, prefix: Option<&str>, suffix: Option<&str>) -> Option<Self> {
        Self::from_env_with(case, prefix, suffix, &hookconf::ProcessEnv)
    }

    /// Same as [`NotifyOptions::from_env`] against an explicit source.
    pub fn from_env_with(
        case: CaseMode,
        prefix: Option<&str>,
        suffix: Option<&str>,
        source: &dyn EnvSource,
    ) -> Option<Self> {
        let mut decoder = EnvDecoder::new(case);
        if let Some(prefix) = prefix {
            decoder.set_prefix(prefix);
        }
        if let Some(suffix) = suffix {
            decoder.set_suffix(suffix);
        }
        let mut options = Self::default();
        if let Err(err) = decoder.marshal_with(&mut options, source) {
            tracing::error!("decode notify options error: {err}");
            return None;
        }
        if options.name.is_empty() {
            if let Some(prefix) = prefix {
                options.name = prefix.trim_matches('_').to_string();
            }
        }
        Some(options)
    }

    /// Build options from a factory argument spec.
    pub fn from_spec(spec: &str) -> Option<Self> {
        match OptionSpec::parse(spec) {
            OptionSpec::Json(text) => match serde_json::from_str(&text) {
                Ok(options) => Some(options),
                Err(err) => {
                    tracing::error!("invalid notify options json: {err}");
                    None
                }
            },
            OptionSpec::Env {
                case,
                prefix,
                suffix,
            } => Self::from_env(case, prefix.as_deref(), suffix.as_deref()),
        }
    }

    /// Configured severities: all of them when none are listed, warn when
    /// none of the listed names resolve. Duplicates collapse.
    pub fn severities(&self) -> Vec<Severity> {
        if self.levels.is_empty() {
            return Severity::ALL.to_vec();
        }
        let registry = levels();
        let mut resolved = Vec::new();
        for name in &self.levels {
            if let Some(level) = registry.get(name) {
                if !resolved.contains(&level) {
                    resolved.push(level);
                }
            }
        }
        if resolved.is_empty() {
            resolved.push(Severity::Warn);
        }
        resolved
    }

    /// The url with an `http://` scheme supplied when missing.
    pub fn full_url(&self) -> String {
        if self.url.starts_with("http:") || self.url.starts_with("https:") {
            self.url.clone()
        } else {
            format!("http://{}", self.url)
        }
    }

    /// The validated request method, defaulting to post.
    pub fn request_method(&self) -> String {
        let method = self.method.to_lowercase();
        if ALL_SUPPORT_METHODS.contains(&method.as_str()) {
            method
        } else {
            DEFAULT_METHOD.to_string()
        }
    }

    /// The validated content type, defaulting to json.
    pub fn request_content_type(&self) -> String {
        let content_type = self.content_type.to_lowercase();
        if ALL_SUPPORT_CONTENT_TYPES.contains(&content_type.as_str()) {
            content_type
        } else {
            DEFAULT_CONTENT_TYPE.to_string()
        }
    }
}

/// Delivery side of a webhook.
pub trait WebHookClient: Send + Sync {
    fn send(&self, params: &BTreeMap<String, String>) -> Result<(), HookError>;
}

/// HTTP delivery honoring the configured method and content type.
pub struct HttpClient {
    url: String,
    method: String,
    content_type: String,
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            content_type: content_type.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn apply_body(
        &self,
        builder: reqwest::blocking::RequestBuilder,
        params: &BTreeMap<String, String>,
    ) -> reqwest::blocking::RequestBuilder {
        match self.content_type.as_str() {
            CONTENT_TYPE_FORM => builder.form(params),
            CONTENT_TYPE_QUERY | CONTENT_TYPE_PATH => builder.query(params),
            CONTENT_TYPE_TEXT | CONTENT_TYPE_XML => {
                let mut body = String::new();
                for (key, value) in params {
                    body.push_str(&format!("{key}={value}\n"));
                }
                builder.body(body)
            }
            _ => builder.json(params),
        }
    }
}

impl WebHookClient for HttpClient {
    fn send(&self, params: &BTreeMap<String, String>) -> Result<(), HookError> {
        if self.url.is_empty() {
            return Err(HookError::InvalidArgs(
                "http client miss request url".to_string(),
            ));
        }
        let request = match self.method.as_str() {
            "get" => self.client.get(&self.url).query(params),
            "post" => self.apply_body(self.client.post(&self.url), params),
            "put" => self.apply_body(self.client.put(&self.url), params),
            "delete" => self.apply_body(self.client.delete(&self.url), params),
            other => {
                return Err(HookError::InvalidArgs(format!(
                    "unsupported method '{other}'"
                )))
            }
        };
        let response = request
            .send()
            .map_err(|err| HookError::Delivery(err.to_string()))?;
        if !response.status().is_success() {
            return Err(HookError::Delivery(format!(
                "response error: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// A hook that delivers matching entries through a webhook client.
pub struct WebHook {
    options: NotifyOptions,
    enabled: Vec<Severity>,
    client: OnceLock<Arc<dyn WebHookClient>>,
}

impl WebHook {
    pub fn new(options: NotifyOptions) -> Self {
        let enabled = options.severities();
        Self {
            options,
            enabled,
            client: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    /// Inject a delivery client; returns false once a client exists.
    pub fn set_client(&self, client: Arc<dyn WebHookClient>) -> bool {
        self.client.set(client).is_ok()
    }

    fn client(&self) -> &Arc<dyn WebHookClient> {
        self.client.get_or_init(|| {
            Arc::new(HttpClient::new(
                self.options.full_url(),
                self.options.request_method(),
                self.options.request_content_type(),
            ))
        })
    }
}

impl Hook for WebHook {
    fn levels(&self) -> Vec<Severity> {
        self.enabled.clone()
    }

    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        if self.options.url.is_empty() && self.client.get().is_none() {
            return Err(HookError::InvalidArgs("webhook missing url".to_string()));
        }
        if !self.enabled.contains(&entry.level) {
            return Ok(());
        }
        self.client().send(&entry.fields)
    }
}

/// Factory building webhooks from pre-decoded options.
pub struct NotifyFactory {
    options: NotifyOptions,
}

impl NotifyFactory {
    pub fn new(options: NotifyOptions) -> Self {
        Self { options }
    }

    /// Discover a webhook declared in the environment under `prefix`.
    ///
    /// A bare name gets a `_` separator appended (`alert` reads as
    /// `ALERT_URL`, ...). Returns `None` unless a url is configured there.
    pub fn from_env_prefix(prefix: &str) -> Option<Self> {
        let prefix = if prefix.contains('_') {
            prefix.to_string()
        } else {
            format!("{prefix}_")
        };
        NotifyOptions::from_env_prefix(&prefix)
            .filter(|options| !options.url.is_empty())
            .map(Self::new)
    }

    pub fn options(&self) -> &NotifyOptions {
        &self.options
    }
}

impl HookFactory for NotifyFactory {
    fn face(&self) -> &str {
        &self.options.name
    }

    fn create(&self, args: &[String]) -> Result<Box<dyn Hook>, HookError> {
        let options = match args.first() {
            None => self.options.clone(),
            Some(spec) => NotifyOptions::from_spec(spec)
                .ok_or_else(|| HookError::InvalidArgs(format!("invalid notify spec '{spec}'")))?,
        };
        Ok(Box::new(WebHook::new(options)))
    }
}

/// Tracks webhook factories and feeds them into a [`HookProvider`].
///
/// Unregistered names are looked up in the environment on demand and cached.
#[derive(Default)]
pub struct NotifyRegistry {
    factories: Mutex<HashMap<String, Arc<NotifyFactory>>>,
}

impl NotifyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, factory: NotifyFactory) -> Result<(), HookError> {
        let face = factory.face().to_string();
        if face.is_empty() {
            return Err(HookError::InvalidArgs("factory miss face id".to_string()));
        }
        self.factories
            .lock()
            .entry(face)
            .or_insert_with(|| Arc::new(factory));
        Ok(())
    }

    pub fn hooks(&self) -> Vec<String> {
        self.factories.lock().keys().cloned().collect()
    }

    /// A registered factory, or one discovered from the environment.
    pub fn lookup(&self, name: &str) -> Option<Arc<NotifyFactory>> {
        if name.is_empty() {
            return None;
        }
        if let Some(factory) = self.factories.lock().get(name) {
            return Some(Arc::clone(factory));
        }
        let discovered = Arc::new(NotifyFactory::from_env_prefix(name)?);
        self.factories
            .lock()
            .insert(name.to_string(), Arc::clone(&discovered));
        Some(discovered)
    }

    /// Register every known factory into `provider`.
    pub fn register_into(&self, provider: &HookProvider) {
        for name in self.hooks() {
            if let Some(factory) = self.lookup(&name) {
                let creator: Creator =
                    Arc::new(move |args: &[String]| factory.create(args));
                provider.register(name, creator);
            }
        }
    }
}
