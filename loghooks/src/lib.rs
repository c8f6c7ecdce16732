//! Environment-configured logging hooks.
//!
//! Hooks are delivery targets for log entries: a file-rotation hook and an
//! HTTP webhook hook ship with the crate, both configured through
//! environment variables decoded with [`hookconf`]. Factories register in a
//! [`HookProvider`] under a textual name and build hooks from small textual
//! argument specs.
//!
//! ```no_run
//! use loghooks::{provider, Entry, Severity};
//!
//! let hook = provider().resolve("rotate", &[]).unwrap();
//! hook.fire(&Entry::new(Severity::Error, "disk almost full"))
//!     .unwrap();
//! ```

use std::sync::{Arc, OnceLock};

mod error;
mod hook;
mod level;
mod notify;
mod provider;
mod rotate;
mod spec;

pub use error::HookError;
pub use hook::{Creator, Entry, Hook, HookFactory};
pub use level::{levels, severity_of, EnumEntry, EnumSet, Severity};
pub use notify::{
    HttpClient, NotifyFactory, NotifyOptions, NotifyRegistry, WebHook, WebHookClient,
};
pub use provider::HookProvider;
pub use rotate::{RotateHook, RotateHookFactory, RotateOptions, HOOK_NAME as ROTATE_HOOK_NAME};

/// The process-wide provider, with the rotation hook factory pre-registered.
pub fn provider() -> &'static HookProvider {
    static PROVIDER: OnceLock<HookProvider> = OnceLock::new();
    PROVIDER.get_or_init(|| {
        let provider = HookProvider::new();
        provider.add(RotateHookFactory::new());
        provider
    })
}

/// The process-wide webhook registry backing environment discovery.
fn notify_registry() -> &'static NotifyRegistry {
    static REGISTRY: OnceLock<NotifyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(NotifyRegistry::new)
}

/// Register a factory with the process-wide provider.
pub fn register<F: HookFactory + 'static>(factory: F) -> bool {
    provider().add(factory)
}

/// Build a hook from the process-wide provider.
///
/// A name with no registered factory is looked up in the environment as a
/// webhook declaration (`ALERT_URL`, `ALERT_LEVEL`, ... for `alert`); a
/// discovered factory is registered for subsequent calls.
pub fn resolve(name: &str, args: &[String]) -> Result<Box<dyn Hook>, HookError> {
    let provider = provider();
    match provider.resolve(name, args) {
        Err(err) if err.is_not_exists() => {
            let factory = notify_registry().lookup(name).ok_or(HookError::NotExists)?;
            let creator: Creator = Arc::new(move |args: &[String]| factory.create(args));
            provider.register(name, creator);
            provider.resolve(name, args)
        }
        result => result,
    }
}

/// Whether a factory is registered under `name`.
pub fn exists(name: &str) -> bool {
    provider().exists(name)
}
