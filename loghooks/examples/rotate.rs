use std::env;

use loghooks::{resolve, Entry, Severity, ROTATE_HOOK_NAME};

fn main() {
    env::set_var("LOG_NAME", "demo.log");
    env::set_var("LEVEL", "info");
    env::set_var("DISABLE_COLORS", "true");

    let hook = resolve(ROTATE_HOOK_NAME, &[]).unwrap();
    hook.fire(&Entry::new(Severity::Warn, "service started").with_field("pid", 4242))
        .unwrap();
    hook.fire(&Entry::new(Severity::Error, "upstream unreachable").with_field("retries", 3))
        .unwrap();

    println!("wrote entries via the '{ROTATE_HOOK_NAME}' hook");
}
