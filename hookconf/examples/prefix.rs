//! Example demonstrating decoder-level prefix, suffix and case modes

use hookconf::{CaseMode, EnvDecode, EnvDecoder};

#[derive(Debug, Default, EnvDecode)]
struct Config {
    // Resolves to MYAPP_URL_LOGGER with the settings below
    #[env("url")]
    pub url: String,

    #[env("method,post")]
    pub method: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_URL_LOGGER", "http://127.0.0.1/hook");

    let mut decoder = EnvDecoder::new(CaseMode::Upper);
    decoder.set_prefix("myapp_").set_suffix("_logger");

    let mut config = Config::default();
    decoder.marshal(&mut config)?;

    println!("Configuration with prefix 'myapp_' and suffix '_logger':");
    println!("  Url: {}", config.url);
    println!("  Method: {}", config.method);

    Ok(())
}
