//! Basic usage example

use hookconf::{from_env, EnvDecode};

#[derive(Debug, Default, EnvDecode)]
struct Config {
    // Loaded from NAME environment variable
    #[env("name")]
    pub name: String,

    // With default value
    #[env("password,123")]
    pub password: String,

    // Numeric type
    #[env("number")]
    pub number: i32,

    // Boolean type
    #[env("boolean")]
    pub boolean: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("NAME", "demo");
    std::env::set_var("NUMBER", "11");
    std::env::set_var("BOOLEAN", "true");

    // Load configuration
    let config: Config = from_env()?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Password: {}", config.password);
    println!("  Number: {}", config.number);
    println!("  Boolean: {}", config.boolean);

    Ok(())
}
