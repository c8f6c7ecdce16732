//! Example demonstrating nested structure decoding

use std::time::Duration;

use chrono::NaiveDateTime;
use hookconf::{from_env, EnvDecode};

#[derive(Debug, Default, EnvDecode)]
struct Images {
    #[env("image_tag,default")]
    pub tag: String,

    #[env("create_at")]
    pub create_at: NaiveDateTime,

    #[env("duration,10s")]
    pub duration: Duration,
}

#[derive(Debug, Default, EnvDecode)]
struct Info {
    #[env("id,1")]
    pub id: i32,

    #[env("avatar")]
    pub avatar: String,

    // Nested fields resolve their own keys; no path qualification
    #[env(nested)]
    pub images: Images,
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    #[env("name")]
    pub name: String,

    #[env(nested)]
    pub info: Info,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("NAME", "demo");
    std::env::set_var("ID", "20");
    std::env::set_var("AVATAR", "http://127.0.0.1/image.png");
    std::env::set_var("CREATE_AT", "2006-01-02 15:04:05");

    let config: Config = from_env()?;

    println!("Nested configuration:");
    println!("  Name: {}", config.name);
    println!("  Id: {}", config.info.id);
    println!("  Avatar: {}", config.info.avatar);
    println!("  Image tag: {}", config.info.images.tag);
    println!("  Created at: {}", config.info.images.create_at);
    println!("  Duration: {:?}", config.info.images.duration);

    Ok(())
}
