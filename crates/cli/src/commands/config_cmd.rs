//! `agentboard config` — Show the effective configuration.

use agentboard_config::AppConfig;

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(agentboard_core::Error::from)?;
    let config_path = AppConfig::config_dir().join("config.toml");

    if config_path.exists() {
        println!("# Loaded from {}", config_path.display());
    } else {
        println!("# No config file at {}, showing defaults", config_path.display());
    }
    if !config.has_api_key() {
        println!("# No API key set (set AGENTBOARD_API_KEY, OPENROUTER_API_KEY or OPENAI_API_KEY)");
    }
    println!();
    print!("{}", config.to_redacted_toml());

    Ok(())
}
