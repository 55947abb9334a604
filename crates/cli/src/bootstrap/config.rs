use ferrous_dnswire_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Writes the built-in defaults as a TOML file to start editing from.
pub fn write_default_config(path: &str) -> anyhow::Result<()> {
    Config::default().save(path)?;
    Ok(())
}
