//! Configuration command.

use crate::config::{self, Config};
use crate::error::Result;

/// Print the config file path and effective settings, optionally saving them
pub fn cmd_config(config: &Config, save: bool) -> Result<()> {
    match config::config_path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (no config directory)"),
    }
    print!("{}", describe(config));

    if save {
        let path = config::save(config)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn describe(config: &Config) -> String {
    let dir = |d: Option<std::path::PathBuf>| {
        d.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    };
    let key = if config.omdb_api_key().is_some() {
        "set"
    } else {
        "not set (IMDb ratings disabled)"
    };

    format!(
        "Data directory: {}\nLog directory: {}\nOMDb API key: {}\nMUBI sleep: {}s\nOMDb sleep: {}ms\nReuse same-day cache: {}\n",
        dir(config.data_dir()),
        dir(config.log_dir()),
        key,
        config.pipeline.mubi_sleep_secs,
        config.pipeline.omdb_sleep_ms,
        config.pipeline.reuse_same_day_cache,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_describe_hides_api_key() {
        let mut config = Config::default();
        config.credentials.omdb_api_key = Some("secret-key".to_string());
        config.paths.data_dir = Some(PathBuf::from("/data"));

        let text = describe(&config);
        assert!(!text.contains("secret-key"));
        assert!(text.contains("OMDb API key: set"));
        assert!(text.contains("Data directory: /data"));
        assert!(text.contains("Log directory: /data"));
    }
}
