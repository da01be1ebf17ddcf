use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tix").join("config.toml"))
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        toml::from_str(&content).unwrap_or_default()
    }

    /// Highest priority first: CLI flag, then TIX_BASE_URL, then the
    /// config file (or its compiled default).
    pub fn resolve_base_url(&self, cli_override: Option<String>) -> String {
        self.resolve_with(cli_override, std::env::var("TIX_BASE_URL").ok())
    }

    fn resolve_with(&self, cli: Option<String>, env: Option<String>) -> String {
        cli.or_else(|| env.filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config() {
        let config: Config = toml::from_str(r#"base_url = "https://desk.example.com""#).unwrap();
        assert_eq!(config.base_url, "https://desk.example.com");
    }

    #[test]
    fn missing_key_uses_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn cli_flag_wins() {
        let config = Config {
            base_url: "http://from-config".to_string(),
        };
        assert_eq!(
            config.resolve_with(
                Some("http://from-cli".to_string()),
                Some("http://from-env".to_string())
            ),
            "http://from-cli"
        );
    }

    #[test]
    fn env_var_beats_config_file() {
        let config = Config {
            base_url: "http://from-config".to_string(),
        };
        assert_eq!(
            config.resolve_with(None, Some("http://from-env".to_string())),
            "http://from-env"
        );
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let config = Config {
            base_url: "http://from-config".to_string(),
        };
        assert_eq!(
            config.resolve_with(None, Some(String::new())),
            "http://from-config"
        );
    }
}
