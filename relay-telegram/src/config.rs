//! Relay config: Telegram access, logging, rules file. Env for scalars, TOML for rules.

use anyhow::{Context, Result};
use relay_engine::RoutingRule;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Runtime configuration (everything except the routing rules themselves).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// Path of the TOML routing-rules file
    pub rules_file: String,
    /// Budget for each outbound call, seconds
    pub call_timeout_secs: u64,
}

impl RelayConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/tg-relay.log".to_string());
        let rules_file =
            env::var("RELAY_RULES_FILE").unwrap_or_else(|_| "relay.toml".to_string());
        let call_timeout_secs = env::var("RELAY_CALL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            rules_file,
            call_timeout_secs,
        })
    }

    /// Construct with the given token, everything else at defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: "logs/tg-relay.log".to_string(),
            rules_file: "relay.toml".to_string(),
            call_timeout_secs: 30,
        }
    }

    /// Validate config (API URL must parse if set, timeout must be nonzero).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.call_timeout_secs == 0 {
            anyhow::bail!("RELAY_CALL_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    forward: Vec<RoutingRule>,
}

/// Loads routing rules from a TOML file with one `[[forward]]` table per rule:
///
/// ```toml
/// [[forward]]
/// source = 100
/// destinations = [200, 300]
/// ```
///
/// An unreadable, unparsable, or empty rules file is a startup failure.
pub fn load_routing_rules(path: &Path) -> Result<Vec<RoutingRule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read rules file {}", path.display()))?;
    let file: RulesFile = toml::from_str(&raw)
        .with_context(|| format!("Parse rules file {}", path.display()))?;
    if file.forward.is_empty() {
        anyhow::bail!("No [[forward]] rules in {}", path.display());
    }
    Ok(file.forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_with_token_defaults() {
        let config = RelayConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.call_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = RelayConfig::with_token("t".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = RelayConfig::with_token("t".to_string());
        config.call_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_routing_rules_parses_forward_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[forward]]\nsource = 100\ndestinations = [200, 300]\n\n\
             [[forward]]\nsource = 100\ndestinations = [400]"
        )
        .unwrap();

        let rules = load_routing_rules(file.path()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].source, 100);
        assert_eq!(rules[0].destinations, vec![200, 300]);
        assert_eq!(rules[1].destinations, vec![400]);
    }

    #[test]
    fn test_load_routing_rules_missing_file_fails() {
        assert!(load_routing_rules(Path::new("/nonexistent/relay.toml")).is_err());
    }

    #[test]
    fn test_load_routing_rules_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_routing_rules(file.path()).is_err());
    }
}
