use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub assistant_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub typing_delay: Duration,
    pub history_limit: usize,
    pub knowledge_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl Config {
    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let assistant_name = lookup("CONCIERGE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "Concierge".to_string());

        let contact_email = lookup("CONCIERGE_CONTACT_EMAIL")
            .unwrap_or_else(|| "hello@example.com".to_string());

        let contact_phone = lookup("CONCIERGE_CONTACT_PHONE")
            .unwrap_or_else(|| "+1 (555) 010-0199".to_string());

        let typing_delay_ms = lookup("CONCIERGE_TYPING_DELAY_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(600);

        // Room for at least one question and its answer.
        let history_limit = lookup("CONCIERGE_HISTORY_LIMIT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(50)
            .max(2);

        let knowledge_path = lookup("CONCIERGE_KNOWLEDGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = lookup("CONCIERGE_LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            assistant_name,
            contact_email,
            contact_phone,
            typing_delay: Duration::from_millis(typing_delay_ms),
            history_limit,
            knowledge_path,
            log_dir,
        }
    }

    /// Per-user knowledge file consulted when no explicit path is configured.
    pub fn default_knowledge_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("concierge").join("knowledge.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.assistant_name, "Concierge");
        assert_eq!(config.typing_delay, Duration::from_millis(600));
        assert_eq!(config.history_limit, 50);
        assert!(config.knowledge_path.is_none());
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CONCIERGE_NAME", "Ava"),
            ("CONCIERGE_CONTACT_EMAIL", "team@acme.test"),
            ("CONCIERGE_TYPING_DELAY_MS", "0"),
            ("CONCIERGE_HISTORY_LIMIT", "10"),
            ("CONCIERGE_KNOWLEDGE_PATH", "/tmp/kb.json"),
        ]);
        assert_eq!(config.assistant_name, "Ava");
        assert_eq!(config.contact_email, "team@acme.test");
        assert_eq!(config.typing_delay, Duration::ZERO);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.knowledge_path, Some(PathBuf::from("/tmp/kb.json")));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[
            ("CONCIERGE_TYPING_DELAY_MS", "soon"),
            ("CONCIERGE_HISTORY_LIMIT", "-3"),
        ]);
        assert_eq!(config.typing_delay, Duration::from_millis(600));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn history_limit_has_a_floor() {
        let config = config_from(&[("CONCIERGE_HISTORY_LIMIT", "1")]);
        assert_eq!(config.history_limit, 2);
    }
}
