use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Both binaries (api and worker) load the same config at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// DEBUG_AUTH=true (case-insensitive) enables the /api/debug/cookies echo.
    pub debug_auth: bool,
    /// APP_ENV=production switches cookies to Secure.
    pub production: bool,
    /// ENABLE_LLM_QUESTIONS=true swaps the bank question source for the LLM one.
    pub llm_questions: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            debug_auth: flag_enabled(std::env::var("DEBUG_AUTH").ok().as_deref()),
            production: std::env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            llm_questions: flag_enabled(std::env::var("ENABLE_LLM_QUESTIONS").ok().as_deref()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// A flag is enabled only by the literal string "true", case-insensitive.
/// Unset, empty, and every other value disable it.
pub fn flag_enabled(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_unset_is_disabled() {
        assert!(!flag_enabled(None));
    }

    #[test]
    fn test_flag_empty_is_disabled() {
        assert!(!flag_enabled(Some("")));
    }

    #[test]
    fn test_flag_other_values_are_disabled() {
        assert!(!flag_enabled(Some("1")));
        assert!(!flag_enabled(Some("yes")));
        assert!(!flag_enabled(Some("false")));
        assert!(!flag_enabled(Some("truee")));
    }

    #[test]
    fn test_flag_true_any_case_is_enabled() {
        assert!(flag_enabled(Some("true")));
        assert!(flag_enabled(Some("TRUE")));
        assert!(flag_enabled(Some("True")));
        assert!(flag_enabled(Some("tRuE")));
    }
}
