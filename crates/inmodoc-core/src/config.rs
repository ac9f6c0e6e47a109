use crate::app_config::{
    AppConfig, ContainmentRule, Environment, ExtractionConfig, LlmSettings, RegexConfidence,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bounded = |var: &str, default: &str, min: f64, max: f64| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !(min..=max).contains(&value) {
            return Err(invalid(var, format!("must be between {min} and {max}")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("INMODOC_ENV", "development"))?;
    let log_level = or_default("INMODOC_LOG_LEVEL", "info");
    let aliases_path = lookup("INMODOC_ALIASES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let extraction = ExtractionConfig {
        match_threshold: parse_bounded("INMODOC_MATCH_THRESHOLD", "0.6", 0.0, 1.0)?,
        containment: parse_containment(&or_default("INMODOC_CONTAINMENT", "substring"))?,
        min_confidence: parse_bounded("INMODOC_MIN_CONFIDENCE", "50", 0.0, 100.0)?,
        regex: RegexConfidence::default(),
        line_confidence_factor: ExtractionConfig::default().line_confidence_factor,
    };

    let max_concurrency = parse_usize("INMODOC_LLM_MAX_CONCURRENCY", "1")?;
    if max_concurrency == 0 {
        return Err(invalid(
            "INMODOC_LLM_MAX_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    let defaults = LlmSettings::default();
    let llm = LlmSettings {
        api_key: lookup("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        base_url: or_default("INMODOC_LLM_BASE_URL", &defaults.base_url),
        model: or_default("INMODOC_LLM_MODEL", &defaults.model),
        timeout_secs: parse_u64("INMODOC_LLM_TIMEOUT_SECS", "60")?,
        max_retries: parse_u32("INMODOC_LLM_MAX_RETRIES", "2")?,
        retry_backoff_base_ms: parse_u64("INMODOC_LLM_RETRY_BACKOFF_BASE_MS", "1000")?,
        max_concurrency,
        breaker_threshold: parse_u32("INMODOC_LLM_BREAKER_THRESHOLD", "3")?,
        default_confidence: parse_bounded("INMODOC_LLM_DEFAULT_CONFIDENCE", "75", 0.0, 100.0)?,
    };

    Ok(AppConfig {
        env,
        log_level,
        aliases_path,
        extraction,
        llm,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INMODOC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_containment(s: &str) -> Result<ContainmentRule, ConfigError> {
    match s {
        "substring" => Ok(ContainmentRule::Substring),
        "whole_word" => Ok(ContainmentRule::WholeWord),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INMODOC_CONTAINMENT".to_string(),
            reason: format!("unknown containment rule '{other}'; expected substring or whole_word"),
        }),
    }
}

impl LlmSettings {
    /// Returns the API key, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `OPENAI_API_KEY` is unset.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
