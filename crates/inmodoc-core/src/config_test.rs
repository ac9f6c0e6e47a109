use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_rejects_unknown() {
    let result = parse_environment("staging");
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INMODOC_ENV"),
        "expected InvalidEnvVar(INMODOC_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.aliases_path.is_none());
    assert!((cfg.extraction.match_threshold - 0.6).abs() < f64::EPSILON);
    assert!((cfg.extraction.min_confidence - 50.0).abs() < f64::EPSILON);
    assert_eq!(cfg.extraction.regex, RegexConfidence::default());
    assert!(cfg.llm.api_key.is_none());
    assert_eq!(cfg.llm.base_url, "https://api.openai.com/v1/");
    assert_eq!(cfg.llm.model, "gpt-4o");
    assert_eq!(cfg.llm.timeout_secs, 60);
    assert_eq!(cfg.llm.max_retries, 2);
    assert_eq!(cfg.llm.retry_backoff_base_ms, 1_000);
    assert_eq!(cfg.llm.max_concurrency, 1);
    assert_eq!(cfg.llm.breaker_threshold, 3);
    assert!((cfg.llm.default_confidence - 75.0).abs() < f64::EPSILON);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("INMODOC_ENV", "production");
    map.insert("INMODOC_LOG_LEVEL", "debug");
    map.insert("INMODOC_ALIASES_PATH", "./config/aliases.yaml");
    map.insert("INMODOC_MATCH_THRESHOLD", "0.75");
    map.insert("INMODOC_MIN_CONFIDENCE", "40");
    map.insert("INMODOC_CONTAINMENT", "whole_word");
    map.insert("OPENAI_API_KEY", "sk-test");
    map.insert("INMODOC_LLM_MODEL", "gpt-4o-mini");
    map.insert("INMODOC_LLM_MAX_CONCURRENCY", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(
        cfg.aliases_path.as_deref(),
        Some(std::path::Path::new("./config/aliases.yaml"))
    );
    assert!((cfg.extraction.match_threshold - 0.75).abs() < f64::EPSILON);
    assert!((cfg.extraction.min_confidence - 40.0).abs() < f64::EPSILON);
    assert_eq!(cfg.extraction.containment, ContainmentRule::WholeWord);
    assert_eq!(cfg.llm.api_key.as_deref(), Some("sk-test"));
    assert_eq!(cfg.llm.model, "gpt-4o-mini");
    assert_eq!(cfg.llm.max_concurrency, 4);
}

#[test]
fn build_app_config_rejects_threshold_out_of_range() {
    let mut map = HashMap::new();
    map.insert("INMODOC_MATCH_THRESHOLD", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INMODOC_MATCH_THRESHOLD"),
        "expected InvalidEnvVar(INMODOC_MATCH_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("INMODOC_LLM_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INMODOC_LLM_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INMODOC_LLM_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("INMODOC_LLM_MAX_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INMODOC_LLM_MAX_CONCURRENCY"),
        "expected InvalidEnvVar(INMODOC_LLM_MAX_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(matches!(
        cfg.llm.require_api_key(),
        Err(ConfigError::MissingEnvVar(ref v)) if v == "OPENAI_API_KEY"
    ));
}

#[test]
fn llm_settings_debug_redacts_api_key() {
    let settings = LlmSettings {
        api_key: Some("sk-secret".to_string()),
        ..LlmSettings::default()
    };
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("sk-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn containment_defaults_to_substring() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.extraction.containment, ContainmentRule::Substring);
}

#[test]
fn build_app_config_rejects_unknown_containment() {
    let mut map = HashMap::new();
    map.insert("INMODOC_CONTAINMENT", "fuzzy");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INMODOC_CONTAINMENT"),
        "expected InvalidEnvVar(INMODOC_CONTAINMENT), got: {result:?}"
    );
}
