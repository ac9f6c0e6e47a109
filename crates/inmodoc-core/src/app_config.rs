use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Confidence heuristic for regex captures: `base`, plus `length_bonus` when
/// the capture is longer than two characters, plus `label_bonus` when the
/// match carries a `label:` colon, capped at `cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegexConfidence {
    pub base: f64,
    pub length_bonus: f64,
    pub label_bonus: f64,
    pub cap: f64,
}

impl Default for RegexConfidence {
    fn default() -> Self {
        Self {
            base: 60.0,
            length_bonus: 20.0,
            label_bonus: 15.0,
            cap: 95.0,
        }
    }
}

/// How the matcher scores a label that contains an alias, or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentRule {
    /// Any substring in either direction, so fused OCR labels such as
    /// `preciototal` still reach `precio`.
    #[default]
    Substring,
    /// Only whole runs of words; short aliases like `tel` no longer hit
    /// inside `hotel`.
    WholeWord,
}

/// Tunables for the rule-based extractors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    /// Minimum label similarity in `[0, 1]` for the matcher to accept an alias.
    pub match_threshold: f64,
    pub containment: ContainmentRule,
    /// Consolidated results below this confidence are dropped from the output.
    pub min_confidence: f64,
    pub regex: RegexConfidence,
    /// Multiplier applied to `label: value` lines found in free text, which
    /// are less reliable than fields the OCR service detected itself.
    pub line_confidence_factor: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.6,
            containment: ContainmentRule::Substring,
            min_confidence: 50.0,
            regex: RegexConfidence::default(),
            line_confidence_factor: 0.9,
        }
    }
}

/// Settings for the hosted LLM extraction path.
#[derive(Clone, PartialEq)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Category calls in flight at once; `1` runs them sequentially.
    pub max_concurrency: usize,
    /// Consecutive failed category calls before the remaining ones are skipped.
    pub breaker_threshold: u32,
    /// Confidence assumed when the model omits its own.
    pub default_confidence: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1/".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: 60,
            max_retries: 2,
            retry_backoff_base_ms: 1_000,
            max_concurrency: 1,
            breaker_threshold: 3,
            default_confidence: 75.0,
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("max_concurrency", &self.max_concurrency)
            .field("breaker_threshold", &self.breaker_threshold)
            .field("default_confidence", &self.default_confidence)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub aliases_path: Option<PathBuf>,
    pub extraction: ExtractionConfig,
    pub llm: LlmSettings,
}
