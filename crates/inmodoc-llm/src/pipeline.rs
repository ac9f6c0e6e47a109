//! LLM extraction: one forced function call per category, merged in fixed
//! category order and consolidated like the rule-based path.

use futures::stream::{self, StreamExt};

use inmodoc_core::{ExtractedFieldResult, ExtractionConfig, LlmSettings, OcrInput};
use inmodoc_extract::{ExtractionOutput, FieldDictionary};

use crate::breaker::CircuitBreaker;
use crate::client::LlmClient;
use crate::error::LlmError;
use crate::functions::{category_functions, CategoryFunction};
use crate::mapping::map_arguments;
use crate::prompt::{is_blank, user_prompt, SYSTEM_PROMPT};

/// Runs every category call and returns the unconsolidated candidates.
///
/// Up to `settings.max_concurrency` calls are in flight at once; results are
/// merged in category order regardless of completion order. A failed
/// category is logged and skipped. After `settings.breaker_threshold`
/// consecutive API failures the remaining categories are skipped.
pub async fn collect_llm_candidates(
    client: &LlmClient,
    input: &OcrInput,
    dictionary: &FieldDictionary,
    settings: &LlmSettings,
) -> Vec<ExtractedFieldResult> {
    if is_blank(input) {
        tracing::info!("LLM extraction: document has no text; skipping");
        return Vec::new();
    }

    let functions = category_functions();
    let breaker = CircuitBreaker::new(settings.breaker_threshold);

    let per_category: Vec<Vec<ExtractedFieldResult>> = stream::iter(&functions)
        .map(|function| run_category(client, function, input, dictionary, settings, &breaker))
        .buffered(settings.max_concurrency.max(1))
        .collect()
        .await;

    let results: Vec<ExtractedFieldResult> = per_category.into_iter().flatten().collect();
    tracing::info!(
        candidates = results.len(),
        circuit_open = breaker.is_open(),
        "LLM extraction complete"
    );
    results
}

/// LLM extraction of one OCR payload, consolidated and filtered by
/// `extraction.min_confidence`.
pub async fn extract_fields_with_llm(
    client: &LlmClient,
    input: &OcrInput,
    dictionary: &FieldDictionary,
    settings: &LlmSettings,
    extraction: &ExtractionConfig,
) -> ExtractionOutput {
    let candidates = collect_llm_candidates(client, input, dictionary, settings).await;
    ExtractionOutput::from_candidates(candidates, extraction.min_confidence)
}

async fn run_category(
    client: &LlmClient,
    function: &CategoryFunction,
    input: &OcrInput,
    dictionary: &FieldDictionary,
    settings: &LlmSettings,
    breaker: &CircuitBreaker,
) -> Vec<ExtractedFieldResult> {
    if breaker.is_open() {
        tracing::warn!(
            function = function.name,
            "LLM circuit open; skipping category"
        );
        return Vec::new();
    }

    let definition = function.definition();
    let prompt = user_prompt(function, input);
    match client
        .call_function(SYSTEM_PROMPT, &prompt, &definition)
        .await
    {
        Ok(arguments) => {
            breaker.record_success();
            let results = map_arguments(
                function,
                &arguments,
                dictionary,
                input.confidence,
                settings.default_confidence,
            );
            tracing::debug!(
                function = function.name,
                fields = results.len(),
                "LLM category extracted"
            );
            results
        }
        Err(err) => {
            tracing::warn!(
                function = function.name,
                error = %err,
                "LLM category failed; skipping"
            );
            if counts_against_breaker(&err) {
                if breaker.record_failure() {
                    tracing::warn!(
                        failures = breaker.consecutive_failures(),
                        "LLM circuit opened; remaining categories will be skipped"
                    );
                }
            } else {
                breaker.record_success();
            }
            Vec::new()
        }
    }
}

/// Malformed answers mean the API itself is healthy; only transport and API
/// errors move the breaker.
fn counts_against_breaker(err: &LlmError) -> bool {
    !matches!(
        err,
        LlmError::MissingToolCall { .. } | LlmError::InvalidArguments { .. }
    )
}
