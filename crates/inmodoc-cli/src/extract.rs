//! `extract` command: runs the rule-based and, optionally, the LLM pipeline
//! over one OCR payload and prints the output contract.

use std::path::Path;

use anyhow::Context;
use inmodoc_core::{AppConfig, OcrInput};
use inmodoc_extract::{collect_candidates, ExtractionOutput, FieldDictionary};
use inmodoc_llm::{collect_llm_candidates, LlmClient};

/// Which pipelines contribute candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    RulesOnly,
    RulesAndLlm,
}

impl Mode {
    /// `--llm` forces the LLM path and `--rules-only` disables it; otherwise
    /// it runs whenever an API key is configured.
    pub(crate) fn resolve(llm: bool, rules_only: bool, config: &AppConfig) -> Self {
        if rules_only {
            Mode::RulesOnly
        } else if llm || config.llm.api_key.is_some() {
            Mode::RulesAndLlm
        } else {
            Mode::RulesOnly
        }
    }
}

/// Reads `path` as an [`OcrInput`] JSON document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid payload.
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<OcrInput> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid OCR payload", path.display()))
}

/// Extracts fields from the payload at `path` and prints them to stdout.
///
/// Candidates from both pipelines are consolidated together, so the LLM and
/// the rules compete per column on confidence.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded, the LLM client cannot be
/// built (e.g. no API key with `--llm`) or the output cannot be serialized.
pub(crate) async fn run_extract(
    config: &AppConfig,
    dictionary: &FieldDictionary,
    path: &Path,
    mode: Mode,
    pretty: bool,
) -> anyhow::Result<()> {
    let input = read_input(path).await?;
    tracing::info!(
        path = %path.display(),
        chars = input.extracted_text.len(),
        blocks = input.blocks.len(),
        ?mode,
        "extracting fields"
    );

    let mut candidates = collect_candidates(&input, dictionary, &config.extraction);
    if mode == Mode::RulesAndLlm {
        let client = LlmClient::new(&config.llm).context("failed to build LLM client")?;
        candidates.extend(collect_llm_candidates(&client, &input, dictionary, &config.llm).await);
    }

    let output = ExtractionOutput::from_candidates(candidates, config.extraction.min_confidence);
    tracing::info!(fields = output.extracted_fields.len(), "extraction complete");

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
