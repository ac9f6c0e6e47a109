//! Retry with exponential back-off and jitter for the chat-completions client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (timeouts, connect failures, HTTP 429 and 5xx). Everything
//! else is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::LlmError;

/// Upper bound for a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 (rate limited) and 5xx responses.
///
/// **Not retriable:**
/// - Other 4xx responses, e.g. a bad API key or an unknown model.
/// - [`LlmError::ApiError`], [`LlmError::Deserialize`], missing or invalid
///   tool calls: the same request would get the same answer.
pub(crate) fn is_retriable(err: &LlmError) -> bool {
    match err {
        LlmError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status()
                    .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
        }
        LlmError::Status { status, .. } => *status == 429 || (500..600).contains(status),
        LlmError::ApiError(_)
        | LlmError::Deserialize { .. }
        | LlmError::MissingToolCall { .. }
        | LlmError::InvalidArguments { .. }
        | LlmError::InvalidBaseUrl { .. }
        | LlmError::Config(_) => false,
    }
}

/// Back-off before retry number `attempt` (1-based): `base × 2^(attempt-1)`,
/// capped at [`MAX_DELAY_MS`], then scaled by a jitter factor in `[0.75, 1.25)`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, jitter: f64) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    (capped as f64 * (jitter * 0.5 + 0.75)) as u64
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
///
/// Delay is capped at 30 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt, rand::random::<f64>());
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "LLM transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
