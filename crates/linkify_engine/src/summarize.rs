use async_trait::async_trait;
use linkify_logging::link_debug;
use serde_json::{json, Value};

use crate::IngestError;

/// Settings for the local inference endpoint.
#[derive(Debug, Clone)]
pub struct SummarizeSettings {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model identifier passed through to the endpoint.
    pub model: String,
    /// Prompt budget: only this many leading characters of the extracted
    /// text are embedded in the prompt.
    pub max_input_chars: usize,
}

impl Default for SummarizeSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "deepseek-r1-7b".to_string(),
            max_input_chars: 8_000,
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, title: &str) -> Result<String, IngestError>;
}

/// Client for a locally hosted Ollama-style generate endpoint.
///
/// Sends one non-streaming request and reads the `response` field of the
/// JSON reply. Expects a running server, e.g. `ollama serve`.
pub struct OllamaSummarizer {
    client: reqwest::Client,
    settings: SummarizeSettings,
}

impl OllamaSummarizer {
    pub fn new(settings: SummarizeSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_prompt(&self, text: &str, title: &str) -> String {
        let excerpt = truncate_chars(text, self.settings.max_input_chars);
        format!(
            "Summarize the following webpage content in 3-5 sentences, \
             highlighting the key points.\nTitle: {title}\n\nContent:\n{excerpt}"
        )
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str, title: &str) -> Result<String, IngestError> {
        let payload = json!({
            "model": self.settings.model,
            "prompt": self.build_prompt(text, title),
            "stream": false,
        });

        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| IngestError::SummaryFailed(format!("endpoint unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::SummaryFailed(format!("http status {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| IngestError::SummaryFailed(format!("malformed response body: {err}")))?;

        let summary = body
            .get("response")
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::SummaryFailed("response field missing".to_string()))?;
        link_debug!("received summary of {} chars", summary.len());
        Ok(summary.to_string())
    }
}

/// Truncates to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{truncate_chars, OllamaSummarizer, SummarizeSettings};

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        // Each snowman is 3 bytes.
        assert_eq!(truncate_chars("\u{2603}\u{2603}\u{2603}", 2), "\u{2603}\u{2603}");
    }

    #[test]
    fn prompt_embeds_title_and_budgeted_text() {
        let summarizer = OllamaSummarizer::new(SummarizeSettings {
            max_input_chars: 10,
            ..SummarizeSettings::default()
        });
        let prompt = summarizer.build_prompt("0123456789overflow", "Example");
        assert!(prompt.contains("Title: Example"));
        assert!(prompt.contains("0123456789"));
        assert!(!prompt.contains("overflow"));
    }
}
