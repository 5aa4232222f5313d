//! Result extraction strategies.
//!
//! Providers do not agree on where the recognized text lives in a finished
//! job's payload. A [`ResultExtractor`] holds an ordered list of pure
//! strategies and returns the first non-empty text any of them finds.

use serde_json::Value;

/// Pure function from a raw provider payload to the recognized text.
pub type ExtractStrategy = fn(&Value) -> Option<String>;

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// `output.transcription`
pub fn output_transcription(payload: &Value) -> Option<String> {
    non_empty_str(payload.pointer("/output/transcription"))
}

/// `output.results[0].transcription`
pub fn first_result_transcription(payload: &Value) -> Option<String> {
    non_empty_str(payload.pointer("/output/results/0/transcription"))
}

#[derive(Clone)]
pub struct ResultExtractor {
    strategies: Vec<(&'static str, ExtractStrategy)>,
}

impl ResultExtractor {
    /// Build an extractor from named strategies, tried in order.
    pub fn new(strategies: Vec<(&'static str, ExtractStrategy)>) -> Self {
        Self { strategies }
    }

    /// Strategy order used for DashScope transcription tasks.
    pub fn dashscope() -> Self {
        Self::new(vec![
            ("output.transcription", output_transcription),
            ("output.results[0].transcription", first_result_transcription),
        ])
    }

    /// Run every strategy in order and return the first hit.
    pub fn extract(&self, payload: &Value) -> Option<String> {
        self.strategies.iter().find_map(|(name, strategy)| {
            let text = strategy(payload);
            if text.is_some() {
                tracing::trace!("Result extracted via {}", name);
            }
            text
        })
    }

    /// Run only the first strategy. Used to recognize inline results in
    /// submission responses.
    pub fn extract_primary(&self, payload: &Value) -> Option<String> {
        self.strategies
            .first()
            .and_then(|(_, strategy)| strategy(payload))
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::dashscope()
    }
}

impl std::fmt::Debug for ResultExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultExtractor")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_field_wins() {
        let payload = json!({
            "output": {
                "transcription": "primary",
                "results": [{"transcription": "fallback"}]
            }
        });
        assert_eq!(
            ResultExtractor::dashscope().extract(&payload),
            Some("primary".to_string())
        );
    }

    #[test]
    fn test_fallback_field() {
        let payload = json!({
            "output": {
                "task_status": "SUCCEEDED",
                "results": [{"transcription": "from results"}, {"transcription": "second"}]
            }
        });
        let extractor = ResultExtractor::dashscope();
        assert_eq!(extractor.extract(&payload), Some("from results".to_string()));
        assert_eq!(extractor.extract_primary(&payload), None);
    }

    #[test]
    fn test_empty_primary_falls_through() {
        let payload = json!({
            "output": {
                "transcription": "",
                "results": [{"transcription": "fallback"}]
            }
        });
        assert_eq!(
            ResultExtractor::dashscope().extract(&payload),
            Some("fallback".to_string())
        );
    }

    #[test]
    fn test_nothing_extractable() {
        let extractor = ResultExtractor::dashscope();
        assert_eq!(extractor.extract(&json!({})), None);
        assert_eq!(extractor.extract(&json!({"output": {"results": []}})), None);
        assert_eq!(extractor.extract(&json!({"output": {"transcription": 42}})), None);
    }

    #[test]
    fn test_custom_strategy_order() {
        fn text_field(payload: &Value) -> Option<String> {
            payload.get("text").and_then(Value::as_str).map(str::to_owned)
        }

        let extractor = ResultExtractor::new(vec![
            ("text", text_field),
            ("output.transcription", output_transcription),
        ]);
        let payload = json!({"text": "a", "output": {"transcription": "b"}});
        assert_eq!(extractor.extract(&payload), Some("a".to_string()));
        assert_eq!(extractor.strategy_names(), vec!["text", "output.transcription"]);
    }
}
