//! AnalysisEngine - drives the analyze/fix/enhance operations.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use mentor_core::{fallback, prompts, response_parser};
use mentor_gateway::{CompletionGateway, GenerationParams};
use mentor_history::HistoryStack;
use mentor_models::{AnalysisResult, AnalysisSource};
use mentor_notify::NotificationHub;

use crate::error::{EngineError, Result};
use crate::token::RequestCounter;

/// Orchestrates code analysis against the completion gateway.
///
/// The analyze path is total: it either returns the parsed model analysis
/// or the deterministic fallback, never a raw gateway error. The
/// single-shot operations (`fix`, `enhance`) recover the same way,
/// returning clearly marked placeholders on failure.
pub struct AnalysisEngine {
    gateway: Arc<dyn CompletionGateway>,
    history: Arc<Mutex<HistoryStack>>,
    notifier: Arc<NotificationHub>,
    requests: RequestCounter,
}

impl AnalysisEngine {
    /// Create an engine with its collaborators.
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        history: Arc<Mutex<HistoryStack>>,
        notifier: Arc<NotificationHub>,
    ) -> Self {
        Self {
            gateway,
            history,
            notifier,
            requests: RequestCounter::default(),
        }
    }

    /// Analyze and optimize the given code.
    ///
    /// Empty code is rejected before any network call. A gateway failure or
    /// a degenerate parse (the model returned the input unchanged) is
    /// recovered through the fallback synthesizer; the result's `source`
    /// tag records which path ran. On a genuine model optimization the
    /// *original* code is pushed into history so the caller can undo back
    /// to it after replacing the editor contents.
    pub async fn analyze(&self, code: &str, language: &str) -> Result<AnalysisResult> {
        if code.trim().is_empty() {
            self.notifier.warning("Please enter some code to analyze");
            return Err(EngineError::EmptyCode);
        }

        debug!(language, code_len = code.len(), "Starting analysis");

        let token = self.requests.begin();
        let prompt = prompts::analysis_prompt(code, language);

        let result = match self
            .gateway
            .generate(&prompt, &GenerationParams::generation())
            .await
        {
            Ok(raw) => {
                let cleaned = response_parser::strip_instruction_echo(&raw);
                let parsed = response_parser::parse_analysis(&cleaned, code);
                if response_parser::is_degenerate(&parsed.optimized_code, code) {
                    debug!("Model produced no usable optimization, substituting fallback");
                    self.notifier
                        .info("The model produced no improvement; using built-in analysis");
                    fallback::synthesize(code, language)
                } else {
                    parsed
                }
            }
            Err(err) => {
                warn!(error = %err, "Gateway failure, substituting fallback analysis");
                self.notifier
                    .info("AI service unavailable; using built-in analysis");
                fallback::synthesize(code, language)
            }
        };

        if !self.requests.is_current(token) {
            self.notifier.warning("Discarded a stale analysis response");
            return Err(EngineError::Superseded);
        }

        if result.source == AnalysisSource::Model {
            // Model results are non-degenerate here; the caller swaps the
            // optimized code into the editor, and this snapshot is what
            // undo returns to.
            self.history
                .lock()
                .expect("history lock poisoned")
                .push(code);
            self.notifier
                .success("Code optimized and replaced successfully!");
        }

        Ok(result)
    }

    /// Fix a described issue in the given code.
    ///
    /// On gateway failure the returned placeholder preserves the original
    /// code and states that nothing was changed.
    pub async fn fix(&self, code: &str, issue: &str, language: &str) -> String {
        let prompt = prompts::fix_prompt(code, issue, language);
        match self
            .gateway
            .generate(&prompt, &GenerationParams::generation())
            .await
        {
            Ok(raw) => response_parser::strip_instruction_echo(&raw),
            Err(err) => {
                warn!(error = %err, "Code fix failed, returning placeholder");
                self.notifier
                    .warning("Code fix failed; original code returned unchanged");
                prompts::recovery_placeholder("fix", code)
            }
        }
    }

    /// Enhance and optimize the given code.
    pub async fn enhance(&self, code: &str, language: &str) -> String {
        let prompt = prompts::enhance_prompt(code, language);
        match self
            .gateway
            .generate(&prompt, &GenerationParams::generation())
            .await
        {
            Ok(raw) => response_parser::strip_instruction_echo(&raw),
            Err(err) => {
                warn!(error = %err, "Code enhancement failed, returning placeholder");
                self.notifier
                    .warning("Code enhancement failed; original code returned unchanged");
                prompts::recovery_placeholder("enhance", code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use mentor_gateway::GatewayError;

    /// Mock gateway returning a fixed reply, or failing when none is set.
    struct MockGateway {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> mentor_gateway::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(GatewayError::Request("connection timed out".into())),
            }
        }

        async fn health_check(&self) -> mentor_gateway::Result<()> {
            Ok(())
        }
    }

    fn make_engine(gateway: Arc<MockGateway>) -> (AnalysisEngine, Arc<Mutex<HistoryStack>>) {
        let history = Arc::new(Mutex::new(HistoryStack::new()));
        let notifier = Arc::new(NotificationHub::new());
        let engine = AnalysisEngine::new(gateway, Arc::clone(&history), notifier);
        (engine, history)
    }

    const MODEL_REPLY: &str = "Syntax improvements:\n- Use const\nLogical improvements:\n- Use reduce\nOptimized version:\n```js\nconst total = items.reduce((acc, n) => acc + n, 0);\n```\nExplanation: modernized the accumulation.";

    #[tokio::test]
    async fn test_empty_code_rejected_without_gateway_call() {
        let gateway = Arc::new(MockGateway::replying(MODEL_REPLY));
        let (engine, history) = make_engine(Arc::clone(&gateway));

        let result = engine.analyze("   ", "javascript").await;

        assert_eq!(result.unwrap_err(), EngineError::EmptyCode);
        assert_eq!(gateway.call_count(), 0);
        assert!(history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_code_emits_warning_notification() {
        let gateway = Arc::new(MockGateway::replying(MODEL_REPLY));
        let history = Arc::new(Mutex::new(HistoryStack::new()));
        let notifier = Arc::new(NotificationHub::new());
        let rx = notifier.subscribe();
        let engine = AnalysisEngine::new(gateway, history, notifier);

        let _ = engine.analyze("", "javascript").await;

        let notification = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(notification.severity, mentor_models::Severity::Warning);
    }

    #[tokio::test]
    async fn test_successful_analysis_uses_model_path() {
        let gateway = Arc::new(MockGateway::replying(MODEL_REPLY));
        let (engine, history) = make_engine(Arc::clone(&gateway));

        let code = "var total = 0;\nitems.forEach(function (n) { total += n; });";
        let result = engine.analyze(code, "javascript").await.unwrap();

        assert_eq!(result.source, AnalysisSource::Model);
        assert_eq!(
            result.optimized_code,
            "const total = items.reduce((acc, n) => acc + n, 0);"
        );
        assert_eq!(result.syntax_errors, vec!["Use const".to_string()]);
        assert_eq!(gateway.call_count(), 1);

        // The original snapshot lands in history so undo can reach it.
        let snapshot = history.lock().unwrap().snapshot();
        assert_eq!(snapshot.entries, vec![code.to_string()]);
    }

    #[tokio::test]
    async fn test_gateway_failure_returns_deterministic_fallback() {
        let gateway = Arc::new(MockGateway::failing());
        let (engine, history) = make_engine(Arc::clone(&gateway));

        let code = "var total = 0;";
        let result = engine.analyze(code, "javascript").await.unwrap();

        assert_eq!(result, fallback::synthesize(code, "javascript"));
        assert!(result.is_fallback());
        // The fallback path does not touch history.
        assert!(history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_degenerate_reply_routed_to_fallback() {
        let code = "def f(x):\n    return x";
        let reply = format!("Looks fine already.\n```python\n{code}\n```");
        let gateway = Arc::new(MockGateway::replying(&reply));
        let (engine, history) = make_engine(Arc::clone(&gateway));

        let result = engine.analyze(code, "python").await.unwrap();

        assert!(result.is_fallback());
        assert_eq!(result, fallback::synthesize(code, "python"));
        assert!(history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analysis_result_always_fully_populated() {
        for gateway in [
            Arc::new(MockGateway::replying(MODEL_REPLY)),
            Arc::new(MockGateway::failing()),
        ] {
            let (engine, _history) = make_engine(gateway);
            let result = engine.analyze("var a = 1;", "javascript").await.unwrap();

            assert!(!result.syntax_errors.is_empty());
            assert!(!result.logical_errors.is_empty());
            assert!(!result.optimized_code.is_empty());
            assert!(!result.explanation.is_empty());
        }
    }

    #[tokio::test]
    async fn test_fix_recovers_with_original_code() {
        let gateway = Arc::new(MockGateway::failing());
        let (engine, _history) = make_engine(gateway);

        let result = engine.fix("let a = 1;", "off by one", "javascript").await;

        assert!(result.contains("could not be reached to fix"));
        assert!(result.ends_with("let a = 1;"));
    }

    #[tokio::test]
    async fn test_enhance_recovers_with_original_code() {
        let gateway = Arc::new(MockGateway::failing());
        let (engine, _history) = make_engine(gateway);

        let result = engine.enhance("let a = 1;", "javascript").await;

        assert!(result.contains("could not be reached to enhance"));
        assert!(result.ends_with("let a = 1;"));
    }

    /// Gateway that stalls the first call until the second one has replied,
    /// so the first response arrives stale.
    struct StalledFirstCallGateway {
        calls: AtomicUsize,
        barrier: tokio::sync::Barrier,
    }

    impl StalledFirstCallGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                barrier: tokio::sync::Barrier::new(2),
            }
        }
    }

    #[async_trait]
    impl CompletionGateway for StalledFirstCallGateway {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> mentor_gateway::Result<String> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.barrier.wait().await;
                Ok("Optimized version:\n```\nslow();\n```".to_string())
            } else {
                self.barrier.wait().await;
                Ok("Optimized version:\n```\nfast();\n```".to_string())
            }
        }

        async fn health_check(&self) -> mentor_gateway::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let gateway = Arc::new(StalledFirstCallGateway::new());
        let history = Arc::new(Mutex::new(HistoryStack::new()));
        let notifier = Arc::new(NotificationHub::new());
        let engine = Arc::new(AnalysisEngine::new(
            gateway,
            Arc::clone(&history),
            notifier,
        ));

        let first = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.analyze("var a = 1;", "javascript").await })
        };
        // Let the first call reach the gateway before issuing the second.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.analyze("var a = 1;", "javascript").await })
        };

        let first = first.await.unwrap();
        let second = second.await.unwrap();

        assert_eq!(first.unwrap_err(), EngineError::Superseded);
        let second = second.unwrap();
        assert_eq!(second.optimized_code, "fast();");

        // Only the surviving call touched history.
        assert_eq!(history.lock().unwrap().len(), 1);
    }
}
