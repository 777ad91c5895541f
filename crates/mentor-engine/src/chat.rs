//! ChatEngine - drives conversational turns and chat-driven code updates.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use mentor_core::{prompts, response_parser};
use mentor_gateway::{CompletionGateway, GenerationParams};
use mentor_history::HistoryStack;
use mentor_models::{ChatMessage, ChatSession, LanguageScope};
use mentor_notify::NotificationHub;

use crate::error::{EngineError, Result};
use crate::token::RequestCounter;

/// Orchestrates chat turns against the completion gateway.
///
/// Every accepted turn appends exactly one user message and one assistant
/// message to the session; a gateway failure appends the canned apology
/// rather than leaving the session without a reply. Code-scoped turns run
/// the fenced-block detector over the reply and push a found snippet into
/// history as the new current code state.
pub struct ChatEngine {
    gateway: Arc<dyn CompletionGateway>,
    history: Arc<Mutex<HistoryStack>>,
    notifier: Arc<NotificationHub>,
    requests: RequestCounter,
}

impl ChatEngine {
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

    /// Process one chat turn and return the assistant's reply.
    ///
    /// The session's scope decides the prompt shape. General-scope
    /// capability questions ("what can you do", ...) are answered from a
    /// canned reply without calling the gateway at all.
    pub async fn send_turn(&self, session: &mut ChatSession, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            self.notifier.warning("Please enter a message");
            return Err(EngineError::EmptyMessage);
        }

        let scope = session.scope.clone().unwrap_or(LanguageScope::General);
        debug!(?scope, message_len = user_text.len(), "Processing chat turn");

        if scope == LanguageScope::General && prompts::is_capability_query(user_text) {
            let reply = prompts::CAPABILITY_REPLY.to_string();
            session.append(ChatMessage::user(user_text));
            session.append(ChatMessage::assistant(reply.clone()));
            return Ok(reply);
        }

        let prompt = match &scope {
            LanguageScope::General => prompts::chat_general_prompt(user_text),
            LanguageScope::Language(language) => {
                let code = self
                    .history
                    .lock()
                    .expect("history lock poisoned")
                    .current_state()
                    .to_string();
                prompts::chat_code_prompt(&code, language, user_text)
            }
        };

        let token = self.requests.begin();
        let reply = match self
            .gateway
            .generate(&prompt, &GenerationParams::chat())
            .await
        {
            Ok(raw) => {
                let reply = response_parser::strip_instruction_echo(&raw);
                if !self.requests.is_current(token) {
                    self.notifier.warning("Discarded a stale chat response");
                    return Err(EngineError::Superseded);
                }
                if let LanguageScope::Language(_) = scope {
                    self.apply_code_update(&reply);
                }
                reply
            }
            Err(err) => {
                warn!(error = %err, "Gateway failure during chat turn");
                if !self.requests.is_current(token) {
                    self.notifier.warning("Discarded a stale chat response");
                    return Err(EngineError::Superseded);
                }
                self.notifier
                    .warning("AI service unavailable; replied with an apology");
                prompts::APOLOGY_REPLY.to_string()
            }
        };

        session.append(ChatMessage::user(user_text));
        session.append(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Generate code from a bare description, without chat-history context.
    ///
    /// On gateway failure returns the skeleton placeholder instead of
    /// failing the caller.
    pub async fn generate_code(&self, description: &str, language: &str) -> String {
        let prompt = prompts::generate_prompt(description, language);
        match self
            .gateway
            .generate(&prompt, &GenerationParams::generation())
            .await
        {
            Ok(raw) => response_parser::strip_instruction_echo(&raw),
            Err(err) => {
                warn!(error = %err, "Code generation failed, returning placeholder");
                self.notifier
                    .warning("Code generation failed; returning a placeholder stub");
                prompts::generation_placeholder(language)
            }
        }
    }

    /// Detect an updated snippet in a code-scoped reply and record it.
    fn apply_code_update(&self, reply: &str) {
        if let Some(block) = response_parser::extract_code_block(reply) {
            self.history
                .lock()
                .expect("history lock poisoned")
                .push(&block);
            self.notifier.success("Code updated from chat");
        }
    }
}
