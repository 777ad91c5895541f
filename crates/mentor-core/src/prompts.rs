//! Instruction templates and canned replies.
//!
//! The analysis template requests four labeled sections in a fixed order;
//! those heading names are what `response_parser` searches for, so the two
//! modules must stay in sync.

/// Substrings that short-circuit a general-scope chat turn to the canned
/// capability reply, matched case-insensitively. No gateway call is made.
pub const CAPABILITY_TRIGGERS: &[&str] = &["what can you do", "help me", "abilities"];

/// Canned reply for capability questions.
pub const CAPABILITY_REPLY: &str =
    "I can help you write, debug, and optimize code in multiple languages.";

/// Canned assistant turn appended when the gateway fails during chat.
pub const APOLOGY_REPLY: &str = "I apologize, but I'm having trouble connecting to the AI \
service right now. Please try again in a moment.";

/// True when a general-scope message should get the canned capability reply.
pub fn is_capability_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    CAPABILITY_TRIGGERS
        .iter()
        .any(|trigger| lower.contains(trigger))
}

/// Analysis prompt requesting the four sections the parser extracts.
pub fn analysis_prompt(code: &str, language: &str) -> String {
    format!(
        "Analyze and optimize this {language} code:\n{code}\n\nProvide:\n1. Syntax improvements\n2. Logical improvements\n3. Optimized version (as a fenced code block)\n4. Explanation"
    )
}

/// Conversational prompt for general-scope chat turns.
pub fn chat_general_prompt(message: &str) -> String {
    format!(
        "<s>[INST] You are a coding assistant. Respond in 2-3 sentences maximum. Focus only on coding-related topics. {message} [/INST]</s>"
    )
}

/// Prompt for code-scoped chat turns, embedding the current code.
pub fn chat_code_prompt(code: &str, language: &str, question: &str) -> String {
    format!(
        "<s>[INST] As an AI coding assistant, please help with the following:\n\nCode:\n{code}\n\nLanguage: {language}\n\nUser Question: {question} [/INST]</s>"
    )
}

/// Single-shot code generation prompt.
pub fn generate_prompt(description: &str, language: &str) -> String {
    format!(
        "<s>[INST] Generate {language} code for the following description:\n{description}\n\nPlease provide only the code without any explanations. [/INST]</s>"
    )
}

/// Single-shot fix prompt.
pub fn fix_prompt(code: &str, issue: &str, language: &str) -> String {
    format!("Fix the following {language} code issue:\n\nCode:\n{code}\n\nIssue: {issue}")
}

/// Single-shot enhancement prompt.
pub fn enhance_prompt(code: &str, language: &str) -> String {
    format!("Enhance and optimize the following {language} code:\n{code}")
}

/// Skeleton stub returned when generation fails, marked as a placeholder.
pub fn generation_placeholder(language: &str) -> String {
    format!(
        "// Generated {language} code\n// Please try again if this doesn't match your requirements\nfunction example() {{\n  // Your code here\n}}"
    )
}

/// Placeholder returned when a fix/enhance call fails: the original code,
/// clearly marked as untouched.
pub fn recovery_placeholder(action: &str, code: &str) -> String {
    format!(
        "// The AI service could not be reached to {action} this code.\n// Original code preserved unchanged below.\n{code}"
    )
}
