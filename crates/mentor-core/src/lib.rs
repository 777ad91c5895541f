//! CodeMentor core - the pure text pipeline shared by all interfaces.
//!
//! - **response_parser**: extract structured analysis fields from a raw
//!   model completion
//! - **fallback**: deterministic, language-aware analysis used when the
//!   model is unreachable or unhelpful
//! - **prompts**: instruction templates and canned replies; the section
//!   headings requested here are the ones the parser searches for

pub mod fallback;
pub mod prompts;
pub mod response_parser;

// Re-export commonly used items for convenience
pub use fallback::synthesize;
pub use prompts::{
    analysis_prompt, chat_code_prompt, chat_general_prompt, enhance_prompt, fix_prompt,
    generate_prompt, generation_placeholder, is_capability_query, recovery_placeholder,
    APOLOGY_REPLY, CAPABILITY_REPLY,
};
pub use response_parser::{
    extract_code_block, extract_explanation, extract_logical_errors, extract_optimized_code,
    extract_syntax_errors, is_degenerate, parse_analysis, strip_instruction_echo,
};
