//! Heuristic extraction of structured analysis fields from raw completions.
//!
//! Hosted models reply in free-form prose. These pure functions carve that
//! prose into the four analysis fields: an optimized code block, syntax
//! findings, logic findings, and an explanation. Each rule is independent
//! and stateless so it can be tested against literal input/output pairs.

use std::sync::LazyLock;

use regex::Regex;

use mentor_models::{AnalysisResult, AnalysisSource};

/// Fenced code block: triple backticks, optional language tag, body.
static CODE_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[\w+-]*[ \t]*\n(.*?)\n[ \t]*```").expect("Invalid code block regex")
});

/// Heading that opens the syntax section ("Syntax errors:", "syntax improvements", ...).
static SYNTAX_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)syntax\s*(?:errors|improvements|issues)?\s*:?").expect("Invalid syntax regex")
});

/// Heading that opens the logical section.
static LOGICAL_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)logical\s*(?:errors|improvements|issues)?\s*:?")
        .expect("Invalid logical regex")
});

/// Heading that opens the explanation section.
static EXPLANATION_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)explanation\s*:?").expect("Invalid explanation regex"));

/// Stop tokens: a section runs until the next recognized heading.
/// The stem `optimiz` covers both "Optimized version" and "optimization".
static LOGICAL_STOP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)logical").expect("Invalid stop regex"));
static OPTIMIZED_STOP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)optimiz").expect("Invalid stop regex"));
static EXPLANATION_STOP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)explanation").expect("Invalid stop regex"));

/// Leading bullet marker on a finding line.
static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("Invalid bullet regex"));

/// Echoed instruction envelope in a completion.
static INSTRUCTION_ECHO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<s>\[INST\].*?\[/INST\]</s>").expect("Invalid echo regex")
});

/// Default line used when a syntax heading is absent from the response.
pub const NO_SYNTAX_ISSUES: &str = "No syntax issues found";
/// Default line used when a logical heading is absent from the response.
pub const NO_LOGICAL_ISSUES: &str = "No logical issues found";
/// Default explanation used when no explanation heading is present.
pub const DEFAULT_EXPLANATION: &str = "Code has been analyzed and optimized";
/// Default line used when a section is present but holds no findings.
const NO_ISSUES: &str = "No issues found";

/// Extract the optimized code from a completion.
///
/// Fenced code blocks are preferred; when the model presents several, the
/// *last* one wins (discussion first, final answer last). With no fence the
/// response is filtered down to lines containing structural tokens. If that
/// also yields nothing, the original code is returned unchanged, which
/// callers treat as "no real optimization produced".
pub fn extract_optimized_code(response: &str, original: &str) -> String {
    if let Some(block) = extract_code_block(response) {
        return block;
    }

    let code_lines: Vec<&str> = response
        .lines()
        .filter(|line| {
            line.contains('{')
                || line.contains('}')
                || line.contains("function")
                || line.contains("class")
                || line.contains("def ")
        })
        .collect();

    if code_lines.is_empty() {
        original.to_string()
    } else {
        code_lines.join("\n")
    }
}

/// The body of the last fenced code block, trimmed, if any fence exists.
///
/// This is also the detector chat replies run through: a reply carrying a
/// fence is treated as an updated code snippet, and the last block wins.
pub fn extract_code_block(text: &str) -> Option<String> {
    CODE_BLOCK_REGEX
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract syntax findings, or the neutral default when the heading is absent.
pub fn extract_syntax_errors(text: &str) -> Vec<String> {
    match section_after(
        text,
        &SYNTAX_HEADING_REGEX,
        &[
            &LOGICAL_STOP_REGEX,
            &OPTIMIZED_STOP_REGEX,
            &EXPLANATION_STOP_REGEX,
        ],
    ) {
        Some(section) => extract_bullet_points(section),
        None => vec![NO_SYNTAX_ISSUES.to_string()],
    }
}

/// Extract logical findings, or the neutral default when the heading is absent.
pub fn extract_logical_errors(text: &str) -> Vec<String> {
    match section_after(
        text,
        &LOGICAL_HEADING_REGEX,
        &[&OPTIMIZED_STOP_REGEX, &EXPLANATION_STOP_REGEX],
    ) {
        Some(section) => extract_bullet_points(section),
        None => vec![NO_LOGICAL_ISSUES.to_string()],
    }
}

/// Extract the explanation: everything after the explanation heading.
pub fn extract_explanation(text: &str) -> String {
    match EXPLANATION_HEADING_REGEX.find(text) {
        Some(m) => {
            let explanation = text[m.end()..].trim();
            if explanation.is_empty() {
                DEFAULT_EXPLANATION.to_string()
            } else {
                explanation.to_string()
            }
        }
        None => DEFAULT_EXPLANATION.to_string(),
    }
}

/// Capture the text between a heading and the nearest following stop token.
fn section_after<'a>(text: &'a str, heading: &Regex, stops: &[&LazyLock<Regex>]) -> Option<&'a str> {
    let m = heading.find(text)?;
    let rest = &text[m.end()..];
    let end = stops
        .iter()
        .filter_map(|stop| stop.find(rest).map(|s| s.start()))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Split a captured section into cleaned finding lines.
///
/// Strips a leading bullet marker, drops blanks, and never returns an empty
/// list: a section with no usable lines yields the neutral default.
fn extract_bullet_points(section: &str) -> Vec<String> {
    let points: Vec<String> = section
        .lines()
        .map(|line| BULLET_REGEX.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if points.is_empty() {
        vec![NO_ISSUES.to_string()]
    } else {
        points
    }
}

/// Remove echoed `<s>[INST] ... [/INST]</s>` envelopes from a completion.
///
/// Instruction-tuned endpoints echo the prompt ahead of the reply; the
/// envelope carries no content for the user.
pub fn strip_instruction_echo(text: &str) -> String {
    INSTRUCTION_ECHO_REGEX.replace_all(text, "").trim().to_string()
}

/// True when the extracted optimized code is the input code, i.e. the model
/// produced no real change.
pub fn is_degenerate(optimized: &str, original: &str) -> bool {
    optimized.trim() == original.trim()
}

/// Parse a full analysis completion into a structured result.
///
/// Degeneracy is not judged here: the caller compares
/// [`AnalysisResult::optimized_code`] against the input via
/// [`is_degenerate`] and substitutes the fallback when the model produced
/// no real change.
pub fn parse_analysis(response: &str, original_code: &str) -> AnalysisResult {
    AnalysisResult {
        syntax_errors: extract_syntax_errors(response),
        logical_errors: extract_logical_errors(response),
        optimized_code: extract_optimized_code(response, original_code),
        explanation: extract_explanation(response),
        source: AnalysisSource::Model,
    }
}
