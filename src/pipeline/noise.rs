//! Classifier for tooling and system artifacts mixed into transcripts.

use std::sync::OnceLock;

use regex::RegexSet;

/// Trimmed content shorter than this (in characters) is never meaningful conversation
pub const MIN_CONTENT_CHARS: usize = 10;

/// Prefix-anchored markers of system/tool scaffolding
pub const NOISE_PATTERNS: &[&str] = &[
    // local slash-command wrappers
    r"^<local-command-stdout>",
    r"^<local-command-stderr>",
    r"^<local-command-caveat>",
    r"^Caveat: The messages below were generated by the user while running local commands",
    r"^<command-name>",
    r"^<command-message>",
    r"^<command-args>",
    // injected context
    r"^<system-reminder>",
    r"^<user-prompt-submit-hook>",
    // tool envelopes
    r"^<tool_use>",
    r"^<tool_result>",
    r"^<function_calls>",
    r"^<function_results>",
    // interruptions
    r"^\[Request interrupted by user",
    r"^\[Tool use interrupted",
];

fn noise_set() -> &'static RegexSet {
    static NOISE_SET: OnceLock<RegexSet> = OnceLock::new();
    NOISE_SET.get_or_init(|| RegexSet::new(NOISE_PATTERNS).expect("valid noise patterns"))
}

/// Returns true when `content` is a system/tool artifact rather than conversation
pub fn is_noise(content: &str) -> bool {
    let trimmed = content.trim();

    if trimmed.chars().count() < MIN_CONTENT_CHARS {
        return true;
    }

    noise_set().is_match(trimmed)
}
