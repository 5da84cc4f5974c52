//! PII scrubbing applied to message text before it leaves the pipeline.

use regex::Regex;

/// Text transform applied to `content` and `thinking` after identity is computed
pub trait Masker: Send + Sync {
    fn mask(&self, text: &str) -> String;
}

/// Leaves text untouched (masking disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMasker;

impl Masker for NoopMasker {
    fn mask(&self, text: &str) -> String {
        text.to_string()
    }
}

struct MaskRule {
    regex: Regex,
    replacement: String,
}

/// Built-in rules: (kind, pattern, replacement). `None` means `[REDACTED:<kind>]`.
/// Order matters: more specific key formats run before generic ones.
const BUILTIN_RULES: &[(&str, &str, Option<&str>)] = &[
    ("ANTHROPIC_KEY", r"sk-ant-[A-Za-z0-9_\-]{20,}", None),
    ("API_KEY", r"sk-(?:proj-)?[A-Za-z0-9_\-]{20,}", None),
    ("GITHUB_TOKEN", r"gh[pousr]_[A-Za-z0-9]{36,}", None),
    ("AWS_KEY", r"AKIA[0-9A-Z]{16}", None),
    ("BEARER_TOKEN", r"(?i)bearer\s+[A-Za-z0-9\-._~+/]{16,}=*", None),
    ("EMAIL", r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}", None),
    ("IP_ADDRESS", r"\b(?:(?:25[0-5]|2[0-4]\d|1?\d?\d)\.){3}(?:25[0-5]|2[0-4]\d|1?\d?\d)\b", None),
    ("HOME_DIR", r"(/Users/|/home/)[^/\s]+", Some("${1}[USER]")),
    ("HOME_DIR", r"(?i)([A-Z]:\\Users\\)[^\\\s]+", Some("${1}[USER]")),
];

/// Regex-driven masker for secrets, contact details and home directory names
pub struct RegexMasker {
    rules: Vec<MaskRule>,
}

impl RegexMasker {
    /// Masker with the built-in rule set
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(kind, pattern, replacement)| MaskRule {
                regex: Regex::new(pattern).expect("valid builtin mask pattern"),
                replacement: replacement
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("[REDACTED:{}]", kind)),
            })
            .collect();
        Self { rules }
    }

    /// Add a user-supplied pattern; matches become `[REDACTED:CUSTOM]`
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.rules.push(MaskRule {
            regex: Regex::new(pattern)?,
            replacement: "[REDACTED:CUSTOM]".to_string(),
        });
        Ok(self)
    }
}

impl Default for RegexMasker {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Masker for RegexMasker {
    fn mask(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for rule in &self.rules {
            if rule.regex.is_match(&masked) {
                masked = rule.regex.replace_all(&masked, rule.replacement.as_str()).into_owned();
            }
        }
        masked
    }
}
