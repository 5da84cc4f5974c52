//! Terminal output sanitization
//!
//! Log lines are user-controlled. Before any of them reach the terminal (the `stats`
//! command previews rejected lines) they go through [`preview_line`], which removes ANSI
//! escape sequences and control characters so a crafted log cannot clear the screen,
//! move the cursor or recolor output.

/// Strips ANSI CSI escape sequences and control characters (tab and newlines survive)
///
/// # Examples
///
/// ```
/// use conversation_collector::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mRed text\x1b[0m"), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // ESC [ params letter
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Single-line, sanitized, length-capped rendering of a log line for display
pub fn preview_line(text: &str, max_chars: usize) -> String {
    let cleaned = strip_ansi_codes(text);
    let single_line = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    match single_line.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &single_line[..cut]),
        None => single_line,
    }
}
