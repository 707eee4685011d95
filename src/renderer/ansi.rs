use crate::view::Style;
use once_cell::sync::Lazy;
use regex::Regex;

pub const RESET: &str = "\x1b[0m";

static ANSI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

/// Build an SGR sequence for a style. Plain styles give "".
pub fn compose_sgr(style: &Style) -> String {
    let mut codes: Vec<String> = Vec::new();

    if style.bold {
        codes.push("1".to_string());
    }
    if style.underline {
        codes.push("4".to_string());
    }
    if let Some(color) = style.color {
        codes.push(color.fg_sgr());
    }

    if codes.is_empty() {
        return String::new();
    }
    format!("\x1b[{}m", codes.join(";"))
}

/// Length as seen on the terminal, escape codes excluded.
pub fn visible_len(s: &str) -> usize {
    ANSI_RE.replace_all(s, "").chars().count()
}

/// Remove all SGR escape codes.
pub fn strip(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}
