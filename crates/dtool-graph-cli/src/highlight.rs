//! Indented, syntax-highlighted JSON for the terminal

use anyhow::{Context, Result};
use serde::Serialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME: &str = "base16-ocean.dark";
const RESET: &str = "\x1b[0m";

/// Render `value` as 2-space indented JSON with a trailing newline,
/// highlighted for a 24-bit terminal when `color` is set.
pub fn to_colored_json<T: Serialize + ?Sized>(value: &T, color: bool) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to format JSON")?;
    json.push('\n');

    if !color {
        return Ok(json);
    }

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();

    let syntax = syntax_set
        .find_syntax_by_extension("json")
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());
    let theme = theme_set
        .themes
        .get(THEME)
        .with_context(|| format!("Highlighting theme {} not available", THEME))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(json.len() * 4);

    for line in LinesWithEndings::from(&json) {
        let ranges = highlighter
            .highlight_line(line, &syntax_set)
            .context("Failed to highlight JSON")?;
        out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
    }
    out.push_str(RESET);

    Ok(out)
}
