//! String literal format decoders.
//!
//! Pure transforms keyed by [`StringFormat`]: strip quotes, sigils, raw
//! delimiters or heredoc marker lines from a literal's raw text. Each
//! decoder trims its result and is idempotent.

use crate::analysis::definition::StringFormat;

const DOUBLE_QUOTE: char = '"';
const SINGLE_QUOTE: char = '\'';
const BACKTICK: char = '`';
const TRIPLE_DOUBLE: &str = "\"\"\"";
const TRIPLE_SINGLE: &str = "'''";

/// Decode a string literal's raw text according to its format.
pub fn decode(text: &str, format: StringFormat) -> String {
    match format {
        StringFormat::Quoted {
            strip_single_quotes,
        } => strip_quotes(text, strip_single_quotes),
        StringFormat::Template => strip_surrounding_char(text, BACKTICK),
        StringFormat::TripleQuoted => strip_triple_quotes(text),
        StringFormat::JavaTextBlock => strip_java_text_block(text),
        StringFormat::CppRaw => strip_cpp_raw(text),
        StringFormat::RustRaw => strip_rust_raw(text),
        StringFormat::Prefixed => strip_prefixed(text),
        StringFormat::Heredoc => strip_heredoc(text),
        StringFormat::Symbol(sigil) => text.trim().strip_prefix(sigil).unwrap_or(text.trim()).to_string(),
        StringFormat::Regex => strip_surrounding_char(text, '/'),
    }
}

fn strip_surrounding_char(text: &str, delimiter: char) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(delimiter)
        .and_then(|rest| rest.strip_suffix(delimiter))
        .unwrap_or(trimmed)
        .to_string()
}

/// Strip surrounding double quotes, optionally single quotes too.
pub fn strip_quotes(text: &str, also_single: bool) -> String {
    let stripped = strip_surrounding_char(text, DOUBLE_QUOTE);
    if also_single {
        return strip_surrounding_char(&stripped, SINGLE_QUOTE);
    }
    stripped
}

/// Strip `"""` or `'''` delimiters, falling back to plain quote
/// stripping when the text is not triple-quoted.
pub fn strip_triple_quotes(text: &str) -> String {
    let trimmed = text.trim();
    for triple in [TRIPLE_DOUBLE, TRIPLE_SINGLE] {
        if trimmed.len() >= 2 * triple.len() {
            if let Some(inner) = trimmed
                .strip_prefix(triple)
                .and_then(|rest| rest.strip_suffix(triple))
            {
                return inner.trim().to_string();
            }
        }
    }
    strip_quotes(trimmed, true)
}

/// Java text block: strip `"""` and normalize the common indentation.
pub fn strip_java_text_block(text: &str) -> String {
    let trimmed = text.trim();
    let Some(content) = trimmed
        .strip_prefix(TRIPLE_DOUBLE)
        .and_then(|rest| rest.strip_suffix(TRIPLE_DOUBLE))
    else {
        return trimmed.to_string();
    };

    let lines: Vec<&str> = content.lines().collect();
    let lines = match lines.first() {
        Some(first) if first.trim().is_empty() => &lines[1..],
        _ => &lines[..],
    };
    if lines.is_empty() {
        return String::new();
    }

    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[min_indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// C++ raw string: `R"delim(content)delim"`.
pub fn strip_cpp_raw(text: &str) -> String {
    let trimmed = text.trim();
    let Some(after_prefix) = trimmed.strip_prefix("R\"") else {
        return trimmed.to_string();
    };
    let Some(open) = after_prefix.find('(') else {
        return trimmed.to_string();
    };

    let delimiter = &after_prefix[..open];
    let closing = format!("){delimiter}\"");
    let content_start = open + 1;
    match after_prefix.rfind(&closing) {
        Some(end) if end >= content_start => after_prefix[content_start..end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Rust raw string: `r"content"` or `r#"content"#` with any hash count.
pub fn strip_rust_raw(text: &str) -> String {
    let trimmed = text.trim();
    let Some(after_r) = trimmed.strip_prefix('r').or_else(|| {
        trimmed
            .strip_prefix("br")
            .or_else(|| trimmed.strip_prefix('b'))
    }) else {
        return strip_quotes(trimmed, false);
    };

    let hashes = after_r.chars().take_while(|&c| c == '#').count();
    let fence_open: String = format!("{}{}", "#".repeat(hashes), DOUBLE_QUOTE);
    let fence_close: String = format!("{}{}", DOUBLE_QUOTE, "#".repeat(hashes));
    after_r
        .strip_prefix(&fence_open)
        .and_then(|rest| rest.strip_suffix(&fence_close))
        .unwrap_or(trimmed)
        .to_string()
}

/// Strip prefix letters (`f`, `r`, `b`, `u`, pairwise combinations) and
/// whatever quoting follows.
pub fn strip_prefixed(text: &str) -> String {
    let trimmed = text.trim();
    let quote_start = trimmed
        .char_indices()
        .find(|(_, c)| *c == DOUBLE_QUOTE || *c == SINGLE_QUOTE)
        .map(|(i, _)| i);

    let stripped = match quote_start {
        // Only a short prefix of letters may precede the first quote.
        Some(start) if start <= 2 && trimmed[..start].chars().all(|c| c.is_ascii_alphabetic()) => {
            &trimmed[start..]
        }
        _ => trimmed,
    };

    strip_triple_quotes(stripped)
}

/// Heredoc body: drop the two outermost delimiter lines, keep the rest.
pub fn strip_heredoc(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= 2 {
        return text.trim().to_string();
    }
    lines[1..lines.len() - 1].join("\n").trim().to_string()
}
