//! Comment format decoders.
//!
//! Pure, tree-independent marker stripping keyed by [`CommentFormat`].
//! Every decoder trims its result and is idempotent: running a decoder on
//! its own output is a no-op.

use crate::analysis::definition::CommentFormat;

const LINE_SLASH: &str = "//";
const LINE_HASH: &str = "#";
const XML_DOC: &str = "///";
const INNER_DOC: &str = "//!";
const BLOCK_START: &str = "/*";
const BLOCK_END: &str = "*/";
const BLOCK_LINE_PREFIX: char = '*';
const HTML_START: &str = "<!--";
const HTML_END: &str = "-->";

/// Decode a comment's raw text according to its format.
pub fn decode(text: &str, format: CommentFormat) -> String {
    match format {
        CommentFormat::Line(prefix) => strip_line(text, prefix),
        CommentFormat::Block => strip_block(text),
        CommentFormat::XmlDoc => strip_line_prefixed(text, XML_DOC),
        CommentFormat::Html => strip_html(text),
        CommentFormat::AutoDetect => strip_auto(text),
    }
}

/// Strip a fixed line-comment prefix (`//`, `#`).
pub fn strip_line(text: &str, prefix: &str) -> String {
    text.strip_prefix(prefix).unwrap_or(text).trim().to_string()
}

/// Strip `/*` `*/` delimiters plus a leading `*` on each inner line.
pub fn strip_block(text: &str) -> String {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix(BLOCK_START).unwrap_or(trimmed);
    let inner = inner.strip_suffix(BLOCK_END).unwrap_or(inner).trim();

    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(BLOCK_LINE_PREFIX).unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Strip a per-line doc marker (`///`) from every line.
pub fn strip_line_prefixed(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(prefix).unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Strip `<!--` `-->` delimiters.
pub fn strip_html(text: &str) -> String {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix(HTML_START).unwrap_or(trimmed);
    inner.strip_suffix(HTML_END).unwrap_or(inner).trim().to_string()
}

/// Detect the comment style from the text's own delimiters.
///
/// For languages whose single comment node type covers several styles
/// (Rust `line_comment` spans `//`, `///` and `//!`; Go and C `comment`
/// spans line and block comments).
pub fn strip_auto(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with(XML_DOC) {
        strip_line_prefixed(trimmed, XML_DOC)
    } else if trimmed.starts_with(INNER_DOC) {
        strip_line_prefixed(trimmed, INNER_DOC)
    } else if trimmed.starts_with(BLOCK_START) && trimmed.ends_with(BLOCK_END) {
        strip_block(trimmed)
    } else if trimmed.starts_with(HTML_START) && trimmed.ends_with(HTML_END) {
        strip_html(trimmed)
    } else if trimmed.starts_with(LINE_SLASH) {
        strip_line(trimmed, LINE_SLASH)
    } else if trimmed.starts_with(LINE_HASH) {
        strip_line(trimmed, LINE_HASH)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_round_trip() {
        let content = "keep this text";
        let rewrapped = format!("// {content}");
        assert_eq!(decode(&rewrapped, CommentFormat::Line("//")), content);
    }

    #[test]
    fn hash_comment_strips_prefix() {
        assert_eq!(decode("# a note", CommentFormat::Line("#")), "a note");
    }

    #[test]
    fn block_comment_strips_delimiters_and_line_markers() {
        let text = "/* multi\n * line\n * comment */";
        assert_eq!(decode(text, CommentFormat::Block), "multi\nline\ncomment");
    }

    #[test]
    fn block_comment_round_trip_single_line() {
        let content = "short note";
        let rewrapped = format!("/* {content} */");
        assert_eq!(decode(&rewrapped, CommentFormat::Block), content);
    }

    #[test]
    fn xml_doc_strips_every_line() {
        let text = "/// <summary>\n/// Adds numbers\n/// </summary>";
        assert_eq!(
            decode(text, CommentFormat::XmlDoc),
            "<summary>\nAdds numbers\n</summary>"
        );
    }

    #[test]
    fn html_comment_strips_delimiters() {
        assert_eq!(decode("<!-- hidden -->", CommentFormat::Html), "hidden");
    }

    #[test]
    fn auto_detect_picks_doc_over_line() {
        assert_eq!(decode("/// docs", CommentFormat::AutoDetect), "docs");
        assert_eq!(decode("//! module docs", CommentFormat::AutoDetect), "module docs");
        assert_eq!(decode("// plain", CommentFormat::AutoDetect), "plain");
        assert_eq!(decode("/* block */", CommentFormat::AutoDetect), "block");
    }

    #[test]
    fn decoders_are_idempotent() {
        for (text, format) in [
            ("// note", CommentFormat::Line("//")),
            ("/* note */", CommentFormat::Block),
            ("/// note", CommentFormat::XmlDoc),
            ("<!-- note -->", CommentFormat::Html),
            ("# note", CommentFormat::AutoDetect),
        ] {
            let once = decode(text, format);
            let twice = decode(&once, format);
            assert_eq!(once, twice, "decoder not idempotent for {text:?}");
        }
    }
}
