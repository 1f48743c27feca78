//! Pulling code out of free-form model output.
//!
//! Models are asked to answer with a single fenced block, but routinely
//! wrap it in prose. Lookup order:
//!
//! 1. the first ```` ```python ```` block
//! 2. the first fenced block of any language
//! 3. the whole text
//!
//! The result is always trimmed.

const FENCE: &str = "```";

/// Extract the most relevant code block from `text`.
pub fn extract_code(text: &str) -> String {
    if let Some(code) = fenced_block(text, Some("python")) {
        return code;
    }
    if let Some(code) = fenced_block(text, None) {
        return code;
    }
    text.trim().to_string()
}

/// Body of the first fenced block, optionally requiring an info string.
///
/// An unterminated fence yields everything after its opening line.
fn fenced_block(text: &str, language: Option<&str>) -> Option<String> {
    let mut rest = text;
    while let Some(start) = rest.find(FENCE) {
        let after_fence = &rest[start + FENCE.len()..];
        let line_end = after_fence.find('\n').unwrap_or(after_fence.len());

        // Whole block on the opening line: ```python print(1)```
        if let Some(close) = after_fence[..line_end].find(FENCE) {
            let inner = &after_fence[..close];
            let code = match language {
                Some(lang) => strip_language(inner, lang),
                None => Some(inner),
            };
            if let Some(code) = code {
                return Some(code.trim().to_string());
            }
            rest = &after_fence[close + FENCE.len()..];
            continue;
        }

        let info = &after_fence[..line_end];
        let body = after_fence.get(line_end + 1..).unwrap_or("");

        let matches = match language {
            Some(lang) => info.trim().eq_ignore_ascii_case(lang),
            None => true,
        };

        let close = body.find(FENCE);
        if matches {
            let code = match close {
                Some(end) => &body[..end],
                None => body,
            };
            return Some(code.trim().to_string());
        }

        // Skip past this whole block so its closing fence is not mistaken
        // for the next opening one.
        match close {
            Some(end) => rest = &body[end + FENCE.len()..],
            None => return None,
        }
    }
    None
}

/// The code after a leading `lang` tag, if `inline` starts with one.
fn strip_language<'a>(inline: &'a str, lang: &str) -> Option<&'a str> {
    let inline = inline.trim_start();
    let (tag, code) = inline
        .split_once(char::is_whitespace)
        .unwrap_or((inline, ""));
    tag.eq_ignore_ascii_case(lang).then_some(code)
}
