//! Model output cleanup applied before any decoding
//!
//! Models wrap JSON in markdown fences, quote it, or annotate it with `//`
//! comments even when told not to. Each cleanup step is a pure function; the
//! whole list is re-applied until the text stops changing.

/// A single cleanup step
pub type Transform = fn(&str) -> String;

/// Ordered list of cleanup steps
#[derive(Debug, Clone)]
pub struct ResponseSanitizer {
    transforms: Vec<Transform>,
}

impl ResponseSanitizer {
    /// Sanitizer with the standard cleanup steps
    pub fn new() -> Self {
        Self {
            transforms: vec![
                strip_code_fences,
                strip_wrapping_quotes,
                strip_line_comments,
                trim,
            ],
        }
    }

    /// Sanitizer with a custom list of steps
    pub fn with_transforms(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// Apply every step in order, repeating until a fixpoint is reached
    pub fn sanitize(&self, raw: &str) -> String {
        let mut current = raw.to_string();
        loop {
            let next = self
                .transforms
                .iter()
                .fold(current.clone(), |text, transform| transform(&text));
            if next == current {
                return next;
            }
            current = next;
        }
    }
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around the standard sanitizer
pub fn sanitize(raw: &str) -> String {
    ResponseSanitizer::new().sanitize(raw)
}

/// Remove a leading fence (with optional language tag) and a trailing fence
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text;

    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.to_string()
}

/// Remove one leading and one trailing double quote
pub fn strip_wrapping_quotes(text: &str) -> String {
    let body = text.strip_prefix('"').unwrap_or(text);
    let body = body.strip_suffix('"').unwrap_or(body);
    body.to_string()
}

/// Cut `//` comments that sit outside JSON string literals
pub fn strip_line_comments(text: &str) -> String {
    text.split('\n')
        .map(strip_comment_from_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_comment_from_line(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    let mut prev_slash = false;

    for (idx, ch) in line.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                prev_slash = false;
            }
            '/' if prev_slash => return line[..idx - 1].trim_end(),
            '/' => prev_slash = true,
            _ => prev_slash = false,
        }
    }

    line
}

/// Trim surrounding whitespace
pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_and_without_tag() {
        assert_eq!(sanitize("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(sanitize("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(sanitize("  ```JSON\n[]\n```  "), "[]");
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(sanitize("\"[1]\""), "[1]");
        assert_eq!(strip_wrapping_quotes("\"abc"), "abc");
        assert_eq!(strip_wrapping_quotes("abc"), "abc");
    }

    #[test]
    fn test_strip_comments_outside_strings_only() {
        let raw = "{\n  \"url\": \"http://example.com\", // homepage\n  \"n\": 1 // count\n}";
        let expected = "{\n  \"url\": \"http://example.com\",\n  \"n\": 1\n}";
        assert_eq!(sanitize(raw), expected);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = r#"{"t": "say \"hi\" // not a comment"}"#;
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_combined_noise_matches_bare_json() {
        let bare = r#"[{"title": "Login", "steps": ["open", "submit"]}]"#;
        let noisy = format!("```json\n{bare} // generated\n```");
        let value: serde_json::Value = serde_json::from_str(&sanitize(&noisy)).unwrap();
        let expected: serde_json::Value = serde_json::from_str(bare).unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_sanitize_is_idempotent_on_nested_noise() {
        let raw = "\"```json\n\"[1]\"\n```\"";
        let once = sanitize(raw);
        assert_eq!(once, "[1]");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_custom_transform_list() {
        let sanitizer = ResponseSanitizer::with_transforms(vec![trim]);
        assert_eq!(sanitizer.sanitize("  \"x\"  "), "\"x\"");
    }
}
