//! Two-stage decoding of model output into typed payloads.
//!
//! Stage one parses the whole text strictly. Stage two is a heuristic: it
//! looks for a fenced ```json block, then for the first balanced `{...}` span
//! in the raw text, skipping braces inside JSON strings. It can still pick the
//! wrong span when prose before the payload contains braces; the caller treats
//! any failure here as "use fallback content".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json|JSON)?\s*([\s\S]*?)\s*```").expect("valid fenced block pattern")
});

/// Decode `text` into `T`, or `None` when neither stage yields a value of
/// the right shape.
pub fn parse_payload<T: DeserializeOwned>(text: &str) -> Option<T> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Some(value);
    }

    candidate_spans(trimmed).find_map(|span| serde_json::from_str::<T>(span).ok())
}

/// Stage-two candidates, most specific first.
fn candidate_spans(text: &str) -> impl Iterator<Item = &str> {
    let fenced = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| s.starts_with('{'))
        .filter_map(first_balanced_object);
    fenced.chain(first_balanced_object(text))
}

/// First `{...}` span whose braces balance, ignoring braces in strings.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeeperSuggestions, NameSuggestions};

    const PAYLOAD: &str = r#"{"names": [{"id": "name_1", "name": "Apogee", "category": "scientific"}]}"#;

    #[test]
    fn test_strict_parse() {
        let parsed: NameSuggestions = parse_payload(PAYLOAD).unwrap();
        assert_eq!(parsed.names[0].name, "Apogee");
    }

    #[test]
    fn test_fenced_block() {
        let text = format!("Here you go:\n```json\n{}\n```\nEnjoy!", PAYLOAD);
        let parsed: NameSuggestions = parse_payload(&text).unwrap();
        assert_eq!(parsed.names.len(), 1);
    }

    #[test]
    fn test_prose_wrapped_object() {
        let text = format!("Sure! {} Let me know if you want more.", PAYLOAD);
        let parsed: NameSuggestions = parse_payload(&text).unwrap();
        assert_eq!(parsed.names[0].category, "scientific");
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"note {"names": [{"name": "Curly}Brace", "meaning": "has { and }"}]} trailing }"#;
        let parsed: NameSuggestions = parse_payload(text).unwrap();
        assert_eq!(parsed.names[0].name, "Curly}Brace");
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(parse_payload::<NameSuggestions>(r#"{"threads": []}"#).is_none());
        assert!(parse_payload::<DeeperSuggestions>(PAYLOAD).is_none());
    }

    #[test]
    fn test_unparsable_text() {
        assert!(parse_payload::<NameSuggestions>("I can't help with that.").is_none());
        assert!(parse_payload::<NameSuggestions>("{ unbalanced").is_none());
        assert!(parse_payload::<NameSuggestions>("").is_none());
    }

    #[test]
    fn test_first_balanced_object() {
        assert_eq!(first_balanced_object("a {b {c}} d {e}"), Some("{b {c}}"));
        assert_eq!(first_balanced_object(r#"{"k": "\"}"}"#), Some(r#"{"k": "\"}"}"#));
        assert_eq!(first_balanced_object("no braces"), None);
        assert_eq!(first_balanced_object("{ open"), None);
    }
}
