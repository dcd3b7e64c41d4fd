//! Handwriting Tool
//!
//! Normalizes a scrawled recipe name into a canonical display name.

use serde::Serialize;

/// Response for parse_handwriting
#[derive(Debug, Serialize)]
pub struct ParseHandwritingResponse {
    pub msg: String,
}

/// Turn free-form text into a title-cased name.
///
/// Hyphens and underscores become spaces, anything that is not an ASCII
/// letter or whitespace is dropped, whitespace runs collapse to one space,
/// and each word is capitalized. Returns `None` when nothing is left.
pub fn normalize_name(input: &str) -> Option<String> {
    let cleaned: String = input
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    let words: Vec<String> = cleaned.split_whitespace().map(capitalize).collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

pub fn parse_handwriting(input: &str) -> Result<ParseHandwritingResponse, String> {
    normalize_name(input)
        .map(|msg| ParseHandwritingResponse { msg })
        .ok_or_else(|| "this string is cooked".to_string())
}
