use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Text utilities for the legacy Mix character set
///
/// The corpus predates widespread 8-bit text handling, so the Swedish
/// letters are stored as the six ASCII placeholder glyphs `{ } | \ [ ]`.
/// This module decodes them and provides the small text-normalization
/// helpers shared by the parser and the label extractors.
// @const: whitespace run matcher for the extended text cleanup
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: non-speech noise token -> expected phoneme tag
pub static NOISE_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("XtvekX", "öh"),
        ("XinandX", "pa"),
        ("XsmackX", "sm"),
        ("XutandX", "pa"),
        ("XharklingX", "ha"),
        ("XklickX", "kl"),
        ("XavbrordX", ""),
        ("XskrattX", "ha"),
        ("XsuckX", "pa"),
    ])
});

/// Decode the six legacy placeholder glyphs into accented letters.
///
/// Idempotent on text already free of the source glyphs.
pub fn fix_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '{' => 'ä',
            '}' => 'å',
            '|' => 'ö',
            '\\' => 'Ö',
            '[' => 'Ä',
            ']' => 'Å',
            other => other,
        })
        .collect()
}

/// Decode placeholders and additionally collapse whitespace runs and
/// drop a trailing period, for presentation of the free-text line.
pub fn fix_text_extended(text: &str) -> String {
    let decoded = fix_text(text);
    let spaced = WHITESPACE_RUN.replace_all(&decoded, " ");
    let spaced = spaced.trim();
    match spaced.strip_suffix('.') {
        Some(stripped) => stripped.trim().to_string(),
        None => spaced.to_string(),
    }
}

/// Map the ASCII stress marks used in the annotation to IPA:
/// apostrophe to primary stress, double quote to secondary stress.
pub fn fix_accents(phone: &str) -> String {
    phone.replace('\'', "ˈ").replace('"', "ˌ")
}

/// Remove stress marks from a phone string.
pub fn strip_accents(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, 'ˈ' | '`' | 'ˌ')).collect()
}

/// Clean up the duration markers left behind by segment transforms:
/// `:+` after a long phone becomes `:`, a bare trailing `+` is dropped.
pub fn fix_duration_markers(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    out.push_str(input);
    out.push(' ');
    let out = out.replace(":+ ", ": ").replace("+ ", " ");
    out.trim().to_string()
}

/// True for bracketed non-speech tokens shaped `X…X`.
pub fn is_x_word(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('X') && text.ends_with('X')
}

/// Remove non-spoken noise markers (`X…X` tokens) from a word list.
pub fn clean_x_words(words: &[String]) -> Vec<String> {
    words
        .iter()
        .filter(|w| !w.contains("XX") && !is_x_word(w))
        .cloned()
        .collect()
}

/// Lowercase a word unless it is an `X…X` noise token, which is
/// case-significant.
pub fn cond_lc(text: &str) -> String {
    if is_x_word(text) {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Check a noise token against its expected phoneme tag.
///
/// Returns `None` for words that are not known noise tokens.
pub fn check_noise_tag(word: &str, phoneme: &str) -> Option<bool> {
    if word == "XavbrordX" {
        return Some(true);
    }
    NOISE_TAGS.get(word).map(|tag| *tag == phoneme)
}
