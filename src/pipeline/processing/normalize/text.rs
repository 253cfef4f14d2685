use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::constants::SMALL_WORDS;

/// A non-space character at the start, or right after whitespace or one of
/// `- / , (`.
static WORD_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s|[-/,(])\S").expect("word start pattern is valid")
});

/// Convert an upper-case source name to display casing:
/// `"BUREAU OF ALCOHOL, TOBACCO"` -> `"Bureau of Alcohol, Tobacco"`.
///
/// Small words stay lowercase except at the very start, and `U.s.` is
/// restored to `U.S.`.
pub fn to_title_case(input: &str) -> String {
    let lowered = input.to_lowercase();
    let capitalized = WORD_START.replace_all(&lowered, |caps: &Captures| caps[0].to_uppercase());
    let with_small_words = lowercase_small_words(&capitalized);
    let first_upper = uppercase_first(&with_small_words);
    fix_us_abbreviation(&first_upper)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lowercase every ASCII word run that is a small word, unless it starts the
/// string.
fn lowercase_small_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        match (word_start, is_word_char(c)) {
            (None, true) => word_start = Some(i),
            (Some(start), false) => {
                push_word(&mut out, &input[start..i], start);
                word_start = None;
                out.push(c);
            }
            (None, false) => out.push(c),
            (Some(_), true) => {}
        }
    }
    if let Some(start) = word_start {
        push_word(&mut out, &input[start..], start);
    }
    out
}

fn push_word(out: &mut String, word: &str, offset: usize) {
    let lower = word.to_ascii_lowercase();
    if offset > 0 && SMALL_WORDS.contains(&lower.as_str()) {
        out.push_str(&lower);
    } else {
        out.push_str(word);
    }
}

fn uppercase_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if first != '\n' => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
        _ => input.to_string(),
    }
}

/// `U.s.` -> `U.S.` wherever the `U` is not preceded by a word character.
fn fix_us_abbreviation(input: &str) -> String {
    const NEEDLE: &str = "U.s.";
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut prev: Option<char> = None;

    while let Some(pos) = rest.find(NEEDLE) {
        let before = &rest[..pos];
        let preceding = before.chars().next_back().or(prev);
        out.push_str(before);
        if preceding.map_or(true, |c| !is_word_char(c)) {
            out.push_str("U.S.");
        } else {
            out.push_str(NEEDLE);
        }
        prev = Some('.');
        rest = &rest[pos + NEEDLE.len()..];
    }
    out.push_str(rest);
    out
}
