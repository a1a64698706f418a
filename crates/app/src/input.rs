//! Parsing of the short answers typed at the prompts.

use quiz_core::model::{Level, SUGGESTED_TOPICS};

/// A 1-based number picks a suggested topic; anything else non-empty is a custom topic.
pub fn parse_topic(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| SUGGESTED_TOPICS.get(i))
            .map(|t| (*t).to_owned());
    }
    (!raw.is_empty()).then(|| raw.to_owned())
}

/// A 1-based number or a level name.
pub fn parse_level(raw: &str) -> Option<Level> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Level::ALL.get(i)).copied();
    }
    raw.parse().ok()
}

/// An option letter (`a`, `B`) or 1-based number, bounded by `count`.
pub fn parse_option(raw: &str, count: usize) -> Option<usize> {
    let raw = raw.trim();
    let index = match raw.parse::<usize>() {
        Ok(n) => n.checked_sub(1)?,
        Err(_) => {
            let mut chars = raw.chars();
            let letter = chars.next()?.to_ascii_uppercase();
            if chars.next().is_some() || !letter.is_ascii_uppercase() {
                return None;
            }
            usize::from(letter as u8 - b'A')
        }
    };
    (index < count).then_some(index)
}

pub fn is_quit(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

pub fn is_yes(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
