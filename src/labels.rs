//! Skill/passage label handling: prefix stripping, category and wrapping.

use serde::Serialize;

/// Category tokens removed from raw labels, applied in this order.
pub const CATEGORY_PREFIXES: [&str; 8] = [
    "A-SK-", "B-SK-", "C-SK-", "D-SK-", "A-", "B-", "C-", "D-",
];

/// Raw labels containing this marker belong to the skill category.
pub const SKILL_MARKER: &str = "-SK-";

pub const DEFAULT_WRAP_WIDTH: usize = 35;

/// Strips every [`CATEGORY_PREFIXES`] token from `raw`.
///
/// Tokens are removed wherever they occur, not only at the start. The
/// ordered pass is repeated until nothing changes, so a removal that
/// splices together a new token (`"DD--"`) is cleaned as well.
pub fn clean_label(raw: &str) -> String {
    let mut label = raw.to_string();
    loop {
        let next = CATEGORY_PREFIXES
            .iter()
            .fold(label.clone(), |acc, token| acc.replace(token, ""));
        if next == label {
            return label;
        }
        label = next;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skill,
    NonSkill,
}

impl Category {
    /// Category of a raw (uncleaned) label.
    pub fn of(raw: &str) -> Self {
        if raw.contains(SKILL_MARKER) {
            Category::Skill
        } else {
            Category::NonSkill
        }
    }
}

/// Cleans `raw` and breaks it on spaces into lines of at most `width`
/// characters. A single word longer than `width` gets its own line.
pub fn wrap_label(raw: &str, width: usize) -> Vec<String> {
    let cleaned = clean_label(raw);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in cleaned.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + word.chars().count() + 1 <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
