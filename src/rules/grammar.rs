/*!
 * Line-level grammar of `.rule` files.
 *
 * A rule file is a sequence of lines. Blank lines and `//` comments are
 * skipped, a line starting with `.` opens a section, and every other line
 * is a `key = value` pair interpreted by the section it belongs to.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::Category;

// @const: `name(in)` reference in function sections
static FUNCTION_CALL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\(in\)$").unwrap()
});

/// Sections recognized by the rule language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Meta,
    Phonetics,
    Consonants(Category),
    Vowels(Category),
    Transliteration(Category),
    ToPhonetics,
    Post(Category),
}

impl Section {
    /// Every section, in the order a well-formed file declares them
    pub const ALL: [Section; 11] = [
        Section::Meta,
        Section::Phonetics,
        Section::Consonants(Category::People),
        Section::Vowels(Category::People),
        Section::Transliteration(Category::People),
        Section::Consonants(Category::Places),
        Section::Vowels(Category::Places),
        Section::Transliteration(Category::Places),
        Section::ToPhonetics,
        Section::Post(Category::People),
        Section::Post(Category::Places),
    ];

    /// Parse a section name (the text after the leading dot, trimmed)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "meta" => return Some(Self::Meta),
            "phonetics" => return Some(Self::Phonetics),
            "to_phonetics" => return Some(Self::ToPhonetics),
            _ => {}
        }

        let (head, suffix) = name.split_once(' ')?;
        let category = Category::from_suffix(suffix)?;
        match head {
            "consonants" => Some(Self::Consonants(category)),
            "vowels" => Some(Self::Vowels(category)),
            "transliteration" => Some(Self::Transliteration(category)),
            "post" => Some(Self::Post(category)),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meta => write!(f, "meta"),
            Self::Phonetics => write!(f, "phonetics"),
            Self::Consonants(c) => write!(f, "consonants {}", c.section_suffix()),
            Self::Vowels(c) => write!(f, "vowels {}", c.section_suffix()),
            Self::Transliteration(c) => write!(f, "transliteration {}", c.section_suffix()),
            Self::ToPhonetics => write!(f, "to_phonetics"),
            Self::Post(c) => write!(f, "post {}", c.section_suffix()),
        }
    }
}

/// One classified line of a rule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLine<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// `// ...`
    Comment,
    /// `.section name`, holding the trimmed name
    Header(&'a str),
    /// `key = value`, both sides trimmed
    Entry { key: &'a str, value: &'a str },
    /// A content line without exactly one `=`
    Malformed,
}

impl<'a> RuleLine<'a> {
    /// Classify a single line (without its line terminator)
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim_start();
        if line.trim_end().is_empty() {
            return Self::Blank;
        }
        if line.starts_with("//") {
            return Self::Comment;
        }
        if let Some(name) = line.strip_prefix('.') {
            return Self::Header(name.trim());
        }

        let mut parts = line.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => Self::Entry {
                key: key.trim(),
                value: value.trim(),
            },
            _ => Self::Malformed,
        }
    }
}

/// Iterate over the lines of a rule file with 1-based line numbers
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, RuleLine<'_>)> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, RuleLine::classify(raw)))
}

/// Right-hand side of a `to_phonetics` / `post` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSpec {
    /// `out = in`
    Identity,
    /// `out = name(in)`
    Named(String),
}

impl FunctionSpec {
    /// Parse a function line; `None` when it is neither form
    pub fn parse(key: &str, value: &str) -> Option<Self> {
        if key != "out" {
            return None;
        }
        if value == "in" {
            return Some(Self::Identity);
        }
        FUNCTION_CALL_REGEX
            .captures(value)
            .map(|caps| Self::Named(caps[1].to_string()))
    }
}

impl fmt::Display for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "out = in"),
            Self::Named(name) => write!(f, "out = {}(in)", name),
        }
    }
}

/// Parse a positive integer coordinate (`1`, `2`, ...)
pub fn parse_coordinate(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|c| *c > 0)
}

/// Parse a transliteration key `m, n`; both positive and not both 1
pub fn parse_coordinate_pair(key: &str) -> Option<(u32, u32)> {
    let (m, n) = key.split_once(',')?;
    let m = parse_coordinate(m.trim())?;
    let n = parse_coordinate(n.trim())?;
    if m == 1 && n == 1 {
        return None;
    }
    Some((m, n))
}
