/*!
 * Pattern keys of the consonant and vowel tables.
 *
 * A key has the shape `(pre) body (post)` where both context groups are
 * optional. The body lists alternatives separated by `|`, each a sequence
 * of space-separated phoneme symbols:
 *
 * ```text
 * ($) K | K W (@)   = 4
 * ```
 *
 * Pre-context tokens are written in reading order, so the last token is
 * the one next to the match. Post-context tokens also read left to right,
 * the first token being next to the match.
 */

use std::fmt;

/// A constraint on the phonemes around a match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextToken {
    /// Exact phoneme symbol
    Phoneme(String),
    /// `@`: any vowel
    AnyVowel,
    /// `&`: any consonant
    AnyConsonant,
    /// `$`: start of the word (pre-context only)
    WordStart,
    /// `^`: end of the word (post-context only)
    WordEnd,
}

impl ContextToken {
    fn parse(token: &str) -> Self {
        match token {
            "@" => Self::AnyVowel,
            "&" => Self::AnyConsonant,
            "$" => Self::WordStart,
            "^" => Self::WordEnd,
            symbol => Self::Phoneme(symbol.to_string()),
        }
    }
}

impl fmt::Display for ContextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phoneme(symbol) => write!(f, "{}", symbol),
            Self::AnyVowel => write!(f, "@"),
            Self::AnyConsonant => write!(f, "&"),
            Self::WordStart => write!(f, "$"),
            Self::WordEnd => write!(f, "^"),
        }
    }
}

/// Key of a consonant/vowel table entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    /// Tokens before the match, in reading order (empty = unconstrained)
    pub pre: Vec<ContextToken>,
    /// Phoneme sequences, any of which may match
    pub alternatives: Vec<Vec<String>>,
    /// Tokens after the match, in reading order (empty = unconstrained)
    pub post: Vec<ContextToken>,
}

impl PatternKey {
    /// Key with one alternative and no context
    pub fn simple(symbols: &[&str]) -> Self {
        Self {
            pre: Vec::new(),
            alternatives: vec![symbols.iter().map(|s| s.to_string()).collect()],
            post: Vec::new(),
        }
    }

    /// Parse a key as written in a rule file.
    ///
    /// Returns a human readable reason on failure.
    pub fn parse(key: &str) -> Result<Self, String> {
        let key = key.trim();

        let (pre_group, rest) = match key.strip_prefix('(') {
            Some(inner) => {
                let close = inner
                    .find(')')
                    .ok_or_else(|| "unclosed pre-context group".to_string())?;
                (Some(&inner[..close]), &inner[close + 1..])
            }
            None => (None, key),
        };

        let rest = rest.trim();
        let (body, post_group) = match rest.strip_suffix(')') {
            Some(inner) => {
                let open = inner
                    .rfind('(')
                    .ok_or_else(|| "unopened post-context group".to_string())?;
                (&inner[..open], Some(&inner[open + 1..]))
            }
            None => (rest, None),
        };

        let body = body.trim();
        if body.is_empty() {
            return Err("<match> not found".to_string());
        }
        if body.contains(['(', ')']) {
            return Err("unexpected parenthesis in <match>".to_string());
        }

        let mut alternatives = Vec::new();
        for alternative in body.split('|') {
            let symbols: Vec<String> = alternative.split_whitespace().map(str::to_string).collect();
            if symbols.is_empty() {
                return Err("empty alternative in <match>".to_string());
            }
            alternatives.push(symbols);
        }

        let pre = parse_context(pre_group)?;
        let post = parse_context(post_group)?;

        for (index, token) in pre.iter().enumerate() {
            match token {
                ContextToken::WordEnd => return Err("\"^\" is only allowed in post-context".to_string()),
                ContextToken::WordStart if index != 0 => {
                    return Err("\"$\" must be the first pre-context token".to_string());
                }
                _ => {}
            }
        }
        for (index, token) in post.iter().enumerate() {
            match token {
                ContextToken::WordStart => return Err("\"$\" is only allowed in pre-context".to_string()),
                ContextToken::WordEnd if index + 1 != post.len() => {
                    return Err("\"^\" must be the last post-context token".to_string());
                }
                _ => {}
            }
        }

        Ok(Self { pre, alternatives, post })
    }

    /// Every literal phoneme symbol the key mentions, context included
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        let context = self.pre.iter().chain(self.post.iter()).filter_map(|token| match token {
            ContextToken::Phoneme(symbol) => Some(symbol.as_str()),
            _ => None,
        });
        self.alternatives
            .iter()
            .flat_map(|alternative| alternative.iter().map(String::as_str))
            .chain(context)
    }
}

fn parse_context(group: Option<&str>) -> Result<Vec<ContextToken>, String> {
    let Some(group) = group else {
        return Ok(Vec::new());
    };
    if group.contains(['(', ')', '|']) {
        return Err("invalid character in context group".to_string());
    }
    Ok(group.split_whitespace().map(ContextToken::parse).collect())
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pre.is_empty() {
            let tokens: Vec<String> = self.pre.iter().map(ToString::to_string).collect();
            write!(f, "({}) ", tokens.join(" "))?;
        }
        let alternatives: Vec<String> = self.alternatives.iter().map(|a| a.join(" ")).collect();
        write!(f, "{}", alternatives.join(" | "))?;
        if !self.post.is_empty() {
            let tokens: Vec<String> = self.post.iter().map(ToString::to_string).collect();
            write!(f, " ({})", tokens.join(" "))?;
        }
        Ok(())
    }
}
