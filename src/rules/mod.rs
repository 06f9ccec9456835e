/*!
 * The rule language and its compiler.
 *
 * A `.rule` file describes, for one language code, how phoneme sequences
 * are turned into Chinese characters. This module is split into:
 *
 * - `grammar`: line classification and section names
 * - `pattern`: pattern keys with their pre/post context tokens
 * - `registry`: named per-language callables referenced by `name(in)`
 * - `rule`: the immutable in-memory `Rule` and `RuleSet`
 * - `loader`: compiles rule files into rules, one file at a time
 */

use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::grammar::{RuleLine, Section};
pub use self::loader::{load_rules, LoadReport, RuleLoader};
pub use self::pattern::{ContextToken, PatternKey};
pub use self::registry::{FunctionRegistry, PhoneticsFn, PostFn};
pub use self::rule::{CategoryTables, PatternEntry, PatternTable, PhonemeClass, Rule, RuleSet, TransliterationTable};

pub mod grammar;
pub mod loader;
pub mod pattern;
pub mod registry;
pub mod rule;

/// Name category, selecting one of the two parallel table sets of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    People,
    Places,
}

impl Category {
    /// Both categories, in the order results are produced
    pub const ALL: [Category; 2] = [Category::People, Category::Places];

    /// Lowercase name used in rule file section headers
    pub fn section_suffix(&self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Places => "places",
        }
    }

    /// Capitalized name used in result records
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Places => "Places",
        }
    }

    /// Parse a section suffix (`people` / `places`)
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "people" => Some(Self::People),
            "places" => Some(Self::Places),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
