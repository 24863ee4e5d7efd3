// Prefix-based line categorization and display color mapping
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DisplayConfig;

/// Origin/severity category of a log line, inferred from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Raw full response dump (`< Full response:`)
    FullResponse,
    /// Serial-level response (`< Response:`)
    SerialResponse,
    /// ccTalk-level response (`< ccTalk`)
    #[serde(rename = "cctalk_response")]
    CcTalkResponse,
    /// Serial-level request (`> Request:`)
    SerialRequest,
    /// ccTalk-level request (`> ccTalk`)
    #[serde(rename = "cctalk_request")]
    CcTalkRequest,
    /// Informational line (`* `)
    Info,
    /// Error line (`! `, `!<`, `!>`)
    Error,
    /// Anything else
    Default,
}

/// Display color identifier (HTML hex notation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorId(pub &'static str);

impl ColorId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One entry of the categorization table
#[derive(Debug, Clone, Copy)]
pub struct PrefixRule {
    pub prefixes: &'static [&'static str],
    pub category: Category,
    pub color: ColorId,
}

/// Color of lines no rule matches
pub const DEFAULT_COLOR: ColorId = ColorId("#000000"); // black

/// Categorization rules, evaluated top to bottom; first match wins
pub const CATEGORY_RULES: &[PrefixRule] = &[
    PrefixRule {
        prefixes: &["< Full response:"],
        category: Category::FullResponse,
        color: ColorId("#c0c0c0"), // grey
    },
    PrefixRule {
        prefixes: &["< Response:"],
        category: Category::SerialResponse,
        color: ColorId("#00A500"), // dark green
    },
    PrefixRule {
        prefixes: &["< ccTalk"],
        category: Category::CcTalkResponse,
        color: ColorId("#00A597"), // marine
    },
    PrefixRule {
        prefixes: &["> Request:"],
        category: Category::SerialRequest,
        color: ColorId("#7C65A5"), // violet
    },
    PrefixRule {
        prefixes: &["> ccTalk"],
        category: Category::CcTalkRequest,
        color: ColorId("#5886A5"), // blue-grey
    },
    PrefixRule {
        prefixes: &["* "],
        category: Category::Info,
        color: ColorId("#B900CA"), // pink-violet
    },
    PrefixRule {
        prefixes: &["! ", "!<", "!>"],
        category: Category::Error,
        color: ColorId("#FF0000"), // red
    },
];

impl Category {
    /// All categories in rule priority order, `Default` last
    pub const ALL: [Category; 8] = [
        Category::FullResponse,
        Category::SerialResponse,
        Category::CcTalkResponse,
        Category::SerialRequest,
        Category::CcTalkRequest,
        Category::Info,
        Category::Error,
        Category::Default,
    ];

    /// Stable color assigned to this category, taken from its rule
    pub fn color(self) -> ColorId {
        CATEGORY_RULES
            .iter()
            .find(|rule| rule.category == self)
            .map(|rule| rule.color)
            .unwrap_or(DEFAULT_COLOR)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::FullResponse => "full_response",
            Category::SerialResponse => "serial_response",
            Category::CcTalkResponse => "cctalk_response",
            Category::SerialRequest => "serial_request",
            Category::CcTalkRequest => "cctalk_request",
            Category::Info => "info",
            Category::Error => "error",
            Category::Default => "default",
        }
    }

    /// Whether lines of this category are enabled for display coloring.
    /// Info, error and uncategorized lines have no flag.
    pub fn is_enabled(self, display: &DisplayConfig) -> bool {
        match self {
            Category::FullResponse => display.show_full_response,
            Category::SerialResponse => display.show_serial_response,
            Category::CcTalkResponse => display.show_cctalk_response,
            Category::SerialRequest => display.show_serial_request,
            Category::CcTalkRequest => display.show_cctalk_request,
            Category::Info | Category::Error | Category::Default => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Categorize a line by its prefix. Depends only on the text itself.
pub fn classify(line: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.prefixes.iter().any(|p| line.starts_with(p)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Default)
}

/// Color to render a line of `category` with; disabled categories fall back to the default color
pub fn display_color(category: Category, display: &DisplayConfig) -> ColorId {
    if category.is_enabled(display) {
        category.color()
    } else {
        Category::Default.color()
    }
}
