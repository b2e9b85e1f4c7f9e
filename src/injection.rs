//! Marker patterns and the blocks injected next to them.
//!
//! An [`Injection`] pairs a [`Marker`] with a fixed block of text. Locating
//! the marker yields zero-width [`Edit`]s right after each selected match;
//! a marker that is not found yields no edits, which leaves the text
//! unchanged. A miss is never an error.

use crate::edit::{Edit, EditError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Literal that the row-building script assigns to history rows.
pub const SCRIPT_MARKER: &str = r#"row.className = "historyItem";"#;

/// Rule appended after the first `.historyItem{...}` block.
pub const OLDER_CSS_BLOCK: &str = "
    .historyItem.older{
      background: #f8f9fa;
    }";

/// Age check appended after every row class assignment.
pub const OLDER_SCRIPT_BLOCK: &str = "\n      \n      \
const ageHours = it.since ? (Date.now() - new Date(it.since).getTime()) / (1000 * 60 * 60) : 0;\n      \
if (ageHours > 24) {\n        \
row.classList.add(\"older\");\n      \
}";

/// `.historyItem{` up to the next `}`. The body must be non-empty and may
/// span lines; nested braces are not tracked.
const CSS_RULE_PATTERN: &str = r"\.historyItem\{[^}]+\}";

/// How an injection finds its insertion points.
#[derive(Debug, Clone)]
pub enum Marker {
    /// Only the first regex match is used.
    FirstPattern(Regex),
    /// Every non-overlapping occurrence of the literal is used.
    EveryLiteral(&'static str),
}

impl Marker {
    /// Byte spans of the selected matches, in text order.
    pub fn find_spans(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            Marker::FirstPattern(regex) => regex
                .find(text)
                .map(|m| (m.start(), m.end()))
                .into_iter()
                .collect(),
            Marker::EveryLiteral(literal) => text
                .match_indices(literal)
                .map(|(start, matched)| (start, start + matched.len()))
                .collect(),
        }
    }
}

/// A fixed block inserted right after each selected marker match.
#[derive(Debug, Clone)]
pub struct Injection {
    pub name: &'static str,
    pub marker: Marker,
    pub block: &'static str,
}

/// Text after an injection ran, with the number of blocks inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub insertions: usize,
}

impl Injection {
    /// Compute the insertions without touching the text.
    pub fn locate(&self, text: &str) -> Vec<Edit> {
        let spans = self.marker.find_spans(text);

        if spans.is_empty() {
            debug!(injection = self.name, "marker not found, leaving text unchanged");
        }

        spans
            .into_iter()
            .map(|(start, end)| {
                if let Marker::FirstPattern(_) = self.marker {
                    if text[start..end].matches('{').count() > 1 {
                        warn!(
                            injection = self.name,
                            offset = start,
                            "matched rule contains a nested brace; insertion point may fall inside it"
                        );
                    }
                }
                Edit::insert(end, self.block)
            })
            .collect()
    }

    pub fn apply(&self, text: &str) -> Result<Applied, EditError> {
        let edits = self.locate(text);
        let text = Edit::apply_all(text, &edits)?;
        debug!(injection = self.name, insertions = edits.len(), "injection applied");
        Ok(Applied {
            text,
            insertions: edits.len(),
        })
    }
}

pub static HISTORY_ITEM_CSS: Lazy<Injection> = Lazy::new(|| Injection {
    name: "history-item-css",
    marker: Marker::FirstPattern(
        Regex::new(CSS_RULE_PATTERN).expect("CSS rule pattern is a valid regex"),
    ),
    block: OLDER_CSS_BLOCK,
});

pub static HISTORY_ITEM_SCRIPT: Lazy<Injection> = Lazy::new(|| Injection {
    name: "history-item-script",
    marker: Marker::EveryLiteral(SCRIPT_MARKER),
    block: OLDER_SCRIPT_BLOCK,
});

/// Insert the `.historyItem.older` rule after the first `.historyItem{...}` block.
pub fn insert_css(text: &str) -> Result<Applied, EditError> {
    HISTORY_ITEM_CSS.apply(text)
}

/// Append the age check after every row class assignment.
pub fn insert_script(text: &str) -> Result<Applied, EditError> {
    HISTORY_ITEM_SCRIPT.apply(text)
}
