//! History Patcher: one-shot age highlighting for a newsboard history page
//!
//! Reads a single HTML document, injects a `.historyItem.older` CSS rule and
//! the script that tags rows older than 24 hours with it, then writes the
//! document back over the same path.
//!
//! # Architecture
//!
//! Both injections compile down to a single primitive: [`Edit`], a zero-width
//! byte-span insertion. An [`Injection`] only decides *where* its block goes:
//!
//! - the CSS rule goes after the first `.historyItem{...}` block (regex,
//!   naive brace matching, first match only)
//! - the script goes after every literal `row.className = "historyItem";`
//!
//! A marker that cannot be found is a silent no-op, never an error. The only
//! failures are I/O failures reading or writing the target.
//!
//! # Example
//!
//! ```no_run
//! use history_patcher::patch;
//!
//! match patch("docs/index.html") {
//!     Ok(report) => println!("{} CSS, {} script insertions",
//!         report.css_insertions, report.script_insertions),
//!     Err(e) => eprintln!("Patch failed: {}", e),
//! }
//! ```

pub mod edit;
pub mod injection;
pub mod patcher;

// Re-exports
pub use edit::{Edit, EditError};
pub use injection::{
    insert_css, insert_script, Applied, Injection, Marker, HISTORY_ITEM_CSS, HISTORY_ITEM_SCRIPT,
    OLDER_CSS_BLOCK, OLDER_SCRIPT_BLOCK, SCRIPT_MARKER,
};
pub use patcher::{patch, plan, transform, PatchError, PatchReport, Transformed};
