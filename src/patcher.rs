//! Read → transform → write pipeline for the target document.
//!
//! The document is read once, both injections run on the in-memory text, and
//! only then is the result written back over the same path. A failed read
//! means nothing is written.

use crate::edit::EditError;
use crate::injection::{insert_css, insert_script};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("edit error: {0}")]
    Edit(#[from] EditError),
}

impl PatchError {
    /// The underlying I/O error, if this was a read or write failure.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            PatchError::Read { source, .. } | PatchError::Write { source, .. } => Some(source),
            PatchError::Edit(_) => None,
        }
    }
}

/// Document text after both injections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub css_insertions: usize,
    pub script_insertions: usize,
}

/// Run the CSS step, then the script step.
pub fn transform(text: &str) -> Result<Transformed, EditError> {
    let css = insert_css(text)?;
    let script = insert_script(&css.text)?;
    Ok(Transformed {
        text: script.text,
        css_insertions: css.insertions,
        script_insertions: script.insertions,
    })
}

/// Outcome of a patch run (or a planned one).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchReport should be checked for changes"]
pub struct PatchReport {
    pub path: PathBuf,
    pub original: String,
    pub patched: String,
    pub css_insertions: usize,
    pub script_insertions: usize,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }
}

/// Read `path` and compute the patched text without writing anything.
pub fn plan(path: impl AsRef<Path>) -> Result<PatchReport, PatchError> {
    let path = path.as_ref();
    let original = fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = original.len(), "read target");

    let transformed = transform(&original)?;

    Ok(PatchReport {
        path: path.to_path_buf(),
        original,
        patched: transformed.text,
        css_insertions: transformed.css_insertions,
        script_insertions: transformed.script_insertions,
    })
}

/// Patch the file at `path` in place.
///
/// The result is always written back, even when neither marker was found,
/// so an untouched document round-trips byte for byte.
pub fn patch(path: impl AsRef<Path>) -> Result<PatchReport, PatchError> {
    let report = plan(path)?;
    write_back(&report.path, &report.patched)?;
    debug!(
        path = %report.path.display(),
        changed = report.changed(),
        "wrote target"
    );
    Ok(report)
}

/// Truncate `path` and write `content` over it.
///
/// Writes through the existing file rather than renaming a replacement into
/// place, so the file's own permissions govern whether the write succeeds.
fn write_back(path: &Path, content: &str) -> Result<(), PatchError> {
    let to_err = |source: std::io::Error| PatchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(to_err)?;
    file.write_all(content.as_bytes()).map_err(to_err)?;
    file.sync_all().map_err(to_err)?;

    Ok(())
}
