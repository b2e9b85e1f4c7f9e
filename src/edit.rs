use thiserror::Error;

/// The fundamental edit primitive: byte-span replacement on in-memory text.
///
/// Both injections compile down to zero-width insertions of this type. The
/// intelligence lives in locating the span, not in applying it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Edit does nothing until applied"]
pub struct Edit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// New text to put at [byte_start, byte_end)
    pub new_text: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid byte range: [{byte_start}, {byte_end}) in text of length {text_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        text_len: usize,
    },

    #[error("Byte offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("Overlapping edits: [{first_start}, {first_end}) and [{second_start}, {second_end})")]
    Overlap {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },
}

impl Edit {
    pub fn new(byte_start: usize, byte_end: usize, new_text: impl Into<String>) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text: new_text.into(),
        }
    }

    /// Zero-width edit that inserts `text` at `at`.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn is_insertion(&self) -> bool {
        self.byte_start == self.byte_end
    }

    fn validate(&self, text: &str) -> Result<(), EditError> {
        if self.byte_start > self.byte_end || self.byte_end > text.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                text_len: text.len(),
            });
        }

        for offset in [self.byte_start, self.byte_end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }

        Ok(())
    }

    /// Apply a single edit, returning the new text.
    pub fn apply_to(&self, text: &str) -> Result<String, EditError> {
        Self::apply_all(text, std::slice::from_ref(self))
    }

    /// Apply a set of edits to the same text in one pass.
    ///
    /// Every span is validated against the original text before anything is
    /// spliced. Edits are applied bottom-to-top so earlier offsets stay valid.
    /// Insertions sharing an offset keep their submission order.
    pub fn apply_all(text: &str, edits: &[Edit]) -> Result<String, EditError> {
        if edits.is_empty() {
            return Ok(text.to_string());
        }

        for edit in edits {
            edit.validate(text)?;
        }

        // Stable sort ascending, so same-offset insertions keep their order
        let mut ordered: Vec<&Edit> = edits.iter().collect();
        ordered.sort_by_key(|e| (e.byte_start, e.byte_end));

        for window in ordered.windows(2) {
            let (first, second) = (window[0], window[1]);
            if first.byte_end > second.byte_start {
                return Err(EditError::Overlap {
                    first_start: first.byte_start,
                    first_end: first.byte_end,
                    second_start: second.byte_start,
                    second_end: second.byte_end,
                });
            }
        }

        let grown: usize = edits.iter().map(|e| e.new_text.len()).sum();
        let mut out = String::with_capacity(text.len() + grown);
        let mut cursor = 0;
        for edit in ordered {
            out.push_str(&text[cursor..edit.byte_start]);
            out.push_str(&edit.new_text);
            cursor = edit.byte_end;
        }
        out.push_str(&text[cursor..]);

        Ok(out)
    }
}
