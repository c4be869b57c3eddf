//! Job description intake: bounded text with live character and word counts.

pub const MAX_CHARACTERS: usize = 5000;

/// Outcome of a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// The candidate was over [`MAX_CHARACTERS`]; the previous value is kept.
    Rejected,
}

#[derive(Debug, Default, Clone)]
pub struct JobDescriptionInput {
    text: String,
    character_count: usize,
    word_count: usize,
}

impl JobDescriptionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text with `candidate` unless it exceeds the limit.
    pub fn edit(&mut self, candidate: &str) -> EditOutcome {
        let length = character_count(candidate);
        if length > MAX_CHARACTERS {
            return EditOutcome::Rejected;
        }

        self.text = candidate.to_string();
        self.character_count = length;
        self.word_count = word_count(candidate);
        EditOutcome::Accepted
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Informational only; edits up to the limit are still accepted.
    pub fn at_limit(&self) -> bool {
        self.character_count == MAX_CHARACTERS
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Length in UTF-16 code units, matching the textarea's `maxlength` and `value.length`.
pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Number of whitespace-separated words after trimming.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
