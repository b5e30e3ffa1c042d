// src/preamble/group.rs

//! Groups of lines that move together during reordering

/// A substantive line plus the comment / macro lines that precede it
///
/// Attachments keep their original text. The substantive line is the
/// canonical, already-normalized form. A group is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    attachments: Vec<String>,
    line: String,
}

impl Group {
    pub fn new(attachments: Vec<String>, line: String) -> Self {
        Self { attachments, line }
    }

    /// The substantive line (used for sort keys)
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// All lines in output order, attachments first
    pub fn into_lines(self) -> impl Iterator<Item = String> {
        self.attachments.into_iter().chain(std::iter::once(self.line))
    }
}

/// Attachment lines waiting for the next substantive line
#[derive(Debug, Clone, Default)]
pub struct GroupBuffer {
    lines: Vec<String>,
}

impl GroupBuffer {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Push `line` unless it is already the most recent attachment
    pub fn push_once(&mut self, line: &str) {
        if self.last() != Some(line) {
            self.push(line);
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Wrap `line` with everything pending and leave the buffer empty
    pub fn commit(&mut self, line: String) -> Group {
        Group::new(std::mem::take(&mut self.lines), line)
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
