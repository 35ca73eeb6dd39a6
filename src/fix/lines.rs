//! In-memory line editor shared by fix apply and preview.

/// A text file split into lines.
///
/// Whether the text ended with a newline is remembered and restored by
/// [`render`](LineBuffer::render). Multi-line content passed to an edit is
/// split, so [`len`](LineBuffer::len) always equals the line count of the
/// rendered text when parsed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl LineBuffer {
    /// Split `text` into lines.
    pub fn parse(text: &str) -> Self {
        let trailing_newline = text.is_empty() || text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::to_string).collect()
        };
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn split(content: &str) -> impl Iterator<Item = String> + '_ {
        content.split('\n').map(str::to_string)
    }

    /// Replace 1-based `line` with `content`. Returns false if out of range.
    pub fn replace(&mut self, line: usize, content: &str) -> bool {
        if line == 0 || line > self.lines.len() {
            return false;
        }
        self.lines.splice(line - 1..line, Self::split(content));
        true
    }

    /// Insert `content` before 1-based `line`; `len + 1` appends.
    /// Returns false if out of range.
    pub fn insert(&mut self, line: usize, content: &str) -> bool {
        if line == 0 || line > self.lines.len() + 1 {
            return false;
        }
        self.lines.splice(line - 1..line - 1, Self::split(content));
        true
    }

    /// Remove 1-based `line`. Returns false if out of range.
    pub fn delete(&mut self, line: usize) -> bool {
        if line == 0 || line > self.lines.len() {
            return false;
        }
        self.lines.remove(line - 1);
        true
    }

    /// Join the lines back into text.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        // A lone empty line still needs its newline to count as a line.
        if self.trailing_newline || text.is_empty() {
            text.push('\n');
        }
        text
    }
}

/// Line count of `text`, as [`LineBuffer`] sees it.
pub fn count_lines(text: &str) -> usize {
    LineBuffer::parse(text).len()
}
