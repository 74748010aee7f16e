//! Bounded status line buffer
//!
//! [`StatusLine`] is the only place text is concatenated. It never grows
//! past its capacity: an append that does not fit is cut at the last UTF-8
//! character boundary that fits, and every append after that is refused.

/// A status line with a fixed byte capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl StatusLine {
    /// Create an empty line that can hold at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Append `piece`, truncating if it does not fit
    ///
    /// Returns `true` if the whole piece was appended. Once an append has
    /// been truncated the line is closed and further pieces are dropped.
    pub fn push_bounded(&mut self, piece: &str) -> bool {
        if self.truncated {
            return false;
        }

        let remaining = self.remaining();
        if piece.len() <= remaining {
            self.buf.push_str(piece);
            return true;
        }

        let mut cut = remaining;
        while !piece.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&piece[..cut]);
        self.truncated = true;
        false
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Maximum length in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current length in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether an append was cut short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The composed text
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the line and return its text
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}

/// Render `value` into a printf-like display template
///
/// The first `%s` is replaced by `value` and `%%` becomes `%`. Any other
/// text, including further `%s` sequences, is copied literally.
pub fn render_template(template: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut chars = template.chars().peekable();
    let mut substituted = false;

    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('s') if !substituted => {
                    chars.next();
                    out.push_str(value);
                    substituted = true;
                    continue;
                }
                Some('%') => {
                    chars.next();
                    out.push('%');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }

    out
}
