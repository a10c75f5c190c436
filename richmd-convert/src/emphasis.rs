//! Emphasis delimiter repair
//!
//! Markdown emphasis markers are only recognized when their boundaries are
//! left/right-flanking per CommonMark. When a serializer wraps an arbitrary
//! text run in emphasis markers, the run may start or end with characters
//! that make the boundary illegal (whitespace, certain punctuation runs) and
//! the emitted Markdown would not parse back to the same span. The helpers
//! here walk the markers inward past such characters and drop spans that
//! become too narrow to survive.
//!
//! All offsets are character offsets, not byte offsets.

/// Blank or control character, per the flanking fast path
fn is_markdown_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch.is_control()
}

/// ASCII punctuation. Non-ASCII characters are treated as neither
/// whitespace nor punctuation, an approximation of the full Unicode rule.
fn is_markdown_punctuation(ch: char) -> bool {
    matches!(ch, '!'..='/' | ':'..='@' | '['..='`' | '{'..='~')
}

/// Whether the character at `pos` may legally open (`opening`) or close an
/// emphasis run per the CommonMark flanking rules.
///
/// A virtual space is assumed outside the string on both ends, so the first
/// position is always a legal opening boundary and the last position is
/// always a legal closing boundary.
pub fn can_use(text: &str, pos: usize, opening: bool) -> bool {
    let len = text.chars().count();
    if len == 0 || pos >= len {
        return false;
    }
    if opening {
        if pos == 0 {
            return true;
        }
        if pos == len - 1 {
            return false;
        }
    } else {
        if pos == len - 1 {
            return true;
        }
        if pos == 0 {
            return false;
        }
    }

    let mut window = text.chars().skip(pos - 1);
    let (prev, cur, next) = match (window.next(), window.next(), window.next()) {
        (Some(prev), Some(cur), Some(next)) => (prev, cur, next),
        _ => return false,
    };

    if is_markdown_whitespace(cur) {
        return false;
    }
    let neighbor = if opening { prev } else { next };
    !is_markdown_punctuation(cur)
        || is_markdown_whitespace(neighbor)
        || is_markdown_punctuation(neighbor)
}

/// Move the delimiter token located at character offset `start` by `offset`
/// signed positions within `text`.
///
/// The token is removed first, then reinserted into the shortened string.
/// No validation is performed; callers guarantee a token actually sits at
/// `start`. Malformed inputs produce garbage output, never a failure.
pub fn shift_delimiter(text: &str, delim: &str, start: usize, offset: isize) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let dlen = delim.chars().count();
    let start = start.min(chars.len());
    let end = (start + dlen).min(chars.len());
    chars.drain(start..end);
    let target = (start as isize + offset).clamp(0, chars.len() as isize) as usize;
    for (i, ch) in delim.chars().enumerate() {
        chars.insert(target + i, ch);
    }
    chars.into_iter().collect()
}

/// An emphasis span inside its owning text
///
/// `from`/`to` are half-open character offsets delimiting the content
/// between a delimiter pair; the delimiters sit immediately outside
/// `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmphasisSpan {
    pub text: String,
    pub from: usize,
    pub to: usize,
}

impl EmphasisSpan {
    pub fn new(text: impl Into<String>, from: usize, to: usize) -> Self {
        EmphasisSpan {
            text: text.into(),
            from,
            to,
        }
    }

    /// Shrink the span from both ends until both boundaries are
    /// flanking-legal, collapsing it entirely if it becomes degenerate.
    ///
    /// Each pass is bounded by the span width, so the walk terminates even
    /// on all-whitespace or all-punctuation content. Never fails.
    pub fn trim(mut self, delim: &str) -> EmphasisSpan {
        let dlen = delim.chars().count();

        let bound = self.to - self.from;
        let mut pos = self.from;
        let mut steps = 0;
        while steps < bound && pos < self.to && !can_use(&self.text, pos, true) {
            self.text = shift_delimiter(&self.text, delim, self.from - dlen, 1);
            self.from += 1;
            pos += 1;
            steps += 1;
        }

        let bound = self.to - self.from;
        let mut pos = self.to;
        let mut steps = 0;
        while steps < bound && pos > self.from && !can_use(&self.text, pos - 1, false) {
            self.text = shift_delimiter(&self.text, delim, self.to, -1);
            self.to -= 1;
            pos -= 1;
            steps += 1;
        }

        // A span narrower than the delimiter plus one character is not worth
        // keeping; delete the pair and the wrapped content.
        if self.to - self.from < dlen + 1 {
            let mut chars: Vec<char> = self.text.chars().collect();
            let start = self.from.saturating_sub(dlen);
            let end = (self.to + dlen).min(chars.len());
            chars.drain(start..end);
            self.text = chars.into_iter().collect();
            self.from = start;
            self.to = start;
        }

        self
    }
}
