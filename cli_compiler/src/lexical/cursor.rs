//! Character cursor over specification text

use crate::utils::Position;

/// Reads characters one at a time, tracking 1-based line/column, with
/// exactly one character of pushback.
#[derive(Debug, Clone)]
pub struct SourceCursor {
    source: String,
    position: Position,
    /// Position before the last `get`, while it may still be pushed back
    previous: Option<Position>,
}

impl SourceCursor {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            position: Position::start(),
            previous: None,
        }
    }

    /// Position of the next character to be read
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_eos(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.position.offset..].chars().next()
    }

    /// Consume and return the next character
    pub fn get(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.previous = Some(self.position);
        self.position = self.position.advance(ch);
        Some(ch)
    }

    /// Push the last character read back onto the stream.
    ///
    /// Returns false when there is nothing to push back: either nothing has
    /// been read yet or the single pushback slot was already used.
    pub fn unget(&mut self) -> bool {
        match self.previous.take() {
            Some(previous) => {
                self.position = previous;
                true
            }
            None => false,
        }
    }

    /// Consume characters while `pred` holds, appending them to `out`
    pub fn take_while(&mut self, out: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.get();
            out.push(ch);
        }
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.get();
        }
    }
}
