/// A field value scanned from one line of a filter script.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Token {
    /// Trimmed text of the field.
    pub value: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based character index of the first retained character.
    pub column: usize,
}

/// The four fields of a line, in the order they are scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// `cut` / `mute`.
    Verb,
    /// Text up to the `-` separator.
    Start,
    /// Text up to the opening `(`.
    End,
    /// Text up to the closing `)`.
    Reason,
}

/// What the lexer does with one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Append the character to the pending token.
    Push,
    /// Drop a leading whitespace character.
    Skip,
    /// Emit the pending token and continue in the given field.
    Advance(Field),
    /// Emit the pending token (even if empty) and ignore the rest of the line.
    Finish,
    /// Drop the pending token and the rest of the line (`#` comment).
    Abandon,
}

impl Field {
    /// Transition for `ch` given whether the pending token is still empty.
    ///
    /// `#` ends the line from every field and throws away the token scanned so far, even a
    /// complete end time or an open annotation.
    pub fn step(self, ch: char, pending_empty: bool) -> Step {
        if ch == '#' {
            return Step::Abandon;
        }
        match self {
            Field::Verb if ch.is_whitespace() && !pending_empty => Step::Advance(Field::Start),
            Field::Start if ch == '-' && !pending_empty => Step::Advance(Field::End),
            Field::End if ch == '(' && !pending_empty => Step::Advance(Field::Reason),
            Field::Reason if ch == ')' => Step::Finish,
            _ if ch.is_whitespace() && pending_empty => Step::Skip,
            _ => Step::Push,
        }
    }
}

#[derive(Default)]
struct Pending {
    value: String,
    column: Option<usize>,
}

impl Pending {
    fn push(&mut self, ch: char, column: usize) {
        self.column.get_or_insert(column);
        self.value.push(ch);
    }

    fn take(&mut self, line: usize, fallback_column: usize) -> Token {
        let pending = std::mem::take(self);
        Token {
            value: pending.value.trim().to_owned(),
            line,
            column: pending.column.unwrap_or(fallback_column),
        }
    }
}

/// Scan a whole filter script into tokens, line by line.
///
/// Tokens never span lines; blank and comment-only lines produce nothing.
#[tracing::instrument(skip(input), fields(bytes = input.len()))]
pub fn lex(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        lex_line(idx + 1, line, &mut out);
    }
    tracing::debug!(tokens = out.len(), "lexed filter script");
    out
}

fn lex_line(line_no: usize, line: &str, out: &mut Vec<Token>) {
    let mut field = Field::Verb;
    let mut pending = Pending::default();

    for (idx, ch) in line.chars().enumerate() {
        let column = idx + 1;
        match field.step(ch, pending.value.is_empty()) {
            Step::Push => pending.push(ch, column),
            Step::Skip => {}
            Step::Advance(next) => {
                out.push(pending.take(line_no, column));
                field = next;
            }
            Step::Finish => {
                out.push(pending.take(line_no, column));
                return;
            }
            Step::Abandon => return,
        }
    }

    if !pending.value.is_empty() {
        out.push(pending.take(line_no, 0));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/lexer.rs"]
mod tests;
