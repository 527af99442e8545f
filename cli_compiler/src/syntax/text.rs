//! Text clean-up for option names and documentation strings

/// Remove every `"` not preceded by a backslash.
///
/// A joined literal such as `"a" "b"` becomes `a b`.
pub fn strip_unescaped_quotes(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut previous = None;

    for c in literal.chars() {
        if c != '"' || previous == Some('\\') {
            out.push(c);
        }
        previous = Some(c);
    }

    out
}

/// Normalize a documentation string (quotes already stripped).
///
/// Each line is trimmed. Consecutive non-blank lines are joined with a single
/// space, a run of blank lines between them becomes one `\n`, and blank lines
/// at either end are dropped.
pub fn normalize_doc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut paragraph_break = false;

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() {
            paragraph_break = !out.is_empty();
            continue;
        }

        if !out.is_empty() {
            out.push(if paragraph_break { '\n' } else { ' ' });
        }
        paragraph_break = false;
        out.push_str(line);
    }

    out
}
