//! Deterministic normalization of accepted free text.
//!
//! The output is trimmed, contains no `<` or `>`, has no whitespace runs,
//! holds only printable ASCII and is at most `max_len` characters. All steps
//! run in a single pass so that characters dropped between two whitespace
//! runs cannot leave a double space behind, which keeps `sanitize`
//! idempotent.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_len));
    let mut pending_space = false;

    for c in text.chars() {
        if is_collapsible_whitespace(c) {
            pending_space = true;
            continue;
        }
        if c == '<' || c == '>' || !is_printable_ascii(c) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    // Everything pushed is ASCII, so byte length equals char count.
    out.truncate(max_len);
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}

// Unicode whitespace minus NEL, plus the BOM.
fn is_collapsible_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn is_printable_ascii(c: char) -> bool {
    ('\x20'..='\x7e').contains(&c)
}
